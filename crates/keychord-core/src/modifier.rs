// Keychord Modifier Set
// The fixed ctrl/alt/shift/meta modifier set and its canonical prefix order

use std::fmt;

/// A chord modifier key.
///
/// The discriminant order is the canonical prefix order (alt, ctrl, meta,
/// shift) used whenever a modifier-qualified key name is rendered, so a token
/// and a possible-key entry for the same combination always compare equal
/// regardless of the order modifiers were written or held.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum Modifier {
    Alt,
    Ctrl,
    Meta,
    Shift,
}

impl Modifier {
    /// All modifiers in canonical prefix order.
    pub const ALL: [Modifier; 4] = [Modifier::Alt, Modifier::Ctrl, Modifier::Meta, Modifier::Shift];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// A set of held or required modifiers, stored as a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(u8);

impl ModifierSet {
    pub const EMPTY: ModifierSet = ModifierSet(0);

    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    pub fn remove(&mut self, modifier: Modifier) {
        self.0 &= !modifier.bit();
    }

    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Take the current contents, leaving the set empty. Used by the parser
    /// when an accumulated modifier run is attached to the next key.
    pub fn take(&mut self) -> ModifierSet {
        std::mem::take(self)
    }

    /// Iterate the contained modifiers in canonical prefix order.
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        Modifier::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// The `"<mod>+"` prefix run for this set, e.g. `"ctrl+shift+"`.
    pub fn prefix(self) -> String {
        let mut out = String::new();
        for modifier in self.iter() {
            out.push_str(&modifier.to_string());
            out.push('+');
        }
        out
    }
}

impl FromIterator<Modifier> for ModifierSet {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = ModifierSet::EMPTY;
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

impl fmt::Display for ModifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_modifier_display_lowercase() {
        assert_eq!(Modifier::Ctrl.to_string(), "ctrl");
        assert_eq!(Modifier::Meta.to_string(), "meta");
    }

    #[test]
    fn test_modifier_from_str() {
        assert_eq!(Modifier::from_str("shift"), Ok(Modifier::Shift));
        assert_eq!(Modifier::from_str("alt"), Ok(Modifier::Alt));
        assert!(Modifier::from_str("hyper").is_err());
    }

    #[test]
    fn test_set_insert_contains_remove() {
        let mut set = ModifierSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Modifier::Ctrl);
        assert!(set.contains(Modifier::Ctrl));
        assert!(!set.contains(Modifier::Shift));
        set.remove(Modifier::Ctrl);
        assert!(set.is_empty());
    }

    #[test]
    fn test_prefix_canonical_order() {
        // Insertion order must not leak into the rendered prefix.
        let mut set = ModifierSet::EMPTY;
        set.insert(Modifier::Shift);
        set.insert(Modifier::Alt);
        set.insert(Modifier::Ctrl);
        assert_eq!(set.prefix(), "alt+ctrl+shift+");
    }

    #[test]
    fn test_take_empties_the_set() {
        let mut set: ModifierSet = [Modifier::Meta].into_iter().collect();
        let taken = set.take();
        assert!(set.is_empty());
        assert!(taken.contains(Modifier::Meta));
    }
}
