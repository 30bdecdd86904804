// Keychord Combo Tokens
// KeyToken, ChordStep and ComboSpec: the parsed, immutable form of a chord

use std::fmt;
use std::str::FromStr;

use smallvec::SmallVec;

use crate::event::EventKind;
use crate::modifier::{Modifier, ModifierSet};

/// One key press in a chord, optionally qualified by required modifiers.
///
/// `name` is always lowercase and non-empty. A modifier spelled as the key
/// itself is stripped from the qualifier set, so the token for a bare "shift"
/// has an empty modifier set rather than `shift+shift`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyToken {
    modifiers: ModifierSet,
    name: String,
}

impl KeyToken {
    pub fn new(modifiers: ModifierSet, name: impl Into<String>) -> Self {
        let name = name.into().to_lowercase();
        debug_assert!(!name.is_empty(), "key token name must not be empty");
        let mut modifiers = modifiers;
        if let Ok(same) = Modifier::from_str(&name) {
            modifiers.remove(same);
        }
        Self { modifiers, name }
    }

    /// A token with no modifier qualifiers.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(ModifierSet::EMPTY, name)
    }

    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Canonical rendering, e.g. `"ctrl+shift+c"`. Modifiers appear in
    /// canonical prefix order so renderings are comparable as plain strings.
    pub fn render(&self) -> String {
        format!("{}{}", self.modifiers.prefix(), self.name)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.modifiers.prefix(), self.name)
    }
}

/// One position in a chord: a non-empty set of alternative tokens, any of
/// which satisfies the step.
///
/// Steps produced by the string parser hold exactly one token; multi-token
/// steps come from slice-based registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordStep {
    alternatives: SmallVec<[KeyToken; 1]>,
}

impl ChordStep {
    pub fn single(token: KeyToken) -> Self {
        let mut alternatives = SmallVec::new();
        alternatives.push(token);
        Self { alternatives }
    }

    /// A step satisfied by any of the given tokens. Returns `None` when the
    /// iterator is empty.
    pub fn any(tokens: impl IntoIterator<Item = KeyToken>) -> Option<Self> {
        let alternatives: SmallVec<[KeyToken; 1]> = tokens.into_iter().collect();
        if alternatives.is_empty() {
            return None;
        }
        Some(Self { alternatives })
    }

    pub fn tokens(&self) -> &[KeyToken] {
        &self.alternatives
    }

    /// Canonical renderings of every alternative.
    pub fn renderings(&self) -> SmallVec<[String; 1]> {
        self.alternatives.iter().map(KeyToken::render).collect()
    }

    fn label(&self) -> String {
        self.renderings().join("|")
    }
}

/// An immutable ordered chord: the sequence of steps the user must type in
/// order for the combo to complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboSpec {
    steps: Vec<ChordStep>,
    canonical: String,
}

impl ComboSpec {
    /// Build a spec from parsed steps. Returns `None` for an empty sequence;
    /// a chord must require at least one key press.
    pub fn from_steps(steps: Vec<ChordStep>) -> Option<Self> {
        if steps.is_empty() {
            return None;
        }
        let canonical = steps.iter().map(ChordStep::label).collect::<Vec<_>>().join(" ");
        Some(Self { steps, canonical })
    }

    pub fn steps(&self) -> &[ChordStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Canonical string form, used to share one tracker between identical
    /// chords registered by different shortcuts.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    /// Which listener kind an embedder should bind for this chord.
    ///
    /// Special keys only surface on keydown, and every special key except
    /// "space" has a multi-character name, so any such token forces keydown.
    pub fn preferred_event_kind(&self) -> EventKind {
        let unprintable = self.steps.iter().any(|step| {
            step.tokens()
                .iter()
                .any(|t| t.name().chars().count() > 1 && t.name() != "space")
        });
        if unprintable {
            EventKind::Keydown
        } else {
            EventKind::Keypress
        }
    }
}

impl fmt::Display for ComboSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(names: &[&str]) -> ComboSpec {
        let steps = names
            .iter()
            .map(|n| ChordStep::single(KeyToken::bare(*n)))
            .collect();
        ComboSpec::from_steps(steps).unwrap()
    }

    #[test]
    fn test_token_render_canonical_modifier_order() {
        let mut mods = ModifierSet::EMPTY;
        mods.insert(Modifier::Shift);
        mods.insert(Modifier::Ctrl);
        let token = KeyToken::new(mods, "C");
        assert_eq!(token.render(), "ctrl+shift+c");
    }

    #[test]
    fn test_token_strips_self_modifier() {
        let mut mods = ModifierSet::EMPTY;
        mods.insert(Modifier::Shift);
        let token = KeyToken::new(mods, "shift");
        assert!(token.modifiers().is_empty());
        assert_eq!(token.render(), "shift");
    }

    #[test]
    fn test_token_lowercases_name() {
        let token = KeyToken::bare("Return");
        assert_eq!(token.name(), "return");
    }

    #[test]
    fn test_step_any_rejects_empty() {
        assert!(ChordStep::any(Vec::new()).is_none());
    }

    #[test]
    fn test_combo_canonical_form() {
        let combo = spec(&["g", "h"]);
        assert_eq!(combo.canonical(), "g h");

        let step = ChordStep::any([KeyToken::bare("4"), KeyToken::bare("$")]).unwrap();
        let combo = ComboSpec::from_steps(vec![step]).unwrap();
        assert_eq!(combo.canonical(), "4|$");
    }

    #[test]
    fn test_from_steps_rejects_empty() {
        assert!(ComboSpec::from_steps(Vec::new()).is_none());
    }

    #[test]
    fn test_preferred_event_kind_printable() {
        assert_eq!(spec(&["g", "h"]).preferred_event_kind(), EventKind::Keypress);
        assert_eq!(spec(&["space"]).preferred_event_kind(), EventKind::Keypress);
    }

    #[test]
    fn test_preferred_event_kind_special() {
        assert_eq!(spec(&["g", "return"]).preferred_event_kind(), EventKind::Keydown);
        assert_eq!(spec(&["f5"]).preferred_event_kind(), EventKind::Keydown);
    }
}
