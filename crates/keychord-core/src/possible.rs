// Keychord Possible Key Set
// Derives the canonical key names one raw input event could satisfy

use smallvec::SmallVec;

use crate::event::{EventKind, KeyEvent};
use crate::key::{printable_char, shifted_symbol, special_key_name};

/// The set of canonical key-name strings one input event could be interpreted
/// as: the plain or modifier-qualified special name, the qualified printable
/// character, and the shifted-symbol alias.
///
/// Ephemeral; computed once per event and discarded. Holds one to three
/// entries for any recognized event and none for an unknown one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PossibleKeys {
    names: SmallVec<[String; 3]>,
}

impl PossibleKeys {
    pub fn from_event(event: &KeyEvent) -> Self {
        // Keypress events represent characters, never special keys.
        let special = match event.kind {
            EventKind::Keydown => special_key_name(event.code),
            EventKind::Keypress => None,
        };
        let character = printable_char(event.code);

        // Modifier prefix in canonical order, excluding a modifier that is
        // itself the pressed key (pressing ctrl alone is "ctrl", never
        // "ctrl+ctrl") and suppressing meta while ctrl is also held.
        let mut base = String::new();
        if event.alt && special != Some("alt") {
            base.push_str("alt+");
        }
        if event.ctrl && special != Some("ctrl") {
            base.push_str("ctrl+");
        }
        if event.meta && !event.ctrl && special != Some("meta") {
            base.push_str("meta+");
        }
        let shifted = event.shift && special != Some("shift");

        let mut prefix = base.clone();
        if shifted {
            prefix.push_str("shift+");
        }

        let mut names: SmallVec<[String; 3]> = SmallVec::new();
        if let Some(special) = special {
            names.push(format!("{prefix}{special}"));
        }
        if let Some(character) = character {
            let qualified = format!("{prefix}{character}");
            if !names.contains(&qualified) {
                names.push(qualified);
            }
        }

        // "$" can be specified as "shift+4" or as "$" itself; the alias drops
        // the shift qualifier since the symbol already implies it.
        if shifted {
            let alias_source = special
                .and_then(|name| {
                    let mut chars = name.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => Some(ch),
                        _ => None,
                    }
                })
                .or(character);
            if let Some(symbol) = alias_source.and_then(shifted_symbol) {
                names.push(format!("{base}{symbol}"));
            }
        }

        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
