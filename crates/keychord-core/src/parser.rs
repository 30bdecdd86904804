// Keychord Combo Parser
// Parses combo spec strings like "gh", "ctrl+shift+a" or "ab cd" (alternatives)

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;

use crate::modifier::{Modifier, ModifierSet};
use crate::token::{ChordStep, ComboSpec, KeyToken};

/// Errors raised while parsing a combo spec string.
///
/// Parse errors surface synchronously at registration time; nothing partial
/// is ever registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("combo spec cannot be empty")]
    Empty,

    #[error("combo '{0}' ends with a modifier prefix and no key")]
    DanglingModifier(String),
}

/// Leading modifier qualifier, e.g. the "ctrl+" in "ctrl+c".
fn modifier_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(?i)(ctrl|meta|shift|alt)\+").expect("valid modifier pattern"))
}

/// Leading multi-character special-key name.
///
/// The alternation order is a precedence contract: longer or more specific
/// names win over ambiguous single-character prefixes ("return" over a bare
/// "r", "shift" over a bare "s"), so it must be tried in full before falling
/// back to single-character consumption.
fn special_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)^(backspace|tab|r(ight|eturn)|s(hift|pace|croll)|c(trl|apslock)|alt|pa(use|ge(up|down))|e(sc|nd)|home|left|up|d(el|own)|insert|f\d\d?|numlock|meta)",
        )
        .expect("valid special-key pattern")
    })
}

/// Parse a combo spec string into its independent chord alternatives.
///
/// The spec is trimmed and split on whitespace runs; each piece becomes one
/// [`ComboSpec`]. `"ab cd"` therefore means (a then b) OR (c then d).
///
/// # Examples
/// ```
/// use keychord_core::parser::parse_combos;
///
/// let combos = parse_combos("12ctrl+3").unwrap();
/// assert_eq!(combos.len(), 1);
/// assert_eq!(combos[0].canonical(), "1 2 ctrl+3");
/// ```
pub fn parse_combos(spec: &str) -> Result<Vec<ComboSpec>, ParseError> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    trimmed.split_whitespace().map(parse_alternative).collect()
}

/// Parse one whitespace-free alternative into an ordered chord.
fn parse_alternative(alt: &str) -> Result<ComboSpec, ParseError> {
    let mut rest = alt;
    let mut pending = ModifierSet::EMPTY;
    let mut steps = Vec::new();

    while !rest.is_empty() {
        if let Some(m) = modifier_prefix_re().captures(rest) {
            // Accumulate the qualifier; it attaches to the next emitted key.
            if let Ok(modifier) = Modifier::from_str(&m[1].to_lowercase()) {
                pending.insert(modifier);
            }
            rest = &rest[m[0].len()..];
            continue;
        }

        if let Some(m) = special_name_re().find(rest) {
            steps.push(ChordStep::single(KeyToken::new(pending.take(), m.as_str())));
            rest = &rest[m.end()..];
            continue;
        }

        match rest.chars().next() {
            Some(ch) => {
                steps.push(ChordStep::single(KeyToken::new(pending.take(), ch.to_string())));
                rest = &rest[ch.len_utf8()..];
            }
            None => break,
        }
    }

    if !pending.is_empty() {
        return Err(ParseError::DanglingModifier(alt.to_string()));
    }

    ComboSpec::from_steps(steps).ok_or(ParseError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventKind;

    fn one(spec: &str) -> ComboSpec {
        let mut combos = parse_combos(spec).unwrap();
        assert_eq!(combos.len(), 1, "expected a single combo from '{spec}'");
        combos.remove(0)
    }

    #[test]
    fn test_parse_single_characters() {
        let combo = one("gh");
        assert_eq!(combo.canonical(), "g h");
        assert_eq!(combo.len(), 2);
    }

    #[test]
    fn test_parse_modifier_qualified_key() {
        assert_eq!(one("ctrl+c").canonical(), "ctrl+c");
        assert_eq!(one("ctrl+shift+c").canonical(), "ctrl+shift+c");
    }

    #[test]
    fn test_parse_modifier_order_normalized() {
        // "shift+ctrl+c" and "ctrl+shift+c" are the same token.
        assert_eq!(one("shift+ctrl+c").canonical(), "ctrl+shift+c");
    }

    #[test]
    fn test_parse_mixed_plain_and_qualified() {
        // Example from the combo grammar: "12ctrl+3" -> "1", "2", "ctrl+3".
        assert_eq!(one("12ctrl+3").canonical(), "1 2 ctrl+3");
    }

    #[test]
    fn test_parse_special_name_precedence() {
        // "return" must win over consuming a bare 'r'.
        let combo = one("return");
        assert_eq!(combo.len(), 1);
        assert_eq!(combo.canonical(), "return");

        // "shift" as a key, not a dangling qualifier and not 's'+'h'+...
        let combo = one("shift");
        assert_eq!(combo.canonical(), "shift");
        assert!(combo.steps()[0].tokens()[0].modifiers().is_empty());
    }

    #[test]
    fn test_parse_function_keys() {
        assert_eq!(one("f1").canonical(), "f1");
        assert_eq!(one("f12").len(), 1);
        assert_eq!(one("f12").canonical(), "f12");
    }

    #[test]
    fn test_parse_special_then_characters() {
        assert_eq!(one("ctrl+left").canonical(), "ctrl+left");
        assert_eq!(one("gleft").canonical(), "g left");
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(one("ABC").canonical(), "a b c");
        assert_eq!(one("Ctrl+C").canonical(), "ctrl+c");
        assert_eq!(one("RETURN").canonical(), "return");
    }

    #[test]
    fn test_parse_alternatives_split_on_whitespace() {
        let combos = parse_combos("ab cd").unwrap();
        assert_eq!(combos.len(), 2);
        assert_eq!(combos[0].canonical(), "a b");
        assert_eq!(combos[1].canonical(), "c d");

        let combos = parse_combos("  gh   gd  ").unwrap();
        assert_eq!(combos.len(), 2);
    }

    #[test]
    fn test_parse_empty_spec() {
        assert_eq!(parse_combos(""), Err(ParseError::Empty));
        assert_eq!(parse_combos("   "), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_dangling_modifier() {
        assert_eq!(
            parse_combos("ctrl+"),
            Err(ParseError::DanglingModifier("ctrl+".to_string()))
        );
        assert_eq!(
            parse_combos("a ctrl+shift+"),
            Err(ParseError::DanglingModifier("ctrl+shift+".to_string()))
        );
    }

    #[test]
    fn test_parse_symbol_keys() {
        assert_eq!(one("$").canonical(), "$");
        assert_eq!(one("shift+4").canonical(), "shift+4");
    }

    #[test]
    fn test_parsed_combo_event_kind() {
        assert_eq!(one("gh").preferred_event_kind(), EventKind::Keypress);
        assert_eq!(one("ctrl+return").preferred_event_kind(), EventKind::Keydown);
    }

    #[test]
    fn test_parse_is_deterministic() {
        assert_eq!(parse_combos("gshift+left f2"), parse_combos("gshift+left f2"));
    }
}
