// Keychord Shortcut Instructions
// Renders the human-readable help text for a shortcut's bound chords

use keychord_core::{ChordStep, ComboSpec};

/// Apple command symbol, substituted for "meta" in Mac-style output.
const MAC_META: &str = "\u{2318}";
/// Apple shift symbol.
const MAC_SHIFT: &str = "\u{21E7}";

/// Render instruction text for a set of bound chords, suitable for appending
/// to an element title or tooltip:
///
/// - `["gh"]` becomes ` (Type "g" then "h")`
/// - `["gh", "gd"]` becomes ` (Type "g" then "h" OR "g" then "d")`
///
/// With `mac` set, "meta" and "shift" are shown as the Apple ⌘ and ⇧ symbols.
/// Returns an empty string for an empty slice.
pub fn describe_combos(combos: &[ComboSpec], mac: bool) -> String {
    if combos.is_empty() {
        return String::new();
    }

    let mut out = String::from(" (");
    for (index, combo) in combos.iter().enumerate() {
        let mut steps = combo.steps().iter().map(step_label);
        if let Some(first) = steps.next() {
            if index == 0 {
                out.push_str(&format!("Type \"{first}\""));
            } else {
                out.push_str(&format!(" OR \"{first}\""));
            }
        }
        for step in steps {
            out.push_str(&format!(" then \"{step}\""));
        }
    }
    out.push(')');

    if mac {
        // Rendered names are lowercase, so plain replacement is enough.
        out = out.replace("meta", MAC_META).replace("shift", MAC_SHIFT);
    }
    out
}

fn step_label(step: &ChordStep) -> String {
    step.renderings().join(" or ")
}
