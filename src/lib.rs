// Keychord Library
// Fluent shortcut registration on top of the keychord-core match engine
//
// Usage:
//   let mut shortcuts = Shortcuts::new();
//   shortcuts.when_typed("gh")?.or("gd")?.execute(|_| go_home());
//   shortcuts.when_typed("ctrl+b c")?.only_if(|| sidebar_open()).execute(...);
//
// The embedder owns the input listeners; it feeds raw events into
// `Shortcuts::handle_event` and binds the listener kinds reported by
// `Shortcuts::event_kinds`.

pub mod instructions;
pub mod shortcut;

pub use instructions::describe_combos;
pub use shortcut::{ShortcutBuilder, ShortcutId, Shortcuts};

pub use keychord_core::{
    parse_combos, ChordStep, ChordTracker, ComboId, ComboSpec, EventKind, KeyEvent, KeyToken,
    MatchEngine, Modifier, ModifierSet, ParseError, PossibleKeys, TrackerStep,
    DEFAULT_CHORD_TIMEOUT,
};
