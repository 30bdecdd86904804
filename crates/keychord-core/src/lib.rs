// Keychord Core Library
// Chorded key-sequence matching: combo parsing, possible-key derivation,
// per-chord progress tracking and the match engine

pub mod engine;
pub mod event;
pub mod key;
pub mod modifier;
pub mod parser;
pub mod possible;
pub mod token;
pub mod tracker;

pub use engine::{ComboId, MatchEngine};
pub use event::{EventKind, KeyEvent};
pub use key::{printable_char, shifted_symbol, special_key_name};
pub use modifier::{Modifier, ModifierSet};
pub use parser::{parse_combos, ParseError};
pub use possible::PossibleKeys;
pub use token::{ChordStep, ComboSpec, KeyToken};
pub use tracker::{ChordTracker, TrackerStep, DEFAULT_CHORD_TIMEOUT};
