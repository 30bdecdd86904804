// Keychord Input Events
// The raw input event shape delivered by an embedding event source

/// Which listener an event came from.
///
/// Keypress events carry character codes; keydown events carry key codes and
/// are the only kind that can name special (multi-character) keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Keydown,
    Keypress,
}

/// One raw input event as delivered by the embedding input source.
///
/// The engine does not subscribe to anything itself; the surrounding layer
/// feeds events in one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: EventKind,
    /// Character code for keypress events, key code for keydown events.
    pub code: u16,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// The event targeted a text-accepting element (input, textarea,
    /// contenteditable). Such events are ignored unless a non-shift modifier
    /// is held or the listener was bound directly to that element.
    pub target_is_text_field: bool,
    /// The listener producing this event was bound directly to the target.
    pub bound_to_target: bool,
}

impl KeyEvent {
    pub fn new(kind: EventKind, code: u16) -> Self {
        Self {
            kind,
            code,
            ctrl: false,
            alt: false,
            shift: false,
            meta: false,
            target_is_text_field: false,
            bound_to_target: false,
        }
    }

    /// A keypress event for a typed character.
    pub fn keypress(ch: char) -> Self {
        Self::new(EventKind::Keypress, ch as u16)
    }

    /// A keydown event for a raw key code.
    pub fn keydown(code: u16) -> Self {
        Self::new(EventKind::Keydown, code)
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn in_text_field(mut self) -> Self {
        self.target_is_text_field = true;
        self
    }

    pub fn bound_to_target(mut self) -> Self {
        self.bound_to_target = true;
        self
    }
}
