// Keychord Shortcut Registry
// Fluent registration of chords with predicates and callback dispatch

use std::collections::HashMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use indexmap::IndexMap;
use keychord_core::{
    parse_combos, ComboId, ComboSpec, EventKind, KeyEvent, MatchEngine, ParseError,
};

use crate::instructions::describe_combos;

/// Identifier for one registered shortcut (its combos, predicates and
/// callbacks together).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShortcutId(u64);

impl fmt::Display for ShortcutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shortcut#{}", self.0)
    }
}

type Predicate = Box<dyn Fn() -> bool>;
type Callback = Box<dyn FnMut(&KeyEvent)>;

struct ShortcutEntry {
    combos: Vec<ComboSpec>,
    combo_ids: Vec<ComboId>,
    predicates: Vec<Predicate>,
    callbacks: Vec<Callback>,
}

impl ShortcutEntry {
    /// All predicates in registration order, short-circuiting on the first
    /// failure. Predicates run lazily at match time and are never cached.
    fn can_execute(&self) -> bool {
        self.predicates.iter().all(|p| p())
    }
}

/// Owns the match engine plus every registered shortcut's predicates and
/// callbacks, and dispatches completions to them.
#[derive(Default)]
pub struct Shortcuts {
    engine: MatchEngine,
    entries: IndexMap<ShortcutId, ShortcutEntry>,
    by_combo: HashMap<ComboId, ShortcutId>,
    next_id: u64,
}

impl Shortcuts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shortcut for `keys` and return a builder for attaching
    /// alternatives, predicates and callbacks.
    ///
    /// # Examples
    /// ```
    /// use keychord::{KeyEvent, Shortcuts};
    ///
    /// let mut shortcuts = Shortcuts::new();
    /// let id = shortcuts
    ///     .when_typed("gh")
    ///     .unwrap()
    ///     .or("gd")
    ///     .unwrap()
    ///     .execute(|_| println!("go home"))
    ///     .id();
    ///
    /// shortcuts.handle_event(&KeyEvent::keypress('g'));
    /// let fired = shortcuts.handle_event(&KeyEvent::keypress('h'));
    /// assert_eq!(fired, vec![id]);
    /// ```
    pub fn when_typed(&mut self, keys: &str) -> Result<ShortcutBuilder<'_>, ParseError> {
        let id = ShortcutId(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            id,
            ShortcutEntry {
                combos: Vec::new(),
                combo_ids: Vec::new(),
                predicates: Vec::new(),
                callbacks: Vec::new(),
            },
        );
        match self.bind_alternatives(id, keys) {
            Ok(()) => Ok(ShortcutBuilder { shortcuts: self, id }),
            Err(err) => {
                self.entries.shift_remove(&id);
                Err(err)
            }
        }
    }

    /// Bind additional key alternatives to an existing shortcut. A malformed
    /// spec fails fast without binding anything.
    pub fn bind_alternatives(&mut self, id: ShortcutId, keys: &str) -> Result<(), ParseError> {
        let combos = parse_combos(keys)?;
        let Some(entry) = self.entries.get_mut(&id) else {
            return Ok(());
        };
        let combo_id = self.engine.register_specs(combos.clone());
        entry.combos.extend(combos);
        entry.combo_ids.push(combo_id);
        self.by_combo.insert(combo_id, id);
        Ok(())
    }

    /// Feed one input event: run the engine, then for each completed shortcut
    /// check its predicates and invoke its callbacks. Returns the shortcuts
    /// whose callbacks ran, in registration order.
    ///
    /// Each shortcut's dispatch is isolated: a panicking predicate or
    /// callback is logged and does not stop later shortcuts from firing.
    pub fn handle_event(&mut self, event: &KeyEvent) -> Vec<ShortcutId> {
        let completed = self.engine.evaluate(event);
        self.dispatch(completed, event)
    }

    /// [`Shortcuts::handle_event`] with an explicit observation time.
    pub fn handle_event_at(&mut self, event: &KeyEvent, now: std::time::Instant) -> Vec<ShortcutId> {
        let completed = self.engine.evaluate_at(event, now);
        self.dispatch(completed, event)
    }

    fn dispatch(&mut self, completed: Vec<ComboId>, event: &KeyEvent) -> Vec<ShortcutId> {
        let mut fired = Vec::new();
        let mut seen: Vec<ShortcutId> = Vec::new();
        for combo_id in completed {
            let Some(&id) = self.by_combo.get(&combo_id) else {
                continue;
            };
            // A shortcut fires at most once per event, even when several of
            // its alternatives complete together.
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            let Some(entry) = self.entries.get_mut(&id) else {
                continue;
            };
            let outcome = catch_unwind(AssertUnwindSafe(|| {
                if !entry.can_execute() {
                    return false;
                }
                for callback in entry.callbacks.iter_mut() {
                    callback(event);
                }
                true
            }));
            match outcome {
                Ok(true) => fired.push(id),
                Ok(false) => {}
                Err(_) => log::warn!("{} panicked during dispatch", id),
            }
        }
        fired
    }

    /// Unbind a shortcut: its chords stop matching, shared trackers it no
    /// longer needs are dropped along with their timeout state. Idempotent.
    pub fn unbind(&mut self, id: ShortcutId) {
        if let Some(entry) = self.entries.shift_remove(&id) {
            for combo_id in entry.combo_ids {
                self.engine.unregister(combo_id);
                self.by_combo.remove(&combo_id);
            }
        }
    }

    pub fn is_bound(&self, id: ShortcutId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The listener kinds an embedder must subscribe to for this shortcut,
    /// in first-use order.
    pub fn event_kinds(&self, id: ShortcutId) -> Vec<EventKind> {
        let mut kinds = Vec::new();
        if let Some(entry) = self.entries.get(&id) {
            for combo in &entry.combos {
                let kind = combo.preferred_event_kind();
                if !kinds.contains(&kind) {
                    kinds.push(kind);
                }
            }
        }
        kinds
    }

    /// Human-readable instruction text for the shortcut, e.g.
    /// ` (Type "g" then "h" OR "gd")`, with Mac symbol substitution on macOS.
    pub fn describe(&self, id: ShortcutId) -> Option<String> {
        self.describe_with(id, cfg!(target_os = "macos"))
    }

    /// [`Shortcuts::describe`] with explicit control over Mac-style modifier
    /// symbols.
    pub fn describe_with(&self, id: ShortcutId, mac: bool) -> Option<String> {
        self.entries
            .get(&id)
            .map(|entry| describe_combos(&entry.combos, mac))
    }
}

/// Chainable configuration handle returned by [`Shortcuts::when_typed`].
///
/// The shortcut is already live; the builder only augments it in place.
pub struct ShortcutBuilder<'a> {
    shortcuts: &'a mut Shortcuts,
    id: ShortcutId,
}

impl ShortcutBuilder<'_> {
    pub fn id(&self) -> ShortcutId {
        self.id
    }

    /// Bind additional key alternatives to this shortcut.
    pub fn or(self, keys: &str) -> Result<Self, ParseError> {
        self.shortcuts.bind_alternatives(self.id, keys)?;
        Ok(self)
    }

    /// Gate execution on `predicate` returning true at match time.
    pub fn only_if(self, predicate: impl Fn() -> bool + 'static) -> Self {
        if let Some(entry) = self.shortcuts.entries.get_mut(&self.id) {
            entry.predicates.push(Box::new(predicate));
        }
        self
    }

    /// Gate execution on `predicate` returning false at match time.
    pub fn unless(self, predicate: impl Fn() -> bool + 'static) -> Self {
        self.only_if(move || !predicate())
    }

    /// Append a callback invoked when the shortcut fires. Callbacks run in
    /// the order they were added.
    pub fn execute(self, callback: impl FnMut(&KeyEvent) + 'static) -> Self {
        if let Some(entry) = self.shortcuts.entries.get_mut(&self.id) {
            entry.callbacks.push(Box::new(callback));
        }
        self
    }
}
