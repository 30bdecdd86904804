// Keychord Match Engine
// Owns the registered chords and routes each input event through their trackers

use std::fmt;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::event::KeyEvent;
use crate::parser::{parse_combos, ParseError};
use crate::possible::PossibleKeys;
use crate::token::ComboSpec;
use crate::tracker::{ChordTracker, TrackerStep, DEFAULT_CHORD_TIMEOUT};

/// Identifier for one registration (a combo spec and all its alternatives).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComboId(u64);

impl fmt::Display for ComboId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "combo#{}", self.0)
    }
}

/// One shared tracker plus the registrations listening to it.
///
/// Identical chords registered by different callers share a single tracker,
/// so they advance, reset and complete together and never hold duplicate
/// timeout state.
#[derive(Debug)]
struct TrackerSlot {
    tracker: ChordTracker,
    subscribers: SmallVec<[ComboId; 2]>,
}

/// The sequence-matching engine.
///
/// Single-threaded and single-writer: one event is processed to completion
/// (guard, possible-key derivation, every tracker transition) before the next
/// is accepted, which is what makes lock-free mutation safe here.
pub struct MatchEngine {
    /// Trackers keyed by the chord's canonical string, in registration order.
    trackers: IndexMap<String, TrackerSlot>,
    /// Canonical tracker keys per registration, for unregistration.
    registrations: IndexMap<ComboId, Vec<String>>,
    timeout: Duration,
    next_id: u64,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchEngine {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_CHORD_TIMEOUT)
    }

    /// An engine whose chords use `timeout` as the inactivity window.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            trackers: IndexMap::new(),
            registrations: IndexMap::new(),
            timeout,
            next_id: 0,
        }
    }

    /// Parse and register a combo spec. Space-separated alternatives all
    /// complete the same registration. Fails fast on a malformed spec with
    /// nothing registered.
    pub fn register(&mut self, spec: &str) -> Result<ComboId, ParseError> {
        let combos = parse_combos(spec)?;
        Ok(self.register_specs(combos))
    }

    /// Register pre-built combo specs under one identifier.
    pub fn register_specs(&mut self, combos: Vec<ComboSpec>) -> ComboId {
        let id = ComboId(self.next_id);
        self.next_id += 1;

        let timeout = self.timeout;
        let mut keys = Vec::with_capacity(combos.len());
        for combo in combos {
            let canonical = combo.canonical().to_string();
            let slot = self
                .trackers
                .entry(canonical.clone())
                .or_insert_with(|| TrackerSlot {
                    tracker: ChordTracker::with_timeout(&combo, timeout),
                    subscribers: SmallVec::new(),
                });
            if !slot.subscribers.contains(&id) {
                slot.subscribers.push(id);
            }
            if !keys.contains(&canonical) {
                keys.push(canonical);
            }
        }
        log::debug!("registered {} for chords {:?}", id, keys);
        self.registrations.insert(id, keys);
        id
    }

    /// Detach a registration and drop any tracker left without subscribers,
    /// discarding its pending timeout state with it. Idempotent.
    pub fn unregister(&mut self, id: ComboId) {
        let Some(keys) = self.registrations.shift_remove(&id) else {
            return;
        };
        for key in keys {
            if let Some(slot) = self.trackers.get_mut(&key) {
                slot.subscribers.retain(|s| *s != id);
                if slot.subscribers.is_empty() {
                    self.trackers.shift_remove(&key);
                }
            }
        }
        log::debug!("unregistered {}", id);
    }

    pub fn is_registered(&self, id: ComboId) -> bool {
        self.registrations.contains_key(&id)
    }

    /// Number of live (deduplicated) chord trackers.
    pub fn tracker_count(&self) -> usize {
        self.trackers.len()
    }

    /// Feed one input event; returns the registrations whose chords completed
    /// on it, in registration order.
    pub fn evaluate(&mut self, event: &KeyEvent) -> Vec<ComboId> {
        self.evaluate_at(event, Instant::now())
    }

    /// [`MatchEngine::evaluate`] with an explicit observation time, for
    /// embedders with their own clock and for deterministic timeout tests.
    pub fn evaluate_at(&mut self, event: &KeyEvent, now: Instant) -> Vec<ComboId> {
        // Events typed into text-accepting elements are ignored outright
        // unless a non-shift modifier is held or the listener was bound to
        // the element itself. Checked before any tracker mutates.
        if Self::rejects(event) {
            return Vec::new();
        }

        let possible = PossibleKeys::from_event(event);
        let mut completed = Vec::new();
        for (canonical, slot) in &mut self.trackers {
            if slot.tracker.kind() != event.kind {
                continue;
            }
            if slot.tracker.advance(&possible, now) == TrackerStep::Completed {
                log::trace!("chord '{}' completed", canonical);
                completed.extend(slot.subscribers.iter().copied());
            }
        }
        // Registration ids are monotonic, so ordering by id is registration
        // order. An id can appear twice when two of its alternatives complete
        // on the same event (e.g. "4 $" under shift+4).
        completed.sort_unstable();
        completed.dedup();
        completed
    }

    fn rejects(event: &KeyEvent) -> bool {
        event.target_is_text_field
            && !event.bound_to_target
            && !event.ctrl
            && !event.alt
            && !event.meta
    }
}
