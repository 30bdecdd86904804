// Keychord Chord Tracker
// Per-chord progress state machine with inactivity-deadline reset

use std::time::{Duration, Instant};

use smallvec::SmallVec;

use crate::event::EventKind;
use crate::possible::PossibleKeys;
use crate::token::ComboSpec;

/// Inactivity window between successive keys of one chord.
pub const DEFAULT_CHORD_TIMEOUT: Duration = Duration::from_millis(700);

/// Outcome of feeding one event's possible-key set to a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerStep {
    /// The final step matched; the tracker has already rewound to the start.
    Completed,
    /// An intermediate step matched (or the sequence restarted on its first
    /// key) and the inactivity deadline was rearmed.
    Advanced,
    /// The event did not progress the chord; progress was discarded.
    Reset,
}

/// Progress tracker for a single chord.
///
/// `position` counts the steps matched in order so far. Completion is an
/// instantaneous transition: reaching the last step fires [`TrackerStep::Completed`]
/// and rewinds atomically, so `position == len` never persists. The tracker is
/// reusable indefinitely.
///
/// The inactivity timeout is a lazily-checked deadline rather than a scheduled
/// callback: events are the only readers of `position`, so expiring the
/// deadline at the start of the next transition is indistinguishable from an
/// asynchronous reset serialized against event processing.
#[derive(Debug, Clone)]
pub struct ChordTracker {
    /// Rendered alternatives per step; a step matches when any of its
    /// renderings is in the event's possible-key set.
    steps: Vec<SmallVec<[String; 1]>>,
    kind: EventKind,
    timeout: Duration,
    position: usize,
    deadline: Option<Instant>,
}

impl ChordTracker {
    pub fn new(spec: &ComboSpec) -> Self {
        Self::with_timeout(spec, DEFAULT_CHORD_TIMEOUT)
    }

    pub fn with_timeout(spec: &ComboSpec, timeout: Duration) -> Self {
        Self {
            steps: spec.steps().iter().map(|s| s.renderings()).collect(),
            kind: spec.preferred_event_kind(),
            timeout,
            position: 0,
            deadline: None,
        }
    }

    /// The event kind this chord listens on.
    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Steps matched in order so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Feed one event's possible-key set, observed at `now`.
    pub fn advance(&mut self, possible: &PossibleKeys, now: Instant) -> TrackerStep {
        // A deadline that elapsed before this event is an ordinary reset that
        // simply ran late; apply it before looking at the event.
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.rewind();
        }

        if self.step_matches(self.position, possible) {
            if self.position == self.steps.len() - 1 {
                self.rewind();
                return TrackerStep::Completed;
            }
            self.position += 1;
            self.deadline = Some(now + self.timeout);
            return TrackerStep::Advanced;
        }

        self.rewind();

        // A non-progressing key may still be the start of a fresh attempt:
        // typing "a","a","b" against "ab" must match on the second "a".
        if self.steps.len() > 1 && self.step_matches(0, possible) {
            self.position = 1;
            self.deadline = Some(now + self.timeout);
            return TrackerStep::Advanced;
        }

        TrackerStep::Reset
    }

    fn rewind(&mut self) {
        self.position = 0;
        self.deadline = None;
    }

    fn step_matches(&self, index: usize, possible: &PossibleKeys) -> bool {
        self.steps[index]
            .iter()
            .any(|rendering| possible.contains(rendering))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::KeyEvent;
    use crate::parser::parse_combos;

    fn tracker(spec: &str) -> ChordTracker {
        let combos = parse_combos(spec).unwrap();
        assert_eq!(combos.len(), 1);
        ChordTracker::new(&combos[0])
    }

    fn feed(tracker: &mut ChordTracker, ch: char, now: Instant) -> TrackerStep {
        tracker.advance(&PossibleKeys::from_event(&KeyEvent::keypress(ch)), now)
    }

    #[test]
    fn test_in_order_completion() {
        let now = Instant::now();
        let mut t = tracker("abc");
        assert_eq!(feed(&mut t, 'a', now), TrackerStep::Advanced);
        assert_eq!(feed(&mut t, 'b', now), TrackerStep::Advanced);
        assert_eq!(feed(&mut t, 'c', now), TrackerStep::Completed);
        assert_eq!(t.position(), 0);
    }

    #[test]
    fn test_mismatch_resets_progress() {
        let now = Instant::now();
        let mut t = tracker("abc");
        feed(&mut t, 'a', now);
        feed(&mut t, 'b', now);
        assert_eq!(feed(&mut t, 'x', now), TrackerStep::Reset);
        assert_eq!(t.position(), 0);
        // The chord must then be typed in full again.
        assert_eq!(feed(&mut t, 'c', now), TrackerStep::Reset);
    }

    #[test]
    fn test_restart_on_repeated_first_key() {
        let now = Instant::now();
        let mut t = tracker("ab");
        assert_eq!(feed(&mut t, 'a', now), TrackerStep::Advanced);
        // Second "a" does not progress position 1 but starts a fresh attempt.
        assert_eq!(feed(&mut t, 'a', now), TrackerStep::Advanced);
        assert_eq!(t.position(), 1);
        assert_eq!(feed(&mut t, 'b', now), TrackerStep::Completed);
    }

    #[test]
    fn test_single_key_chord_completes_immediately() {
        let now = Instant::now();
        let mut t = tracker("g");
        assert_eq!(feed(&mut t, 'g', now), TrackerStep::Completed);
        assert_eq!(feed(&mut t, 'g', now), TrackerStep::Completed);
    }

    #[test]
    fn test_timeout_discards_progress() {
        let start = Instant::now();
        let mut t = tracker("ab");
        feed(&mut t, 'a', start);
        // Past the 700ms window: the pending progress must not survive.
        let late = start + Duration::from_millis(800);
        assert_eq!(feed(&mut t, 'b', late), TrackerStep::Reset);
    }

    #[test]
    fn test_within_window_completes() {
        let start = Instant::now();
        let mut t = tracker("ab");
        feed(&mut t, 'a', start);
        let soon = start + Duration::from_millis(300);
        assert_eq!(feed(&mut t, 'b', soon), TrackerStep::Completed);
    }

    #[test]
    fn test_deadline_rearmed_per_advance() {
        let start = Instant::now();
        let mut t = ChordTracker::with_timeout(
            &parse_combos("abc").unwrap().remove(0),
            Duration::from_millis(100),
        );
        feed(&mut t, 'a', start);
        feed(&mut t, 'b', start + Duration::from_millis(80));
        // 160ms after "a" but only 80ms after "b": still inside the window.
        assert_eq!(
            feed(&mut t, 'c', start + Duration::from_millis(160)),
            TrackerStep::Completed
        );
    }

    #[test]
    fn test_expired_deadline_still_allows_fresh_start() {
        let start = Instant::now();
        let mut t = tracker("ab");
        feed(&mut t, 'a', start);
        let late = start + Duration::from_secs(2);
        // "a" after expiry begins a new attempt rather than completing.
        assert_eq!(feed(&mut t, 'a', late), TrackerStep::Advanced);
        assert_eq!(feed(&mut t, 'b', late), TrackerStep::Completed);
    }

    #[test]
    fn test_completion_clears_deadline() {
        let start = Instant::now();
        let mut t = tracker("ab");
        feed(&mut t, 'a', start);
        feed(&mut t, 'b', start);
        // Long after the old window, a fresh attempt works from scratch.
        let much_later = start + Duration::from_secs(10);
        assert_eq!(feed(&mut t, 'a', much_later), TrackerStep::Advanced);
        assert_eq!(feed(&mut t, 'b', much_later), TrackerStep::Completed);
    }

    #[test]
    fn test_modifier_qualified_step() {
        let now = Instant::now();
        let mut t = tracker("ctrl+c");
        let plain = PossibleKeys::from_event(&KeyEvent::keypress('c'));
        assert_eq!(t.advance(&plain, now), TrackerStep::Reset);

        let with_alt = PossibleKeys::from_event(&KeyEvent::keypress('c').with_alt());
        assert_eq!(t.advance(&with_alt, now), TrackerStep::Reset);

        let with_ctrl = PossibleKeys::from_event(&KeyEvent::keypress('c').with_ctrl());
        assert_eq!(t.advance(&with_ctrl, now), TrackerStep::Completed);
    }

    #[test]
    fn test_any_alternative_satisfies_step() {
        use crate::token::{ChordStep, ComboSpec, KeyToken};

        let step = ChordStep::any([KeyToken::bare("j"), KeyToken::bare("down")]).unwrap();
        let spec = ComboSpec::from_steps(vec![step]).unwrap();
        let mut t = ChordTracker::new(&spec);
        assert_eq!(t.kind(), EventKind::Keydown);

        let now = Instant::now();
        let down = PossibleKeys::from_event(&KeyEvent::keydown(40));
        assert_eq!(t.advance(&down, now), TrackerStep::Completed);
    }
}
