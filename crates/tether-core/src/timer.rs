//! Deadline-based timers for the single-threaded engine.
//!
//! The engine never sleeps or spawns threads for its timers. It records
//! deadlines here; the host loop asks for the nearest one, waits until
//! then (or until an OS message arrives), and hands back the current
//! time so due timers can fire.

use std::time::{Duration, Instant};

use crate::WindowHandle;

/// Identifies one engine timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Periodic discovery of new target windows.
    Scan,
    /// Periodic validity sweep over attached targets.
    AliveCheck,
    /// Coalesces size-driven repositioning of one companion.
    Reposition(WindowHandle),
    /// Coalesces writes of the companion content size.
    PersistSize,
}

/// A set of armed one-shot deadlines, at most one per [`TimerKind`].
#[derive(Debug, Default)]
pub struct Timers {
    armed: Vec<(TimerKind, Instant)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms `kind` to fire `delay` after `now`.
    ///
    /// Re-arming an armed timer replaces its deadline, which is what
    /// makes the debounce timers debounce.
    pub fn arm(&mut self, kind: TimerKind, now: Instant, delay: Duration) {
        let deadline = now + delay;
        match self.armed.iter_mut().find(|(k, _)| *k == kind) {
            Some(entry) => entry.1 = deadline,
            None => self.armed.push((kind, deadline)),
        }
    }

    /// Disarms `kind`. Returns whether it was armed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.armed.len();
        self.armed.retain(|(k, _)| *k != kind);
        self.armed.len() != before
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.iter().any(|(k, _)| *k == kind)
    }

    /// Returns the deadline of `kind`, if armed.
    pub fn deadline(&self, kind: TimerKind) -> Option<Instant> {
        self.armed
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, deadline)| *deadline)
    }

    /// The earliest armed deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.armed.iter().map(|(_, deadline)| *deadline).min()
    }

    /// Disarms and returns every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerKind> {
        let mut due: Vec<(TimerKind, Instant)> = self
            .armed
            .iter()
            .filter(|(_, deadline)| *deadline <= now)
            .copied()
            .collect();
        self.armed.retain(|(_, deadline)| *deadline > now);
        due.sort_by_key(|(_, deadline)| *deadline);
        due.into_iter().map(|(kind, _)| kind).collect()
    }

    /// Disarms everything.
    pub fn clear(&mut self) {
        self.armed.clear();
    }

    pub fn len(&self) -> usize {
        self.armed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.armed.is_empty()
    }
}
