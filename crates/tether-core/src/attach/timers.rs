use std::time::Instant;

use crate::desktop::{Desktop, Observer};
use crate::timer::TimerKind;

use super::AttachManager;

impl<D: Desktop, O: Observer> AttachManager<D, O> {
    /// The earliest instant at which [`on_timers`](Self::on_timers) has
    /// work to do. `None` means the engine is idle until the next event
    /// or command.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Fires every timer due at `now`.
    pub fn on_timers(&mut self, now: Instant) {
        for kind in self.timers.take_due(now) {
            match kind {
                TimerKind::Scan => self.scan(now),
                TimerKind::AliveCheck => self.alive_check(now),
                TimerKind::Reposition(companion) => {
                    if let Some(idx) = self.index_of_companion(companion) {
                        self.apply_position(idx);
                    }
                }
                TimerKind::PersistSize => self.persist(),
            }
        }
    }

    /// Returns whether `kind` is armed.
    pub fn is_timer_armed(&self, kind: TimerKind) -> bool {
        self.timers.is_armed(kind)
    }
}
