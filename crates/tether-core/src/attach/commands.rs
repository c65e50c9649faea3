//! Operations requested by the user or the companion's own UI.

use std::time::Instant;

use crate::config::Responsiveness;
use crate::desktop::{Desktop, Observer};
use crate::timer::TimerKind;
use crate::{Anchor, Offset, Size, log_info};

use super::settings::sanitize_offset;
use super::{AttachManager, PERSIST_DEBOUNCE, REPOSITION_DEBOUNCE};

impl<D: Desktop, O: Observer> AttachManager<D, O> {
    /// Retargets the engine at `process_name` and scans right away.
    ///
    /// Every current attachment is released first. `anchor` replaces the
    /// current anchor when given. A blank name behaves like
    /// [`clear_target`](Self::clear_target).
    pub fn set_target(&mut self, process_name: &str, anchor: Option<Anchor>, now: Instant) {
        let name = process_name.trim();
        if name.is_empty() {
            self.clear_target(now);
            return;
        }

        self.teardown_all(now, "retarget");
        self.settings.process_name = Some(name.to_string());
        self.settings.path = None;
        if let Some(anchor) = anchor {
            self.settings.anchor = anchor;
        }
        log_info!("target set to {name} ({})", self.settings.anchor.as_str());

        self.persist();
        self.scan(now);
        self.notify();
    }

    /// Stops tracking: releases every attachment and stops scanning.
    pub fn clear_target(&mut self, now: Instant) {
        self.settings.process_name = None;
        self.settings.path = None;
        self.teardown_all(now, "target cleared");
        self.timers.cancel(TimerKind::Scan);
        log_info!("target cleared");

        self.persist();
        self.notify();
    }

    /// Releases every attachment. Scanning resumes on the normal cadence,
    /// so the target is picked up again on the next scan tick.
    pub fn detach(&mut self, now: Instant) {
        self.teardown_all(now, "user detach");
        self.persist();
        self.arm_scan(now);
        self.notify();
    }

    /// Scans immediately if nothing is attached.
    ///
    /// Returns whether a scan ran.
    pub fn reattach(&mut self, now: Instant) -> bool {
        if !self.instances.is_empty() || self.settings.process_name.is_none() {
            return false;
        }
        self.scan(now);
        true
    }

    pub fn set_anchor(&mut self, anchor: Anchor) {
        self.settings.anchor = anchor;
        for inst in &self.instances {
            self.desktop.set_companion_anchor(inst.companion, anchor);
        }
        self.apply_all_positions();
        log_info!("anchor set to {}", anchor.as_str());

        self.persist();
        self.notify();
    }

    /// Sets the user offset. Non-finite components are treated as zero.
    pub fn set_offset(&mut self, dx: f64, dy: f64) {
        self.settings.offset = sanitize_offset(Offset::new(dx, dy));
        self.apply_all_positions();

        self.persist();
        self.notify();
    }

    /// Restores the configured default anchor and size and a zero offset.
    pub fn reset_layout(&mut self) {
        let anchor = self.settings.default_anchor;
        let size = self.settings.default_size;
        self.settings.anchor = anchor;
        self.settings.offset = Offset::default();
        self.settings.mini_size = size;

        for inst in &mut self.instances {
            if inst.hidden {
                inst.restore_size = Some(size);
            } else {
                inst.content_size = size;
            }
            self.desktop.set_companion_anchor(inst.companion, anchor);
        }
        self.apply_all_positions();
        log_info!("layout reset");

        self.persist();
        self.notify();
    }

    /// Switches the scan and alive-check cadence and re-arms both timers.
    pub fn set_responsiveness(&mut self, preset: Responsiveness, now: Instant) {
        self.settings.responsiveness = preset;
        self.arm_scan(now);
        if !self.instances.is_empty() {
            self.timers.arm(TimerKind::AliveCheck, now, preset.alive_interval());
        }
        log_info!("responsiveness set to {}", preset.as_str());

        self.persist();
    }

    /// Requests a new companion content size.
    ///
    /// Companions in the middle of a user resize queue the width until
    /// the drag ends; the others reposition after a short debounce. The
    /// new size is persisted after its own debounce.
    pub fn set_mini_size(&mut self, width: i32, height: i32, now: Instant) {
        let size = self.settings.clamp_size(Size::new(width, height));
        self.settings.mini_size = size;

        for inst in &mut self.instances {
            if inst.resize.queue_width(size.width) {
                continue;
            }
            if inst.hidden {
                inst.restore_size = Some(size);
            } else {
                inst.content_size = size;
            }
            self.timers.arm(
                TimerKind::Reposition(inst.companion),
                now,
                REPOSITION_DEBOUNCE,
            );
        }
        self.timers.arm(TimerKind::PersistSize, now, PERSIST_DEBOUNCE);
    }
}
