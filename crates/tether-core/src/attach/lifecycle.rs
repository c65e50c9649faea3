//! Discovery, attach and teardown.

use std::time::Instant;

use crate::anchor::calc_position;
use crate::desktop::{Desktop, Observer, TargetWindow};
use crate::locator;
use crate::timer::TimerKind;
use crate::{WindowHandle, log_info, log_warn};

use super::instance::AttachInstance;
use super::{ATTACHED_SCAN_FACTOR, AttachManager};

impl<D: Desktop, O: Observer> AttachManager<D, O> {
    /// Looks for untracked target windows and attaches to each of them.
    ///
    /// The foreground candidate is attached first. Re-arms the scan timer.
    pub(super) fn scan(&mut self, now: Instant) {
        let Some(name) = self.settings.process_name.clone() else {
            self.timers.cancel(TimerKind::Scan);
            return;
        };

        let found = self.desktop.find_windows(&name);
        let candidates = locator::rank(found, self.desktop.foreground());
        let mut attached = 0;
        for candidate in candidates {
            if self.attach(candidate, now) {
                attached += 1;
            }
        }

        self.arm_scan(now);
        if attached > 0 {
            self.notify();
        }
    }

    /// Attaches a companion to `target`.
    ///
    /// Returns `false` without side effects if the target is already
    /// attached or can't be measured, and after logging if the companion
    /// can't be created (a later scan retries).
    pub(super) fn attach(&mut self, target: TargetWindow, now: Instant) -> bool {
        if self.index_of(target.handle).is_some() {
            return false;
        }
        let Some(bounds) = self.desktop.bounds(target.handle).filter(|b| !b.is_empty()) else {
            return false;
        };

        let size = self.settings.clamp_size(self.settings.mini_size);
        let rect = calc_position(
            &bounds,
            size,
            self.settings.anchor,
            self.settings.margins,
            self.settings.offset,
        );

        let companion = match self.desktop.create_companion(rect, self.settings.anchor) {
            Ok(companion) => companion,
            Err(e) => {
                log_warn!("attach {}: companion creation failed: {e}", target.handle);
                return false;
            }
        };

        let watch = match self.desktop.watch(target.handle, target.process_id) {
            Ok(watch) => Some(watch),
            Err(e) => {
                log_warn!(
                    "attach {}: event hook failed, relying on alive-check: {e}",
                    target.handle
                );
                None
            }
        };

        self.desktop.show_companion(companion);
        self.desktop.set_topmost(companion);

        let first = self.instances.is_empty();
        let instance = AttachInstance::new(target, companion, watch, size);
        log_info!(
            "+attach {} pid {} \"{}\" companion {} at ({},{} {}x{}) watched={}",
            instance.target,
            instance.process_id,
            instance.title,
            companion,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            instance.is_watched()
        );
        self.instances.push(instance);

        if first {
            self.arm_shared(now);
        }
        true
    }

    /// Removes the instance for `target`, releasing everything it owns.
    ///
    /// Returns `false` if `target` isn't attached, so racing teardown
    /// paths (destroy event, alive-check, detach) act exactly once.
    /// Callers notify.
    pub(super) fn teardown(&mut self, target: WindowHandle, now: Instant, reason: &str) -> bool {
        let Some(idx) = self.index_of(target) else {
            return false;
        };
        let mut inst = self.instances.remove(idx);

        inst.unwatch();
        self.timers.cancel(TimerKind::Reposition(inst.companion));
        self.settings.mini_size = self.settings.clamp_size(inst.effective_size());
        self.persist();
        self.desktop.destroy_companion(inst.companion);

        log_info!(
            "-detach {} ({reason}), {} remaining",
            inst.target,
            self.instances.len()
        );

        if self.instances.is_empty() {
            self.disarm_shared();
            self.arm_scan(now);
        }
        true
    }

    /// Tears down every instance.
    pub(super) fn teardown_all(&mut self, now: Instant, reason: &str) -> bool {
        let targets: Vec<WindowHandle> = self.instances.iter().map(|i| i.target).collect();
        let mut any = false;
        for target in targets {
            any |= self.teardown(target, now, reason);
        }
        any
    }

    /// Drops instances whose target is gone or now belongs to another
    /// process (the OS reused the handle).
    pub(super) fn alive_check(&mut self, now: Instant) {
        let dead: Vec<WindowHandle> = self
            .instances
            .iter()
            .filter(|i| {
                !self.desktop.is_window(i.target)
                    || self.desktop.process_id(i.target) != Some(i.process_id)
            })
            .map(|i| i.target)
            .collect();

        let mut changed = false;
        for target in dead {
            changed |= self.teardown(target, now, "alive-check");
        }

        if !self.instances.is_empty() {
            self.timers.arm(
                TimerKind::AliveCheck,
                now,
                self.settings.responsiveness.alive_interval(),
            );
        }
        if changed {
            self.notify();
        }
    }

    /// (Re)arms the scan timer for the current cadence, or disarms it
    /// when no target process is configured.
    pub(super) fn arm_scan(&mut self, now: Instant) {
        if self.settings.process_name.is_none() {
            self.timers.cancel(TimerKind::Scan);
            return;
        }
        let mut interval = self.settings.responsiveness.scan_interval();
        if !self.instances.is_empty() {
            interval *= ATTACHED_SCAN_FACTOR;
        }
        self.timers.arm(TimerKind::Scan, now, interval);
    }

    /// Installs what is shared by all instances: the foreground hook and
    /// the alive-check timer.
    fn arm_shared(&mut self, now: Instant) {
        if self.foreground_watch.is_none() {
            match self.desktop.watch_foreground() {
                Ok(watch) => self.foreground_watch = Some(watch),
                Err(e) => log_warn!("foreground hook failed: {e}"),
            }
        }
        self.timers.arm(
            TimerKind::AliveCheck,
            now,
            self.settings.responsiveness.alive_interval(),
        );
    }

    fn disarm_shared(&mut self) {
        if let Some(mut watch) = self.foreground_watch.take() {
            watch.cancel();
        }
        self.timers.cancel(TimerKind::AliveCheck);
    }

    /// Cancels all timers and hooks, then destroys every companion.
    ///
    /// A size change still waiting on its debounce is written out first.
    /// Safe to call with nothing attached, and more than once.
    pub fn shutdown(&mut self) {
        let size_pending = self.timers.is_armed(TimerKind::PersistSize);
        self.timers.clear();
        for inst in &mut self.instances {
            inst.unwatch();
        }
        if let Some(mut watch) = self.foreground_watch.take() {
            watch.cancel();
        }

        if size_pending || !self.instances.is_empty() {
            self.persist();
        }
        for inst in self.instances.drain(..) {
            self.desktop.destroy_companion(inst.companion);
        }
        log_info!("engine shut down");
    }
}
