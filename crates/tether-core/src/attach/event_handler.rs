use std::time::Instant;

use crate::anchor::calc_position;
use crate::desktop::{Desktop, Observer};
use crate::event::WindowEvent;
use crate::timer::TimerKind;
use crate::{Size, WindowHandle, log_debug, log_info};

use super::{AttachManager, PERSIST_DEBOUNCE};

impl<D: Desktop, O: Observer> AttachManager<D, O> {
    /// Applies one queued window event.
    ///
    /// Events for handles that are no longer tracked are ignored, which
    /// makes late deliveries after a teardown harmless.
    pub fn handle_event(&mut self, event: WindowEvent, now: Instant) {
        match event {
            WindowEvent::LocationChanged { hwnd } | WindowEvent::Shown { hwnd } => {
                self.on_location_change(hwnd);
            }
            WindowEvent::Hidden { hwnd } => {
                if let Some(idx) = self.index_of(hwnd) {
                    self.on_minimize(idx);
                }
            }
            WindowEvent::Destroyed { hwnd } => {
                if self.teardown(hwnd, now, "destroyed") {
                    self.notify();
                }
            }
            WindowEvent::Foreground { hwnd } => self.on_foreground(hwnd),
            WindowEvent::ResizeStarted { companion } => {
                if let Some(idx) = self.index_of_companion(companion) {
                    self.instances[idx].resize.begin();
                }
            }
            WindowEvent::ResizeEnded {
                companion,
                width,
                height,
            } => self.on_resize_end(companion, Size::new(width, height), now),
        }
    }

    /// Applies a batch of events in order.
    ///
    /// A companion drag runs inside the OS modal size loop, so its start
    /// and end reach the host in the same batch along with whatever the
    /// host held back meanwhile. `during_resize` runs right after each
    /// resize start so that held-back work lands inside the drag.
    pub fn handle_events<I, F>(&mut self, events: I, now: Instant, mut during_resize: F)
    where
        I: IntoIterator<Item = WindowEvent>,
        F: FnMut(&mut Self),
    {
        for event in events {
            let started = matches!(event, WindowEvent::ResizeStarted { .. });
            self.handle_event(event, now);
            if started {
                during_resize(self);
            }
        }
    }

    fn on_location_change(&mut self, hwnd: WindowHandle) {
        let Some(idx) = self.index_of(hwnd) else {
            return;
        };

        if self.desktop.is_minimized(hwnd) {
            self.on_minimize(idx);
            return;
        }
        match self.desktop.bounds(hwnd) {
            Some(bounds) if !bounds.is_empty() => {
                self.on_restore(idx);
                self.apply_position(idx);
            }
            _ => self.on_minimize(idx),
        }
    }

    fn on_minimize(&mut self, idx: usize) {
        let inst = &mut self.instances[idx];
        if inst.hidden {
            return;
        }
        inst.restore_size = Some(inst.content_size);
        inst.hidden = true;
        let companion = inst.companion;
        self.desktop.hide_companion(companion);
        log_debug!("companion {companion} hidden (target minimized)");
    }

    /// Shows a companion hidden by a minimize. No-op when not hidden.
    fn on_restore(&mut self, idx: usize) {
        let inst = &mut self.instances[idx];
        if !inst.hidden {
            return;
        }
        inst.hidden = false;
        if let Some(size) = inst.restore_size.take() {
            inst.content_size = size;
        }
        let companion = inst.companion;
        self.apply_position(idx);
        self.desktop.show_companion(companion);
        self.desktop.set_topmost(companion);
        log_debug!("companion {companion} restored");
    }

    fn on_foreground(&mut self, foreground: WindowHandle) {
        if let Some(idx) = self.index_of_companion(foreground) {
            let companion = self.instances[idx].companion;
            self.desktop.set_topmost(companion);
            return;
        }

        let foreground_pid = self.desktop.process_id(foreground);
        for inst in &self.instances {
            if foreground_pid == Some(inst.process_id) {
                self.desktop.set_topmost(inst.companion);
            } else if self.desktop.is_window(inst.target) {
                self.desktop.place_above(inst.companion, inst.target);
            }
        }
    }

    fn on_resize_end(&mut self, companion: WindowHandle, size: Size, now: Instant) {
        let Some(idx) = self.index_of_companion(companion) else {
            return;
        };

        let pending = self.instances[idx].resize.finish();
        let requested = Size::new(pending.unwrap_or(size.width), size.height);
        let size = self.settings.clamp_size(requested);

        self.instances[idx].content_size = size;
        self.settings.mini_size = size;
        self.apply_position(idx);
        self.timers.arm(TimerKind::PersistSize, now, PERSIST_DEBOUNCE);
        log_info!(
            "companion {companion} resized to {}x{}",
            size.width,
            size.height
        );
    }

    /// Moves the companion of instance `idx` to its anchored position.
    ///
    /// Does nothing while the instance is hidden or its target can't be
    /// measured.
    pub(super) fn apply_position(&mut self, idx: usize) {
        let inst = &self.instances[idx];
        if inst.hidden {
            return;
        }
        let Some(bounds) = self.desktop.bounds(inst.target).filter(|b| !b.is_empty()) else {
            return;
        };
        let rect = calc_position(
            &bounds,
            inst.content_size,
            self.settings.anchor,
            self.settings.margins,
            self.settings.offset,
        );
        let companion = inst.companion;
        self.desktop.move_companion(companion, rect);
    }

    /// Repositions every visible companion.
    pub(super) fn apply_all_positions(&mut self) {
        for idx in 0..self.instances.len() {
            self.apply_position(idx);
        }
    }
}
