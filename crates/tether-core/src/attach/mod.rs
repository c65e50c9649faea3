//! The attachment manager: the stateful core of the engine.
//!
//! Owns every attached instance and its companion window, reacts to
//! target window events, and drives its own discovery and liveness
//! timers. All methods run on one thread; the host feeds in events,
//! commands and the current time.

mod commands;
mod event_handler;
mod instance;
mod lifecycle;
mod settings;
mod timers;

use std::time::{Duration, Instant};

use crate::config::Layout;
use crate::desktop::{Desktop, Observer, Subscription};
use crate::state::{AttachState, TargetInfo};
use crate::timer::Timers;
use crate::{Offset, WindowHandle};

use instance::AttachInstance;

pub use settings::EngineSettings;

/// Delay before a size-driven reposition is applied.
pub const REPOSITION_DEBOUNCE: Duration = Duration::from_millis(50);

/// Delay before a changed companion size is persisted.
pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Scan interval multiplier while at least one instance is attached.
pub const ATTACHED_SCAN_FACTOR: u32 = 3;

/// Attaches companion windows to every window of a target process.
pub struct AttachManager<D: Desktop, O: Observer> {
    desktop: D,
    observer: O,
    settings: EngineSettings,
    /// Attached instances in attach order, at most one per target handle.
    instances: Vec<AttachInstance>,
    /// Shared foreground hook; present exactly while instances exist.
    foreground_watch: Option<Subscription>,
    timers: Timers,
}

impl<D: Desktop, O: Observer> AttachManager<D, O> {
    /// Creates a manager. If a target process is configured, the first
    /// discovery scan is due immediately.
    pub fn new(desktop: D, observer: O, settings: EngineSettings, now: Instant) -> Self {
        let mut manager = Self {
            desktop,
            observer,
            settings,
            instances: Vec::new(),
            foreground_watch: None,
            timers: Timers::new(),
        };
        if manager.settings.process_name.is_some() {
            manager
                .timers
                .arm(crate::timer::TimerKind::Scan, now, Duration::ZERO);
        }
        manager
    }

    /// Returns a snapshot of the attach state.
    ///
    /// The reported target is the instance whose target window is in the
    /// foreground, or the earliest attached one.
    pub fn state(&self) -> AttachState {
        let foreground = self.desktop.foreground();
        let representative = foreground
            .and_then(|fg| self.instances.iter().find(|i| i.target == fg))
            .or_else(|| self.instances.first());

        AttachState {
            attached: !self.instances.is_empty(),
            target: representative.map(|i| TargetInfo {
                process_id: i.process_id,
                title: i.title.clone(),
                path: i.path.clone(),
            }),
            anchor: self.settings.anchor,
            target_process_name: self.settings.process_name.clone(),
            attached_count: self.instances.len(),
        }
    }

    /// Returns the current user offset.
    pub fn offset(&self) -> Offset {
        self.settings.offset
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Number of attached instances.
    pub fn attached_count(&self) -> usize {
        self.instances.len()
    }

    /// Returns whether `target` is currently attached.
    pub fn is_attached(&self, target: WindowHandle) -> bool {
        self.index_of(target).is_some()
    }

    /// Companion handles in attach order.
    pub fn companions(&self) -> Vec<WindowHandle> {
        self.instances.iter().map(|i| i.companion).collect()
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    pub fn desktop_mut(&mut self) -> &mut D {
        &mut self.desktop
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The geometry to remember across restarts.
    pub fn layout(&self) -> Layout {
        let s = &self.settings;
        Layout {
            process_name: s.process_name.clone(),
            path: s.path.clone(),
            anchor: s.anchor,
            offset: s.offset,
            width: s.mini_size.width,
            height: s.mini_size.height,
            responsiveness: s.responsiveness,
        }
    }

    fn index_of(&self, target: WindowHandle) -> Option<usize> {
        self.instances.iter().position(|i| i.target == target)
    }

    fn index_of_companion(&self, companion: WindowHandle) -> Option<usize> {
        self.instances.iter().position(|i| i.companion == companion)
    }

    /// Pushes the current state to the observer and every companion.
    fn notify(&mut self) {
        let state = self.state();
        for inst in &self.instances {
            self.desktop.deliver_state(inst.companion, &state);
        }
        self.observer.state_changed(&state);
    }

    fn persist(&mut self) {
        let layout = self.layout();
        self.observer.persist(&layout);
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
