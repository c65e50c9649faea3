//! The seam between the attachment manager and the OS.
//!
//! The manager is written against [`Desktop`] and [`Observer`] so the
//! same state machine drives real Win32 windows in the daemon and an
//! in-memory desktop in tests.

use std::fmt;

use crate::config::Layout;
use crate::{Anchor, AttachState, Rect, WindowHandle, WindowResult};

/// A top-level window that qualifies as an attachment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWindow {
    pub handle: WindowHandle,
    pub process_id: u32,
    pub title: String,
    /// Full path of the owning executable.
    pub path: String,
}

/// An active registration that can be cancelled exactly once.
///
/// Returned by [`Desktop::watch`] and [`Desktop::watch_foreground`].
/// Holds only the teardown for the native registration. Cancelling
/// twice is a no-op, and dropping an uncancelled subscription cancels it.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Runs the teardown if it hasn't run yet.
    pub fn cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    pub fn is_active(&self) -> bool {
        self.cancel.is_some()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Window-manager operations the attachment manager needs.
///
/// Every method that takes a handle must tolerate the handle having
/// been destroyed already: queries return `None`/`false`, commands do
/// nothing.
pub trait Desktop {
    /// Lists qualifying windows owned by `process_name`.
    fn find_windows(&self, process_name: &str) -> Vec<TargetWindow>;

    /// Returns whether `hwnd` still names a live window.
    fn is_window(&self, hwnd: WindowHandle) -> bool;

    /// Returns whether `hwnd` is minimized.
    fn is_minimized(&self, hwnd: WindowHandle) -> bool;

    /// Visible screen bounds of `hwnd`.
    fn bounds(&self, hwnd: WindowHandle) -> Option<Rect>;

    /// Id of the process owning `hwnd`.
    fn process_id(&self, hwnd: WindowHandle) -> Option<u32>;

    /// The current OS foreground window.
    fn foreground(&self) -> Option<WindowHandle>;

    /// Creates a hidden companion window at `rect`.
    fn create_companion(&mut self, rect: Rect, anchor: Anchor) -> WindowResult<WindowHandle>;

    /// Moves and resizes a companion without changing its Z-order.
    fn move_companion(&mut self, companion: WindowHandle, rect: Rect);

    /// Shows a companion without activating it.
    fn show_companion(&mut self, companion: WindowHandle);

    /// Hides a companion without destroying it.
    fn hide_companion(&mut self, companion: WindowHandle);

    /// Places a companion in the topmost band.
    fn set_topmost(&mut self, companion: WindowHandle);

    /// Drops a companion out of the topmost band, directly above `target`.
    fn place_above(&mut self, companion: WindowHandle, target: WindowHandle);

    /// Tells a companion which corner it is pinned to (drives its
    /// resize hit-testing).
    fn set_companion_anchor(&mut self, companion: WindowHandle, anchor: Anchor);

    /// Hands the current attach state to a companion's own UI.
    fn deliver_state(&mut self, companion: WindowHandle, state: &AttachState);

    /// Destroys a companion window.
    fn destroy_companion(&mut self, companion: WindowHandle);

    /// Starts delivering location/show/hide/destroy events for `target`.
    fn watch(&mut self, target: WindowHandle, process_id: u32) -> WindowResult<Subscription>;

    /// Starts delivering foreground-change events.
    fn watch_foreground(&mut self) -> WindowResult<Subscription>;
}

/// Receives the manager's outbound notifications.
pub trait Observer {
    /// Called after every attach, detach, geometry change and
    /// instance-count change.
    fn state_changed(&mut self, state: &AttachState);

    /// Called when geometry worth remembering across restarts changed.
    fn persist(&mut self, layout: &Layout);
}
