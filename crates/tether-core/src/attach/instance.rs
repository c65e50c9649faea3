use crate::desktop::{Subscription, TargetWindow};
use crate::resize::ResizeState;
use crate::{Size, WindowHandle};

/// One attached target window and the companion pinned to it.
pub(super) struct AttachInstance {
    pub(super) target: WindowHandle,
    pub(super) process_id: u32,
    pub(super) title: String,
    pub(super) path: String,
    pub(super) companion: WindowHandle,
    /// Event hook for the target. `None` when installation failed and
    /// the instance relies on the alive-check alone.
    watch: Option<Subscription>,
    /// Companion hidden because the target is minimized.
    pub(super) hidden: bool,
    /// Content size captured when the target was minimized.
    pub(super) restore_size: Option<Size>,
    /// Current companion content size.
    pub(super) content_size: Size,
    pub(super) resize: ResizeState,
}

impl AttachInstance {
    pub(super) fn new(
        target: TargetWindow,
        companion: WindowHandle,
        watch: Option<Subscription>,
        content_size: Size,
    ) -> Self {
        Self {
            target: target.handle,
            process_id: target.process_id,
            title: target.title,
            path: target.path,
            companion,
            watch,
            hidden: false,
            restore_size: None,
            content_size,
            resize: ResizeState::default(),
        }
    }

    /// The size the companion has, or will get back once its target is
    /// restored.
    pub(super) fn effective_size(&self) -> Size {
        self.restore_size.unwrap_or(self.content_size)
    }

    pub(super) fn is_watched(&self) -> bool {
        self.watch.as_ref().is_some_and(Subscription::is_active)
    }

    /// Cancels the target hook. Safe to call repeatedly.
    pub(super) fn unwatch(&mut self) {
        if let Some(mut watch) = self.watch.take() {
            watch.cancel();
        }
    }
}
