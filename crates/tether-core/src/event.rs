use std::fmt;

use crate::WindowHandle;

/// A platform-agnostic window event.
///
/// Platform crates translate raw OS notifications into these variants
/// and queue them for the attachment manager. Target events carry the
/// target's handle; resize events carry the companion's handle.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    /// A target window moved, resized, minimized or restored.
    LocationChanged { hwnd: WindowHandle },

    /// A target window became visible.
    Shown { hwnd: WindowHandle },

    /// A target window was hidden.
    Hidden { hwnd: WindowHandle },

    /// A target window was destroyed.
    Destroyed { hwnd: WindowHandle },

    /// The OS foreground window changed.
    Foreground { hwnd: WindowHandle },

    /// The user started dragging a companion's resize border.
    ResizeStarted { companion: WindowHandle },

    /// The user finished resizing a companion.
    ResizeEnded {
        companion: WindowHandle,
        width: i32,
        height: i32,
    },
}

impl WindowEvent {
    /// Returns the window handle associated with this event.
    pub fn hwnd(&self) -> WindowHandle {
        match self {
            Self::LocationChanged { hwnd }
            | Self::Shown { hwnd }
            | Self::Hidden { hwnd }
            | Self::Destroyed { hwnd }
            | Self::Foreground { hwnd } => *hwnd,
            Self::ResizeStarted { companion } | Self::ResizeEnded { companion, .. } => *companion,
        }
    }
}

impl fmt::Display for WindowEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LocationChanged { hwnd } => write!(f, "[location] {hwnd}"),
            Self::Shown { hwnd } => write!(f, "[show]     {hwnd}"),
            Self::Hidden { hwnd } => write!(f, "[hide]     {hwnd}"),
            Self::Destroyed { hwnd } => write!(f, "[destroy]  {hwnd}"),
            Self::Foreground { hwnd } => write!(f, "[focus]    {hwnd}"),
            Self::ResizeStarted { companion } => write!(f, "[resize>]  {companion}"),
            Self::ResizeEnded {
                companion,
                width,
                height,
            } => write!(f, "[resize<]  {companion} {width}x{height}"),
        }
    }
}
