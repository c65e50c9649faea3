use crate::desktop::TargetWindow;
use crate::{Rect, WindowHandle, locator};

/// A boxed error type for window and I/O operations.
///
/// Native failures are carried as values and logged by the engine;
/// none of them are fatal to the host.
pub type WindowResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Read-only view of one top-level window.
///
/// The platform crate implements it over native handles. Windows can
/// vanish between calls, so a destroyed window answers `None` or `false`
/// instead of failing.
pub trait Window {
    fn handle(&self) -> WindowHandle;

    /// Title bar text; empty when the window has none.
    fn title(&self) -> String;

    fn process_id(&self) -> Option<u32>;

    /// Full path of the owning executable.
    fn executable(&self) -> Option<String>;

    /// Visible bounds in screen coordinates.
    fn bounds(&self) -> Option<Rect>;

    fn is_minimized(&self) -> bool;

    /// Describes this window as a target of `process_name`.
    ///
    /// `None` unless the executable matches and the window is restored
    /// with a measurable, non-empty area.
    fn as_target(&self, process_name: &str) -> Option<TargetWindow> {
        let path = self.executable()?;
        if !locator::matches_process(&path, process_name) || self.is_minimized() {
            return None;
        }
        self.bounds().filter(|b| !b.is_empty())?;

        Some(TargetWindow {
            handle: self.handle(),
            process_id: self.process_id()?,
            title: self.title(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubWindow {
        path: Option<&'static str>,
        pid: Option<u32>,
        bounds: Option<Rect>,
        minimized: bool,
    }

    impl Default for StubWindow {
        fn default() -> Self {
            Self {
                path: Some(r"C:\Apps\Code.exe"),
                pid: Some(42),
                bounds: Some(Rect::new(100, 100, 800, 600)),
                minimized: false,
            }
        }
    }

    impl Window for StubWindow {
        fn handle(&self) -> WindowHandle {
            WindowHandle::from_raw(0x100)
        }
        fn title(&self) -> String {
            "main.rs - Code".into()
        }
        fn process_id(&self) -> Option<u32> {
            self.pid
        }
        fn executable(&self) -> Option<String> {
            self.path.map(String::from)
        }
        fn bounds(&self) -> Option<Rect> {
            self.bounds
        }
        fn is_minimized(&self) -> bool {
            self.minimized
        }
    }

    #[test]
    fn matching_window_becomes_target() {
        // Act
        let target = StubWindow::default().as_target("code").expect("not a target");

        // Assert
        assert_eq!(target.handle, WindowHandle::from_raw(0x100));
        assert_eq!(target.process_id, 42);
        assert_eq!(target.title, "main.rs - Code");
        assert_eq!(target.path, r"C:\Apps\Code.exe");
    }

    #[test]
    fn other_executable_is_rejected() {
        assert!(StubWindow::default().as_target("notepad").is_none());
    }

    #[test]
    fn unmeasurable_or_minimized_windows_are_rejected() {
        let minimized = StubWindow {
            minimized: true,
            ..StubWindow::default()
        };
        let empty = StubWindow {
            bounds: Some(Rect::new(0, 0, 0, 0)),
            ..StubWindow::default()
        };
        let unknown = StubWindow {
            bounds: None,
            ..StubWindow::default()
        };

        assert!(minimized.as_target("code").is_none());
        assert!(empty.as_target("code").is_none());
        assert!(unknown.as_target("code").is_none());
    }

    #[test]
    fn window_without_owner_is_rejected() {
        let gone = StubWindow {
            path: None,
            pid: None,
            ..StubWindow::default()
        };
        assert!(gone.as_target("code").is_none());
    }
}
