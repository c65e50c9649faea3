use tether_core::{Rect, WindowHandle};

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GWL_EXSTYLE, GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW,
    GetWindowThreadProcessId, IsIconic, IsWindow, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
};

use crate::{frame, process};

/// A top-level Win32 window, queried lazily through its `HWND`.
///
/// Every query tolerates the window having been destroyed already.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    pub fn from_handle(handle: WindowHandle) -> Self {
        Self::new(HWND(handle.raw() as *mut _))
    }

    /// Whether the handle still names a live window.
    pub fn is_valid(&self) -> bool {
        // SAFETY: IsWindow accepts any value and only reports validity.
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    /// Whether this looks like a window a user works in.
    ///
    /// Rejects tool windows (`WS_EX_TOOLWINDOW`) and windows that never
    /// take activation (`WS_EX_NOACTIVATE`): tooltips, palettes and
    /// overlays, our own companions included.
    pub fn is_app_window(&self) -> bool {
        // SAFETY: GetWindowLongPtrW reads the extended style bits.
        let ex_style = unsafe { GetWindowLongPtrW(self.hwnd, GWL_EXSTYLE) } as u32;
        ex_style & (WS_EX_TOOLWINDOW.0 | WS_EX_NOACTIVATE.0) == 0
    }
}

impl tether_core::Window for Window {
    fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(self.hwnd.0 as usize)
    }

    fn title(&self) -> String {
        // SAFETY: both calls only read the window text into our buffer and
        // return 0 for a destroyed window.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }
            let mut buffer = vec![0u16; length as usize + 1];
            let copied = GetWindowTextW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..copied.max(0) as usize])
        }
    }

    fn process_id(&self) -> Option<u32> {
        let mut pid = 0u32;
        // SAFETY: writes the owning process id into `pid`; returns 0 when
        // the window is gone.
        let thread = unsafe { GetWindowThreadProcessId(self.hwnd, Some(&mut pid as *mut _)) };
        (thread != 0 && pid != 0).then_some(pid)
    }

    fn executable(&self) -> Option<String> {
        process::exe_path(self.process_id()?).ok()
    }

    fn bounds(&self) -> Option<Rect> {
        if !self.is_valid() {
            return None;
        }
        frame::visible_bounds(self.hwnd)
    }

    fn is_minimized(&self) -> bool {
        // SAFETY: IsIconic is a read-only query.
        self.is_valid() && unsafe { IsIconic(self.hwnd).as_bool() }
    }
}
