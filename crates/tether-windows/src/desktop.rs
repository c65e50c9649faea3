//! [`Desktop`] implementation backed by Win32.

use tether_core::desktop::{Desktop, Subscription, TargetWindow};
use tether_core::{Anchor, AttachState, Rect, Size, Window as _, WindowHandle, WindowResult, log_warn};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    GW_HWNDPREV, GetForegroundWindow, GetWindow, HWND_NOTOPMOST, HWND_TOP, HWND_TOPMOST,
    SET_WINDOW_POS_FLAGS, SW_HIDE, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_NOZORDER, SetWindowPos, ShowWindow,
};

use crate::window::Window;
use crate::{companion, enumerate, watcher};

/// The live desktop seen from the engine thread.
///
/// Must be used on the thread that pumps messages: companions are
/// created on it and WinEvent hooks deliver to it.
pub struct Win32Desktop {
    min_size: Size,
    max_size: Size,
}

impl Win32Desktop {
    /// Creates a desktop whose companions can be resized within `min..=max`.
    pub fn new(min_size: Size, max_size: Size) -> Self {
        Self { min_size, max_size }
    }
}

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut _)
}

/// Changes only the Z-order of `companion`.
fn restack(companion: WindowHandle, insert_after: HWND) {
    let flags = SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE;
    // SAFETY: SetWindowPos fails harmlessly on invalid handles.
    unsafe {
        let _ = SetWindowPos(hwnd(companion), Some(insert_after), 0, 0, 0, 0, flags);
    }
}

/// Text painted on a companion for the given state.
fn companion_text(state: &AttachState) -> String {
    match (&state.target, &state.target_process_name) {
        (Some(target), _) if !target.title.is_empty() => target.title.clone(),
        (_, Some(name)) => name.clone(),
        _ => String::from("tether"),
    }
}

impl Desktop for Win32Desktop {
    fn find_windows(&self, process_name: &str) -> Vec<TargetWindow> {
        match enumerate::find_target_windows(process_name) {
            Ok(windows) => windows,
            Err(e) => {
                log_warn!("Window enumeration failed: {e}");
                Vec::new()
            }
        }
    }

    fn is_window(&self, hwnd: WindowHandle) -> bool {
        Window::from_handle(hwnd).is_valid()
    }

    fn is_minimized(&self, hwnd: WindowHandle) -> bool {
        Window::from_handle(hwnd).is_minimized()
    }

    fn bounds(&self, hwnd: WindowHandle) -> Option<Rect> {
        Window::from_handle(hwnd).bounds()
    }

    fn process_id(&self, hwnd: WindowHandle) -> Option<u32> {
        Window::from_handle(hwnd).process_id()
    }

    fn foreground(&self) -> Option<WindowHandle> {
        // SAFETY: GetForegroundWindow takes no arguments.
        let fg = unsafe { GetForegroundWindow() };
        (!fg.is_invalid()).then(|| WindowHandle::from_raw(fg.0 as usize))
    }

    fn create_companion(&mut self, rect: Rect, anchor: Anchor) -> WindowResult<WindowHandle> {
        companion::create(rect, anchor, self.min_size, self.max_size)
    }

    fn move_companion(&mut self, companion: WindowHandle, rect: Rect) {
        let flags: SET_WINDOW_POS_FLAGS = SWP_NOZORDER | SWP_NOACTIVATE;
        // SAFETY: SetWindowPos fails harmlessly on invalid handles.
        unsafe {
            let _ = SetWindowPos(
                hwnd(companion),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                flags,
            );
        }
    }

    fn show_companion(&mut self, companion: WindowHandle) {
        // SAFETY: ShowWindow only changes visibility.
        unsafe {
            let _ = ShowWindow(hwnd(companion), SW_SHOWNOACTIVATE);
        }
    }

    fn hide_companion(&mut self, companion: WindowHandle) {
        // SAFETY: ShowWindow only changes visibility.
        unsafe {
            let _ = ShowWindow(hwnd(companion), SW_HIDE);
        }
    }

    fn set_topmost(&mut self, companion: WindowHandle) {
        restack(companion, HWND_TOPMOST);
    }

    fn place_above(&mut self, companion: WindowHandle, target: WindowHandle) {
        restack(companion, HWND_NOTOPMOST);

        // The window directly above the target; inserting after it puts
        // the companion between the two.
        // SAFETY: GetWindow returns an error for invalid handles.
        let above = unsafe { GetWindow(hwnd(target), GW_HWNDPREV) }.ok();
        match above {
            Some(prev) if prev == hwnd(companion) => {}
            Some(prev) if !prev.is_invalid() => restack(companion, prev),
            _ => restack(companion, HWND_TOP),
        }
    }

    fn set_companion_anchor(&mut self, companion: WindowHandle, anchor: Anchor) {
        companion::set_anchor(companion, anchor);
    }

    fn deliver_state(&mut self, companion: WindowHandle, state: &AttachState) {
        companion::set_text(companion, &companion_text(state));
    }

    fn destroy_companion(&mut self, companion: WindowHandle) {
        companion::destroy(companion);
    }

    fn watch(&mut self, target: WindowHandle, process_id: u32) -> WindowResult<Subscription> {
        watcher::watch_window(target, process_id)
    }

    fn watch_foreground(&mut self) -> WindowResult<Subscription> {
        watcher::watch_foreground()
    }
}
