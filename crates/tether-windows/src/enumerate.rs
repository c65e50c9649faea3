use tether_core::desktop::TargetWindow;
use tether_core::{Window as _, WindowResult};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{EnumWindows, IsIconic, IsWindowVisible};
use windows::core::BOOL;

use crate::window::Window;

/// Every visible, restored, top-level application window, in Z-order.
pub fn enumerate_windows() -> WindowResult<Vec<Window>> {
    let mut found: Vec<Window> = Vec::new();

    // SAFETY: EnumWindows is synchronous, so `found` outlives every
    // callback that receives a pointer to it.
    unsafe {
        EnumWindows(Some(collect), LPARAM(std::ptr::from_mut(&mut found) as isize))?;
    }

    Ok(found)
}

/// Lists the attachable windows owned by `process_name`.
///
/// The name is compared against the owning executable's file name,
/// case-insensitively and without `.exe`. Windows whose bounds can't be
/// read or cover no pixels are skipped.
pub fn find_target_windows(process_name: &str) -> WindowResult<Vec<TargetWindow>> {
    Ok(enumerate_windows()?
        .iter()
        .filter_map(|window| window.as_target(process_name))
        .collect())
}

unsafe extern "system" fn collect(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec passed by enumerate_windows.
    let found = unsafe { &mut *(lparam.0 as *mut Vec<Window>) };
    if is_candidate(hwnd) {
        found.push(Window::new(hwnd));
    }
    BOOL(1)
}

fn is_candidate(hwnd: HWND) -> bool {
    // SAFETY: read-only state queries.
    let shown = unsafe { IsWindowVisible(hwnd).as_bool() && !IsIconic(hwnd).as_bool() };
    shown && Window::new(hwnd).is_app_window()
}
