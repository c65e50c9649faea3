//! Bounds Provider: where a window is on screen.

use std::mem::size_of;

use tether_core::{Rect, WindowResult};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Dwm::{DWMWA_EXTENDED_FRAME_BOUNDS, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

/// The rectangle the user sees for `hwnd`, or `None` once it is gone.
///
/// Windows 10 and later surround top-level windows with invisible resize
/// borders that `GetWindowRect` counts; DWM's extended frame bounds leave
/// them out, so companions sit flush against the visible edge. Without
/// composition the plain window rectangle is used.
pub fn visible_bounds(hwnd: HWND) -> Option<Rect> {
    let mut frame = RECT::default();
    // SAFETY: DWM writes at most size_of::<RECT>() bytes into `frame`.
    let dwm = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_EXTENDED_FRAME_BOUNDS,
            std::ptr::from_mut(&mut frame).cast(),
            size_of::<RECT>() as u32,
        )
    };

    match dwm {
        Ok(()) => Some(to_rect(frame)),
        Err(_) => window_rect(hwnd).ok(),
    }
}

/// The full window rectangle, invisible borders included.
///
/// Companions are borderless popups, so for them this is exact.
pub fn window_rect(hwnd: HWND) -> WindowResult<Rect> {
    let mut rect = RECT::default();
    // SAFETY: GetWindowRect fails cleanly for a destroyed window.
    unsafe { GetWindowRect(hwnd, &mut rect)? };
    Ok(to_rect(rect))
}

fn to_rect(r: RECT) -> Rect {
    Rect::from_edges(r.left, r.top, r.right, r.bottom)
}
