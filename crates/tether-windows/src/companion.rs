//! The companion overlay window.
//!
//! A borderless, non-activating, topmost popup. It paints the attached
//! target's title and lets the user resize it from the sides facing away
//! from its anchor while Ctrl is held.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Once;

use tether_core::resize::{self, ResizeEdge};
use tether_core::{Anchor, Rect, Size, WindowEvent, WindowHandle, WindowResult};
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BeginPaint, CreateSolidBrush, DT_CENTER, DT_END_ELLIPSIS, DT_SINGLELINE, DT_VCENTER,
    DeleteObject, DrawTextW, EndPaint, FillRect, InvalidateRect, PAINTSTRUCT, SetBkMode,
    SetTextColor, TRANSPARENT,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{GetKeyState, VK_CONTROL};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetClientRect, HTBOTTOM, HTBOTTOMLEFT,
    HTBOTTOMRIGHT, HTCLIENT, HTLEFT, HTRIGHT, HTTOP, HTTOPLEFT, HTTOPRIGHT, IDC_ARROW,
    LoadCursorW, MA_NOACTIVATE, MINMAXINFO, RegisterClassW, WM_ENTERSIZEMOVE, WM_EXITSIZEMOVE,
    WM_GETMINMAXINFO, WM_MOUSEACTIVATE, WM_NCDESTROY, WM_NCHITTEST, WM_PAINT, WNDCLASSW,
    WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::{PCWSTR, w};

use crate::{frame, watcher};

/// Width of the resize grab band along each edge.
const GRIP: i32 = 6;

const BACKGROUND: COLORREF = COLORREF(0x002B_2B2B);
const FOREGROUND: COLORREF = COLORREF(0x00F0_F0F0);

const CLASS_NAME: PCWSTR = w!("TetherCompanion");

static REGISTER_CLASS: Once = Once::new();

/// Per-companion state read by the window procedure.
struct CompanionData {
    anchor: Anchor,
    text: String,
    min: Size,
    max: Size,
}

thread_local! {
    static COMPANIONS: RefCell<HashMap<usize, CompanionData>> = RefCell::new(HashMap::new());
}

fn ensure_class_registered() {
    REGISTER_CLASS.call_once(|| {
        let wc = WNDCLASSW {
            lpfnWndProc: Some(companion_wnd_proc),
            lpszClassName: CLASS_NAME,
            // SAFETY: loading a stock system cursor.
            hCursor: unsafe { LoadCursorW(None, IDC_ARROW) }.unwrap_or_default(),
            ..Default::default()
        };
        unsafe {
            RegisterClassW(&wc);
        }
    });
}

/// Creates a hidden companion at `rect`, pinned at `anchor`.
///
/// Interactive resizing is limited to `min..=max`.
pub fn create(rect: Rect, anchor: Anchor, min: Size, max: Size) -> WindowResult<WindowHandle> {
    ensure_class_registered();

    let ex = WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE | WS_EX_TOPMOST;
    // SAFETY: the class is registered above; all pointers are static.
    let hwnd = unsafe {
        CreateWindowExW(
            ex,
            CLASS_NAME,
            PCWSTR::null(),
            WS_POPUP,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            None,
            None,
            None,
            None,
        )?
    };

    let key = hwnd.0 as usize;
    COMPANIONS.with(|map| {
        map.borrow_mut().insert(
            key,
            CompanionData {
                anchor,
                text: String::new(),
                min,
                max,
            },
        )
    });

    Ok(WindowHandle::from_raw(key))
}

/// Changes the corner the companion's resize hit-testing is based on.
pub fn set_anchor(companion: WindowHandle, anchor: Anchor) {
    COMPANIONS.with(|map| {
        if let Some(data) = map.borrow_mut().get_mut(&companion.raw()) {
            data.anchor = anchor;
        }
    });
}

/// Replaces the painted text and schedules a repaint.
pub fn set_text(companion: WindowHandle, text: &str) {
    let changed = COMPANIONS.with(|map| match map.borrow_mut().get_mut(&companion.raw()) {
        Some(data) if data.text != text => {
            data.text = text.to_string();
            true
        }
        _ => false,
    });

    if changed {
        // SAFETY: InvalidateRect ignores handles that are no longer valid.
        unsafe {
            let _ = InvalidateRect(Some(hwnd_of(companion)), None, true);
        }
    }
}

/// Destroys the companion window. Its state is dropped in `WM_NCDESTROY`.
pub fn destroy(companion: WindowHandle) {
    // SAFETY: DestroyWindow fails harmlessly on an invalid handle.
    unsafe {
        let _ = DestroyWindow(hwnd_of(companion));
    }
}

fn hwnd_of(companion: WindowHandle) -> HWND {
    HWND(companion.raw() as *mut _)
}

unsafe extern "system" fn companion_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let companion = WindowHandle::from_raw(hwnd.0 as usize);

    match msg {
        WM_NCHITTEST => LRESULT(hit_test(hwnd, lparam) as isize),
        WM_MOUSEACTIVATE => LRESULT(MA_NOACTIVATE as isize),
        WM_ENTERSIZEMOVE => {
            watcher::post(WindowEvent::ResizeStarted { companion });
            LRESULT(0)
        }
        WM_EXITSIZEMOVE => {
            if let Ok(rect) = frame::window_rect(hwnd) {
                watcher::post(WindowEvent::ResizeEnded {
                    companion,
                    width: rect.width,
                    height: rect.height,
                });
            }
            LRESULT(0)
        }
        WM_GETMINMAXINFO => {
            let limits = COMPANIONS.with(|map| {
                map.borrow()
                    .get(&companion.raw())
                    .map(|data| (data.min, data.max))
            });
            let Some((min, max)) = limits else {
                return unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) };
            };
            // SAFETY: for WM_GETMINMAXINFO, lparam points to a MINMAXINFO
            // owned by the system for the duration of the call.
            let info = unsafe { &mut *(lparam.0 as *mut MINMAXINFO) };
            info.ptMinTrackSize.x = min.width;
            info.ptMinTrackSize.y = min.height;
            info.ptMaxTrackSize.x = max.width;
            info.ptMaxTrackSize.y = max.height;
            LRESULT(0)
        }
        WM_PAINT => {
            paint(hwnd);
            LRESULT(0)
        }
        WM_NCDESTROY => {
            COMPANIONS.with(|map| map.borrow_mut().remove(&companion.raw()));
            unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
        }
        _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
    }
}

/// Decides whether the cursor position is a resize grab.
fn hit_test(hwnd: HWND, lparam: LPARAM) -> u32 {
    // Screen coordinates, sign-extended from the low/high words.
    let x = (lparam.0 & 0xFFFF) as u16 as i16 as i32;
    let y = ((lparam.0 >> 16) & 0xFFFF) as u16 as i16 as i32;

    let Ok(rect) = frame::window_rect(hwnd) else {
        return HTCLIENT;
    };
    let Some(edge) = resize::edge_at(&rect, x, y, GRIP) else {
        return HTCLIENT;
    };

    let anchor = COMPANIONS.with(|map| map.borrow().get(&(hwnd.0 as usize)).map(|d| d.anchor));
    // SAFETY: GetKeyState reads the calling thread's keyboard state.
    let ctrl_held = unsafe { GetKeyState(i32::from(VK_CONTROL.0)) } < 0;

    if resize::grab_allowed(anchor, edge, ctrl_held) {
        hit_code(edge)
    } else {
        HTCLIENT
    }
}

fn hit_code(edge: ResizeEdge) -> u32 {
    match edge {
        ResizeEdge::Left => HTLEFT,
        ResizeEdge::Right => HTRIGHT,
        ResizeEdge::Top => HTTOP,
        ResizeEdge::Bottom => HTBOTTOM,
        ResizeEdge::TopLeft => HTTOPLEFT,
        ResizeEdge::TopRight => HTTOPRIGHT,
        ResizeEdge::BottomLeft => HTBOTTOMLEFT,
        ResizeEdge::BottomRight => HTBOTTOMRIGHT,
    }
}

/// Fills the client area and draws the target title, centered.
fn paint(hwnd: HWND) {
    let mut text: Vec<u16> = COMPANIONS.with(|map| {
        map.borrow()
            .get(&(hwnd.0 as usize))
            .map(|d| d.text.encode_utf16().collect())
            .unwrap_or_default()
    });

    unsafe {
        let mut ps = PAINTSTRUCT::default();
        let hdc = BeginPaint(hwnd, &mut ps);

        let brush = CreateSolidBrush(BACKGROUND);
        FillRect(hdc, &ps.rcPaint, brush);
        let _ = DeleteObject(brush.into());

        let mut client = RECT::default();
        if GetClientRect(hwnd, &mut client).is_ok() && !text.is_empty() {
            SetBkMode(hdc, TRANSPARENT);
            SetTextColor(hdc, FOREGROUND);
            DrawTextW(
                hdc,
                &mut text,
                &mut client,
                DT_SINGLELINE | DT_VCENTER | DT_CENTER | DT_END_ELLIPSIS,
            );
        }

        let _ = EndPaint(hwnd, &ps);
    }
}
