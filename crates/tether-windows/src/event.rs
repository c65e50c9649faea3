use tether_core::{WindowEvent, WindowHandle};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_DESTROY, EVENT_OBJECT_HIDE, EVENT_OBJECT_LOCATIONCHANGE, EVENT_OBJECT_SHOW,
    EVENT_SYSTEM_FOREGROUND,
};

/// Object ID indicating the event applies to the window itself,
/// not a child element like a scrollbar or caret.
const OBJID_WINDOW: i32 = 0;

/// Translates a raw Win32 event into a platform-agnostic `WindowEvent`.
///
/// Returns `None` for child-object events and for event types the
/// engine doesn't track.
pub fn translate(event: u32, hwnd: HWND, id_object: i32) -> Option<WindowEvent> {
    if id_object != OBJID_WINDOW {
        return None;
    }

    let hwnd = WindowHandle::from_raw(hwnd.0 as usize);

    match event {
        EVENT_OBJECT_LOCATIONCHANGE => Some(WindowEvent::LocationChanged { hwnd }),
        EVENT_OBJECT_SHOW => Some(WindowEvent::Shown { hwnd }),
        EVENT_OBJECT_HIDE => Some(WindowEvent::Hidden { hwnd }),
        EVENT_OBJECT_DESTROY => Some(WindowEvent::Destroyed { hwnd }),
        EVENT_SYSTEM_FOREGROUND => Some(WindowEvent::Foreground { hwnd }),
        _ => None,
    }
}
