//! WinEvent hooks feeding the engine thread.
//!
//! Hook callbacks never touch the attachment manager. They translate the
//! raw notification, check it against the hook's target, and push a
//! [`WindowEvent`] onto the thread-local channel the message pump drains.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::mpsc::Sender;

use tether_core::desktop::Subscription;
use tether_core::{WindowEvent, WindowHandle, WindowResult, log_debug};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{
    EVENT_OBJECT_DESTROY, EVENT_OBJECT_LOCATIONCHANGE, EVENT_SYSTEM_FOREGROUND,
    WINEVENT_OUTOFCONTEXT,
};

use crate::event;

// Thread-local state for the WinEvent callback. Out-of-context hooks
// deliver callbacks on the thread that installed them, which is always
// the engine thread.
thread_local! {
    static EVENT_SENDER: RefCell<Option<Sender<WindowEvent>>> = const { RefCell::new(None) };

    /// Installed hooks and the window each one is scoped to.
    /// `None` marks the global foreground hook.
    static HOOKS: RefCell<HashMap<usize, Option<WindowHandle>>> = RefCell::new(HashMap::new());
}

/// Routes hook events on the current thread into `tx`.
pub fn install_sender(tx: Sender<WindowEvent>) {
    EVENT_SENDER.with(|cell| *cell.borrow_mut() = Some(tx));
}

/// Queues an event for the engine. No-op before [`install_sender`].
pub fn post(event: WindowEvent) {
    EVENT_SENDER.with(|cell| {
        if let Some(sender) = cell.borrow().as_ref() {
            let _ = sender.send(event);
        }
    });
}

/// Watches location, show, hide and destroy events of `target`.
///
/// The hook is scoped to the owning process; events for its other
/// windows are dropped in the callback.
pub fn watch_window(target: WindowHandle, process_id: u32) -> WindowResult<Subscription> {
    install(
        EVENT_OBJECT_DESTROY,
        EVENT_OBJECT_LOCATIONCHANGE,
        process_id,
        Some(target),
    )
}

/// Watches foreground changes across the whole desktop.
pub fn watch_foreground() -> WindowResult<Subscription> {
    install(EVENT_SYSTEM_FOREGROUND, EVENT_SYSTEM_FOREGROUND, 0, None)
}

fn install(
    event_min: u32,
    event_max: u32,
    process_id: u32,
    target: Option<WindowHandle>,
) -> WindowResult<Subscription> {
    // SAFETY: SetWinEventHook registers our callback. WINEVENT_OUTOFCONTEXT
    // means the callback runs in our process, on this thread, while it
    // pumps messages.
    let hook = unsafe {
        SetWinEventHook(
            event_min,
            event_max,
            None,
            Some(win_event_proc),
            process_id,
            0,
            WINEVENT_OUTOFCONTEXT,
        )
    };

    if hook.is_invalid() {
        return Err(format!("SetWinEventHook failed for process {process_id}").into());
    }

    let key = hook.0 as usize;
    HOOKS.with(|hooks| hooks.borrow_mut().insert(key, target));
    log_debug!("hook {key:#x} installed for {target:?}");

    Ok(Subscription::new(move || {
        HOOKS.with(|hooks| hooks.borrow_mut().remove(&key));
        // SAFETY: the hook was installed above and is unhooked only here;
        // Subscription runs this closure at most once.
        unsafe {
            let _ = UnhookWinEvent(HWINEVENTHOOK(key as *mut _));
        }
    }))
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    _id_child: i32,
    _event_thread: u32,
    _event_time: u32,
) {
    let Some(window_event) = event::translate(event, hwnd, id_object) else {
        return;
    };

    let key = hook.0 as usize;
    let wanted = HOOKS.with(|hooks| match hooks.borrow().get(&key) {
        Some(Some(target)) => *target == window_event.hwnd(),
        Some(None) => true,
        // Late delivery for a hook that was already removed.
        None => false,
    });

    if wanted {
        post(window_event);
    }
}
