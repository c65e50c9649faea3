use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use std::time::{Duration, Instant};

use super::*;
use crate::desktop::TargetWindow;
use crate::locator;
use crate::timer::TimerKind;
use crate::{Anchor, Rect, Size, WindowResult};

#[cfg(test)]
#[path = "tests/event_tests.rs"]
mod event_tests;

// -- Fake desktop --

pub(super) struct FakeWindow {
    pub(super) process_id: u32,
    pub(super) path: String,
    pub(super) title: String,
    pub(super) bounds: Rect,
    pub(super) minimized: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct FakeCompanion {
    pub(super) rect: Rect,
    pub(super) anchor: Anchor,
    pub(super) visible: bool,
    pub(super) topmost: bool,
    /// Target the companion was last stacked directly above.
    pub(super) above: Option<WindowHandle>,
    pub(super) title: Option<String>,
}

/// In-memory window manager.
///
/// Watches are tracked through shared sets so tests can observe that a
/// subscription was cancelled after the manager dropped it.
#[derive(Default)]
pub(super) struct FakeDesktop {
    pub(super) windows: BTreeMap<WindowHandle, FakeWindow>,
    pub(super) companions: HashMap<WindowHandle, FakeCompanion>,
    pub(super) destroyed: Vec<WindowHandle>,
    pub(super) foreground: Option<WindowHandle>,
    pub(super) fail_create: bool,
    pub(super) fail_watch: bool,
    pub(super) fail_foreground_watch: bool,
    pub(super) watched: Rc<RefCell<Vec<WindowHandle>>>,
    pub(super) foreground_watches: Rc<RefCell<usize>>,
    next_companion: usize,
}

impl FakeDesktop {
    pub(super) fn new() -> Self {
        Self {
            next_companion: 0x9000,
            ..Self::default()
        }
    }

    /// Adds a visible `Code.exe` window owned by `pid`.
    pub(super) fn open(&mut self, raw: usize, pid: u32, bounds: Rect) -> WindowHandle {
        let hwnd = WindowHandle::from_raw(raw);
        self.windows.insert(
            hwnd,
            FakeWindow {
                process_id: pid,
                path: r"C:\Apps\Code.exe".into(),
                title: format!("window {raw:#x}"),
                bounds,
                minimized: false,
            },
        );
        hwnd
    }

    pub(super) fn close(&mut self, hwnd: WindowHandle) {
        self.windows.remove(&hwnd);
    }

    pub(super) fn window_mut(&mut self, hwnd: WindowHandle) -> &mut FakeWindow {
        self.windows.get_mut(&hwnd).expect("unknown fake window")
    }

    pub(super) fn companion(&self, companion: WindowHandle) -> &FakeCompanion {
        self.companions
            .get(&companion)
            .expect("unknown fake companion")
    }

    pub(super) fn is_watched(&self, hwnd: WindowHandle) -> bool {
        self.watched.borrow().contains(&hwnd)
    }

    pub(super) fn foreground_watch_count(&self) -> usize {
        *self.foreground_watches.borrow()
    }
}

impl Desktop for FakeDesktop {
    fn find_windows(&self, process_name: &str) -> Vec<TargetWindow> {
        self.windows
            .iter()
            .filter(|(_, w)| locator::matches_process(&w.path, process_name))
            .filter(|(_, w)| !w.minimized && !w.bounds.is_empty())
            .map(|(hwnd, w)| TargetWindow {
                handle: *hwnd,
                process_id: w.process_id,
                title: w.title.clone(),
                path: w.path.clone(),
            })
            .collect()
    }

    fn is_window(&self, hwnd: WindowHandle) -> bool {
        self.windows.contains_key(&hwnd) || self.companions.contains_key(&hwnd)
    }

    fn is_minimized(&self, hwnd: WindowHandle) -> bool {
        self.windows.get(&hwnd).is_some_and(|w| w.minimized)
    }

    fn bounds(&self, hwnd: WindowHandle) -> Option<Rect> {
        self.windows.get(&hwnd).map(|w| w.bounds)
    }

    fn process_id(&self, hwnd: WindowHandle) -> Option<u32> {
        self.windows.get(&hwnd).map(|w| w.process_id)
    }

    fn foreground(&self) -> Option<WindowHandle> {
        self.foreground
    }

    fn create_companion(&mut self, rect: Rect, anchor: Anchor) -> WindowResult<WindowHandle> {
        if self.fail_create {
            return Err("CreateWindowExW failed".into());
        }
        self.next_companion += 1;
        let hwnd = WindowHandle::from_raw(self.next_companion);
        self.companions.insert(
            hwnd,
            FakeCompanion {
                rect,
                anchor,
                visible: false,
                topmost: false,
                above: None,
                title: None,
            },
        );
        Ok(hwnd)
    }

    fn move_companion(&mut self, companion: WindowHandle, rect: Rect) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.rect = rect;
        }
    }

    fn show_companion(&mut self, companion: WindowHandle) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.visible = true;
        }
    }

    fn hide_companion(&mut self, companion: WindowHandle) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.visible = false;
        }
    }

    fn set_topmost(&mut self, companion: WindowHandle) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.topmost = true;
            c.above = None;
        }
    }

    fn place_above(&mut self, companion: WindowHandle, target: WindowHandle) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.topmost = false;
            c.above = Some(target);
        }
    }

    fn set_companion_anchor(&mut self, companion: WindowHandle, anchor: Anchor) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.anchor = anchor;
        }
    }

    fn deliver_state(&mut self, companion: WindowHandle, state: &AttachState) {
        if let Some(c) = self.companions.get_mut(&companion) {
            c.title = state.target.as_ref().map(|t| t.title.clone());
        }
    }

    fn destroy_companion(&mut self, companion: WindowHandle) {
        if self.companions.remove(&companion).is_some() {
            self.destroyed.push(companion);
        }
    }

    fn watch(&mut self, target: WindowHandle, _process_id: u32) -> WindowResult<Subscription> {
        if self.fail_watch {
            return Err("SetWinEventHook failed".into());
        }
        self.watched.borrow_mut().push(target);
        let watched = Rc::clone(&self.watched);
        Ok(Subscription::new(move || {
            watched.borrow_mut().retain(|h| *h != target);
        }))
    }

    fn watch_foreground(&mut self) -> WindowResult<Subscription> {
        if self.fail_foreground_watch {
            return Err("SetWinEventHook failed".into());
        }
        *self.foreground_watches.borrow_mut() += 1;
        let count = Rc::clone(&self.foreground_watches);
        Ok(Subscription::new(move || *count.borrow_mut() -= 1))
    }
}

// -- Recording observer --

#[derive(Default)]
pub(super) struct RecordingObserver {
    pub(super) states: Vec<AttachState>,
    pub(super) layouts: Vec<Layout>,
}

impl Observer for RecordingObserver {
    fn state_changed(&mut self, state: &AttachState) {
        self.states.push(state.clone());
    }

    fn persist(&mut self, layout: &Layout) {
        self.layouts.push(layout.clone());
    }
}

// -- Helpers --

pub(super) type TestManager = AttachManager<FakeDesktop, RecordingObserver>;

pub(super) fn target_rect() -> Rect {
    Rect::new(100, 100, 800, 600)
}

pub(super) fn code_settings() -> EngineSettings {
    EngineSettings {
        process_name: Some("Code".into()),
        ..EngineSettings::default()
    }
}

pub(super) fn manager(desktop: FakeDesktop, now: Instant) -> TestManager {
    AttachManager::new(desktop, RecordingObserver::default(), code_settings(), now)
}

/// A manager already attached to one window `0x100` (pid 42).
pub(super) fn attached_manager(now: Instant) -> (TestManager, WindowHandle) {
    let mut desktop = FakeDesktop::new();
    let hwnd = desktop.open(0x100, 42, target_rect());
    let mut mgr = manager(desktop, now);
    mgr.on_timers(now);
    (mgr, hwnd)
}

pub(super) fn companion_of(mgr: &TestManager, target: WindowHandle) -> WindowHandle {
    let idx = mgr.index_of(target).expect("target not attached");
    mgr.instances[idx].companion
}

pub(super) fn later(now: Instant, ms: u64) -> Instant {
    now + Duration::from_millis(ms)
}

// -- Construction --

#[test]
fn new_manager_with_target_scans_immediately() {
    // Arrange
    let now = Instant::now();

    // Act
    let mgr = manager(FakeDesktop::new(), now);

    // Assert
    assert_eq!(mgr.next_deadline(), Some(now));
    assert!(mgr.is_timer_armed(TimerKind::Scan));
}

#[test]
fn new_manager_without_target_is_idle() {
    // Act
    let mgr = AttachManager::new(
        FakeDesktop::new(),
        RecordingObserver::default(),
        EngineSettings::default(),
        Instant::now(),
    );

    // Assert
    assert_eq!(mgr.next_deadline(), None);
    assert!(!mgr.state().attached);
}

#[test]
fn state_reports_earliest_instance_without_foreground() {
    // Arrange
    let now = Instant::now();
    let mut desktop = FakeDesktop::new();
    desktop.open(0x100, 42, target_rect());
    desktop.open(0x200, 43, Rect::new(1000, 100, 800, 600));
    let mut mgr = manager(desktop, now);

    // Act
    mgr.on_timers(now);
    let state = mgr.state();

    // Assert
    assert!(state.attached);
    assert_eq!(state.attached_count, 2);
    assert_eq!(state.target.map(|t| t.process_id), Some(42));
    assert_eq!(state.target_process_name.as_deref(), Some("Code"));
}

#[test]
fn state_prefers_foreground_target() {
    // Arrange
    let now = Instant::now();
    let mut desktop = FakeDesktop::new();
    desktop.open(0x100, 42, target_rect());
    let second = desktop.open(0x200, 43, Rect::new(1000, 100, 800, 600));
    let mut mgr = manager(desktop, now);
    mgr.on_timers(now);

    // Act
    mgr.desktop_mut().foreground = Some(second);
    let state = mgr.state();

    // Assert
    assert_eq!(state.target.map(|t| t.process_id), Some(43));
}

#[test]
fn layout_reflects_live_settings() {
    // Arrange
    let (mut mgr, _) = attached_manager(Instant::now());

    // Act
    mgr.set_anchor(Anchor::BottomLeft);
    mgr.set_offset(5.0, -5.0);
    let layout = mgr.layout();

    // Assert
    assert_eq!(layout.process_name.as_deref(), Some("Code"));
    assert_eq!(layout.anchor, Anchor::BottomLeft);
    assert_eq!(layout.offset, crate::Offset::new(5.0, -5.0));
    assert_eq!(layout.size(), Size::new(200, 40));
}

// -- Settings --

#[test]
fn settings_prefer_saved_layout() {
    // Arrange
    let mut config = crate::Config::default();
    config.target.process_name = Some("WindowsTerminal".into());
    config.validate();
    let layout = Layout {
        process_name: Some("Code".into()),
        anchor: Anchor::BottomRight,
        width: 5000,
        height: 10,
        ..Layout::default()
    };

    // Act
    let settings = EngineSettings::new(&config, Some(&layout));

    // Assert
    assert_eq!(settings.process_name.as_deref(), Some("Code"));
    assert_eq!(settings.anchor, Anchor::BottomRight);
    assert_eq!(settings.default_anchor, Anchor::TopRight);
    assert_eq!(settings.mini_size, Size::new(800, 32));
}

#[test]
fn cleared_target_in_layout_survives_restart() {
    // Arrange
    let mut config = crate::Config::default();
    config.target.process_name = Some("Code".into());
    let layout = Layout::default();

    // Act
    let settings = EngineSettings::new(&config, Some(&layout));

    // Assert
    assert_eq!(settings.process_name, None);
}

#[test]
fn settings_without_layout_follow_config() {
    // Arrange
    let mut config = crate::Config::default();
    config.target.process_name = Some("Code".into());
    config.target.anchor = Anchor::TopLeft;
    config.companion.width = 300;

    // Act
    let settings = EngineSettings::new(&config, None);

    // Assert
    assert_eq!(settings.process_name.as_deref(), Some("Code"));
    assert_eq!(settings.anchor, Anchor::TopLeft);
    assert_eq!(settings.mini_size, Size::new(300, 40));
    assert_eq!(settings.default_size, Size::new(300, 40));
}
