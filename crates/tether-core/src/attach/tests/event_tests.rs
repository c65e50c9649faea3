use std::time::Instant;

use super::super::*;
use super::{FakeDesktop, attached_manager, companion_of, manager, target_rect};
use crate::{Rect, WindowEvent};

// -- Move --

#[test]
fn location_change_moves_companion() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    mgr.desktop_mut().window_mut(hwnd).bounds = Rect::new(300, 50, 1000, 700);

    // Act
    mgr.handle_event(WindowEvent::LocationChanged { hwnd }, now);

    // Assert
    let companion = mgr.desktop().companion(companion_of(&mgr, hwnd));
    assert_eq!(companion.rect, Rect::new(1088, 90, 200, 40));
}

#[test]
fn events_for_untracked_windows_are_ignored() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let stranger = WindowHandle::from_raw(0xdead);
    let before = mgr.desktop().companion(companion_of(&mgr, hwnd)).clone();

    // Act
    mgr.handle_event(WindowEvent::LocationChanged { hwnd: stranger }, now);
    mgr.handle_event(WindowEvent::Hidden { hwnd: stranger }, now);
    mgr.handle_event(WindowEvent::Destroyed { hwnd: stranger }, now);

    // Assert
    assert_eq!(mgr.attached_count(), 1);
    assert_eq!(mgr.desktop().companion(companion_of(&mgr, hwnd)), &before);
}

// -- Minimize / restore --

#[test]
fn minimize_hides_companion_but_stays_attached() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    mgr.desktop_mut().window_mut(hwnd).minimized = true;

    // Act
    mgr.handle_event(WindowEvent::LocationChanged { hwnd }, now);

    // Assert
    let companion = companion_of(&mgr, hwnd);
    assert!(!mgr.desktop().companion(companion).visible);
    assert!(mgr.instances[0].hidden);
    assert!(mgr.state().attached);
}

#[test]
fn zero_area_bounds_count_as_minimized() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    mgr.desktop_mut().window_mut(hwnd).bounds = Rect::new(-32000, -32000, 0, 0);

    // Act
    mgr.handle_event(WindowEvent::LocationChanged { hwnd }, now);

    // Assert
    assert!(!mgr.desktop().companion(companion_of(&mgr, hwnd)).visible);
    assert!(mgr.is_attached(hwnd));
}

#[test]
fn hide_event_counts_as_minimized() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);

    // Act
    mgr.handle_event(WindowEvent::Hidden { hwnd }, now);

    // Assert
    assert!(!mgr.desktop().companion(companion_of(&mgr, hwnd)).visible);
}

#[test]
fn restore_shows_companion_at_new_position() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let companion = companion_of(&mgr, hwnd);
    mgr.desktop_mut().window_mut(hwnd).minimized = true;
    mgr.handle_event(WindowEvent::LocationChanged { hwnd }, now);
    mgr.desktop_mut().place_above(companion, hwnd);

    // Act
    {
        let window = mgr.desktop_mut().window_mut(hwnd);
        window.minimized = false;
        window.bounds = Rect::new(0, 0, 1000, 800);
    }
    mgr.handle_event(WindowEvent::LocationChanged { hwnd }, now);

    // Assert
    let state = mgr.desktop().companion(companion);
    assert!(state.visible);
    assert!(state.topmost);
    assert_eq!(state.rect, Rect::new(788, 40, 200, 40));
    assert!(!mgr.instances[0].hidden);
}

#[test]
fn restore_brings_back_size_from_before_minimize() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    mgr.instances[0].content_size = crate::Size::new(300, 60);
    mgr.handle_event(WindowEvent::Hidden { hwnd }, now);

    // Act
    mgr.handle_event(WindowEvent::Shown { hwnd }, now);

    // Assert
    let rect = mgr.desktop().companion(companion_of(&mgr, hwnd)).rect;
    assert_eq!((rect.width, rect.height), (300, 60));
    assert_eq!(rect.x, 100 + 800 - 300 - 12);
}

#[test]
fn minimizing_twice_is_idempotent() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    mgr.handle_event(WindowEvent::Hidden { hwnd }, now);
    mgr.instances[0].content_size = crate::Size::new(500, 500);

    // Act
    mgr.handle_event(WindowEvent::Hidden { hwnd }, now);

    // Assert
    assert_eq!(
        mgr.instances[0].restore_size,
        Some(crate::Size::new(200, 40))
    );
}

// -- Foreground --

#[test]
fn foreground_companion_is_made_topmost() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let companion = companion_of(&mgr, hwnd);
    mgr.desktop_mut().place_above(companion, hwnd);

    // Act
    mgr.handle_event(WindowEvent::Foreground { hwnd: companion }, now);

    // Assert
    assert!(mgr.desktop().companion(companion).topmost);
}

#[test]
fn foreground_window_of_target_process_keeps_companion_topmost() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let companion = companion_of(&mgr, hwnd);
    mgr.desktop_mut().place_above(companion, hwnd);
    let dialog = mgr.desktop_mut().open(0x300, 42, Rect::new(0, 0, 300, 200));

    // Act
    mgr.handle_event(WindowEvent::Foreground { hwnd: dialog }, now);

    // Assert
    assert!(mgr.desktop().companion(companion).topmost);
}

#[test]
fn foreign_foreground_restacks_companion_above_target() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let companion = companion_of(&mgr, hwnd);
    let browser = mgr.desktop_mut().open(0x300, 99, target_rect());

    // Act
    mgr.handle_event(WindowEvent::Foreground { hwnd: browser }, now);

    // Assert
    let state = mgr.desktop().companion(companion);
    assert!(!state.topmost);
    assert_eq!(state.above, Some(hwnd));
}

#[test]
fn foreground_change_handles_each_instance_separately() {
    // Arrange
    let now = Instant::now();
    let mut desktop = FakeDesktop::new();
    let code = desktop.open(0x100, 42, target_rect());
    let other_code = desktop.open(0x200, 43, target_rect());
    let mut mgr = manager(desktop, now);
    mgr.on_timers(now);

    // Act
    mgr.handle_event(WindowEvent::Foreground { hwnd: other_code }, now);

    // Assert
    let first = mgr.desktop().companion(companion_of(&mgr, code)).clone();
    let second = mgr.desktop().companion(companion_of(&mgr, other_code)).clone();
    assert_eq!(first.above, Some(code));
    assert!(second.topmost);
}

#[test]
fn restack_skips_targets_that_are_gone() {
    // Arrange
    let now = Instant::now();
    let (mut mgr, hwnd) = attached_manager(now);
    let companion = companion_of(&mgr, hwnd);
    mgr.desktop_mut().close(hwnd);

    // Act
    mgr.handle_event(
        WindowEvent::Foreground {
            hwnd: WindowHandle::from_raw(0x555),
        },
        now,
    );

    // Assert
    let state = mgr.desktop().companion(companion);
    assert!(state.topmost);
    assert_eq!(state.above, None);
}
