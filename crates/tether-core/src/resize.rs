//! Interactive resize rules for companion windows.
//!
//! A companion may only be resized from the side facing away from its
//! anchor corner, so the pinned corner never drifts while the user drags.

use crate::{Anchor, Rect};

/// A window edge or corner grabbed by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Returns the two edges not adjacent to `anchor`.
pub fn allowed_edges(anchor: Anchor) -> [ResizeEdge; 2] {
    match anchor {
        Anchor::TopLeft => [ResizeEdge::Right, ResizeEdge::Bottom],
        Anchor::TopRight => [ResizeEdge::Left, ResizeEdge::Bottom],
        Anchor::BottomLeft => [ResizeEdge::Right, ResizeEdge::Top],
        Anchor::BottomRight => [ResizeEdge::Left, ResizeEdge::Top],
    }
}

/// The corner diagonally opposite `anchor`.
///
/// Dragging it moves only the two allowed edges.
fn opposite_corner(anchor: Anchor) -> ResizeEdge {
    match anchor {
        Anchor::TopLeft => ResizeEdge::BottomRight,
        Anchor::TopRight => ResizeEdge::BottomLeft,
        Anchor::BottomLeft => ResizeEdge::TopRight,
        Anchor::BottomRight => ResizeEdge::TopLeft,
    }
}

/// Returns whether `edge` may be dragged for a companion pinned at `anchor`.
pub fn allows(anchor: Anchor, edge: ResizeEdge) -> bool {
    allowed_edges(anchor).contains(&edge) || edge == opposite_corner(anchor)
}

/// Full hit-test decision for a resize grab.
///
/// `anchor` is `None` when the companion is not attached to anything.
/// `modifier_held` reflects the resize gesture key, which the caller
/// samples from the OS.
pub fn grab_allowed(anchor: Option<Anchor>, edge: ResizeEdge, modifier_held: bool) -> bool {
    match anchor {
        Some(anchor) => modifier_held && allows(anchor, edge),
        None => false,
    }
}

/// Finds the edge or corner of `rect` under the screen point `(x, y)`.
///
/// `grip` is the thickness of the grab band inside the window border.
/// Corners win over edges. Returns `None` for interior points and for
/// points outside `rect`.
pub fn edge_at(rect: &Rect, x: i32, y: i32, grip: i32) -> Option<ResizeEdge> {
    if x < rect.x || x >= rect.right() || y < rect.y || y >= rect.bottom() {
        return None;
    }
    let left = x < rect.x + grip;
    let right = x >= rect.right() - grip;
    let top = y < rect.y + grip;
    let bottom = y >= rect.bottom() - grip;

    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, ..) => Some(ResizeEdge::Left),
        (_, true, ..) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (.., true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}

/// Per-companion resize bookkeeping.
///
/// While the user is dragging, width requests coming from content
/// auto-sizing are held back and replayed once the drag ends.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResizeState {
    resizing: bool,
    pending_width: Option<i32>,
}

impl ResizeState {
    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    pub fn pending_width(&self) -> Option<i32> {
        self.pending_width
    }

    /// Marks a user resize as started.
    pub fn begin(&mut self) {
        self.resizing = true;
    }

    /// Offers an externally requested width.
    ///
    /// Returns `true` if the width was queued because a user resize is in
    /// progress; the caller applies it directly otherwise. A later request
    /// replaces an earlier queued one.
    pub fn queue_width(&mut self, width: i32) -> bool {
        if self.resizing {
            self.pending_width = Some(width);
        }
        self.resizing
    }

    /// Ends the user resize and hands back any queued width.
    pub fn finish(&mut self) -> Option<i32> {
        self.resizing = false;
        self.pending_width.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_edges_face_away_from_anchor() {
        assert_eq!(
            allowed_edges(Anchor::TopLeft),
            [ResizeEdge::Right, ResizeEdge::Bottom]
        );
        assert_eq!(
            allowed_edges(Anchor::TopRight),
            [ResizeEdge::Left, ResizeEdge::Bottom]
        );
        assert_eq!(
            allowed_edges(Anchor::BottomLeft),
            [ResizeEdge::Right, ResizeEdge::Top]
        );
        assert_eq!(
            allowed_edges(Anchor::BottomRight),
            [ResizeEdge::Left, ResizeEdge::Top]
        );
    }

    #[test]
    fn edges_adjacent_to_anchor_are_rejected() {
        assert!(!allows(Anchor::TopRight, ResizeEdge::Right));
        assert!(!allows(Anchor::TopRight, ResizeEdge::Top));
        assert!(!allows(Anchor::TopRight, ResizeEdge::TopRight));
        assert!(!allows(Anchor::TopRight, ResizeEdge::TopLeft));
        assert!(!allows(Anchor::TopRight, ResizeEdge::BottomRight));
    }

    #[test]
    fn opposite_corner_is_allowed() {
        assert!(allows(Anchor::TopLeft, ResizeEdge::BottomRight));
        assert!(allows(Anchor::BottomRight, ResizeEdge::TopLeft));
        assert!(!allows(Anchor::TopLeft, ResizeEdge::TopLeft));
    }

    #[test]
    fn grab_requires_attachment_and_modifier() {
        assert!(grab_allowed(Some(Anchor::TopLeft), ResizeEdge::Right, true));
        assert!(!grab_allowed(Some(Anchor::TopLeft), ResizeEdge::Right, false));
        assert!(!grab_allowed(None, ResizeEdge::Right, true));
    }

    #[test]
    fn width_is_queued_only_while_resizing() {
        // Arrange
        let mut state = ResizeState::default();

        // Act / Assert
        assert!(!state.queue_width(300));
        assert_eq!(state.pending_width(), None);

        state.begin();
        assert!(state.queue_width(310));
        assert!(state.queue_width(320));
        assert_eq!(state.pending_width(), Some(320));

        assert_eq!(state.finish(), Some(320));
        assert!(!state.is_resizing());
        assert_eq!(state.finish(), None);
    }

    #[test]
    fn edge_at_finds_edges_and_corners() {
        // Arrange
        let rect = Rect::new(100, 100, 200, 40);

        // Act / Assert
        assert_eq!(edge_at(&rect, 102, 120, 6), Some(ResizeEdge::Left));
        assert_eq!(edge_at(&rect, 297, 120, 6), Some(ResizeEdge::Right));
        assert_eq!(edge_at(&rect, 200, 101, 6), Some(ResizeEdge::Top));
        assert_eq!(edge_at(&rect, 200, 138, 6), Some(ResizeEdge::Bottom));
        assert_eq!(edge_at(&rect, 101, 101, 6), Some(ResizeEdge::TopLeft));
        assert_eq!(edge_at(&rect, 299, 139, 6), Some(ResizeEdge::BottomRight));
    }

    #[test]
    fn edge_at_ignores_interior_and_outside_points() {
        let rect = Rect::new(100, 100, 200, 40);
        assert_eq!(edge_at(&rect, 200, 120, 6), None);
        assert_eq!(edge_at(&rect, 99, 120, 6), None);
        assert_eq!(edge_at(&rect, 300, 120, 6), None);
    }
}
