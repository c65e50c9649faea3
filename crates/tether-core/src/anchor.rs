//! Corner anchoring geometry.
//!
//! Pure functions that place a companion of a given size against one
//! corner of a target rectangle. Nothing here touches the OS, so the
//! placement rules are fully unit-tested.

use serde::{Deserialize, Serialize};

use crate::{Rect, Size};

/// The corner of the target window a companion is pinned to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 4] = [
        Anchor::TopLeft,
        Anchor::TopRight,
        Anchor::BottomLeft,
        Anchor::BottomRight,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Parses `top-left`, `top_right`, `BottomLeft` and similar spellings.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "topleft" => Some(Self::TopLeft),
            "topright" => Some(Self::TopRight),
            "bottomleft" => Some(Self::BottomLeft),
            "bottomright" => Some(Self::BottomRight),
            _ => None,
        }
    }

    /// Whether the anchored corner is on the left edge.
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// Whether the anchored corner is on the top edge.
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }
}

/// User adjustment applied after corner placement, in pixels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Insets between the target's corner and the companion's corner.
///
/// The top inset is larger than the bottom one so a top-anchored
/// companion clears the target's title strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub horizontal: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margins {
    pub fn new(horizontal: i32, top: i32, bottom: i32) -> Self {
        Self {
            horizontal,
            top,
            bottom,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(12, 40, 16)
    }
}

/// Computes where a companion of `size` goes relative to `target`.
///
/// The companion's corner matching `anchor` is placed on the target's
/// matching corner, moved inward by `margins`, then shifted by `offset`
/// and rounded to whole pixels. The returned rectangle carries `size`
/// unchanged.
pub fn calc_position(
    target: &Rect,
    size: Size,
    anchor: Anchor,
    margins: Margins,
    offset: Offset,
) -> Rect {
    let x = if anchor.is_left() {
        target.x + margins.horizontal
    } else {
        target.right() - size.width - margins.horizontal
    };
    let y = if anchor.is_top() {
        target.y + margins.top
    } else {
        target.bottom() - size.height - margins.bottom
    };

    Rect::new(
        (f64::from(x) + offset.dx).round() as i32,
        (f64::from(y) + offset.dy).round() as i32,
        size.width,
        size.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Rect {
        Rect::new(100, 100, 800, 600)
    }

    #[test]
    fn top_right_example() {
        // Act
        let placed = calc_position(
            &target(),
            Size::new(200, 40),
            Anchor::TopRight,
            Margins::default(),
            Offset::default(),
        );

        // Assert
        assert_eq!((placed.x, placed.y), (688, 140));
        assert_eq!((placed.width, placed.height), (200, 40));
    }

    #[test]
    fn bottom_left_example_with_offset() {
        // Act
        let placed = calc_position(
            &target(),
            Size::new(200, 40),
            Anchor::BottomLeft,
            Margins::default(),
            Offset::new(5.0, -5.0),
        );

        // Assert
        assert_eq!((placed.x, placed.y), (117, 639));
    }

    #[test]
    fn top_left_and_bottom_right_corners() {
        // Arrange
        let size = Size::new(200, 40);
        let margins = Margins::default();

        // Act
        let tl = calc_position(&target(), size, Anchor::TopLeft, margins, Offset::default());
        let br = calc_position(
            &target(),
            size,
            Anchor::BottomRight,
            margins,
            Offset::default(),
        );

        // Assert
        assert_eq!((tl.x, tl.y), (112, 140));
        assert_eq!((br.x, br.y), (688, 644));
    }

    #[test]
    fn anchored_corner_lands_on_target_corner_plus_margin_and_offset() {
        // Arrange
        let targets = [
            Rect::new(0, 0, 640, 480),
            Rect::new(-1920, 200, 1280, 1024),
            Rect::new(333, -17, 97, 51),
        ];
        let sizes = [Size::new(200, 40), Size::new(1, 1), Size::new(500, 300)];
        let offsets = [
            Offset::default(),
            Offset::new(7.0, -3.0),
            Offset::new(-25.0, 40.0),
        ];
        let margins = Margins::new(9, 33, 5);

        for t in targets {
            for s in sizes {
                for o in offsets {
                    for anchor in Anchor::ALL {
                        // Act
                        let placed = calc_position(&t, s, anchor, margins, o);

                        // Assert
                        let (dx, dy) = (o.dx as i32, o.dy as i32);
                        if anchor.is_left() {
                            assert_eq!(placed.x, t.x + margins.horizontal + dx);
                        } else {
                            assert_eq!(placed.right(), t.right() - margins.horizontal + dx);
                        }
                        if anchor.is_top() {
                            assert_eq!(placed.y, t.y + margins.top + dy);
                        } else {
                            assert_eq!(placed.bottom(), t.bottom() - margins.bottom + dy);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn same_inputs_give_same_output() {
        // Arrange
        let offset = Offset::new(2.4, -7.6);

        // Act
        let a = calc_position(
            &target(),
            Size::new(180, 44),
            Anchor::BottomRight,
            Margins::default(),
            offset,
        );
        let b = calc_position(
            &target(),
            Size::new(180, 44),
            Anchor::BottomRight,
            Margins::default(),
            offset,
        );

        // Assert
        assert_eq!(a, b);
    }

    #[test]
    fn fractional_offsets_round_to_nearest_pixel() {
        // Act
        let placed = calc_position(
            &target(),
            Size::new(200, 40),
            Anchor::TopLeft,
            Margins::default(),
            Offset::new(2.5, -0.4),
        );

        // Assert
        assert_eq!((placed.x, placed.y), (115, 140));
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(Anchor::parse("top-left"), Some(Anchor::TopLeft));
        assert_eq!(Anchor::parse("TOP_RIGHT"), Some(Anchor::TopRight));
        assert_eq!(Anchor::parse("BottomLeft"), Some(Anchor::BottomLeft));
        assert_eq!(Anchor::parse("bottom right"), Some(Anchor::BottomRight));
        assert_eq!(Anchor::parse("middle"), None);
    }

    #[test]
    fn anchor_serializes_kebab_case() {
        // Act
        let json = serde_json::to_string(&Anchor::BottomRight).unwrap();

        // Assert
        assert_eq!(json, "\"bottom-right\"");
        for anchor in Anchor::ALL {
            assert_eq!(
                serde_json::to_string(&anchor).unwrap(),
                format!("\"{}\"", anchor.as_str())
            );
        }
    }
}
