//! Logical board geometry.
//!
//! All board logic works in a fixed 1920×1080 design space. Scaling to
//! physical screens is a rendering concern and never reaches this module.

// Slot indices are tiny, so index-to-float casts are exact.
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

/// Width of the logical design space.
pub const DESIGN_WIDTH: f32 = 1920.0;
/// Height of the logical design space.
pub const DESIGN_HEIGHT: f32 = 1080.0;

/// Logical width of a tile footprint.
pub const TILE_WIDTH: f32 = 90.0;
/// Logical height of a tile footprint.
pub const TILE_HEIGHT: f32 = 110.0;

/// Horizontal distance between neighbouring columns.
///
/// Neighbours overlap by 5 units, which counts as touching.
pub const COLUMN_STEP: f32 = TILE_WIDTH - 5.0;
/// Vertical distance between neighbouring rows.
pub const ROW_STEP: f32 = TILE_HEIGHT - 12.0;
/// Upward shift applied per layer.
pub const LAYER_RISE: f32 = 12.0;

/// Overlap and contact tolerance, in logical units.
pub const CONTACT_TOLERANCE: f32 = 10.0;

/// Top edge of the board on regular levels.
pub const BOARD_TOP: f32 = 200.0;
/// Top edge of the board on the tutorial levels.
pub const TUTORIAL_BOARD_TOP: f32 = 350.0;

/// Number of slots in the staging buffer.
pub const SLOT_COUNT: usize = 4;
/// Gap between buffer slots.
pub const SLOT_GAP: f32 = 15.0;
/// Top edge of the buffer slots.
pub const SLOT_TOP: f32 = 60.0;

/// Layer assigned to tiles resting in the buffer.
pub const BUFFER_LAYER: u32 = 100;
/// Layer assigned to matched tiles while they merge.
pub const RESOLVING_LAYER: u32 = 200;

/// A point in logical board space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate (grows downwards).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// This point shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle in logical board space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Footprint of a tile whose top-left corner is `origin`.
    #[must_use]
    pub const fn tile_at(origin: Point) -> Self {
        Self::new(origin.x, origin.y, TILE_WIDTH, TILE_HEIGHT)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Check whether the point lies inside (right and bottom edges exclusive).
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Width and height of the intersection with `other`.
    ///
    /// Both are zero when the rectangles do not intersect.
    #[must_use]
    pub fn overlap(&self, other: &Rect) -> (f32, f32) {
        let w = (self.right().min(other.right()) - self.x.max(other.x)).max(0.0);
        let h = (self.bottom().min(other.bottom()) - self.y.max(other.y)).max(0.0);
        if w > 0.0 && h > 0.0 { (w, h) } else { (0.0, 0.0) }
    }
}

/// Total width of the buffer strip.
const SLOT_STRIP_WIDTH: f32 = SLOT_COUNT as f32 * TILE_WIDTH + (SLOT_COUNT as f32 - 1.0) * SLOT_GAP;

/// Top-left corner of buffer slot `index`.
#[must_use]
pub fn slot_origin(index: usize) -> Point {
    let start_x = ((DESIGN_WIDTH - SLOT_STRIP_WIDTH) / 2.0).floor();
    Point::new(start_x + index as f32 * (TILE_WIDTH + SLOT_GAP), SLOT_TOP)
}

/// The rectangle covering all buffer slots, used as a drop target.
#[must_use]
pub fn slot_strip() -> Rect {
    let first = slot_origin(0);
    Rect::new(first.x, first.y, SLOT_STRIP_WIDTH, TILE_HEIGHT)
}

/// Point where two matched tiles fly together before disappearing.
#[must_use]
pub fn merge_point(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, SLOT_TOP - 10.0 + TILE_HEIGHT / 2.0)
}
