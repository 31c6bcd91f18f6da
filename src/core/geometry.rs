//=========================================================================
// Geometry
//=========================================================================
//
// Integer pixel geometry shared by every subsystem.
//
// All positions are whole pixels (`i32`). World scroll adds and subtracts
// the same integer speed every frame, so undoing a move restores the exact
// previous position no matter how many times it is repeated.
//
//=========================================================================

//=== External Dependencies ===============================================

use serde::{Deserialize, Serialize};

//=== Point ===============================================================

/// Top-left anchored position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Shifts the point in place by `(dx, dy)`.
    #[inline]
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }
}

//=== Size ================================================================

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if both dimensions are strictly positive.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

//=== Rect ================================================================

/// Axis-aligned rectangle with a top-left `position`.
///
/// Width and height are always strictly positive. Two rectangles are only
/// comparable when they live in the same coordinate space; obstacles and
/// the player hitbox are both expressed in screen pixels because the world
/// is scrolled underneath a screen-fixed player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub position: Point,
    width: i32,
    height: i32,
}

impl Rect {
    /// Creates a rectangle at `(x, y)` with the given size.
    ///
    /// # Panics
    ///
    /// Panics if `width <= 0` or `height <= 0`.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Rect dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self {
            position: Point::new(x, y),
            width,
            height,
        }
    }

    /// Creates a rectangle from a position and a size.
    ///
    /// # Panics
    ///
    /// Panics if the size is not strictly positive.
    pub fn from_parts(position: Point, size: Size) -> Self {
        Self::new(position.x, position.y, size.width, size.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.position.x
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.position.y
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.position.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.position.y + self.height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
