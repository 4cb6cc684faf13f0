//! Pixel-space geometry: points, sizes, rectangles and the wraparound rule.
//!
//! Every entity lives in pixel coordinates. A grid cell is `unit` pixels
//! wide, the play field is `unit * grid` pixels, and movement wraps around
//! the play field edges.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// A pixel coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move point by delta
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        self.translated(other.x, other.y)
    }
}

/// An extent: pixels for a cell, or cell counts for a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> i32 {
        self.width * self.height
    }
}

impl Mul for Size {
    type Output = Size;

    fn mul(self, other: Size) -> Size {
        Size::new(self.width * other.width, self.height * other.height)
    }
}

/// Axis-aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Same rectangle with its top-left corner moved to `origin`
    pub fn moved_to(&self, origin: Point) -> Self {
        Self::from_parts(origin, self.size())
    }

    /// True when the two rectangles share a region of positive area.
    /// Touching edges do not count.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Screen size in pixels for a grid of `grid` cells of `unit` pixels
pub fn screen_size(unit: Size, grid: Size) -> Size {
    unit * grid
}

/// Pixel top-left of the grid cell at `cell`
pub fn cell_origin(unit: Size, cell: Point) -> Point {
    Point::new(cell.x * unit.width, cell.y * unit.height)
}

/// Translate `rect` by `delta`, wrapping each axis independently so the
/// result stays within `[0, screen)`.
pub fn wrap_translate(rect: &Rect, delta: Point, screen: Size) -> Point {
    let moved = rect.origin() + delta;
    Point::new(
        moved.x.rem_euclid(screen.width),
        moved.y.rem_euclid(screen.height),
    )
}
