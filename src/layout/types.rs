//! Core geometry types for the layout engine

use std::fmt;

use super::anchor::Axis;

/// Opaque handle to a component registered in a [`LayoutContainer`](super::LayoutContainer)
///
/// Ids come from one process-wide counter and are never reused, so a stale id or
/// one minted by another container is always reported as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub(crate) u64);

impl ComponentId {
    /// Raw numeric value, unique within the process
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along one axis
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

/// Declared (unscaled) or scaled extent of a component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Length along one axis
    pub fn along(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// One-dimensional span: where a component starts on an axis and how long it is
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Extent {
    pub start: f64,
    pub length: f64,
}

impl Extent {
    pub fn new(start: f64, length: f64) -> Self {
        Self { start, length }
    }

    pub fn end(&self) -> f64 {
        self.start + self.length
    }

    pub fn center(&self) -> f64 {
        self.start + self.length / 2.0
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.start && value <= self.end()
    }
}

/// Absolute resolved bounds of a component (post-scale)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create zero-sized bounds at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    pub(crate) fn from_extents(horizontal: Extent, vertical: Extent) -> Self {
        Self::new(
            horizontal.start,
            vertical.start,
            horizontal.length,
            vertical.length,
        )
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounds
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Projection onto one axis
    pub fn extent(&self, axis: Axis) -> Extent {
        match axis {
            Axis::Horizontal => Extent::new(self.x, self.width),
            Axis::Vertical => Extent::new(self.y, self.height),
        }
    }

    /// Check if these bounds contain a point
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }

    /// Bounds moved by a delta
    pub fn translate(&self, delta: Point) -> Bounds {
        Bounds::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Compute the union of two bounds (smallest box containing both)
    pub fn union(&self, other: &Bounds) -> Bounds {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Bounds::new(x, y, right - x, bottom - y)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={} y={} w={} h={}",
            self.x, self.y, self.width, self.height
        )
    }
}
