//! Geometry primitives for the view tree.
//!
//! Coordinates are signed pixels. Views may be positioned partly or wholly
//! outside their parent; hit-testing and clipping handle the overhang.
//! Extents are clamped non-negative at construction.

use std::ops::{Add, Sub};

/// A point in screen or parent-relative coordinates.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: i32,
    /// Vertical offset.
    pub y: i32,
}

impl Point {
    /// The origin.
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self { x: v.0, y: v.1 }
    }
}

/// A width/height pair. Extents are never negative.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Expanse {
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Expanse {
    /// Construct an expanse, clamping negative extents to zero.
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// An empty expanse.
    pub fn zero() -> Self {
        Self { w: 0, h: 0 }
    }

    /// True if either extent is zero.
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}

impl From<(i32, i32)> for Expanse {
    #[inline]
    fn from(v: (i32, i32)) -> Self {
        Self::new(v.0, v.1)
    }
}

/// An axis-aligned rectangle. Extents are never negative.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub w: i32,
    /// Height in pixels.
    pub h: i32,
}

impl Rect {
    /// Construct a rect, clamping negative extents to zero.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w: w.max(0),
            h: h.max(0),
        }
    }

    /// The zero rect at the origin.
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Top-left corner.
    pub fn tl(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Width and height.
    pub fn size(&self) -> Expanse {
        Expanse {
            w: self.w,
            h: self.h,
        }
    }

    /// Place this rect's size at a new origin.
    pub fn at(&self, p: Point) -> Self {
        Self::new(p.x, p.y, self.w, self.h)
    }

    /// Shift the rect by an offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }

    /// True if either extent is zero.
    pub fn is_zero(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Does the rect contain the point? Edges are half-open: the left and top
    /// edges are inside, the right and bottom edges are not.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    /// The overlapping region of two rects, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let r = (self.x + self.w).min(other.x + other.w);
        let b = (self.y + self.h).min(other.y + other.h);
        if r > x && b > y {
            Some(Self::new(x, y, r - x, b - y))
        } else {
            None
        }
    }
}

impl From<Expanse> for Rect {
    fn from(e: Expanse) -> Self {
        Self::new(0, 0, e.w, e.h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains_point((10, 10).into()));
        assert!(r.contains_point((14, 14).into()));
        assert!(!r.contains_point((15, 10).into()));
        assert!(!r.contains_point((9, 10).into()));
        assert!(!Rect::zero().contains_point(Point::zero()));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(b.intersect(&a), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&a), Some(a));

        let c = Rect::new(10, 0, 5, 5);
        assert_eq!(a.intersect(&c), None);

        let inner = Rect::new(2, 2, 3, 3);
        assert_eq!(a.intersect(&inner), Some(inner));
    }

    #[test]
    fn clamped_extents() {
        assert_eq!(Rect::new(0, 0, -5, 3), Rect::new(0, 0, 0, 3));
        assert_eq!(Expanse::new(-1, -1), Expanse::zero());
    }
}
