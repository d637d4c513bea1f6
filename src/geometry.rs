//! Planar geometry for arm collision checks.
//!
//! The workspace is the unit square with `y` pointing up; obstacles are
//! axis-aligned rectangles.

use std::fmt;

/// A point in the workspace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The point `length` away from `self` in direction `angle` (radians).
    pub fn offset(self, length: f64, angle: f64) -> Self {
        Self {
            x: self.x + length * angle.cos(),
            y: self.y + length * angle.sin(),
        }
    }

    /// Linear interpolation: `t = 0` gives `self`, `t = 1` gives `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Whether both coordinates lie in `[0, 1]`.
    pub fn in_unit_square(self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Axis-aligned rectangle, closed on all sides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point,
    pub max: Point,
}

impl Rect {
    /// Builds a rectangle from any two opposite corners.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        self.min.lerp(self.max, 0.5)
    }

    /// Whether the segment `a`-`b` touches the rectangle.
    ///
    /// Liang-Barsky clipping: the segment is trimmed against the x and y
    /// slabs in turn and intersects iff something of it survives.
    pub fn intersects_segment(&self, a: Point, b: Point) -> bool {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let mut t_enter: f64 = 0.0;
        let mut t_exit: f64 = 1.0;

        // (direction, distance to the boundary) for left, right, bottom, top
        let slabs = [
            (-dx, a.x - self.min.x),
            (dx, self.max.x - a.x),
            (-dy, a.y - self.min.y),
            (dy, self.max.y - a.y),
        ];
        for (p, q) in slabs {
            if p == 0.0 {
                if q < 0.0 {
                    // parallel to this edge and outside it
                    return false;
                }
                continue;
            }
            let t = q / p;
            if p < 0.0 {
                t_enter = t_enter.max(t);
            } else {
                t_exit = t_exit.min(t);
            }
            if t_enter > t_exit {
                return false;
            }
        }
        true
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({:.3}, {:.3}) - ({:.3}, {:.3})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
