//! Geometry kernel.
//!
//! Points, rectangles and affine transforms in a y-down plane, plus the
//! rotation-aware bounding box and canvas clamping used by every piece.
//! Units are whatever the caller uses; the model stores inches and the
//! renderer converts to pixels at the edge.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Tolerance used when comparing derived floating point geometry.
pub const EPSILON: f64 = 1e-9;

/// A 2D point or vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Origin.
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (*other - *self).length()
    }

    pub fn distance_squared_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Unit vector in the same direction, or `None` for a zero vector.
    pub fn normalized(&self) -> Option<Point> {
        let len = self.length();
        if len <= EPSILON || !len.is_finite() {
            None
        } else {
            Some(Point::new(self.x / len, self.y / len))
        }
    }

    /// Left-hand perpendicular `(-y, x)`.
    pub fn perpendicular(&self) -> Point {
        Point::new(-self.y, self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Width and height of an axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Component-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Size, eps: f64) -> bool {
        (self.width - other.width).abs() <= eps && (self.height - other.height).abs() <= eps
    }
}

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// True when `other` lies inside `self` within `eps`.
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// 2D affine transform in SVG matrix order.
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: dx,
            f: dy,
        }
    }

    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about the origin. Positive angles turn clockwise on a
    /// y-down screen, matching SVG `rotate()`.
    pub fn rotate_deg(degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotation about `center`.
    pub fn rotate_about(degrees: f64, center: Point) -> Self {
        Self::translate(-center.x, -center.y)
            .then(&Self::rotate_deg(degrees))
            .then(&Self::translate(center.x, center.y))
    }

    /// Returns the transform that applies `self` first and `next` second.
    pub fn then(&self, next: &Affine) -> Affine {
        Affine {
            a: next.a * self.a + next.c * self.b,
            b: next.b * self.a + next.d * self.b,
            c: next.a * self.c + next.c * self.d,
            d: next.b * self.c + next.d * self.d,
            e: next.a * self.e + next.c * self.f + next.e,
            f: next.b * self.e + next.d * self.f + next.f,
        }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// Applies only the linear part (for direction vectors).
    pub fn apply_vector(&self, v: Point) -> Point {
        Point::new(self.a * v.x + self.c * v.y, self.b * v.x + self.d * v.y)
    }

    /// Inverse transform, or `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Affine> {
        let det = self.a * self.d - self.b * self.c;
        if det.abs() <= EPSILON || !det.is_finite() {
            return None;
        }
        let inv = 1.0 / det;
        Some(Affine {
            a: self.d * inv,
            b: -self.b * inv,
            c: -self.c * inv,
            d: self.a * inv,
            e: (self.c * self.f - self.d * self.e) * inv,
            f: (self.b * self.e - self.a * self.f) * inv,
        })
    }

    /// Matrix entries as `[a, b, c, d, e, f]`.
    pub fn to_row(&self) -> [f64; 6] {
        [self.a, self.b, self.c, self.d, self.e, self.f]
    }

    pub fn is_identity(&self) -> bool {
        self.to_row()
            .iter()
            .zip(Self::identity().to_row().iter())
            .all(|(l, r)| (l - r).abs() <= EPSILON)
    }
}

/// Clamps `value` into `[lo, hi]`. When `hi < lo` the result is `lo`, and
/// NaN maps to `lo`.
pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    if value.is_nan() {
        return lo;
    }
    value.min(hi).max(lo)
}

/// Normalizes an angle into `[0, 360)`. Non-finite input yields 0.
pub fn normalize_rotation(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let r = degrees.rem_euclid(360.0);
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Axis-aligned bounding box of a `width × height` rectangle rotated by
/// `rotation_deg` about its centre.
///
/// The angle is folded into `[0, 180)` and then into `[0, 90]`; both folds
/// are exact symmetries of a rectangle's bounding box, so
/// `bbox(θ) == bbox(θ + 180) == bbox(180 − θ)`.
pub fn rotated_bounding_box(width: f64, height: f64, rotation_deg: f64) -> Size {
    let mut deg = if rotation_deg.is_finite() {
        rotation_deg.abs() % 180.0
    } else {
        0.0
    };
    if deg > 90.0 {
        deg = 180.0 - deg;
    }
    if deg == 0.0 {
        return Size::new(width.abs(), height.abs());
    }
    if deg == 90.0 {
        return Size::new(height.abs(), width.abs());
    }
    let (sin, cos) = deg.to_radians().sin_cos();
    Size::new(
        (width * cos).abs() + (height * sin).abs(),
        (width * sin).abs() + (height * cos).abs(),
    )
}

/// Clamps a top-left position so a box of `bbox` stays inside
/// `[0, canvas_w] × [0, canvas_h]`.
///
/// A box larger than the canvas along an axis is pinned to 0 on that axis.
pub fn clamp_to_canvas(position: Point, bbox: Size, canvas_w: f64, canvas_h: f64) -> Point {
    let max_x = (canvas_w - bbox.width).max(0.0);
    let max_y = (canvas_h - bbox.height).max(0.0);
    Point::new(
        clamp(position.x, 0.0, max_x),
        clamp(position.y, 0.0, max_y),
    )
}

/// Rounds `value` to the nearest multiple of `step`.
///
/// A non-positive or non-finite step leaves the value unchanged.
pub fn snap_to_grid(value: f64, step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 || !value.is_finite() {
        return value;
    }
    (value / step).round() * step
}

/// Snaps both coordinates of `p` to the grid independently.
pub fn snap_point_to_grid(p: Point, step: f64) -> Point {
    Point::new(snap_to_grid(p.x, step), snap_to_grid(p.y, step))
}
