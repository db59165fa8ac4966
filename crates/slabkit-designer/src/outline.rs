//! Closed outlines shared by the on-screen scene, the overlay mask and hit
//! testing.
//!
//! Outlines are expressed in a local frame; callers pair them with an
//! [`Affine`](slabkit_core::Affine) that places the frame on the canvas.

use slabkit_core::{format_trimmed, Point, Rect};

use crate::model::{CornerRadii, Piece, Sink, SinkShape};
use crate::sink_placement::FaucetHole;

/// Control point factor for approximating a quarter circle with a cubic.
const KAPPA: f64 = 0.552_284_749_830_793_4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outline {
    /// Rectangle whose corners are quadratic curves with the control point
    /// on the sharp corner. Used for piece silhouettes.
    RoundedRect { rect: Rect, radii: CornerRadii },
    /// Rectangle with circular-arc corners. Used for rectangular sinks.
    ArcRect { rect: Rect, radius: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    Circle { center: Point, r: f64 },
}

/// Path command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    Close,
}

impl Outline {
    /// Piece silhouette in piece-local pixels.
    pub fn piece(piece: &Piece, scale: f64) -> Self {
        Outline::RoundedRect {
            rect: Rect::new(0.0, 0.0, piece.w * scale, piece.h * scale),
            radii: piece.corner_radii().scaled(scale),
        }
    }

    /// Sink opening in sink-local pixels (centred on the origin).
    pub fn sink(sink: &Sink, scale: f64) -> Self {
        let (w, h) = (sink.w * scale, sink.h * scale);
        match sink.shape {
            SinkShape::Oval => Outline::Ellipse {
                center: Point::zero(),
                rx: w / 2.0,
                ry: h / 2.0,
            },
            SinkShape::Rect => Outline::ArcRect {
                rect: Rect::new(-w / 2.0, -h / 2.0, w, h),
                radius: sink.effective_corner_radius() * scale,
            },
        }
    }

    /// Faucet hole in sink-local pixels.
    pub fn faucet(hole: &FaucetHole, scale: f64) -> Self {
        Outline::Circle {
            center: hole.center * scale,
            r: hole.radius * scale,
        }
    }

    pub fn bounds(&self) -> Rect {
        match *self {
            Outline::RoundedRect { rect, .. } | Outline::ArcRect { rect, .. } => rect,
            Outline::Ellipse { center, rx, ry } => {
                Rect::new(center.x - rx, center.y - ry, rx * 2.0, ry * 2.0)
            }
            Outline::Circle { center, r } => Rect::new(center.x - r, center.y - r, r * 2.0, r * 2.0),
        }
    }

    /// Point containment in the outline's local frame (boundary inclusive).
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            Outline::RoundedRect { rect, radii } => {
                rect.contains(&p) && !outside_corners(rect, &radii, p, quad_corner_outside)
            }
            Outline::ArcRect { rect, radius } => {
                let radii = CornerRadii::uniform(radius);
                rect.contains(&p) && !outside_corners(rect, &radii, p, arc_corner_outside)
            }
            Outline::Ellipse { center, rx, ry } => {
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let dx = (p.x - center.x) / rx;
                let dy = (p.y - center.y) / ry;
                dx * dx + dy * dy <= 1.0
            }
            Outline::Circle { center, r } => p.distance_squared_to(&center) <= r * r,
        }
    }

    /// Absolute path commands tracing the outline clockwise (y down).
    pub fn segments(&self) -> Vec<PathSegment> {
        match *self {
            Outline::RoundedRect { rect, radii } => rounded_rect_segments(rect, radii),
            Outline::ArcRect { rect, radius } => arc_rect_segments(rect, radius),
            Outline::Ellipse { center, rx, ry } => ellipse_segments(center, rx, ry),
            Outline::Circle { center, r } => ellipse_segments(center, r, r),
        }
    }

    /// SVG path data. Rounded corners use `Q`, arc corners use `A`.
    pub fn svg_path_data(&self) -> String {
        match *self {
            Outline::ArcRect { rect, radius } if radius > 0.0 => arc_rect_svg(rect, radius),
            _ => segments_to_svg(&self.segments()),
        }
    }
}

fn outside_corners(
    rect: Rect,
    radii: &CornerRadii,
    p: Point,
    outside: fn(f64, f64, f64) -> bool,
) -> bool {
    let (l, t, r, b) = (rect.x, rect.y, rect.right(), rect.bottom());
    // distances from each sharp corner, positive inward
    let corners = [
        (radii.tl, p.x - l, p.y - t),
        (radii.tr, r - p.x, p.y - t),
        (radii.br, r - p.x, b - p.y),
        (radii.bl, p.x - l, b - p.y),
    ];
    corners
        .iter()
        .any(|&(radius, u, v)| radius > 0.0 && u < radius && v < radius && outside(radius, u, v))
}

/// Quadratic corner: the curve satisfies `√u + √v = √r`.
fn quad_corner_outside(r: f64, u: f64, v: f64) -> bool {
    u.max(0.0).sqrt() + v.max(0.0).sqrt() < r.sqrt()
}

fn arc_corner_outside(r: f64, u: f64, v: f64) -> bool {
    let dx = r - u;
    let dy = r - v;
    dx * dx + dy * dy > r * r
}

fn rounded_rect_segments(rect: Rect, k: CornerRadii) -> Vec<PathSegment> {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    vec![
        PathSegment::MoveTo(Point::new(x + k.tl, y)),
        PathSegment::LineTo(Point::new(x + w - k.tr, y)),
        PathSegment::QuadTo(Point::new(x + w, y), Point::new(x + w, y + k.tr)),
        PathSegment::LineTo(Point::new(x + w, y + h - k.br)),
        PathSegment::QuadTo(Point::new(x + w, y + h), Point::new(x + w - k.br, y + h)),
        PathSegment::LineTo(Point::new(x + k.bl, y + h)),
        PathSegment::QuadTo(Point::new(x, y + h), Point::new(x, y + h - k.bl)),
        PathSegment::LineTo(Point::new(x, y + k.tl)),
        PathSegment::QuadTo(Point::new(x, y), Point::new(x + k.tl, y)),
        PathSegment::Close,
    ]
}

fn arc_rect_segments(rect: Rect, r: f64) -> Vec<PathSegment> {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let c = r * (1.0 - KAPPA);
    vec![
        PathSegment::MoveTo(Point::new(x + r, y)),
        PathSegment::LineTo(Point::new(x + w - r, y)),
        PathSegment::CubicTo(
            Point::new(x + w - c, y),
            Point::new(x + w, y + c),
            Point::new(x + w, y + r),
        ),
        PathSegment::LineTo(Point::new(x + w, y + h - r)),
        PathSegment::CubicTo(
            Point::new(x + w, y + h - c),
            Point::new(x + w - c, y + h),
            Point::new(x + w - r, y + h),
        ),
        PathSegment::LineTo(Point::new(x + r, y + h)),
        PathSegment::CubicTo(
            Point::new(x + c, y + h),
            Point::new(x, y + h - c),
            Point::new(x, y + h - r),
        ),
        PathSegment::LineTo(Point::new(x, y + r)),
        PathSegment::CubicTo(Point::new(x, y + c), Point::new(x + c, y), Point::new(x + r, y)),
        PathSegment::Close,
    ]
}

fn ellipse_segments(c: Point, rx: f64, ry: f64) -> Vec<PathSegment> {
    let (kx, ky) = (rx * KAPPA, ry * KAPPA);
    vec![
        PathSegment::MoveTo(Point::new(c.x + rx, c.y)),
        PathSegment::CubicTo(
            Point::new(c.x + rx, c.y + ky),
            Point::new(c.x + kx, c.y + ry),
            Point::new(c.x, c.y + ry),
        ),
        PathSegment::CubicTo(
            Point::new(c.x - kx, c.y + ry),
            Point::new(c.x - rx, c.y + ky),
            Point::new(c.x - rx, c.y),
        ),
        PathSegment::CubicTo(
            Point::new(c.x - rx, c.y - ky),
            Point::new(c.x - kx, c.y - ry),
            Point::new(c.x, c.y - ry),
        ),
        PathSegment::CubicTo(
            Point::new(c.x + kx, c.y - ry),
            Point::new(c.x + rx, c.y - ky),
            Point::new(c.x + rx, c.y),
        ),
        PathSegment::Close,
    ]
}

fn pt(p: Point) -> String {
    format!("{},{}", format_trimmed(p.x), format_trimmed(p.y))
}

fn segments_to_svg(segments: &[PathSegment]) -> String {
    let parts: Vec<String> = segments
        .iter()
        .map(|s| match *s {
            PathSegment::MoveTo(p) => format!("M {}", pt(p)),
            PathSegment::LineTo(p) => format!("L {}", pt(p)),
            PathSegment::QuadTo(c, p) => format!("Q {} {}", pt(c), pt(p)),
            PathSegment::CubicTo(c1, c2, p) => format!("C {} {} {}", pt(c1), pt(c2), pt(p)),
            PathSegment::Close => "Z".to_string(),
        })
        .collect();
    parts.join(" ")
}

fn arc_rect_svg(rect: Rect, r: f64) -> String {
    let (x, y, w, h) = (rect.x, rect.y, rect.width, rect.height);
    let n = format_trimmed;
    let arc = |p: Point| format!("A {} {} 0 0 1 {}", n(r), n(r), pt(p));
    [
        format!("M {}", pt(Point::new(x + r, y))),
        format!("H {}", n(x + w - r)),
        arc(Point::new(x + w, y + r)),
        format!("V {}", n(y + h - r)),
        arc(Point::new(x + w - r, y + h)),
        format!("H {}", n(x + r)),
        arc(Point::new(x, y + h - r)),
        format!("V {}", n(y + r)),
        arc(Point::new(x + r, y)),
        "Z".to_string(),
    ]
    .join(" ")
}
