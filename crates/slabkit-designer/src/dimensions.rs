//! Manual dimension engine: point snapping, offset geometry and the
//! two-click placement tool.

use slabkit_core::{clamp, snap_point_to_grid, Point};

use crate::model::{Dimension, Layout, Piece};

/// Snap radius in inches.
pub const SNAP_RADIUS_IN: f64 = 1.0;
/// Largest perpendicular offset a dimension can be dragged to, in pixels.
pub const MAX_OFFSET_PX: f64 = 300.0;
/// Label distance from the segment, as a multiple of the line offset.
pub const LABEL_OFFSET_FACTOR: f64 = 1.8;

/// What a snapped point latched onto.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapTarget {
    /// One of a piece's eight reference points (corners, then edge
    /// midpoints).
    Piece { piece_id: String, index: usize },
    Grid,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub point: Point,
    pub target: SnapTarget,
}

/// Snaps a raw inch position against the active layout.
pub fn snap_dim_point(layout: &Layout, raw: Point) -> SnapResult {
    snap_dim_point_with(&layout.pieces, layout.grid, raw, SNAP_RADIUS_IN)
}

/// Snaps `raw` to the nearest piece reference point within `radius`, then
/// to the nearest grid intersection within `radius`, else returns it as-is.
///
/// Piece points win over the grid. Among piece points the strictly nearest
/// one wins; on an exact tie the first one found is kept.
pub fn snap_dim_point_with(pieces: &[Piece], grid: f64, raw: Point, radius: f64) -> SnapResult {
    let limit = radius * radius;
    let mut best: Option<(f64, SnapResult)> = None;

    for piece in pieces {
        for (index, point) in piece.reference_points().into_iter().enumerate() {
            let d2 = point.distance_squared_to(&raw);
            if d2 > limit {
                continue;
            }
            if best.as_ref().is_none_or(|(best_d2, _)| d2 < *best_d2) {
                best = Some((
                    d2,
                    SnapResult {
                        point,
                        target: SnapTarget::Piece {
                            piece_id: piece.id.clone(),
                            index,
                        },
                    },
                ));
            }
        }
    }
    if let Some((_, hit)) = best {
        return hit;
    }

    if grid.is_finite() && grid > 0.0 {
        let g = snap_point_to_grid(raw, grid);
        if g.distance_squared_to(&raw) <= limit {
            return SnapResult {
                point: g,
                target: SnapTarget::Grid,
            };
        }
    }

    SnapResult {
        point: raw,
        target: SnapTarget::None,
    }
}

/// Pixel-space drawing geometry of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGeometry {
    /// True endpoints.
    pub p1: Point,
    pub p2: Point,
    /// Unit normal `(-uy, ux)` of the segment.
    pub normal: Point,
    /// Endpoints of the offset dimension line.
    pub q1: Point,
    pub q2: Point,
    pub label_pos: Point,
    /// Label rotation in degrees, kept within ±90 so text reads upright.
    pub label_angle: f64,
    pub label: String,
}

impl DimensionGeometry {
    /// Extension lines from each true endpoint to the offset line.
    pub fn extension_lines(&self) -> [(Point, Point); 2] {
        [(self.p1, self.q1), (self.p2, self.q2)]
    }
}

/// Unit normal of a segment; a zero-length segment uses length 1.
fn segment_normal(p1: Point, p2: Point) -> Point {
    let u = p2 - p1;
    let len = u.length();
    let len = if len > 0.0 && len.is_finite() { len } else { 1.0 };
    Point::new(-u.y / len, u.x / len)
}

fn upright_angle(dim: &Dimension) -> f64 {
    let mut angle = (dim.y2 - dim.y1).atan2(dim.x2 - dim.x1).to_degrees();
    if angle > 90.0 {
        angle -= 180.0;
    } else if angle < -90.0 {
        angle += 180.0;
    }
    angle
}

pub fn dimension_geometry(dim: &Dimension, scale: f64) -> DimensionGeometry {
    let p1 = dim.start() * scale;
    let p2 = dim.end() * scale;
    let normal = segment_normal(p1, p2);
    let off = normal * dim.offset_px;
    DimensionGeometry {
        p1,
        p2,
        normal,
        q1: p1 + off,
        q2: p2 + off,
        label_pos: p1.midpoint(&p2) + off * LABEL_OFFSET_FACTOR,
        label_angle: upright_angle(dim),
        label: dim.label(),
    }
}

/// Captured state of an offset drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionDrag {
    pub dim_id: String,
    /// First endpoint in pixels.
    pub base: Point,
    pub normal: Point,
}

impl DimensionDrag {
    pub fn begin(dim: &Dimension, scale: f64) -> Self {
        let p1 = dim.start() * scale;
        Self {
            dim_id: dim.id.clone(),
            base: p1,
            normal: segment_normal(p1, dim.end() * scale),
        }
    }

    /// New offset for a pointer position: projection onto the normal,
    /// clamped to ±300 px.
    pub fn offset_for(&self, pointer_px: Point) -> f64 {
        clamp(
            (pointer_px - self.base).dot(&self.normal),
            -MAX_OFFSET_PX,
            MAX_OFFSET_PX,
        )
    }
}

/// Result of a click with the dimension tool.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolClick {
    Inactive,
    /// First point stored.
    Started(Point),
    /// Second point placed; the caller creates the dimension.
    Completed { start: Point, end: Point },
}

/// Two-click placement tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DimensionTool {
    active: bool,
    pending: Option<Point>,
}

impl DimensionTool {
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn pending(&self) -> Option<Point> {
        self.pending
    }

    /// Turning the tool off discards a half-finished dimension.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        if !active {
            self.pending = None;
        }
    }

    /// Forgets a stored first point, keeping the tool on.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn toggle(&mut self) -> bool {
        self.set_active(!self.active);
        self.active
    }

    pub fn click(&mut self, layout: &Layout, raw: Point) -> ToolClick {
        if !self.active {
            return ToolClick::Inactive;
        }
        self.place(snap_dim_point(layout, raw).point)
    }

    /// Feeds an already snapped point into the tool.
    pub fn place(&mut self, snapped: Point) -> ToolClick {
        if !self.active {
            return ToolClick::Inactive;
        }
        match self.pending.take() {
            None => {
                self.pending = Some(snapped);
                ToolClick::Started(snapped)
            }
            Some(start) => ToolClick::Completed {
                start,
                end: snapped,
            },
        }
    }

    /// Snap marker position for a hover, or `None` when the tool is off.
    pub fn preview(&self, layout: &Layout, raw: Point) -> Option<Point> {
        self.active.then(|| snap_dim_point(layout, raw).point)
    }
}
