//! Piece: a rectangular slab placed on a layout canvas.
//!
//! `x`/`y` locate the top-left corner of the piece's rotated bounding box.
//! The unrotated `w × h` footprint is centred in that box and rotated about
//! the box centre, so the bounding box is what the canvas clamp acts on.

use serde::{Deserialize, Serialize};
use slabkit_core::{
    clamp, clamp_to_canvas, normalize_rotation, rotated_bounding_box, sanitize_positive,
    snap_to_grid, Affine, ModelError, Point, Rect, Size,
};

use super::sink::{Sink, SinkSide, MAX_SINKS_PER_PIECE};

/// Radius applied to a flagged corner, in inches.
pub const CORNER_RADIUS: f64 = 1.0;

/// Fill colour of a new piece.
pub const DEFAULT_PIECE_COLOR: &str = "#ffffff";

/// Which corners are rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CornerFlags {
    pub tl: bool,
    pub tr: bool,
    pub bl: bool,
    pub br: bool,
}

/// Per-corner radii in whatever unit the caller scaled them to.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CornerRadii {
    pub tl: f64,
    pub tr: f64,
    pub br: f64,
    pub bl: f64,
}

impl CornerRadii {
    pub fn uniform(r: f64) -> Self {
        Self {
            tl: r,
            tr: r,
            br: r,
            bl: r,
        }
    }

    pub fn scaled(&self, k: f64) -> Self {
        Self {
            tl: self.tl * k,
            tr: self.tr * k,
            br: self.br * k,
            bl: self.bl * k,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.tl == 0.0 && self.tr == 0.0 && self.br == 0.0 && self.bl == 0.0
    }
}

/// Side of a piece's unrotated footprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Edge finish called out on the shop drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EdgeProfile {
    #[serde(rename = "", alias = "none")]
    None,
    #[serde(rename = "seam")]
    Seam,
    #[default]
    #[serde(rename = "flat")]
    Flat,
    #[serde(rename = "quarter")]
    Quarter,
    #[serde(rename = "bevel")]
    Bevel,
    #[serde(rename = "HB")]
    HalfBull,
    #[serde(rename = "FB")]
    FullBull,
    #[serde(rename = "OG")]
    Ogee,
    #[serde(rename = "miter")]
    Miter,
}

impl EdgeProfile {
    pub const ALL: [EdgeProfile; 9] = [
        EdgeProfile::None,
        EdgeProfile::Seam,
        EdgeProfile::Flat,
        EdgeProfile::Quarter,
        EdgeProfile::Bevel,
        EdgeProfile::HalfBull,
        EdgeProfile::FullBull,
        EdgeProfile::Ogee,
        EdgeProfile::Miter,
    ];

    /// Stored tag, also the text drawn next to the edge.
    pub fn tag(&self) -> &'static str {
        match self {
            EdgeProfile::None => "",
            EdgeProfile::Seam => "seam",
            EdgeProfile::Flat => "flat",
            EdgeProfile::Quarter => "quarter",
            EdgeProfile::Bevel => "bevel",
            EdgeProfile::HalfBull => "HB",
            EdgeProfile::FullBull => "FB",
            EdgeProfile::Ogee => "OG",
            EdgeProfile::Miter => "miter",
        }
    }

    /// Human readable name for pickers.
    pub fn title(&self) -> &'static str {
        match self {
            EdgeProfile::None => "None",
            EdgeProfile::Seam => "Seam",
            EdgeProfile::Flat => "Flat",
            EdgeProfile::Quarter => "Quarter",
            EdgeProfile::Bevel => "Bevel",
            EdgeProfile::HalfBull => "Half Bull",
            EdgeProfile::FullBull => "Full Bull",
            EdgeProfile::Ogee => "Ogee",
            EdgeProfile::Miter => "Miter",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag == "none" {
            return Some(EdgeProfile::None);
        }
        Self::ALL.iter().copied().find(|p| p.tag() == tag)
    }

    /// Flat and unset edges are not annotated.
    pub fn shows_label(&self) -> bool {
        !matches!(self, EdgeProfile::None | EdgeProfile::Flat)
    }
}

/// Edge profile per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EdgeProfiles {
    pub top: EdgeProfile,
    pub right: EdgeProfile,
    pub bottom: EdgeProfile,
    pub left: EdgeProfile,
}

impl EdgeProfiles {
    pub fn get(&self, edge: Edge) -> EdgeProfile {
        match edge {
            Edge::Top => self.top,
            Edge::Right => self.right,
            Edge::Bottom => self.bottom,
            Edge::Left => self.left,
        }
    }

    pub fn set(&mut self, edge: Edge, profile: EdgeProfile) {
        match edge {
            Edge::Top => self.top = profile,
            Edge::Right => self.right = profile,
            Edge::Bottom => self.bottom = profile,
            Edge::Left => self.left = profile,
        }
    }
}

/// Resolved fill of a piece.
#[derive(Debug, Clone, PartialEq)]
pub enum PieceFill {
    None,
    Solid { color: String, opacity: f64 },
}

/// A rectangular slab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    pub name: String,
    /// Unrotated width in inches.
    pub w: f64,
    /// Unrotated height in inches.
    pub h: f64,
    pub x: f64,
    pub y: f64,
    /// Degrees in `[0, 360)`.
    pub rotation: f64,
    pub color: String,
    pub fill_opacity: f64,
    pub no_fill: bool,
    pub corner_flags: CornerFlags,
    /// Z-order; dense `0..N-1` after normalization.
    pub layer: i64,
    pub edge_profiles: EdgeProfiles,
    pub sinks: Vec<Sink>,
}

impl Piece {
    /// Creates a piece at the origin with default styling.
    pub fn new(id: impl Into<String>, name: impl Into<String>, w: f64, h: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            w: sanitize_positive(w, 1.0),
            h: sanitize_positive(h, 1.0),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            color: DEFAULT_PIECE_COLOR.to_string(),
            fill_opacity: 1.0,
            no_fill: false,
            corner_flags: CornerFlags::default(),
            layer: 0,
            edge_profiles: EdgeProfiles::default(),
            sinks: Vec::new(),
        }
    }

    /// Rotation-aware bounding box size.
    pub fn bounding_box(&self) -> Size {
        rotated_bounding_box(self.w, self.h, self.rotation)
    }

    /// Bounding box placed on the canvas.
    pub fn bounds(&self) -> Rect {
        let bbox = self.bounding_box();
        Rect::new(self.x, self.y, bbox.width, bbox.height)
    }

    /// Centre of rotation (bounding box centre), in inches.
    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Maps piece-local coordinates to canvas pixels.
    ///
    /// The local origin is the unrotated top-left corner of the footprint
    /// and local units are pixels at `scale`. Pass `1.0` for inches.
    pub fn frame(&self, scale: f64) -> Affine {
        let c = self.center();
        let center = Point::new(c.x * scale, c.y * scale);
        let half = Point::new(self.w * scale / 2.0, self.h * scale / 2.0);
        Affine::translate(center.x - half.x, center.y - half.y)
            .then(&Affine::rotate_about(normalize_rotation(self.rotation), center))
    }

    /// Point containment against the rotated footprint (corners squared).
    pub fn contains_point(&self, p: Point) -> bool {
        match self.frame(1.0).inverse() {
            Some(inv) => {
                let local = inv.apply(p);
                local.x >= 0.0 && local.x <= self.w && local.y >= 0.0 && local.y <= self.h
            }
            None => false,
        }
    }

    /// Corner radii in inches.
    pub fn corner_radii(&self) -> CornerRadii {
        let r = |on: bool| if on { CORNER_RADIUS } else { 0.0 };
        CornerRadii {
            tl: r(self.corner_flags.tl),
            tr: r(self.corner_flags.tr),
            br: r(self.corner_flags.br),
            bl: r(self.corner_flags.bl),
        }
    }

    pub fn fill(&self) -> PieceFill {
        if self.no_fill {
            PieceFill::None
        } else {
            PieceFill::Solid {
                color: self.color.clone(),
                opacity: clamp(self.fill_opacity, 0.0, 1.0),
            }
        }
    }

    /// Corners then edge midpoints of the unrotated footprint anchored at
    /// `x`/`y`. Used as dimension snap targets.
    pub fn reference_points(&self) -> [Point; 8] {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.w, self.y + self.h);
        let mx = (x0 + x1) / 2.0;
        let my = (y0 + y1) / 2.0;
        [
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
            Point::new(mx, y0),
            Point::new(mx, y1),
            Point::new(x0, my),
            Point::new(x1, my),
        ]
    }

    /// Keeps the bounding box inside `[0, cw] × [0, ch]`.
    pub fn clamp_to_canvas(&mut self, cw: f64, ch: f64) {
        let pos = clamp_to_canvas(Point::new(self.x, self.y), self.bounding_box(), cw, ch);
        self.x = pos.x;
        self.y = pos.y;
    }

    pub fn snap_to_grid(&mut self, grid: f64) {
        self.x = snap_to_grid(self.x, grid);
        self.y = snap_to_grid(self.y, grid);
    }

    /// Sets the footprint. Invalid values keep the previous dimension.
    pub fn set_size(&mut self, w: f64, h: f64) {
        self.w = sanitize_positive(w, self.w);
        self.h = sanitize_positive(h, self.h);
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = normalize_rotation(degrees);
    }

    pub fn set_fill_opacity(&mut self, opacity: f64) {
        self.fill_opacity = clamp(opacity, 0.0, 1.0);
    }

    /// Length of the edge a sink on `side` measures its centerline along.
    pub fn axis_length(&self, side: SinkSide) -> f64 {
        match side {
            SinkSide::Left | SinkSide::Right => self.h,
            SinkSide::Front | SinkSide::Back => self.w,
        }
    }

    /// Appends a sink, declining when the piece is full.
    pub fn add_sink(&mut self, sink: Sink) -> Result<usize, ModelError> {
        if self.sinks.len() >= MAX_SINKS_PER_PIECE {
            tracing::warn!(piece = %self.id, "sink limit reached, add declined");
            return Err(ModelError::SinkLimit {
                piece_id: self.id.clone(),
                max: MAX_SINKS_PER_PIECE,
            });
        }
        self.sinks.push(sink);
        Ok(self.sinks.len() - 1)
    }

    /// Inserts a copy of the sink at `index` right after it.
    pub fn duplicate_sink(&mut self, index: usize) -> Result<usize, ModelError> {
        let source = self
            .sinks
            .get(index)
            .ok_or_else(|| ModelError::not_found("sink", index.to_string()))?;
        if self.sinks.len() >= MAX_SINKS_PER_PIECE {
            return Err(ModelError::SinkLimit {
                piece_id: self.id.clone(),
                max: MAX_SINKS_PER_PIECE,
            });
        }
        let mut copy = source.clone();
        copy.id = super::new_id();
        self.sinks.insert(index + 1, copy);
        Ok(index + 1)
    }

    pub fn remove_sink(&mut self, index: usize) -> Option<Sink> {
        if index < self.sinks.len() {
            Some(self.sinks.remove(index))
        } else {
            None
        }
    }

    /// Moves a sink to another edge, clamping its centerline to the new axis.
    pub fn set_sink_side(&mut self, index: usize, side: SinkSide) -> Result<(), ModelError> {
        let axis = self.axis_length(side);
        let sink = self
            .sinks
            .get_mut(index)
            .ok_or_else(|| ModelError::not_found("sink", index.to_string()))?;
        sink.side = side;
        sink.set_centerline(sink.centerline, axis);
        Ok(())
    }

    /// Sets a sink centerline clamped to its current edge.
    /// Pulls every sink centerline back onto its edge after a resize.
    pub fn clamp_sink_centerlines(&mut self) {
        for index in 0..self.sinks.len() {
            let axis = self.axis_length(self.sinks[index].side);
            let sink = &mut self.sinks[index];
            let centerline = sink.centerline;
            sink.set_centerline(centerline, axis);
        }
    }

    pub fn set_sink_centerline(&mut self, index: usize, value: f64) -> Result<(), ModelError> {
        let side = self
            .sinks
            .get(index)
            .map(|s| s.side)
            .ok_or_else(|| ModelError::not_found("sink", index.to_string()))?;
        let axis = self.axis_length(side);
        if let Some(sink) = self.sinks.get_mut(index) {
            sink.set_centerline(value, axis);
        }
        Ok(())
    }
}
