//! Sink placement relative to the host piece's edges.
//!
//! A sink is located in the host piece's local, unrotated frame (origin at
//! the footprint's top-left, inches). `setback` is always measured inward
//! from the chosen edge and `centerline` along the piece's top (front/back)
//! or left (left/right) border. Faucet holes live in the sink's own frame,
//! centred on the sink with y pointing away from its back edge.

use slabkit_core::{normalize_rotation, Affine, Point, Size};

use crate::model::{Piece, Sink, SinkSide, FAUCET_SLOTS};

/// Faucet hole diameter, in inches.
pub const HOLE_DIAMETER: f64 = 1.5;
pub const HOLE_RADIUS: f64 = HOLE_DIAMETER / 2.0;
/// Distance from the sink's back edge to the hole row, in inches.
pub const HOLE_BACKSET: f64 = 2.5;
/// Pitch between adjacent faucet slots, in inches.
pub const HOLE_SPACING: f64 = 2.0;

const CENTER_SLOT: f64 = ((FAUCET_SLOTS - 1) / 2) as f64;

/// Where a sink sits on its piece.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkPose {
    /// Centre in the piece-local frame, inches.
    pub center: Point,
    /// Rotation relative to the piece: side twist plus the sink's own.
    pub local_angle: f64,
    /// Absolute rotation on the canvas, `[0, 360)`.
    pub angle: f64,
    /// Unrotated sink size.
    pub size: Size,
}

/// One enabled faucet hole, in the sink-local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaucetHole {
    pub index: u8,
    pub center: Point,
    pub radius: f64,
}

/// Local centre of a sink on a `piece_w × piece_h` footprint.
pub fn sink_center(piece_w: f64, piece_h: f64, sink: &Sink) -> Point {
    let depth = sink.setback + sink.h / 2.0;
    match sink.side {
        SinkSide::Front => Point::new(sink.centerline, depth),
        SinkSide::Back => Point::new(sink.centerline, piece_h - depth),
        SinkSide::Left => Point::new(depth, sink.centerline),
        SinkSide::Right => Point::new(piece_w - depth, sink.centerline),
    }
}

/// Rotation of the sink relative to its piece.
pub fn sink_local_angle(sink: &Sink) -> f64 {
    let twist = if sink.side.is_lateral() { 90.0 } else { 0.0 };
    sink.rotation + twist
}

pub fn sink_pose(piece: &Piece, sink: &Sink) -> SinkPose {
    let local_angle = sink_local_angle(sink);
    SinkPose {
        center: sink_center(piece.w, piece.h, sink),
        local_angle,
        angle: normalize_rotation(piece.rotation + local_angle),
        size: Size::new(sink.w, sink.h),
    }
}

/// Horizontal offset of a faucet slot from the sink centre.
pub fn faucet_slot_offset(index: u8) -> f64 {
    (index as f64 - CENTER_SLOT) * HOLE_SPACING
}

/// Enabled faucet holes for `sink`, in slot order.
pub fn faucet_holes(sink: &Sink) -> Vec<FaucetHole> {
    let y = -(sink.h / 2.0 + HOLE_BACKSET);
    sink.faucets
        .iter()
        .filter(|&&i| (i as usize) < FAUCET_SLOTS)
        .map(|&index| FaucetHole {
            index,
            center: Point::new(faucet_slot_offset(index), y),
            radius: HOLE_RADIUS,
        })
        .collect()
}

/// Maps sink-local coordinates (origin at the sink centre) to piece-local
/// coordinates, both in pixels at `scale`.
pub fn sink_local_frame(piece: &Piece, sink: &Sink, scale: f64) -> Affine {
    let center = sink_center(piece.w, piece.h, sink);
    Affine::rotate_deg(sink_local_angle(sink))
        .then(&Affine::translate(center.x * scale, center.y * scale))
}

/// Maps sink-local coordinates (origin at the sink centre, pixels at
/// `scale`) to canvas pixels.
pub fn sink_frame(piece: &Piece, sink: &Sink, scale: f64) -> Affine {
    sink_local_frame(piece, sink, scale).then(&piece.frame(scale))
}

/// Sink centre on the canvas, in inches.
pub fn sink_center_on_canvas(piece: &Piece, sink: &Sink) -> Point {
    piece
        .frame(1.0)
        .apply(sink_center(piece.w, piece.h, sink))
}

/// Faucet hole centres on the canvas, in inches.
pub fn faucet_holes_on_canvas(piece: &Piece, sink: &Sink) -> Vec<Point> {
    let frame = sink_frame(piece, sink, 1.0);
    faucet_holes(sink)
        .into_iter()
        .map(|hole| frame.apply(hole.center))
        .collect()
}
