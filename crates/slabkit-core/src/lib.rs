//! # SlabKit Core
//!
//! Core types and utilities shared by the SlabKit crates: the geometry
//! kernel (points, affine transforms, rotation-aware bounding boxes and
//! canvas clamping), inch/pixel unit helpers and the error types.

pub mod error;
pub mod geometry;
pub mod units;

pub use error::{Error, ImportError, ModelError, OverlayError, Result, ShareError};

pub use geometry::{
    clamp, clamp_to_canvas, normalize_rotation, rotated_bounding_box, snap_point_to_grid,
    snap_to_grid, Affine, Point, Rect, Size, EPSILON,
};

pub use units::{
    format_inches, format_trimmed, inches_to_pixels, pixels_to_inches,
    sanitize_non_negative, sanitize_number, sanitize_positive,
};
