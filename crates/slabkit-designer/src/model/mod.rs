//! Entity model for layouts.
//!
//! All lengths are inches; angles are degrees. Entities serialize with the
//! camelCase keys used by project files and share links.

pub mod dimension;
pub mod layout;
pub mod overlay;
pub mod piece;
pub mod project;
pub mod sink;

pub use dimension::{Dimension, DEFAULT_DIMENSION_OFFSET_PX};
pub use layout::{
    Layout, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID, DEFAULT_SCALE, MIN_CANVAS,
    MIN_GRID,
};
pub use overlay::{Overlay, DEFAULT_SLAB_HEIGHT, DEFAULT_SLAB_WIDTH, MAX_OVERLAYS_PER_LAYOUT};
pub use piece::{
    CornerFlags, CornerRadii, Edge, EdgeProfile, EdgeProfiles, Piece, PieceFill, CORNER_RADIUS,
    DEFAULT_PIECE_COLOR,
};
pub use project::{Project, ProjectInfo, Selection, UiToggles};
pub use sink::{
    find_model, Sink, SinkKind, SinkModel, SinkShape, SinkSide, FAUCET_SLOTS, MAX_FAUCET_INDEX,
    MAX_SINKS_PER_PIECE, MAX_SINK_CORNER_RADIUS, SINK_MODELS, SINK_STANDARD_SETBACK,
};

/// Generates a fresh entity id.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
