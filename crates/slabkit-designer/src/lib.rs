//! # SlabKit Designer
//!
//! Drawing model and algorithms for countertop slab layouts: pieces with
//! sink cutouts and faucet holes, slab photo overlays clipped to the
//! pieces, manual dimensions, undo history and the project/share formats.
//!
//! ## Architecture
//!
//! ```text
//! Project
//!   └── Layouts (canvas, grid, scale)
//!         ├── Pieces ── Sinks ── Faucets
//!         ├── Dimensions
//!         └── Overlays
//!
//! Editor (selection, gestures, dimension tool, history)
//!
//! Scene (pixel-space primitives) ── SVG / mask raster
//!
//! Serialization ── Migration ── Share tokens
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use slabkit_designer::{render_scene, to_svg, Editor, SceneOptions};
//!
//! let mut editor = Editor::new();
//! let piece = editor.add_piece();
//! editor.add_sink(&piece)?;
//!
//! let scene = render_scene(&editor.project, editor.project.active, &SceneOptions::default())?;
//! let svg = to_svg(&scene);
//! ```

pub mod dimensions;
pub mod history;
pub mod mask_raster;
pub mod migration;
pub mod model;
pub mod outline;
pub mod overlay_image;
pub mod overlay_mask;
pub mod scene;
pub mod serialization;
pub mod share;
pub mod sink_placement;
pub mod svg_renderer;

// Editor state for UI integration
pub mod editor;

pub use dimensions::{
    dimension_geometry, snap_dim_point, snap_dim_point_with, DimensionDrag, DimensionGeometry,
    DimensionTool, SnapResult, SnapTarget, ToolClick,
};
pub use history::{SnapshotHistory, HISTORY_MAX};
pub use mask_raster::{encode_png, rasterize_mask};
pub use migration::{migrate, STARTER_LAYOUT};
pub use model::{
    find_model, Dimension, Edge, EdgeProfile, Layout, Overlay, Piece, Project, ProjectInfo,
    Selection, Sink, SinkKind, SinkModel, SinkShape, SinkSide, UiToggles, SINK_MODELS,
};
pub use outline::{Outline, PathSegment};
pub use overlay_image::{OverlayPreset, PreparedImage};
pub use overlay_mask::{build_overlay_clip, build_overlay_mask, MaskElement, MaskGeometry, MaskPaint};
pub use scene::{render_scene, Primitive, Scene, SceneOptions};
pub use serialization::{export_project, import_project, ProjectFile, Snapshot, PROJECT_FILE_VERSION};
pub use share::{decode_token, encode_project, encode_token, SharePayload, ShareVersion};
pub use sink_placement::{faucet_holes, sink_center, sink_pose, FaucetHole, SinkPose};
pub use svg_renderer::to_svg;

pub use editor::{Editor, EditorOptions};
