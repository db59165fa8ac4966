//! # SlabKit
//!
//! Countertop and slab layout editor core:
//! - Pieces with rotation, corner flags and edge profiles
//! - Sink cutouts placed by side, centerline and setback, with faucet holes
//! - Slab photo overlays clipped to the pieces
//! - Manual dimensions with vertex/midpoint/grid snapping
//! - Multi-layout projects with undo history, autosave and share links
//!
//! ## Architecture
//!
//! SlabKit is organized as a workspace with multiple crates:
//!
//! 1. **slabkit-core** - Errors, units, numeric sanitising, geometry kernel
//! 2. **slabkit-designer** - Layout model, placement, masks, history, file formats, editor
//! 3. **slabkit-settings** - Configuration and autosave
//! 4. **slabkit** - Command line tool that integrates all crates

pub mod cli;

pub use slabkit_designer as designer;
pub use slabkit_settings as settings;

pub use slabkit_core::{Error, ImportError, ModelError, Point, Rect, Result, ShareError};

pub use slabkit_designer::{
    render_scene, to_svg, Editor, EditorOptions, Layout, Piece, Project, Scene, SceneOptions,
    Sink, Snapshot,
};

pub use slabkit_settings::{Autosaver, Config};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, so command output on stdout stays clean
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
