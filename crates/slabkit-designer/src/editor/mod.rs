//! Editor state for UI integration.
//! Owns the project, undo history, the dimension tool and the active
//! gesture, and turns UI events into model mutations.
//!
//! This module is split into submodules:
//! - `pieces`: piece creation, properties, layering, canvas settings
//! - `sinks`: sink cutouts and faucets
//! - `overlays`: slab photo overlays
//! - `dimensions`: manual dimension tool
//! - `layouts`: layout list and project details
//! - `history`: undo/redo and snapshot restore
//! - `file_io`: import, export, share links
//! - `input`: pointer and keyboard handling

mod dimensions;
mod file_io;
mod history;
mod input;
mod layouts;
mod overlays;
mod pieces;
mod sinks;

pub use input::{DragState, DragLimits, Key, KeyEvent, Modifiers, PointerTarget};

use slabkit_core::{clamp, Point};

use crate::dimensions::{DimensionTool, MAX_OFFSET_PX, SNAP_RADIUS_IN};
use crate::history::{SnapshotHistory, HISTORY_MAX};
use crate::model::{
    Layout, Project, DEFAULT_DIMENSION_OFFSET_PX, DEFAULT_SLAB_HEIGHT, DEFAULT_SLAB_WIDTH,
};
use crate::overlay_image::{DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DIMENSION};
use crate::serialization::Snapshot;

/// Tunables supplied by the application configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorOptions {
    pub history_depth: usize,
    /// Dimension snap radius, inches.
    pub snap_radius: f64,
    pub max_dimension_offset: f64,
    /// Offset given to newly placed dimensions, pixels.
    pub default_dimension_offset: f64,
    /// Arrow-key step multiplier while shift is held.
    pub nudge_multiplier: f64,
    /// Pointer travel below which a press on the blank canvas is a click.
    pub click_threshold_px: f64,
    pub overlay_max_dimension: u32,
    pub overlay_jpeg_quality: u8,
    /// Slab size given to new overlays, inches.
    pub default_slab_width: f64,
    pub default_slab_height: f64,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            history_depth: HISTORY_MAX,
            snap_radius: SNAP_RADIUS_IN,
            max_dimension_offset: MAX_OFFSET_PX,
            default_dimension_offset: DEFAULT_DIMENSION_OFFSET_PX,
            nudge_multiplier: 4.0,
            click_threshold_px: 4.0,
            overlay_max_dimension: DEFAULT_MAX_DIMENSION,
            overlay_jpeg_quality: DEFAULT_JPEG_QUALITY,
            default_slab_width: DEFAULT_SLAB_WIDTH,
            default_slab_height: DEFAULT_SLAB_HEIGHT,
        }
    }
}

/// Editor state
pub struct Editor {
    pub project: Project,
    pub options: EditorOptions,
    pub dim_tool: DimensionTool,
    pub current_file_path: Option<std::path::PathBuf>,
    pub is_modified: bool,
    pub(crate) history: SnapshotHistory,
    pub(crate) drag: Option<DragState>,
    /// Last hover position of the dimension tool, inches.
    pub(crate) hover: Option<Point>,
    /// Arrow-key nudge waiting for key release to be committed.
    pub(crate) nudge_pending: bool,
    pending_save: bool,
    revision: u64,
}

impl Editor {
    /// Creates an editor with one empty layout dated today.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    pub fn with_options(options: EditorOptions) -> Self {
        let mut project = Project::new();
        project.info.date = chrono::Local::now().format("%Y-%m-%d").to_string();
        Self::from_project(project, options)
    }

    /// Wraps an existing project; the history starts at its current state.
    pub fn from_project(project: Project, options: EditorOptions) -> Self {
        let mut editor = Self {
            project,
            options,
            dim_tool: DimensionTool::default(),
            current_file_path: None,
            is_modified: false,
            history: SnapshotHistory::new(options.history_depth),
            drag: None,
            hover: None,
            nudge_pending: false,
            pending_save: false,
            revision: 0,
        };
        editor.reset_history();
        editor
    }

    pub fn layout(&self) -> &Layout {
        self.project.active_layout()
    }

    pub fn layout_mut(&mut self) -> &mut Layout {
        self.project.active_layout_mut()
    }

    /// Increments on every state change; a UI redraws when it moves.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Marks a visual change that is not yet an undo step.
    pub(crate) fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// Completes an edit: records an undo step and schedules an autosave.
    pub(crate) fn commit(&mut self) {
        self.touch();
        self.is_modified = true;
        self.pending_save = true;
        match Snapshot::capture(&self.project) {
            Ok(snapshot) => {
                self.history.push(snapshot);
            }
            Err(err) => tracing::warn!(error = %err, "history snapshot failed"),
        }
    }

    /// Installs a decoded project and drops gesture state tied to the old one.
    pub(crate) fn swap_project(&mut self, mut project: Project) {
        let limit = self.options.max_dimension_offset;
        for dim in project.layouts.iter_mut().flat_map(|l| l.dims.iter_mut()) {
            dim.offset_px = clamp(dim.offset_px, -limit, limit);
        }
        self.project = project;
        self.drag = None;
        self.hover = None;
        self.nudge_pending = false;
        self.dim_tool.cancel_pending();
    }

    /// Drops the undo stack and starts it from the current state.
    pub(crate) fn reset_history(&mut self) {
        match Snapshot::capture(&self.project) {
            Ok(snapshot) => self.history.reset_to(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "history snapshot failed");
                self.history.clear();
            }
        }
    }

    /// Takes the autosave request raised by the last edits, if any.
    pub fn take_pending_save(&mut self) -> Option<Snapshot> {
        if !std::mem::take(&mut self.pending_save) {
            return None;
        }
        match Snapshot::capture(&self.project) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(error = %err, "autosave snapshot failed");
                None
            }
        }
    }

    pub(crate) fn mark_pending_save(&mut self) {
        self.pending_save = true;
    }

    pub fn has_pending_save(&self) -> bool {
        self.pending_save
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}
