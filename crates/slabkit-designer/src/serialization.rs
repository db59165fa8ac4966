//! Serialization and deserialization for project files.
//!
//! Project files are pretty-printed JSON holding every layout, the active
//! index, project metadata and the annotation toggles. Loading goes through
//! [`crate::migration`], so older and legacy single-layout files open too.
//! Snapshots are the compact in-memory form used by undo history and share
//! links; they also carry the selection.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slabkit_core::ImportError;
use std::path::Path;

use crate::migration;
use crate::model::{Layout, Project, ProjectInfo, UiToggles};

/// Project file format version written by this build.
pub const PROJECT_FILE_VERSION: u64 = 3;

/// Complete project file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectFile {
    pub version: u64,
    pub project: ProjectInfo,
    pub layouts: Vec<Layout>,
    pub active: usize,
    pub ui: FileUi,
}

/// Display settings stored alongside the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUi {
    /// Grid visibility of the active layout at save time.
    pub show_grid: bool,
    #[serde(flatten)]
    pub toggles: UiToggles,
}

impl ProjectFile {
    pub fn from_project(project: &Project) -> Self {
        Self {
            version: PROJECT_FILE_VERSION,
            project: project.info.clone(),
            layouts: project.layouts.clone(),
            active: project.active,
            ui: FileUi {
                show_grid: project.active_layout().show_grid,
                toggles: project.ui,
            },
        }
    }

    /// Save project to file
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize project")?;

        std::fs::write(path.as_ref(), json).context("Failed to write project file")?;

        Ok(())
    }

    /// Load and migrate a project file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Project> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read project file")?;

        let project = import_project(&content).context("Failed to parse project file")?;

        tracing::info!(
            path = %path.as_ref().display(),
            layouts = project.layouts.len(),
            "project loaded"
        );
        Ok(project)
    }
}

/// Pretty JSON for a project file download.
pub fn export_project(project: &Project) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ProjectFile::from_project(project))
}

/// Parses and migrates project JSON of any supported vintage.
pub fn import_project(text: &str) -> Result<Project, ImportError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportError::from_json(&e))?;
    migration::migrate(&value)
}

/// Compact serialized copy of a whole project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(String);

impl Snapshot {
    pub fn from_json(json: String) -> Self {
        Self(json)
    }

    pub fn capture(project: &Project) -> serde_json::Result<Self> {
        serde_json::to_string(project).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Decodes the snapshot back into a project.
    ///
    /// Snapshots produced by [`Snapshot::capture`] decode directly; anything
    /// else (older share links, hand-edited payloads) goes through migration.
    pub fn restore(&self) -> Result<Project, ImportError> {
        match serde_json::from_str::<Project>(&self.0) {
            Ok(mut project) => {
                project.ensure_valid();
                Ok(project)
            }
            Err(err) => {
                tracing::debug!(error = %err, "snapshot is not current, migrating");
                import_project(&self.0)
            }
        }
    }
}
