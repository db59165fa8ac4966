//! File operations for the editor: JSON import/export, project files,
//! share links, autosave recovery and the starter layout.

use std::path::Path;

use anyhow::{Context, Result};
use slabkit_core::{ImportError, ShareError};

use super::Editor;
use crate::migration;
use crate::model::Project;
use crate::serialization::{export_project, ProjectFile, Snapshot};
use crate::share::{decode_token, encode_project, ShareVersion};

impl Editor {
    /// Swaps in a fully decoded project and records it as an undo step.
    fn replace_project(&mut self, project: Project) {
        self.swap_project(project);
        self.commit();
    }

    /// Pretty project JSON for download.
    pub fn export_json(&self) -> serde_json::Result<String> {
        export_project(&self.project)
    }

    /// Imports project JSON or a legacy single layout.
    ///
    /// A legacy layout only replaces the active layout's content. The
    /// current project is untouched when the payload is rejected.
    pub fn import_json(&mut self, text: &str) -> Result<(), ImportError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ImportError::from_json(&e))?;
        let project = migration::import_over(&self.project, &value).inspect_err(|err| {
            tracing::warn!(error = %err, "import rejected");
        })?;
        self.replace_project(project);
        tracing::info!(layouts = self.project.layouts.len(), "project imported");
        Ok(())
    }

    /// Replaces the active layout with the bundled sample kitchen.
    pub fn load_starter(&mut self) -> Result<(), ImportError> {
        let mut project = self.project.clone();
        migration::load_starter(&mut project)?;
        self.replace_project(project);
        Ok(())
    }

    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        ProjectFile::from_project(&self.project).save_to_file(path)?;
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        tracing::info!(path = %path.display(), "project saved");
        Ok(())
    }

    /// Opens a project file; the undo history starts over from it.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let project = ProjectFile::load_from_file(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        self.replace_project(project);
        self.reset_history();
        self.current_file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    /// Encodes the whole project as a `v2=` share token.
    pub fn share_token(&self) -> Result<String, ShareError> {
        encode_project(&self.project)
    }

    /// Loads a share token from a link fragment.
    pub fn load_share_token(&mut self, token: &str) -> slabkit_core::Result<()> {
        let payload = decode_token(token).inspect_err(|err| {
            tracing::warn!(error = %err, "share link could not be decoded");
        })?;
        let project = match payload.version {
            ShareVersion::V2 => Snapshot::from_json(payload.json).restore()?,
            ShareVersion::V1 => {
                let value: serde_json::Value = serde_json::from_str(&payload.json)
                    .map_err(|e| ImportError::from_json(&e))?;
                migration::import_over(&self.project, &value)?
            }
        };
        self.replace_project(project);
        tracing::info!("share link loaded");
        Ok(())
    }

    /// Restores an autosaved snapshot as the start of a fresh history.
    pub fn restore_autosave(&mut self, snapshot: &Snapshot) -> Result<(), ImportError> {
        self.apply_snapshot(snapshot)?;
        self.reset_history();
        Ok(())
    }
}
