//! Undo/redo for the editor.

use slabkit_core::ImportError;

use super::Editor;
use crate::serialization::Snapshot;

impl Editor {
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// Steps back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.apply_history_snapshot(&snapshot)
    }

    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.apply_history_snapshot(&snapshot)
    }

    fn apply_history_snapshot(&mut self, snapshot: &Snapshot) -> bool {
        match self.apply_snapshot(snapshot) {
            Ok(()) => {
                self.is_modified = true;
                self.mark_pending_save();
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "history snapshot could not be applied");
                false
            }
        }
    }

    /// Replaces the whole project with a snapshot.
    ///
    /// The snapshot is decoded completely before anything is swapped in;
    /// on error the current state is untouched. History is not recorded
    /// while the snapshot is applied.
    pub fn apply_snapshot(&mut self, snapshot: &Snapshot) -> Result<(), ImportError> {
        let project = snapshot.restore()?;
        self.history.set_quiet(true);
        self.swap_project(project);
        self.history.set_quiet(false);
        self.touch();
        Ok(())
    }
}
