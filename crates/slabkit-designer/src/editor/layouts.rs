//! Layout list, project details and annotation toggles.

use slabkit_core::ModelError;

use super::Editor;
use crate::model::UiToggles;

impl Editor {
    /// Creates an empty layout and makes it active.
    pub fn add_layout(&mut self) -> usize {
        let index = self.project.add_layout();
        self.end_gesture();
        self.commit();
        index
    }

    pub fn duplicate_layout(&mut self, index: usize) -> Result<usize, ModelError> {
        let copy = self.project.duplicate_layout(index)?;
        self.end_gesture();
        self.commit();
        Ok(copy)
    }

    /// Deletes a layout. The last remaining layout cannot be deleted.
    pub fn delete_layout(&mut self, index: usize) -> Result<(), ModelError> {
        self.project.delete_layout(index)?;
        self.end_gesture();
        self.commit();
        Ok(())
    }

    pub fn set_active_layout(&mut self, index: usize) -> Result<(), ModelError> {
        self.project.set_active(index)?;
        self.end_gesture();
        self.commit();
        Ok(())
    }

    pub fn rename_layout(&mut self, index: usize, name: &str) -> Result<(), ModelError> {
        self.project.rename_layout(index, name)?;
        self.commit();
        Ok(())
    }

    /// Starts over with a single empty layout and blank project details.
    pub fn reset_project(&mut self) {
        self.project.reset();
        self.end_gesture();
        self.current_file_path = None;
        self.commit();
    }

    pub fn set_project_name(&mut self, name: &str) {
        self.project.info.name = name.to_string();
        self.commit();
    }

    pub fn set_project_date(&mut self, date: &str) {
        self.project.info.date = date.to_string();
        self.commit();
    }

    pub fn set_project_notes(&mut self, notes: &str) {
        self.project.info.notes = notes.to_string();
        self.commit();
    }

    pub fn set_ui_toggles(&mut self, ui: UiToggles) {
        self.project.ui = ui;
        self.commit();
    }

    /// Drops any gesture or tool state tied to the previous layout.
    fn end_gesture(&mut self) {
        self.drag = None;
        self.hover = None;
        self.nudge_pending = false;
        self.dim_tool.cancel_pending();
    }
}
