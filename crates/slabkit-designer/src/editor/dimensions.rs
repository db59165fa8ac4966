//! Manual dimension tool and dimension edits.

use slabkit_core::{clamp, ModelError, Point};

use super::Editor;
use crate::dimensions::{snap_dim_point_with, SnapResult};

impl Editor {
    /// Turns the two-click tool on or off. Off discards a pending start.
    pub fn set_dimension_tool(&mut self, active: bool) {
        self.dim_tool.set_active(active);
        if !active {
            self.hover = None;
        }
        self.touch();
    }

    pub fn toggle_dimension_tool(&mut self) -> bool {
        let active = !self.dim_tool.is_active();
        self.set_dimension_tool(active);
        active
    }

    /// Tracks the pointer while the tool is active so the snap marker can
    /// be drawn.
    pub(crate) fn update_dimension_hover(&mut self, raw: Point) {
        self.hover = Some(raw);
        self.touch();
    }

    /// Where the next tool click would land, if the tool is active.
    pub fn dimension_preview(&self) -> Option<SnapResult> {
        if !self.dim_tool.is_active() {
            return None;
        }
        let raw = self.hover?;
        let layout = self.layout();
        Some(snap_dim_point_with(
            &layout.pieces,
            layout.grid,
            raw,
            self.options.snap_radius,
        ))
    }

    /// Places a tool point at an inch position, as a click would.
    pub fn click_dimension_tool(&mut self, raw: Point) -> crate::dimensions::ToolClick {
        self.place_dimension_point(raw)
    }

    pub fn select_dimension(&mut self, id: &str) -> Result<(), ModelError> {
        if self.layout().dimension(id).is_none() {
            return Err(ModelError::not_found("dimension", id));
        }
        self.project.selection.select_dimension(id);
        self.touch();
        Ok(())
    }

    pub fn remove_dimension(&mut self, id: &str) -> bool {
        if self.layout_mut().remove_dimension(id).is_none() {
            return false;
        }
        if self.project.selection.selected_dim_id.as_deref() == Some(id) {
            self.project.selection.clear_dimension();
        }
        self.commit();
        true
    }

    /// Removes the selected dimension, if any.
    pub fn delete_selected_dimension(&mut self) -> bool {
        match self.project.selection.selected_dim_id.clone() {
            Some(id) => self.remove_dimension(&id),
            None => false,
        }
    }

    pub fn set_dimension_offset(&mut self, id: &str, offset_px: f64) -> Result<(), ModelError> {
        let limit = self.options.max_dimension_offset;
        let dim = self
            .layout_mut()
            .dimension_mut(id)
            .ok_or_else(|| ModelError::not_found("dimension", id))?;
        dim.offset_px = clamp(offset_px, -limit, limit);
        self.commit();
        Ok(())
    }
}
