//! Piece operations: creation, properties, layering and canvas settings.

use slabkit_core::{sanitize_number, ModelError};

use super::Editor;
use crate::model::{CornerFlags, Edge, EdgeProfile, Piece};

impl Editor {
    /// Runs `f` on a piece of the active layout, re-clamps it and commits.
    fn edit_piece<R>(
        &mut self,
        id: &str,
        f: impl FnOnce(&mut Piece) -> R,
    ) -> Result<R, ModelError> {
        let layout = self.project.active_layout_mut();
        let (cw, ch) = (layout.cw, layout.ch);
        let piece = layout
            .piece_mut(id)
            .ok_or_else(|| ModelError::not_found("piece", id))?;
        let out = f(piece);
        piece.clamp_to_canvas(cw, ch);
        self.commit();
        Ok(out)
    }

    /// Adds a default piece, selects it and returns its id.
    pub fn add_piece(&mut self) -> String {
        let id = self.layout_mut().add_piece();
        self.project.selection.select_only(&id);
        self.commit();
        id
    }

    pub fn duplicate_piece(&mut self, id: &str) -> Result<String, ModelError> {
        let copy = self.layout_mut().duplicate_piece(id)?;
        self.project.selection.select_only(&copy);
        self.commit();
        Ok(copy)
    }

    pub fn delete_piece(&mut self, id: &str) -> bool {
        if self.layout_mut().remove_piece(id).is_none() {
            return false;
        }
        let project = &mut self.project;
        if let Some(layout) = project.layouts.get(project.active) {
            project.selection.retain_existing(layout);
        }
        self.commit();
        true
    }

    /// Deletes every selected piece. Returns how many were removed.
    pub fn delete_selected_pieces(&mut self) -> usize {
        let ids = self.project.selection.selected_ids.clone();
        let layout = self.project.active_layout_mut();
        let removed = ids
            .iter()
            .filter(|id| layout.remove_piece(id).is_some())
            .count();
        if removed > 0 {
            self.project.selection.clear();
            self.commit();
        }
        removed
    }

    /// Selects a piece; `additive` toggles it within the current selection.
    pub fn select_piece(&mut self, id: &str, additive: bool) -> Result<(), ModelError> {
        if self.layout().piece(id).is_none() {
            return Err(ModelError::not_found("piece", id));
        }
        if additive {
            self.project.selection.toggle(id);
        } else {
            self.project.selection.select_only(id);
        }
        self.touch();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.project.selection.clear();
        self.touch();
    }

    /// Piece shown in the inspector.
    pub fn selected_piece(&self) -> Option<&Piece> {
        let id = self.project.selection.selected_id.as_deref()?;
        self.layout().piece(id)
    }

    pub fn set_piece_name(&mut self, id: &str, name: &str) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.name = name.to_string())
    }

    pub fn set_piece_size(&mut self, id: &str, w: f64, h: f64) -> Result<(), ModelError> {
        self.edit_piece(id, |p| {
            p.set_size(w, h);
            p.clamp_sink_centerlines();
        })
    }

    pub fn set_piece_position(&mut self, id: &str, x: f64, y: f64) -> Result<(), ModelError> {
        self.edit_piece(id, |p| {
            p.x = sanitize_number(x, p.x);
            p.y = sanitize_number(y, p.y);
        })
    }

    pub fn set_piece_rotation(&mut self, id: &str, degrees: f64) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.set_rotation(degrees))
    }

    pub fn set_piece_color(&mut self, id: &str, color: &str) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.color = color.to_string())
    }

    pub fn set_piece_fill_opacity(&mut self, id: &str, opacity: f64) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.set_fill_opacity(opacity))
    }

    pub fn set_piece_no_fill(&mut self, id: &str, no_fill: bool) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.no_fill = no_fill)
    }

    pub fn set_corner_flags(&mut self, id: &str, flags: CornerFlags) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.corner_flags = flags)
    }

    pub fn set_edge_profile(
        &mut self,
        id: &str,
        edge: Edge,
        profile: EdgeProfile,
    ) -> Result<(), ModelError> {
        self.edit_piece(id, |p| p.edge_profiles.set(edge, profile))
    }

    pub fn bring_forward(&mut self, id: &str) -> bool {
        let moved = self.layout_mut().bring_forward(id);
        if moved {
            self.commit();
        }
        moved
    }

    pub fn send_backward(&mut self, id: &str) -> bool {
        let moved = self.layout_mut().send_backward(id);
        if moved {
            self.commit();
        }
        moved
    }

    pub fn snap_all(&mut self) {
        self.layout_mut().snap_all();
        self.commit();
    }

    pub fn set_canvas_size(&mut self, cw: f64, ch: f64) {
        self.layout_mut().set_canvas_size(cw, ch);
        self.commit();
    }

    pub fn set_grid(&mut self, grid: f64) {
        self.layout_mut().set_grid(grid);
        self.commit();
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.layout_mut().set_scale(scale);
        self.commit();
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.layout_mut().show_grid = show;
        self.commit();
    }
}
