//! Project container: layouts, the active layout and the selection.
//!
//! The active layout is always addressed through [`Project::active`]; no
//! mutator relies on ambient "current layout" state.

use serde::{Deserialize, Serialize};
use slabkit_core::ModelError;

use super::layout::Layout;
use super::new_id;

/// Header text shown on exported sheets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: String,
    pub date: String,
    pub notes: String,
}

/// Annotation visibility toggles shared by all layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiToggles {
    pub show_dims: bool,
    pub show_manual_dims: bool,
    pub show_edge_profiles: bool,
    pub show_labels: bool,
}

impl Default for UiToggles {
    fn default() -> Self {
        Self {
            show_dims: true,
            show_manual_dims: true,
            show_edge_profiles: true,
            show_labels: true,
        }
    }
}

/// Selected pieces (insertion ordered, unique) and selected dimension.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Selection {
    pub selected_ids: Vec<String>,
    /// Last entry of `selected_ids`; drives the piece inspector.
    pub selected_id: Option<String>,
    pub selected_dim_id: Option<String>,
}

impl Selection {
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_ids.iter().any(|s| s == id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty() && self.selected_dim_id.is_none()
    }

    pub fn select_only(&mut self, id: &str) {
        self.selected_ids = vec![id.to_string()];
        self.selected_dim_id = None;
        self.sync();
    }

    /// Adds or removes a piece (shift-click).
    pub fn toggle(&mut self, id: &str) {
        if let Some(pos) = self.selected_ids.iter().position(|s| s == id) {
            self.selected_ids.remove(pos);
        } else {
            self.selected_ids.push(id.to_string());
        }
        self.selected_dim_id = None;
        self.sync();
    }

    pub fn select_dimension(&mut self, id: &str) {
        self.selected_ids.clear();
        self.selected_dim_id = Some(id.to_string());
        self.sync();
    }

    pub fn clear(&mut self) {
        self.selected_ids.clear();
        self.selected_dim_id = None;
        self.sync();
    }

    pub fn clear_dimension(&mut self) {
        self.selected_dim_id = None;
    }

    /// Drops ids that no longer exist in `layout`.
    pub fn retain_existing(&mut self, layout: &Layout) {
        self.selected_ids.retain(|id| layout.piece(id).is_some());
        if let Some(dim) = &self.selected_dim_id {
            if layout.dimension(dim).is_none() {
                self.selected_dim_id = None;
            }
        }
        self.sync();
    }

    fn sync(&mut self) {
        self.selected_id = self.selected_ids.last().cloned();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "project")]
    pub info: ProjectInfo,
    pub layouts: Vec<Layout>,
    /// Index into `layouts`.
    pub active: usize,
    pub ui: UiToggles,
    #[serde(default)]
    pub selection: Selection,
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl Project {
    /// A project with one empty layout.
    pub fn new() -> Self {
        Self {
            info: ProjectInfo::default(),
            layouts: vec![Layout::new(new_id(), "Layout 1")],
            active: 0,
            ui: UiToggles::default(),
            selection: Selection::default(),
        }
    }

    pub fn active_layout(&self) -> &Layout {
        // `layouts` is never empty and `active` is kept in range
        &self.layouts[self.active.min(self.layouts.len().saturating_sub(1))]
    }

    pub fn active_layout_mut(&mut self) -> &mut Layout {
        let index = self.active.min(self.layouts.len().saturating_sub(1));
        &mut self.layouts[index]
    }

    pub fn layout(&self, index: usize) -> Option<&Layout> {
        self.layouts.get(index)
    }

    /// Appends a fresh layout and activates it.
    pub fn add_layout(&mut self) -> usize {
        let name = format!("Layout {}", self.layouts.len() + 1);
        self.layouts.push(Layout::new(new_id(), name));
        let index = self.layouts.len() - 1;
        self.activate(index);
        index
    }

    /// Deep copy inserted after the source with fresh ids, then activated.
    pub fn duplicate_layout(&mut self, index: usize) -> Result<usize, ModelError> {
        let source = self
            .layouts
            .get(index)
            .ok_or_else(|| ModelError::not_found("layout", index.to_string()))?;
        let mut copy = source.clone();
        copy.id = new_id();
        copy.name = format!("{} Copy", source.name);
        for piece in &mut copy.pieces {
            piece.id = new_id();
            for sink in &mut piece.sinks {
                sink.id = new_id();
            }
        }
        for dim in &mut copy.dims {
            dim.id = new_id();
        }
        for overlay in &mut copy.overlays {
            overlay.id = new_id();
        }
        self.layouts.insert(index + 1, copy);
        self.activate(index + 1);
        Ok(index + 1)
    }

    /// Removes a layout. The last remaining layout cannot be deleted.
    pub fn delete_layout(&mut self, index: usize) -> Result<Layout, ModelError> {
        if index >= self.layouts.len() {
            return Err(ModelError::not_found("layout", index.to_string()));
        }
        if self.layouts.len() == 1 {
            return Err(ModelError::LastLayout);
        }
        let removed = self.layouts.remove(index);
        if self.active > index || self.active >= self.layouts.len() {
            self.active = self.active.saturating_sub(1);
        }
        self.selection.clear();
        Ok(removed)
    }

    /// Switches the active layout and clears the selection.
    pub fn set_active(&mut self, index: usize) -> Result<(), ModelError> {
        if index >= self.layouts.len() {
            return Err(ModelError::not_found("layout", index.to_string()));
        }
        self.activate(index);
        Ok(())
    }

    fn activate(&mut self, index: usize) {
        self.active = index;
        self.selection.clear();
    }

    pub fn rename_layout(&mut self, index: usize, name: &str) -> Result<(), ModelError> {
        let layout = self
            .layouts
            .get_mut(index)
            .ok_or_else(|| ModelError::not_found("layout", index.to_string()))?;
        layout.name = name.trim().to_string();
        Ok(())
    }

    /// Back to a single empty layout with blank metadata.
    pub fn reset(&mut self) {
        let ui = self.ui;
        *self = Self::new();
        self.ui = ui;
    }

    /// Repairs `active` and the selection after wholesale replacement.
    pub fn ensure_valid(&mut self) {
        if self.layouts.is_empty() {
            self.layouts.push(Layout::new(new_id(), "Layout 1"));
        }
        if self.active >= self.layouts.len() {
            self.active = self.layouts.len() - 1;
        }
        let layout = &self.layouts[self.active];
        self.selection.retain_existing(layout);
    }
}
