//! A single named drawing: canvas, pieces, dimensions and overlays.

use serde::{Deserialize, Serialize};
use slabkit_core::{sanitize_number, sanitize_positive, ModelError, Point};

use super::dimension::Dimension;
use super::overlay::{Overlay, MAX_OVERLAYS_PER_LAYOUT};
use super::piece::Piece;
use super::new_id;

pub const DEFAULT_CANVAS_WIDTH: f64 = 180.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 120.0;
/// Pixels per inch.
pub const DEFAULT_SCALE: f64 = 6.0;
pub const DEFAULT_GRID: f64 = 1.0;
/// Smallest canvas side, in inches.
pub const MIN_CANVAS: f64 = 12.0;
/// Smallest grid step, in inches.
pub const MIN_GRID: f64 = 0.25;

const DEFAULT_PIECE_WIDTH: f64 = 24.0;
const DEFAULT_PIECE_HEIGHT: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    pub name: String,
    /// Canvas width in inches.
    pub cw: f64,
    /// Canvas height in inches.
    pub ch: f64,
    pub scale: f64,
    pub grid: f64,
    pub show_grid: bool,
    pub pieces: Vec<Piece>,
    pub dims: Vec<Dimension>,
    pub overlays: Vec<Overlay>,
    /// Index of the overlay shown in the overlay editor.
    pub ov_sel: usize,
    /// Clip overlays to piece outlines minus cutouts.
    pub overlay_clip: bool,
}

impl Layout {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cw: DEFAULT_CANVAS_WIDTH,
            ch: DEFAULT_CANVAS_HEIGHT,
            scale: DEFAULT_SCALE,
            grid: DEFAULT_GRID,
            show_grid: true,
            pieces: Vec::new(),
            dims: Vec::new(),
            overlays: Vec::new(),
            ov_sel: 0,
            overlay_clip: false,
        }
    }

    /// Canvas size in pixels at the current scale.
    pub fn canvas_px(&self) -> (f64, f64) {
        (self.cw * self.scale, self.ch * self.scale)
    }

    pub fn piece(&self, id: &str) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }

    pub fn piece_mut(&mut self, id: &str) -> Option<&mut Piece> {
        self.pieces.iter_mut().find(|p| p.id == id)
    }

    pub fn piece_index(&self, id: &str) -> Option<usize> {
        self.pieces.iter().position(|p| p.id == id)
    }

    fn top_layer(&self) -> i64 {
        self.pieces.iter().map(|p| p.layer + 1).max().unwrap_or(0)
    }

    /// Adds a default 24"×12" piece on top and returns its id.
    pub fn add_piece(&mut self) -> String {
        let name = format!("Piece {}", self.pieces.len() + 1);
        let mut piece = Piece::new(new_id(), name, DEFAULT_PIECE_WIDTH, DEFAULT_PIECE_HEIGHT);
        piece.layer = self.top_layer();
        piece.clamp_to_canvas(self.cw, self.ch);
        let id = piece.id.clone();
        tracing::debug!(layout = %self.id, piece = %id, "piece added");
        self.pieces.push(piece);
        id
    }

    /// Inserts an existing piece on top, clamped into the canvas.
    pub fn insert_piece(&mut self, mut piece: Piece) -> String {
        piece.layer = self.top_layer();
        piece.clamp_to_canvas(self.cw, self.ch);
        let id = piece.id.clone();
        self.pieces.push(piece);
        id
    }

    /// Copies a piece one grid step down and right, on top of the stack.
    pub fn duplicate_piece(&mut self, id: &str) -> Result<String, ModelError> {
        let source = self
            .piece(id)
            .ok_or_else(|| ModelError::not_found("piece", id))?;
        let mut copy = source.clone();
        copy.id = new_id();
        copy.name = format!("{} Copy", source.name);
        copy.x += self.grid;
        copy.y += self.grid;
        for sink in &mut copy.sinks {
            sink.id = new_id();
        }
        Ok(self.insert_piece(copy))
    }

    pub fn remove_piece(&mut self, id: &str) -> Option<Piece> {
        let index = self.piece_index(id)?;
        let removed = self.pieces.remove(index);
        self.normalize_layers();
        Some(removed)
    }

    /// Piece indices in paint order (lowest layer first, ties by position).
    pub fn layer_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.pieces.len()).collect();
        order.sort_by_key(|&i| self.pieces[i].layer);
        order
    }

    pub fn pieces_by_layer(&self) -> Vec<&Piece> {
        self.layer_order().into_iter().map(|i| &self.pieces[i]).collect()
    }

    /// Rewrites layers to a dense `0..N-1` keeping the current order.
    pub fn normalize_layers(&mut self) {
        for (layer, index) in self.layer_order().into_iter().enumerate() {
            self.pieces[index].layer = layer as i64;
        }
    }

    /// Swaps a piece with the one above it. Returns false at the top.
    pub fn bring_forward(&mut self, id: &str) -> bool {
        self.swap_with_neighbour(id, 1)
    }

    /// Swaps a piece with the one below it. Returns false at the bottom.
    pub fn send_backward(&mut self, id: &str) -> bool {
        self.swap_with_neighbour(id, -1)
    }

    fn swap_with_neighbour(&mut self, id: &str, step: isize) -> bool {
        self.normalize_layers();
        let order = self.layer_order();
        let Some(pos) = order.iter().position(|&i| self.pieces[i].id == id) else {
            return false;
        };
        let target = pos as isize + step;
        if target < 0 || target as usize >= order.len() {
            return false;
        }
        let (a, b) = (order[pos], order[target as usize]);
        let layer_a = self.pieces[a].layer;
        self.pieces[a].layer = self.pieces[b].layer;
        self.pieces[b].layer = layer_a;
        self.normalize_layers();
        true
    }

    /// Sets the canvas size (each side at least 12") and re-clamps pieces.
    pub fn set_canvas_size(&mut self, cw: f64, ch: f64) {
        self.cw = sanitize_number(cw, self.cw).max(MIN_CANVAS);
        self.ch = sanitize_number(ch, self.ch).max(MIN_CANVAS);
        self.clamp_all();
    }

    pub fn set_grid(&mut self, grid: f64) {
        self.grid = sanitize_number(grid, self.grid).max(MIN_GRID);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = sanitize_positive(scale, self.scale);
    }

    pub fn clamp_all(&mut self) {
        let (cw, ch) = (self.cw, self.ch);
        for piece in &mut self.pieces {
            piece.clamp_to_canvas(cw, ch);
        }
    }

    /// Snaps every piece to the grid, then clamps it back into the canvas.
    pub fn snap_all(&mut self) {
        let (cw, ch, grid) = (self.cw, self.ch, self.grid);
        for piece in &mut self.pieces {
            piece.snap_to_grid(grid);
            piece.clamp_to_canvas(cw, ch);
        }
    }

    /// Adds an empty overlay and selects it.
    pub fn add_overlay(&mut self) -> Result<usize, ModelError> {
        if self.overlays.len() >= MAX_OVERLAYS_PER_LAYOUT {
            tracing::warn!(layout = %self.id, "overlay limit reached, add declined");
            return Err(ModelError::OverlayLimit {
                layout_id: self.id.clone(),
                max: MAX_OVERLAYS_PER_LAYOUT,
            });
        }
        let name = format!("Overlay {}", self.overlays.len() + 1);
        self.overlays.push(Overlay::new(new_id(), name));
        self.ov_sel = self.overlays.len() - 1;
        Ok(self.ov_sel)
    }

    pub fn remove_overlay(&mut self, index: usize) -> Option<Overlay> {
        if index >= self.overlays.len() {
            return None;
        }
        let removed = self.overlays.remove(index);
        self.ov_sel = self.ov_sel.min(self.overlays.len().saturating_sub(1));
        Some(removed)
    }

    pub fn selected_overlay(&self) -> Option<&Overlay> {
        self.overlays.get(self.ov_sel)
    }

    pub fn selected_overlay_mut(&mut self) -> Option<&mut Overlay> {
        self.overlays.get_mut(self.ov_sel)
    }

    pub fn dimension(&self, id: &str) -> Option<&Dimension> {
        self.dims.iter().find(|d| d.id == id)
    }

    pub fn dimension_mut(&mut self, id: &str) -> Option<&mut Dimension> {
        self.dims.iter_mut().find(|d| d.id == id)
    }

    pub fn add_dimension(&mut self, start: Point, end: Point) -> String {
        let dim = Dimension::new(new_id(), start, end);
        let id = dim.id.clone();
        self.dims.push(dim);
        id
    }

    pub fn remove_dimension(&mut self, id: &str) -> Option<Dimension> {
        let index = self.dims.iter().position(|d| d.id == id)?;
        Some(self.dims.remove(index))
    }
}
