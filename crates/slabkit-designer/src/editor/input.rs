//! Pointer and keyboard handling.
//!
//! Drags are modal: the press captures the ids and start positions of
//! everything the gesture moves, moves apply a delta to that captured set,
//! and release (or the pointer leaving the canvas) ends the gesture through
//! one shared routine.

use slabkit_core::{clamp, Point};

use super::Editor;
use crate::dimensions::{dimension_geometry, snap_dim_point_with, DimensionDrag, ToolClick};
use crate::model::Piece;

/// Pixel distance within which a press grabs a dimension line.
const DIMENSION_HIT_PX: f64 = 6.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// What lies under the pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    Piece(String),
    Dimension(String),
    Canvas,
}

/// Allowed translation of a dragged group, in inches. Keeps every member's
/// bounding box inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragLimits {
    pub dx_min: f64,
    pub dx_max: f64,
    pub dy_min: f64,
    pub dy_max: f64,
}

impl DragLimits {
    pub fn for_group<'a, I>(pieces: I, cw: f64, ch: f64) -> Self
    where
        I: IntoIterator<Item = &'a Piece>,
    {
        let mut limits = DragLimits {
            dx_min: f64::NEG_INFINITY,
            dx_max: f64::INFINITY,
            dy_min: f64::NEG_INFINITY,
            dy_max: f64::INFINITY,
        };
        for piece in pieces {
            let b = piece.bounds();
            limits.dx_min = limits.dx_min.max(-b.x);
            limits.dx_max = limits.dx_max.min(cw - b.right());
            limits.dy_min = limits.dy_min.max(-b.y);
            limits.dy_max = limits.dy_max.min(ch - b.bottom());
        }
        limits
    }

    pub fn apply(&self, delta: Point) -> Point {
        Point::new(
            clamp(delta.x, self.dx_min, self.dx_max),
            clamp(delta.y, self.dy_min, self.dy_max),
        )
    }
}

/// The gesture in progress between press and release.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Pieces {
        /// Press position in inches.
        start: Point,
        /// Captured piece ids with their start positions.
        group: Vec<(String, Point)>,
        limits: DragLimits,
    },
    DimensionOffset(DimensionDrag),
    /// Press on empty canvas; becomes a deselect if it never travels.
    Blank { start_px: Point, travel: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
    Char(char),
    Other,
}

impl Key {
    fn arrow_direction(&self) -> Option<(f64, f64)> {
        match self {
            Key::ArrowUp => Some((0.0, -1.0)),
            Key::ArrowDown => Some((0.0, 1.0)),
            Key::ArrowLeft => Some((-1.0, 0.0)),
            Key::ArrowRight => Some((1.0, 0.0)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// Focus is in a text field; editor shortcuts stay out of the way.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            in_text_input: false,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.dot(&ab);
    if len2 <= f64::EPSILON {
        return p.distance_to(&a);
    }
    let t = clamp((p - a).dot(&ab) / len2, 0.0, 1.0);
    p.distance_to(&(a + ab * t))
}

impl Editor {
    fn to_inches(&self, pos_px: Point) -> Point {
        let scale = self.layout().scale;
        Point::new(pos_px.x / scale, pos_px.y / scale)
    }

    /// Finds what a press at `pos_px` would grab: a visible manual
    /// dimension line first, then the topmost piece.
    pub fn hit_test(&self, pos_px: Point) -> PointerTarget {
        let layout = self.layout();
        if self.project.ui.show_manual_dims {
            for dim in layout.dims.iter().rev() {
                let g = dimension_geometry(dim, layout.scale);
                if distance_to_segment(pos_px, g.q1, g.q2) <= DIMENSION_HIT_PX {
                    return PointerTarget::Dimension(dim.id.clone());
                }
            }
        }
        let p = self.to_inches(pos_px);
        layout
            .pieces_by_layer()
            .into_iter()
            .rev()
            .find(|piece| piece.contains_point(p))
            .map(|piece| PointerTarget::Piece(piece.id.clone()))
            .unwrap_or(PointerTarget::Canvas)
    }

    /// Handles a press on the canvas at a pixel position.
    pub fn pointer_down(&mut self, pos_px: Point, modifiers: Modifiers) -> PointerTarget {
        // a press while a gesture is live ends it first
        if self.drag.is_some() {
            self.end_pointer_drag(pos_px);
        }

        if self.dim_tool.is_active() {
            self.place_dimension_point(self.to_inches(pos_px));
            return PointerTarget::Canvas;
        }

        let target = self.hit_test(pos_px);
        match &target {
            PointerTarget::Dimension(id) => {
                self.project.selection.select_dimension(id);
                let scale = self.layout().scale;
                self.drag = self
                    .layout()
                    .dimension(id)
                    .map(|dim| DragState::DimensionOffset(DimensionDrag::begin(dim, scale)));
            }
            PointerTarget::Piece(id) => {
                let selection = &mut self.project.selection;
                if modifiers.command() || modifiers.shift {
                    selection.toggle(id);
                } else if !selection.is_selected(id) {
                    selection.select_only(id);
                }
                self.begin_piece_drag(self.to_inches(pos_px));
            }
            PointerTarget::Canvas => {
                self.drag = Some(DragState::Blank {
                    start_px: pos_px,
                    travel: 0.0,
                });
            }
        }
        self.touch();
        target
    }

    fn begin_piece_drag(&mut self, start: Point) {
        let layout = self.project.active_layout();
        let selection = &self.project.selection;
        let members: Vec<&Piece> = layout
            .pieces
            .iter()
            .filter(|p| selection.is_selected(&p.id))
            .collect();
        if members.is_empty() {
            self.drag = None;
            return;
        }
        let limits = DragLimits::for_group(members.iter().copied(), layout.cw, layout.ch);
        let group = members
            .iter()
            .map(|p| (p.id.clone(), Point::new(p.x, p.y)))
            .collect();
        self.drag = Some(DragState::Pieces {
            start,
            group,
            limits,
        });
    }

    pub fn pointer_move(&mut self, pos_px: Point) {
        if self.dim_tool.is_active() {
            self.update_dimension_hover(self.to_inches(pos_px));
        }

        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        match drag {
            DragState::Pieces {
                start,
                group,
                limits,
            } => {
                let scale = self.project.active_layout().scale;
                let p = Point::new(pos_px.x / scale, pos_px.y / scale);
                let delta = limits.apply(p - *start);
                let layout = self.project.active_layout_mut();
                for (id, origin) in group.iter() {
                    if let Some(piece) = layout.piece_mut(id) {
                        piece.x = origin.x + delta.x;
                        piece.y = origin.y + delta.y;
                    }
                }
            }
            DragState::DimensionOffset(dim_drag) => {
                let limit = self.options.max_dimension_offset;
                let offset = clamp(dim_drag.offset_for(pos_px), -limit, limit);
                let id = dim_drag.dim_id.clone();
                if let Some(dim) = self.project.active_layout_mut().dimension_mut(&id) {
                    dim.offset_px = offset;
                }
            }
            DragState::Blank { start_px, travel } => {
                *travel = travel.max(pos_px.distance_to(start_px));
                return;
            }
        }
        self.touch();
    }

    pub fn pointer_up(&mut self, pos_px: Point) {
        self.end_pointer_drag(pos_px);
    }

    /// Leaving the canvas ends a gesture exactly like a release.
    pub fn pointer_leave(&mut self, pos_px: Point) {
        self.end_pointer_drag(pos_px);
    }

    fn end_pointer_drag(&mut self, pos_px: Point) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        match drag {
            DragState::Pieces { group, .. } => {
                let layout = self.project.active_layout_mut();
                let (cw, ch, grid) = (layout.cw, layout.ch, layout.grid);
                for (id, _) in &group {
                    if let Some(piece) = layout.piece_mut(id) {
                        piece.snap_to_grid(grid);
                        piece.clamp_to_canvas(cw, ch);
                    }
                }
                self.commit();
            }
            DragState::DimensionOffset(_) => self.commit(),
            DragState::Blank { start_px, travel } => {
                let travel = travel.max(pos_px.distance_to(&start_px));
                if travel <= self.options.click_threshold_px {
                    self.project.selection.clear();
                }
                self.touch();
            }
        }
    }

    /// Handles a key press. Returns true when the editor consumed it.
    pub fn key_down(&mut self, event: KeyEvent) -> bool {
        if event.in_text_input {
            return false;
        }
        let mods = event.modifiers;
        match event.key {
            Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'z') => {
                if mods.shift {
                    self.redo();
                } else {
                    self.undo();
                }
                true
            }
            Key::Char(c) if mods.command() && c.eq_ignore_ascii_case(&'y') => {
                self.redo();
                true
            }
            Key::Delete | Key::Backspace => self.delete_selected_dimension(),
            Key::Escape if self.dim_tool.pending().is_some() => {
                self.dim_tool.cancel_pending();
                self.hover = None;
                self.touch();
                true
            }
            key => match key.arrow_direction() {
                Some((dx, dy)) => self.nudge_selection(dx, dy, mods.shift),
                None => false,
            },
        }
    }

    /// Commits an arrow-key nudge once the key is released.
    pub fn key_up(&mut self, event: KeyEvent) -> bool {
        if event.key.arrow_direction().is_some() && self.nudge_pending {
            self.nudge_pending = false;
            self.commit();
            return true;
        }
        false
    }

    fn nudge_selection(&mut self, dx: f64, dy: f64, fast: bool) -> bool {
        if self.project.selection.selected_ids.is_empty() {
            return false;
        }
        let multiplier = if fast { self.options.nudge_multiplier } else { 1.0 };
        let ids = self.project.selection.selected_ids.clone();
        let layout = self.project.active_layout_mut();
        let (cw, ch, grid) = (layout.cw, layout.ch, layout.grid);
        let step = grid * multiplier;
        for id in &ids {
            if let Some(piece) = layout.piece_mut(id) {
                piece.x += dx * step;
                piece.y += dy * step;
                piece.snap_to_grid(grid);
                piece.clamp_to_canvas(cw, ch);
            }
        }
        self.nudge_pending = true;
        self.touch();
        true
    }

    /// Feeds a dimension-tool click at an inch position.
    pub(crate) fn place_dimension_point(&mut self, raw: Point) -> ToolClick {
        let layout = self.project.active_layout();
        let snapped = snap_dim_point_with(&layout.pieces, layout.grid, raw, self.options.snap_radius);
        let click = self.dim_tool.place(snapped.point);
        match &click {
            ToolClick::Completed { start, end } => {
                let offset = clamp(
                    self.options.default_dimension_offset,
                    -self.options.max_dimension_offset,
                    self.options.max_dimension_offset,
                );
                let id = self.layout_mut().add_dimension(*start, *end);
                if let Some(dim) = self.layout_mut().dimension_mut(&id) {
                    dim.offset_px = offset;
                }
                tracing::debug!(dim = %id, "dimension placed");
                self.project.selection.select_dimension(&id);
                self.commit();
            }
            ToolClick::Started(_) => self.touch(),
            ToolClick::Inactive => {}
        }
        click
    }
}
