//! Load-time migration of project payloads.
//!
//! Accepts the current project file, older multi-layout files and legacy
//! single-layout files, and produces a fully populated [`Project`]. Every
//! field is coerced here, once, so runtime code never needs defaulting
//! logic. Values from current files are preserved exactly; legacy files
//! follow the looser rules of the single-layout format, where a zero or
//! missing number falls back to its default.

use serde_json::{Map, Value};
use slabkit_core::{
    clamp, normalize_rotation, sanitize_non_negative, ImportError, Point,
};

use crate::dimensions::MAX_OFFSET_PX;
use crate::model::{
    find_model, new_id, CornerFlags, Dimension, Edge, EdgeProfile, EdgeProfiles, Layout, Overlay,
    Piece, Project, ProjectInfo, Sink, SinkKind, SinkShape, SinkSide, UiToggles,
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_DIMENSION_OFFSET_PX, DEFAULT_GRID,
    DEFAULT_PIECE_COLOR, DEFAULT_SCALE, DEFAULT_SLAB_HEIGHT, DEFAULT_SLAB_WIDTH, FAUCET_SLOTS,
    MAX_FAUCET_INDEX, MAX_OVERLAYS_PER_LAYOUT, MAX_SINKS_PER_PIECE, MAX_SINK_CORNER_RADIUS,
    MIN_CANVAS, MIN_GRID, SINK_STANDARD_SETBACK,
};
use crate::serialization::PROJECT_FILE_VERSION;

/// Number coercion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rules {
    /// Missing or non-numeric values take the default.
    Current,
    /// As above, and zero also takes the default.
    Legacy,
}

struct Fields<'a> {
    obj: &'a Map<String, Value>,
    path: String,
    rules: Rules,
}

impl<'a> Fields<'a> {
    fn new(value: &'a Value, path: impl Into<String>, rules: Rules) -> Result<Self, ImportError> {
        let path = path.into();
        match value.as_object() {
            Some(obj) => Ok(Self { obj, path, rules }),
            None => Err(ImportError::InvalidField {
                field: path,
                reason: format!("expected an object, found {}", kind_of(value)),
            }),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.obj.get(key).filter(|v| !v.is_null())
    }

    fn field_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", self.path, key)
        }
    }

    fn raw_num(&self, key: &str) -> Option<f64> {
        let n = match self.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }?;
        if !n.is_finite() || (self.rules == Rules::Legacy && n == 0.0) {
            return None;
        }
        Some(n)
    }

    fn num(&self, key: &str, default: f64) -> f64 {
        self.raw_num(key).unwrap_or(default)
    }

    fn positive(&self, key: &str, default: f64) -> f64 {
        self.raw_num(key).filter(|v| *v > 0.0).unwrap_or(default)
    }

    fn non_negative(&self, key: &str, default: f64) -> f64 {
        sanitize_non_negative(self.num(key, default), default)
    }

    /// String field. Current files keep an empty string as written; legacy
    /// files treat it as missing.
    fn text(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(Value::String(s)) if !s.is_empty() || self.rules == Rules::Current => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => default.to_string(),
        }
    }

    fn opt_text(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
            None => default,
        }
    }

    fn id(&self) -> String {
        self.opt_text("id").unwrap_or_else(new_id)
    }

    /// Array field; a missing field is empty, any other non-array is an error.
    fn array(&self, key: &str) -> Result<&'a [Value], ImportError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(ImportError::InvalidField {
                field: self.field_path(key),
                reason: format!("expected an array, found {}", kind_of(other)),
            }),
        }
    }

    fn child(&self, key: &str) -> Option<Fields<'a>> {
        let obj = self.get(key)?.as_object()?;
        Some(Fields {
            obj,
            path: self.field_path(key),
            rules: self.rules,
        })
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Migrates any supported payload into a project.
pub fn migrate(value: &Value) -> Result<Project, ImportError> {
    let root = value.as_object().ok_or_else(|| ImportError::NotAnObject {
        found: kind_of(value).to_string(),
    })?;

    if let Some(version) = root.get("version").filter(|v| !v.is_null()) {
        let version = version.as_u64().ok_or_else(|| ImportError::InvalidField {
            field: "version".to_string(),
            reason: format!("expected a non-negative integer, found {}", kind_of(version)),
        })?;
        if version > PROJECT_FILE_VERSION {
            return Err(ImportError::UnsupportedVersion {
                version,
                supported: PROJECT_FILE_VERSION,
            });
        }
    }

    match root.get("layouts") {
        Some(Value::Array(_)) => migrate_project(value),
        Some(other) if !other.is_null() => Err(ImportError::InvalidField {
            field: "layouts".to_string(),
            reason: format!("expected an array, found {}", kind_of(other)),
        }),
        _ if root.contains_key("pieces") || root.contains_key("canvas") => migrate_legacy(value),
        _ => Err(ImportError::InvalidField {
            field: "layouts".to_string(),
            reason: "payload is neither a project file nor a legacy layout".to_string(),
        }),
    }
}

fn project_info(root: &Fields<'_>) -> ProjectInfo {
    match root.child("project") {
        Some(p) => ProjectInfo {
            name: p.text("name", ""),
            date: p.text("date", ""),
            notes: p.text("notes", ""),
        },
        None => ProjectInfo::default(),
    }
}

fn ui_toggles(root: &Fields<'_>) -> (UiToggles, Option<bool>) {
    let defaults = UiToggles::default();
    // snapshots from older builds kept the toggles at the top level
    let ui = root.child("ui");
    let source = ui.as_ref().unwrap_or(root);
    let toggles = UiToggles {
        show_dims: source.flag("showDims", defaults.show_dims),
        show_manual_dims: source.flag("showManualDims", defaults.show_manual_dims),
        show_edge_profiles: source.flag("showEdgeProfiles", defaults.show_edge_profiles),
        show_labels: source.flag("showLabels", defaults.show_labels),
    };
    let show_grid = source.get("showGrid").map(|_| source.flag("showGrid", true));
    (toggles, show_grid)
}

fn migrate_project(value: &Value) -> Result<Project, ImportError> {
    let root = Fields::new(value, "", Rules::Current)?;
    let (ui, show_grid) = ui_toggles(&root);

    let mut layouts = Vec::new();
    for (i, item) in root.array("layouts")?.iter().enumerate() {
        let fields = Fields::new(item, format!("layouts[{i}]"), Rules::Current)?;
        layouts.push(layout(&fields, i, show_grid)?);
    }
    if layouts.is_empty() {
        return Err(ImportError::NoLayouts);
    }

    let active = root
        .raw_num("active")
        .filter(|a| a.fract() == 0.0 && *a >= 0.0 && (*a as usize) < layouts.len())
        .map(|a| a as usize)
        .unwrap_or(0);

    if let Some(legacy) = root.child("overlay") {
        adopt_legacy_overlay(&mut layouts[active], &legacy);
    }

    let mut project = Project {
        info: project_info(&root),
        layouts,
        active,
        ui,
        selection: Default::default(),
    };
    project.ensure_valid();
    Ok(project)
}

fn migrate_legacy(value: &Value) -> Result<Project, ImportError> {
    let root = Fields::new(value, "", Rules::Legacy)?;
    let (ui, show_grid) = ui_toggles(&root);
    let mut layout = legacy_layout(value)?;
    if let Some(show) = show_grid {
        layout.show_grid = show;
    }
    let mut project = Project {
        info: project_info(&root),
        layouts: vec![layout],
        active: 0,
        ui,
        selection: Default::default(),
    };
    if let Some(legacy) = root.child("overlay") {
        adopt_legacy_overlay(&mut project.layouts[0], &legacy);
    }
    project.ensure_valid();
    Ok(project)
}

/// Reads a legacy single-layout payload into a layout with fresh ids.
pub fn legacy_layout(value: &Value) -> Result<Layout, ImportError> {
    let root = Fields::new(value, "", Rules::Legacy)?;
    let mut layout = Layout::new(new_id(), root.text("layoutName", "Layout 1"));
    if let Some(canvas) = root.child("canvas") {
        layout.cw = canvas.positive("w", DEFAULT_CANVAS_WIDTH).max(MIN_CANVAS);
        layout.ch = canvas.positive("h", DEFAULT_CANVAS_HEIGHT).max(MIN_CANVAS);
    }
    layout.grid = root.positive("grid", DEFAULT_GRID).max(MIN_GRID);
    layout.scale = root.positive("scale", DEFAULT_SCALE);
    layout.show_grid = root.flag("showGrid", true);

    for (i, item) in root.array("pieces")?.iter().enumerate() {
        let fields = Fields::new(item, format!("pieces[{i}]"), Rules::Legacy)?;
        let mut p = piece(&fields, i)?;
        // legacy ids are short random strings that may collide across files
        p.id = new_id();
        layout.pieces.push(p);
    }
    for (i, item) in root.array("dims")?.iter().enumerate() {
        let fields = Fields::new(item, format!("dims[{i}]"), Rules::Current)?;
        // single-layout files were written under the fixed offset limit
        let mut d = dimension(&fields, Some(MAX_OFFSET_PX));
        d.id = new_id();
        layout.dims.push(d);
    }
    finish_layout(&mut layout);
    Ok(layout)
}

/// Bundled demo layout, in the legacy single-layout format.
pub const STARTER_LAYOUT: &str = include_str!("../assets/starter_layout.json");

/// Loads a legacy payload into the active layout of an existing project.
///
/// Only what the payload carries is replaced: project details, canvas,
/// grid, scale, grid visibility and the piece list. Other layouts, the
/// manual dimensions and overlays are kept.
pub fn apply_legacy_to_active(project: &mut Project, value: &Value) -> Result<(), ImportError> {
    let root = Fields::new(value, "", Rules::Legacy)?;
    let incoming = legacy_layout(value)?;

    if let Some(info) = root.child("project") {
        if let Some(name) = info.opt_text("name") {
            project.info.name = name;
        }
        if let Some(date) = info.opt_text("date") {
            project.info.date = date;
        }
        if let Some(Value::String(notes)) = info.get("notes") {
            project.info.notes = notes.clone();
        }
    }

    let layout = project.active_layout_mut();
    if root.child("canvas").is_some() {
        layout.cw = incoming.cw;
        layout.ch = incoming.ch;
    }
    if root.raw_num("grid").is_some() {
        layout.grid = incoming.grid;
    }
    if root.raw_num("scale").is_some() {
        layout.scale = incoming.scale;
    }
    if let Some(Value::Bool(show)) = root.get("showGrid") {
        layout.show_grid = *show;
    }
    if matches!(root.get("pieces"), Some(Value::Array(_))) {
        layout.pieces = incoming.pieces;
    }
    layout.clamp_all();
    if let Some(legacy) = root.child("overlay") {
        adopt_legacy_overlay(layout, &legacy);
    }
    project.selection.clear();
    tracing::info!(pieces = project.active_layout().pieces.len(), "legacy layout applied");
    Ok(())
}

/// Whether a payload is a single legacy layout rather than a project file.
pub fn is_legacy_layout(value: &Value) -> bool {
    value.as_object().is_some_and(|root| {
        root.get("layouts").is_none_or(Value::is_null)
            && (root.contains_key("pieces") || root.contains_key("canvas"))
    })
}

/// Imports a payload on top of `current`.
///
/// Project files replace the whole project. A legacy layout only replaces
/// the active layout's content, as loading one always has.
pub fn import_over(current: &Project, value: &Value) -> Result<Project, ImportError> {
    if !is_legacy_layout(value) {
        return migrate(value);
    }
    let mut next = current.clone();
    apply_legacy_to_active(&mut next, value)?;
    next.ensure_valid();
    Ok(next)
}

/// Replaces the active layout's content with the bundled starter layout.
pub fn load_starter(project: &mut Project) -> Result<(), ImportError> {
    let value: Value = serde_json::from_str(STARTER_LAYOUT).map_err(|e| ImportError::from_json(&e))?;
    apply_legacy_to_active(project, &value)
}

fn layout(fields: &Fields<'_>, index: usize, ui_show_grid: Option<bool>) -> Result<Layout, ImportError> {
    let mut layout = Layout::new(fields.id(), fields.text("name", &format!("Layout {}", index + 1)));
    layout.cw = fields.positive("cw", DEFAULT_CANVAS_WIDTH).max(MIN_CANVAS);
    layout.ch = fields.positive("ch", DEFAULT_CANVAS_HEIGHT).max(MIN_CANVAS);
    layout.scale = fields.positive("scale", DEFAULT_SCALE);
    layout.grid = fields.positive("grid", DEFAULT_GRID).max(MIN_GRID);
    layout.show_grid = fields.flag("showGrid", ui_show_grid.unwrap_or(true));
    layout.overlay_clip = fields.flag("overlayClip", false);

    for (i, item) in fields.array("pieces")?.iter().enumerate() {
        let piece_fields = Fields::new(item, format!("{}.pieces[{i}]", fields.path), Rules::Current)?;
        layout.pieces.push(piece(&piece_fields, i)?);
    }
    for (i, item) in fields.array("dims")?.iter().enumerate() {
        let dim_fields = Fields::new(item, format!("{}.dims[{i}]", fields.path), Rules::Current)?;
        layout.dims.push(dimension(&dim_fields, None));
    }
    for (i, item) in fields.array("overlays")?.iter().enumerate() {
        let ov_fields = Fields::new(item, format!("{}.overlays[{i}]", fields.path), Rules::Current)?;
        layout.overlays.push(overlay(&ov_fields, i, true));
    }
    let ov_sel = fields.raw_num("ovSel").filter(|v| *v >= 0.0).unwrap_or(0.0);
    layout.ov_sel = ov_sel as usize;
    finish_layout(&mut layout);
    Ok(layout)
}

/// Enforces per-layout limits and invariants after all fields are read.
fn finish_layout(layout: &mut Layout) {
    if layout.overlays.len() > MAX_OVERLAYS_PER_LAYOUT {
        tracing::warn!(
            layout = %layout.id,
            count = layout.overlays.len(),
            "dropping overlays beyond the per-layout limit"
        );
        layout.overlays.truncate(MAX_OVERLAYS_PER_LAYOUT);
    }
    layout.ov_sel = layout.ov_sel.min(layout.overlays.len().saturating_sub(1));
    layout.normalize_layers();
    layout.clamp_all();
}

fn piece(fields: &Fields<'_>, index: usize) -> Result<Piece, ImportError> {
    let mut p = Piece::new(
        fields.id(),
        fields.text("name", "Piece"),
        fields.positive("w", 1.0),
        fields.positive("h", 1.0),
    );
    p.x = fields.num("x", 0.0);
    p.y = fields.num("y", 0.0);
    p.rotation = normalize_rotation(fields.num("rotation", 0.0));
    p.color = fields.text("color", DEFAULT_PIECE_COLOR);
    p.fill_opacity = clamp(fields.num("fillOpacity", 1.0), 0.0, 1.0);
    p.no_fill = fields.flag("noFill", false);
    p.layer = fields.num("layer", index as f64) as i64;
    p.corner_flags = match fields.child("cornerFlags") {
        Some(c) => CornerFlags {
            tl: c.flag("tl", false),
            tr: c.flag("tr", false),
            bl: c.flag("bl", false),
            br: c.flag("br", false),
        },
        None => CornerFlags {
            tl: fields.flag("rTL", false),
            tr: fields.flag("rTR", false),
            bl: fields.flag("rBL", false),
            br: fields.flag("rBR", false),
        },
    };
    p.edge_profiles = edge_profiles(fields);

    let sinks = fields.array("sinks")?;
    if sinks.len() > MAX_SINKS_PER_PIECE {
        tracing::warn!(piece = %p.id, count = sinks.len(), "dropping sinks beyond the per-piece limit");
    }
    for (i, item) in sinks.iter().take(MAX_SINKS_PER_PIECE).enumerate() {
        let sink_fields = Fields::new(item, format!("{}.sinks[{i}]", fields.path), fields.rules)?;
        let mut s = sink(&sink_fields);
        if p.sinks.iter().any(|other| other.id == s.id) {
            s.id = new_id();
        }
        p.sinks.push(s);
    }
    Ok(p)
}

fn edge_profiles(fields: &Fields<'_>) -> EdgeProfiles {
    let mut profiles = EdgeProfiles::default();
    let Some(source) = fields.child("edgeProfiles") else {
        return profiles;
    };
    for (edge, key) in Edge::ALL.iter().zip(["top", "right", "bottom", "left"]) {
        if let Some(Value::String(tag)) = source.get(key) {
            profiles.set(*edge, EdgeProfile::from_tag(tag).unwrap_or_default());
        } else if source.obj.get(key).is_some_and(Value::is_null) {
            profiles.set(*edge, EdgeProfile::None);
        }
    }
    profiles
}

fn sink(fields: &Fields<'_>) -> Sink {
    let model_id = fields.opt_text("modelId");
    let kind = match fields.get("type").and_then(Value::as_str) {
        Some("model") => SinkKind::Model,
        Some("custom") => SinkKind::Custom,
        _ if model_id.is_some() => SinkKind::Model,
        _ => SinkKind::Custom,
    };
    let mut s = Sink::new(fields.id());
    s.kind = kind;
    s.model_id = model_id;
    s.shape = match fields.get("shape").and_then(Value::as_str) {
        Some("oval") => SinkShape::Oval,
        _ => SinkShape::Rect,
    };
    s.w = fields.non_negative("w", 16.0);
    s.h = fields.non_negative("h", 16.0);
    s.corner_r = clamp(fields.num("cornerR", 0.0), 0.0, MAX_SINK_CORNER_RADIUS);
    s.side = fields
        .get("side")
        .and_then(Value::as_str)
        .and_then(SinkSide::from_tag)
        .unwrap_or(SinkSide::Front);
    s.centerline = fields.num("centerline", 20.0);
    s.setback = fields.non_negative("setback", SINK_STANDARD_SETBACK);
    s.rotation = clamp(fields.num("rotation", 0.0), 0.0, 360.0);
    s.faucets = faucets(fields.get("faucets"));

    if s.kind == SinkKind::Model {
        if let Some(model) = s.model_id.as_deref().and_then(find_model) {
            s.apply_model(model);
        }
    }
    s
}

/// Keeps integer slots within range, sorted and unique.
fn faucets(value: Option<&Value>) -> Vec<u8> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let mut slots: Vec<u8> = items
        .iter()
        .filter_map(Value::as_f64)
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= MAX_FAUCET_INDEX as f64)
        .map(|n| n as u8)
        .take(FAUCET_SLOTS)
        .collect();
    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Reads a dimension. Without a `limit` the stored offset is kept; the
/// editor clamps it to its own configured limit when the project is loaded.
fn dimension(fields: &Fields<'_>, limit: Option<f64>) -> Dimension {
    let mut d = Dimension::new(
        fields.id(),
        Point::new(fields.num("x1", 0.0), fields.num("y1", 0.0)),
        Point::new(fields.num("x2", 0.0), fields.num("y2", 0.0)),
    );
    let offset = fields.num("offsetPx", DEFAULT_DIMENSION_OFFSET_PX);
    d.offset_px = match limit {
        Some(limit) => clamp(offset, -limit, limit),
        None => offset,
    };
    d
}

fn overlay(fields: &Fields<'_>, index: usize, visible_default: bool) -> Overlay {
    let mut o = Overlay::new(fields.id(), fields.text("name", &format!("Overlay {}", index + 1)));
    o.data_url = fields.opt_text("dataURL").unwrap_or_default();
    o.nat_w = fields.non_negative("natW", 0.0) as u32;
    o.nat_h = fields.non_negative("natH", 0.0) as u32;
    o.slab_w = fields.positive("slabW", DEFAULT_SLAB_WIDTH);
    o.slab_h = fields.positive("slabH", DEFAULT_SLAB_HEIGHT);
    o.x = fields.num("x", 0.0);
    o.y = fields.num("y", 0.0);
    o.opacity = clamp(fields.num("opacity", 1.0), 0.0, 1.0);
    o.visible = fields.flag("visible", visible_default);
    o
}

/// Moves a pre-layout `overlay` object into a layout when it carries an
/// image or is visible.
fn adopt_legacy_overlay(layout: &mut Layout, legacy: &Fields<'_>) {
    let has_image = legacy.opt_text("dataURL").is_some();
    if !has_image && !legacy.flag("visible", false) {
        return;
    }
    if layout.overlays.len() >= MAX_OVERLAYS_PER_LAYOUT {
        tracing::warn!(layout = %layout.id, "no room for the legacy overlay, dropped");
        return;
    }
    let fields = Fields {
        obj: legacy.obj,
        path: legacy.path.clone(),
        rules: Rules::Current,
    };
    let mut o = overlay(&fields, layout.overlays.len(), false);
    o.id = new_id();
    if o.name == format!("Overlay {}", layout.overlays.len() + 1) {
        o.name = "Overlay".to_string();
    }
    layout.overlays.push(o);
    layout.ov_sel = layout.overlays.len() - 1;
}
