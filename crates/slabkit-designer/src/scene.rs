//! Vector scene for one layout.
//!
//! [`render_scene`] turns a layout into an immutable list of pixel-space
//! primitives, recomputed in full on every call. Pieces are grouped with
//! their piece-local frame so sinks, dimensions and edge labels rotate
//! with the piece; the name label stays upright. Backends (SVG, raster)
//! only walk the result.

use slabkit_core::{format_trimmed, Affine, ModelError, Point, Rect};

use crate::dimensions::dimension_geometry;
use crate::model::{Dimension, Edge, Layout, Piece, PieceFill, Project, Sink, UiToggles};
use crate::outline::Outline;
use crate::overlay_image::header_dimensions;
use crate::overlay_mask::{build_overlay_mask, MaskGeometry};
use crate::sink_placement::{faucet_holes, sink_center, sink_local_frame};

const BACKGROUND_FILL: &str = "#fff";
const GRID_STROKE: &str = "#e5e7eb";
const PIECE_STROKE: &str = "#000";
const SINK_STROKE: &str = "#333";
const SELECTION_STROKE: &str = "#0ea5e9";
const DIM_STROKE: &str = "#000";
const TEXT_COLOR: &str = "#111111";
/// Every n-th grid line is drawn heavier.
const GRID_MAJOR_EVERY: usize = 6;
const DIM_OFFSET_PX: f64 = 12.0;
const DIM_TICK_PX: f64 = 6.0;
const EDGE_LABEL_MARGIN_PX: f64 = 16.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const EDGE_LABEL_FONT_SIZE: f64 = 11.0;
const MANUAL_DIM_FONT_SIZE: f64 = 14.0;
const LABEL_LINE_HEIGHT: f64 = 14.0;
const OVERLAY_BACKDROP_OPACITY: f64 = 0.04;

/// Which annotations to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneOptions {
    pub show_dims: bool,
    pub show_manual_dims: bool,
    pub show_edge_profiles: bool,
    pub show_labels: bool,
    /// Draw selection outlines for the active layout.
    pub show_selection: bool,
    pub show_overlays: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self::from_ui(&UiToggles::default())
    }
}

impl SceneOptions {
    pub fn from_ui(ui: &UiToggles) -> Self {
        Self {
            show_dims: ui.show_dims,
            show_manual_dims: ui.show_manual_dims,
            show_edge_profiles: ui.show_edge_profiles,
            show_labels: ui.show_labels,
            show_selection: true,
            show_overlays: true,
        }
    }

    /// Options for a printable sheet: annotations on, no selection.
    pub fn for_export(ui: &UiToggles) -> Self {
        Self {
            show_selection: false,
            ..Self::from_ui(ui)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fill {
    pub color: String,
    pub opacity: f64,
}

impl Fill {
    fn solid(color: &str) -> Self {
        Self {
            color: color.to_string(),
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: String,
    pub width: f64,
    pub opacity: f64,
    /// Keep the on-screen width when the group is transformed.
    pub non_scaling: bool,
}

impl Stroke {
    fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
            opacity: 1.0,
            non_scaling: false,
        }
    }

    fn non_scaling(mut self) -> Self {
        self.non_scaling = true;
        self
    }

    fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Alphabetic,
    Middle,
    Hanging,
}

/// Text drawn at `pos`; extra lines step down by `line_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub pos: Point,
    pub lines: Vec<String>,
    pub line_height: f64,
    pub size: f64,
    pub color: String,
    pub anchor: TextAnchor,
    pub baseline: Baseline,
    /// Rotation in degrees about `pos`.
    pub rotation: f64,
}

impl TextLabel {
    fn new(pos: Point, text: impl Into<String>, size: f64) -> Self {
        Self {
            pos,
            lines: vec![text.into()],
            line_height: LABEL_LINE_HEIGHT,
            size,
            color: TEXT_COLOR.to_string(),
            anchor: TextAnchor::Middle,
            baseline: Baseline::Alphabetic,
            rotation: 0.0,
        }
    }

    fn anchored(mut self, anchor: TextAnchor, baseline: Baseline) -> Self {
        self.anchor = anchor;
        self.baseline = baseline;
        self
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        rect: Rect,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
        opacity: f64,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    /// Outline placed by `transform` inside the enclosing group.
    Shape {
        outline: Outline,
        transform: Affine,
        fill: Option<Fill>,
        stroke: Option<Stroke>,
    },
    Text(TextLabel),
    Image {
        rect: Rect,
        href: String,
        opacity: f64,
    },
}

impl Primitive {
    fn line(from: Point, to: Point, stroke: &Stroke) -> Self {
        Primitive::Line {
            from,
            to,
            stroke: stroke.clone(),
        }
    }

    pub fn as_text(&self) -> Option<&TextLabel> {
        match self {
            Primitive::Text(label) => Some(label),
            _ => None,
        }
    }
}

/// One piece: `items` are in piece-local pixels placed by `frame`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceGroup {
    pub piece_id: String,
    pub selected: bool,
    pub frame: Affine,
    pub items: Vec<Primitive>,
    /// Name and size, drawn upright at the centre of the bounding box.
    pub label: Option<TextLabel>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DimensionGroup {
    pub dim_id: String,
    pub selected: bool,
    pub items: Vec<Primitive>,
}

/// Overlay images, optionally masked to the piece silhouettes.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub mask: Option<MaskGeometry>,
    pub items: Vec<Primitive>,
}

/// Back-to-front drawing of one layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Primitive,
    pub overlays: OverlayLayer,
    pub grid: Vec<Primitive>,
    pub pieces: Vec<PieceGroup>,
    pub dimensions: Vec<DimensionGroup>,
}

impl Scene {
    pub fn piece(&self, id: &str) -> Option<&PieceGroup> {
        self.pieces.iter().find(|g| g.piece_id == id)
    }

    /// Every text label in drawing order.
    pub fn texts(&self) -> Vec<&TextLabel> {
        let mut out = Vec::new();
        for group in &self.pieces {
            out.extend(group.items.iter().filter_map(Primitive::as_text));
            out.extend(group.label.iter());
        }
        for dim in &self.dimensions {
            out.extend(dim.items.iter().filter_map(Primitive::as_text));
        }
        out
    }
}

/// Builds the scene for `project.layouts[layout_index]`.
pub fn render_scene(
    project: &Project,
    layout_index: usize,
    options: &SceneOptions,
) -> Result<Scene, ModelError> {
    let layout = project
        .layout(layout_index)
        .ok_or_else(|| ModelError::not_found("layout", layout_index.to_string()))?;
    let selection = (options.show_selection && layout_index == project.active)
        .then_some(&project.selection);

    let (width, height) = layout.canvas_px();
    let background = Primitive::Rect {
        rect: Rect::new(0.0, 0.0, width, height),
        fill: Some(Fill::solid(BACKGROUND_FILL)),
        stroke: Some(Stroke::new(GRID_STROKE, 1.0)),
        opacity: 1.0,
    };

    let overlays = if options.show_overlays {
        overlay_layer(layout)
    } else {
        OverlayLayer {
            mask: None,
            items: Vec::new(),
        }
    };

    let pieces = layout
        .pieces_by_layer()
        .into_iter()
        .map(|piece| {
            let selected = selection.is_some_and(|s| s.is_selected(&piece.id));
            piece_group(piece, layout.scale, selected, options)
        })
        .collect();

    let dimensions = if options.show_manual_dims {
        layout
            .dims
            .iter()
            .map(|dim| {
                let selected =
                    selection.is_some_and(|s| s.selected_dim_id.as_deref() == Some(&dim.id));
                dimension_group(dim, layout.scale, selected)
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Scene {
        width,
        height,
        background,
        overlays,
        grid: grid_lines(layout),
        pieces,
        dimensions,
    })
}

fn overlay_layer(layout: &Layout) -> OverlayLayer {
    let mut items = Vec::new();
    for overlay in layout.overlays.iter().filter(|o| o.is_drawable()) {
        if let Err(err) = header_dimensions(&overlay.data_url) {
            tracing::debug!(overlay = %overlay.id, error = %err, "overlay image skipped");
            continue;
        }
        let rect = overlay.display_rect_px(layout.scale);
        items.push(Primitive::Rect {
            rect,
            fill: Some(Fill::solid("#000")),
            stroke: None,
            opacity: OVERLAY_BACKDROP_OPACITY,
        });
        items.push(Primitive::Image {
            rect,
            href: overlay.data_url.clone(),
            opacity: overlay.opacity,
        });
    }
    let mask = (layout.overlay_clip && !layout.overlays.is_empty())
        .then(|| build_overlay_mask(layout));
    OverlayLayer { mask, items }
}

fn grid_lines(layout: &Layout) -> Vec<Primitive> {
    let step = layout.grid * layout.scale;
    if !layout.show_grid || !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }
    let (width, height) = layout.canvas_px();
    let major = Stroke::new(GRID_STROKE, 1.25).with_opacity(0.9);
    let minor = Stroke::new(GRID_STROKE, 0.5).with_opacity(0.7);
    let pick = |i: usize| if i % GRID_MAJOR_EVERY == 0 { &major } else { &minor };

    let mut lines = Vec::new();
    let mut i = 0;
    while i as f64 * step <= width + 0.5 {
        let x = i as f64 * step;
        lines.push(Primitive::line(Point::new(x, 0.0), Point::new(x, height), pick(i)));
        i += 1;
    }
    let mut i = 0;
    while i as f64 * step <= height + 0.5 {
        let y = i as f64 * step;
        lines.push(Primitive::line(Point::new(0.0, y), Point::new(width, y), pick(i)));
        i += 1;
    }
    lines
}

fn piece_group(piece: &Piece, scale: f64, selected: bool, options: &SceneOptions) -> PieceGroup {
    let (w, h) = (piece.w * scale, piece.h * scale);
    let outline = Outline::piece(piece, scale);
    let mut items = Vec::new();

    let fill = match piece.fill() {
        PieceFill::None => None,
        PieceFill::Solid { color, opacity } => Some(Fill { color, opacity }),
    };
    items.push(Primitive::Shape {
        outline,
        transform: Affine::identity(),
        fill,
        stroke: Some(Stroke::new(PIECE_STROKE, 1.0)),
    });
    if selected {
        items.push(Primitive::Shape {
            outline,
            transform: Affine::identity(),
            fill: None,
            stroke: Some(Stroke::new(SELECTION_STROKE, 2.0).non_scaling()),
        });
    }

    for sink in &piece.sinks {
        if options.show_dims {
            items.extend(centerline_dimension(piece, sink, scale));
        }
        items.extend(sink_shapes(piece, sink, scale));
    }

    if options.show_dims {
        items.extend(size_dimensions(piece, w, h));
    }
    if options.show_edge_profiles {
        items.extend(edge_labels(piece, w, h));
    }

    let label = options.show_labels.then(|| name_label(piece, scale));

    PieceGroup {
        piece_id: piece.id.clone(),
        selected,
        frame: piece.frame(scale),
        items,
        label,
    }
}

fn sink_shapes(piece: &Piece, sink: &Sink, scale: f64) -> Vec<Primitive> {
    let transform = sink_local_frame(piece, sink, scale);
    let stroke = Stroke::new(SINK_STROKE, 1.0);
    let mut out = vec![Primitive::Shape {
        outline: Outline::sink(sink, scale),
        transform,
        fill: None,
        stroke: Some(stroke.clone()),
    }];
    out.extend(faucet_holes(sink).iter().map(|hole| Primitive::Shape {
        outline: Outline::faucet(hole, scale),
        transform,
        fill: None,
        stroke: Some(stroke.clone()),
    }));
    out
}

/// Dimension from the piece's top or left border to the sink centre.
fn centerline_dimension(piece: &Piece, sink: &Sink, scale: f64) -> Vec<Primitive> {
    let stroke = Stroke::new(DIM_STROKE, 1.0).non_scaling();
    let center = sink_center(piece.w, piece.h, sink);
    let off = DIM_OFFSET_PX * 2.0;

    if sink.side.is_lateral() {
        let x = -off;
        let y = center.y * scale;
        let label = TextLabel::new(
            Point::new(x - 4.0, y / 2.0),
            format!("{}\" CL", format_trimmed(center.y)),
            LABEL_FONT_SIZE,
        )
        .anchored(TextAnchor::End, Baseline::Middle);
        vec![
            Primitive::line(Point::new(x, 0.0), Point::new(x, y), &stroke),
            Primitive::line(Point::new(x - DIM_TICK_PX, 0.0), Point::new(x + DIM_TICK_PX, 0.0), &stroke),
            Primitive::line(Point::new(x - DIM_TICK_PX, y), Point::new(x + DIM_TICK_PX, y), &stroke),
            Primitive::Text(label),
        ]
    } else {
        let y = -off;
        let x = center.x * scale;
        let label = TextLabel::new(
            Point::new(x / 2.0, y - 4.0),
            format!("{}\" CL", format_trimmed(center.x)),
            LABEL_FONT_SIZE,
        );
        vec![
            Primitive::line(Point::new(0.0, y), Point::new(x, y), &stroke),
            Primitive::line(Point::new(0.0, y - DIM_TICK_PX), Point::new(0.0, y + DIM_TICK_PX), &stroke),
            Primitive::line(Point::new(x, y - DIM_TICK_PX), Point::new(x, y + DIM_TICK_PX), &stroke),
            Primitive::Text(label),
        ]
    }
}

/// Width above and height left of the unrotated footprint.
fn size_dimensions(piece: &Piece, w: f64, h: f64) -> Vec<Primitive> {
    let stroke = Stroke::new(DIM_STROKE, 1.0).non_scaling();
    let top = -DIM_OFFSET_PX;
    let left = -DIM_OFFSET_PX;
    vec![
        Primitive::line(Point::new(0.0, top), Point::new(w, top), &stroke),
        Primitive::line(Point::new(0.0, top - DIM_TICK_PX), Point::new(0.0, top + DIM_TICK_PX), &stroke),
        Primitive::line(Point::new(w, top - DIM_TICK_PX), Point::new(w, top + DIM_TICK_PX), &stroke),
        Primitive::Text(TextLabel::new(
            Point::new(w / 2.0, top - 4.0),
            format!("{}\"", format_trimmed(piece.w)),
            LABEL_FONT_SIZE,
        )),
        Primitive::line(Point::new(left, 0.0), Point::new(left, h), &stroke),
        Primitive::line(Point::new(left - DIM_TICK_PX, 0.0), Point::new(left + DIM_TICK_PX, 0.0), &stroke),
        Primitive::line(Point::new(left - DIM_TICK_PX, h), Point::new(left + DIM_TICK_PX, h), &stroke),
        Primitive::Text(
            TextLabel::new(
                Point::new(left - 4.0, h / 2.0),
                format!("{}\"", format_trimmed(piece.h)),
                LABEL_FONT_SIZE,
            )
            .anchored(TextAnchor::End, Baseline::Middle),
        ),
    ]
}

fn edge_labels(piece: &Piece, w: f64, h: f64) -> Vec<Primitive> {
    let m = EDGE_LABEL_MARGIN_PX;
    Edge::ALL
        .iter()
        .filter_map(|&edge| {
            let profile = piece.edge_profiles.get(edge);
            if !profile.shows_label() {
                return None;
            }
            let (pos, anchor, baseline) = match edge {
                Edge::Top => (Point::new(w / 2.0, -m), TextAnchor::Middle, Baseline::Alphabetic),
                Edge::Bottom => (Point::new(w / 2.0, h + m), TextAnchor::Middle, Baseline::Hanging),
                Edge::Left => (Point::new(-m, h / 2.0), TextAnchor::End, Baseline::Middle),
                Edge::Right => (Point::new(w + m, h / 2.0), TextAnchor::Start, Baseline::Middle),
            };
            Some(Primitive::Text(
                TextLabel::new(pos, profile.tag(), EDGE_LABEL_FONT_SIZE).anchored(anchor, baseline),
            ))
        })
        .collect()
}

fn name_label(piece: &Piece, scale: f64) -> TextLabel {
    let c = piece.center();
    let center = Point::new(c.x * scale, c.y * scale - 6.0);
    let mut size = format!("{}\" × {}\"", format_trimmed(piece.w), format_trimmed(piece.h));
    if piece.rotation != 0.0 {
        size.push_str(&format!(" · {}°", format_trimmed(piece.rotation)));
    }
    let name = if piece.name.is_empty() {
        "Piece".to_string()
    } else {
        piece.name.clone()
    };
    let mut label = TextLabel::new(center, name, LABEL_FONT_SIZE);
    label.lines.push(size);
    label
}

fn dimension_group(dim: &Dimension, scale: f64, selected: bool) -> DimensionGroup {
    let g = dimension_geometry(dim, scale);
    let ext = Stroke::new(TEXT_COLOR, 1.0).non_scaling();
    let line = Stroke::new(TEXT_COLOR, if selected { 2.0 } else { 1.0 }).non_scaling();
    let [(a1, b1), (a2, b2)] = g.extension_lines();
    let mut label = TextLabel::new(g.label_pos, g.label.clone(), MANUAL_DIM_FONT_SIZE)
        .anchored(TextAnchor::Middle, Baseline::Middle);
    label.rotation = g.label_angle;
    DimensionGroup {
        dim_id: dim.id.clone(),
        selected,
        items: vec![
            Primitive::line(a1, b1, &ext),
            Primitive::line(a2, b2, &ext),
            Primitive::line(g.q1, g.q2, &line),
            Primitive::Text(label),
        ],
    }
}
