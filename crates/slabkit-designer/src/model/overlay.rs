//! Reference photo placed under the drawing.

use serde::{Deserialize, Serialize};
use slabkit_core::{clamp, sanitize_number, sanitize_positive, Rect};

/// Display width of a new overlay, in inches.
pub const DEFAULT_SLAB_WIDTH: f64 = 126.0;
/// Display height of a new overlay, in inches.
pub const DEFAULT_SLAB_HEIGHT: f64 = 63.0;
pub const MAX_OVERLAYS_PER_LAYOUT: usize = 2;

/// An overlay image sized in real-world inches.
///
/// `slab_w × slab_h` is the displayed size; the natural pixel size is kept
/// only for information and never affects layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    pub id: String,
    pub name: String,
    #[serde(rename = "dataURL")]
    pub data_url: String,
    pub nat_w: u32,
    pub nat_h: u32,
    pub slab_w: f64,
    pub slab_h: f64,
    pub x: f64,
    pub y: f64,
    pub opacity: f64,
    pub visible: bool,
}

impl Overlay {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_url: String::new(),
            nat_w: 0,
            nat_h: 0,
            slab_w: DEFAULT_SLAB_WIDTH,
            slab_h: DEFAULT_SLAB_HEIGHT,
            x: 0.0,
            y: 0.0,
            opacity: 1.0,
            visible: true,
        }
    }

    pub fn has_image(&self) -> bool {
        !self.data_url.is_empty()
    }

    /// Visible with an image payload. The renderer still skips payloads
    /// whose image header cannot be read.
    pub fn is_drawable(&self) -> bool {
        self.visible && self.has_image()
    }

    /// Pixel rectangle the image is stretched into. Coordinates are
    /// rounded and the size is at least one pixel.
    pub fn display_rect_px(&self, scale: f64) -> Rect {
        Rect::new(
            (self.x * scale).round(),
            (self.y * scale).round(),
            (self.slab_w * scale).round().max(1.0),
            (self.slab_h * scale).round().max(1.0),
        )
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = clamp(opacity, 0.0, 1.0);
    }

    /// Sets the display size. Invalid values keep the previous size.
    pub fn set_slab_size(&mut self, w: f64, h: f64) {
        self.slab_w = sanitize_positive(w, self.slab_w);
        self.slab_h = sanitize_positive(h, self.slab_h);
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.x = sanitize_number(x, self.x);
        self.y = sanitize_number(y, self.y);
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }
}
