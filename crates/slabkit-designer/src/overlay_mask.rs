//! Overlay mask geometry.
//!
//! The mask reveals overlay pixels inside piece silhouettes and hides them
//! again inside each sink opening and faucet hole. It is returned as an
//! immutable list of painted outlines so the SVG serializer, the raster
//! backend and headless tests all consume the same description.

use slabkit_core::{Affine, Point, Rect};

use crate::model::Layout;
use crate::outline::Outline;
use crate::sink_placement::{faucet_holes, sink_frame};

/// What an element paints into the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPaint {
    /// White: overlay visible.
    Reveal,
    /// Black: overlay hidden.
    Hide,
}

/// One outline placed on the canvas by `transform`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskElement {
    pub transform: Affine,
    pub outline: Outline,
    pub paint: MaskPaint,
}

impl MaskElement {
    /// Whether the element covers a canvas pixel position.
    pub fn covers(&self, p: Point) -> bool {
        self.transform
            .inverse()
            .map(|inv| self.outline.contains(inv.apply(p)))
            .unwrap_or(false)
    }
}

/// Painter-ordered mask description in canvas pixels. Everything starts
/// hidden; later elements paint over earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskGeometry {
    pub width: f64,
    pub height: f64,
    pub elements: Vec<MaskElement>,
}

impl MaskGeometry {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Resolves the mask at one canvas pixel position.
    pub fn coverage_at(&self, p: Point) -> bool {
        if !self.bounds().contains(&p) {
            return false;
        }
        self.elements
            .iter()
            .rev()
            .find(|e| e.covers(p))
            .map(|e| e.paint == MaskPaint::Reveal)
            .unwrap_or(false)
    }

    pub fn count(&self, paint: MaskPaint) -> usize {
        self.elements.iter().filter(|e| e.paint == paint).count()
    }
}

/// Piece silhouettes minus sink openings and faucet holes.
pub fn build_overlay_mask(layout: &Layout) -> MaskGeometry {
    build(layout, true)
}

/// Piece silhouettes only.
pub fn build_overlay_clip(layout: &Layout) -> MaskGeometry {
    build(layout, false)
}

fn build(layout: &Layout, cutouts: bool) -> MaskGeometry {
    let scale = layout.scale;
    let (width, height) = layout.canvas_px();
    let mut elements = Vec::new();

    for piece in layout.pieces_by_layer() {
        elements.push(MaskElement {
            transform: piece.frame(scale),
            outline: Outline::piece(piece, scale),
            paint: MaskPaint::Reveal,
        });
        if !cutouts {
            continue;
        }
        for sink in &piece.sinks {
            let transform = sink_frame(piece, sink, scale);
            elements.push(MaskElement {
                transform,
                outline: Outline::sink(sink, scale),
                paint: MaskPaint::Hide,
            });
            for hole in faucet_holes(sink) {
                elements.push(MaskElement {
                    transform,
                    outline: Outline::faucet(&hole, scale),
                    paint: MaskPaint::Hide,
                });
            }
        }
    }

    tracing::debug!(
        layout = %layout.id,
        elements = elements.len(),
        cutouts,
        "overlay mask built"
    );
    MaskGeometry {
        width,
        height,
        elements,
    }
}
