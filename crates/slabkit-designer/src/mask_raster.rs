//! Headless rasterizer for overlay masks.
//! Paints [`MaskGeometry`] into an 8-bit coverage image using tiny-skia, for
//! PNG export and for checking mask geometry without an SVG engine.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use slabkit_core::{Affine, OverlayError};
use tiny_skia::{BlendMode, Color, FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use crate::outline::{Outline, PathSegment};
use crate::overlay_mask::{MaskGeometry, MaskPaint};

fn to_transform(t: &Affine) -> Transform {
    let [a, b, c, d, e, f] = t.to_row();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_path(outline: &Outline) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for segment in outline.segments() {
        match segment {
            PathSegment::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathSegment::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathSegment::QuadTo(c, p) => pb.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathSegment::CubicTo(c1, c2, p) => pb.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathSegment::Close => pb.close(),
        }
    }
    pb.finish()
}

/// Largest raster side, in pixels.
pub const MAX_RASTER_SIDE: u32 = 16_384;
/// Largest raster area, in pixels.
pub const MAX_RASTER_PIXELS: u64 = 64 * 1024 * 1024;

fn raster_size(mask: &MaskGeometry) -> Option<(u32, u32)> {
    let side = |v: f64| (v.is_finite() && v > 0.0).then(|| v.round().max(1.0));
    let (w, h) = (side(mask.width)?, side(mask.height)?);
    if w > MAX_RASTER_SIDE as f64 || h > MAX_RASTER_SIDE as f64 {
        return None;
    }
    let (w, h) = (w as u32, h as u32);
    (u64::from(w) * u64::from(h) <= MAX_RASTER_PIXELS).then_some((w, h))
}

/// Rasterizes a mask: 255 where the overlay shows, 0 where it is hidden.
///
/// Canvases that are empty or larger than [`MAX_RASTER_SIDE`] /
/// [`MAX_RASTER_PIXELS`] are rejected before anything is allocated.
pub fn rasterize_mask(mask: &MaskGeometry) -> Result<GrayImage, OverlayError> {
    let bad_size = || OverlayError::RasterSize {
        width: mask.width,
        height: mask.height,
    };
    let (width, height) = raster_size(mask).ok_or_else(bad_size)?;
    let mut pixmap = Pixmap::new(width, height).ok_or_else(bad_size)?;
    pixmap.fill(Color::BLACK);

    for element in &mask.elements {
        // degenerate outlines (zero-size sinks) produce no path
        let Some(path) = to_path(&element.outline) else {
            continue;
        };
        let mut paint = Paint::default();
        paint.anti_alias = true;
        paint.blend_mode = BlendMode::Source;
        paint.set_color(match element.paint {
            MaskPaint::Reveal => Color::WHITE,
            MaskPaint::Hide => Color::BLACK,
        });
        pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            to_transform(&element.transform),
            None,
        );
    }

    let data = pixmap.data();
    let stride = width as usize;
    Ok(GrayImage::from_fn(width, height, |x, y| {
        let idx = (y as usize * stride + x as usize) * 4;
        Luma([data[idx]])
    }))
}

/// Encodes a coverage image as PNG.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>, OverlayError> {
    let mut bytes = Cursor::new(Vec::new());
    image
        .write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| OverlayError::Encode {
            reason: e.to_string(),
        })?;
    Ok(bytes.into_inner())
}
