//! Overlay image payloads.
//!
//! Overlays store their raster as a `data:` URL. Photos are shrunk to fit
//! a maximum dimension and re-encoded as JPEG before they are stored, which
//! keeps autosave payloads small. A payload that cannot be decoded is kept
//! as-is; the renderer skips it later.

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use slabkit_core::OverlayError;

/// Longest side after downscaling, in pixels.
pub const DEFAULT_MAX_DIMENSION: u32 = 1600;
/// JPEG quality used for re-encoding (0-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 82;

/// Decoded `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Result of preparing an overlay image for storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedImage {
    pub data_url: String,
    /// Natural size of the source image; 0 when it could not be decoded.
    pub nat_w: u32,
    pub nat_h: u32,
    /// False when the original payload was kept unchanged.
    pub compressed: bool,
}

/// Built-in plain slab textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPreset {
    White,
    Gray,
    Black,
}

impl OverlayPreset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "white" => Some(OverlayPreset::White),
            "gray" | "grey" => Some(OverlayPreset::Gray),
            "black" => Some(OverlayPreset::Black),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OverlayPreset::White => "white",
            OverlayPreset::Gray => "gray",
            OverlayPreset::Black => "black",
        }
    }

    fn colors(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            OverlayPreset::White => ([0xf7, 0xf7, 0xf7], [0xdc, 0xdc, 0xdc]),
            OverlayPreset::Gray => ([0xd9, 0xdd, 0xe2], [0xb7, 0xbd, 0xc6]),
            OverlayPreset::Black => ([0x12, 0x13, 0x15], [0x2a, 0x2b, 0x2e]),
        }
    }
}

/// Splits a `data:<mime>;base64,<payload>` URL.
pub fn parse_data_url(url: &str) -> Result<DataUrl, OverlayError> {
    let invalid = |reason: &str| OverlayError::InvalidDataUrl {
        reason: reason.to_string(),
    };
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| invalid("missing 'data:' scheme"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("missing ',' separator"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| invalid("only base64 payloads are supported"))?;
    let bytes = general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| invalid(&e.to_string()))?;
    Ok(DataUrl {
        mime: mime.to_string(),
        bytes,
    })
}

pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, general_purpose::STANDARD.encode(bytes))
}

/// Wraps raw image file bytes, sniffing the MIME type from the content.
pub fn data_url_from_bytes(bytes: &[u8]) -> Result<String, OverlayError> {
    let format = image::guess_format(bytes).map_err(|e| OverlayError::Decode {
        reason: e.to_string(),
    })?;
    Ok(to_data_url(format.to_mime_type(), bytes))
}

fn decode(url: &str) -> Result<DynamicImage, OverlayError> {
    let data = parse_data_url(url)?;
    image::load_from_memory(&data.bytes).map_err(|e| OverlayError::Decode {
        reason: e.to_string(),
    })
}

/// Natural pixel size of the image in a data URL.
pub fn probe_dimensions(url: &str) -> Result<(u32, u32), OverlayError> {
    let img = decode(url)?;
    Ok((img.width(), img.height()))
}

/// Pixel size read from the image header alone. The renderer uses this to
/// skip payloads it could not draw without decoding every frame.
pub fn header_dimensions(url: &str) -> Result<(u32, u32), OverlayError> {
    let data = parse_data_url(url)?;
    let reader = image::ImageReader::new(Cursor::new(data.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| OverlayError::Decode {
            reason: e.to_string(),
        })?;
    let (w, h) = reader.into_dimensions().map_err(|e| OverlayError::Decode {
        reason: e.to_string(),
    })?;
    if w == 0 || h == 0 {
        return Err(OverlayError::Decode {
            reason: format!("empty image {w}x{h}"),
        });
    }
    Ok((w, h))
}

/// Output size for fitting `w × h` inside `max_dim`, never upscaling.
pub fn fit_dimensions(w: u32, h: u32, max_dim: u32) -> (u32, u32) {
    let longest = w.max(h).max(1) as f64;
    let scale = (max_dim as f64 / longest).min(1.0);
    let fit = |v: u32| ((v as f64 * scale).round() as u32).max(1);
    (fit(w), fit(h))
}

/// Decodes, shrinks to `max_dim` and re-encodes as JPEG.
pub fn downscale_data_url(url: &str, max_dim: u32, quality: u8) -> Result<String, OverlayError> {
    let img = decode(url)?;
    let (w, h) = fit_dimensions(img.width(), img.height(), max_dim);
    let resized = if (w, h) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(w, h, FilterType::Triangle)
    };

    let mut bytes = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut bytes, quality.clamp(1, 100));
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| OverlayError::Encode {
            reason: e.to_string(),
        })?;
    tracing::debug!(from = url.len(), to = bytes.len(), w, h, "overlay image re-encoded");
    Ok(to_data_url("image/jpeg", &bytes))
}

/// Compresses a freshly loaded image, falling back to the original payload
/// (with unknown natural size) when it cannot be decoded.
pub fn prepare_overlay_image(url: &str, max_dim: u32, quality: u8) -> PreparedImage {
    let compact = probe_dimensions(url)
        .and_then(|dims| downscale_data_url(url, max_dim, quality).map(|out| (dims, out)));
    match compact {
        Ok(((nat_w, nat_h), data_url)) => PreparedImage {
            data_url,
            nat_w,
            nat_h,
            compressed: true,
        },
        Err(err) => {
            tracing::warn!(error = %err, "overlay load/compress failed, keeping original");
            PreparedImage {
                data_url: url.to_string(),
                nat_w: 0,
                nat_h: 0,
                compressed: false,
            }
        }
    }
}

/// Renders an 800×400 speckled slab texture as a PNG data URL.
pub fn preset_data_url(preset: OverlayPreset) -> Result<PreparedImage, OverlayError> {
    const W: u32 = 800;
    const H: u32 = 400;
    let (base, dots) = preset.colors();
    let img = RgbImage::from_fn(W, H, |x, y| {
        // sparse fixed speckle pattern, about one pixel in forty
        let hash = (x.wrapping_mul(73_856_093) ^ y.wrapping_mul(19_349_663)) % 40;
        if hash == 0 {
            Rgb(dots)
        } else {
            Rgb(base)
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, ImageFormat::Png)
        .map_err(|e| OverlayError::Encode {
            reason: e.to_string(),
        })?;
    Ok(PreparedImage {
        data_url: to_data_url("image/png", bytes.get_ref()),
        nat_w: W,
        nat_h: H,
        compressed: false,
    })
}
