//! Sink cutouts and the sink model catalogue.

use serde::{Deserialize, Serialize};
use slabkit_core::{clamp, sanitize_number, ModelError};

/// Default distance from the chosen edge to the sink's near face, in inches.
pub const SINK_STANDARD_SETBACK: f64 = 3.125;
pub const MAX_SINKS_PER_PIECE: usize = 4;
/// Largest sink corner radius, in inches.
pub const MAX_SINK_CORNER_RADIUS: f64 = 4.0;
/// Number of faucet slots; valid indices are `0..FAUCET_SLOTS`.
pub const FAUCET_SLOTS: usize = 9;
pub const MAX_FAUCET_INDEX: u8 = 8;
/// Upper bound for typed-in sizes and setbacks.
const MAX_SINK_FIELD: f64 = 999.0;

/// Whether the sink follows a catalogue model or custom sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    Model,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkShape {
    Rect,
    Oval,
}

/// Piece edge a sink is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkSide {
    Front,
    Back,
    Left,
    Right,
}

impl SinkSide {
    /// Left and right sinks are turned a quarter turn.
    pub fn is_lateral(&self) -> bool {
        matches!(self, SinkSide::Left | SinkSide::Right)
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "front" => Some(SinkSide::Front),
            "back" => Some(SinkSide::Back),
            "left" => Some(SinkSide::Left),
            "right" => Some(SinkSide::Right),
            _ => None,
        }
    }
}

/// Catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SinkModel {
    pub id: &'static str,
    pub label: &'static str,
    pub shape: SinkShape,
    pub w: f64,
    pub h: f64,
    pub corner_r: f64,
}

pub const SINK_MODELS: [SinkModel; 3] = [
    SinkModel {
        id: "k3218-single",
        label: "Kitchen SS 3218",
        shape: SinkShape::Rect,
        w: 31.0,
        h: 17.0,
        corner_r: 4.0,
    },
    SinkModel {
        id: "oval-1714",
        label: "Oval 1714 Vanity",
        shape: SinkShape::Oval,
        w: 17.0,
        h: 14.0,
        corner_r: 0.0,
    },
    SinkModel {
        id: "rect-1813",
        label: "Rectangle 1813 Vanity",
        shape: SinkShape::Rect,
        w: 18.0,
        h: 13.0,
        corner_r: 0.25,
    },
];

pub fn find_model(id: &str) -> Option<&'static SinkModel> {
    SINK_MODELS.iter().find(|m| m.id == id)
}

/// A cutout attached to one edge of a piece.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sink {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: SinkKind,
    pub model_id: Option<String>,
    pub shape: SinkShape,
    pub w: f64,
    pub h: f64,
    pub corner_r: f64,
    pub side: SinkSide,
    /// Offset along the piece's unrotated top (front/back) or left
    /// (left/right) border.
    pub centerline: f64,
    /// Distance from the edge to the sink's near face.
    pub setback: f64,
    /// Extra local rotation in degrees, `[0, 360]`.
    pub rotation: f64,
    /// Enabled faucet slots, sorted and unique.
    pub faucets: Vec<u8>,
}

impl Sink {
    /// Default sink: first catalogue model on the back edge with one
    /// centred faucet.
    pub fn new(id: impl Into<String>) -> Self {
        let model = &SINK_MODELS[0];
        Self {
            id: id.into(),
            kind: SinkKind::Model,
            model_id: Some(model.id.to_string()),
            shape: model.shape,
            w: model.w,
            h: model.h,
            corner_r: model.corner_r,
            side: SinkSide::Back,
            centerline: 20.0,
            setback: SINK_STANDARD_SETBACK,
            rotation: 0.0,
            faucets: vec![4],
        }
    }

    /// Copies shape and size from a catalogue model.
    pub fn apply_model(&mut self, model: &SinkModel) {
        self.kind = SinkKind::Model;
        self.model_id = Some(model.id.to_string());
        self.shape = model.shape;
        self.w = model.w;
        self.h = model.h;
        self.corner_r = clamp(model.corner_r, 0.0, MAX_SINK_CORNER_RADIUS);
    }

    pub fn model(&self) -> Option<&'static SinkModel> {
        self.model_id.as_deref().and_then(find_model)
    }

    /// Switches to custom sizing, keeping the current dimensions.
    pub fn make_custom(&mut self) {
        self.kind = SinkKind::Custom;
    }

    pub fn set_size(&mut self, w: f64, h: f64) {
        self.w = clamp(sanitize_number(w, self.w), 0.0, MAX_SINK_FIELD);
        self.h = clamp(sanitize_number(h, self.h), 0.0, MAX_SINK_FIELD);
    }

    pub fn set_corner_radius(&mut self, r: f64) {
        self.corner_r = clamp(sanitize_number(r, 0.0), 0.0, MAX_SINK_CORNER_RADIUS);
    }

    pub fn set_setback(&mut self, setback: f64) {
        self.setback = clamp(
            sanitize_number(setback, SINK_STANDARD_SETBACK),
            0.0,
            MAX_SINK_FIELD,
        );
    }

    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation = clamp(sanitize_number(degrees, 0.0), 0.0, 360.0);
    }

    /// Sets the centerline clamped to `[0, axis_length]`.
    pub fn set_centerline(&mut self, value: f64, axis_length: f64) {
        let v = sanitize_number(value, self.centerline);
        self.centerline = clamp(v, 0.0, axis_length.max(0.0));
    }

    /// Corner radius used for drawing: capped at 4" and at half the
    /// smaller side.
    pub fn effective_corner_radius(&self) -> f64 {
        clamp(self.corner_r, 0.0, MAX_SINK_CORNER_RADIUS)
            .min(self.w / 2.0)
            .min(self.h / 2.0)
            .max(0.0)
    }

    pub fn has_faucet(&self, index: u8) -> bool {
        self.faucets.binary_search(&index).is_ok()
    }

    /// Turns a faucet slot on or off. Out-of-range slots are rejected.
    pub fn toggle_faucet(&mut self, index: i64) -> Result<bool, ModelError> {
        let slot = validate_faucet_index(index)?;
        match self.faucets.binary_search(&slot) {
            Ok(pos) => {
                self.faucets.remove(pos);
                Ok(false)
            }
            Err(pos) => {
                self.faucets.insert(pos, slot);
                Ok(true)
            }
        }
    }

    /// Replaces the faucet set. Any out-of-range slot rejects the whole set.
    pub fn set_faucets<I: IntoIterator<Item = i64>>(&mut self, slots: I) -> Result<(), ModelError> {
        let mut next = Vec::with_capacity(FAUCET_SLOTS);
        for index in slots {
            next.push(validate_faucet_index(index)?);
        }
        next.sort_unstable();
        next.dedup();
        self.faucets = next;
        Ok(())
    }
}

fn validate_faucet_index(index: i64) -> Result<u8, ModelError> {
    if (0..=MAX_FAUCET_INDEX as i64).contains(&index) {
        Ok(index as u8)
    } else {
        tracing::warn!(index, "faucet index rejected");
        Err(ModelError::FaucetIndex {
            index,
            max: MAX_FAUCET_INDEX,
        })
    }
}
