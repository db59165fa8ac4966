//! Sink cutouts and faucet slots on the pieces of the active layout.

use slabkit_core::ModelError;

use super::Editor;
use crate::model::{find_model, new_id, Piece, Sink, SinkShape, SinkSide};

impl Editor {
    fn edit_sinks<R>(
        &mut self,
        piece_id: &str,
        f: impl FnOnce(&mut Piece) -> Result<R, ModelError>,
    ) -> Result<R, ModelError> {
        let piece = self
            .layout_mut()
            .piece_mut(piece_id)
            .ok_or_else(|| ModelError::not_found("piece", piece_id))?;
        let out = f(piece)?;
        self.commit();
        Ok(out)
    }

    fn sink_at(piece: &mut Piece, index: usize) -> Result<&mut Sink, ModelError> {
        piece
            .sinks
            .get_mut(index)
            .ok_or_else(|| ModelError::not_found("sink", index.to_string()))
    }

    /// Adds a default sink. Declined once the piece holds four.
    pub fn add_sink(&mut self, piece_id: &str) -> Result<usize, ModelError> {
        self.edit_sinks(piece_id, |piece| {
            let index = piece.add_sink(Sink::new(new_id()))?;
            let cl = piece.sinks[index].centerline;
            piece.set_sink_centerline(index, cl)?;
            Ok(index)
        })
    }

    pub fn duplicate_sink(&mut self, piece_id: &str, index: usize) -> Result<usize, ModelError> {
        self.edit_sinks(piece_id, |piece| piece.duplicate_sink(index))
    }

    pub fn remove_sink(&mut self, piece_id: &str, index: usize) -> Result<Sink, ModelError> {
        self.edit_sinks(piece_id, |piece| {
            piece
                .remove_sink(index)
                .ok_or_else(|| ModelError::not_found("sink", index.to_string()))
        })
    }

    pub fn set_sink_side(
        &mut self,
        piece_id: &str,
        index: usize,
        side: SinkSide,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| piece.set_sink_side(index, side))
    }

    pub fn set_sink_centerline(
        &mut self,
        piece_id: &str,
        index: usize,
        value: f64,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| piece.set_sink_centerline(index, value))
    }

    pub fn set_sink_setback(
        &mut self,
        piece_id: &str,
        index: usize,
        setback: f64,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| {
            Self::sink_at(piece, index)?.set_setback(setback);
            Ok(())
        })
    }

    pub fn set_sink_rotation(
        &mut self,
        piece_id: &str,
        index: usize,
        degrees: f64,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| {
            Self::sink_at(piece, index)?.set_rotation(degrees);
            Ok(())
        })
    }

    /// Switches a sink to a catalogue model.
    pub fn set_sink_model(
        &mut self,
        piece_id: &str,
        index: usize,
        model_id: &str,
    ) -> Result<(), ModelError> {
        let model = find_model(model_id).ok_or_else(|| ModelError::not_found("sink model", model_id))?;
        self.edit_sinks(piece_id, |piece| {
            Self::sink_at(piece, index)?.apply_model(model);
            Ok(())
        })
    }

    /// Sets a custom size, switching the sink off its catalogue model.
    pub fn set_sink_custom_size(
        &mut self,
        piece_id: &str,
        index: usize,
        w: f64,
        h: f64,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| {
            let sink = Self::sink_at(piece, index)?;
            sink.make_custom();
            sink.set_size(w, h);
            Ok(())
        })
    }

    pub fn set_sink_shape(
        &mut self,
        piece_id: &str,
        index: usize,
        shape: SinkShape,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| {
            let sink = Self::sink_at(piece, index)?;
            sink.make_custom();
            sink.shape = shape;
            Ok(())
        })
    }

    pub fn set_sink_corner_radius(
        &mut self,
        piece_id: &str,
        index: usize,
        radius: f64,
    ) -> Result<(), ModelError> {
        self.edit_sinks(piece_id, |piece| {
            Self::sink_at(piece, index)?.set_corner_radius(radius);
            Ok(())
        })
    }

    /// Flips one faucet slot; returns whether it is now on.
    pub fn toggle_faucet(
        &mut self,
        piece_id: &str,
        index: usize,
        slot: i64,
    ) -> Result<bool, ModelError> {
        self.edit_sinks(piece_id, |piece| {
            let sink = Self::sink_at(piece, index)?;
            sink.toggle_faucet(slot).inspect_err(|err| {
                tracing::warn!(sink = %sink.id, error = %err, "faucet toggle rejected");
            })
        })
    }
}
