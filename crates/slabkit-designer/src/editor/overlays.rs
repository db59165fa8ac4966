//! Slab photo overlays of the active layout.

use slabkit_core::{ModelError, OverlayError};

use super::Editor;
use crate::model::Overlay;
use crate::overlay_image::{
    data_url_from_bytes, prepare_overlay_image, preset_data_url, OverlayPreset, PreparedImage,
};
use crate::overlay_mask::{build_overlay_mask, MaskGeometry};

impl Editor {
    fn edit_overlay<R>(
        &mut self,
        index: usize,
        f: impl FnOnce(&mut Overlay) -> R,
    ) -> Result<R, ModelError> {
        let overlay = self
            .layout_mut()
            .overlays
            .get_mut(index)
            .ok_or_else(|| ModelError::not_found("overlay", index.to_string()))?;
        let out = f(overlay);
        self.commit();
        Ok(out)
    }

    /// Adds an empty overlay and selects it. Declined past two.
    pub fn add_overlay(&mut self) -> Result<usize, ModelError> {
        let (width, height) = (self.options.default_slab_width, self.options.default_slab_height);
        let index = self.layout_mut().add_overlay()?;
        self.layout_mut().overlays[index].set_slab_size(width, height);
        self.commit();
        Ok(index)
    }

    pub fn remove_overlay(&mut self, index: usize) -> bool {
        if self.layout_mut().remove_overlay(index).is_none() {
            return false;
        }
        self.commit();
        true
    }

    /// Shows an overlay in the overlay editor.
    pub fn select_overlay(&mut self, index: usize) -> Result<(), ModelError> {
        let layout = self.layout_mut();
        if index >= layout.overlays.len() {
            return Err(ModelError::not_found("overlay", index.to_string()));
        }
        layout.ov_sel = index;
        self.touch();
        Ok(())
    }

    fn store_image(&mut self, index: usize, image: PreparedImage) -> Result<PreparedImage, ModelError> {
        self.edit_overlay(index, |overlay| {
            overlay.data_url = image.data_url.clone();
            overlay.nat_w = image.nat_w;
            overlay.nat_h = image.nat_h;
            overlay.visible = true;
        })?;
        Ok(image)
    }

    /// Stores an image from a data URL, downscaled and re-encoded when it
    /// can be decoded and kept as-is otherwise.
    pub fn load_overlay_image(
        &mut self,
        index: usize,
        data_url: &str,
    ) -> Result<PreparedImage, ModelError> {
        if index >= self.layout().overlays.len() {
            return Err(ModelError::not_found("overlay", index.to_string()));
        }
        let image = prepare_overlay_image(
            data_url,
            self.options.overlay_max_dimension,
            self.options.overlay_jpeg_quality,
        );
        self.store_image(index, image)
    }

    /// Stores an image from raw file bytes.
    pub fn load_overlay_bytes(
        &mut self,
        index: usize,
        bytes: &[u8],
    ) -> slabkit_core::Result<PreparedImage> {
        let url = data_url_from_bytes(bytes)?;
        Ok(self.load_overlay_image(index, &url)?)
    }

    pub fn apply_overlay_preset(
        &mut self,
        index: usize,
        preset: OverlayPreset,
    ) -> slabkit_core::Result<PreparedImage> {
        let image = preset_data_url(preset).inspect_err(|err: &OverlayError| {
            tracing::warn!(preset = preset.name(), error = %err, "preset render failed");
        })?;
        Ok(self.store_image(index, image)?)
    }

    pub fn clear_overlay_image(&mut self, index: usize) -> Result<(), ModelError> {
        self.edit_overlay(index, |overlay| {
            overlay.data_url.clear();
            overlay.nat_w = 0;
            overlay.nat_h = 0;
        })
    }

    pub fn rename_overlay(&mut self, index: usize, name: &str) -> Result<(), ModelError> {
        self.edit_overlay(index, |overlay| overlay.name = name.to_string())
    }

    pub fn set_overlay_opacity(&mut self, index: usize, opacity: f64) -> Result<(), ModelError> {
        self.edit_overlay(index, |overlay| overlay.set_opacity(opacity))
    }

    pub fn set_overlay_slab_size(&mut self, index: usize, w: f64, h: f64) -> Result<(), ModelError> {
        self.edit_overlay(index, |overlay| overlay.set_slab_size(w, h))
    }

    pub fn set_overlay_position(&mut self, index: usize, x: f64, y: f64) -> Result<(), ModelError> {
        self.edit_overlay(index, |overlay| overlay.set_position(x, y))
    }

    pub fn toggle_overlay_visible(&mut self, index: usize) -> Result<bool, ModelError> {
        self.edit_overlay(index, Overlay::toggle_visible)
    }

    pub fn set_overlay_clip(&mut self, clip: bool) {
        self.layout_mut().overlay_clip = clip;
        self.commit();
    }

    /// Mask geometry for the active layout's overlays.
    pub fn overlay_mask(&self) -> MaskGeometry {
        build_overlay_mask(self.layout())
    }
}
