use super::common::{require_float_in, require_int_in, require_non_blank, UltraUpscaleStyle};
use crate::error::Result;
use serde::Serialize;

pub const DEFAULT_UPSCALE_MULTIPLIER: f64 = 1.5;
pub const DEFAULT_UPSCALE_STRENGTH: u32 = 5;

pub const MIN_UPSCALE_MULTIPLIER: f64 = 1.0;
pub const MAX_UPSCALE_MULTIPLIER: f64 = 2.0;
pub const MIN_UPSCALE_STRENGTH: u32 = 1;
pub const MAX_UPSCALE_STRENGTH: u32 = 5;

/// Universal upscaler job for a previously generated image.
///
/// Serializes directly as the `POST /variations/universal-upscaler` body.
/// Defaults: ARTISTIC style, multiplier 1.5, creativity/detail/similarity 5.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpscaleRequest {
    pub ultra_upscale_style: UltraUpscaleStyle,
    pub creativity_strength: u32,
    pub detail_contrast: u32,
    pub similarity: u32,
    pub upscale_multiplier: f64,
    pub generated_image_id: String,
}

impl UpscaleRequest {
    pub fn new(generated_image_id: impl Into<String>) -> Self {
        UpscaleRequest {
            ultra_upscale_style: UltraUpscaleStyle::default(),
            creativity_strength: DEFAULT_UPSCALE_STRENGTH,
            detail_contrast: DEFAULT_UPSCALE_STRENGTH,
            similarity: DEFAULT_UPSCALE_STRENGTH,
            upscale_multiplier: DEFAULT_UPSCALE_MULTIPLIER,
            generated_image_id: generated_image_id.into(),
        }
    }

    pub fn with_style(mut self, style: UltraUpscaleStyle) -> Self {
        self.ultra_upscale_style = style;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.upscale_multiplier = multiplier;
        self
    }

    pub fn with_creativity_strength(mut self, value: u32) -> Self {
        self.creativity_strength = value;
        self
    }

    pub fn with_detail_contrast(mut self, value: u32) -> Self {
        self.detail_contrast = value;
        self
    }

    pub fn with_similarity(mut self, value: u32) -> Self {
        self.similarity = value;
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_non_blank("generatedImageId", &self.generated_image_id)?;
        require_float_in(
            "upscaleMultiplier",
            self.upscale_multiplier,
            MIN_UPSCALE_MULTIPLIER,
            MAX_UPSCALE_MULTIPLIER,
        )?;
        for (field, value) in [
            ("creativityStrength", self.creativity_strength),
            ("detailContrast", self.detail_contrast),
            ("similarity", self.similarity),
        ] {
            require_int_in(field, value, MIN_UPSCALE_STRENGTH, MAX_UPSCALE_STRENGTH)?;
        }
        Ok(())
    }
}
