use super::common::{
    require_float_in, require_int_in, require_non_blank, ModelVariant, PresetStyle,
};
use crate::error::{LeonardoError, Result};
use serde::Serialize;

pub const DEFAULT_WIDTH: u32 = 1216;
pub const DEFAULT_HEIGHT: u32 = 1520;
pub const DEFAULT_NUM_IMAGES: u32 = 4;

pub const MIN_DIMENSION: u32 = 512;
pub const MAX_DIMENSION: u32 = 1536;

pub const DEFAULT_PHOENIX_CONTRAST: f64 = 3.5;
pub const DEFAULT_PHOENIX_STYLE_UUID: &str = "a5632c7c-ddbb-4e2f-ba34-8456ab3ac436";
pub const MIN_CONTRAST: f64 = 1.0;
pub const MAX_CONTRAST: f64 = 4.5;

/// Phoenix-only fields. Defaults: contrast 3.5, the stock style UUID, alchemy on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoenixParams {
    pub contrast: f64,
    pub alchemy: bool,
    #[serde(rename = "styleUUID")]
    pub style_uuid: String,
}

impl Default for PhoenixParams {
    fn default() -> Self {
        PhoenixParams {
            contrast: DEFAULT_PHOENIX_CONTRAST,
            alchemy: true,
            style_uuid: DEFAULT_PHOENIX_STYLE_UUID.to_string(),
        }
    }
}

impl PhoenixParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contrast(mut self, contrast: f64) -> Self {
        self.contrast = contrast;
        self
    }

    pub fn with_style_uuid(mut self, style_uuid: impl Into<String>) -> Self {
        self.style_uuid = style_uuid.into();
        self
    }

    pub fn with_alchemy(mut self, alchemy: bool) -> Self {
        self.alchemy = alchemy;
        self
    }

    fn validate(&self) -> Result<()> {
        require_float_in("contrast", self.contrast, MIN_CONTRAST, MAX_CONTRAST)?;
        require_non_blank("styleUUID", &self.style_uuid)
    }
}

/// Anime XL fields. Defaults: CINEMATIC preset, alchemy on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimeXlParams {
    pub alchemy: bool,
    #[serde(rename = "presetStyle")]
    pub preset_style: PresetStyle,
}

impl Default for AnimeXlParams {
    fn default() -> Self {
        AnimeXlParams {
            alchemy: true,
            preset_style: PresetStyle::Cinematic,
        }
    }
}

impl AnimeXlParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset_style(mut self, preset_style: PresetStyle) -> Self {
        self.preset_style = preset_style;
        self
    }

    pub fn with_alchemy(mut self, alchemy: bool) -> Self {
        self.alchemy = alchemy;
        self
    }
}

/// Variant-specific parameters. The variant picks the model id.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModelParams {
    Phoenix(PhoenixParams),
    AnimeXl(AnimeXlParams),
}

impl ModelParams {
    pub fn variant(&self) -> ModelVariant {
        match self {
            ModelParams::Phoenix(_) => ModelVariant::Phoenix,
            ModelParams::AnimeXl(_) => ModelVariant::AnimeXl,
        }
    }
}

impl From<PhoenixParams> for ModelParams {
    fn from(params: PhoenixParams) -> Self {
        ModelParams::Phoenix(params)
    }
}

impl From<AnimeXlParams> for ModelParams {
    fn from(params: AnimeXlParams) -> Self {
        ModelParams::AnimeXl(params)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub num_images: u32,
    pub params: ModelParams,
}

/// Wire body for `POST /generations`.
#[derive(Debug, Serialize)]
pub struct GenerationPayload<'a> {
    #[serde(rename = "modelId")]
    pub model_id: &'static str,
    pub prompt: &'a str,
    pub width: u32,
    pub height: u32,
    pub num_images: u32,
    #[serde(flatten)]
    pub params: &'a ModelParams,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, params: impl Into<ModelParams>) -> Self {
        GenerationRequest {
            prompt: prompt.into(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            num_images: DEFAULT_NUM_IMAGES,
            params: params.into(),
        }
    }

    pub fn phoenix(prompt: impl Into<String>) -> Self {
        Self::new(prompt, PhoenixParams::default())
    }

    pub fn anime_xl(prompt: impl Into<String>) -> Self {
        Self::new(prompt, AnimeXlParams::default())
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_num_images(mut self, num_images: u32) -> Self {
        self.num_images = num_images;
        self
    }

    pub fn with_params(mut self, params: impl Into<ModelParams>) -> Self {
        self.params = params.into();
        self
    }

    pub fn variant(&self) -> ModelVariant {
        self.params.variant()
    }

    pub fn payload(&self) -> GenerationPayload<'_> {
        GenerationPayload {
            model_id: self.variant().model_id(),
            prompt: &self.prompt,
            width: self.width,
            height: self.height,
            num_images: self.num_images,
            params: &self.params,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require_non_blank("prompt", &self.prompt)?;
        validate_dimension("width", self.width)?;
        validate_dimension("height", self.height)?;
        if self.num_images == 0 {
            return Err(LeonardoError::invalid("num_images", "must be at least 1"));
        }
        match &self.params {
            ModelParams::Phoenix(params) => params.validate(),
            ModelParams::AnimeXl(_) => Ok(()),
        }
    }
}

fn validate_dimension(field: &'static str, value: u32) -> Result<()> {
    require_int_in(field, value, MIN_DIMENSION, MAX_DIMENSION)?;
    if value % 8 != 0 {
        return Err(LeonardoError::invalid(
            field,
            format!("must be a multiple of 8, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_phoenix_default_payload() {
        let request = GenerationRequest::phoenix("neon city");
        let payload = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(
            payload,
            json!({
                "modelId": "de7d3faf-762f-48e0-b3b7-9d0ac3a3fcf3",
                "prompt": "neon city",
                "width": 1216,
                "height": 1520,
                "num_images": 4,
                "contrast": 3.5,
                "alchemy": true,
                "styleUUID": "a5632c7c-ddbb-4e2f-ba34-8456ab3ac436"
            })
        );
    }

    #[test]
    fn test_anime_xl_default_payload() {
        let request = GenerationRequest::anime_xl("rainy rooftop");
        let payload = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(
            payload,
            json!({
                "modelId": "e71a1c2f-4f80-4800-934f-2c68979d8cc8",
                "prompt": "rainy rooftop",
                "width": 1216,
                "height": 1520,
                "num_images": 4,
                "alchemy": true,
                "presetStyle": "CINEMATIC"
            })
        );
    }

    #[test]
    fn test_overrides_flow_into_payload() {
        let request = GenerationRequest::anime_xl("portrait")
            .with_dimensions(1024, 768)
            .with_num_images(2)
            .with_params(
                AnimeXlParams::new()
                    .with_preset_style(PresetStyle::Portrait)
                    .with_alchemy(false),
            );
        let payload = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(payload["width"], 1024);
        assert_eq!(payload["height"], 768);
        assert_eq!(payload["num_images"], 2);
        assert_eq!(payload["presetStyle"], "PORTRAIT");
        assert_eq!(payload["alchemy"], false);
        assert!(payload.get("contrast").is_none());
    }

    #[test]
    fn test_switching_params_switches_model() {
        let request = GenerationRequest::anime_xl("x").with_params(PhoenixParams::default());
        assert_eq!(request.variant(), ModelVariant::Phoenix);
        assert_eq!(request.payload().model_id, ModelVariant::Phoenix.model_id());
    }

    #[test]
    fn test_payload_serialization_is_stable() {
        let request = GenerationRequest::phoenix("same input");
        let first = serde_json::to_vec(&request.payload()).unwrap();
        let second = serde_json::to_vec(&request.payload()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_defaults_validate() {
        assert!(GenerationRequest::phoenix("ok").validate().is_ok());
        assert!(GenerationRequest::anime_xl("ok").validate().is_ok());
    }

    #[test]
    fn test_dimension_validation() {
        let err = GenerationRequest::phoenix("p")
            .with_dimensions(1020, 1024)
            .validate()
            .unwrap_err();
        assert!(matches!(err, LeonardoError::InvalidParameter { field: "width", .. }));

        let err = GenerationRequest::phoenix("p")
            .with_dimensions(1024, 1544)
            .validate()
            .unwrap_err();
        assert!(matches!(err, LeonardoError::InvalidParameter { field: "height", .. }));

        assert!(GenerationRequest::phoenix("p")
            .with_dimensions(512, 1536)
            .validate()
            .is_ok());
        assert!(GenerationRequest::phoenix("p")
            .with_dimensions(504, 1024)
            .validate()
            .is_err());
    }

    #[test]
    fn test_prompt_and_count_validation() {
        assert!(GenerationRequest::phoenix("   ").validate().is_err());
        let err = GenerationRequest::phoenix("p")
            .with_num_images(0)
            .validate()
            .unwrap_err();
        assert!(matches!(
            err,
            LeonardoError::InvalidParameter { field: "num_images", .. }
        ));
    }

    #[test]
    fn test_contrast_validation() {
        let request = GenerationRequest::phoenix("p")
            .with_params(PhoenixParams::new().with_contrast(5.0));
        assert!(matches!(
            request.validate().unwrap_err(),
            LeonardoError::InvalidParameter { field: "contrast", .. }
        ));

        let request = GenerationRequest::phoenix("p")
            .with_params(PhoenixParams::new().with_contrast(1.0).with_style_uuid(""));
        assert!(matches!(
            request.validate().unwrap_err(),
            LeonardoError::InvalidParameter { field: "styleUUID", .. }
        ));
    }
}
