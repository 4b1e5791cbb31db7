use crate::error::{LeonardoError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Body returned by the service, passed through untouched.
pub type ServiceResponse = serde_json::Value;

pub const PHOENIX_MODEL_ID: &str = "de7d3faf-762f-48e0-b3b7-9d0ac3a3fcf3";
pub const ANIME_XL_MODEL_ID: &str = "e71a1c2f-4f80-4800-934f-2c68979d8cc8";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelVariant {
    Phoenix,
    AnimeXl,
}

impl ModelVariant {
    pub const ALL: [ModelVariant; 2] = [ModelVariant::Phoenix, ModelVariant::AnimeXl];

    pub fn model_id(&self) -> &'static str {
        match self {
            ModelVariant::Phoenix => PHOENIX_MODEL_ID,
            ModelVariant::AnimeXl => ANIME_XL_MODEL_ID,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModelVariant::Phoenix => "Phoenix 1.0",
            ModelVariant::AnimeXl => "Anime XL",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $wire)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LeonardoError;

            /// Case-insensitive; `-` and spaces are read as `_`.
            fn from_str(s: &str) -> Result<Self> {
                let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == normalized)
                    .ok_or_else(|| {
                        LeonardoError::invalid(
                            stringify!($name),
                            format!("unknown value `{}`", s),
                        )
                    })
            }
        }
    };
}

wire_enum! {
    /// Preset styles accepted by Alchemy-enabled SDXL models such as Anime XL.
    pub enum PresetStyle {
        Anime => "ANIME",
        Bokeh => "BOKEH",
        Cinematic => "CINEMATIC",
        CinematicCloseup => "CINEMATIC_CLOSEUP",
        Creative => "CREATIVE",
        Dynamic => "DYNAMIC",
        Environment => "ENVIRONMENT",
        Fashion => "FASHION",
        Film => "FILM",
        Food => "FOOD",
        General => "GENERAL",
        Hdr => "HDR",
        Illustration => "ILLUSTRATION",
        Leonardo => "LEONARDO",
        LongExposure => "LONG_EXPOSURE",
        Macro => "MACRO",
        Minimalistic => "MINIMALISTIC",
        Monochrome => "MONOCHROME",
        Moody => "MOODY",
        None => "NONE",
        Neutral => "NEUTRAL",
        Photography => "PHOTOGRAPHY",
        Portrait => "PORTRAIT",
        Raytraced => "RAYTRACED",
        Render3D => "RENDER_3D",
        Retro => "RETRO",
        SketchBw => "SKETCH_BW",
        SketchColor => "SKETCH_COLOR",
        StockPhoto => "STOCK_PHOTO",
        Vibrant => "VIBRANT",
        Unprocessed => "UNPROCESSED",
    }
}

wire_enum! {
    pub enum UltraUpscaleStyle {
        Artistic => "ARTISTIC",
        Photographic => "PHOTOGRAPHIC",
    }
}

impl Default for PresetStyle {
    fn default() -> Self {
        PresetStyle::Cinematic
    }
}

impl Default for UltraUpscaleStyle {
    fn default() -> Self {
        UltraUpscaleStyle::Artistic
    }
}

pub(crate) fn require_non_blank(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(LeonardoError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn require_float_in(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(LeonardoError::invalid(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

pub(crate) fn require_int_in(field: &'static str, value: u32, min: u32, max: u32) -> Result<()> {
    if value < min || value > max {
        return Err(LeonardoError::invalid(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_ids_are_fixed() {
        assert_eq!(
            ModelVariant::Phoenix.model_id(),
            "de7d3faf-762f-48e0-b3b7-9d0ac3a3fcf3"
        );
        assert_eq!(
            ModelVariant::AnimeXl.model_id(),
            "e71a1c2f-4f80-4800-934f-2c68979d8cc8"
        );
    }

    #[test]
    fn test_preset_style_wire_names_match_as_str() {
        for style in PresetStyle::ALL {
            assert_eq!(
                serde_json::to_value(style).unwrap(),
                serde_json::Value::String(style.as_str().to_string())
            );
        }
        assert_eq!(PresetStyle::Render3D.as_str(), "RENDER_3D");
    }

    #[test]
    fn test_preset_style_from_str() {
        assert_eq!("cinematic".parse::<PresetStyle>().unwrap(), PresetStyle::Cinematic);
        assert_eq!(
            "stock-photo".parse::<PresetStyle>().unwrap(),
            PresetStyle::StockPhoto
        );
        assert_eq!("RENDER_3D".parse::<PresetStyle>().unwrap(), PresetStyle::Render3D);
        assert!("watercolour".parse::<PresetStyle>().is_err());
    }

    #[test]
    fn test_upscale_style_defaults_and_parse() {
        assert_eq!(UltraUpscaleStyle::default().as_str(), "ARTISTIC");
        assert_eq!(
            "Photographic".parse::<UltraUpscaleStyle>().unwrap(),
            UltraUpscaleStyle::Photographic
        );
    }

    #[test]
    fn test_range_checks() {
        assert!(require_float_in("contrast", 1.0, 1.0, 4.5).is_ok());
        assert!(require_float_in("contrast", 4.6, 1.0, 4.5).is_err());
        assert!(require_float_in("contrast", f64::NAN, 1.0, 4.5).is_err());
        assert!(require_int_in("similarity", 0, 1, 5).is_err());
        assert!(require_int_in("similarity", 5, 1, 5).is_ok());
        assert!(require_non_blank("prompt", "  ").is_err());
    }
}
