use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::assets::color::Rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{MemeError, MemeResult};

/// Session configuration, usually read from a JSON file. Every field has a default matching the
/// classic meme page: a 400x400 canvas on black with 30px Arial captions.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MemeConfig {
    pub canvas: Canvas,
    /// Opaque fill painted behind every newly loaded image.
    pub background: Background,
    pub caption: CaptionConfig,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Background(pub Rgba8);

impl Default for Background {
    fn default() -> Self {
        Self(Rgba8::BLACK)
    }
}

/// How captions are drawn.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaptionConfig {
    /// Family looked up in the system font database when `font_path` is unset.
    pub font_family: String,
    /// Explicit font file; wins over `font_family`.
    pub font_path: Option<PathBuf>,
    pub size_px: f32,
    pub color: Rgba8,
    /// Baseline distance from the top and bottom edges, as a fraction of canvas height.
    pub margin_frac: f64,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_owned(),
            font_path: None,
            size_px: 30.0,
            // The page never changes fillStyle after painting the black background.
            color: Rgba8::BLACK,
            margin_frac: 0.05,
        }
    }
}

impl MemeConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> MemeResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| MemeError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MemeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> MemeResult<()> {
        self.canvas.validate()?;
        let c = &self.caption;
        if !c.size_px.is_finite() || c.size_px <= 0.0 {
            return Err(MemeError::validation(
                "caption.size_px must be finite and > 0",
            ));
        }
        if !(0.0..=0.5).contains(&c.margin_frac) {
            return Err(MemeError::validation(
                "caption.margin_frac must be in [0, 0.5]",
            ));
        }
        if c.font_path.is_none() && c.font_family.trim().is_empty() {
            return Err(MemeError::validation(
                "caption.font_family must be non-empty when font_path is unset",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
