use crate::assets::color::Rgba8;
use crate::assets::decode::SourceImage;
use crate::config::{CaptionConfig, MemeConfig};
use crate::foundation::core::{Canvas, Point};
use crate::foundation::error::{MemeError, MemeResult};
use crate::layout::fit::{FitResult, fit_image};
use crate::render::surface::{CanvasSurface, TextStyle};
use crate::render::text::{CaptionFont, TextLayoutEngine};
use crate::session::state::CaptionPair;

/// Resolve the caption font named by the configuration.
pub fn resolve_caption_font(cfg: &CaptionConfig) -> MemeResult<CaptionFont> {
    match &cfg.font_path {
        Some(path) => CaptionFont::from_path(path),
        None => CaptionFont::from_system(&cfg.font_family),
    }
}

/// Baseline anchors for the top and bottom captions: horizontally centered, `margin_frac` of the
/// canvas height in from each edge.
pub fn caption_anchors(canvas: Canvas, margin_frac: f64) -> (Point, Point) {
    let spacing = canvas.height_f64() * margin_frac;
    let x = canvas.width_f64() / 2.0;
    (
        Point::new(x, spacing),
        Point::new(x, canvas.height_f64() - spacing),
    )
}

/// Drawing steps of the meme page, over a [`CanvasSurface`].
pub struct RenderPipeline {
    background: Rgba8,
    caption: TextStyle,
    margin_frac: f64,
    text: Option<TextLayoutEngine>,
}

impl std::fmt::Debug for RenderPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderPipeline")
            .field("background", &self.background)
            .field("caption", &self.caption)
            .field("margin_frac", &self.margin_frac)
            .field(
                "font_family",
                &self.text.as_ref().map(TextLayoutEngine::family_name),
            )
            .finish()
    }
}

impl RenderPipeline {
    /// Build a pipeline. Without a usable font, captions are skipped with a warning.
    pub fn new(cfg: &MemeConfig, font: Option<&CaptionFont>) -> Self {
        let text = font.and_then(|f| match TextLayoutEngine::new(f) {
            Ok(engine) => Some(engine),
            Err(err) => {
                tracing::warn!(font = %f.origin, error = %err, "caption font unusable");
                None
            }
        });
        Self {
            background: cfg.background.0,
            caption: TextStyle {
                size_px: cfg.caption.size_px,
                color: cfg.caption.color,
            },
            margin_frac: cfg.caption.margin_frac,
            text,
        }
    }

    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Clear, then fill the whole canvas with the opaque background.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn paint_background(&self, surface: &mut CanvasSurface) -> MemeResult<()> {
        surface.clear();
        surface.fill_rect(surface.canvas().bounds(), self.background)
    }

    /// Draw `image` centered and scaled to fit, returning the rectangle used.
    #[tracing::instrument(level = "debug", skip_all, fields(w = image.width, h = image.height))]
    pub fn draw_image(
        &self,
        surface: &mut CanvasSurface,
        image: &SourceImage,
    ) -> MemeResult<FitResult> {
        let fit = fit_image(surface.canvas(), image.width, image.height);
        surface.draw_image(image, fit.to_rect())?;
        Ok(fit)
    }

    /// Draw both captions upper-cased over whatever is on the canvas.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn draw_captions(
        &mut self,
        surface: &mut CanvasSurface,
        captions: &CaptionPair,
    ) -> MemeResult<()> {
        let Some(engine) = self.text.as_mut() else {
            return Err(MemeError::render("no caption font available"));
        };
        let upper = captions.upper();
        let (top, bottom) = caption_anchors(surface.canvas(), self.margin_frac);
        surface.fill_text(&upper.top, top, self.caption, engine)?;
        surface.fill_text(&upper.bottom, bottom, self.caption, engine)?;
        Ok(())
    }

    /// Wipe the canvas; the background is not repainted.
    pub fn clear(&self, surface: &mut CanvasSurface) {
        surface.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
