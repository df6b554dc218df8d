use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::color::Rgba8;
use crate::assets::decode::{SourceImage, unpremultiply_rgba8_in_place};
use crate::foundation::core::{Affine, Canvas, MAX_CANVAS_DIM, Point, Rect};
use crate::foundation::error::{MemeError, MemeResult};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};

/// Font size and color for [`CanvasSurface::fill_text`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: Rgba8,
}

/// Fixed-size 2D raster target holding premultiplied RGBA8 pixels.
///
/// Mirrors the four canvas operations the meme page relies on: clear, fill-rect,
/// draw-image-into-rect and fill-text. Every draw is painted over the existing pixels.
pub struct CanvasSurface {
    canvas: Canvas,
    pixmap: vello_cpu::Pixmap,
    scratch: Option<vello_cpu::Pixmap>,
}

impl std::fmt::Debug for CanvasSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasSurface")
            .field("canvas", &self.canvas)
            .finish_non_exhaustive()
    }
}

impl CanvasSurface {
    /// Allocate a fully transparent surface.
    pub fn new(canvas: Canvas) -> MemeResult<Self> {
        canvas.validate()?;
        let (w, h) = dims_u16(canvas)?;
        Ok(Self {
            canvas,
            pixmap: vello_cpu::Pixmap::new(w, h),
            scratch: None,
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) -> MemeResult<()> {
        self.paint_over(|ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                color.r, color.g, color.b, color.a,
            ));
            ctx.fill_rect(&rect_to_cpu(rect));
            Ok(())
        })
    }

    /// Draw `image` scaled into the destination rectangle `dst`.
    pub fn draw_image(&mut self, image: &SourceImage, dst: Rect) -> MemeResult<()> {
        if !(dst.width() > 0.0 && dst.height() > 0.0) {
            return Err(MemeError::render(format!(
                "image destination must have positive finite size, got {dst:?}"
            )));
        }
        // The raster backend addresses at most `u16` pixels per edge.
        let resampled;
        let image = if image.width > MAX_CANVAS_DIM || image.height > MAX_CANVAS_DIM {
            resampled = resample_to_rect(image, dst)?;
            &resampled
        } else {
            image
        };
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let iw = f64::from(image.width);
        let ih = f64::from(image.height);
        let tr = Affine::translate((dst.x0, dst.y0))
            * Affine::scale_non_uniform(dst.width() / iw, dst.height() / ih);

        self.paint_over(|ctx| {
            ctx.set_transform(affine_to_cpu(tr));
            ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            Ok(())
        })
    }

    /// Draw one line of text horizontally centered on `anchor.x` with its alphabetic baseline on
    /// `anchor.y`.
    pub(crate) fn fill_text(
        &mut self,
        text: &str,
        anchor: Point,
        style: TextStyle,
        engine: &mut TextLayoutEngine,
    ) -> MemeResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = engine.layout_line(text, style.size_px, TextBrushRgba8::from(style.color))?;
        let Some(first_line) = layout.lines().next() else {
            return Ok(());
        };
        let baseline = f64::from(first_line.metrics().baseline);
        let origin_x = anchor.x - f64::from(layout.width()) / 2.0;
        let origin_y = anchor.y - baseline;
        let tr = Affine::translate((origin_x, origin_y));

        self.paint_over(|ctx| {
            ctx.set_transform(affine_to_cpu(tr));
            for line in layout.lines() {
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let brush = run.style().brush;
                    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                        brush.r, brush.g, brush.b, brush.a,
                    ));
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });
                    ctx.glyph_run(engine.font_data())
                        .font_size(run.run().font_size())
                        .fill_glyphs(glyphs);
                }
            }
            Ok(())
        })
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn pixels_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Whether every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.pixels_premul().iter().all(|&b| b == 0)
    }

    /// Premultiplied RGBA8 value of one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let px = self.pixels_premul().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy the pixels out with straight alpha, ready for encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.pixels_premul().to_vec();
        unpremultiply_rgba8_in_place(&mut out);
        out
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> MemeResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.to_straight_rgba8(),
            self.canvas.width,
            self.canvas.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }

    // `vello_cpu` renders into a fresh buffer, so each draw goes to a scratch pixmap that is then
    // premul-over'd onto the canvas.
    fn paint_over(
        &mut self,
        f: impl FnOnce(&mut vello_cpu::RenderContext) -> MemeResult<()>,
    ) -> MemeResult<()> {
        let (w, h) = dims_u16(self.canvas)?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        f(&mut ctx)?;

        let mut scratch = self
            .scratch
            .take()
            .unwrap_or_else(|| vello_cpu::Pixmap::new(w, h));
        scratch.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(&mut scratch);
        let res = premul_over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            scratch.data_as_u8_slice(),
        );
        self.scratch = Some(scratch);
        res
    }
}

fn dims_u16(canvas: Canvas) -> MemeResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| MemeError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| MemeError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Resize premultiplied pixels to the whole-pixel size of `dst`.
fn resample_to_rect(source: &SourceImage, dst: Rect) -> MemeResult<SourceImage> {
    let edge = |v: f64| v.round().clamp(1.0, f64::from(MAX_CANVAS_DIM)) as u32;
    let (w, h) = (edge(dst.width()), edge(dst.height()));
    let src = image::ImageBuffer::<image::Rgba<u8>, &[u8]>::from_raw(
        source.width,
        source.height,
        source.rgba8_premul.as_slice(),
    )
    .ok_or_else(|| MemeError::render("image byte len does not match its dimensions"))?;
    tracing::debug!(
        from_w = source.width,
        from_h = source.height,
        to_w = w,
        to_h = h,
        "resampling oversized image"
    );
    let resized = image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle);
    SourceImage::from_premul_rgba8(w, h, resized.into_raw())
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> MemeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| MemeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| MemeError::render("image height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(MemeError::render("pixmap byte len mismatch"));
    }
    let mut may_have_opacities = false;
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn mul_div255(a: u16, b: u16) -> u16 {
    (a * b + 127) / 255
}

pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8]) -> MemeResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MemeError::render(
            "premul_over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = u16::from(s[3]);
        if sa == 0 {
            continue;
        }
        if sa == 255 {
            d.copy_from_slice(s);
            continue;
        }
        let inv = 255 - sa;
        for c in 0..4 {
            let v = u16::from(s[c]) + mul_div255(u16::from(d[c]), inv);
            d[c] = v.min(255) as u8;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
