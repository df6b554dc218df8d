use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::assets::color::Rgba8;
use crate::foundation::error::{MemeError, MemeResult};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// Raw font file bytes chosen for caption drawing.
#[derive(Clone)]
pub struct CaptionFont {
    /// Where the bytes came from (file path or resolved family), for diagnostics.
    pub origin: String,
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("origin", &self.origin)
            .field("len", &self.bytes.len())
            .field("index", &self.index)
            .finish()
    }
}

impl CaptionFont {
    pub fn from_bytes(origin: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            origin: origin.into(),
            bytes: Arc::new(bytes),
            index: 0,
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Ok(Self::from_bytes(path.display().to_string(), bytes))
    }

    /// Look a family up in the system font database, falling back to sans-serif and then to
    /// whatever face is installed first.
    pub fn from_system(family: &str) -> MemeResult<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let families = [
            usvg::fontdb::Family::Name(family),
            usvg::fontdb::Family::SansSerif,
        ];
        let query = usvg::fontdb::Query {
            families: &families,
            ..usvg::fontdb::Query::default()
        };
        let id = db
            .query(&query)
            .or_else(|| db.faces().next().map(|face| face.id))
            .ok_or_else(|| MemeError::validation("no system fonts available"))?;

        let origin = db
            .face(id)
            .and_then(|face| face.families.first().map(|(name, _)| name.clone()))
            .unwrap_or_else(|| family.to_owned());
        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| MemeError::validation(format!("font data for '{origin}' unavailable")))?;

        Ok(Self {
            origin,
            bytes: Arc::new(bytes),
            index,
        })
    }
}

/// Family holding the face at `index` of a collection, so shaping and rasterization agree on the
/// face. Falls back to the first family.
fn family_for_face<F: Copy>(families: &[(F, Vec<u32>)], index: u32) -> Option<F> {
    families
        .iter()
        .find(|(_, faces)| faces.contains(&index))
        .or_else(|| families.first())
        .map(|(family, _)| *family)
}

/// Stateful helper for building single-line Parley layouts from one registered font.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

impl TextLayoutEngine {
    pub(crate) fn new(font: &CaptionFont) -> MemeResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.as_ref().clone()),
            None,
        );
        let faces = families
            .iter()
            .map(|(id, infos)| (*id, infos.iter().map(|info| info.index()).collect::<Vec<u32>>()))
            .collect::<Vec<_>>();
        let family_id = family_for_face(&faces, font.index).ok_or_else(|| {
            MemeError::validation(format!("no font families registered from '{}'", font.origin))
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| MemeError::validation("registered font family has no name"))?
            .to_string();

        let font_data = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(font.bytes.as_ref().clone()),
            font.index,
        );

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: font_data,
        })
    }

    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape `text` as one unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> MemeResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(MemeError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
