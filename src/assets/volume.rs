use crate::assets::decode::SourceImage;
use crate::foundation::error::{MemeError, MemeResult};

/// Position of the volume slider, normalized once to an integer in `0..=100`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct SliderValue(u8);

impl SliderValue {
    pub const MAX: u8 = 100;

    /// Clamp any integer reading of the slider into range.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, i64::from(Self::MAX)) as u8)
    }

    /// Parse the slider's textual value (as read from a form field or CLI argument).
    pub fn parse(raw: &str) -> MemeResult<Self> {
        let raw = raw.trim();
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(Self::new(v));
        }
        let v: f64 = raw
            .parse()
            .map_err(|_| MemeError::validation(format!("volume '{raw}' is not a number")))?;
        if !v.is_finite() {
            return Err(MemeError::validation("volume must be finite"));
        }
        Ok(Self::new(v.round() as i64))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Speech volume in `[0, 1]`.
    pub fn normalized(self) -> f32 {
        f32::from(self.0) / f32::from(Self::MAX)
    }

    pub fn level(self) -> VolumeLevel {
        VolumeLevel::from_slider(self)
    }
}

impl Default for SliderValue {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

impl<'de> serde::Deserialize<'de> for SliderValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = i64::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

/// Which of the four speaker icons represents the current slider value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum VolumeLevel {
    /// Muted (`0`).
    Level0,
    /// `1..34`.
    Level1,
    /// `34..67`.
    Level2,
    /// `67..=100`.
    Level3,
}

impl VolumeLevel {
    pub fn from_slider(value: SliderValue) -> Self {
        match value.get() {
            67.. => Self::Level3,
            34..=66 => Self::Level2,
            1..=33 => Self::Level1,
            0 => Self::Level0,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Level0 => 0,
            Self::Level1 => 1,
            Self::Level2 => 2,
            Self::Level3 => 3,
        }
    }

    /// Conventional relative path of the icon asset, e.g. `icons/volume-level-2.svg`.
    pub fn icon_path(self) -> String {
        format!("icons/volume-level-{}.svg", self.index())
    }

    /// Embedded SVG markup for the icon on a 24x24 view box.
    pub fn icon_svg(self) -> String {
        const SPEAKER: &str = r##"<path d="M3 9v6h4l5 5V4L7 9H3z" fill="#000"/>"##;
        const WAVE_1: &str =
            r##"<path d="M14.5 9.5a3.5 3.5 0 0 1 0 5" fill="none" stroke="#000" stroke-width="2"/>"##;
        const WAVE_2: &str =
            r##"<path d="M16 7a6.5 6.5 0 0 1 0 10" fill="none" stroke="#000" stroke-width="2"/>"##;
        const WAVE_3: &str =
            r##"<path d="M17.5 4.5a10 10 0 0 1 0 15" fill="none" stroke="#000" stroke-width="2"/>"##;
        const MUTE: &str =
            r##"<path d="M16 9l6 6M22 9l-6 6" fill="none" stroke="#000" stroke-width="2"/>"##;

        let body = match self {
            Self::Level0 => MUTE.to_string(),
            Self::Level1 => WAVE_1.to_string(),
            Self::Level2 => format!("{WAVE_1}{WAVE_2}"),
            Self::Level3 => format!("{WAVE_1}{WAVE_2}{WAVE_3}"),
        };
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24">{SPEAKER}{body}</svg>"##
        )
    }

    /// Rasterize the icon to a `size_px` square premultiplied RGBA8 image.
    #[tracing::instrument(level = "debug")]
    pub fn rasterize(self, size_px: u32) -> MemeResult<SourceImage> {
        const MAX_DIM: u32 = 4_096;
        if size_px == 0 || size_px > MAX_DIM {
            return Err(MemeError::validation(format!(
                "icon size must be in 1..={MAX_DIM}, got {size_px}"
            )));
        }

        let opts = usvg::Options::default();
        let tree = usvg::Tree::from_data(self.icon_svg().as_bytes(), &opts)
            .map_err(|e| MemeError::render(format!("parse volume icon svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(size_px, size_px)
            .ok_or_else(|| MemeError::render("failed to allocate icon pixmap"))?;
        let sx = (size_px as f32) / tree.size().width();
        let sy = (size_px as f32) / tree.size().height();
        let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);
        resvg::render(&tree, xform, &mut pixmap.as_mut());

        SourceImage::from_premul_rgba8(size_px, size_px, pixmap.data().to_vec())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/volume.rs"]
mod tests;
