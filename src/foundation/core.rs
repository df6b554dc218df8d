use crate::foundation::error::{MemeError, MemeResult};

pub use kurbo::{Affine, Point, Rect};

/// Largest canvas edge the CPU raster backend can address.
pub const MAX_CANVAS_DIM: u32 = u16::MAX as u32;

/// Fixed pixel size of the drawing surface. Immutable for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
        }
    }
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> MemeResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(self) -> MemeResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(MemeError::validation("canvas width and height must be > 0"));
        }
        if self.width > MAX_CANVAS_DIM || self.height > MAX_CANVAS_DIM {
            return Err(MemeError::validation(format!(
                "canvas {}x{} exceeds {MAX_CANVAS_DIM}x{MAX_CANVAS_DIM}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_f64(), self.height_f64())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
