use crate::foundation::core::{Canvas, Rect};

/// Destination rectangle for drawing an image scaled into a canvas.
///
/// Produced by [`fit`]; a fresh value is computed on every image load and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitResult {
    /// Scaled image width in canvas pixels.
    pub width: f64,
    /// Scaled image height in canvas pixels.
    pub height: f64,
    /// Left edge of the scaled image.
    #[serde(rename = "startX")]
    pub start_x: f64,
    /// Top edge of the scaled image.
    #[serde(rename = "startY")]
    pub start_y: f64,
}

impl FitResult {
    /// The fit as a canvas-space rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.start_x,
            self.start_y,
            self.start_x + self.width,
            self.start_y + self.height,
        )
    }

    /// Whether the scaled image lies inside a `canvas_width` x `canvas_height` frame.
    ///
    /// Always true on square canvases. The fit only inspects the image aspect ratio, so a
    /// non-square canvas can overflow on the axis that was not maximized.
    pub fn is_contained_in(self, canvas_width: f64, canvas_height: f64) -> bool {
        const EPS: f64 = 1e-9;
        self.start_x >= -EPS
            && self.start_y >= -EPS
            && self.width <= canvas_width + EPS
            && self.height <= canvas_height + EPS
    }
}

/// Scale an image to fill one canvas axis and center it on the other, preserving aspect ratio.
///
/// Portrait images (`aspect < 1`) fill the canvas height; everything else, including exactly
/// square images, fills the canvas width. Inputs are not validated: zero or non-finite
/// dimensions come back as NaN or infinite fields.
pub fn fit(canvas_width: f64, canvas_height: f64, image_width: f64, image_height: f64) -> FitResult {
    let aspect = image_width / image_height;

    if aspect < 1.0 {
        let width = canvas_height * aspect;
        FitResult {
            width,
            height: canvas_height,
            start_x: (canvas_width - width) / 2.0,
            start_y: 0.0,
        }
    } else {
        let height = canvas_width / aspect;
        FitResult {
            width: canvas_width,
            height,
            start_x: 0.0,
            start_y: (canvas_height - height) / 2.0,
        }
    }
}

/// [`fit`] over integer pixel sizes.
pub fn fit_image(canvas: Canvas, image_width: u32, image_height: u32) -> FitResult {
    fit(
        canvas.width_f64(),
        canvas.height_f64(),
        f64::from(image_width),
        f64::from(image_height),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
