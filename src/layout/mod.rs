/// Fit-to-canvas geometry.
pub mod fit;
