//! CPU raster canvas and the drawing steps built on it.

pub(crate) mod pipeline;
pub(crate) mod surface;
pub(crate) mod text;
