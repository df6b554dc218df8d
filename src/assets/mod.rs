//! Image sources, colors and the volume icon set.

pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod volume;
