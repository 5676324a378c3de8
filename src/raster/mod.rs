//! Raster output: image decoding and the CPU surface.

pub(crate) mod cpu;
pub(crate) mod decode;
