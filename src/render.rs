//! Portable rendering collaborator: SVG serialization and CPU rasterization.

/// Rasterization into RGBA frames and PNG output.
pub mod raster;
/// Frame-to-SVG serialization.
pub mod svg;

pub use raster::{FrameRGBA, Rasterizer, save_png};
pub use svg::frame_svg;
