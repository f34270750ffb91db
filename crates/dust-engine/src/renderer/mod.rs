pub mod raster;
pub mod surface;

// Re-export key types for convenient access
pub use raster::RasterSurface;
pub use surface::{FontSpec, Surface, TextAlign, TextBaseline, TextStyle};
