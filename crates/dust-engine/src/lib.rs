pub mod api;
pub mod core;
pub mod systems;
pub mod renderer;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::config::{DustConfig, InputMode, Layout};
pub use api::error::DustError;
pub use api::sim::{FrameStats, Simulation};
pub use core::color::Rgb;
pub use core::rng::Rng;
pub use core::scheduler::{FrameRequester, LoopState, Scheduler};
pub use input::pointer::PointerTracker;
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::raster::RasterSurface;
pub use renderer::surface::{FontSpec, Surface, TextAlign, TextBaseline, TextStyle};
pub use systems::field::{target_population, Particle, ParticleField, MAX_SAMPLE_ATTEMPTS};
pub use systems::grid::{generate_dots, Dot};
pub use systems::mask::{render_text_mask, TextMask};
