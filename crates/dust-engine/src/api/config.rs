use crate::core::color::Rgb;
use crate::systems::field::MAX_SAMPLE_ATTEMPTS;

/// Which input devices count as "engaging" the particle field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Mouse/trackpad device. The pointer engages whenever it is within range.
    Pointer,
    /// Touch-only device. Engaged only while a finger is down.
    Touch,
    /// Touch and pointer together. Engaged while touching or while the pointer hovers the surface.
    Hybrid,
}

/// Layout bucket derived from the surface width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Narrow surfaces (phones): smaller text, tighter dot grid.
    Compact,
    Wide,
}

impl Layout {
    /// Pick the layout for a surface width given the compact breakpoint.
    pub fn for_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            Layout::Compact
        } else {
            Layout::Wide
        }
    }

    pub fn is_compact(self) -> bool {
        self == Layout::Compact
    }

    /// Label font size in pixels.
    pub fn font_size(self) -> f32 {
        match self {
            Layout::Compact => 60.0,
            Layout::Wide => 100.0,
        }
    }

    /// Distance between background grid intersections.
    pub fn dot_spacing(self) -> u32 {
        match self {
            Layout::Compact => 20,
            Layout::Wide => 30,
        }
    }

    /// Side length of a background dot.
    pub fn dot_size(self) -> f32 {
        match self {
            Layout::Compact => 1.0,
            Layout::Wide => 1.5,
        }
    }
}

/// Simulation constants, provided by the host. Everything is fixed at build time;
/// hosts start from `DustConfig::default()` and override fields in code.
#[derive(Debug, Clone)]
pub struct DustConfig {
    /// Text rendered into the mask.
    pub label: &'static str,
    /// CSS font family list for the label.
    pub font_family: &'static str,
    /// Surfaces narrower than this use `Layout::Compact` (default: 768).
    pub compact_breakpoint: u32,
    /// Font size that maps to a scale factor of 1.0 (default: 100).
    pub reference_font_size: f32,
    /// Particle count at the reference resolution (default: 7000).
    pub base_population: u32,
    /// Resolution the base population is tuned for (default: 1920x1080).
    pub reference_resolution: (u32, u32),
    /// Pointer distance inside which particles scatter (default: 240).
    pub influence_radius: f32,
    /// Maximum scatter displacement in pixels (default: 60).
    pub scatter_strength: f32,
    /// Fraction of the remaining distance eased back to base each tick (default: 0.1).
    pub ease: f32,
    /// Mask alpha must exceed this to seed a particle (default: 128).
    pub alpha_threshold: u8,
    /// Random picks per particle before sampling gives up (default: 100).
    pub sample_attempts: u32,
    /// Particle side length range, half-open (default: [1, 3)).
    pub size_range: (f32, f32),
    /// Particle life range in ticks, half-open (default: [50, 150)).
    pub life_range: (u32, u32),
    /// Per-axis dot jitter magnitude (default: 2.5).
    pub dot_jitter: f32,
    /// Opacity of the background dots (default: 0.2).
    pub dot_alpha: f32,
    pub foreground: Rgb,
    pub scattered: Rgb,
    pub background: Rgb,
    pub input_mode: InputMode,
    /// Consecutive sampling misses tolerated while repopulating after a resize (default: 16).
    /// Per-tick top-ups stop at the first miss.
    pub resize_miss_limit: u32,
}

impl Default for DustConfig {
    fn default() -> Self {
        Self {
            label: "sinzn",
            font_family: "'Arial', sans-serif",
            compact_breakpoint: 768,
            reference_font_size: 100.0,
            base_population: 7000,
            reference_resolution: (1920, 1080),
            influence_radius: 240.0,
            scatter_strength: 60.0,
            ease: 0.1,
            alpha_threshold: 128,
            sample_attempts: MAX_SAMPLE_ATTEMPTS,
            size_range: (1.0, 3.0),
            life_range: (50, 150),
            dot_jitter: 2.5,
            dot_alpha: 0.2,
            foreground: Rgb::FOREGROUND,
            scattered: Rgb::SCATTERED,
            background: Rgb::BLACK,
            input_mode: InputMode::Pointer,
            resize_miss_limit: 16,
        }
    }
}

impl DustConfig {
    /// Set the input mode.
    pub fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    /// Set the label text.
    pub fn with_label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    /// Layout for the given surface width.
    pub fn layout_for(&self, width: u32) -> Layout {
        Layout::for_width(width, self.compact_breakpoint)
    }
}
