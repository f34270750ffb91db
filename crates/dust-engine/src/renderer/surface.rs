//! Drawable surface contract.
//!
//! The simulation never talks to a platform API directly. It draws through
//! this immediate-mode trait, which mirrors the subset of the Canvas 2D API
//! it needs: clearing, filled rectangles, filled text, RGBA readback,
//! global alpha and a save/restore state stack.
//!
//! Backends: [`RasterSurface`](super::raster::RasterSurface) (CPU, headless)
//! and the canvas surface in the web bridge crate.

use crate::core::color::Rgb;

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_css(self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Vertical text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl TextBaseline {
    pub fn as_css(self) -> &'static str {
        match self {
            TextBaseline::Top => "top",
            TextBaseline::Middle => "middle",
            TextBaseline::Bottom => "bottom",
        }
    }
}

/// Font selection for `fill_text`.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Pixel size.
    pub size: f32,
    pub bold: bool,
    /// CSS family list, e.g. `'Arial', sans-serif`.
    pub family: &'static str,
}

impl FontSpec {
    /// CSS font shorthand, e.g. `bold 100px 'Arial', sans-serif`.
    pub fn to_css(&self) -> String {
        let weight = if self.bold { "bold " } else { "" };
        format!("{}{}px {}", weight, self.size, self.family)
    }
}

/// Font plus anchoring for a text draw.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub font: FontSpec,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextStyle {
    /// Text centered on both axes around the draw point.
    pub fn centered(font: FontSpec) -> Self {
        Self {
            font,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        }
    }
}

/// An immediate-mode 2D drawing surface.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resize the backing store. Contents are discarded.
    fn set_size(&mut self, width: u32, height: u32);

    /// Whether the backing context still exists. Defaults to `true`.
    fn is_available(&self) -> bool {
        true
    }

    /// Reset a region to fully transparent.
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Fill a region with the current fill color at the current alpha.
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    fn set_fill(&mut self, color: Rgb);

    /// Global opacity applied to subsequent fills, in [0, 1].
    fn set_alpha(&mut self, alpha: f32);

    /// Fill `text` anchored at (x, y) with the current fill color.
    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);

    /// Read back the whole surface as row-major RGBA bytes.
    /// Returns `None` if the context is unavailable.
    fn read_pixels(&self) -> Option<Vec<u8>>;

    /// Push the current fill and alpha state.
    fn save(&mut self);

    /// Pop the most recently saved state. No-op on an empty stack.
    fn restore(&mut self);

    /// Clear the whole surface.
    fn clear(&mut self) {
        let (w, h) = (self.width() as f32, self.height() as f32);
        self.clear_rect(0.0, 0.0, w, h);
    }
}
