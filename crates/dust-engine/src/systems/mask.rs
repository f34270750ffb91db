//! Text mask: the label's rendered silhouette, kept as sampling data.

use crate::api::config::{DustConfig, Layout};
use crate::renderer::surface::{FontSpec, Surface, TextStyle};

/// Per-pixel RGBA snapshot of the rendered label, sized to the surface.
/// Only the alpha channel matters: it decides where particles may be seeded.
#[derive(Debug, Clone)]
pub struct TextMask {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextMask {
    /// Wrap a row-major RGBA buffer. Returns `None` if the buffer length
    /// does not match `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self { width, height, rgba })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Alpha at (x, y), or `None` outside the mask.
    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4 + 3;
        Some(self.rgba[idx])
    }

    /// Whether (x, y) is covered by the text, i.e. alpha exceeds `threshold`.
    pub fn covers(&self, x: u32, y: u32, threshold: u8) -> bool {
        self.alpha_at(x, y).is_some_and(|a| a > threshold)
    }

    /// Number of covered pixels.
    pub fn coverage(&self, threshold: u8) -> usize {
        self.rgba.chunks_exact(4).filter(|px| px[3] > threshold).count()
    }
}

/// Render the label onto `surface`, capture it as a mask and clear the surface again.
///
/// Returns the mask and the font scale factor (chosen size / reference size).
/// Returns `None` if the surface cannot be read back. Either way the surface is left cleared.
pub fn render_text_mask(
    surface: &mut dyn Surface,
    layout: Layout,
    config: &DustConfig,
) -> Option<(TextMask, f32)> {
    if !surface.is_available() {
        return None;
    }
    let (width, height) = (surface.width(), surface.height());
    let font_size = layout.font_size();

    surface.save();
    surface.set_fill(config.foreground);
    let style = TextStyle::centered(FontSpec {
        size: font_size,
        bold: true,
        family: config.font_family,
    });
    surface.fill_text(config.label, width as f32 / 2.0, height as f32 / 2.0, &style);
    surface.restore();

    let pixels = surface.read_pixels();
    surface.clear();

    let mask = TextMask::from_rgba(width, height, pixels?)?;
    Some((mask, font_size / config.reference_font_size))
}
