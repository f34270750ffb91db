//! CPU rasterizer implementing [`Surface`] over an in-memory RGBA buffer.
//!
//! Used as the headless backend and as the surface for every test. Text is
//! drawn with a tiny 5x7 bitmap font scaled up to the requested pixel size,
//! so the label's silhouette is deterministic across platforms.

use crate::core::color::Rgb;
use crate::renderer::surface::{Surface, TextAlign, TextBaseline, TextStyle};

/// Software drawing surface. Row-major RGBA, 4 bytes per pixel.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    fill: Rgb,
    alpha: f32,
    stack: Vec<(Rgb, f32)>,
    available: bool,
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            fill: Rgb::BLACK,
            alpha: 1.0,
            stack: Vec::new(),
            available: true,
        }
    }

    /// Drop the backing context. Draw calls become no-ops and readback fails.
    pub fn detach(&mut self) {
        self.available = false;
    }

    /// RGBA at (x, y), or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2], self.pixels[i + 3]])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    /// Clip a float span to pixel columns/rows it touches.
    fn span(start: f32, len: f32, limit: u32) -> Option<(usize, usize)> {
        if len.is_nan() || len <= 0.0 {
            return None;
        }
        let lo = start.floor().max(0.0);
        let hi = (start + len).ceil().min(limit as f32);
        if hi <= lo {
            return None;
        }
        Some((lo as usize, hi as usize))
    }

    fn blend(dst: &mut [u8], src: Rgb, a: f32) {
        let inv = 1.0 - a;
        let mix = |s: u8, d: u8| (s as f32 * a + d as f32 * inv).round() as u8;
        dst[0] = mix(src.r, dst[0]);
        dst[1] = mix(src.g, dst[1]);
        dst[2] = mix(src.b, dst[2]);
        dst[3] = (255.0 * a + dst[3] as f32 * inv).round() as u8;
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // Like a canvas, resizing wipes pixels and drawing state.
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width as usize * height as usize * 4];
        self.fill = Rgb::BLACK;
        self.alpha = 1.0;
        self.stack.clear();
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if !self.available {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) =
            (Self::span(x, w, self.width), Self::span(y, h, self.height))
        else {
            return;
        };
        let stride = self.width as usize * 4;
        for row in y0..y1 {
            self.pixels[row * stride + x0 * 4..row * stride + x1 * 4].fill(0);
        }
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if !self.available || self.alpha <= 0.0 {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) =
            (Self::span(x, w, self.width), Self::span(y, h, self.height))
        else {
            return;
        };
        let stride = self.width as usize * 4;
        for row in y0..y1 {
            let line = &mut self.pixels[row * stride + x0 * 4..row * stride + x1 * 4];
            for px in line.chunks_exact_mut(4) {
                Self::blend(px, self.fill, self.alpha);
            }
        }
    }

    fn set_fill(&mut self, color: Rgb) {
        self.fill = color;
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let cell = style.font.size / GLYPH_ROWS as f32;
        let count = text.chars().count();
        if count == 0 || cell.is_nan() || cell <= 0.0 {
            return;
        }
        let total_w = (count * GLYPH_ADVANCE - 1) as f32 * cell;
        let total_h = GLYPH_ROWS as f32 * cell;
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - total_w / 2.0,
            TextAlign::Right => x - total_w,
        };
        let top = match style.baseline {
            TextBaseline::Top => y,
            TextBaseline::Middle => y - total_h / 2.0,
            TextBaseline::Bottom => y - total_h,
        };
        // Bold thickens every stroke to the right by a fifth of a cell.
        let stroke_w = if style.font.bold { cell * 1.2 } else { cell };

        for (i, ch) in text.chars().enumerate() {
            let Some(rows) = glyph5x7(ch) else { continue };
            let origin = left + (i * GLYPH_ADVANCE) as f32 * cell;
            for (ry, bits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if bits & (1 << (4 - rx)) != 0 {
                        self.fill_rect(
                            origin + rx as f32 * cell,
                            top + ry as f32 * cell,
                            stroke_w,
                            cell,
                        );
                    }
                }
            }
        }
    }

    fn read_pixels(&self) -> Option<Vec<u8>> {
        self.available.then(|| self.pixels.clone())
    }

    fn save(&mut self) {
        self.stack.push((self.fill, self.alpha));
    }

    fn restore(&mut self) {
        if let Some((fill, alpha)) = self.stack.pop() {
            self.fill = fill;
            self.alpha = alpha;
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

const GLYPH_ROWS: usize = 7;
/// 5 glyph columns + 1 column of spacing.
const GLYPH_ADVANCE: usize = 6;

/// 5x7 glyph bitmap. Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
/// Uppercase letters fall back to their lowercase form.
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_lowercase() {
        'a' => g!(0b00000,0b00000,0b01110,0b00001,0b01111,0b10001,0b01111),
        'b' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b11110),
        'c' => g!(0b00000,0b00000,0b01110,0b10000,0b10000,0b10001,0b01110),
        'd' => g!(0b00001,0b00001,0b01101,0b10011,0b10001,0b10001,0b01111),
        'e' => g!(0b00000,0b00000,0b01110,0b10001,0b11111,0b10000,0b01110),
        'f' => g!(0b00110,0b01001,0b01000,0b11100,0b01000,0b01000,0b01000),
        'g' => g!(0b00000,0b01111,0b10001,0b10001,0b01111,0b00001,0b01110),
        'h' => g!(0b10000,0b10000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'i' => g!(0b00100,0b00000,0b01100,0b00100,0b00100,0b00100,0b01110),
        'j' => g!(0b00010,0b00000,0b00110,0b00010,0b00010,0b10010,0b01100),
        'k' => g!(0b10000,0b10000,0b10010,0b10100,0b11000,0b10100,0b10010),
        'l' => g!(0b01100,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'm' => g!(0b00000,0b00000,0b11010,0b10101,0b10101,0b10001,0b10001),
        'n' => g!(0b00000,0b00000,0b10110,0b11001,0b10001,0b10001,0b10001),
        'o' => g!(0b00000,0b00000,0b01110,0b10001,0b10001,0b10001,0b01110),
        'p' => g!(0b00000,0b00000,0b11110,0b10001,0b11110,0b10000,0b10000),
        'q' => g!(0b00000,0b00000,0b01101,0b10011,0b01111,0b00001,0b00001),
        'r' => g!(0b00000,0b00000,0b10110,0b11001,0b10000,0b10000,0b10000),
        's' => g!(0b00000,0b00000,0b01110,0b10000,0b01110,0b00001,0b11110),
        't' => g!(0b01000,0b01000,0b11100,0b01000,0b01000,0b01001,0b00110),
        'u' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b10011,0b01101),
        'v' => g!(0b00000,0b00000,0b10001,0b10001,0b10001,0b01010,0b00100),
        'w' => g!(0b00000,0b00000,0b10001,0b10001,0b10101,0b10101,0b01010),
        'x' => g!(0b00000,0b00000,0b10001,0b01010,0b00100,0b01010,0b10001),
        'y' => g!(0b00000,0b00000,0b10001,0b10001,0b01111,0b00001,0b01110),
        'z' => g!(0b00000,0b00000,0b11111,0b00010,0b00100,0b01000,0b11111),

        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        _ => None,
    }
}
