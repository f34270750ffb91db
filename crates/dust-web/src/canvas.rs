//! `Surface` backed by an `HtmlCanvasElement` and its 2D context.

use dust_engine::{DustError, Rgb, Surface, TextStyle};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    // Last fill style sent to the context, mirrored across save/restore
    // so repeated particle colors skip the CSS round trip.
    fill: Option<Rgb>,
    fill_stack: Vec<Option<Rgb>>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, DustError> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or(DustError::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DustError::ContextUnavailable)?;
        Ok(Self {
            canvas,
            ctx,
            fill: None,
            fill_stack: Vec::new(),
        })
    }

    /// Look up `<canvas id=...>` in the document.
    pub fn from_document(document: &Document, id: &str) -> Result<Self, DustError> {
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| DustError::CanvasNotFound(id.to_string()))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DustError::CanvasNotFound(id.to_string()))?;
        Self::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        // Resizing a canvas resets its context state.
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.fill = None;
        self.fill_stack.clear();
    }

    fn is_available(&self) -> bool {
        self.canvas.is_connected()
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.clear_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn set_fill(&mut self, color: Rgb) {
        if self.fill == Some(color) {
            return;
        }
        self.ctx.set_fill_style_str(&color.to_css());
        self.fill = Some(color);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        self.ctx.set_font(&style.font.to_css());
        self.ctx.set_text_align(style.align.as_css());
        self.ctx.set_text_baseline(style.baseline.as_css());
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed: {:?}", e);
        }
    }

    fn read_pixels(&self) -> Option<Vec<u8>> {
        let (w, h) = (self.width(), self.height());
        if w == 0 || h == 0 {
            return Some(Vec::new());
        }
        match self.ctx.get_image_data(0.0, 0.0, w as f64, h as f64) {
            Ok(image) => Some(image.data().0),
            Err(e) => {
                log::warn!("getImageData failed: {:?}", e);
                None
            }
        }
    }

    fn save(&mut self) {
        self.ctx.save();
        self.fill_stack.push(self.fill);
    }

    fn restore(&mut self) {
        self.ctx.restore();
        self.fill = self.fill_stack.pop().flatten();
    }
}
