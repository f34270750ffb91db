//! Jittered dot grid drawn underneath the particles.

use glam::Vec2;

use crate::api::config::Layout;
use crate::core::color::Rgb;
use crate::core::rng::Rng;
use crate::renderer::surface::Surface;

/// A background dot. Immutable once generated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub pos: Vec2,
    pub size: f32,
}

/// Lay dots on a grid covering `width` x `height`, each nudged by up to `jitter` per axis.
/// Produces `ceil(width / spacing) * ceil(height / spacing)` dots.
pub fn generate_dots(width: u32, height: u32, layout: Layout, jitter: f32, rng: &mut Rng) -> Vec<Dot> {
    let spacing = layout.dot_spacing() as usize;
    let size = layout.dot_size();
    let cols = (width as usize).div_ceil(spacing);
    let rows = (height as usize).div_ceil(spacing);

    let mut dots = Vec::with_capacity(cols * rows);
    for x in (0..width).step_by(spacing) {
        for y in (0..height).step_by(spacing) {
            let offset = Vec2::new(rng.range_f32(-jitter, jitter), rng.range_f32(-jitter, jitter));
            dots.push(Dot {
                pos: Vec2::new(x as f32, y as f32) + offset,
                size,
            });
        }
    }
    dots
}

/// Draw every dot in `color` at opacity `alpha`. Surface alpha is restored afterwards.
pub fn draw_dots(surface: &mut dyn Surface, dots: &[Dot], color: Rgb, alpha: f32) {
    surface.save();
    surface.set_fill(color);
    surface.set_alpha(alpha);
    for dot in dots {
        surface.fill_rect(dot.pos.x, dot.pos.y, dot.size, dot.size);
    }
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::raster::RasterSurface;

    #[test]
    fn dot_count_matches_grid() {
        let mut rng = Rng::new(1);
        let dots = generate_dots(800, 600, Layout::Wide, 2.5, &mut rng);
        // ceil(800/30) = 27, ceil(600/30) = 20
        assert_eq!(dots.len(), 27 * 20);

        let dots = generate_dots(375, 667, Layout::Compact, 2.5, &mut rng);
        // ceil(375/20) = 19, ceil(667/20) = 34
        assert_eq!(dots.len(), 19 * 34);
    }

    #[test]
    fn dots_stay_within_jitter_of_grid() {
        let mut rng = Rng::new(3);
        let spacing = Layout::Wide.dot_spacing();
        let dots = generate_dots(310, 95, Layout::Wide, 2.5, &mut rng);
        let rows = 95usize.div_ceil(spacing as usize);
        for (i, dot) in dots.iter().enumerate() {
            // Column-major: x outer, y inner
            let gx = (i / rows) as f32 * spacing as f32;
            let gy = (i % rows) as f32 * spacing as f32;
            assert!((dot.pos.x - gx).abs() <= 2.5, "dot {} x off grid: {}", i, dot.pos.x);
            assert!((dot.pos.y - gy).abs() <= 2.5, "dot {} y off grid: {}", i, dot.pos.y);
            assert_eq!(dot.size, 1.5);
        }
    }

    #[test]
    fn empty_surface_has_no_dots() {
        let mut rng = Rng::new(5);
        assert!(generate_dots(0, 600, Layout::Wide, 2.5, &mut rng).is_empty());
        assert!(generate_dots(600, 0, Layout::Compact, 2.5, &mut rng).is_empty());
    }

    #[test]
    fn drawn_dots_are_faint() {
        let mut surface = RasterSurface::new(40, 40);
        let dots = [Dot { pos: Vec2::new(10.0, 10.0), size: 1.0 }];
        draw_dots(&mut surface, &dots, Rgb::new(250, 250, 250), 0.2);
        assert_eq!(surface.pixel(10, 10), Some([50, 50, 50, 51]));
        assert_eq!(surface.painted_pixels(), 1);
    }
}
