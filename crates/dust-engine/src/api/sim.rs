use crate::api::config::{DustConfig, Layout};
use crate::api::error::DustError;
use crate::core::rng::Rng;
use crate::input::pointer::PointerTracker;
use crate::input::queue::InputEvent;
use crate::renderer::surface::Surface;
use crate::systems::field::{target_population, ParticleField};
use crate::systems::grid::{draw_dots, generate_dots, Dot};
use crate::systems::mask::{render_text_mask, TextMask};

/// Per-tick counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Particles drawn this tick.
    pub drawn: usize,
    /// Particles pushed away by the pointer.
    pub scattered: usize,
    /// Expired particles resampled in place.
    pub replaced: usize,
    /// Expired particles dropped because resampling failed.
    pub removed: usize,
    /// Particles added by the end-of-tick top-up.
    pub added: usize,
}

/// Owns all simulation state: mask, particles, dots, pointer and RNG.
/// Every operation takes the drawing surface explicitly.
pub struct Simulation {
    config: DustConfig,
    width: u32,
    height: u32,
    layout: Layout,
    mask: Option<TextMask>,
    scale: f32,
    field: ParticleField,
    dots: Vec<Dot>,
    pointer: PointerTracker,
    rng: Rng,
}

impl Simulation {
    /// Create an empty simulation. Call [`Simulation::resize`] before the first tick.
    pub fn new(config: DustConfig, seed: u64) -> Self {
        let pointer = PointerTracker::new(config.input_mode);
        let layout = config.layout_for(0);
        Self {
            config,
            width: 0,
            height: 0,
            layout,
            mask: None,
            scale: 1.0,
            field: ParticleField::new(),
            dots: Vec::new(),
            pointer,
            rng: Rng::new(seed),
        }
    }

    /// Rebuild everything for the surface's current size: text mask, dots and
    /// a freshly sampled particle field. Leaves the surface cleared.
    /// Returns the resulting particle count.
    pub fn resize(&mut self, surface: &mut dyn Surface) -> usize {
        self.width = surface.width();
        self.height = surface.height();
        self.layout = self.config.layout_for(self.width);

        match render_text_mask(surface, self.layout, &self.config) {
            Some((mask, scale)) => {
                self.mask = Some(mask);
                self.scale = scale;
            }
            None => {
                log::warn!("text mask unavailable at {}x{}; field stays empty", self.width, self.height);
                self.mask = None;
                self.scale = self.layout.font_size() / self.config.reference_font_size;
            }
        }

        self.dots = generate_dots(self.width, self.height, self.layout, self.config.dot_jitter, &mut self.rng);

        let target = target_population(self.width, self.height, &self.config);
        self.field = ParticleField::with_capacity(target);
        if let Some(mask) = &self.mask {
            self.field.populate(target, mask, &mut self.rng, &self.config, self.config.resize_miss_limit);
        }

        log::info!(
            "resized to {}x{} ({:?}, scale {:.2}): {} mask px, {} dots, {}/{} particles",
            self.width,
            self.height,
            self.layout,
            self.scale,
            self.mask.as_ref().map_or(0, |m| m.coverage(self.config.alpha_threshold)),
            self.dots.len(),
            self.field.len(),
            target,
        );
        self.field.len()
    }

    /// Route a pointer or touch event to the tracker.
    /// `Resize` is handled by whoever owns the surface, via [`Simulation::resize`].
    pub fn handle_input(&mut self, event: &InputEvent) {
        self.pointer.apply(event);
    }

    /// Run one frame: clear, paint background and dots, step and draw every
    /// particle, then top the field back up towards the target population.
    pub fn tick(&mut self, surface: &mut dyn Surface) -> Result<FrameStats, DustError> {
        if !surface.is_available() {
            return Err(DustError::SurfaceUnavailable);
        }
        let (width, height) = (surface.width(), surface.height());
        let (w, h) = (width as f32, height as f32);

        surface.clear_rect(0.0, 0.0, w, h);
        surface.set_alpha(1.0);
        surface.set_fill(self.config.background);
        surface.fill_rect(0.0, 0.0, w, h);

        draw_dots(surface, &self.dots, self.config.foreground, self.config.dot_alpha);

        let mut stats = FrameStats::default();
        self.field.step(
            surface,
            &self.pointer,
            self.mask.as_ref(),
            &mut self.rng,
            &self.config,
            &mut stats,
        );

        // Reconcile every frame, not only on resize.
        let target = target_population(width, height, &self.config);
        if let Some(mask) = &self.mask {
            stats.added = self.field.populate(target, mask, &mut self.rng, &self.config, 1);
        }

        log::trace!("{:?}, {} live", stats, self.field.len());
        Ok(stats)
    }

    pub fn config(&self) -> &DustConfig {
        &self.config
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Font scale factor from the last resize (chosen size / reference size).
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn mask(&self) -> Option<&TextMask> {
        self.mask.as_ref()
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn particle_count(&self) -> usize {
        self.field.len()
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    /// Target population for the last known size.
    pub fn target_population(&self) -> usize {
        target_population(self.width, self.height, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::InputMode;
    use crate::renderer::raster::RasterSurface;
    use crate::systems::field::MAX_SAMPLE_ATTEMPTS;
    use glam::Vec2;

    fn bases_on_mask(sim: &Simulation) -> bool {
        let mask = sim.mask().expect("mask");
        let threshold = sim.config().alpha_threshold;
        sim.field()
            .iter()
            .all(|p| mask.covers(p.base.x as u32, p.base.y as u32, threshold))
    }

    #[test]
    fn end_to_end_800x600() {
        let mut sim = Simulation::new(DustConfig::default(), 42);
        let mut surface = RasterSurface::new(800, 600);
        let count = sim.resize(&mut surface);

        assert_eq!(sim.layout(), Layout::Wide);
        assert_eq!(sim.layout().font_size(), 100.0);
        assert_eq!(sim.scale(), 1.0);
        assert_eq!(sim.target_population(), 3367);
        assert_eq!(count, 3367);

        // ceil(800/30) * ceil(600/30)
        assert_eq!(sim.dots().len(), 27 * 20);
        assert!(sim.dots().iter().all(|d| d.size == 1.5));
        assert!(bases_on_mask(&sim));
        assert_eq!(surface.painted_pixels(), 0, "resize leaves the surface cleared");
    }

    #[test]
    fn compact_layout_below_breakpoint() {
        let mut sim = Simulation::new(DustConfig::default(), 1);
        let mut surface = RasterSurface::new(400, 700);
        sim.resize(&mut surface);

        assert!(sim.layout().is_compact());
        assert!((sim.scale() - 0.6).abs() < 1e-6);
        assert_eq!(sim.dots().len(), 20 * 35);
        assert!(sim.dots().iter().all(|d| d.size == 1.0));
    }

    #[test]
    fn resize_twice_is_idempotent_in_count() {
        let mut sim = Simulation::new(DustConfig::default(), 7);
        let mut surface = RasterSurface::new(640, 480);
        let first = sim.resize(&mut surface);
        let second = sim.resize(&mut surface);
        assert_eq!(first, sim.target_population());
        assert_eq!(second, sim.target_population());
    }

    #[test]
    fn ticks_keep_bases_on_mask_and_population_near_target() {
        let mut sim = Simulation::new(DustConfig::default(), 9);
        let mut surface = RasterSurface::new(800, 600);
        sim.resize(&mut surface);
        let target = sim.target_population();

        sim.handle_input(&InputEvent::PointerMove { x: 400.0, y: 300.0 });
        for _ in 0..200 {
            let stats = sim.tick(&mut surface).unwrap();
            assert!(stats.drawn > 0);
        }
        assert!(bases_on_mask(&sim));
        assert!(sim.particle_count() <= target);
        assert!(sim.particle_count() > target * 9 / 10);
    }

    #[test]
    fn tick_paints_background() {
        let mut sim = Simulation::new(DustConfig::default(), 3);
        let mut surface = RasterSurface::new(800, 600);
        sim.resize(&mut surface);
        sim.tick(&mut surface).unwrap();

        // Between grid dots and far from the label
        assert_eq!(surface.pixel(15, 15), Some([0, 0, 0, 255]));
        // Label center region holds particles in the foreground color
        let lit = (250..550)
            .flat_map(|x| (250..350).map(move |y| (x, y)))
            .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|p| p[1] == 0xde))
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn pointer_near_label_scatters_particles() {
        let mut sim = Simulation::new(DustConfig::default(), 4);
        let mut surface = RasterSurface::new(800, 600);
        sim.resize(&mut surface);

        sim.handle_input(&InputEvent::PointerMove { x: 400.0, y: 300.0 });
        let stats = sim.tick(&mut surface).unwrap();
        assert!(stats.scattered > 0);

        sim.handle_input(&InputEvent::PointerLeave);
        assert_eq!(sim.pointer().position(), Vec2::ZERO);
        let stats = sim.tick(&mut surface).unwrap();
        assert_eq!(stats.scattered, 0, "label is more than 240 units from the origin");
    }

    #[test]
    fn touch_mode_needs_an_active_touch() {
        let config = DustConfig::default().with_input_mode(InputMode::Touch);
        let mut sim = Simulation::new(config, 4);
        let mut surface = RasterSurface::new(800, 600);
        sim.resize(&mut surface);

        sim.handle_input(&InputEvent::TouchMove { x: 400.0, y: 300.0 });
        assert_eq!(sim.tick(&mut surface).unwrap().scattered, 0);

        sim.handle_input(&InputEvent::TouchStart);
        assert!(sim.tick(&mut surface).unwrap().scattered > 0);

        sim.handle_input(&InputEvent::TouchEnd);
        assert_eq!(sim.tick(&mut surface).unwrap().scattered, 0);
    }

    #[test]
    fn zero_sized_surface_is_harmless() {
        let mut sim = Simulation::new(DustConfig::default(), 5);
        let mut surface = RasterSurface::new(0, 600);
        assert_eq!(sim.resize(&mut surface), 0);
        assert!(sim.dots().is_empty());
        let stats = sim.tick(&mut surface).unwrap();
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn unavailable_surface_fails_tick_and_empties_field() {
        let mut sim = Simulation::new(DustConfig::default(), 6);
        let mut surface = RasterSurface::new(320, 240);
        surface.detach();
        assert_eq!(sim.resize(&mut surface), 0);
        assert!(sim.mask().is_none());
        assert_eq!(sim.tick(&mut surface), Err(DustError::SurfaceUnavailable));
    }

    #[test]
    fn top_up_stops_after_one_failed_sample_per_tick() {
        // Blank label: the mask exists but has no covered pixel.
        let config = DustConfig::default().with_label(" ");
        let mut sim = Simulation::new(config, 12);
        let mut surface = RasterSurface::new(200, 200);
        assert_eq!(sim.resize(&mut surface), 0);
        assert!(sim.target_population() > 0);
        assert_eq!(sim.mask().map(|m| m.coverage(128)), Some(0));

        let mut reference = sim.rng.clone();
        let stats = sim.tick(&mut surface).unwrap();
        assert_eq!(stats.added, 0);
        assert!(sim.field().is_empty());

        // Exactly one sample of two draws per attempt, then the top-up ends.
        for _ in 0..(MAX_SAMPLE_ATTEMPTS * 2) {
            reference.next_int(1000);
        }
        assert_eq!(sim.rng, reference);
    }
}
