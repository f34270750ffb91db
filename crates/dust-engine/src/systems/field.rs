//! Particle field: text-seeded particles that ease home and scatter from the pointer.
//!
//! Particles are sampled from the text mask, so every base position sits on a
//! covered mask pixel. Each tick a particle either scatters away from an engaged
//! pointer or eases 10% of the way back to its base, then loses one unit of life.
//! Expired particles are resampled in place or, if sampling fails, swap-removed.
//! Iteration order after a removal is unspecified.

use glam::Vec2;

use crate::api::config::DustConfig;
use crate::api::sim::FrameStats;
use crate::core::color::Rgb;
use crate::core::rng::Rng;
use crate::input::pointer::PointerTracker;
use crate::renderer::surface::Surface;
use crate::systems::mask::TextMask;

/// Random picks per sampled particle before giving up.
pub const MAX_SAMPLE_ATTEMPTS: u32 = 100;

/// A single text particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position.
    pub pos: Vec2,
    /// Rest position sampled from the mask. Never changes.
    pub base: Vec2,
    /// Side length of the drawn square.
    pub size: f32,
    pub color: Rgb,
    pub scattered_color: Rgb,
    /// Ticks left before the particle is recycled.
    pub life: u32,
    /// Whether the last step pushed this particle away from the pointer.
    pub scattered: bool,
}

impl Particle {
    pub fn new(base: Vec2, size: f32, life: u32, color: Rgb, scattered_color: Rgb) -> Self {
        Particle {
            pos: base,
            base,
            size,
            color,
            scattered_color,
            life,
            scattered: false,
        }
    }

    /// Advance one tick against the pointer. Returns true if the particle scattered.
    pub fn step(&mut self, pointer: Vec2, engaged: bool, config: &DustConfig) -> bool {
        let radius = config.influence_radius;
        let delta = pointer - self.pos;
        let distance = delta.length();

        self.scattered = engaged && distance < radius;
        if self.scattered {
            let force = (radius - distance) / radius;
            let angle = delta.y.atan2(delta.x);
            let push = Vec2::new(angle.cos(), angle.sin()) * force * config.scatter_strength;
            self.pos = self.base - push;
        } else {
            self.pos += (self.base - self.pos) * config.ease;
        }
        self.scattered
    }

    /// Draw as a filled square at the current position.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let color = if self.scattered { self.scattered_color } else { self.color };
        surface.set_fill(color);
        surface.fill_rect(self.pos.x, self.pos.y, self.size, self.size);
    }
}

/// Desired particle count for a surface: the base population scaled by the
/// square root of the area ratio against the reference resolution.
pub fn target_population(width: u32, height: u32, config: &DustConfig) -> usize {
    let (ref_w, ref_h) = config.reference_resolution;
    let reference_area = ref_w as f64 * ref_h as f64;
    if reference_area <= 0.0 {
        return 0;
    }
    let area = width as f64 * height as f64;
    (config.base_population as f64 * (area / reference_area).sqrt()).floor() as usize
}

/// Pick random mask pixels until one is covered, up to `config.sample_attempts` tries.
/// Returns `None` when every attempt misses, which is expected for sparse masks.
pub fn sample_particle(mask: &TextMask, rng: &mut Rng, config: &DustConfig) -> Option<Particle> {
    let (width, height) = (mask.width(), mask.height());
    if width == 0 || height == 0 {
        return None;
    }
    for _ in 0..config.sample_attempts {
        let x = rng.next_int(width);
        let y = rng.next_int(height);
        if mask.covers(x, y, config.alpha_threshold) {
            let (min_size, max_size) = config.size_range;
            let (min_life, max_life) = config.life_range;
            return Some(Particle::new(
                Vec2::new(x as f32, y as f32),
                rng.range_f32(min_size, max_size),
                rng.range_u32(min_life, max_life),
                config.foreground,
                config.scattered,
            ));
        }
    }
    None
}

/// Owns the live particles.
#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Add a particle directly.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    /// Drop every particle.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Sample particles until the field holds `target`, giving up after
    /// `miss_limit` consecutive failed samples. Returns how many were added.
    pub fn populate(
        &mut self,
        target: usize,
        mask: &TextMask,
        rng: &mut Rng,
        config: &DustConfig,
        miss_limit: u32,
    ) -> usize {
        let before = self.particles.len();
        let miss_limit = miss_limit.max(1);
        let mut misses = 0;
        while self.particles.len() < target {
            match sample_particle(mask, rng, config) {
                Some(particle) => {
                    self.particles.push(particle);
                    misses = 0;
                }
                None => {
                    misses += 1;
                    if misses >= miss_limit {
                        break;
                    }
                }
            }
        }
        self.particles.len() - before
    }

    /// Update, draw and age every particle once.
    ///
    /// Expired particles are resampled in place from `mask`; when that fails
    /// (or there is no mask) they are swap-removed and the particle moved into
    /// their slot is processed next.
    pub fn step(
        &mut self,
        surface: &mut dyn Surface,
        pointer: &PointerTracker,
        mask: Option<&TextMask>,
        rng: &mut Rng,
        config: &DustConfig,
        stats: &mut FrameStats,
    ) {
        let engaged = pointer.engaged();
        let target = pointer.position();

        let mut i = 0;
        while i < self.particles.len() {
            let expired = {
                let particle = &mut self.particles[i];
                if particle.step(target, engaged, config) {
                    stats.scattered += 1;
                }
                particle.draw(surface);
                stats.drawn += 1;
                particle.life = particle.life.saturating_sub(1);
                particle.life == 0
            };

            if expired {
                match mask.and_then(|m| sample_particle(m, rng, config)) {
                    Some(fresh) => {
                        self.particles[i] = fresh;
                        stats.replaced += 1;
                    }
                    None => {
                        self.particles.swap_remove(i);
                        stats.removed += 1;
                        continue;
                    }
                }
            }
            i += 1;
        }
    }
}
