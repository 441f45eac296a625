use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::surface::{Rgba, Surface};
use super::viewport::Viewport;

/// Fill colour for every particle
pub const PARTICLE_COLOR: Rgba = Rgba::new(255, 255, 255, 0.9);

/// How far past the bottom edge a particle travels before respawning,
/// and how far above the top edge it reappears.
pub const WRAP_MARGIN: f64 = 10.0;

/// Vertical distance over which the horizontal sway completes one radian
const SWAY_PERIOD: f64 = 40.0;
const SWAY_AMPLITUDE: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub fall_speed: f64,
}

impl Particle {
    fn random(viewport: &Viewport, rng: &mut impl Rng) -> Self {
        Self {
            x: uniform(rng, viewport.width_px),
            y: uniform(rng, viewport.height_px),
            radius: rng.gen_range(1.0..4.0),
            fall_speed: rng.gen_range(0.5..2.0),
        }
    }
}

/// `[0, upper)`, collapsing to 0 for an empty or degenerate range.
fn uniform(rng: &mut impl Rng, upper: f64) -> f64 {
    if upper > 0.0 {
        rng.gen_range(0.0..upper)
    } else {
        0.0
    }
}

/// A fixed population of falling particles.
///
/// Particles are only ever created here and respawned at the top in
/// [`ParticleField::step`]; the count never changes after construction.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(viewport: Viewport, count: usize, mut rng: StdRng) -> Self {
        let particles = (0..count)
            .map(|_| Particle::random(&viewport, &mut rng))
            .collect();

        Self { particles, viewport, rng }
    }

    /// Deterministic field for a given seed.
    pub fn seeded(viewport: Viewport, count: usize, seed: u64) -> Self {
        Self::new(viewport, count, StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy(viewport: Viewport, count: usize) -> Self {
        Self::new(viewport, count, StdRng::from_entropy())
    }

    /// Builds a field from existing particles, e.g. to resume a snapshot.
    pub fn with_particles(viewport: Viewport, particles: Vec<Particle>, rng: StdRng) -> Self {
        Self { particles, viewport, rng }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Sizes the surface for the current viewport. Call once before the first frame.
    pub fn attach(&self, surface: &mut dyn Surface) {
        apply_viewport(&self.viewport, surface);
    }

    /// Adopts a new viewport. Particles keep their coordinates; any now off
    /// screen come back through the normal wrap-around.
    pub fn resize(&mut self, viewport: Viewport, surface: &mut dyn Surface) {
        self.viewport = viewport;
        apply_viewport(&self.viewport, surface);
    }

    /// Draws the current frame, then advances every particle by one tick.
    pub fn step(&mut self, surface: &mut dyn Surface) {
        surface.clear();

        let bottom = self.viewport.height_px + WRAP_MARGIN;
        let width = self.viewport.width_px;

        for p in &mut self.particles {
            surface.fill_circle(p.x, p.y, p.radius, PARTICLE_COLOR);

            p.y += p.fall_speed;
            p.x += (p.y / SWAY_PERIOD).sin() * SWAY_AMPLITUDE;

            if p.y > bottom {
                p.y = -WRAP_MARGIN;
                p.x = uniform(&mut self.rng, width);
            }
        }
    }
}

fn apply_viewport(viewport: &Viewport, surface: &mut dyn Surface) {
    let (backing_width, backing_height) = viewport.backing_size();
    surface.resize_backing_store(backing_width, backing_height);
    surface.set_display_size(viewport.width_px, viewport.height_px);
    surface.set_transform(viewport.device_pixel_ratio);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::surface::TextSurface;

    #[test]
    fn test_initial_particles_within_ranges() {
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let field = ParticleField::seeded(viewport, 500, 7);

        assert_eq!(field.len(), 500);
        for p in field.particles() {
            assert!((0.0..640.0).contains(&p.x));
            assert!((0.0..480.0).contains(&p.y));
            assert!((1.0..4.0).contains(&p.radius));
            assert!((0.5..2.0).contains(&p.fall_speed));
        }
    }

    #[test]
    fn test_step_falls_and_sways() {
        let viewport = Viewport::new(640.0, 480.0, 1.0);
        let particle = Particle { x: 100.0, y: 50.0, radius: 2.0, fall_speed: 1.5 };
        let mut field =
            ParticleField::with_particles(viewport, vec![particle], StdRng::seed_from_u64(1));
        let mut surface = TextSurface::new();
        field.attach(&mut surface);

        field.step(&mut surface);

        let p = field.particles()[0];
        assert_eq!(p.y, 51.5);
        assert_eq!(p.x, 100.0 + (51.5_f64 / 40.0).sin() * 0.4);
        assert_eq!(surface.circles_drawn(), 1);
    }

    #[test]
    fn test_same_seed_same_field() {
        let viewport = Viewport::new(320.0, 240.0, 2.0);
        let a = ParticleField::seeded(viewport, 80, 99);
        let b = ParticleField::seeded(viewport, 80, 99);
        assert_eq!(a.particles(), b.particles());
    }
}
