//! Particle field tests
//!
//! Covers seeding, the wrap-around respawn, resize behaviour and
//! policy-driven density.

use mcp_weather_tips::particles::{
    base_particle_count, field_for, MotionPolicy, Particle, ParticleField, Rgba, Surface,
    TextSurface, Viewport, PARTICLE_COLOR,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Records every call so tests can assert on the exact drawing sequence.
#[derive(Debug, Default)]
struct RecordingSurface {
    calls: Vec<Call>,
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Backing(u32, u32),
    Display(f64, f64),
    Transform(f64),
    Clear,
    Circle { x: f64, y: f64, radius: f64, color: Rgba },
}

impl Surface for RecordingSurface {
    fn resize_backing_store(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Backing(width, height));
    }

    fn set_display_size(&mut self, width: f64, height: f64) {
        self.calls.push(Call::Display(width, height));
    }

    fn set_transform(&mut self, scale: f64) {
        self.calls.push(Call::Transform(scale));
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.calls.push(Call::Circle { x, y, radius, color });
    }
}

fn single(viewport: Viewport, particle: Particle) -> ParticleField {
    ParticleField::with_particles(viewport, vec![particle], StdRng::seed_from_u64(3))
}

#[test]
fn test_step_clears_then_draws_at_pre_update_position() {
    let viewport = Viewport::new(400.0, 300.0, 1.0);
    let mut field = single(viewport, Particle { x: 10.0, y: 20.0, radius: 2.5, fall_speed: 1.0 });
    let mut surface = RecordingSurface::default();

    field.step(&mut surface);

    assert_eq!(
        surface.calls,
        vec![
            Call::Clear,
            Call::Circle { x: 10.0, y: 20.0, radius: 2.5, color: PARTICLE_COLOR },
        ]
    );
}

#[test]
fn test_particle_past_bottom_respawns_above_top() {
    let viewport = Viewport::new(400.0, 300.0, 1.0);
    let mut field = single(viewport, Particle { x: 50.0, y: 311.0, radius: 1.0, fall_speed: 0.5 });
    let mut surface = RecordingSurface::default();

    field.step(&mut surface);

    let p = field.particles()[0];
    assert_eq!(p.y, -10.0);
    assert!((0.0..400.0).contains(&p.x));
    assert_eq!(p.radius, 1.0);
    assert_eq!(p.fall_speed, 0.5);
}

#[test]
fn test_particle_at_margin_does_not_respawn() {
    let viewport = Viewport::new(400.0, 300.0, 1.0);
    let mut field = single(viewport, Particle { x: 50.0, y: 309.0, radius: 1.0, fall_speed: 1.0 });
    let mut surface = RecordingSurface::default();

    field.step(&mut surface);

    assert_eq!(field.particles()[0].y, 310.0);
}

#[test]
fn test_resize_sets_backing_store_display_and_transform() {
    let mut field = ParticleField::seeded(Viewport::new(800.0, 600.0, 1.0), 100, 11);
    let before = field.particles().to_vec();
    let mut surface = RecordingSurface::default();

    field.resize(Viewport::new(1280.0, 720.0, 2.0), &mut surface);

    assert_eq!(
        surface.calls,
        vec![Call::Backing(2560, 1440), Call::Display(1280.0, 720.0), Call::Transform(2.0)]
    );
    assert_eq!(field.particles(), before.as_slice());
    assert_eq!(field.viewport(), Viewport::new(1280.0, 720.0, 2.0));
}

#[test]
fn test_shrunk_viewport_recovers_through_wrap() {
    let mut field = ParticleField::seeded(Viewport::new(1920.0, 1080.0, 1.0), 160, 5);
    let mut surface = TextSurface::new();
    field.resize(Viewport::new(400.0, 200.0, 1.0), &mut surface);

    // Anything below the new bottom edge respawns on the very next frame.
    field.step(&mut surface);

    assert_eq!(field.len(), 160);
    for p in field.particles() {
        assert!(p.y <= 210.0, "particle still below viewport: {:?}", p);
    }
}

#[test]
fn test_text_surface_tracks_resize() {
    let mut field = ParticleField::seeded(Viewport::new(640.0, 320.0, 1.0), 80, 8);
    let mut surface = TextSurface::new();
    field.attach(&mut surface);
    assert_eq!(surface.backing_size(), (640, 320));

    field.resize(Viewport::new(375.0, 667.0, 3.0), &mut surface);
    assert_eq!(surface.backing_size(), (1125, 2001));
    assert_eq!(surface.display_size(), (375.0, 667.0));
    assert_eq!(surface.scale(), 3.0);
}

#[test]
fn test_field_for_applies_policy() {
    let desktop = Viewport::new(1920.0, 1080.0, 1.0);
    assert_eq!(field_for(desktop, &MotionPolicy::desktop(1920.0)).len(), 160);

    let phone = Viewport::new(390.0, 844.0, 3.0);
    let policy = MotionPolicy::detect("Mozilla/5.0 (Linux; Android 14) Mobile", 390.0, false);
    assert_eq!(field_for(phone, &policy).len(), 28);

    assert_eq!(base_particle_count(0.0), 80);
}

proptest! {
    /// Count never changes and every particle stays within its travel band
    #[test]
    fn prop_step_preserves_count_and_band(
        seed in any::<u64>(),
        width in 50.0f64..2000.0,
        height in 50.0f64..2000.0,
        frames in 1usize..200,
    ) {
        let viewport = Viewport::new(width, height, 1.0);
        let mut field = ParticleField::seeded(viewport, 80, seed);
        let mut surface = TextSurface::new();
        field.attach(&mut surface);

        for _ in 0..frames {
            field.step(&mut surface);
        }

        prop_assert_eq!(field.len(), 80);
        for p in field.particles() {
            prop_assert!(p.y >= -10.0 && p.y <= height + 10.0);
        }
        prop_assert_eq!(surface.circles_drawn(), 80 * frames as u64);
    }
}
