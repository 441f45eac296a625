//! Decorative falling-particle background.

pub mod animation;
pub mod field;
pub mod policy;
pub mod surface;
pub mod viewport;

pub use animation::{Animation, AnimationHandle, AnimationOutcome, MIN_FRAME_INTERVAL};
pub use field::{Particle, ParticleField, PARTICLE_COLOR, WRAP_MARGIN};
pub use policy::{base_particle_count, MotionPolicy};
pub use surface::{Rgba, Surface, TextSurface};
pub use viewport::Viewport;

/// Field sized for a viewport under the given policy.
pub fn field_for(viewport: Viewport, policy: &MotionPolicy) -> ParticleField {
    let count = policy.particle_count(base_particle_count(viewport.width_px));
    ParticleField::from_entropy(viewport, count)
}
