//! Device and preference inputs that size the particle field.

/// Below this width a device is treated as mobile regardless of user agent
pub const MOBILE_MAX_WIDTH: f64 = 700.0;

/// Below this width a desktop viewport gets the reduced tablet density
pub const TABLET_MAX_WIDTH: f64 = 1100.0;

const MOBILE_UA_TOKENS: [&str; 6] = ["mobi", "android", "iphone", "ipad", "ipod", "tablet"];

/// Read once when the animation is set up, never per frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionPolicy {
    pub reduced_motion: bool,
    pub mobile: bool,
    pub viewport_width: f64,
}

impl MotionPolicy {
    pub fn desktop(viewport_width: f64) -> Self {
        Self { reduced_motion: false, mobile: false, viewport_width }
    }

    /// Classifies the device from its user agent and viewport width.
    pub fn detect(user_agent: &str, viewport_width: f64, reduced_motion: bool) -> Self {
        let ua = user_agent.to_lowercase();
        let mobile = MOBILE_UA_TOKENS.iter().any(|token| ua.contains(token))
            || viewport_width < MOBILE_MAX_WIDTH;

        Self { reduced_motion, mobile, viewport_width }
    }

    pub fn animation_enabled(&self) -> bool {
        !self.reduced_motion
    }

    /// Scales a base particle count for this device class.
    pub fn particle_count(&self, base: usize) -> usize {
        if self.mobile {
            (base * 35 / 100).max(20)
        } else if self.viewport_width < TABLET_MAX_WIDTH {
            (base * 60 / 100).max(40)
        } else {
            base
        }
    }
}

/// Unscaled density: one particle per 12px of width, at least 80.
pub fn base_particle_count(viewport_width: f64) -> usize {
    ((viewport_width / 12.0).floor().max(0.0) as usize).max(80)
}
