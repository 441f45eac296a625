/// Visible drawing area in device-independent pixels plus its pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64, device_pixel_ratio: f64) -> Self {
        Self { width_px, height_px, device_pixel_ratio }
    }

    /// Backing-store size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width_px * self.device_pixel_ratio) as u32,
            (self.height_px * self.device_pixel_ratio) as u32,
        )
    }
}
