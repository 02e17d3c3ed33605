use glam::Vec2;

/// Drawing surface dimensions.
/// Simulation runs in CSS pixels; the backing store is scaled by the device
/// pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub css_width: f32,
    /// Height in CSS pixels.
    pub css_height: f32,
    /// Device pixel ratio.
    pub dpr: f32,
}

impl Viewport {
    /// Non-finite or negative sizes become 0; a non-positive ratio becomes 1.
    pub fn new(css_width: f32, css_height: f32, dpr: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self {
            css_width: sane(css_width),
            css_height: sane(css_height),
            dpr: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    /// Backing-store width in device pixels.
    pub fn backing_width(&self) -> u32 {
        (self.css_width * self.dpr).floor() as u32
    }

    /// Backing-store height in device pixels.
    pub fn backing_height(&self) -> u32 {
        (self.css_height * self.dpr).floor() as u32
    }

    /// Simulation bounds in CSS pixels.
    pub fn bounds(&self) -> Vec2 {
        Vec2::new(self.css_width, self.css_height)
    }

    pub fn area(&self) -> f32 {
        self.css_width * self.css_height
    }

    pub fn is_empty(&self) -> bool {
        self.area() <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}
