/// Surface size and uniform scale that fit the base frame into a window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    /// Largest uniform scale that keeps the base frame inside the available area
    ///
    /// Returns `None` when nothing would be visible (minimised window).
    pub fn letterbox(base_width: f64, base_height: f64, avail_width: f64, avail_height: f64) -> Option<Self> {
        if !(avail_width > 0.0 && avail_height > 0.0 && base_width > 0.0 && base_height > 0.0) {
            return None;
        }

        let scale = (avail_width / base_width).min(avail_height / base_height);
        let width = (base_width * scale).floor() as u32;
        let height = (base_height * scale).floor() as u32;
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            scale,
            width,
            height,
        })
    }
}
