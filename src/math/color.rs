//! Conversions between RGB and the two hue-based color spaces.
//!
//! RGB channels live in [0, 255]; hue, saturation, lightness and value live
//! in [0, 1]. Out-of-range input is not rejected, it just produces whatever
//! the formulas yield.

/// RGB color with unrounded channels in [0, 255]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Render-ready RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Project to integer channels, rounding half away from zero
    pub fn round(self) -> Rgb8 {
        let channel = |c: f64| c.round().clamp(0.0, 255.0) as u8;
        Rgb8 {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
        }
    }
}

impl Rgb8 {
    pub const BLACK: Rgb8 = Rgb8 { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// RGBA bytes, fully opaque
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl From<Rgb8> for Rgb {
    fn from(value: Rgb8) -> Self {
        Rgb::new(value.r as f64, value.g as f64, value.b as f64)
    }
}

impl From<Hsv> for Rgb {
    fn from(value: Hsv) -> Self {
        hsv_to_rgb(value.h, value.s, value.v)
    }
}

impl From<Hsl> for Rgb {
    fn from(value: Hsl) -> Self {
        hsl_to_rgb(value.h, value.s, value.l)
    }
}

/// Advance a hue by `shift`, wrapping into [0, 1)
pub fn advance_hue(current: f64, shift: f64) -> f64 {
    let hue = (current + shift).rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if hue >= 1.0 {
        0.0
    } else {
        hue
    }
}

/// Channel extremes plus the hue shared by HSL and HSV
fn decompose(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);

    if max == min {
        return (max, min, 0.0);
    }

    let d = max - min;
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    (max, min, h / 6.0)
}

pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let (max, min, h) = decompose(r, g, b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    Hsl { h, s, l }
}

pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    if s == 0.0 {
        return Rgb::new(l * 255.0, l * 255.0, l * 255.0);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

pub fn rgb_to_hsv(r: f64, g: f64, b: f64) -> Hsv {
    let (r, g, b) = (r / 255.0, g / 255.0, b / 255.0);
    let (max, min, h) = decompose(r, g, b);
    let s = if max == 0.0 { 0.0 } else { (max - min) / max };

    Hsv { h, s, v: max }
}

pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb {
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb::new(r * 255.0, g * 255.0, b * 255.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_to_rgb_red() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0).round(), Rgb8::new(255, 0, 0));
    }

    #[test]
    fn test_hsv_to_rgb_white() {
        assert_eq!(hsv_to_rgb(0.3, 0.0, 1.0).round(), Rgb8::new(255, 255, 255));
    }

    #[test]
    fn test_hsv_to_rgb_black() {
        assert_eq!(hsv_to_rgb(0.7, 1.0, 0.0).round(), Rgb8::BLACK);
    }

    #[test]
    fn test_hsv_full_turn_wraps_to_red() {
        assert_eq!(hsv_to_rgb(1.0, 1.0, 1.0).round(), Rgb8::new(255, 0, 0));
        assert_eq!(hsv_to_rgb(-1.0, 1.0, 1.0).round(), Rgb8::new(255, 0, 0));
    }

    #[test]
    fn test_achromatic_hsl_skips_hue() {
        let hsl = rgb_to_hsl(90.0, 90.0, 90.0);
        assert_eq!(hsl.h, 0.0);
        assert_eq!(hsl.s, 0.0);

        let rgb = hsl_to_rgb(0.9, 0.0, 0.25);
        assert_eq!(rgb, Rgb::new(63.75, 63.75, 63.75));
    }

    #[test]
    fn test_black_hsv_has_zero_saturation() {
        let hsv = rgb_to_hsv(0.0, 0.0, 0.0);
        assert_eq!(hsv, Hsv { h: 0.0, s: 0.0, v: 0.0 });
    }

    #[test]
    fn test_advance_hue_wraps_both_ways() {
        assert!((advance_hue(0.75, 0.5) - 0.25).abs() < 1e-12);
        assert!((advance_hue(0.25, -0.5) - 0.75).abs() < 1e-12);
        assert_eq!(advance_hue(0.0, -1e-18), 0.0);
    }

    #[test]
    fn test_round_clamps_channels() {
        assert_eq!(Rgb::new(-3.0, 255.4, 300.0).round(), Rgb8::new(0, 255, 255));
        assert_eq!(Rgb::new(127.5, 0.49, 0.5).round(), Rgb8::new(128, 0, 1));
    }
}
