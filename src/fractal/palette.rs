//! Per-edge colours driven by a running line counter.
//!
//! The counter only ever grows, across generations and resizes, so the
//! colours keep drifting even when the base hue stands still.

use crate::config::{ColorSpace, FractalConfig, HueShiftMode};
use crate::math::{advance_hue, hsl_to_rgb, hsv_to_rgb, Rgb8};

#[derive(Debug, Clone)]
pub struct HuePalette {
    mode: HueShiftMode,
    color_space: ColorSpace,
    scale: f64,
    negate: bool,
    saturation: f64,
    lightness_or_value: f64,
    base_hue: f64,
    base_hue_step: f64,
    steps_base: bool,
    side_count: u64,
    line: u64,
    shapes_per_generation: u64,
}

impl HuePalette {
    pub fn new(config: &FractalConfig, base_hue: f64) -> Self {
        Self {
            mode: config.hue_shift_mode,
            color_space: config.color_space,
            scale: config.hue_scale,
            negate: config.negate_side_shift(),
            saturation: config.saturation,
            lightness_or_value: config.lightness_or_value,
            base_hue: advance_hue(base_hue, 0.0),
            base_hue_step: config.base_hue_step,
            steps_base: config.rotate_base || config.hue_shift_mode == HueShiftMode::RotatingBase,
            side_count: config.side_count.max(1) as u64,
            line: 0,
            shapes_per_generation: 1,
        }
    }

    pub fn base_hue(&self) -> f64 {
        self.base_hue
    }

    /// Edges (or filled shapes) coloured so far
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn shapes_per_generation(&self) -> u64 {
        self.shapes_per_generation
    }

    /// Shapes in one generation, base polygon included
    pub fn set_shapes_per_generation(&mut self, shapes: u64) {
        self.shapes_per_generation = shapes.max(1);
    }

    /// Line number with the side shift folded in
    fn adjusted_line(&self) -> u64 {
        let n = self.side_count;
        if self.negate {
            self.line + (self.line / n) % n
        } else {
            self.line
        }
    }

    /// Hue for the next line, in [0, 1)
    pub fn hue(&self) -> f64 {
        let n = self.side_count as f64;
        let adjusted = self.adjusted_line();
        let shift = match self.mode {
            HueShiftMode::FixedPerEdge => adjusted as f64 / n,
            HueShiftMode::GenerationSynced => {
                let shapes = self.shapes_per_generation as f64;
                (adjusted % self.side_count) as f64 / n + adjusted as f64 / (n * shapes)
            }
            HueShiftMode::RotatingBase => (adjusted % self.side_count) as f64 / n,
        };
        advance_hue(self.base_hue, self.scale * shift)
    }

    /// Colour for the next line; advances the counter
    pub fn next_color(&mut self) -> Rgb8 {
        let hue = self.hue();
        self.line += 1;

        let rgb = match self.color_space {
            ColorSpace::Hsv => hsv_to_rgb(hue, self.saturation, self.lightness_or_value),
            ColorSpace::Hsl => hsl_to_rgb(hue, self.saturation, self.lightness_or_value),
        };
        rgb.round()
    }

    /// Drift the base hue once a generation is complete
    pub fn end_generation(&mut self) {
        if self.steps_base {
            self.base_hue = advance_hue(self.base_hue, self.base_hue_step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette(mode: HueShiftMode, sides: usize) -> HuePalette {
        let config = FractalConfig {
            hue_shift_mode: mode,
            side_count: sides,
            ..Default::default()
        };
        HuePalette::new(&config, 0.0)
    }

    #[test]
    fn fixed_per_edge_steps_by_side_fraction() {
        let mut p = palette(HueShiftMode::FixedPerEdge, 4);
        let hues: Vec<f64> = (0..4)
            .map(|_| {
                let h = p.hue();
                p.next_color();
                h
            })
            .collect();
        assert_eq!(hues, vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn side_shift_negation_skips_a_step_per_lap() {
        let mut p = palette(HueShiftMode::FixedPerEdge, 3);
        for _ in 0..3 {
            p.next_color();
        }
        // line 3 -> adjusted 3 + (3/3)%3 = 4
        assert!((p.hue() - (4.0f64 / 3.0).fract()).abs() < 1e-12);
    }

    #[test]
    fn generation_synced_spans_one_cycle_per_generation() {
        let mut p = palette(HueShiftMode::GenerationSynced, 3);
        p.set_shapes_per_generation(10);
        for _ in 0..30 {
            p.next_color();
        }
        // 30 lines = 10 shapes of 3: the slow term has wrapped once
        assert!(p.hue().abs() < 1e-12);
    }

    #[test]
    fn rotating_base_cycles_side_hues() {
        let mut p = palette(HueShiftMode::RotatingBase, 3);
        let first = p.hue();
        for _ in 0..3 {
            p.next_color();
        }
        assert_eq!(p.hue(), first);
    }

    #[test]
    fn base_hue_drifts_only_when_enabled() {
        let config = FractalConfig {
            rotate_base: false,
            hue_shift_mode: HueShiftMode::FixedPerEdge,
            ..Default::default()
        };
        let mut fixed = HuePalette::new(&config, 0.5);
        fixed.end_generation();
        assert_eq!(fixed.base_hue(), 0.5);

        let mut rotating = HuePalette::new(&FractalConfig::default(), 0.5);
        rotating.end_generation();
        assert!((rotating.base_hue() - (0.5 - 1.0 / 360.0)).abs() < 1e-12);
    }

    #[test]
    fn rotating_base_mode_always_drifts() {
        let config = FractalConfig {
            rotate_base: false,
            hue_shift_mode: HueShiftMode::RotatingBase,
            ..Default::default()
        };
        let mut p = HuePalette::new(&config, 0.0);
        p.end_generation();
        assert!(p.base_hue() > 0.99);
    }

    #[test]
    fn next_color_projects_through_color_space() {
        let mut hsv = palette(HueShiftMode::FixedPerEdge, 3);
        assert_eq!(hsv.next_color(), Rgb8::new(255, 0, 0));

        let config = FractalConfig {
            color_space: ColorSpace::Hsl,
            lightness_or_value: 0.5,
            hue_shift_mode: HueShiftMode::FixedPerEdge,
            ..Default::default()
        };
        let mut hsl = HuePalette::new(&config, 0.0);
        assert_eq!(hsl.next_color(), Rgb8::new(255, 0, 0));
        assert_eq!(hsl.line(), 1);
    }
}
