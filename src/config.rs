//! Engine configuration: one struct covering every pattern variant.

use std::f64::consts::TAU;
use std::num::NonZeroU32;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, GeometryError};
use crate::math::{AnchorRatio, DEFAULT_ITERATION_CAP, DEFAULT_THRESHOLD};

/// How the per-edge hue is derived from the running line count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HueShiftMode {
    /// One hue step of `1/sides` per edge
    FixedPerEdge,
    /// Hue steps sized so a whole generation spans one colour cycle
    GenerationSynced,
    /// Edges cycle through `sides` hues around a drifting base hue
    RotatingBase,
}

impl HueShiftMode {
    pub fn negates_by_default(self) -> bool {
        matches!(self, HueShiftMode::FixedPerEdge)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    Hsv,
    Hsl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStyle {
    /// Every edge is its own stroked path in its own colour
    StrokeEdges,
    /// Every nested polygon is one filled path in one colour
    FillShapes,
}

/// Per-generation anchor ratio schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnchorSchedule {
    Fixed,
    /// Hold for `period` generations, then swap the ratio for `1 - ratio`
    Flipping { period: u32 },
    /// Move by `step` for `limit` generations, then hold one while turning around
    Wave { step: f64, limit: u32 },
}

impl AnchorSchedule {
    fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            AnchorSchedule::Fixed => Ok(()),
            AnchorSchedule::Flipping { period: 0 } => Err(ConfigError::InvalidAnchorSchedule(
                "flipping period must be at least 1".into(),
            )),
            AnchorSchedule::Flipping { .. } => Ok(()),
            AnchorSchedule::Wave { step, limit } => {
                if !step.is_finite() {
                    Err(ConfigError::InvalidAnchorSchedule(format!(
                        "wave step must be finite, got {step}"
                    )))
                } else if limit == 0 {
                    Err(ConfigError::InvalidAnchorSchedule(
                        "wave limit must be at least 1".into(),
                    ))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    pub side_count: usize,
    pub anchor_ratio: f64,
    pub anchor_schedule: AnchorSchedule,
    pub hue_shift_mode: HueShiftMode,
    pub hue_scale: f64,
    /// `None` uses the mode's default
    pub negate_side_shift: Option<bool>,
    pub color_space: ColorSpace,
    /// `None` seeds from the system clock
    pub base_hue: Option<f64>,
    pub saturation: f64,
    pub lightness_or_value: f64,
    pub rotate_base: bool,
    pub rotation_step: f64,
    pub base_hue_step: f64,
    pub draw_style: DrawStyle,
    pub base_fps: f64,
    /// `None` draws a whole generation per tick
    pub shapes_per_tick: Option<NonZeroU32>,
    pub degeneracy_threshold: f64,
    pub iteration_cap: usize,
    pub base_width: f64,
    pub base_height: f64,
    pub run_continuously: bool,
}

impl Default for FractalConfig {
    fn default() -> Self {
        Self {
            side_count: 3,
            anchor_ratio: 0.001,
            anchor_schedule: AnchorSchedule::Fixed,
            hue_shift_mode: HueShiftMode::GenerationSynced,
            hue_scale: 1.0,
            negate_side_shift: None,
            color_space: ColorSpace::Hsv,
            base_hue: None,
            saturation: 1.0,
            lightness_or_value: 1.0,
            rotate_base: true,
            rotation_step: TAU / 360.0,
            base_hue_step: -1.0 / 360.0,
            draw_style: DrawStyle::StrokeEdges,
            base_fps: 60.0,
            shapes_per_tick: None,
            degeneracy_threshold: DEFAULT_THRESHOLD,
            iteration_cap: DEFAULT_ITERATION_CAP,
            base_width: 1920.0,
            base_height: 1080.0,
            run_continuously: true,
        }
    }
}

fn unit_range(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

impl FractalConfig {
    /// Load a partial configuration; missing fields keep their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.side_count < 3 {
            return Err(GeometryError::TooFewSides {
                sides: self.side_count,
            }
            .into());
        }
        AnchorRatio::new(self.anchor_ratio)?;
        self.anchor_schedule.validate()?;

        let interval_fits = Duration::try_from_secs_f64(1.0 / self.base_fps).is_ok();
        if !(self.base_fps.is_finite() && self.base_fps > 0.0 && interval_fits) {
            return Err(ConfigError::InvalidFrameRate(self.base_fps));
        }
        if !(self.degeneracy_threshold.is_finite() && self.degeneracy_threshold > 0.0) {
            return Err(ConfigError::InvalidThreshold(self.degeneracy_threshold));
        }
        if self.iteration_cap == 0 {
            return Err(ConfigError::ZeroIterationCap);
        }
        let base_ok = |v: f64| v.is_finite() && v > 0.0;
        if !(base_ok(self.base_width) && base_ok(self.base_height)) {
            return Err(ConfigError::InvalidBaseSize {
                width: self.base_width,
                height: self.base_height,
            });
        }

        unit_range("saturation", self.saturation)?;
        unit_range("lightness_or_value", self.lightness_or_value)?;
        if let Some(hue) = self.base_hue {
            unit_range("base_hue", hue)?;
        }
        finite("hue_scale", self.hue_scale)?;
        finite("rotation_step", self.rotation_step)?;
        finite("base_hue_step", self.base_hue_step)?;

        Ok(())
    }

    pub fn negate_side_shift(&self) -> bool {
        self.negate_side_shift
            .unwrap_or_else(|| self.hue_shift_mode.negates_by_default())
    }

    /// The generation-synced palette needs the subdivision step count
    pub fn needs_iteration_count(&self) -> bool {
        self.hue_shift_mode == HueShiftMode::GenerationSynced
    }

    /// Radius of the base polygon, centred in the base frame
    pub fn base_radius(&self) -> f64 {
        self.base_width.min(self.base_height) / 2.0
    }
}
