// cli.rs - Command-line interface configuration
use std::num::NonZeroU32;
use std::path::PathBuf;

use clap::Parser;

use crate::config::{ColorSpace, DrawStyle, FractalConfig, HueShiftMode};

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "spiral-fractal")]
#[command(about = "Animated spiral polygon fractals", long_about = None)]
pub struct Cli {
    /// JSON configuration file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of polygon sides (at least 3)
    #[arg(long)]
    pub sides: Option<usize>,

    /// Fraction along each edge where the nested vertex lands, in (0, 1)
    #[arg(long = "anchor-ratio")]
    pub anchor_ratio: Option<f64>,

    #[arg(long = "hue-mode", value_enum)]
    pub hue_mode: Option<HueShiftMode>,

    #[arg(long = "color-space", value_enum)]
    pub color_space: Option<ColorSpace>,

    /// Keep the base polygon orientation and base hue fixed
    #[arg(long = "static")]
    pub static_base: bool,

    /// Fill each nested polygon instead of stroking its edges
    #[arg(long)]
    pub fill: bool,

    /// Target tick rate
    #[arg(long)]
    pub fps: Option<f64>,

    /// Nested polygons drawn per tick (default: a whole generation)
    #[arg(long = "shapes-per-tick")]
    pub shapes_per_tick: Option<NonZeroU32>,

    /// Edge component length below which a polygon counts as collapsed
    #[arg(long)]
    pub threshold: Option<f64>,

    #[arg(long = "iteration-cap")]
    pub iteration_cap: Option<usize>,

    /// Starting hue in [0, 1] (default: seeded from the clock)
    #[arg(long = "base-hue")]
    pub base_hue: Option<f64>,

    /// Draw a single generation and stop
    #[arg(long)]
    pub once: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config")]
    pub print_config: bool,
}

impl Cli {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut FractalConfig) {
        if let Some(sides) = self.sides {
            config.side_count = sides;
        }
        if let Some(ratio) = self.anchor_ratio {
            config.anchor_ratio = ratio;
        }
        if let Some(mode) = self.hue_mode {
            config.hue_shift_mode = mode;
        }
        if let Some(space) = self.color_space {
            config.color_space = space;
        }
        if self.static_base {
            config.rotate_base = false;
        }
        if self.fill {
            config.draw_style = DrawStyle::FillShapes;
        }
        if let Some(fps) = self.fps {
            config.base_fps = fps;
        }
        if self.shapes_per_tick.is_some() {
            config.shapes_per_tick = self.shapes_per_tick;
        }
        if let Some(threshold) = self.threshold {
            config.degeneracy_threshold = threshold;
        }
        if let Some(cap) = self.iteration_cap {
            config.iteration_cap = cap;
        }
        if self.base_hue.is_some() {
            config.base_hue = self.base_hue;
        }
        if self.once {
            config.run_continuously = false;
        }
    }

    /// Defaults, then the config file, then flags; validated
    pub fn load_config(&self) -> anyhow::Result<FractalConfig> {
        let mut config = match &self.config {
            Some(path) => FractalConfig::from_json_file(path)?,
            None => FractalConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_yields_defaults() {
        let cli = Cli::try_parse_from(["spiral-fractal"]).unwrap();
        assert_eq!(cli.load_config().unwrap(), FractalConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "spiral-fractal",
            "--sides",
            "6",
            "--anchor-ratio",
            "0.25",
            "--hue-mode",
            "rotating-base",
            "--color-space",
            "hsl",
            "--static",
            "--fill",
            "--shapes-per-tick",
            "3",
            "--once",
        ])
        .unwrap();
        let config = cli.load_config().unwrap();

        assert_eq!(config.side_count, 6);
        assert_eq!(config.anchor_ratio, 0.25);
        assert_eq!(config.hue_shift_mode, HueShiftMode::RotatingBase);
        assert_eq!(config.color_space, ColorSpace::Hsl);
        assert!(!config.rotate_base);
        assert_eq!(config.draw_style, DrawStyle::FillShapes);
        assert_eq!(config.shapes_per_tick, NonZeroU32::new(3));
        assert!(!config.run_continuously);
    }

    #[test]
    fn invalid_flags_fail_validation() {
        let cli = Cli::try_parse_from(["spiral-fractal", "--sides", "2"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn unrepresentable_frame_rate_fails_validation() {
        let cli = Cli::try_parse_from(["spiral-fractal", "--fps", "1e-20"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn zero_shapes_per_tick_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["spiral-fractal", "--shapes-per-tick", "0"]).is_err());
    }

    #[test]
    fn missing_config_file_reports_path() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/spiral.json")),
            ..Default::default()
        };
        let err = cli.load_config().unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/spiral.json"));
    }
}
