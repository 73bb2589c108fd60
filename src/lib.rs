pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod fractal;
pub mod math;
pub mod traits;

pub use config::FractalConfig;
pub use error::{ConfigError, GeometryError};
pub use fractal::{AnimationDriver, DriverState, FrameStats};
