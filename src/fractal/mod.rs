//! The animation domain: colour policy, anchor stepping, sizing and the
//! frame-paced driver that ties them to a drawing surface.

pub mod anchor;
pub mod driver;
pub mod palette;
pub mod viewport;

pub use anchor::AnchorStepper;
pub use driver::{AnimationDriver, DriverState, FrameStats};
pub use palette::HuePalette;
pub use viewport::Viewport;
