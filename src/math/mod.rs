mod color;
mod polygon;

pub use color::{
    advance_hue, hsl_to_rgb, hsv_to_rgb, rgb_to_hsl, rgb_to_hsv, Hsl, Hsv, Rgb, Rgb8,
};
pub use polygon::{
    iterations_until_degenerate, regular_polygon, subdivide, subdivide_with_threshold,
    AnchorRatio, DegeneracyProbe, Point, Polygon, Subdivision, DEFAULT_ITERATION_CAP,
    DEFAULT_THRESHOLD,
};
