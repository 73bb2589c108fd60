use crate::math::{Point, Rgb8};

/// Immediate-mode 2D drawing surface
///
/// Coordinates passed to path and clear calls are in user space; the surface
/// maps them through its current scale transform.
pub trait DrawingSurface {
    /// Width in device pixels
    fn width(&self) -> u32;

    /// Height in device pixels
    fn height(&self) -> u32;

    /// Resize the backing store; also resets the transform to identity
    fn set_size(&mut self, width: u32, height: u32);

    /// Replace the current transform with a scale
    fn set_transform(&mut self, scale_x: f64, scale_y: f64);

    /// Erase a user-space rectangle
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Start a new path, discarding the current one
    fn begin_path(&mut self);

    fn move_to(&mut self, point: Point);

    fn line_to(&mut self, point: Point);

    /// Stroke the current path with the stroke color
    fn stroke(&mut self);

    /// Fill the current path with the fill color
    fn fill(&mut self);

    fn set_stroke_color(&mut self, color: Rgb8);

    fn set_fill_color(&mut self, color: Rgb8);
}
