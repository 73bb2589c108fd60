use crate::math::{Point, Rgb8};
use crate::traits::DrawingSurface;

/// One call made against a drawing surface
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    SetSize { width: u32, height: u32 },
    SetTransform { scale_x: f64, scale_y: f64 },
    Clear { x: f64, y: f64, width: f64, height: f64 },
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
    Fill,
    StrokeColor(Rgb8),
    FillColor(Rgb8),
}

impl SurfaceCall {
    /// Stroke and fill are the calls that put pixels on screen
    pub fn is_draw(&self) -> bool {
        matches!(self, SurfaceCall::Stroke | SurfaceCall::Fill)
    }
}

/// Surface that draws nothing and remembers every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Return the calls so far and start a fresh log
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn count_clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Clear { .. }))
            .count()
    }

    pub fn draw_call_count(&self) -> usize {
        self.calls.iter().filter(|c| c.is_draw()).count()
    }

    /// Most recent transform set on the surface, if any
    pub fn last_transform(&self) -> Option<(f64, f64)> {
        self.calls.iter().rev().find_map(|c| match c {
            SurfaceCall::SetTransform { scale_x, scale_y } => Some((*scale_x, *scale_y)),
            _ => None,
        })
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.calls.push(SurfaceCall::SetSize { width, height });
    }

    fn set_transform(&mut self, scale_x: f64, scale_y: f64) {
        self.calls.push(SurfaceCall::SetTransform { scale_x, scale_y });
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.calls.push(SurfaceCall::Clear {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
    }

    fn move_to(&mut self, point: Point) {
        self.calls.push(SurfaceCall::MoveTo(point));
    }

    fn line_to(&mut self, point: Point) {
        self.calls.push(SurfaceCall::LineTo(point));
    }

    fn stroke(&mut self) {
        self.calls.push(SurfaceCall::Stroke);
    }

    fn fill(&mut self) {
        self.calls.push(SurfaceCall::Fill);
    }

    fn set_stroke_color(&mut self, color: Rgb8) {
        self.calls.push(SurfaceCall::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: Rgb8) {
        self.calls.push(SurfaceCall::FillColor(color));
    }
}
