use crate::math::{Point, Rgb8};
use crate::traits::DrawingSurface;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// CPU canvas - RGBA pixel buffer behind the drawing surface contract
///
/// Paths are transformed to device space as they are built, so changing the
/// transform mid-path only affects later points.
#[derive(Debug, Clone)]
pub struct Canvas {
    /// RGBA pixels, row-major
    pixels: Vec<[u8; 4]>,
    width: u32,
    height: u32,
    /// Current scale transform
    scale: Point,
    /// Device-space subpaths of the current path
    path: Vec<Vec<Point>>,
    stroke_color: Rgb8,
    fill_color: Rgb8,
}

/// Pixel count, widened before multiplying
fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

impl Canvas {
    /// Create new transparent canvas with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![TRANSPARENT; buffer_len(width, height)],
            width,
            height,
            scale: Point::ONE,
            path: Vec::new(),
            stroke_color: Rgb8::BLACK,
            fill_color: Rgb8::BLACK,
        }
    }

    /// Get canvas dimensions
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Raw RGBA bytes for upload
    pub fn pixels(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Read one pixel, `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Number of pixels with non-zero alpha
    pub fn painted_pixels(&self) -> usize {
        self.pixels.iter().filter(|p| p[3] != 0).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn to_device(&self, point: Point) -> Point {
        point * self.scale
    }

    fn set_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        self.pixels[idx] = rgba;
    }

    /// Draw line using Bresenham's algorithm
    fn draw_line(&mut self, from: Point, to: Point, rgba: [u8; 4]) {
        let (mut x, mut y) = (from.x.round() as i64, from.y.round() as i64);
        let (x2, y2) = (to.x.round() as i64, to.y.round() as i64);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set_pixel(x, y, rgba);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Even-odd scanline fill over every subpath, each implicitly closed
    fn fill_path(&mut self, rgba: [u8; 4]) {
        let edges: Vec<(Point, Point)> = self
            .path
            .iter()
            .filter(|sub| sub.len() >= 3)
            .flat_map(|sub| {
                sub.iter()
                    .copied()
                    .zip(sub.iter().copied().cycle().skip(1))
                    .take(sub.len())
            })
            .collect();

        if edges.is_empty() {
            return;
        }

        let mut crossings = Vec::new();
        for row in 0..self.height {
            let scan_y = row as f64 + 0.5;
            crossings.clear();

            for &(a, b) in &edges {
                // Half-open rule so shared vertices count once
                if (a.y <= scan_y) != (b.y <= scan_y) {
                    let t = (scan_y - a.y) / (b.y - a.y);
                    crossings.push(a.x + t * (b.x - a.x));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0) as i64;
                let end = ((span[1] - 0.5).ceil() as i64).min(self.width as i64);
                for x in start..end {
                    self.set_pixel(x, row as i64, rgba);
                }
            }
        }
    }
}

impl DrawingSurface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_size(&mut self, width: u32, height: u32) {
        *self = Self {
            stroke_color: self.stroke_color,
            fill_color: self.fill_color,
            ..Self::new(width, height)
        };
    }

    fn set_transform(&mut self, scale_x: f64, scale_y: f64) {
        self.scale = Point::new(scale_x, scale_y);
    }

    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let top_left = self.to_device(Point::new(x, y));
        let bottom_right = self.to_device(Point::new(x + width, y + height));

        let x0 = (top_left.x.floor().max(0.0) as u32).min(self.width);
        let y0 = top_left.y.floor().max(0.0) as u32;
        let x1 = (bottom_right.x.ceil().max(0.0) as u32).min(self.width);
        let y1 = (bottom_right.y.ceil().max(0.0) as u32).min(self.height);

        for py in y0..y1 {
            let row = self.index(0, py);
            self.pixels[row + x0 as usize..row + x1.max(x0) as usize].fill(TRANSPARENT);
        }
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, point: Point) {
        let device = self.to_device(point);
        self.path.push(vec![device]);
    }

    fn line_to(&mut self, point: Point) {
        let device = self.to_device(point);
        match self.path.last_mut() {
            Some(sub) => sub.push(device),
            // Like a 2D context: lineTo on an empty path only sets the start
            None => self.path.push(vec![device]),
        }
    }

    fn stroke(&mut self) {
        let rgba = self.stroke_color.to_rgba();
        let segments: Vec<(Point, Point)> = self
            .path
            .iter()
            .flat_map(|sub| sub.windows(2).map(|w| (w[0], w[1])))
            .collect();

        for (from, to) in segments {
            self.draw_line(from, to, rgba);
        }
    }

    fn fill(&mut self) {
        let rgba = self.fill_color.to_rgba();
        self.fill_path(rgba);
    }

    fn set_stroke_color(&mut self, color: Rgb8) {
        self.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: Rgb8) {
        self.fill_color = color;
    }
}
