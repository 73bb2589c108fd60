use spiral_fractal::core::Canvas;
use spiral_fractal::math::{Point, Rgb8};
use spiral_fractal::traits::DrawingSurface;

const BLUE: Rgb8 = Rgb8 { r: 0, g: 0, b: 255 };
const CLEAR: [u8; 4] = [0, 0, 0, 0];

fn triangle(surface: &mut impl DrawingSurface, a: Point, b: Point, c: Point) {
    surface.begin_path();
    surface.move_to(a);
    surface.line_to(b);
    surface.line_to(c);
}

// ============================================================================
// Canvas through the surface contract
// ============================================================================

#[test]
fn test_canvas_new_is_transparent() {
    let canvas = Canvas::new(64, 32);
    assert_eq!(canvas.dimensions(), (64, 32));
    assert_eq!(canvas.pixels().len(), 64 * 32 * 4);
    assert!(canvas.pixels().iter().all(|&b| b == 0));
}

#[test]
fn test_canvas_stroke_uses_current_color() {
    let mut canvas = Canvas::new(20, 20);
    canvas.set_stroke_color(BLUE);
    canvas.begin_path();
    canvas.move_to(Point::new(2.0, 2.0));
    canvas.line_to(Point::new(2.0, 12.0));
    canvas.stroke();

    assert_eq!(canvas.pixel(2, 7), Some([0, 0, 255, 255]));
    assert_eq!(canvas.painted_pixels(), 11);

    // Changing the colour afterwards does not repaint
    canvas.set_stroke_color(Rgb8::new(255, 255, 255));
    assert_eq!(canvas.pixel(2, 7), Some([0, 0, 255, 255]));
}

#[test]
fn test_canvas_begin_path_discards_previous_segments() {
    let mut canvas = Canvas::new(20, 20);
    canvas.set_stroke_color(BLUE);
    canvas.begin_path();
    canvas.move_to(Point::new(0.0, 0.0));
    canvas.line_to(Point::new(10.0, 0.0));
    canvas.stroke();

    canvas.begin_path();
    canvas.move_to(Point::new(0.0, 5.0));
    canvas.line_to(Point::new(10.0, 5.0));
    canvas.stroke();

    // Second stroke paints only its own row
    assert_eq!(canvas.painted_pixels(), 22);
}

#[test]
fn test_canvas_fill_triangle_even_odd() {
    let mut canvas = Canvas::new(40, 40);
    canvas.set_fill_color(BLUE);
    triangle(
        &mut canvas,
        Point::new(0.0, 0.0),
        Point::new(40.0, 0.0),
        Point::new(0.0, 40.0),
    );
    canvas.fill();

    assert_eq!(canvas.pixel(1, 1), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(38, 38), Some(CLEAR));
    // Half of the square, give or take the diagonal
    let painted = canvas.painted_pixels();
    assert!((760..=840).contains(&painted), "painted {}", painted);
}

#[test]
fn test_canvas_fill_ignores_open_two_point_path() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_fill_color(BLUE);
    canvas.begin_path();
    canvas.move_to(Point::new(0.0, 0.0));
    canvas.line_to(Point::new(9.0, 9.0));
    canvas.fill();

    assert_eq!(canvas.painted_pixels(), 0);
}

#[test]
fn test_canvas_scaled_fill_lands_in_device_space() {
    let mut canvas = Canvas::new(50, 50);
    canvas.set_transform(0.5, 0.5);
    canvas.set_fill_color(BLUE);
    canvas.begin_path();
    canvas.move_to(Point::new(0.0, 0.0));
    canvas.line_to(Point::new(40.0, 0.0));
    canvas.line_to(Point::new(40.0, 40.0));
    canvas.line_to(Point::new(0.0, 40.0));
    canvas.fill();

    assert_eq!(canvas.painted_pixels(), 400);
    assert_eq!(canvas.pixel(19, 19), Some([0, 0, 255, 255]));
    assert_eq!(canvas.pixel(20, 20), Some(CLEAR));
}

#[test]
fn test_canvas_clear_partial_rect() {
    let mut canvas = Canvas::new(10, 10);
    canvas.set_fill_color(BLUE);
    canvas.begin_path();
    canvas.move_to(Point::new(0.0, 0.0));
    canvas.line_to(Point::new(10.0, 0.0));
    canvas.line_to(Point::new(10.0, 10.0));
    canvas.line_to(Point::new(0.0, 10.0));
    canvas.fill();

    canvas.clear(2.0, 2.0, 3.0, 3.0);
    assert_eq!(canvas.painted_pixels(), 91);
    assert_eq!(canvas.pixel(3, 3), Some(CLEAR));

    // Rectangles past the edge are clipped
    canvas.clear(8.0, 8.0, 100.0, 100.0);
    assert_eq!(canvas.painted_pixels(), 87);
}
