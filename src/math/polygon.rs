//! Regular polygons and the spiral subdivision step.

use std::f64::consts::TAU;

use glam::DVec2;

use crate::error::GeometryError;

/// Point in surface space
pub type Point = DVec2;

/// Edge components at or below this many surface units count as collapsed
pub const DEFAULT_THRESHOLD: f64 = 1.0;

/// Subdivision steps allowed before a ratio is declared non-terminating
pub const DEFAULT_ITERATION_CAP: usize = 100_000;

/// Closed polygon with at least three vertices
///
/// Vertex order defines edge traversal; indices wrap modulo the vertex count.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Result<Self, GeometryError> {
        if points.len() < 3 {
            return Err(GeometryError::TooFewSides {
                sides: points.len(),
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Vertex at `index`, wrapping around the polygon
    pub fn vertex(&self, index: usize) -> Point {
        self.points[index % self.points.len()]
    }

    /// Edges as (from, to) pairs, the last one closing back to vertex 0
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        (0..self.points.len()).map(move |i| (self.vertex(i), self.vertex(i + 1)))
    }

    pub fn max_edge_length(&self) -> f64 {
        self.edges()
            .map(|(a, b)| a.distance(b))
            .fold(0.0, f64::max)
    }

    pub fn centroid(&self) -> Point {
        self.points.iter().copied().sum::<Point>() / self.points.len() as f64
    }
}

/// Fraction along an edge where the next nested vertex is placed
///
/// Always strictly inside (0, 1); the end points never converge.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AnchorRatio(f64);

impl AnchorRatio {
    /// Closest a nudged ratio may get to 0 or 1
    pub const MARGIN: f64 = 1e-6;

    pub fn new(ratio: f64) -> Result<Self, GeometryError> {
        if ratio.is_finite() && ratio > 0.0 && ratio < 1.0 {
            Ok(Self(ratio))
        } else {
            Err(GeometryError::AnchorRatioOutOfRange { ratio })
        }
    }

    /// Force any value into [MARGIN, 1 - MARGIN]; NaN maps to 0.5
    pub fn nudged(ratio: f64) -> Self {
        if ratio.is_nan() {
            return Self(0.5);
        }
        Self(ratio.clamp(Self::MARGIN, 1.0 - Self::MARGIN))
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// One subdivision step: the nested polygon and whether detail remains
#[derive(Debug, Clone, PartialEq)]
pub struct Subdivision {
    pub polygon: Polygon,
    pub should_continue: bool,
}

/// Place `side_count` vertices evenly on a circle, the first at `start_angle`
pub fn regular_polygon(
    radius: f64,
    side_count: usize,
    center_x: f64,
    center_y: f64,
    start_angle: f64,
) -> Result<Polygon, GeometryError> {
    if side_count < 3 {
        return Err(GeometryError::TooFewSides { sides: side_count });
    }
    if !(radius > 0.0) {
        return Err(GeometryError::NonPositiveRadius { radius });
    }

    let arc = TAU / side_count as f64;
    let center = Point::new(center_x, center_y);
    let points = (0..side_count)
        .map(|n| {
            let theta = start_angle + arc * n as f64;
            center + radius * Point::new(theta.cos(), theta.sin())
        })
        .collect();

    Polygon::new(points)
}

pub fn subdivide(polygon: &Polygon, ratio: AnchorRatio) -> Subdivision {
    subdivide_with_threshold(polygon, ratio, DEFAULT_THRESHOLD)
}

/// Move every vertex `ratio` of the way toward its successor
///
/// The continue flag looks only at the last edge processed (the closing
/// edge): detail remains while either of its components exceeds `threshold`.
pub fn subdivide_with_threshold(
    polygon: &Polygon,
    ratio: AnchorRatio,
    threshold: f64,
) -> Subdivision {
    let mut last_edge = Point::ZERO;
    let points = polygon
        .edges()
        .map(|(from, to)| {
            last_edge = to - from;
            from + last_edge * ratio.get()
        })
        .collect();

    Subdivision {
        polygon: Polygon { points },
        should_continue: last_edge.x.abs() > threshold || last_edge.y.abs() > threshold,
    }
}

/// Counts subdivision steps until a polygon collapses below a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DegeneracyProbe {
    pub threshold: f64,
    pub iteration_cap: usize,
}

impl Default for DegeneracyProbe {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}

impl DegeneracyProbe {
    pub fn new(threshold: f64, iteration_cap: usize) -> Self {
        Self {
            threshold,
            iteration_cap,
        }
    }

    /// Number of `subdivide` calls until the continue flag drops
    pub fn iterations(&self, initial: &Polygon, ratio: AnchorRatio) -> Result<usize, GeometryError> {
        let mut shape = initial.clone();
        let mut count = 0;

        loop {
            if count >= self.iteration_cap {
                return Err(GeometryError::Stalled { iterations: count });
            }

            let step = subdivide_with_threshold(&shape, ratio, self.threshold);
            count += 1;
            if !step.should_continue {
                return Ok(count);
            }
            shape = step.polygon;
        }
    }
}

pub fn iterations_until_degenerate(
    initial: &Polygon,
    ratio: AnchorRatio,
) -> Result<usize, GeometryError> {
    DegeneracyProbe::default().iterations(initial, ratio)
}
