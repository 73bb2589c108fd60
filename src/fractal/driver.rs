//! Frame-paced state machine that draws spiral generations onto a surface.
//!
//! Each resize starts a new session. Ticks queued by an older session are
//! still handed out once, but they compare their session id against the live
//! one and drop out without drawing or rescheduling.

use std::f64::consts::TAU;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use log::{debug, info, trace, warn};

use crate::config::{DrawStyle, FractalConfig};
use crate::core::{FrameLimiter, FrameQueue, FrameTask, SessionId};
use crate::error::{ConfigError, GeometryError};
use crate::math::{
    regular_polygon, subdivide_with_threshold, AnchorRatio, DegeneracyProbe, Point, Polygon,
};
use crate::traits::DrawingSurface;

use super::anchor::AnchorStepper;
use super::palette::HuePalette;
use super::viewport::Viewport;

/// Externally visible lifecycle of the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// No session yet, or the surface was never sized
    Idle,
    /// The next tick starts a generation from the base polygon
    InitialDraw,
    /// Partway through a generation's nested polygons
    SubdividingFrame,
    /// Single-generation run finished
    Retired,
}

/// What one host repaint did with the queued ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Ticks that ran and drew
    pub executed: usize,
    /// Ticks pushed back to the next repaint by the throttle
    pub deferred: usize,
    /// Ticks from superseded sessions, dropped silently
    pub stale: usize,
}

/// Inputs that determine a generation's step count
#[derive(Debug, Clone, PartialEq)]
struct PatternGeometry {
    radius: f64,
    center: Point,
    side_count: usize,
    ratio: AnchorRatio,
}

#[derive(Debug, Clone)]
enum Phase {
    InitialDraw,
    Subdividing { shape: Polygon, steps: usize },
    Retired,
}

pub struct AnimationDriver<S: DrawingSurface> {
    config: FractalConfig,
    surface: S,
    palette: HuePalette,
    anchor: AnchorStepper,
    probe: DegeneracyProbe,
    limiter: FrameLimiter,
    queue: FrameQueue,
    session: Option<SessionId>,
    last_session: SessionId,
    phase: Phase,
    orientation: f64,
    iteration_cache: Option<(PatternGeometry, usize)>,
    drawn_since_clear: bool,
    generations: u64,
}

/// Starting hue from the sub-second part of the wall clock
fn seed_hue() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() as f64 / 1e9)
        .unwrap_or(0.0)
}

impl<S: DrawingSurface> AnimationDriver<S> {
    pub fn new(config: FractalConfig, surface: S) -> Result<Self, ConfigError> {
        config.validate()?;

        let ratio = AnchorRatio::new(config.anchor_ratio)?;
        let base_hue = config.base_hue.unwrap_or_else(seed_hue);

        Ok(Self {
            palette: HuePalette::new(&config, base_hue),
            anchor: AnchorStepper::new(config.anchor_schedule, ratio),
            probe: DegeneracyProbe::new(config.degeneracy_threshold, config.iteration_cap),
            limiter: FrameLimiter::new(config.base_fps),
            queue: FrameQueue::new(),
            session: None,
            last_session: SessionId::default(),
            phase: Phase::InitialDraw,
            orientation: 0.0,
            iteration_cache: None,
            drawn_since_clear: false,
            generations: 0,
            config,
            surface,
        })
    }

    pub fn config(&self) -> &FractalConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        if self.session.is_none() {
            return DriverState::Idle;
        }
        match self.phase {
            Phase::InitialDraw => DriverState::InitialDraw,
            Phase::Subdividing { .. } => DriverState::SubdividingFrame,
            Phase::Retired => DriverState::Retired,
        }
    }

    pub fn current_session(&self) -> Option<SessionId> {
        self.session
    }

    /// Whether the host should schedule another repaint
    pub fn has_pending_frames(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn palette(&self) -> &HuePalette {
        &self.palette
    }

    /// Start angle of the next base polygon, in radians
    pub fn orientation(&self) -> f64 {
        self.orientation
    }

    pub fn anchor_ratio(&self) -> AnchorRatio {
        self.anchor.current()
    }

    /// Cached shapes per generation (steps + 1), if computed
    pub fn shapes_per_generation(&self) -> Option<usize> {
        self.iteration_cache.as_ref().map(|(_, steps)| steps + 1)
    }

    /// Generations completed over the driver's lifetime
    pub fn generations(&self) -> u64 {
        self.generations
    }

    /// Restart the animation for a new available area
    ///
    /// Sizes and rescales the surface, clears it, recomputes the iteration
    /// cache and supersedes the running session. The new session's first tick
    /// runs immediately. Returns `None` if the area is empty.
    pub fn resize(&mut self, avail_width: f64, avail_height: f64, now: Instant) -> Option<SessionId> {
        let Some(viewport) = Viewport::letterbox(
            self.config.base_width,
            self.config.base_height,
            avail_width,
            avail_height,
        ) else {
            debug!("ignoring resize to {}x{}", avail_width, avail_height);
            return None;
        };

        self.surface.set_size(viewport.width, viewport.height);
        self.surface.set_transform(viewport.scale, viewport.scale);
        self.clear();

        self.iteration_cache = None;
        if self.config.needs_iteration_count() {
            self.refresh_iteration_cache();
        }

        let session = self.last_session.next();
        self.last_session = session;
        self.session = Some(session);
        self.phase = Phase::InitialDraw;

        info!(
            "session {} started: surface {}x{}, scale {:.4}",
            session, viewport.width, viewport.height, viewport.scale
        );

        self.limiter.mark(now);
        self.tick();
        if !matches!(self.phase, Phase::Retired) {
            self.queue.request(FrameTask::new(session));
        }

        Some(session)
    }

    /// Run every tick queued before this repaint, in order
    pub fn run_frame(&mut self, now: Instant) -> FrameStats {
        let mut stats = FrameStats::default();

        for task in self.queue.take_ready() {
            if !task.is_current(self.session) {
                trace!("dropping stale tick from session {}", task.session);
                stats.stale += 1;
                continue;
            }

            if !self.limiter.try_fire(now) {
                trace!("tick deferred by throttle");
                stats.deferred += 1;
                self.queue.request(task);
                continue;
            }

            stats.executed += 1;
            self.tick();
            if !matches!(self.phase, Phase::Retired) {
                self.queue.request(task);
            }
        }

        stats
    }

    fn pattern_geometry(&self) -> PatternGeometry {
        PatternGeometry {
            radius: self.config.base_radius(),
            center: Point::new(self.config.base_width / 2.0, self.config.base_height / 2.0),
            side_count: self.config.side_count,
            ratio: self.anchor.current(),
        }
    }

    fn base_polygon(&self, geometry: &PatternGeometry, start_angle: f64) -> Result<Polygon, GeometryError> {
        regular_polygon(
            geometry.radius,
            geometry.side_count,
            geometry.center.x,
            geometry.center.y,
            start_angle,
        )
    }

    /// Recompute the step count if the pattern geometry changed
    fn refresh_iteration_cache(&mut self) {
        let geometry = self.pattern_geometry();
        if matches!(&self.iteration_cache, Some((cached, _)) if *cached == geometry) {
            return;
        }

        let steps = match self
            .base_polygon(&geometry, 0.0)
            .and_then(|base| self.probe.iterations(&base, geometry.ratio))
        {
            Ok(steps) => steps,
            Err(GeometryError::Stalled { iterations }) => {
                warn!(
                    "anchor ratio {} did not degenerate within {} iterations",
                    geometry.ratio.get(),
                    iterations
                );
                iterations
            }
            Err(err) => {
                warn!("iteration count unavailable: {}", err);
                return;
            }
        };

        debug!(
            "iteration count for ratio {}: {} steps",
            geometry.ratio.get(),
            steps
        );
        self.palette.set_shapes_per_generation(steps as u64 + 1);
        self.iteration_cache = Some((geometry, steps));
    }

    fn clear(&mut self) {
        let (w, h) = (self.config.base_width, self.config.base_height);
        self.surface.clear(0.0, 0.0, w, h);
        self.drawn_since_clear = false;
    }

    /// One unit of scheduled work
    fn tick(&mut self) {
        let budget = match self.phase {
            Phase::Retired => return,
            Phase::InitialDraw => {
                self.begin_generation();
                match self.config.shapes_per_tick {
                    Some(_) => return,
                    None => usize::MAX,
                }
            }
            Phase::Subdividing { .. } => self
                .config
                .shapes_per_tick
                .map_or(usize::MAX, |n| n.get() as usize),
        };

        self.subdivide_frame(budget);
    }

    /// Clear if needed and draw the base polygon at the current orientation
    fn begin_generation(&mut self) {
        if self.drawn_since_clear {
            self.clear();
        }
        if self.config.needs_iteration_count() {
            self.refresh_iteration_cache();
        }

        let geometry = self.pattern_geometry();
        match self.base_polygon(&geometry, self.orientation) {
            Ok(base) => {
                self.draw_shape(&base);
                self.phase = Phase::Subdividing {
                    shape: base,
                    steps: 0,
                };
            }
            Err(err) => {
                warn!("cannot build base polygon: {}", err);
                self.phase = Phase::Retired;
            }
        }
    }

    /// Draw up to `budget` nested polygons of the running generation
    fn subdivide_frame(&mut self, budget: usize) {
        let (mut shape, mut steps) = match std::mem::replace(&mut self.phase, Phase::InitialDraw) {
            Phase::Subdividing { shape, steps } => (shape, steps),
            other => {
                self.phase = other;
                return;
            }
        };

        let ratio = self.anchor.current();
        for _ in 0..budget {
            let step = subdivide_with_threshold(&shape, ratio, self.config.degeneracy_threshold);
            self.draw_shape(&step.polygon);
            shape = step.polygon;
            steps += 1;

            if !step.should_continue {
                self.end_generation(steps);
                return;
            }
            if steps >= self.config.iteration_cap {
                warn!(
                    "generation stalled after {} steps at anchor ratio {}",
                    steps,
                    ratio.get()
                );
                self.end_generation(steps);
                return;
            }
        }

        self.phase = Phase::Subdividing { shape, steps };
    }

    fn end_generation(&mut self, steps: usize) {
        self.generations += 1;
        debug!(
            "generation {} finished after {} steps",
            self.generations, steps
        );

        if self.config.rotate_base {
            self.orientation = (self.orientation + self.config.rotation_step).rem_euclid(TAU);
        }
        self.palette.end_generation();
        if self.anchor.advance() {
            debug!("anchor ratio now {}", self.anchor.current().get());
        }

        self.phase = if self.config.run_continuously {
            Phase::InitialDraw
        } else {
            info!("single generation complete, retiring");
            Phase::Retired
        };
    }

    fn draw_shape(&mut self, shape: &Polygon) {
        match self.config.draw_style {
            DrawStyle::StrokeEdges => {
                for (from, to) in shape.edges() {
                    let color = self.palette.next_color();
                    self.surface.begin_path();
                    self.surface.move_to(from);
                    self.surface.set_stroke_color(color);
                    self.surface.line_to(to);
                    self.surface.stroke();
                }
            }
            DrawStyle::FillShapes => {
                let color = self.palette.next_color();
                self.surface.set_fill_color(color);
                self.surface.begin_path();
                self.surface.move_to(shape.vertex(0));
                for &point in &shape.points()[1..] {
                    self.surface.line_to(point);
                }
                self.surface.fill();
            }
        }
        self.drawn_since_clear = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{RecordingSurface, SurfaceCall};
    use std::num::NonZeroU32;
    use std::time::Duration;

    fn config() -> FractalConfig {
        FractalConfig {
            side_count: 4,
            anchor_ratio: 0.5,
            base_hue: Some(0.0),
            base_width: 100.0,
            base_height: 100.0,
            ..Default::default()
        }
    }

    fn driver(config: FractalConfig) -> AnimationDriver<RecordingSurface> {
        AnimationDriver::new(config, RecordingSurface::default()).unwrap()
    }

    #[test]
    fn starts_idle_without_work() {
        let mut d = driver(config());
        assert_eq!(d.state(), DriverState::Idle);
        assert_eq!(d.current_session(), None);
        assert!(!d.has_pending_frames());
        assert_eq!(d.run_frame(Instant::now()), FrameStats::default());
    }

    #[test]
    fn rejects_invalid_configuration() {
        let bad = FractalConfig {
            anchor_ratio: 1.0,
            ..config()
        };
        assert!(AnimationDriver::new(bad, RecordingSurface::default()).is_err());
    }

    #[test]
    fn empty_resize_is_ignored() {
        let mut d = driver(config());
        assert_eq!(d.resize(0.0, 500.0, Instant::now()), None);
        assert_eq!(d.state(), DriverState::Idle);
        assert!(d.surface().calls().is_empty());
    }

    #[test]
    fn resize_draws_first_generation_immediately() {
        let mut d = driver(config());
        let session = d.resize(200.0, 200.0, Instant::now()).unwrap();

        assert_eq!(d.current_session(), Some(session));
        assert_eq!(d.generations(), 1);
        assert_eq!(d.state(), DriverState::InitialDraw);
        assert!(d.has_pending_frames());

        let calls = d.surface().calls();
        assert_eq!(calls[0], SurfaceCall::SetSize { width: 200, height: 200 });
        assert_eq!(calls[1], SurfaceCall::SetTransform { scale_x: 2.0, scale_y: 2.0 });
        assert!(matches!(calls[2], SurfaceCall::Clear { .. }));
        assert_eq!(d.surface().count_clears(), 1);
    }

    #[test]
    fn each_edge_is_its_own_path() {
        let mut d = driver(config());
        d.resize(100.0, 100.0, Instant::now());

        let calls = d.surface().calls();
        assert_eq!(calls[3], SurfaceCall::BeginPath);
        assert!(matches!(calls[4], SurfaceCall::MoveTo(_)));
        assert!(matches!(calls[5], SurfaceCall::StrokeColor(_)));
        assert!(matches!(calls[6], SurfaceCall::LineTo(_)));
        assert_eq!(calls[7], SurfaceCall::Stroke);

        let strokes = d.surface().draw_call_count() as u64;
        assert_eq!(strokes, d.palette().line());
        assert_eq!(strokes % 4, 0);
    }

    #[test]
    fn iteration_cache_matches_generation_length() {
        let mut d = driver(config());
        d.resize(100.0, 100.0, Instant::now());

        let shapes = d.shapes_per_generation().unwrap() as u64;
        assert_eq!(d.palette().shapes_per_generation(), shapes);
        assert_eq!(d.surface().draw_call_count() as u64, shapes * 4);
    }

    #[test]
    fn shapes_per_tick_spreads_generation_over_ticks() {
        let mut d = driver(FractalConfig {
            shapes_per_tick: NonZeroU32::new(1),
            ..config()
        });
        let t0 = Instant::now();
        d.resize(100.0, 100.0, t0);

        // First tick draws only the base polygon
        assert_eq!(d.state(), DriverState::SubdividingFrame);
        assert_eq!(d.surface().draw_call_count(), 4);

        let stats = d.run_frame(t0 + Duration::from_millis(20));
        assert_eq!(stats.executed, 1);
        assert_eq!(d.surface().draw_call_count(), 8);
    }

    #[test]
    fn fill_style_fills_one_path_per_shape() {
        let mut d = driver(FractalConfig {
            draw_style: DrawStyle::FillShapes,
            ..config()
        });
        d.resize(100.0, 100.0, Instant::now());

        let calls = d.surface().calls();
        assert!(matches!(calls[3], SurfaceCall::FillColor(_)));
        assert_eq!(calls[4], SurfaceCall::BeginPath);
        assert_eq!(calls[9], SurfaceCall::Fill);
        assert_eq!(
            d.surface().draw_call_count() as u64,
            d.shapes_per_generation().unwrap() as u64
        );
        assert_eq!(d.palette().line(), d.shapes_per_generation().unwrap() as u64);
    }

    #[test]
    fn stall_ends_generation_at_cap() {
        let mut d = driver(FractalConfig {
            anchor_ratio: 0.001,
            iteration_cap: 5,
            ..config()
        });
        d.resize(100.0, 100.0, Instant::now());

        assert_eq!(d.generations(), 1);
        assert_eq!(d.shapes_per_generation(), Some(6));
        assert_eq!(d.surface().draw_call_count(), 6 * 4);
    }
}
