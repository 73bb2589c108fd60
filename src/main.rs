use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use spiral_fractal::cli::Cli;
use spiral_fractal::core::{Canvas, Clock, FrameRateMeter, Presenter};
use spiral_fractal::fractal::{AnimationDriver, Viewport};
use spiral_fractal::FractalConfig;

const WINDOW_TITLE: &str = "Spiral Fractal";
const MAX_INITIAL_WIDTH: f64 = 1280.0;
const MAX_INITIAL_HEIGHT: f64 = 720.0;

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    presenter: Option<Presenter>,
    driver: AnimationDriver<Canvas>,
    clock: Clock,
    meter: FrameRateMeter,
}

impl App {
    fn new(config: FractalConfig) -> anyhow::Result<Self> {
        let driver = AnimationDriver::new(config, Canvas::new(0, 0))?;
        Ok(Self {
            window: None,
            presenter: None,
            driver,
            clock: Clock::new(),
            meter: FrameRateMeter::new(),
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if let Some(presenter) = &mut self.presenter {
            presenter.resize(width, height);
        }
        if self
            .driver
            .resize(width as f64, height as f64, Instant::now())
            .is_some()
        {
            self.request_redraw();
        }
    }

    fn redraw(&mut self) {
        let delta = self.clock.tick();
        if let Some(fps) = self.meter.record(delta) {
            info!("FPS: {:.1}", fps);
        }

        self.driver.run_frame(Instant::now());

        let Some(presenter) = &mut self.presenter else {
            return;
        };
        match presenter.present(self.driver.surface()) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = presenter.size();
                presenter.resize(width, height);
            }
            Err(e) => warn!("present failed: {}", e),
        }
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let config = self.driver.config();
        let initial = Viewport::letterbox(
            config.base_width,
            config.base_height,
            MAX_INITIAL_WIDTH,
            MAX_INITIAL_HEIGHT,
        )
        .map_or((MAX_INITIAL_WIDTH, MAX_INITIAL_HEIGHT), |vp| {
            (vp.width as f64, vp.height as f64)
        });

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(initial.0, initial.1)),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let presenter = match Presenter::new(window.clone()) {
            Ok(p) => p,
            Err(e) => {
                error!("failed to initialise presenter: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.window = Some(window);
        self.presenter = Some(presenter);

        // Synthetic resize establishes the initial canvas size and session
        self.resize(size.width, size.height);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size.width, size.height),
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if self.driver.has_pending_frames() {
            self.request_redraw();
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    info!(
        "{} sides, anchor ratio {}, {:?} hues in {:?}, {} fps, {}",
        config.side_count,
        config.anchor_ratio,
        config.hue_shift_mode,
        config.color_space,
        config.base_fps,
        if config.rotate_base { "rotating" } else { "static" }
    );

    let event_loop = EventLoop::new()?;
    let mut app = App::new(config)?;

    info!("{} - Escape to quit", WINDOW_TITLE);
    event_loop.run_app(&mut app)?;

    Ok(())
}
