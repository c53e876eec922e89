use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::core::{Canvas, Clock, DisplayContext, FrameInfo, FramePacer, SurfaceRenderer};
use crate::export;
use crate::plot::OrbitCamera;
use crate::sketches::{Figure, Sketch};

/// Redraw cadence while an orbit key is held
const ORBIT_FRAME: Duration = Duration::from_millis(16);

/// Interactive window showing one sketch
pub struct SketchApp {
    sketch: Box<dyn Sketch>,
    figure: Figure,
    ctx: DisplayContext,
    window: Option<Arc<Window>>,
    renderer: Option<SurfaceRenderer>,
    camera: OrbitCamera,
    clock: Clock,
    pacer: Option<FramePacer>,
    step: u64,
    paused: bool,
    next_redraw: Instant,
    canvas: Option<Canvas>,
    error: Option<anyhow::Error>,
}

impl SketchApp {
    pub fn new(sketch: Box<dyn Sketch>, figure: Figure, ctx: DisplayContext) -> Self {
        let pacer = sketch.animation().map(|a| FramePacer::new(a.interval()));
        Self {
            sketch,
            figure,
            ctx,
            window: None,
            renderer: None,
            camera: OrbitCamera::new(),
            clock: Clock::new(),
            pacer,
            step: 0,
            paused: false,
            next_redraw: Instant::now(),
            canvas: None,
            error: None,
        }
    }

    /// Open the window and block until it closes
    pub fn run(mut self) -> Result<()> {
        let event_loop =
            EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {}", e))?;
        log::info!(
            "Showing {} - Esc quits, Space pauses, P saves a PNG, WASD/arrows orbit",
            self.sketch.name()
        );
        event_loop
            .run_app(&mut self)
            .map_err(|e| anyhow!("Event loop failed: {}", e))?;

        match self.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn current_frame(&self) -> FrameInfo {
        match self.sketch.animation() {
            Some(animation) => FrameInfo::new(animation.frame_at(self.step)),
            None => FrameInfo::still(),
        }
    }

    fn is_animating(&self) -> bool {
        self.pacer.is_some() && !self.paused
    }

    fn redraw(&mut self) -> Result<()> {
        let delta = self.clock.tick();
        let mut changed = self.canvas.is_none();

        if self.is_animating() {
            if let Some(pacer) = self.pacer.as_mut() {
                let steps = pacer.advance(delta);
                self.step += steps;
                changed |= steps > 0;
            }
        }
        if self.figure.is_3d() && self.camera.orbit.is_moving() {
            self.camera.update();
            changed = true;
        }

        if changed {
            let frame = self.current_frame();
            let view = self.sketch.view_at(&frame);
            self.canvas = Some(self.figure.render(&self.ctx, view, &self.camera));
        }

        if let (Some(renderer), Some(canvas)) = (self.renderer.as_mut(), self.canvas.as_ref()) {
            renderer.present(canvas)?;
        }
        Ok(())
    }

    fn screenshot(&self) {
        let Some(canvas) = &self.canvas else {
            return;
        };
        let path = PathBuf::from(export::default_file_name(self.sketch.name(), chrono::Local::now()));
        match export::save_png(canvas, &path) {
            Ok(()) => log::info!("Screenshot saved to {}", path.display()),
            Err(e) => log::warn!("Screenshot failed: {:#}", e),
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        self.camera.process_keyboard(event);

        if event.state != ElementState::Pressed || event.repeat {
            return;
        }
        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => event_loop.exit(),
            PhysicalKey::Code(KeyCode::Space) if self.pacer.is_some() => {
                self.paused = !self.paused;
                // Time spent paused must not turn into skipped frames
                self.clock.reset();
                log::info!("Animation {}", if self.paused { "paused" } else { "resumed" });
            }
            PhysicalKey::Code(KeyCode::KeyP) => self.screenshot(),
            _ => {}
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }
}

impl ApplicationHandler for SketchApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(format!("golden-spirals - {}", self.sketch.title()))
            .with_inner_size(winit::dpi::PhysicalSize::new(self.ctx.width, self.ctx.height));
        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => return self.fail(event_loop, anyhow!("Failed to create window: {}", e)),
        };

        let renderer = match SurfaceRenderer::new(window.clone(), (self.ctx.width, self.ctx.height)) {
            Ok(r) => r,
            Err(e) => return self.fail(event_loop, e.context("Failed to initialise renderer")),
        };

        log::info!("Window created at {}x{}", self.ctx.width, self.ctx.height);
        self.clock.reset();
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => self.handle_key(event_loop, &event),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    log::warn!("Render error: {:#}", e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            return;
        };

        let cadence = if self.figure.is_3d() && self.camera.orbit.is_moving() {
            Some(ORBIT_FRAME)
        } else if self.is_animating() {
            self.sketch.animation().map(|a| a.interval())
        } else {
            None
        };

        match cadence {
            Some(interval) => {
                let now = Instant::now();
                if now >= self.next_redraw {
                    window.request_redraw();
                    self.next_redraw = now + interval;
                }
                event_loop.set_control_flow(ControlFlow::WaitUntil(self.next_redraw));
            }
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
