use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use tracing::{error, info, warn};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::graphics::{Color, Renderer2d, SurfaceSize};
use crate::pixels_renderer::PixelsRenderer;

/// Startup failures abort the process before the session loop exists; once
/// the loop runs there is no recoverable-error path.
#[derive(Debug, thiserror::Error)]
pub enum StartError {
    #[error("no monitor available to size the window")]
    NoMonitor,
    #[error("failed to build window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
}

pub struct AppConfig {
    pub title: String,
    /// `None` sizes the window to the primary monitor.
    pub desired_size: Option<(u32, u32)>,
    pub frame_rate: u32,
    pub clear_color: Color,
}

/// A windowed task driven by `run_task`.
///
/// The loop owns pacing and presentation; the app owns everything the task
/// means: what a pointer move does, when the session is over, what to draw.
pub trait TaskApp {
    /// Pointer moved, in window-local pixel coordinates.
    fn pointer_moved(&mut self, pos: (i32, i32));

    /// The user asked to close the window.
    fn close_requested(&mut self);

    /// Checked once per loop iteration, before events are processed.
    fn finished(&self) -> bool;

    /// Returns whether a redraw is pending and clears the flag.
    fn take_redraw(&mut self) -> bool;

    fn draw(&self, gfx: &mut dyn Renderer2d);

    /// Where to warp the cursor once the window exists, if anywhere.
    fn initial_pointer(&self) -> Option<(i32, i32)> {
        None
    }

    /// Called once after the loop has ended, for post-session work.
    fn session_ended(&mut self) {}
}

/// Opens the window, builds the app from the actual surface size, and runs
/// the event loop until the app reports completion or the window closes.
///
/// Returns only on startup failure; normal termination exits the process
/// with status 0.
pub fn run_task<A, B>(config: AppConfig, build: B) -> Result<(), StartError>
where
    A: TaskApp + 'static,
    B: FnOnce(SurfaceSize) -> A,
{
    let event_loop = EventLoop::new();

    let window_size = match config.desired_size {
        Some((w, h)) => PhysicalSize::new(w.max(1), h.max(1)),
        None => event_loop
            .primary_monitor()
            .map(|m| m.size())
            .ok_or(StartError::NoMonitor)?,
    };

    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(window_size)
        .with_resizable(false)
        .build(&event_loop)?;

    let inner = window.inner_size();
    let surface_size = SurfaceSize::new(inner.width, inner.height);
    let surface_texture = SurfaceTexture::new(surface_size.width, surface_size.height, &window);
    let pixels = PixelsBuilder::new(surface_size.width, surface_size.height, surface_texture)
        .build()?;
    let mut renderer = PixelsRenderer::new(pixels, surface_size)?;

    let mut app = build(surface_size);
    if let Some((x, y)) = app.initial_pointer() {
        if let Err(err) = window.set_cursor_position(PhysicalPosition::new(x, y)) {
            // Some platforms (Wayland) refuse cursor warps; the first trial
            // then simply starts from wherever the pointer is.
            warn!("could not warp cursor to ({x}, {y}): {err}");
        }
    }

    info!(
        width = surface_size.width,
        height = surface_size.height,
        fps = config.frame_rate,
        "session window ready"
    );

    let frame_interval = Duration::from_secs_f64(1.0 / config.frame_rate.max(1) as f64);
    let mut next_frame = Instant::now() + frame_interval;
    let clear_color = config.clear_color;

    event_loop.run(move |event, _, control_flow| {
        match event {
            Event::NewEvents(_) => {
                if app.finished() {
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    app.close_requested();
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::CursorMoved { position, .. } => {
                    app.pointer_moved((position.x as i32, position.y as i32));
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = renderer.resize(SurfaceSize::new(size.width, size.height)) {
                        error!("surface resize failed: {err}");
                        *control_flow = ControlFlow::Exit;
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                renderer.draw_frame(|gfx| {
                    gfx.clear(clear_color);
                    app.draw(gfx);
                });
                if let Err(err) = renderer.present() {
                    error!("present failed: {err}");
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                if matches!(*control_flow, ControlFlow::ExitWithCode(_)) {
                    return;
                }
                if app.take_redraw() {
                    window.request_redraw();
                }
                let now = Instant::now();
                while next_frame <= now {
                    next_frame += frame_interval;
                }
                *control_flow = ControlFlow::WaitUntil(next_frame);
            }
            Event::LoopDestroyed => {
                app.session_ended();
            }
            _ => {}
        }
    });

    #[allow(unreachable_code)]
    Ok(())
}
