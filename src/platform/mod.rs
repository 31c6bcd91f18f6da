//=========================================================================
// Platform Subsystem
//
// Bridges Winit (OS-level events) and the `pixels` surface with the game
// loop.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌───────────────────────────────────────────────┐
//  │  Winit Event Loop                             │
//  │   ↓ KeyboardInput                             │
//  │  InputProcessor ──> InputListener ──channel──┐│
//  │                                              ││
//  │   ↓ RedrawRequested (frame boundary)         ││
//  │  FrameCanvas(pixels.frame_mut())             ││
//  │   ↓                                          ↓│
//  │  GameLoop::frame(canvas, dt)   ← tracker.poll()│
//  │   ↓                                           │
//  │  pixels.render() → request_redraw()           │
//  └───────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: exactly one game step per frame
// - **Fixed logical canvas**: the pixel buffer keeps the configured size;
//   window resizes only rescale the surface
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS,
//   so this runs on the thread that called `Engine::run()`
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== External Crates =====================================================

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::*;
use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::game_loop::GameLoop;
use crate::core::geometry::Size;
use crate::core::input::{InputEvent, InputListener, KeyCode};
use crate::core::render::{Color, FrameCanvas};
use input_processor::InputProcessor;

//=== Constants ===========================================================

const CLEAR_COLOR: Color = [0, 0, 0, 255];

/// Longest frame delta fed to the game; longer stalls are clamped.
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

//=== PlatformError =======================================================

/// Platform initialization and runtime errors.
///
/// These are fatal: without an event loop or a surface the game cannot run.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Failed to create event loop (rare, indicates OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(#[source] winit::error::EventLoopError),

    /// Event loop execution error.
    #[error("event loop error: {0}")]
    EventLoopExecution(#[source] winit::error::EventLoopError),

    /// Window could not be created.
    #[error("window creation failed: {0}")]
    Window(#[from] winit::error::OsError),

    /// Pixel surface could not be created or presented.
    #[error("surface error: {0}")]
    Surface(#[from] pixels::Error),
}

//=== Platform ============================================================

/// Window, pixel surface and frame driver.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` - takes the game loop and its listener
/// 2. **Execution**: `platform.run()` - blocks in the Winit event loop
/// 3. **Resume**: window and surface are created lazily in `resumed()`
/// 4. **Shutdown**: close request → listener disposed → loop exits
pub(crate) struct Platform {
    title: String,
    canvas: Size,

    /// OS window (None until `resumed()` called).
    window: Option<Arc<Window>>,

    /// Pixel surface bound to `window`.
    pixels: Option<Pixels<'static>>,

    game: GameLoop,

    /// Key events go here; `None` once the window closed.
    listener: Option<InputListener>,

    /// Movement keys sent down and not yet up, including ones still queued.
    pressed: Vec<KeyCode>,

    input_processor: InputProcessor,
    last_frame: Option<Instant>,

    /// First fatal error seen inside the event loop.
    failure: Option<PlatformError>,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    /// Does not create the window yet - that happens lazily in `resumed()`.
    pub fn new(title: impl Into<String>, canvas: Size, game: GameLoop, listener: InputListener) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            title: title.into(),
            canvas,
            window: None,
            pixels: None,
            game,
            listener: Some(listener),
            pressed: Vec::new(),
            input_processor: InputProcessor::new(),
            last_frame: None,
            failure: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot start, or if the
    /// window or surface failed while running.
    pub fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;
        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)?;

        match self.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let attrs = WindowAttributes::default()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.canvas.width as u32, self.canvas.height as u32));

        let window = Arc::new(event_loop.create_window(attrs)?);
        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        let surface = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(self.canvas.width as u32, self.canvas.height as u32, surface)?;

        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    /// Hands a key event to the game's input tracker.
    fn forward(&mut self, event: InputEvent) {
        let Some(listener) = &self.listener else {
            trace!(target: "platform::input", "Listener disposed, dropping {:?}", event);
            return;
        };
        if !listener.send(event) {
            return;
        }

        let key = event.key();
        if !self.game.tracker().bindings().is_movement_key(key) {
            return;
        }
        match event {
            InputEvent::KeyDown(_) if !self.pressed.contains(&key) => self.pressed.push(key),
            InputEvent::KeyDown(_) => {}
            InputEvent::KeyUp(_) => self.pressed.retain(|&k| k != key),
        }
    }

    /// Releases every held key, e.g. when the window loses focus.
    ///
    /// Covers key-downs still waiting in the channel as well as keys the
    /// tracker already holds.
    fn release_held_keys(&mut self) {
        let mut keys = self.pressed.clone();
        for &key in self.game.tracker().held_keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
        for key in keys {
            self.forward(InputEvent::KeyUp(key));
        }
    }

    fn frame_delta(&mut self, now: Instant) -> Duration {
        let dt = match self.last_frame {
            Some(last) => now.saturating_duration_since(last).min(MAX_FRAME_DELTA),
            None => Duration::ZERO,
        };
        self.last_frame = Some(now);
        dt
    }

    fn redraw(&mut self) -> Result<(), PlatformError> {
        let dt = self.frame_delta(Instant::now());
        let Some(pixels) = self.pixels.as_mut() else {
            return Ok(());
        };

        let (width, height) = (self.canvas.width as u32, self.canvas.height as u32);
        match FrameCanvas::new(pixels.frame_mut(), width, height) {
            Some(mut canvas) => {
                canvas.clear(CLEAR_COLOR);
                self.game.frame(&mut canvas, dt);
            }
            None => warn!(target: "platform", "Frame buffer does not match {}x{}", width, height),
        }

        pixels.render()?;
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        error!(target: "platform", "{}", error);
        self.failure.get_or_insert(error);
        self.listener = None;
        event_loop.exit();
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window and surface if they don't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        if let Err(e) = self.create_surface(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                if let Some(listener) = self.listener.take() {
                    listener.dispose();
                }
                event_loop.exit();
            }

            WindowEvent::Focused(false) => {
                debug!(target: "platform::input", "Focus lost, releasing held keys");
                self.release_held_keys();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.forward(event),
                    None => trace!(target: "platform::input", "Unmapped key ignored"),
                }
            }

            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(pixels) = self.pixels.as_mut() {
                    if let Err(e) = pixels.resize_surface(size.width, size.height) {
                        error!(target: "platform", "Surface resize failed: {}", e);
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    self.fail(event_loop, e);
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
