//! Standalone window backed by winit.
//!
//! The window drives one [`FrameLoop`] tick per redraw, forwards mouse and
//! keyboard input, and shows the camera readout in its title bar. Drawing
//! pixels is left to whatever [`RenderTarget`] the host swaps in; the
//! built-in presenter only publishes the readout.
//!
//! ```no_run
//! # use crane_swing::Viewer;
//! Viewer::builder()
//!     .with_title("Crane")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    assets::FsAssetLoader,
    camera::Camera,
    error::CraneError,
    frame::{FrameLoop, RenderTarget, SystemClock},
    input::{InputEvent, InputProcessor, MouseButton},
    options::Options,
    scene::SceneGraph,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Crane Swing",
    /// default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Crane Swing".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that runs the crane scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`CraneError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), CraneError> {
        let event_loop =
            EventLoop::new().map_err(|e| CraneError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            frame_loop: None,
            input: InputProcessor::new(self.options.keybindings.clone()),
            options: Some(self.options),
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| CraneError::Viewer(e.to_string()))
    }
}

// ── Presenter ────────────────────────────────────────────────────────────

/// Publishes the readout in the window title.
struct TitlePresenter {
    window: Arc<Window>,
    base_title: String,
    shown: String,
}

impl RenderTarget for TitlePresenter {
    fn render(&mut self, scene: &SceneGraph, camera: &Camera, readout: &str) {
        if self.shown != readout {
            self.window
                .set_title(&format!("{} | {readout}", self.base_title));
            readout.clone_into(&mut self.shown);
        }
        if scene.is_dirty() {
            log::trace!("scene changed; view-proj {:?}", camera.build_matrix());
        }
        self.window.pre_present_notify();
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    frame_loop: Option<FrameLoop<SystemClock, TitlePresenter>>,
    input: InputProcessor,
    options: Option<Options>,
    title: String,
}

impl ViewerApp {
    fn handle_input(&mut self, event: InputEvent) {
        if let (Some(command), Some(frame_loop)) =
            (self.input.handle_event(event), &mut self.frame_loop)
        {
            frame_loop.execute(command);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes().with_title(&self.title);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let aspect = inner.width.max(1) as f32 / inner.height.max(1) as f32;
        let presenter = TitlePresenter {
            window: window.clone(),
            base_title: self.title.clone(),
            shown: String::new(),
        };

        let mut frame_loop =
            match FrameLoop::new(options, SystemClock, presenter, aspect) {
                Ok(f) => f,
                Err(e) => {
                    log::error!("Failed to build scene: {e}");
                    event_loop.exit();
                    return;
                }
            };
        if let Err(e) = frame_loop.start_loading(Arc::new(FsAssetLoader)) {
            // The scene still runs, just without the swinging load.
            log::error!("Failed to start asset loading: {e}");
        }

        window.request_redraw();
        self.window = Some(window);
        self.frame_loop = Some(frame_loop);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and frame loop must be initialised.
        if self.window.is_none() || self.frame_loop.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(frame_loop) = &mut self.frame_loop {
                    frame_loop.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(frame_loop) = &mut self.frame_loop {
                    if let Err(e) = frame_loop.tick() {
                        log::error!("tick failed: {e}");
                        event_loop.exit();
                        return;
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.handle_input(InputEvent::Scroll {
                    delta: scroll_delta,
                });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let (Some(command), Some(frame_loop)) = (
                    self.input.handle_key_press(&key_str),
                    &mut self.frame_loop,
                ) {
                    frame_loop.execute(command);
                }
            }

            _ => (),
        }
    }
}
