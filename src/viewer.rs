//! Standalone viewer window backed by winit.
//!
//! The structure file is parsed and turned into an instance snapshot before
//! the window opens, so a bad file fails fast. Camera input is integrated on
//! a fixed 60 Hz tick; the latest view matrix reaches the renderer through
//! the view channel.
//!
//! ```no_run
//! # use molview::Viewer;
//! Viewer::builder()
//!     .with_path("assets/models/water.pdb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    camera::{
        view_channel, FixedTimestep, FlyCamera, ViewPublisher, ViewReader,
        TICK_RATE_HZ,
    },
    engine::AtomRenderEngine,
    error::MolviewError,
    input::{InputEvent, InputState, MouseButton},
    options::Options,
    scene::InstanceSnapshot,
    structure::parse_path,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with defaults (title "molview", no path, default
    /// options).
    fn new() -> Self {
        Self {
            path: None,
            options: None,
            title: "molview".into(),
        }
    }

    /// Set the PDB file to display.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
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
            path: self.path,
            options: self.options.unwrap_or_default(),
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays every atom of one structure as a sphere.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<PathBuf>,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Load the structure, open the window and run the event loop. Blocks
    /// until the window is closed.
    ///
    /// # Errors
    ///
    /// Parse errors are returned before any window opens. GPU
    /// initialization errors close the window and are returned once the
    /// event loop exits.
    pub fn run(self) -> Result<(), MolviewError> {
        let path = self.path.ok_or_else(|| {
            MolviewError::Viewer("no structure file given".into())
        })?;
        let atoms = parse_path(&path, &self.options.parser.parse_options())?;
        log::info!("loaded {} atoms from {}", atoms.len(), path.display());
        let snapshot = InstanceSnapshot::build(
            &atoms,
            &self.options.colors.palette(),
            self.options.display.atom_radius,
        );

        let event_loop = EventLoop::new()
            .map_err(|e| MolviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let camera = FlyCamera::new(
            FlyCamera::default().position(),
            self.options.camera.fly_settings(),
        );
        let (publisher, reader) = view_channel(camera.view_matrix());
        let mut app = ViewerApp {
            window: None,
            engine: None,
            snapshot,
            options: self.options,
            title: self.title,
            camera,
            input: InputState::new(),
            timestep: FixedTimestep::new(TICK_RATE_HZ),
            publisher,
            reader,
            fatal: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| MolviewError::Viewer(e.to_string()))?;
        app.fatal.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<AtomRenderEngine>,
    snapshot: InstanceSnapshot,
    options: Options,
    title: String,
    camera: FlyCamera,
    input: InputState,
    timestep: FixedTimestep,
    publisher: ViewPublisher,
    reader: ViewReader,
    /// First unrecoverable error; returned from [`Viewer::run`].
    fatal: Option<MolviewError>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: MolviewError) {
        log::error!("{error}");
        self.fatal = Some(error);
        event_loop.exit();
    }

    /// Run the camera ticks owed since the last frame and publish the view.
    fn tick_camera(&mut self) {
        let ticks = self.timestep.advance();
        let dt = self.timestep.step_secs();
        for _ in 0..ticks {
            let input = self.input.sample();
            let view = self.camera.update(dt, &input);
            self.publisher.publish(view);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.tick_camera();
        let view = self.reader.latest();
        let Some(engine) = &mut self.engine else {
            return;
        };
        match engine.render(view) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                engine.recover_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(
                    event_loop,
                    MolviewError::ResourceExhaustion(
                        "out of memory acquiring the surface texture".into(),
                    ),
                );
                return;
            }
            Err(e) => {
                log::warn!("frame skipped: {e}");
            }
        }
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1024, 768));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(
                    event_loop,
                    MolviewError::Viewer(format!(
                        "failed to create window: {e}"
                    )),
                );
                return;
            }
        };

        let inner = window.inner_size();
        let engine = pollster::block_on(AtomRenderEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            &self.snapshot,
            &self.options,
        ));
        match engine {
            Ok(engine) => {
                window.request_redraw();
                self.window = Some(window);
                self.engine = Some(engine);
            }
            Err(e) => self.fail(event_loop, e),
        }
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

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            WindowEvent::MouseInput { button, state, .. } => {
                self.input.handle_event(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.input.handle_event(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::Focused(false) => {
                self.input.handle_event(InputEvent::FocusLost);
            }

            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                let action = self.options.keybindings.lookup(&key_str);
                if let Some(action) = action {
                    self.input.handle_event(InputEvent::Movement {
                        action,
                        pressed: event.state == ElementState::Pressed,
                    });
                }
            }

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &self.engine {
            engine.shutdown();
        }
    }
}
