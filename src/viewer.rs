//! Host-facing viewer: startup, session, camera and input in one place.
//!
//! A host (the `web` binding, or any other embedding) feeds the viewer
//! three kinds of things: commands and input events from the user, image
//! completions from its renderer, and frame ticks. Everything else follows.
//!
//! ```ignore
//! let mut viewer = ViewerBuilder::new()
//!     .with_viewport(1280, 720)
//!     .start(manifest, renderer, ui);
//! // later, from the renderer's load callback:
//! viewer.image_loaded(ticket, Ok(texture));
//! // each animation frame:
//! let target = viewer.frame(dt);
//! ```

use glam::Vec3;

use crate::camera::{Camera, LookController};
use crate::command::PanoCommand;
use crate::error::PanoError;
use crate::geometry::SphereMesh;
use crate::input::{InputEvent, InputProcessor};
use crate::manifest::Manifest;
use crate::options::Options;
use crate::render::{LoadTicket, Renderer, SceneUi};
use crate::session::{Bootstrap, PanoramaSession, SessionLoader};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
#[derive(Debug, Clone)]
pub struct ViewerBuilder {
    options: Options,
    viewport: (u32, u32),
}

impl Default for ViewerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerBuilder {
    /// Create a builder with default options and a 1×1 viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::default(),
            viewport: (1, 1),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the initial viewport size in pixels.
    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Request every base image of `manifest` and return the viewer in its
    /// loading phase.
    pub fn start<R: Renderer, U: SceneUi>(
        self,
        manifest: Manifest,
        renderer: R,
        ui: U,
    ) -> Viewer<R, U> {
        let (width, height) = self.viewport;
        let camera = Camera::new(&self.options.camera, width, height);
        let look =
            LookController::new(&self.options.camera, self.options.sphere.radius);
        let input =
            InputProcessor::with_key_bindings(self.options.keybindings.clone());
        Viewer {
            phase: Phase::Loading(SessionLoader::new(manifest, renderer, ui)),
            camera,
            look,
            input,
            options: self.options,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

enum Phase<R: Renderer, U: SceneUi> {
    Loading(SessionLoader<R, U>),
    Ready(PanoramaSession<R, U>),
    Failed,
}

/// A panorama viewer driven by its host.
///
/// Construct via [`ViewerBuilder`].
pub struct Viewer<R: Renderer, U: SceneUi> {
    phase: Phase<R, U>,
    camera: Camera,
    look: LookController,
    input: InputProcessor,
    options: Options,
}

impl<R: Renderer, U: SceneUi> Viewer<R, U> {
    /// Run one command. Failures are logged and returned; the viewer stays
    /// in its last valid state.
    pub fn execute(&mut self, cmd: PanoCommand) -> Result<(), PanoError> {
        let result = self.dispatch(cmd);
        if let Err(e) = &result {
            log::error!("{e}");
        }
        result
    }

    fn dispatch(&mut self, cmd: PanoCommand) -> Result<(), PanoError> {
        match cmd {
            PanoCommand::BeginLook { x, y } => self.look.begin_drag(x, y),
            PanoCommand::Look { x, y } => self.look.drag_to(x, y),
            PanoCommand::EndLook => self.look.end_drag(),
            PanoCommand::ToggleAutoRotate => {
                let on = self.look.toggle_auto_rotate();
                log::debug!("Auto-rotate {}", if on { "on" } else { "off" });
            }
            PanoCommand::SwitchScene { index } => {
                self.session_or_not_ready()?.switch_scene(index)?;
            }
            PanoCommand::SwitchSceneByImage { url } => {
                let _ = self
                    .session_or_not_ready()?
                    .switch_scene_by_image_url(&url)?;
            }
            PanoCommand::ToggleAlternate { kind } => {
                let _ = self.session_or_not_ready()?.toggle_alternate(kind)?;
            }
        }
        Ok(())
    }

    fn session_or_not_ready(
        &mut self,
    ) -> Result<&mut PanoramaSession<R, U>, PanoError> {
        match &mut self.phase {
            Phase::Ready(session) => Ok(session),
            Phase::Loading(_) | Phase::Failed => Err(PanoError::NotReady),
        }
    }

    /// Translate and run one input event.
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<(), PanoError> {
        if let InputEvent::Resize { width, height } = *event {
            self.camera.resize(width, height);
            return Ok(());
        }
        match self.input.handle_event(event) {
            Some(cmd) => self.execute(cmd),
            None => Ok(()),
        }
    }

    /// Report an image completion from the renderer.
    ///
    /// During startup this feeds the loader; afterwards it feeds the
    /// session, which drops stale tickets. A failed base image ends
    /// startup for good.
    pub fn image_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<R::Texture, String>,
    ) -> Result<(), PanoError> {
        match std::mem::replace(&mut self.phase, Phase::Failed) {
            Phase::Loading(loader) => match loader.image_loaded(ticket, result)
            {
                Bootstrap::Loading(loader) => {
                    self.phase = Phase::Loading(loader);
                    Ok(())
                }
                Bootstrap::Ready(session) => {
                    log::info!(
                        "All {} panoramas loaded",
                        session.scenes().len()
                    );
                    self.phase = Phase::Ready(session);
                    Ok(())
                }
                Bootstrap::Failed(e) => {
                    log::error!("Error loading panoramas: {e}");
                    Err(e)
                }
            },
            Phase::Ready(mut session) => {
                let result = session.image_loaded(ticket, result);
                self.phase = Phase::Ready(session);
                match result {
                    Ok(_) => Ok(()),
                    Err(e) => {
                        log::error!("{e}");
                        Err(e)
                    }
                }
            }
            Phase::Failed => {
                log::warn!(
                    "Ignoring image completion {} after failed startup",
                    ticket.id()
                );
                Ok(())
            }
        }
    }

    /// Advance the camera by `dt` seconds and return its look target.
    pub fn frame(&mut self, dt: f32) -> Vec3 {
        let target = self.look.update(dt);
        self.camera.target = target;
        target
    }

    /// The session, once every base image has loaded.
    #[must_use]
    pub fn session(&self) -> Option<&PanoramaSession<R, U>> {
        match &self.phase {
            Phase::Ready(session) => Some(session),
            Phase::Loading(_) | Phase::Failed => None,
        }
    }

    /// Mutable access to the session, once ready.
    pub fn session_mut(&mut self) -> Option<&mut PanoramaSession<R, U>> {
        match &mut self.phase {
            Phase::Ready(session) => Some(session),
            Phase::Loading(_) | Phase::Failed => None,
        }
    }

    /// Whether every base image has loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.phase, Phase::Ready(_))
    }

    /// Whether startup failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.phase, Phase::Failed)
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The look-around controller.
    #[must_use]
    pub fn look(&self) -> &LookController {
        &self.look
    }

    /// The options the viewer was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Sphere mesh matching the configured tessellation.
    #[must_use]
    pub fn sphere_mesh(&self) -> SphereMesh {
        SphereMesh::from_options(&self.options.sphere)
    }
}
