use crate::error::PanoError;
use crate::manifest::{Manifest, SceneDescriptor};
use crate::render::{LoadTicket, Renderer, SceneUi, TicketCounter};

use super::PanoramaSession;

/// Where startup stands after a base image completion.
pub enum Bootstrap<R: Renderer, U: SceneUi> {
    /// Still waiting for base images.
    Loading(SessionLoader<R, U>),
    /// Every base image arrived; the first scene is on screen.
    Ready(PanoramaSession<R, U>),
    /// A base image failed; startup is over.
    Failed(PanoError),
}

/// Waits for every scene's base image before creating the session.
///
/// All-or-nothing: the first failed base image aborts startup.
pub struct SessionLoader<R: Renderer, U: SceneUi> {
    scenes: Vec<SceneDescriptor>,
    requests: Vec<LoadTicket>,
    textures: Vec<Option<R::Texture>>,
    tickets: TicketCounter,
    renderer: R,
    ui: U,
}

impl<R: Renderer, U: SceneUi> SessionLoader<R, U> {
    /// Populate the scene list and request every base image.
    pub fn new(manifest: Manifest, mut renderer: R, mut ui: U) -> Self {
        ui.populate_scene_list(&manifest.scene_names());
        let scenes = manifest.into_scenes();

        let mut tickets = TicketCounter::default();
        let requests = scenes
            .iter()
            .map(|scene| {
                let ticket = tickets.issue();
                renderer.load_image(ticket, &scene.base_image_url);
                ticket
            })
            .collect();
        log::info!("Loading {} panorama base images", scenes.len());

        Self {
            textures: vec![None; scenes.len()],
            scenes,
            requests,
            tickets,
            renderer,
            ui,
        }
    }

    /// Report a base image completion.
    ///
    /// Unknown tickets leave the loader unchanged.
    pub fn image_loaded(
        mut self,
        ticket: LoadTicket,
        result: Result<R::Texture, String>,
    ) -> Bootstrap<R, U> {
        let Some(index) = self.requests.iter().position(|t| *t == ticket)
        else {
            log::warn!(
                "Ignoring image completion for unknown ticket {}",
                ticket.id()
            );
            return Bootstrap::Loading(self);
        };

        let texture = match result {
            Ok(texture) => texture,
            Err(reason) => {
                return Bootstrap::Failed(PanoError::ImageLoadFailed {
                    url: self.scenes[index].base_image_url.clone(),
                    reason,
                });
            }
        };
        self.textures[index] = Some(texture);
        if self.pending() > 0 {
            return Bootstrap::Loading(self);
        }

        let textures = self.textures.into_iter().flatten().collect();
        match PanoramaSession::with_tickets(
            self.scenes,
            textures,
            self.tickets,
            self.renderer,
            self.ui,
        ) {
            Ok(session) => Bootstrap::Ready(session),
            Err(e) => Bootstrap::Failed(e),
        }
    }

    /// Number of base images still outstanding.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.textures.iter().filter(|t| t.is_none()).count()
    }

    /// Scenes being loaded, in manifest order.
    #[must_use]
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// The rendering collaborator.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The UI collaborator.
    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }
}
