//! The panorama session: which scene is on screen and which texture each
//! scene shows.
//!
//! # State machine
//!
//! Each scene is in one [`TextureState`]:
//!
//! ```text
//!          toggle_alternate           image_loaded(ok)
//!   Base ───────────────────▶ Loading ───────────────▶ Alternate
//!    ▲                          │                         │
//!    └──── toggle_alternate ────┴──── toggle_alternate ───┘
//! ```
//!
//! A failed load drops `Loading` back to `Base`. Switching scenes resets
//! the departing scene to `Base` bookkeeping only: the renderer keeps
//! whatever material that mesh had, and the next toggle on that scene
//! records it as the texture to restore.
//!
//! Image completions that do not match the ticket the current scene is
//! waiting on are stale and silently discarded.

mod loader;
mod state;
#[cfg(test)]
pub(crate) mod testing;

pub use loader::{Bootstrap, SessionLoader};
pub use state::TextureState;
use state::SceneSlot;

use crate::error::PanoError;
use crate::manifest::{AlternateAvailability, AlternateKind, SceneDescriptor};
use crate::render::{LoadTicket, Renderer, SceneUi, TicketCounter};

/// Result of a successful [`PanoramaSession::toggle_alternate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The alternate image was requested; it shows once the renderer
    /// reports the ticket back.
    Requested(LoadTicket),
    /// The recorded base texture was put back.
    Restored,
}

/// Result of reporting an image completion to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The texture went onto the current scene's mesh.
    Applied,
    /// Nobody is waiting for this ticket any more; the texture was dropped.
    Stale,
}

/// Scene list, current scene and per-scene texture state, plus the
/// collaborators that make them visible.
pub struct PanoramaSession<R: Renderer, U: SceneUi> {
    scenes: Vec<SceneDescriptor>,
    current: usize,
    slots: Vec<SceneSlot<R::Texture>>,
    tickets: TicketCounter,
    renderer: R,
    ui: U,
}

impl<R: Renderer, U: SceneUi> PanoramaSession<R, U> {
    /// Build a session from scenes whose base textures are already loaded.
    ///
    /// Creates one mesh per scene, mounts scene 0 and shows its name.
    pub fn new(
        scenes: Vec<SceneDescriptor>,
        base_textures: Vec<R::Texture>,
        renderer: R,
        ui: U,
    ) -> Result<Self, PanoError> {
        Self::with_tickets(
            scenes,
            base_textures,
            TicketCounter::default(),
            renderer,
            ui,
        )
    }

    pub(crate) fn with_tickets(
        scenes: Vec<SceneDescriptor>,
        base_textures: Vec<R::Texture>,
        tickets: TicketCounter,
        mut renderer: R,
        mut ui: U,
    ) -> Result<Self, PanoError> {
        if scenes.is_empty() {
            return Err(PanoError::ManifestInvalid(
                "session needs at least one scene".into(),
            ));
        }
        if scenes.len() != base_textures.len() {
            return Err(PanoError::ManifestInvalid(format!(
                "{} scenes but {} base textures",
                scenes.len(),
                base_textures.len()
            )));
        }

        for (index, texture) in base_textures.iter().enumerate() {
            renderer.create_mesh(index, texture);
        }
        renderer.mount(0);

        log::debug!("Panorama session ready with {} scenes", scenes.len());
        let mut session = Self {
            scenes,
            current: 0,
            slots: base_textures.into_iter().map(SceneSlot::new).collect(),
            tickets,
            renderer,
            ui,
        };
        session.announce_current();
        Ok(session)
    }

    /// Tell the UI which scene is on screen and which alternates it has.
    fn announce_current(&mut self) {
        self.ui.show_scene_name(&self.scenes[self.current].name);
        let availability = self.current_alternates();
        self.ui.show_alternates(availability);
    }

    // -- Operations --

    /// Show scene `index`.
    ///
    /// Fails with [`PanoError::InvalidIndex`] without touching anything when
    /// `index` is out of range. Any alternate on the departing scene is
    /// forgotten, not restored.
    pub fn switch_scene(&mut self, index: usize) -> Result<(), PanoError> {
        if index >= self.scenes.len() {
            return Err(PanoError::InvalidIndex {
                index,
                len: self.scenes.len(),
            });
        }

        let departing = self.current;
        self.renderer.unmount(departing);
        let previous = std::mem::replace(
            &mut self.slots[departing].state,
            TextureState::Base,
        );
        if !matches!(previous, TextureState::Base) {
            log::debug!(
                "Leaving scene {departing} with an alternate active; \
                 its base texture is no longer tracked"
            );
        }

        self.current = index;
        self.renderer.mount(index);
        self.announce_current();
        log::debug!(
            "Switched to scene {index} ({})",
            self.scenes[index].name
        );
        Ok(())
    }

    /// Toggle the current scene between its displayed texture and the
    /// `kind` alternate.
    ///
    /// Fails with [`PanoError::MissingAlternate`], without any renderer
    /// calls, when the scene declares no image for `kind`. While an
    /// alternate is pending or shown, any toggle restores the base.
    pub fn toggle_alternate(
        &mut self,
        kind: AlternateKind,
    ) -> Result<Toggle, PanoError> {
        let scene = &self.scenes[self.current];
        let Some(url) = scene.alternate(kind) else {
            return Err(PanoError::MissingAlternate {
                scene: scene.name.clone(),
                kind,
            });
        };

        let index = self.current;
        let slot = &mut self.slots[index];
        let previous = std::mem::replace(&mut slot.state, TextureState::Base);
        if let Some(base) = previous.take_base() {
            self.renderer.replace_material(index, &base);
            slot.displayed = base;
            log::debug!("Scene {index} restored to its base texture");
            return Ok(Toggle::Restored);
        }

        let ticket = self.tickets.issue();
        slot.state = TextureState::Loading {
            kind,
            ticket,
            base: slot.displayed.clone(),
        };
        self.renderer.load_image(ticket, url);
        log::debug!("Scene {index} requested {kind} image {url}");
        Ok(Toggle::Requested(ticket))
    }

    /// Report the completion of an alternate image request.
    ///
    /// Only applies when the current scene still waits on `ticket`. A
    /// failure reverts the scene to [`TextureState::Base`] and is returned
    /// as [`PanoError::ImageLoadFailed`].
    pub fn image_loaded(
        &mut self,
        ticket: LoadTicket,
        result: Result<R::Texture, String>,
    ) -> Result<LoadOutcome, PanoError> {
        let index = self.current;
        let slot = &mut self.slots[index];
        if !slot.state.awaits(ticket) {
            log::warn!("Discarding stale image load (ticket {})", ticket.id());
            return Ok(LoadOutcome::Stale);
        }

        let previous = std::mem::replace(&mut slot.state, TextureState::Base);
        let TextureState::Loading { kind, base, .. } = previous else {
            return Ok(LoadOutcome::Stale);
        };

        match result {
            Ok(texture) => {
                self.renderer.replace_material(index, &texture);
                slot.displayed = texture;
                slot.state = TextureState::Alternate { kind, base };
                log::debug!("Scene {index} now shows its {kind} image");
                Ok(LoadOutcome::Applied)
            }
            Err(reason) => {
                let url = self.scenes[index]
                    .alternate(kind)
                    .unwrap_or_default()
                    .to_owned();
                Err(PanoError::ImageLoadFailed { url, reason })
            }
        }
    }

    /// Index of the first scene whose base image is `url`.
    pub fn resolve_scene_by_image_url(
        &self,
        url: &str,
    ) -> Result<usize, PanoError> {
        self.scenes
            .iter()
            .position(|scene| scene.base_image_url == url)
            .ok_or_else(|| PanoError::NotFound(url.to_owned()))
    }

    /// Switch to the scene whose base image is `url`.
    pub fn switch_scene_by_image_url(
        &mut self,
        url: &str,
    ) -> Result<usize, PanoError> {
        let index = self.resolve_scene_by_image_url(url)?;
        self.switch_scene(index)?;
        Ok(index)
    }

    // -- Accessors --

    /// Index of the scene on screen.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The scene on screen.
    #[must_use]
    pub fn current_scene(&self) -> &SceneDescriptor {
        &self.scenes[self.current]
    }

    /// All scenes in manifest order.
    #[must_use]
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Alternate currently applied to `scene`, if any. Pending loads do not
    /// count.
    #[must_use]
    pub fn active_alternate(&self, scene: usize) -> Option<AlternateKind> {
        match self.slots.get(scene)?.state {
            TextureState::Alternate { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Full texture state of `scene`.
    #[must_use]
    pub fn texture_state(
        &self,
        scene: usize,
    ) -> Option<&TextureState<R::Texture>> {
        self.slots.get(scene).map(|slot| &slot.state)
    }

    /// Texture the mesh of `scene` currently shows.
    #[must_use]
    pub fn displayed_texture(&self, scene: usize) -> Option<&R::Texture> {
        self.slots.get(scene).map(|slot| &slot.displayed)
    }

    /// Alternates the current scene declares.
    #[must_use]
    pub fn current_alternates(&self) -> AlternateAvailability {
        self.current_scene().alternates.availability()
    }

    /// The rendering collaborator.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Mutable access to the rendering collaborator.
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// The UI collaborator.
    #[must_use]
    pub fn ui(&self) -> &U {
        &self.ui
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{
        ready_session, two_rooms, Call, RecordingRenderer, RecordingUi, Tex,
    };
    use super::*;

    #[test]
    fn construction_mounts_first_scene() {
        let session = ready_session(two_rooms());
        assert_eq!(session.current_index(), 0);
        assert_eq!(
            session.renderer().calls,
            [
                Call::CreateMesh(0, Tex::base(0)),
                Call::CreateMesh(1, Tex::base(1)),
                Call::Mount(0),
            ]
        );
        assert_eq!(session.ui().names_shown, ["Room A"]);
    }

    #[test]
    fn switch_scene_sets_current_index() {
        let mut session = ready_session(two_rooms());
        for index in [1, 0, 1] {
            session.switch_scene(index).unwrap();
            assert_eq!(session.current_index(), index);
        }
        assert_eq!(session.ui().names_shown.last().unwrap(), "Room B");
    }

    #[test]
    fn switch_scene_unmounts_then_mounts() {
        let mut session = ready_session(two_rooms());
        session.renderer_mut().calls.clear();
        session.switch_scene(1).unwrap();
        assert_eq!(session.renderer().calls, [Call::Unmount(0), Call::Mount(1)]);
    }

    #[test]
    fn switch_to_current_scene_remounts_it() {
        let mut session = ready_session(two_rooms());
        session.renderer_mut().calls.clear();
        session.switch_scene(0).unwrap();
        assert_eq!(session.renderer().calls, [Call::Unmount(0), Call::Mount(0)]);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.ui().names_shown, ["Room A", "Room A"]);
    }

    #[test]
    fn ui_learns_alternates_of_each_shown_scene() {
        let mut session = ready_session(two_rooms());
        let both = AlternateAvailability {
            remove_furniture: true,
            redesign: true,
        };
        assert_eq!(session.ui().alternates, [both]);
        assert_eq!(session.current_alternates(), both);

        session.switch_scene(1).unwrap();
        assert_eq!(
            session.ui().alternates,
            [both, AlternateAvailability::default()]
        );
        assert_eq!(session.ui().names_shown, ["Room A", "Room B"]);
        assert_eq!(
            session.current_alternates(),
            AlternateAvailability::default()
        );
    }

    #[test]
    fn switch_scene_out_of_range_changes_nothing() {
        let mut session = ready_session(two_rooms());
        session.switch_scene(1).unwrap();
        session.renderer_mut().calls.clear();

        let err = session.switch_scene(2).unwrap_err();
        assert!(matches!(err, PanoError::InvalidIndex { index: 2, len: 2 }));
        assert_eq!(session.current_index(), 1);
        assert!(session.renderer().calls.is_empty());
    }

    #[test]
    fn toggle_twice_restores_base_texture() {
        let mut session = ready_session(two_rooms());
        let Toggle::Requested(ticket) = session
            .toggle_alternate(AlternateKind::RemoveFurniture)
            .unwrap()
        else {
            panic!("first toggle should request the alternate");
        };
        let outcome = session
            .image_loaded(ticket, Ok(Tex::named("a_empty.jpg")))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Applied);
        assert_eq!(
            session.active_alternate(0),
            Some(AlternateKind::RemoveFurniture)
        );
        assert_eq!(
            session.displayed_texture(0),
            Some(&Tex::named("a_empty.jpg"))
        );

        let second = session
            .toggle_alternate(AlternateKind::RemoveFurniture)
            .unwrap();
        assert_eq!(second, Toggle::Restored);
        assert_eq!(session.displayed_texture(0), Some(&Tex::base(0)));
        assert_eq!(session.active_alternate(0), None);
        assert_eq!(
            session.renderer().calls.last(),
            Some(&Call::ReplaceMaterial(0, Tex::base(0)))
        );
    }

    #[test]
    fn toggle_requests_the_declared_url() {
        let mut session = ready_session(two_rooms());
        let toggle = session.toggle_alternate(AlternateKind::Redesign).unwrap();
        let Toggle::Requested(ticket) = toggle else {
            panic!("expected a load request");
        };
        assert_eq!(
            session.renderer().calls.last(),
            Some(&Call::LoadImage(ticket, "a_new.jpg".into()))
        );
        assert!(matches!(
            session.texture_state(0),
            Some(TextureState::Loading {
                kind: AlternateKind::Redesign,
                ..
            })
        ));
    }

    #[test]
    fn missing_alternate_makes_no_renderer_calls() {
        let mut session = ready_session(two_rooms());
        session.switch_scene(1).unwrap();
        session.renderer_mut().calls.clear();

        let err = session
            .toggle_alternate(AlternateKind::RemoveFurniture)
            .unwrap_err();
        assert!(matches!(
            err,
            PanoError::MissingAlternate {
                kind: AlternateKind::RemoveFurniture,
                ..
            }
        ));
        assert!(session.renderer().calls.is_empty());
        assert_eq!(session.texture_state(1), Some(&TextureState::Base));
    }

    #[test]
    fn resolve_by_image_url() {
        let session = ready_session(two_rooms());
        assert_eq!(session.resolve_scene_by_image_url("b.jpg").unwrap(), 1);
        let err = session.resolve_scene_by_image_url("c.jpg").unwrap_err();
        assert!(matches!(err, PanoError::NotFound(url) if url == "c.jpg"));
    }

    #[test]
    fn switch_by_image_url_navigates() {
        let mut session = ready_session(two_rooms());
        assert_eq!(session.switch_scene_by_image_url("b.jpg").unwrap(), 1);
        assert_eq!(session.current_index(), 1);
        assert!(session.switch_scene_by_image_url("nope.jpg").is_err());
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn switching_away_forgets_alternate_without_restoring() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        let _ = session
            .image_loaded(ticket, Ok(Tex::named("a_empty.jpg")))
            .unwrap();
        session.renderer_mut().calls.clear();

        session.switch_scene(1).unwrap();
        assert_eq!(session.texture_state(0), Some(&TextureState::Base));
        assert_eq!(session.active_alternate(0), None);
        assert!(!session
            .renderer()
            .calls
            .iter()
            .any(|call| matches!(call, Call::ReplaceMaterial(..))));
        // The mesh still shows the alternate.
        assert_eq!(
            session.displayed_texture(0),
            Some(&Tex::named("a_empty.jpg"))
        );
    }

    #[test]
    fn returning_scene_records_displayed_alternate_as_base() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        let _ = session
            .image_loaded(ticket, Ok(Tex::named("a_empty.jpg")))
            .unwrap();
        session.switch_scene(1).unwrap();
        session.switch_scene(0).unwrap();

        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::Redesign)
        else {
            panic!("expected a load request");
        };
        let _ = session
            .image_loaded(ticket, Ok(Tex::named("a_new.jpg")))
            .unwrap();
        assert_eq!(
            session.toggle_alternate(AlternateKind::Redesign).unwrap(),
            Toggle::Restored
        );
        assert_eq!(
            session.displayed_texture(0),
            Some(&Tex::named("a_empty.jpg"))
        );
    }

    #[test]
    fn stale_load_after_switch_is_discarded() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        session.switch_scene(1).unwrap();
        session.renderer_mut().calls.clear();

        let outcome = session
            .image_loaded(ticket, Ok(Tex::named("a_empty.jpg")))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert!(session.renderer().calls.is_empty());
        assert_eq!(session.displayed_texture(0), Some(&Tex::base(0)));
    }

    #[test]
    fn toggle_back_before_load_drops_late_completion() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        assert_eq!(
            session
                .toggle_alternate(AlternateKind::RemoveFurniture)
                .unwrap(),
            Toggle::Restored
        );

        let outcome = session
            .image_loaded(ticket, Ok(Tex::named("a_empty.jpg")))
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Stale);
        assert_eq!(session.displayed_texture(0), Some(&Tex::base(0)));
        assert_eq!(session.texture_state(0), Some(&TextureState::Base));
    }

    #[test]
    fn stale_failure_keeps_current_state() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(first)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        let _ = session.toggle_alternate(AlternateKind::RemoveFurniture);
        let Ok(Toggle::Requested(second)) =
            session.toggle_alternate(AlternateKind::Redesign)
        else {
            panic!("expected a load request");
        };
        session.renderer_mut().calls.clear();

        let outcome = session.image_loaded(first, Err("timeout".into()));
        assert!(matches!(outcome, Ok(LoadOutcome::Stale)));
        assert!(session.renderer().calls.is_empty());
        assert!(matches!(
            session.texture_state(0),
            Some(TextureState::Loading {
                kind: AlternateKind::Redesign,
                ticket,
                ..
            }) if *ticket == second
        ));
    }

    #[test]
    fn superseded_ticket_is_stale() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(first)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        let _ = session.toggle_alternate(AlternateKind::RemoveFurniture);
        let Ok(Toggle::Requested(second)) =
            session.toggle_alternate(AlternateKind::Redesign)
        else {
            panic!("expected a load request");
        };
        assert_ne!(first, second);

        assert_eq!(
            session.image_loaded(first, Ok(Tex::named("late"))).unwrap(),
            LoadOutcome::Stale
        );
        assert_eq!(
            session
                .image_loaded(second, Ok(Tex::named("a_new.jpg")))
                .unwrap(),
            LoadOutcome::Applied
        );
        assert_eq!(session.active_alternate(0), Some(AlternateKind::Redesign));
    }

    #[test]
    fn other_kind_while_active_restores_base() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::RemoveFurniture)
        else {
            panic!("expected a load request");
        };
        let _ = session.image_loaded(ticket, Ok(Tex::named("a_empty.jpg")));
        assert_eq!(
            session.toggle_alternate(AlternateKind::Redesign).unwrap(),
            Toggle::Restored
        );
        assert_eq!(session.displayed_texture(0), Some(&Tex::base(0)));
    }

    #[test]
    fn failed_alternate_load_reverts_to_base() {
        let mut session = ready_session(two_rooms());
        let Ok(Toggle::Requested(ticket)) =
            session.toggle_alternate(AlternateKind::Redesign)
        else {
            panic!("expected a load request");
        };
        session.renderer_mut().calls.clear();

        let err = session
            .image_loaded(ticket, Err("404".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            PanoError::ImageLoadFailed { ref url, .. } if url == "a_new.jpg"
        ));
        assert_eq!(session.texture_state(0), Some(&TextureState::Base));
        assert!(session.renderer().calls.is_empty());

        // The scene can be toggled again afterwards.
        assert!(matches!(
            session.toggle_alternate(AlternateKind::Redesign),
            Ok(Toggle::Requested(_))
        ));
    }

    #[test]
    fn texture_count_must_match_scenes() {
        let err = PanoramaSession::new(
            two_rooms().into_scenes(),
            vec![Tex::base(0)],
            RecordingRenderer::default(),
            RecordingUi::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, PanoError::ManifestInvalid(_)));
    }
}
