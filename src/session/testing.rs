//! Recording collaborators shared by the session, loader and viewer tests.

use crate::manifest::{
    AlternateAvailability, AlternateUrls, Manifest, SceneDescriptor,
};
use crate::render::{LoadTicket, Renderer, SceneUi};

use super::PanoramaSession;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tex(pub(crate) String);

impl Tex {
    pub(crate) fn named(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub(crate) fn base(scene: usize) -> Self {
        Self(format!("base-{scene}"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    LoadImage(LoadTicket, String),
    CreateMesh(usize, Tex),
    Mount(usize),
    Unmount(usize),
    ReplaceMaterial(usize, Tex),
}

#[derive(Debug, Default)]
pub(crate) struct RecordingRenderer {
    pub(crate) calls: Vec<Call>,
}

impl RecordingRenderer {
    pub(crate) fn requested(&self) -> Vec<(LoadTicket, String)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::LoadImage(ticket, url) => Some((*ticket, url.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Renderer for RecordingRenderer {
    type Texture = Tex;

    fn load_image(&mut self, ticket: LoadTicket, url: &str) {
        self.calls.push(Call::LoadImage(ticket, url.to_owned()));
    }

    fn create_mesh(&mut self, scene: usize, texture: &Tex) {
        self.calls.push(Call::CreateMesh(scene, texture.clone()));
    }

    fn mount(&mut self, scene: usize) {
        self.calls.push(Call::Mount(scene));
    }

    fn unmount(&mut self, scene: usize) {
        self.calls.push(Call::Unmount(scene));
    }

    fn replace_material(&mut self, scene: usize, texture: &Tex) {
        self.calls.push(Call::ReplaceMaterial(scene, texture.clone()));
    }
}

#[derive(Debug, Default)]
pub(crate) struct RecordingUi {
    pub(crate) lists: Vec<Vec<String>>,
    pub(crate) names_shown: Vec<String>,
    pub(crate) alternates: Vec<AlternateAvailability>,
}

impl SceneUi for RecordingUi {
    fn populate_scene_list(&mut self, names: &[&str]) {
        self.lists
            .push(names.iter().map(|&name| name.to_owned()).collect());
    }

    fn show_scene_name(&mut self, name: &str) {
        self.names_shown.push(name.to_owned());
    }

    fn show_alternates(&mut self, availability: AlternateAvailability) {
        self.alternates.push(availability);
    }
}

/// "Room A" (a.jpg) with both alternates, "Room B" (b.jpg) with none.
pub(crate) fn two_rooms() -> Manifest {
    Manifest::new(vec![
        SceneDescriptor::new("Room A", "a.jpg").with_alternates(
            AlternateUrls::new(
                Some("a_empty.jpg".into()),
                Some("a_new.jpg".into()),
            ),
        ),
        SceneDescriptor::new("Room B", "b.jpg"),
    ])
    .unwrap()
}

/// Session over `manifest` with textures `Tex::base(i)`.
pub(crate) fn ready_session(
    manifest: Manifest,
) -> PanoramaSession<RecordingRenderer, RecordingUi> {
    let textures = (0..manifest.len()).map(Tex::base).collect();
    PanoramaSession::new(
        manifest.into_scenes(),
        textures,
        RecordingRenderer::default(),
        RecordingUi::default(),
    )
    .unwrap()
}
