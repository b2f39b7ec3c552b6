//! Seams to the outside world: the rendering host and the scene UI.
//!
//! The crate never draws anything itself. A [`Renderer`] owns one sphere
//! mesh per scene and decodes images; a [`SceneUi`] shows the scene list
//! and the current scene name. Both are driven exclusively by the
//! session and its loader.

use crate::manifest::AlternateAvailability;

/// Identifies one asynchronous image request.
///
/// Completions are matched against the ticket the session is waiting for;
/// anything else is stale and gets dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u32);

impl LoadTicket {
    /// Rebuild a ticket from the raw id the host echoed back.
    #[must_use]
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    /// Raw id to hand to the host.
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Monotonic source of [`LoadTicket`]s.
#[derive(Debug, Clone, Default)]
pub struct TicketCounter {
    next: u32,
}

impl TicketCounter {
    /// Issue the next ticket.
    pub fn issue(&mut self) -> LoadTicket {
        let ticket = LoadTicket(self.next);
        self.next = self.next.wrapping_add(1);
        ticket
    }
}

/// The external rendering collaborator.
///
/// Scenes are addressed by manifest index; the renderer keeps whatever
/// mesh/material objects it needs per index.
pub trait Renderer {
    /// Handle to a decoded texture. Cloning must be cheap (a reference).
    type Texture: Clone;

    /// Start loading the image at `url`. The result must later be reported
    /// back with the same `ticket`.
    fn load_image(&mut self, ticket: LoadTicket, url: &str);

    /// Create the sphere mesh for `scene`, textured with its base image.
    fn create_mesh(&mut self, scene: usize, texture: &Self::Texture);

    /// Add the mesh of `scene` to the visible scene graph.
    fn mount(&mut self, scene: usize);

    /// Remove the mesh of `scene` from the visible scene graph.
    fn unmount(&mut self, scene: usize);

    /// Give the mesh of `scene` a new material showing `texture`.
    fn replace_material(&mut self, scene: usize, texture: &Self::Texture);
}

/// The external UI collaborator.
pub trait SceneUi {
    /// Fill the clickable scene list.
    fn populate_scene_list(&mut self, names: &[&str]);

    /// Show the name of the scene now on screen.
    fn show_scene_name(&mut self, name: &str);

    /// Report which alternate buttons apply to the scene now on screen.
    fn show_alternates(&mut self, _availability: AlternateAvailability) {}
}
