use crate::manifest::AlternateKind;
use crate::render::LoadTicket;

/// Per-scene texture state: base image, or one alternate in flight or
/// applied.
///
/// `base` is the texture that was on screen when the alternate was
/// requested; toggling again puts it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextureState<T> {
    /// Showing whatever texture the mesh had before any toggle.
    Base,
    /// Alternate requested, waiting for the image.
    Loading {
        /// Requested alternate.
        kind: AlternateKind,
        /// Ticket the completion must carry.
        ticket: LoadTicket,
        /// Texture to restore.
        base: T,
    },
    /// Alternate applied to the mesh.
    Alternate {
        /// Applied alternate.
        kind: AlternateKind,
        /// Texture to restore.
        base: T,
    },
}

impl<T> TextureState<T> {
    /// The recorded texture to restore, if an alternate is pending or shown.
    pub(crate) fn take_base(self) -> Option<T> {
        match self {
            Self::Base => None,
            Self::Loading { base, .. } | Self::Alternate { base, .. } => {
                Some(base)
            }
        }
    }

    /// Whether this state waits on `ticket`.
    pub(crate) fn awaits(&self, ticket: LoadTicket) -> bool {
        matches!(self, Self::Loading { ticket: t, .. } if *t == ticket)
    }
}

/// What one scene's mesh shows, plus its toggle bookkeeping.
#[derive(Debug, Clone)]
pub(crate) struct SceneSlot<T> {
    pub(crate) displayed: T,
    pub(crate) state: TextureState<T>,
}

impl<T> SceneSlot<T> {
    pub(crate) fn new(base: T) -> Self {
        Self {
            displayed: base,
            state: TextureState::Base,
        }
    }
}
