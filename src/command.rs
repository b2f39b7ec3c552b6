//! The viewer's complete interactive vocabulary.
//!
//! Scene list clicks, the alternate buttons, key presses and pointer
//! gestures all become a `PanoCommand` and go through
//! [`Viewer::execute`](crate::viewer::Viewer::execute).

use crate::manifest::AlternateKind;

/// A discrete or parameterized operation the viewer can perform.
///
/// ```ignore
/// viewer.execute(PanoCommand::SwitchScene { index: 2 });
/// viewer.execute(PanoCommand::ToggleAlternate { kind: AlternateKind::Redesign });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PanoCommand {
    // ── Scenes ──────────────────────────────────────────────────────
    /// Show the scene at `index` in manifest order.
    SwitchScene {
        /// Manifest index.
        index: usize,
    },

    /// Show the scene whose base image is `url`.
    SwitchSceneByImage {
        /// Base image URL as written in the manifest.
        url: String,
    },

    /// Toggle the current scene between base and the `kind` alternate.
    ToggleAlternate {
        /// Alternate to show.
        kind: AlternateKind,
    },

    // ── Camera ──────────────────────────────────────────────────────
    /// Start a look-around drag at pointer position `(x, y)`.
    BeginLook {
        /// Pointer x in CSS pixels.
        x: f32,
        /// Pointer y in CSS pixels.
        y: f32,
    },

    /// Continue the look-around drag.
    Look {
        /// Pointer x in CSS pixels.
        x: f32,
        /// Pointer y in CSS pixels.
        y: f32,
    },

    /// Finish the look-around drag.
    EndLook,

    /// Toggle idle auto-rotation.
    ToggleAutoRotate,
}
