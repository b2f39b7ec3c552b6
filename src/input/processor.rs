//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns the transient pointer state and the key-binding
//! map. It sits between raw DOM/window events and
//! [`Viewer::execute`](crate::viewer::Viewer::execute).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::event::InputEvent;
use crate::command::PanoCommand;
use crate::manifest::AlternateKind;

/// Maps physical key strings to [`PanoCommand`] variants.
///
/// Key strings use the DOM `KeyboardEvent.code` format: `"KeyF"`,
/// `"Space"`, `"Escape"`, etc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`PanoCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Toggle the furniture-removed image.
    ToggleRemoveFurniture,
    /// Toggle the redesigned image.
    ToggleRedesign,
    /// Toggle idle auto-rotation.
    ToggleAutoRotate,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`PanoCommand`].
    fn to_command(self) -> PanoCommand {
        match self {
            Self::ToggleRemoveFurniture => PanoCommand::ToggleAlternate {
                kind: AlternateKind::RemoveFurniture,
            },
            Self::ToggleRedesign => PanoCommand::ToggleAlternate {
                kind: AlternateKind::Redesign,
            },
            Self::ToggleAutoRotate => PanoCommand::ToggleAutoRotate,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyF".into(), KeyCommandTag::ToggleRemoveFurniture),
            ("KeyG".into(), KeyCommandTag::ToggleRedesign),
            ("KeyR".into(), KeyCommandTag::ToggleAutoRotate),
        ]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<PanoCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// InputProcessor
// ─────────────────────────────────────────────────────────────────────────────

/// Converts raw events into [`PanoCommand`]s.
///
/// Resize events carry no command; the viewer handles them directly.
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Whether the primary pointer is currently held.
    pointer_pressed: bool,
    /// Key string → command mapping.
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Whether the primary pointer is held.
    #[must_use]
    pub fn pointer_pressed(&self) -> bool {
        self.pointer_pressed
    }

    /// Translate one event. Returns `None` when the event does nothing.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<PanoCommand> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.pointer_pressed = true;
                Some(PanoCommand::BeginLook { x: *x, y: *y })
            }
            InputEvent::PointerMove { x, y } if self.pointer_pressed => {
                Some(PanoCommand::Look { x: *x, y: *y })
            }
            InputEvent::PointerUp if self.pointer_pressed => {
                self.pointer_pressed = false;
                Some(PanoCommand::EndLook)
            }
            InputEvent::Key { code } => self.key_bindings.lookup(code),
            InputEvent::PointerMove { .. }
            | InputEvent::PointerUp
            | InputEvent::Resize { .. } => None,
        }
    }
}
