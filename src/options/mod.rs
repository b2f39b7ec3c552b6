//! Viewer options with TOML preset support.
//!
//! Camera behaviour, sphere tessellation, the manifest location and key
//! bindings live here. Options serialize to/from TOML so a deployment can
//! ship a preset next to its manifest.

mod camera;
mod sphere;

use std::path::Path;

pub use camera::CameraOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sphere::SphereOptions;

use crate::error::PanoError;
use crate::input::KeyBindings;

/// Where the scene manifest lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Manifest", inline)]
#[serde(default)]
pub struct ManifestOptions {
    /// Manifest URL (or path) relative to the hosting page.
    #[schemars(title = "Manifest URL")]
    pub url: String,
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            url: "./public/data.json".into(),
        }
    }
}

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and look-around parameters.
    pub camera: CameraOptions,
    /// Panorama sphere tessellation.
    pub sphere: SphereOptions,
    /// Scene manifest location.
    pub manifest: ManifestOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, PanoError> {
        toml::from_str(content)
            .map_err(|e| PanoError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, PanoError> {
        let content = std::fs::read_to_string(path).map_err(PanoError::Io)?;
        Self::from_toml(&content)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), PanoError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PanoError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(PanoError::Io)?;
        }
        std::fs::write(path, content).map_err(PanoError::Io)
    }
}
