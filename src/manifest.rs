//! Scene manifest: the JSON document listing every panorama.
//!
//! ```json
//! { "scenes": [
//!     { "name": "Living room", "image": "img/living.jpg",
//!       "remove_furniture": "img/living_empty.jpg",
//!       "redesign": "img/living_new.jpg" }
//! ] }
//! ```
//!
//! Unknown fields are ignored. Alternate URLs that are missing, `null` or
//! empty all mean "this scene has no such alternate".

use std::fmt;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::PanoError;

/// The substitute images a scene may offer on top of its base image.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum AlternateKind {
    /// The room with its furniture removed.
    RemoveFurniture,
    /// The room redesigned.
    Redesign,
}

impl AlternateKind {
    /// Every alternate kind, in UI button order.
    pub const ALL: [Self; 2] = [Self::RemoveFurniture, Self::Redesign];
}

impl fmt::Display for AlternateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RemoveFurniture => f.write_str("remove-furniture"),
            Self::Redesign => f.write_str("redesign"),
        }
    }
}

/// Optional alternate image URL per [`AlternateKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlternateUrls {
    remove_furniture: Option<String>,
    redesign: Option<String>,
}

impl AlternateUrls {
    /// Build from optional URLs. Empty strings count as absent.
    #[must_use]
    pub fn new(
        remove_furniture: Option<String>,
        redesign: Option<String>,
    ) -> Self {
        Self {
            remove_furniture: remove_furniture.filter(|url| !url.is_empty()),
            redesign: redesign.filter(|url| !url.is_empty()),
        }
    }

    /// URL declared for `kind`, if any.
    #[must_use]
    pub fn get(&self, kind: AlternateKind) -> Option<&str> {
        match kind {
            AlternateKind::RemoveFurniture => self.remove_furniture.as_deref(),
            AlternateKind::Redesign => self.redesign.as_deref(),
        }
    }

    /// Which alternates are declared.
    #[must_use]
    pub fn availability(&self) -> AlternateAvailability {
        AlternateAvailability {
            remove_furniture: self.remove_furniture.is_some(),
            redesign: self.redesign.is_some(),
        }
    }
}

/// Which alternate buttons make sense for a scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlternateAvailability {
    /// A furniture-removed image is declared.
    pub remove_furniture: bool,
    /// A redesigned image is declared.
    pub redesign: bool,
}

impl AlternateAvailability {
    /// Whether `kind` is available.
    #[must_use]
    pub fn has(self, kind: AlternateKind) -> bool {
        match kind {
            AlternateKind::RemoveFurniture => self.remove_furniture,
            AlternateKind::Redesign => self.redesign,
        }
    }
}

/// One sphere-mapped panorama. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneDescriptor {
    /// Display name shown in the scene list.
    pub name: String,
    /// URL of the equirectangular base image.
    pub base_image_url: String,
    /// Optional alternate images.
    pub alternates: AlternateUrls,
}

impl SceneDescriptor {
    /// Scene with a base image and no alternates.
    #[must_use]
    pub fn new(name: impl Into<String>, base_image_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_image_url: base_image_url.into(),
            alternates: AlternateUrls::default(),
        }
    }

    /// Attach alternate URLs.
    #[must_use]
    pub fn with_alternates(mut self, alternates: AlternateUrls) -> Self {
        self.alternates = alternates;
        self
    }

    /// URL declared for `kind`, if any.
    #[must_use]
    pub fn alternate(&self, kind: AlternateKind) -> Option<&str> {
        self.alternates.get(kind)
    }
}

// Wire format, kept private so the public types stay free of serde quirks.
#[derive(Deserialize)]
struct ManifestFile {
    scenes: Vec<SceneEntry>,
}

#[derive(Deserialize)]
struct SceneEntry {
    name: String,
    image: String,
    #[serde(default)]
    remove_furniture: Option<String>,
    #[serde(default)]
    redesign: Option<String>,
}

/// The ordered, non-empty list of scenes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    scenes: Vec<SceneDescriptor>,
}

impl Manifest {
    /// Build a manifest from already-constructed scenes.
    pub fn new(scenes: Vec<SceneDescriptor>) -> Result<Self, PanoError> {
        if scenes.is_empty() {
            return Err(PanoError::ManifestInvalid(
                "manifest lists no scenes".into(),
            ));
        }
        if let Some(pos) =
            scenes.iter().position(|s| s.base_image_url.is_empty())
        {
            return Err(PanoError::ManifestInvalid(format!(
                "scene {pos} (\"{}\") has no image",
                scenes[pos].name
            )));
        }
        Ok(Self { scenes })
    }

    /// Parse the manifest JSON document.
    pub fn from_json(json: &str) -> Result<Self, PanoError> {
        let file: ManifestFile = serde_json::from_str(json)
            .map_err(|e| PanoError::ManifestInvalid(e.to_string()))?;
        let scenes = file
            .scenes
            .into_iter()
            .map(|entry| SceneDescriptor {
                name: entry.name,
                base_image_url: entry.image,
                alternates: AlternateUrls::new(
                    entry.remove_furniture,
                    entry.redesign,
                ),
            })
            .collect();
        Self::new(scenes)
    }

    /// Read and parse a manifest file from disk.
    pub fn load(path: &Path) -> Result<Self, PanoError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PanoError::ManifestFetchFailed(format!("{}: {e}", path.display()))
        })?;
        Self::from_json(&content)
    }

    /// Download and parse a manifest over HTTP.
    #[cfg(feature = "fetch")]
    pub fn fetch(url: &str) -> Result<Self, PanoError> {
        log::info!("Fetching scene manifest from {url}");
        let content = ureq::get(url)
            .call()
            .map_err(|e| {
                PanoError::ManifestFetchFailed(format!("{url}: {e}"))
            })?
            .into_body()
            .read_to_string()
            .map_err(|e| {
                PanoError::ManifestFetchFailed(format!("{url}: {e}"))
            })?;
        Self::from_json(&content)
    }

    /// Scenes in manifest order.
    #[must_use]
    pub fn scenes(&self) -> &[SceneDescriptor] {
        &self.scenes
    }

    /// Scene names in manifest order, as shown in the scene list.
    #[must_use]
    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.iter().map(|s| s.name.as_str()).collect()
    }

    /// Number of scenes (always at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Consume the manifest, yielding its scenes.
    #[must_use]
    pub fn into_scenes(self) -> Vec<SceneDescriptor> {
        self.scenes
    }
}
