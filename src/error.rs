//! Crate-level error types.

use std::fmt;

use crate::manifest::AlternateKind;

/// Errors produced by the panoview crate.
///
/// Every variant is terminal to the operation that produced it but never
/// to the session: after an error the session stays in its last valid
/// state.
#[derive(Debug)]
pub enum PanoError {
    /// The scene manifest could not be retrieved.
    ManifestFetchFailed(String),
    /// The manifest was retrieved but is not a usable scene list.
    ManifestInvalid(String),
    /// A panorama image could not be loaded by the renderer.
    ImageLoadFailed {
        /// URL of the image that failed.
        url: String,
        /// Renderer-supplied failure description.
        reason: String,
    },
    /// A scene index outside `0..len` was requested.
    InvalidIndex {
        /// The rejected index.
        index: usize,
        /// Number of scenes in the session.
        len: usize,
    },
    /// The current scene declares no image for the requested alternate.
    MissingAlternate {
        /// Name of the scene lacking the alternate.
        scene: String,
        /// The requested alternate kind.
        kind: AlternateKind,
    },
    /// No scene uses the given base image URL.
    NotFound(String),
    /// A scene operation arrived before the base images finished loading.
    NotReady,
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
}

impl fmt::Display for PanoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestFetchFailed(msg) => {
                write!(f, "manifest fetch failed: {msg}")
            }
            Self::ManifestInvalid(msg) => {
                write!(f, "invalid manifest: {msg}")
            }
            Self::ImageLoadFailed { url, reason } => {
                write!(f, "failed to load image {url}: {reason}")
            }
            Self::InvalidIndex { index, len } => {
                write!(f, "invalid scene index {index} (scene count {len})")
            }
            Self::MissingAlternate { scene, kind } => {
                write!(f, "scene \"{scene}\" has no {kind} image")
            }
            Self::NotFound(url) => {
                write!(f, "no scene with image {url}")
            }
            Self::NotReady => write!(f, "panoramas are still loading"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
        }
    }
}

impl std::error::Error for PanoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PanoError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_value() {
        let err = PanoError::InvalidIndex { index: 7, len: 3 };
        assert_eq!(err.to_string(), "invalid scene index 7 (scene count 3)");

        let err = PanoError::MissingAlternate {
            scene: "Kitchen".into(),
            kind: AlternateKind::Redesign,
        };
        assert_eq!(err.to_string(), "scene \"Kitchen\" has no redesign image");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;
        let err = PanoError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "gone",
        ));
        assert!(err.source().is_some());
        assert!(PanoError::NotReady.source().is_none());
    }
}
