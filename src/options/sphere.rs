use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Panorama sphere tessellation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sphere", inline)]
#[serde(default)]
pub struct SphereOptions {
    /// Sphere radius in world units. Must stay inside the camera's far
    /// plane.
    #[schemars(skip)]
    pub radius: f32,
    /// Segments around the equator.
    #[schemars(title = "Width Segments", range(min = 8, max = 128))]
    pub width_segments: u32,
    /// Segments from pole to pole.
    #[schemars(title = "Height Segments", range(min = 6, max = 96))]
    pub height_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 500.0,
            width_segments: 60,
            height_segments: 40,
        }
    }
}
