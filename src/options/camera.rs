use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and look-around parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 30.0, max = 110.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Slowly turn the view while the user is not dragging.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotation speed in degrees per second.
    #[schemars(title = "Rotate Speed", range(min = 0.0, max = 30.0), extend("step" = 0.5))]
    pub auto_rotate_speed: f32,
    /// Degrees of rotation per pixel dragged.
    #[schemars(title = "Drag Sensitivity", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub drag_sensitivity: f32,
    /// Maximum latitude (degrees) the view may tilt up or down.
    #[schemars(skip)]
    pub lat_limit: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 0.1,
            zfar: 1000.0,
            auto_rotate: true,
            auto_rotate_speed: 6.0,
            drag_sensitivity: 0.1,
            lat_limit: 85.0,
        }
    }
}
