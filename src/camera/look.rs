use glam::{Vec2, Vec3};

use crate::options::CameraOptions;

/// Drag anchor: pointer position and angles when the drag began.
#[derive(Debug, Clone, Copy)]
struct DragStart {
    pointer: Vec2,
    lon: f32,
    lat: f32,
}

/// Longitude/latitude look-around controller.
///
/// Dragging moves the view relative to where the drag started; when idle
/// the view can slowly turn on its own. Latitude is clamped short of the
/// poles so the view never flips.
#[derive(Debug, Clone)]
pub struct LookController {
    lon: f32,
    lat: f32,
    drag: Option<DragStart>,
    auto_rotate: bool,
    auto_rotate_speed: f32,
    drag_sensitivity: f32,
    lat_limit: f32,
    radius: f32,
}

impl LookController {
    /// Controller looking along +X, configured from `options`.
    #[must_use]
    pub fn new(options: &CameraOptions, radius: f32) -> Self {
        Self {
            lon: 0.0,
            lat: 0.0,
            drag: None,
            auto_rotate: options.auto_rotate,
            auto_rotate_speed: options.auto_rotate_speed,
            drag_sensitivity: options.drag_sensitivity,
            lat_limit: options.lat_limit.clamp(0.0, 89.9),
            radius,
        }
    }

    /// Longitude in degrees, in `[0, 360)`.
    #[must_use]
    pub fn lon(&self) -> f32 {
        self.lon
    }

    /// Latitude in degrees, within `±lat_limit`.
    #[must_use]
    pub fn lat(&self) -> f32 {
        self.lat
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether idle auto-rotation is on.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Flip idle auto-rotation. Returns the new state.
    pub fn toggle_auto_rotate(&mut self) -> bool {
        self.auto_rotate = !self.auto_rotate;
        self.auto_rotate
    }

    /// Jump to the given angles.
    pub fn set_angles(&mut self, lon: f32, lat: f32) {
        self.lon = lon.rem_euclid(360.0);
        self.lat = lat.clamp(-self.lat_limit, self.lat_limit);
    }

    /// Start a drag at pointer position `(x, y)`.
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag = Some(DragStart {
            pointer: Vec2::new(x, y),
            lon: self.lon,
            lat: self.lat,
        });
    }

    /// Move the drag to `(x, y)`. Ignored when no drag is active.
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(start) = self.drag else {
            return;
        };
        let lon =
            (start.pointer.x - x).mul_add(self.drag_sensitivity, start.lon);
        let lat =
            (y - start.pointer.y).mul_add(self.drag_sensitivity, start.lat);
        self.set_angles(lon, lat);
    }

    /// Finish the current drag.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Advance by `dt` seconds and return the look target.
    pub fn update(&mut self, dt: f32) -> Vec3 {
        if self.auto_rotate && !self.is_dragging() {
            self.set_angles(
                self.auto_rotate_speed.mul_add(dt, self.lon),
                self.lat,
            );
        }
        self.target()
    }

    /// Point on the sphere the camera looks at.
    #[must_use]
    pub fn target(&self) -> Vec3 {
        let phi = (90.0 - self.lat).to_radians();
        let theta = self.lon.to_radians();
        Vec3::new(
            self.radius * phi.sin() * theta.cos(),
            self.radius * phi.cos(),
            self.radius * phi.sin() * theta.sin(),
        )
    }
}
