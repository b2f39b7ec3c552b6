//! Camera system for looking around inside the panorama sphere.
//!
//! The camera stays at the sphere center; only its look target moves,
//! driven by a longitude/latitude controller.

/// Core camera struct and projection matrices.
pub mod core;
/// Longitude/latitude look-around controller.
pub mod look;

pub use self::core::Camera;
pub use self::look::LookController;
