//! Camera system for the demo scene.
//!
//! Provides a free-fly camera with lazy view-matrix rebuild, a
//! spherical-coordinate orbit controller layered on top of it, and a
//! window-event input handler.

/// Orbit controller driving the camera from `(radius, theta, phi)`.
pub mod controller;
/// Core camera struct with dirty-flag view maintenance.
pub mod core;
/// Window-event-based camera input handler.
pub mod input;

pub use controller::OrbitController;
pub use core::Camera;
pub use input::InputHandler;
