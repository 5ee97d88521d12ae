use serde::{Deserialize, Serialize};

/// Camera projection and orbit control parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Orbit rotation sensitivity in degrees per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Zoom sensitivity in world units per pixel of drag.
    pub zoom_sensitivity: f32,
    /// Starting orbit radius.
    pub radius: f32,
    /// Closest allowed orbit radius.
    pub min_radius: f32,
    /// Farthest allowed orbit radius.
    pub max_radius: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 1.0,
            zfar: 1000.0,
            rotate_sensitivity: 0.25,
            zoom_sensitivity: 0.005,
            radius: 12.0,
            min_radius: 3.0,
            max_radius: 15.0,
        }
    }
}
