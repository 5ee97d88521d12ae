use serde::{Deserialize, Serialize};

/// Directional light and material parameters for the Phong pass.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightingOptions {
    /// World-space light direction (toward the scene).
    pub direction: [f32; 3],
    /// Light color.
    pub color: [f32; 3],
    /// Ambient contribution factor.
    pub ambient: f32,
    /// Specular exponent.
    pub specular_power: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            // Diagonal key light.
            direction: [0.577, -0.577, 0.577],
            color: [1.0, 1.0, 1.0],
            ambient: 0.15,
            specular_power: 64.0,
        }
    }
}
