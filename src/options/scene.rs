use serde::{Deserialize, Serialize};

/// Mesh spin and clear-color parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneOptions {
    /// Mesh spin rate about the world Y axis, in radians per second.
    pub spin_rate: f32,
    /// Background clear color (linear RGBA).
    pub background: [f64; 4],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            spin_rate: 0.5,
            background: [1.0, 1.0, 1.0, 1.0],
        }
    }
}
