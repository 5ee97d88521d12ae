//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera lens and sensitivities, lighting,
//! scene spin and background) are consolidated here and serialize to/from
//! TOML so a demo run can be reconfigured without recompiling.

mod camera;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::LightingOptions;
pub use scene::SceneOptions;
use serde::{Deserialize, Serialize};

use crate::error::CubeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection and orbit control parameters.
    pub camera: CameraOptions,
    /// Directional light and material parameters.
    pub lighting: LightingOptions,
    /// Mesh spin and clear color.
    pub scene: SceneOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::Io`] when the file cannot be read and
    /// [`CubeError::OptionsParse`] for malformed TOML.
    pub fn load(path: &Path) -> Result<Self, CubeError> {
        let content = std::fs::read_to_string(path).map_err(CubeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CubeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CubeError::OptionsParse`] when serialization fails and
    /// [`CubeError::Io`] when the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), CubeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CubeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CubeError::Io)?;
        }
        std::fs::write(path, content).map_err(CubeError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        let parsed: Options = toml::from_str(
            "[lighting]\nambient = 0.5\n",
        )
        .unwrap();
        assert_eq!(parsed.lighting.ambient, 0.5);
        assert_eq!(parsed.camera, CameraOptions::default());
        assert_eq!(parsed.scene, SceneOptions::default());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = toml::from_str::<Options>("[camera\nfovy = ]").unwrap_err();
        assert!(!err.to_string().is_empty());
    }
}
