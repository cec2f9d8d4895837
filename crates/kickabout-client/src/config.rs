use glam::Vec3;
use serde::{Deserialize, Serialize};

use kickabout_core::KeyBindings;

pub const DEFAULT_CONFIG_PATH: &str = "config/kickabout.toml";
pub const CONFIG_ENV_VAR: &str = "KICKABOUT_CONFIG";

/// Perspective camera placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            position: Vec3::new(0.0, 30.0, 20.0),
            target: Vec3::ZERO,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Host-side settings: key bindings and camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub controls: KeyBindings,
    pub camera: CameraConfig,
}

impl SessionConfig {
    /// Load from `KICKABOUT_CONFIG` or `config/kickabout.toml`, falling back
    /// to defaults.
    pub fn load() -> Self {
        let path =
            std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded session configuration from {path}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {path}: {e}, using defaults");
                    Self::default()
                },
            },
            Err(_) => {
                tracing::debug!("No {path} found, using defaults");
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera_looks_down_at_centre_spot() {
        let cam = CameraConfig::default();
        assert_eq!(cam.fov_degrees, 75.0);
        assert_eq!(cam.position, Vec3::new(0.0, 30.0, 20.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn parse_rebinds_kick_only() {
        let cfg: SessionConfig = toml::from_str(
            r#"
[controls]
kick = "KeyK"
"#,
        )
        .unwrap();
        assert_eq!(cfg.controls.kick, "KeyK");
        assert_eq!(cfg.controls.up, KeyBindings::default().up);
        assert_eq!(cfg.camera, CameraConfig::default());
    }

    #[test]
    fn parse_camera_override() {
        let cfg: SessionConfig = toml::from_str(
            r#"
[camera]
fov_degrees = 60.0
position = [0.0, 40.0, 10.0]
"#,
        )
        .unwrap();
        assert_eq!(cfg.camera.fov_degrees, 60.0);
        assert_eq!(cfg.camera.position, Vec3::new(0.0, 40.0, 10.0));
        assert_eq!(cfg.camera.far, 1000.0);
    }
}
