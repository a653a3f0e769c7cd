//! Scene configuration file format.
//!
//! Every section and field falls back to the built-in room layout, so a file only needs to
//! list what it overrides:
//!
//! ```toml
//! [player]
//! walk_speed = 4.0
//!
//! [camera]
//! focus_fov_deg = 10.0
//! ```

use std::path::Path;

use bevy::ecs::resource::Resource;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scene config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid scene config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct SceneConfig {
    pub player: PlayerConfig,
    pub seat: SeatConfig,
    pub display: DisplayConfig,
    pub camera: CameraConfig,
    pub audio: AudioConfig,
    pub walls: Vec<WallConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub spawn: [f32; 3],
    pub radius: f32,
    pub walk_speed: f32,
    pub run_multiplier: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Camera height above the player centre while walking.
    pub eye_offset: f32,
    pub mouse_sensitivity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatConfig {
    pub position: [f32; 3],
    /// Distance from the seat within which sitting is allowed.
    pub capture_radius: f32,
    /// Player centre height above `position` while seated.
    pub seat_height: f32,
    /// Camera height above the seated player centre.
    pub eye_offset: f32,
    /// Where the player lands, relative to the seat, after standing up.
    pub stand_offset: [f32; 3],
    /// Collision box size; the box sits on the floor at `position`.
    pub bounds: [f32; 3],
    pub model: String,
    pub model_yaw: f32,
    pub model_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub position: [f32; 3],
    pub bounds: [f32; 3],
    /// Point the camera locks onto in focus mode.
    pub focus_target: [f32; 3],
    pub power_on_secs: f32,
    pub model: String,
    pub model_scale: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub default_fov_deg: f32,
    pub focus_fov_deg: f32,
    /// Per-tick lerp factor toward the eye position.
    pub smoothing: f32,
    pub sit_duration_secs: f32,
    /// Peak yaw sway (radians) during the sit animation.
    pub sit_sway: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub footsteps: String,
    pub walk_volume: f32,
    pub run_volume: f32,
    pub walk_rate: f32,
    pub run_rate: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    /// Box centre.
    pub pos: [f32; 3],
    /// Full extents.
    pub size: [f32; 3],
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            seat: SeatConfig::default(),
            display: DisplayConfig::default(),
            camera: CameraConfig::default(),
            audio: AudioConfig::default(),
            walls: default_walls(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            spawn: [0.0, 1.2, 5.0],
            radius: 0.5,
            walk_speed: 3.0,
            run_multiplier: 1.9,
            jump_speed: 4.2,
            gravity: -9.8,
            eye_offset: 0.2,
            mouse_sensitivity: 0.002,
        }
    }
}

impl Default for SeatConfig {
    fn default() -> Self {
        Self {
            position: [1.6, 0.0, -3.0],
            capture_radius: 1.2,
            seat_height: 0.5,
            eye_offset: 0.4,
            stand_offset: [0.0, 0.0, 1.0],
            bounds: [0.5, 0.5, 0.5],
            model: "models/seat.glb".to_string(),
            model_yaw: 3.2,
            model_scale: 0.7,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            position: [1.5, 0.0, -4.2],
            bounds: [2.0, 1.2, 0.2],
            focus_target: [1.4, 0.67, -5.0],
            power_on_secs: 1.2,
            model: "models/screen.glb".to_string(),
            model_scale: 0.7,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            default_fov_deg: 75.0,
            focus_fov_deg: 12.0,
            smoothing: 0.9,
            sit_duration_secs: 0.7,
            sit_sway: 0.18,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            footsteps: "audio/footsteps.ogg".to_string(),
            walk_volume: 0.7,
            run_volume: 1.0,
            walk_rate: 1.0,
            run_rate: 1.6,
        }
    }
}

fn wall(pos: [f32; 3], size: [f32; 3]) -> WallConfig {
    WallConfig { pos, size }
}

pub fn default_walls() -> Vec<WallConfig> {
    vec![
        wall([0.0, 1.0, -20.0], [40.0, 2.0, 1.0]),
        wall([0.0, 1.0, 20.0], [40.0, 2.0, 1.0]),
        wall([-20.0, 1.0, 0.0], [1.0, 2.0, 40.0]),
        wall([20.0, 1.0, 0.0], [1.0, 2.0, 40.0]),
        wall([-10.0, 1.0, -5.0], [8.0, 2.0, 1.0]),
        wall([6.0, 1.0, -5.0], [12.0, 2.0, 1.0]),
        wall([0.0, 1.0, 8.0], [16.0, 2.0, 1.0]),
        wall([-10.0, 1.0, 15.0], [8.0, 2.0, 1.0]),
        wall([10.0, 1.0, 5.0], [1.0, 2.0, 10.0]),
    ]
}

impl SceneConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!("loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        if !(p.radius.is_finite() && p.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "player.radius must be positive and finite, got {}",
                p.radius
            )));
        }
        for (name, value) in [
            ("player.walk_speed", p.walk_speed),
            ("player.run_multiplier", p.run_multiplier),
            ("player.jump_speed", p.jump_speed),
            ("player.mouse_sensitivity", p.mouse_sensitivity),
            ("seat.capture_radius", self.seat.capture_radius),
            ("seat.model_scale", self.seat.model_scale),
            ("display.model_scale", self.display.model_scale),
            ("audio.walk_volume", self.audio.walk_volume),
            ("audio.run_volume", self.audio.run_volume),
            ("audio.walk_rate", self.audio.walk_rate),
            ("audio.run_rate", self.audio.run_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite and not negative, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("player.gravity", p.gravity),
            ("player.eye_offset", p.eye_offset),
            ("seat.seat_height", self.seat.seat_height),
            ("seat.eye_offset", self.seat.eye_offset),
            ("seat.model_yaw", self.seat.model_yaw),
            ("camera.sit_sway", self.camera.sit_sway),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        let mut points = vec![
            ("player.spawn".to_string(), p.spawn),
            ("seat.position".to_string(), self.seat.position),
            ("seat.stand_offset".to_string(), self.seat.stand_offset),
            ("seat.bounds".to_string(), self.seat.bounds),
            ("display.position".to_string(), self.display.position),
            ("display.bounds".to_string(), self.display.bounds),
            ("display.focus_target".to_string(), self.display.focus_target),
        ];
        for (idx, wall) in self.walls.iter().enumerate() {
            points.push((format!("walls[{idx}].pos"), wall.pos));
            points.push((format!("walls[{idx}].size"), wall.size));
        }
        if let Some((name, value)) = points
            .iter()
            .find(|(_, v)| v.iter().any(|c| !c.is_finite()))
        {
            return Err(ConfigError::Invalid(format!(
                "{name} must be finite, got {value:?}"
            )));
        }
        let positive_finite = |secs: f32| secs.is_finite() && secs > 0.0;
        if !positive_finite(self.camera.sit_duration_secs)
            || !positive_finite(self.display.power_on_secs)
        {
            return Err(ConfigError::Invalid(
                "sit and power-on durations must be positive".to_string(),
            ));
        }
        for (name, fov) in [
            ("camera.default_fov_deg", self.camera.default_fov_deg),
            ("camera.focus_fov_deg", self.camera.focus_fov_deg),
        ] {
            if !(fov > 0.0 && fov < 180.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be in (0, 180), got {fov}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.camera.smoothing) {
            return Err(ConfigError::Invalid(format!(
                "camera.smoothing must be in [0, 1], got {}",
                self.camera.smoothing
            )));
        }
        Ok(())
    }
}
