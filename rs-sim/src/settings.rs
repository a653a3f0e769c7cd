use bevy::prelude::Vec3;
use rs_utils::SceneConfig;

use crate::collider::{self, Collider, ColliderRegistry, ModelBounds, Placement};
use crate::footsteps::FootstepParams;
use crate::input::KeyBindings;
use crate::physics::MovementParams;
use crate::types::SeatAnchor;

/// Tunables for one simulation context, resolved from the scene config.
#[derive(Clone, Debug, PartialEq)]
pub struct SimSettings {
    pub spawn: Vec3,
    pub radius: f32,
    pub movement: MovementParams,
    pub walk_eye_offset: f32,
    pub mouse_sensitivity: f32,
    pub seat: SeatAnchor,
    pub seat_height: f32,
    pub seated_eye_offset: f32,
    pub stand_offset: Vec3,
    pub focus_target: Vec3,
    pub default_fov_deg: f32,
    pub focus_fov_deg: f32,
    pub camera_smoothing: f32,
    pub sit_duration: f32,
    pub sit_sway: f32,
    pub power_on_secs: f32,
    pub footsteps: FootstepParams,
    pub bindings: KeyBindings,
}

impl SimSettings {
    pub fn from_config(config: &SceneConfig) -> Self {
        let p = &config.player;
        Self {
            spawn: Vec3::from_array(p.spawn),
            radius: p.radius,
            movement: MovementParams {
                speed: p.walk_speed,
                run_multiplier: p.run_multiplier,
                jump_speed: p.jump_speed,
                gravity: p.gravity,
            },
            walk_eye_offset: p.eye_offset,
            mouse_sensitivity: p.mouse_sensitivity,
            seat: SeatAnchor {
                position: Vec3::from_array(config.seat.position),
                radius: config.seat.capture_radius,
            },
            seat_height: config.seat.seat_height,
            seated_eye_offset: config.seat.eye_offset,
            stand_offset: Vec3::from_array(config.seat.stand_offset),
            focus_target: Vec3::from_array(config.display.focus_target),
            default_fov_deg: config.camera.default_fov_deg,
            focus_fov_deg: config.camera.focus_fov_deg,
            camera_smoothing: config.camera.smoothing,
            sit_duration: config.camera.sit_duration_secs,
            sit_sway: config.camera.sit_sway,
            power_on_secs: config.display.power_on_secs,
            footsteps: FootstepParams {
                walk_volume: config.audio.walk_volume,
                run_volume: config.audio.run_volume,
                walk_rate: config.audio.walk_rate,
                run_rate: config.audio.run_rate,
            },
            bindings: KeyBindings::default(),
        }
    }

    /// Player centre while seated.
    pub fn seat_offset(&self) -> Vec3 {
        self.seat.position + Vec3::new(0.0, self.seat_height, 0.0)
    }
}

impl Default for SimSettings {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}

/// Walls plus the seat and display props, in the order they are resolved.
pub fn scene_colliders(config: &SceneConfig) -> ColliderRegistry {
    let walls = config
        .walls
        .iter()
        .map(|w| Collider::from_center_size(Vec3::from_array(w.pos), Vec3::from_array(w.size)));

    let props = [
        (config.seat.bounds, config.seat.position),
        (config.display.bounds, config.display.position),
    ]
    .into_iter()
    .map(|(bounds, position)| {
        collider::build(
            ModelBounds::floor_anchored(Vec3::from_array(bounds)),
            Placement::at(Vec3::from_array(position)),
        )
    });

    walls.chain(props).collect()
}
