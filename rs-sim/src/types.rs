use bevy::math::EulerRot;
use bevy::prelude::{Quat, Transform, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub grounded: bool,
}

impl PlayerState {
    pub fn spawn(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            radius,
            grounded: false,
        }
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::spawn(Vec3::new(0.0, 1.2, 5.0), 0.5)
    }
}

/// Movement intent latched from key events. Axes are always -1, 0 or 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub forward_axis: i8,
    pub strafe_axis: i8,
    pub running: bool,
    pub jump_held: bool,
}

impl InputIntent {
    pub fn is_moving(&self) -> bool {
        self.forward_axis != 0 || self.strafe_axis != 0
    }
}

/// Discrete action presses collected since the last tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Actions {
    pub sit: bool,
    pub stand: bool,
    pub focus: bool,
    pub power: bool,
}

impl Actions {
    pub fn any(&self) -> bool {
        self.sit || self.stand || self.focus || self.power
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeatAnchor {
    pub position: Vec3,
    pub radius: f32,
}

impl SeatAnchor {
    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.position) < self.radius
    }
}

/// Camera pose the simulation reads and writes each tick.
///
/// Orientation is kept as yaw/pitch so mouse look and the sit sway compose without drift.
/// While `look_target` is set the orientation is derived from it instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraRig {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov_deg: f32,
    pub look_target: Option<Vec3>,
}

pub const PITCH_LIMIT: f32 = 1.54;

impl CameraRig {
    pub fn new(position: Vec3, fov_deg: f32) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            fov_deg,
            look_target: None,
        }
    }

    pub fn rotation(&self) -> Quat {
        match self.look_target {
            Some(target) => {
                Transform::from_translation(self.position)
                    .looking_at(target, Vec3::Y)
                    .rotation
            }
            None => Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }

    pub fn look(&mut self, delta: Vec2, sensitivity: f32) {
        // Bevy yaw is right-handed (positive turns left), so mouse right decreases it.
        self.yaw -= delta.x * sensitivity;
        self.pitch -= delta.y * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Re-derive yaw/pitch so the free camera faces `dir`.
    pub fn face(&mut self, dir: Vec3) {
        let Some(dir) = dir.try_normalize() else {
            return;
        };
        self.yaw = (-dir.x).atan2(-dir.z);
        self.pitch = dir.y.clamp(-1.0, 1.0).asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 10.0), 75.0)
    }
}
