use bevy::prelude::Vec3;

use crate::types::{InputIntent, PlayerState};

pub const GRAVITY: f32 = -9.8;
pub const JUMP_SPEED: f32 = 4.2;
pub const GROUND_EPS: f32 = 0.001;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementParams {
    pub speed: f32,
    pub run_multiplier: f32,
    pub jump_speed: f32,
    pub gravity: f32,
}

impl Default for MovementParams {
    fn default() -> Self {
        Self {
            speed: 3.0,
            run_multiplier: 1.9,
            jump_speed: JUMP_SPEED,
            gravity: GRAVITY,
        }
    }
}

/// Horizontal displacement for one tick, before collision.
pub fn horizontal_move(
    intent: &InputIntent,
    camera_forward: Vec3,
    dt: f32,
    params: &MovementParams,
) -> Vec3 {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    let speed = params.speed * if intent.running { params.run_multiplier } else { 1.0 };
    forward * (f32::from(intent.forward_axis) * speed * dt)
        + right * (f32::from(intent.strafe_axis) * speed * dt)
}

/// Advances the player by one tick: gravity, intended motion, floor clamp, then jump.
///
/// The floor is the plane `y = 0`; the player rests with its centre at `radius`. Jump is only
/// taken on a tick that ends grounded, so pressing it mid-air does nothing.
pub fn integrate(
    state: &PlayerState,
    intent: &InputIntent,
    camera_forward: Vec3,
    dt: f32,
    params: &MovementParams,
) -> PlayerState {
    let mut next = *state;
    next.velocity.y += params.gravity * dt;

    let mut pos = state.position + horizontal_move(intent, camera_forward, dt, params);
    pos.y += next.velocity.y * dt;

    if pos.y <= state.radius + GROUND_EPS {
        pos.y = state.radius;
        next.velocity.y = 0.0;
        next.grounded = true;
    } else {
        next.grounded = false;
    }

    if intent.jump_held && next.grounded {
        next.velocity.y = params.jump_speed;
        next.grounded = false;
    }

    next.position = pos;
    next
}
