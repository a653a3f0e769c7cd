use bevy::prelude::Vec3;

use crate::collider::Collider;

pub const COLLISION_EPS: f32 = 0.001;

/// Pushes a sphere at `tentative` out of every collider, one collider at a time.
///
/// Each collider is tested against the position accumulated so far, so overlapping boxes are
/// corrected in iteration order rather than jointly. Wedged between two boxes the result can
/// still touch the earlier one; this is a known limitation.
pub fn resolve(tentative: Vec3, radius: f32, colliders: &[Collider]) -> Vec3 {
    let mut pos = tentative;
    for collider in colliders {
        if collider.is_degenerate() {
            continue;
        }
        let closest = collider.closest_point(pos);
        let delta = pos - closest;
        let dist = delta.length();
        if dist >= radius {
            continue;
        }
        if dist == 0.0 {
            // Centre inside the box: usually landing on it from straight above.
            pos.y = collider.max.y + radius + COLLISION_EPS;
        } else {
            pos += delta / dist * (radius - dist + COLLISION_EPS);
        }
    }
    pos
}

/// Largest overlap of the sphere with any single collider, zero when clear.
pub fn max_penetration(pos: Vec3, radius: f32, colliders: &[Collider]) -> f32 {
    colliders
        .iter()
        .filter(|c| !c.is_degenerate())
        .map(|c| radius - (pos - c.closest_point(pos)).length())
        .fold(0.0, f32::max)
}
