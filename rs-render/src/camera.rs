use bevy::prelude::*;
use rs_sim::SimContext;

use crate::components::PlayerCamera;

pub fn spawn_camera(mut commands: Commands, sim: Res<SimContext>) {
    let rig = sim.camera();
    commands.spawn((
        Camera3d::default(),
        PlayerCamera,
        Projection::Perspective(PerspectiveProjection {
            fov: rig.fov_deg.to_radians(),
            ..default()
        }),
        Transform::from_translation(rig.position).with_rotation(rig.rotation()),
    ));
}

