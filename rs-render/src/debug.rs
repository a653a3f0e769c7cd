use bevy::prelude::*;
use rs_sim::SimContext;

use crate::components::ShadowCasterLight;

#[derive(Resource, Debug, Clone)]
pub struct RenderDebugSettings {
    pub shadows_enabled: bool,
    pub show_colliders: bool,
}

impl Default for RenderDebugSettings {
    fn default() -> Self {
        Self {
            shadows_enabled: true,
            show_colliders: false,
        }
    }
}

pub fn apply_render_debug_settings(
    settings: Res<RenderDebugSettings>,
    mut lights: Query<&mut DirectionalLight, With<ShadowCasterLight>>,
) {
    if !settings.is_changed() {
        return;
    }
    for mut light in &mut lights {
        light.shadows_enabled = settings.shadows_enabled;
    }
}

pub fn draw_colliders(
    settings: Res<RenderDebugSettings>,
    sim: Res<SimContext>,
    mut gizmos: Gizmos,
) {
    if !settings.show_colliders {
        return;
    }
    let color = Color::srgba(0.25, 0.75, 1.0, 1.0);
    for collider in sim.colliders().all() {
        gizmos.cuboid(
            Transform::from_translation(collider.center()).with_scale(collider.size()),
            color,
        );
    }

    let player = sim.player();
    gizmos.sphere(
        Isometry3d::from_translation(player.position),
        player.radius,
        Color::srgba(1.0, 0.2, 0.2, 1.0),
    );
}
