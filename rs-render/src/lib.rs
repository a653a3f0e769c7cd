use bevy::prelude::*;

mod camera;
mod components;
pub mod debug;
mod input;
mod world;

pub use components::{PlayerCamera, Prop, ShadowCasterLight, Wall, WorldRoot};
pub use debug::RenderDebugSettings;
pub use world::SceneAssets;

/// Room geometry, lights, the player camera and cursor capture.
///
/// Expects `SceneConfig` and `SimContext` resources to be present before startup.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .init_resource::<world::WorldSettings>()
            .init_resource::<world::SceneAssets>()
            .init_resource::<debug::RenderDebugSettings>()
            .add_systems(Startup, (world::setup_world, camera::spawn_camera))
            .add_systems(
                Update,
                (
                    input::apply_cursor_lock,
                    debug::apply_render_debug_settings,
                    debug::draw_colliders,
                ),
            );
    }
}
