use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use rs_render::RenderDebugSettings;
use rs_sim::SimContext;
use rs_utils::{AppState, ApplicationState, CursorRequest, PerfTimings, SceneConfig, UiState};
use tracing::info;

use crate::sim_systems;

pub struct ClientCorePlugin {
    config: SceneConfig,
    show_colliders: bool,
}

impl ClientCorePlugin {
    pub fn new(config: SceneConfig, show_colliders: bool) -> Self {
        Self {
            config,
            show_colliders,
        }
    }
}

impl Plugin for ClientCorePlugin {
    fn build(&self, app: &mut App) {
        let sim = SimContext::from_config(&self.config);
        info!(colliders = sim.colliders().len(), "simulation ready");

        app.insert_resource(sim)
            .insert_resource(self.config.clone())
            .insert_resource(AppState(ApplicationState::Loading))
            .insert_resource(UiState::default())
            .insert_resource(CursorRequest::default())
            .insert_resource(PerfTimings::default())
            .insert_resource(RenderDebugSettings {
                show_colliders: self.show_colliders,
                ..default()
            })
            .insert_resource(sim_systems::DebugUiState::default())
            .insert_resource(sim_systems::FrameTimingState::default());
    }
}

pub struct ClientSimPlugin;

impl Plugin for ClientSimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sim_systems::loading_gate_system,
                sim_systems::debug_toggle_system,
                sim_systems::pointer_request_system,
            ),
        )
        .add_systems(
            Update,
            (
                sim_systems::key_event_system,
                sim_systems::mouse_look_system,
                sim_systems::sim_tick_system,
                sim_systems::apply_camera_system,
            )
                .chain()
                .after(sim_systems::loading_gate_system),
        )
        .add_systems(EguiPrimaryContextPass, sim_systems::debug_overlay_system);
    }
}

pub struct ClientTimingPlugin;

#[cfg(feature = "perf_timing")]
impl Plugin for ClientTimingPlugin {
    fn build(&self, app: &mut App) {
        use bevy::diagnostic::FrameTimeDiagnosticsPlugin;

        app.add_plugins(FrameTimeDiagnosticsPlugin::default())
            .add_systems(First, sim_systems::frame_timing_start)
            .add_systems(
                Update,
                sim_systems::update_timing_start.before(sim_systems::key_event_system),
            )
            .add_systems(
                Update,
                sim_systems::update_timing_end.after(sim_systems::apply_camera_system),
            )
            .add_systems(Last, sim_systems::frame_timing_end);
    }
}

#[cfg(not(feature = "perf_timing"))]
impl Plugin for ClientTimingPlugin {
    fn build(&self, _app: &mut App) {}
}
