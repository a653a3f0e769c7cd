use std::time::Instant;

use bevy::asset::RecursiveDependencyLoadState;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::input::ButtonState;
use bevy::input::keyboard::KeyboardInput;
use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use bevy::window::WindowFocused;
use bevy_egui::{EguiContexts, egui};
use tracing::{debug, info, warn};

use rs_render::{PlayerCamera, RenderDebugSettings, SceneAssets};
use rs_sim::{InteractionMode, SimContext};
use rs_utils::{AppState, ApplicationState, CursorGrab, CursorRequest, PerfTimings, UiState};

use crate::timing::Timing;

/// Longest frame the simulation will integrate in one step; hitches are slowed, not skipped.
const MAX_FRAME_DT: f32 = 0.1;

#[derive(Resource)]
pub struct DebugUiState {
    pub show_sim: bool,
    pub show_performance: bool,
    pub show_render: bool,
}

impl Default for DebugUiState {
    fn default() -> Self {
        Self {
            show_sim: true,
            show_performance: false,
            show_render: false,
        }
    }
}

#[derive(Resource, Default)]
pub struct FrameTimingState {
    pub start: Option<Instant>,
    pub update_start: Option<Instant>,
}

pub fn frame_timing_start(
    time: Res<Time>,
    mut state: ResMut<FrameTimingState>,
    mut timings: ResMut<PerfTimings>,
) {
    state.start = Some(Instant::now());
    timings.frame_delta_ms = time.delta_secs() * 1000.0;
}

pub fn frame_timing_end(mut state: ResMut<FrameTimingState>, mut timings: ResMut<PerfTimings>) {
    if let Some(start) = state.start.take() {
        timings.main_thread_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}

pub fn update_timing_start(mut state: ResMut<FrameTimingState>) {
    state.update_start = Some(Instant::now());
}

pub fn update_timing_end(mut state: ResMut<FrameTimingState>, mut timings: ResMut<PerfTimings>) {
    if let Some(start) = state.update_start.take() {
        timings.update_ms = start.elapsed().as_secs_f32() * 1000.0;
    }
}

/// Holds the app in `Loading` until both prop scenes have resolved one way or the other.
pub fn loading_gate_system(
    asset_server: Res<AssetServer>,
    scene_assets: Res<SceneAssets>,
    mut app_state: ResMut<AppState>,
) {
    if !matches!(app_state.0, ApplicationState::Loading) {
        return;
    }

    let mut failed = 0;
    for handle in &scene_assets.props {
        match asset_server.get_recursive_dependency_load_state(handle.id()) {
            Some(RecursiveDependencyLoadState::Loaded) => {}
            Some(RecursiveDependencyLoadState::Failed(err)) => {
                warn!("scene prop failed to load: {err}");
                failed += 1;
            }
            _ => return,
        }
    }

    app_state.0 = ApplicationState::Running;
    info!(failed, "scene ready");
}

pub fn debug_toggle_system(keys: Res<ButtonInput<KeyCode>>, mut ui_state: ResMut<UiState>) {
    if keys.just_pressed(KeyCode::F3) {
        ui_state.debug_open = !ui_state.debug_open;
    }
}

/// Click in the world captures the pointer, Escape frees it.
pub fn pointer_request_system(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    app_state: Res<AppState>,
    ui_state: Res<UiState>,
    sim: Res<SimContext>,
    mut cursor: ResMut<CursorRequest>,
) {
    if !matches!(app_state.0, ApplicationState::Running) {
        return;
    }
    if ui_state.pointer_locked {
        if keys.just_pressed(KeyCode::Escape) {
            cursor.release();
        }
        return;
    }
    if mouse.just_pressed(MouseButton::Left)
        && !ui_state.egui_pointer
        && sim.mode() != InteractionMode::Focused
    {
        cursor.capture();
    }
}

pub fn key_event_system(
    mut key_events: EventReader<KeyboardInput>,
    mut focus_events: EventReader<WindowFocused>,
    app_state: Res<AppState>,
    ui_state: Res<UiState>,
    mut sim: ResMut<SimContext>,
    mut timings: ResMut<PerfTimings>,
) {
    let timing = Timing::start();
    // Key-ups always pass through so nothing stays latched behind a text field.
    let accept_presses =
        matches!(app_state.0, ApplicationState::Running) && !ui_state.egui_keyboard;

    for ev in key_events.read() {
        match ev.state {
            ButtonState::Pressed if accept_presses => sim.on_key_down(ev.key_code),
            ButtonState::Pressed => {}
            ButtonState::Released => sim.on_key_up(ev.key_code),
        }
    }

    // Key-ups are lost while unfocused.
    for ev in focus_events.read() {
        if !ev.focused {
            debug!("window lost focus; releasing keys");
            sim.release_keys();
        }
    }
    timing.finish(&mut timings.key_events_ms);
}

pub fn mouse_look_system(
    mut motion_events: EventReader<MouseMotion>,
    ui_state: Res<UiState>,
    mut sim: ResMut<SimContext>,
) {
    let delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();
    if sim.snapshot().pointer_locked != ui_state.pointer_locked {
        sim.set_pointer_locked(ui_state.pointer_locked);
    }
    sim.look(delta);
}

pub fn sim_tick_system(
    time: Res<Time>,
    app_state: Res<AppState>,
    mut sim: ResMut<SimContext>,
    mut cursor: ResMut<CursorRequest>,
    mut timings: ResMut<PerfTimings>,
) {
    let timing = Timing::start();
    if !matches!(app_state.0, ApplicationState::Running) {
        timing.finish(&mut timings.sim_tick_ms);
        return;
    }

    let outcome = sim.tick(time.delta_secs().min(MAX_FRAME_DT));
    if let Some((from, to)) = outcome.transition {
        info!("mode {:?} -> {:?}", from, to);
    }
    match outcome.cursor {
        Some(CursorGrab::Capture) => cursor.capture(),
        Some(CursorGrab::Release) => cursor.release(),
        None => {}
    }
    timing.finish(&mut timings.sim_tick_ms);
}

/// Copies the simulated camera pose onto the render camera.
pub fn apply_camera_system(
    sim: Res<SimContext>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<PlayerCamera>>,
    mut timings: ResMut<PerfTimings>,
) {
    let timing = Timing::start();
    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };
    let rig = sim.camera();
    transform.translation = rig.position;
    transform.rotation = rig.rotation();

    if let Projection::Perspective(perspective) = projection.as_mut() {
        let fov = rig.fov_deg.to_radians();
        if (perspective.fov - fov).abs() > f32::EPSILON {
            perspective.fov = fov;
        }
    }
    timing.finish(&mut timings.apply_camera_ms);
}

pub fn debug_overlay_system(
    mut contexts: EguiContexts,
    sim: Res<SimContext>,
    diagnostics: Res<DiagnosticsStore>,
    time: Res<Time>,
    ui_state: Res<UiState>,
    mut debug_ui: ResMut<DebugUiState>,
    mut render_debug: ResMut<RenderDebugSettings>,
    mut timings: ResMut<PerfTimings>,
) {
    let timing = Timing::start();
    if !ui_state.debug_open {
        timings.debug_ui_ms = 0.0;
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };
    egui::Window::new("Debug")
        .default_pos(egui::pos2(12.0, 12.0))
        .show(ctx, |ui| {
            ui.checkbox(&mut debug_ui.show_sim, "Simulation");
            ui.checkbox(&mut debug_ui.show_performance, "Performance");
            ui.checkbox(&mut debug_ui.show_render, "Render");

            let frame_ms = (time.delta_secs_f64() * 1000.0) as f32;
            ui.separator();
            if let Some(fps) = diagnostics
                .get(&FrameTimeDiagnosticsPlugin::FPS)
                .and_then(|d| d.smoothed())
            {
                ui.label(format!("fps: {:.1}", fps));
            } else {
                ui.label("fps: n/a");
            }

            if debug_ui.show_sim {
                ui.separator();
                let snapshot = sim.snapshot();
                let player = sim.player();
                let camera = sim.camera();
                let pos = player.position;
                let vel = player.velocity;
                ui.label(format!("tick: {}", snapshot.tick));
                ui.label(format!("pos: {:.3} {:.3} {:.3}", pos.x, pos.y, pos.z));
                ui.label(format!("vel: {:.3} {:.3} {:.3}", vel.x, vel.y, vel.z));
                ui.label(format!("grounded: {}", player.grounded));
                ui.label(format!("mode: {:?}", snapshot.mode));
                ui.label(format!(
                    "display: {:?} ({:.0}%)",
                    snapshot.display.phase,
                    snapshot.display.progress() * 100.0
                ));
                ui.label(format!(
                    "yaw/pitch: {:.1} / {:.1}  fov: {:.1}",
                    camera.yaw.to_degrees(),
                    camera.pitch.to_degrees(),
                    camera.fov_deg
                ));
                ui.label(format!("near seat: {}", snapshot.near_seat));
                ui.label(format!("pointer locked: {}", snapshot.pointer_locked));
            }

            if debug_ui.show_render {
                ui.separator();
                ui.checkbox(&mut render_debug.shadows_enabled, "Shadows");
                ui.checkbox(&mut render_debug.show_colliders, "Colliders");
                ui.label(format!("colliders: {}", sim.colliders().len()));
            }

            if debug_ui.show_performance {
                ui.separator();
                let fmt_pct = |ms: f32| {
                    if frame_ms <= 0.0 {
                        "n/a".to_string()
                    } else {
                        format!("{:.1}%", (ms / frame_ms).max(0.0) * 100.0)
                    }
                };
                ui.label(format!("frame ms (delta): {:.2}", timings.frame_delta_ms));
                for (label, ms) in [
                    ("main thread", timings.main_thread_ms),
                    ("update schedule", timings.update_ms),
                    ("key_events", timings.key_events_ms),
                    ("sim_tick", timings.sim_tick_ms),
                    ("apply_camera", timings.apply_camera_ms),
                    ("debug_ui", timings.debug_ui_ms),
                    ("ui", timings.ui_ms),
                ] {
                    ui.label(format!("{label}: {:.3}ms {}", ms, fmt_pct(ms)));
                }
            }
        });
    timing.finish(&mut timings.debug_ui_ms);
}
