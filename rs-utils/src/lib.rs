use std::path::{Path, PathBuf};

use bevy::ecs::resource::Resource;
use tracing::debug;

pub mod config;
pub use config::{
    AudioConfig, CameraConfig, ConfigError, DisplayConfig, PlayerConfig, SceneConfig, SeatConfig,
    WallConfig,
};

pub const MISSION_ASSETS_ROOT_ENV: &str = "MISSION_ASSETS_ROOT";

#[derive(Resource)]
pub struct AppState(pub ApplicationState);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationState {
    Loading,
    Running,
}

/// Root for scene models and audio, in priority order: `MISSION_ASSETS_ROOT`, an `assets/`
/// directory beside the executable, then the client crate's `assets/`.
pub fn mission_assets_root() -> PathBuf {
    let explicit = std::env::var_os(MISSION_ASSETS_ROOT_ENV).map(PathBuf::from);
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets")));
    let in_repo = Path::new(env!("CARGO_MANIFEST_DIR")).join("../rs-client/assets");

    let root = first_existing_dir(explicit.into_iter().chain(beside_exe).chain([in_repo]))
        .unwrap_or_else(|| PathBuf::from("assets"));
    debug!(root = %root.display(), "asset root");
    root
}

fn first_existing_dir(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_dir())
}

#[derive(Resource, Default)]
pub struct UiState {
    /// Pointer capture as last reported by the window.
    pub pointer_locked: bool,
    pub debug_open: bool,
    /// egui claimed keyboard/pointer input during its last pass.
    pub egui_keyboard: bool,
    pub egui_pointer: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorGrab {
    /// Lock and hide the cursor for mouse look.
    Capture,
    /// Free the cursor and make it visible.
    Release,
}

/// Pending cursor change, applied once by the render layer.
#[derive(Resource, Default)]
pub struct CursorRequest(pub Option<CursorGrab>);

impl CursorRequest {
    pub fn capture(&mut self) {
        self.0 = Some(CursorGrab::Capture);
    }

    pub fn release(&mut self) {
        self.0 = Some(CursorGrab::Release);
    }
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct PerfTimings {
    pub frame_delta_ms: f32,
    pub main_thread_ms: f32,
    pub update_ms: f32,
    pub key_events_ms: f32,
    pub sim_tick_ms: f32,
    pub apply_camera_ms: f32,
    pub debug_ui_ms: f32,
    pub ui_ms: f32,
}
