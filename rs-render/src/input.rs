use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use rs_utils::{CursorGrab, CursorRequest, UiState};
use tracing::debug;

/// Applies a pending cursor request to the primary window and records the result.
pub fn apply_cursor_lock(
    mut request: ResMut<CursorRequest>,
    mut ui_state: ResMut<UiState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Some(mut window) = windows.iter_mut().next() else {
        return;
    };

    if let Some(grab) = request.0.take() {
        let lock = grab == CursorGrab::Capture;
        let mode = if lock {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        if window.cursor_options.grab_mode != mode {
            window.cursor_options.grab_mode = mode;
        }
        if window.cursor_options.visible == lock {
            window.cursor_options.visible = !lock;
        }
        debug!("cursor {:?}", grab);
    }

    // Some platforms drop the grab on their own (alt-tab); follow the window.
    let locked = window.cursor_options.grab_mode != CursorGrabMode::None;
    if ui_state.pointer_locked != locked {
        ui_state.pointer_locked = locked;
    }
}
