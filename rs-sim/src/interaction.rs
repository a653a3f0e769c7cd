use std::f32::consts::PI;

use bevy::prelude::Vec3;
use rs_utils::CursorGrab;
use tracing::{debug, info};

use crate::TIMER_EPS;
use crate::display::DisplayPowerState;
use crate::settings::SimSettings;
use crate::types::{CameraRig, PlayerState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    FreeRoam,
    SitTransition,
    Seated,
    Focused,
}

impl InteractionMode {
    /// Seated or focused: position is pinned and the display can be used.
    pub fn at_seat(self) -> bool {
        matches!(self, Self::Seated | Self::Focused)
    }
}

/// The scripted walk-into-seat motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SitAnimation {
    pub elapsed: f32,
    pub from: Vec3,
    pub start_yaw: f32,
    pub start_pitch: f32,
}

impl SitAnimation {
    pub fn progress(&self, duration: f32) -> f32 {
        (self.elapsed / duration).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, Default)]
pub struct InteractionMachine {
    mode: InteractionMode,
    sit: Option<SitAnimation>,
}

impl InteractionMachine {
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn sit_animation(&self) -> Option<&SitAnimation> {
        self.sit.as_ref()
    }

    pub fn try_sit(
        &mut self,
        player: &PlayerState,
        camera: &CameraRig,
        settings: &SimSettings,
    ) -> bool {
        if self.mode != InteractionMode::FreeRoam {
            debug!("sit ignored in {:?}", self.mode);
            return false;
        }
        if !settings.seat.contains(player.position) {
            debug!("sit ignored: not near the seat");
            return false;
        }
        self.sit = Some(SitAnimation {
            elapsed: 0.0,
            from: player.position,
            start_yaw: camera.yaw,
            start_pitch: camera.pitch,
        });
        self.mode = InteractionMode::SitTransition;
        info!("sitting down");
        true
    }

    /// Steps the sit animation. Returns true on the tick it finishes.
    ///
    /// Completion depends only on accumulated time, so any split of the same total
    /// duration ends on the same state.
    pub fn advance_sit(
        &mut self,
        dt: f32,
        player: &mut PlayerState,
        camera: &mut CameraRig,
        settings: &SimSettings,
    ) -> bool {
        let Some(anim) = self.sit.as_mut() else {
            return false;
        };
        anim.elapsed += dt;
        let target = settings.seat_offset();
        player.velocity = Vec3::ZERO;

        if anim.elapsed + TIMER_EPS >= settings.sit_duration {
            player.position = target;
            camera.yaw = anim.start_yaw;
            camera.pitch = anim.start_pitch;
            self.sit = None;
            self.mode = InteractionMode::Seated;
            info!("seated");
            return true;
        }

        let t = anim.progress(settings.sit_duration);
        player.position = anim.from.lerp(target, t);
        camera.yaw = anim.start_yaw + (t * PI).sin() * settings.sit_sway;
        false
    }

    /// Leaves the seat. Rejected while focused or still sitting down.
    pub fn try_stand(
        &mut self,
        player: &mut PlayerState,
        display: &mut DisplayPowerState,
        settings: &SimSettings,
    ) -> bool {
        if self.mode != InteractionMode::Seated {
            debug!("stand ignored in {:?}", self.mode);
            return false;
        }
        self.mode = InteractionMode::FreeRoam;
        player.position = settings.seat_offset() + settings.stand_offset;
        player.velocity = Vec3::ZERO;
        player.grounded = false;
        display.reset();
        info!("standing up");
        true
    }

    /// Enters or leaves focus. Returns the cursor change the host should apply.
    pub fn toggle_focus(
        &mut self,
        camera: &mut CameraRig,
        settings: &SimSettings,
    ) -> Option<CursorGrab> {
        match self.mode {
            InteractionMode::Seated => {
                self.mode = InteractionMode::Focused;
                camera.fov_deg = settings.focus_fov_deg;
                camera.look_target = Some(settings.focus_target);
                info!("focus on display");
                Some(CursorGrab::Release)
            }
            InteractionMode::Focused => {
                // Keep looking where focus left the view instead of snapping back.
                let dir = camera.forward();
                camera.look_target = None;
                camera.face(dir);
                camera.fov_deg = settings.default_fov_deg;
                self.mode = InteractionMode::Seated;
                info!("focus released");
                Some(CursorGrab::Capture)
            }
            InteractionMode::FreeRoam | InteractionMode::SitTransition => {
                debug!("focus ignored in {:?}", self.mode);
                None
            }
        }
    }
}
