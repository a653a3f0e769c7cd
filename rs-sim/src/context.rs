use bevy::prelude::{KeyCode, Resource, Vec2, Vec3};
use rs_utils::{CursorGrab, SceneConfig};
use tracing::debug;

use crate::collider::ColliderRegistry;
use crate::collision::resolve;
use crate::display::DisplayPowerState;
use crate::footsteps::{FootstepCue, footstep_cue};
use crate::input::InputSampler;
use crate::interaction::{InteractionMachine, InteractionMode};
use crate::physics::integrate;
use crate::settings::{SimSettings, scene_colliders};
use crate::types::{CameraRig, InputIntent, PlayerState};

/// Everything the UI layer may poll after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimSnapshot {
    pub tick: u64,
    pub mode: InteractionMode,
    pub display: DisplayPowerState,
    /// Close enough to sit, and not already seated.
    pub near_seat: bool,
    pub pointer_locked: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub transition: Option<(InteractionMode, InteractionMode)>,
    pub cursor: Option<CursorGrab>,
}

/// Owns the player, camera pose, mode and display state for one scene.
#[derive(Debug, Resource)]
pub struct SimContext {
    settings: SimSettings,
    colliders: ColliderRegistry,
    input: InputSampler,
    player: PlayerState,
    camera: CameraRig,
    machine: InteractionMachine,
    display: DisplayPowerState,
    pointer_locked: bool,
    tick: u64,
}

impl SimContext {
    pub fn new(settings: SimSettings, colliders: ColliderRegistry) -> Self {
        let player = PlayerState::spawn(settings.spawn, settings.radius);
        let camera = CameraRig::new(
            settings.spawn + Vec3::Y * settings.walk_eye_offset,
            settings.default_fov_deg,
        );
        Self {
            input: InputSampler::new(settings.bindings.clone()),
            display: DisplayPowerState::new(settings.power_on_secs),
            settings,
            colliders,
            player,
            camera,
            machine: InteractionMachine::default(),
            pointer_locked: false,
            tick: 0,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(SimSettings::from_config(config), scene_colliders(config))
    }

    pub fn on_key_down(&mut self, code: KeyCode) {
        self.input.on_key_down(code);
    }

    pub fn on_key_up(&mut self, code: KeyCode) {
        self.input.on_key_up(code);
    }

    pub fn release_keys(&mut self) {
        self.input.release_all();
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    /// Mouse look. Only honoured with the pointer captured and the view not scripted.
    pub fn look(&mut self, delta: Vec2) -> bool {
        if !self.pointer_locked || delta == Vec2::ZERO {
            return false;
        }
        match self.machine.mode() {
            InteractionMode::FreeRoam | InteractionMode::Seated => {
                self.camera.look(delta, self.settings.mouse_sensitivity);
                true
            }
            InteractionMode::SitTransition | InteractionMode::Focused => false,
        }
    }

    pub fn tick(&mut self, dt: f32) -> TickOutcome {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let before = self.machine.mode();
        let intent = self.input.sample();
        let actions = self.input.take_actions();

        match before {
            InteractionMode::FreeRoam => self.step_free_roam(&intent, dt),
            InteractionMode::SitTransition => self.step_sit_transition(dt),
            InteractionMode::Seated | InteractionMode::Focused => self.hold_seat(),
        }

        let mut outcome = TickOutcome::default();
        if actions.sit {
            self.machine
                .try_sit(&self.player, &self.camera, &self.settings);
        }
        if actions.stand {
            self.machine
                .try_stand(&mut self.player, &mut self.display, &self.settings);
        }
        if actions.focus {
            outcome.cursor = self.machine.toggle_focus(&mut self.camera, &self.settings);
        }

        let mode = self.machine.mode();
        let mut power_toggled = false;
        if actions.power {
            if mode.at_seat() {
                self.display.toggle();
                power_toggled = true;
            } else {
                debug!("power ignored in {:?}", mode);
            }
        }
        // The boot timer starts counting on the tick after the press.
        if mode.at_seat() && !power_toggled {
            self.display.advance(dt);
        }

        if mode != before {
            outcome.transition = Some((before, mode));
        }
        self.tick += 1;
        outcome
    }

    fn step_free_roam(&mut self, intent: &InputIntent, dt: f32) {
        let s = &self.settings;
        let mut next = integrate(
            &self.player,
            intent,
            self.camera.forward(),
            dt,
            &s.movement,
        );
        let resolved = resolve(next.position, next.radius, self.colliders.all());
        // Pushed up out of a box while falling: we are standing on it.
        if resolved.y > next.position.y && next.velocity.y < 0.0 {
            next.velocity.y = 0.0;
        }
        next.position = resolved;
        self.player = next;

        let eye = self.player.position + Vec3::Y * s.walk_eye_offset;
        self.camera.position = self.camera.position.lerp(eye, s.camera_smoothing);
        self.camera.fov_deg = s.default_fov_deg;
        self.camera.look_target = None;
    }

    fn step_sit_transition(&mut self, dt: f32) {
        let s = &self.settings;
        let done = self
            .machine
            .advance_sit(dt, &mut self.player, &mut self.camera, s);
        let t = match self.machine.sit_animation() {
            Some(anim) if !done => anim.progress(s.sit_duration),
            _ => 1.0,
        };
        let eye_offset = s.walk_eye_offset + (s.seated_eye_offset - s.walk_eye_offset) * t;
        let eye = self.player.position + Vec3::Y * eye_offset;
        self.camera.position = self.camera.position.lerp(eye, s.camera_smoothing);
    }

    fn hold_seat(&mut self) {
        let s = &self.settings;
        let seat = s.seat_offset();
        self.player.position = seat;
        self.player.velocity = Vec3::ZERO;

        let eye = seat + Vec3::Y * s.seated_eye_offset;
        self.camera.position = self.camera.position.lerp(eye, s.camera_smoothing);
        if self.machine.mode() == InteractionMode::Focused {
            self.camera.fov_deg = s.focus_fov_deg;
            self.camera.look_target = Some(s.focus_target);
        } else {
            self.camera.fov_deg = s.default_fov_deg;
            self.camera.look_target = None;
        }
    }

    pub fn near_seat(&self) -> bool {
        self.machine.mode() == InteractionMode::FreeRoam
            && self.settings.seat.contains(self.player.position)
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            tick: self.tick,
            mode: self.machine.mode(),
            display: self.display,
            near_seat: self.near_seat(),
            pointer_locked: self.pointer_locked,
        }
    }

    pub fn footstep_cue(&self) -> FootstepCue {
        footstep_cue(
            self.machine.mode(),
            &self.input.sample(),
            &self.settings.footsteps,
        )
    }

    pub fn mode(&self) -> InteractionMode {
        self.machine.mode()
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Teleport, e.g. a scripted respawn. Not resolved against colliders.
    pub fn set_player(&mut self, player: PlayerState) {
        self.player = player;
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut CameraRig {
        &mut self.camera
    }

    pub fn display(&self) -> &DisplayPowerState {
        &self.display
    }

    pub fn colliders(&self) -> &ColliderRegistry {
        &self.colliders
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }
}
