use bevy::prelude::KeyCode;

use crate::types::{Actions, InputIntent};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Forward,
    Back,
    Left,
    Right,
    Run,
    Jump,
    Sit,
    Stand,
    Focus,
    Power,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub run: KeyCode,
    pub jump: KeyCode,
    pub sit: KeyCode,
    pub stand: KeyCode,
    pub focus: KeyCode,
    pub power: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            run: KeyCode::ShiftLeft,
            jump: KeyCode::Space,
            sit: KeyCode::KeyE,
            stand: KeyCode::KeyN,
            focus: KeyCode::KeyF,
            power: KeyCode::KeyP,
        }
    }
}

impl KeyBindings {
    pub fn action_for(&self, code: KeyCode) -> Option<KeyAction> {
        let table = [
            (self.forward, KeyAction::Forward),
            (self.back, KeyAction::Back),
            (self.left, KeyAction::Left),
            (self.right, KeyAction::Right),
            (self.run, KeyAction::Run),
            (self.jump, KeyAction::Jump),
            (self.sit, KeyAction::Sit),
            (self.stand, KeyAction::Stand),
            (self.focus, KeyAction::Focus),
            (self.power, KeyAction::Power),
        ];
        table
            .into_iter()
            .find_map(|(key, action)| (key == code).then_some(action))
    }
}

/// Latched keyboard state. Key events write it at any time; the tick reads it once.
#[derive(Clone, Debug, Default)]
pub struct InputSampler {
    bindings: KeyBindings,
    intent: InputIntent,
    pending: Actions,
    held: Actions,
}

impl InputSampler {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            ..Default::default()
        }
    }

    pub fn on_key_down(&mut self, code: KeyCode) {
        let Some(action) = self.bindings.action_for(code) else {
            return;
        };
        match action {
            KeyAction::Forward => self.intent.forward_axis = 1,
            KeyAction::Back => self.intent.forward_axis = -1,
            KeyAction::Left => self.intent.strafe_axis = -1,
            KeyAction::Right => self.intent.strafe_axis = 1,
            KeyAction::Run => self.intent.running = true,
            KeyAction::Jump => self.intent.jump_held = true,
            // A held action key latches once; OS key repeat does not re-fire it.
            KeyAction::Sit => latch(&mut self.pending.sit, &mut self.held.sit),
            KeyAction::Stand => latch(&mut self.pending.stand, &mut self.held.stand),
            KeyAction::Focus => latch(&mut self.pending.focus, &mut self.held.focus),
            KeyAction::Power => latch(&mut self.pending.power, &mut self.held.power),
        }
    }

    pub fn on_key_up(&mut self, code: KeyCode) {
        let Some(action) = self.bindings.action_for(code) else {
            return;
        };
        match action {
            // Only clear an axis if this key is the one that set it.
            KeyAction::Forward if self.intent.forward_axis == 1 => self.intent.forward_axis = 0,
            KeyAction::Back if self.intent.forward_axis == -1 => self.intent.forward_axis = 0,
            KeyAction::Left if self.intent.strafe_axis == -1 => self.intent.strafe_axis = 0,
            KeyAction::Right if self.intent.strafe_axis == 1 => self.intent.strafe_axis = 0,
            KeyAction::Forward | KeyAction::Back | KeyAction::Left | KeyAction::Right => {}
            KeyAction::Run => self.intent.running = false,
            KeyAction::Jump => self.intent.jump_held = false,
            KeyAction::Sit => self.held.sit = false,
            KeyAction::Stand => self.held.stand = false,
            KeyAction::Focus => self.held.focus = false,
            KeyAction::Power => self.held.power = false,
        }
    }

    pub fn sample(&self) -> InputIntent {
        self.intent
    }

    /// Returns the action presses since the previous call and clears them.
    pub fn take_actions(&mut self) -> Actions {
        std::mem::take(&mut self.pending)
    }

    /// Forget everything held, e.g. when the window loses focus and key-ups will not arrive.
    pub fn release_all(&mut self) {
        self.intent = InputIntent::default();
        self.held = Actions::default();
    }
}

fn latch(pending: &mut bool, held: &mut bool) {
    if !*held {
        *pending = true;
        *held = true;
    }
}
