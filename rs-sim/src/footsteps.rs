use crate::interaction::InteractionMode;
use crate::types::InputIntent;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootstepParams {
    pub walk_volume: f32,
    pub run_volume: f32,
    pub walk_rate: f32,
    pub run_rate: f32,
}

impl Default for FootstepParams {
    fn default() -> Self {
        Self {
            walk_volume: 0.7,
            run_volume: 1.0,
            walk_rate: 1.0,
            run_rate: 1.6,
        }
    }
}

/// What the footstep loop should be doing this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootstepCue {
    pub playing: bool,
    pub volume: f32,
    pub playback_rate: f32,
}

impl FootstepCue {
    pub const SILENT: Self = Self {
        playing: false,
        volume: 0.0,
        playback_rate: 1.0,
    };
}

pub fn footstep_cue(
    mode: InteractionMode,
    intent: &InputIntent,
    params: &FootstepParams,
) -> FootstepCue {
    if mode != InteractionMode::FreeRoam || !intent.is_moving() {
        return FootstepCue::SILENT;
    }
    if intent.running {
        FootstepCue {
            playing: true,
            volume: params.run_volume,
            playback_rate: params.run_rate,
        }
    } else {
        FootstepCue {
            playing: true,
            volume: params.walk_volume,
            playback_rate: params.walk_rate,
        }
    }
}
