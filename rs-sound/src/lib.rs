use bevy::audio::{AudioSinkPlayback, PlaybackMode, Volume};
use bevy::prelude::*;
use rs_sim::{FootstepCue, SimContext};
use rs_utils::SceneConfig;
use tracing::{debug, info};

/// Looping footstep track, driven by the simulation's footstep cue.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FootstepState>()
            .add_systems(Startup, spawn_footsteps)
            .add_systems(Update, apply_footstep_cue);
    }
}

#[derive(Component)]
pub struct Footsteps;

/// Last cue applied to the sink, so it is only touched on change.
#[derive(Resource, Default)]
pub struct FootstepState {
    pub applied: Option<FootstepCue>,
}

fn spawn_footsteps(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<SceneConfig>) {
    let track: Handle<AudioSource> = asset_server.load(config.audio.footsteps.clone());
    commands.spawn((
        Footsteps,
        AudioPlayer::new(track),
        PlaybackSettings {
            mode: PlaybackMode::Loop,
            paused: true,
            ..default()
        },
    ));
    info!("footstep track {}", config.audio.footsteps);
}

fn apply_footstep_cue(
    sim: Res<SimContext>,
    mut state: ResMut<FootstepState>,
    mut sinks: Query<&mut AudioSink, With<Footsteps>>,
) {
    // The sink only exists once the track has decoded.
    let Ok(mut sink) = sinks.single_mut() else {
        return;
    };
    let cue = sim.footstep_cue();
    if state.applied == Some(cue) {
        return;
    }

    if cue.playing {
        sink.set_volume(Volume::Linear(cue.volume));
        sink.set_speed(cue.playback_rate);
        if sink.is_paused() {
            sink.play();
        }
    } else if !sink.is_paused() {
        sink.pause();
    }
    debug!(
        playing = cue.playing,
        volume = cue.volume,
        rate = cue.playback_rate,
        "footsteps"
    );
    state.applied = Some(cue);
}
