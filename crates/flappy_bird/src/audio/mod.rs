mod cues;

use core::time::Duration;
use std::collections::HashMap;

use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
use strum::IntoEnumIterator;

pub use cues::{AudioCue, CueSchedule};

use crate::config::GameConfig;
use crate::gameplay::GameEvent;

#[derive(Resource, Default)]
struct CueSounds(HashMap<AudioCue, Handle<bevy_kira_audio::prelude::AudioSource>>);

#[derive(Resource, Default, Deref, DerefMut)]
struct CueStops(CueSchedule);

pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_resource::<CueSounds>()
            .init_resource::<CueStops>()
            .add_systems(Startup, setup)
            .add_systems(Update, (play_cues, stop_expired_cues).chain());
    }
}

// One channel per cue, so stopping a cue never cuts another one.
fn setup(
    asset_server: Res<AssetServer>,
    mut channels: ResMut<DynamicAudioChannels>,
    mut sounds: ResMut<CueSounds>,
) {
    for cue in AudioCue::iter() {
        channels.create_channel(cue.name());
        sounds.0.insert(cue, asset_server.load(cue.path()));
    }
}

fn cue_duration(cue: AudioCue, config: &GameConfig) -> Option<Duration> {
    (cue == AudioCue::Flap).then(|| Duration::from_secs_f32(config.flap_cue_secs))
}

fn play_cues(
    mut game_events: EventReader<GameEvent>,
    asset_server: Res<AssetServer>,
    channels: Res<DynamicAudioChannels>,
    sounds: Res<CueSounds>,
    config: Res<GameConfig>,
    mut stops: ResMut<CueStops>,
) {
    for event in game_events.read() {
        let Some(cue) = AudioCue::for_event(**event) else {
            continue;
        };
        let Some(sound) = sounds.0.get(&cue) else {
            warn!("No sound registered for cue {}", cue.name());
            continue;
        };
        if let Some(LoadState::Failed(err)) = asset_server.get_load_state(sound) {
            warn!("Skipping cue {}: {err}", cue.name());
            continue;
        }
        if !channels.is_channel(cue.name()) {
            warn!("No audio channel for cue {}", cue.name());
            continue;
        }

        let channel = channels.channel(cue.name());
        channel.stop();
        channel.play(sound.clone_weak());
        stops.trigger(cue, cue_duration(cue, &config));
    }
}

fn stop_expired_cues(
    time: Res<Time>,
    channels: Res<DynamicAudioChannels>,
    mut stops: ResMut<CueStops>,
) {
    for cue in stops.tick(time.delta()) {
        if channels.is_channel(cue.name()) {
            channels.channel(cue.name()).stop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_flap_cue_stops_on_its_own() {
        let config = GameConfig::default();
        assert_eq!(
            cue_duration(AudioCue::Flap, &config),
            Some(Duration::from_millis(2_500)),
            "flap cue"
        );
        for cue in [AudioCue::Swoosh, AudioCue::Point, AudioCue::Final] {
            assert_eq!(cue_duration(cue, &config), None, "{cue:?} plays through");
        }
    }
}
