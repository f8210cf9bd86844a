use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::player::controls::FlapRequested;
use crate::scene::AssetState;
use crate::session::{Session, SessionEvent};

/// The one running game session.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub Session);

/// Random source for the pipe heights.
#[derive(Resource, Deref, DerefMut)]
pub struct PipeRng(pub fastrand::Rng);

/// Forwards every [`SessionEvent`] to the rest of the app.
#[derive(Event, Deref, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEvent(pub SessionEvent);

/// Scores of the running process. The best score is never written anywhere.
#[derive(Resource, Default, Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScoreInfo {
    pub current_score: u32,
    pub high_score: u32,
}

impl ScoreInfo {
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Scored(score) => {
                self.current_score = score;
                self.high_score = self.high_score.max(score);
            }
            SessionEvent::Reset => self.current_score = 0,
            SessionEvent::Started | SessionEvent::Flapped | SessionEvent::Crashed => {}
        }
    }
}

pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<GameConfig>()
            .copied()
            .unwrap_or_default()
            .or_default_if_invalid();

        let rng = config
            .rng_seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);

        app.register_type::<GameConfig>()
            .insert_resource(config)
            .insert_resource(Time::<Fixed>::from_hz(config.steps_per_second))
            .insert_resource(ActiveSession(Session::new(config)))
            .insert_resource(PipeRng(rng))
            .init_resource::<ScoreInfo>()
            .add_event::<GameEvent>()
            .add_systems(
                FixedUpdate,
                advance_session.run_if(in_state(AssetState::Loaded)),
            )
            .add_systems(Update, track_score);
    }
}

// Runs at a fixed rate so the per-frame constants hold on any display.
fn advance_session(
    mut session: ResMut<ActiveSession>,
    mut rng: ResMut<PipeRng>,
    mut flap: ResMut<FlapRequested>,
    mut game_events: EventWriter<GameEvent>,
) {
    let flapped = flap.take();
    for event in session.advance(flapped, &mut rng.0) {
        game_events.send(GameEvent(event));
    }
}

fn track_score(mut game_events: EventReader<GameEvent>, mut score_info: ResMut<ScoreInfo>) {
    for event in game_events.read() {
        score_info.apply(**event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_survives_a_reset() {
        let mut score_info = ScoreInfo::default();
        for event in [
            SessionEvent::Started,
            SessionEvent::Scored(1),
            SessionEvent::Scored(2),
            SessionEvent::Crashed,
            SessionEvent::Reset,
            SessionEvent::Scored(1),
        ] {
            score_info.apply(event);
        }
        assert_eq!(
            score_info,
            ScoreInfo {
                current_score: 1,
                high_score: 2,
            },
            "best of both rounds kept"
        );
    }

    #[test]
    fn flap_reaches_the_session_on_the_next_step() {
        let mut app = App::new();
        app.insert_resource(ActiveSession(Session::new(GameConfig::default())))
            .insert_resource(PipeRng(fastrand::Rng::with_seed(1)))
            .insert_resource(FlapRequested(true))
            .init_resource::<ScoreInfo>()
            .add_event::<GameEvent>()
            .add_systems(Update, (advance_session, track_score).chain());

        app.update();

        let session = app.world().resource::<ActiveSession>();
        assert_eq!(
            session.phase(),
            crate::session::Phase::Active,
            "flap started the game"
        );
        assert_eq!(session.pipes().len(), 1, "first pipe spawned");
        assert!(
            !app.world().resource::<FlapRequested>().0,
            "flap consumed"
        );

        let events: Vec<GameEvent> = app
            .world_mut()
            .resource_mut::<Events<GameEvent>>()
            .drain()
            .collect();
        assert_eq!(
            events,
            vec![
                GameEvent(SessionEvent::Started),
                GameEvent(SessionEvent::Flapped)
            ],
            "events forwarded in order"
        );
    }
}
