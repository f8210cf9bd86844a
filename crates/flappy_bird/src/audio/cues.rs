use core::time::Duration;
use std::collections::HashMap;

use bevy::time::{Timer, TimerMode};
use strum::{EnumIter, IntoStaticStr};

use crate::session::SessionEvent;

/// A named sound. The name is both the audio channel key and the file stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum AudioCue {
    Swoosh,
    Flap,
    Point,
    Final,
}

impl AudioCue {
    pub fn for_event(event: SessionEvent) -> Option<Self> {
        match event {
            SessionEvent::Started => Some(Self::Swoosh),
            SessionEvent::Flapped => Some(Self::Flap),
            SessionEvent::Scored(_) => Some(Self::Point),
            SessionEvent::Crashed => Some(Self::Final),
            SessionEvent::Reset => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn path(self) -> String {
        format!("audio/{}.ogg", self.name())
    }
}

/// Auto-stop timers of the cues that are currently playing.
#[derive(Debug, Default)]
pub struct CueSchedule {
    stops: HashMap<AudioCue, Timer>,
}

impl CueSchedule {
    /// Records a (re)start of `cue`. Any pending stop of the same cue is
    /// dropped, and a new one is armed when `duration` is given.
    pub fn trigger(&mut self, cue: AudioCue, duration: Option<Duration>) {
        self.stops.remove(&cue);
        if let Some(duration) = duration {
            self.stops.insert(cue, Timer::new(duration, TimerMode::Once));
        }
    }

    /// Advances the timers and returns the cues that must stop now.
    pub fn tick(&mut self, delta: Duration) -> Vec<AudioCue> {
        let mut expired = Vec::new();
        self.stops.retain(|cue, timer| {
            timer.tick(delta);
            if timer.finished() {
                expired.push(*cue);
                false
            } else {
                true
            }
        });
        expired
    }

    #[cfg(test)]
    pub fn is_pending(&self, cue: AudioCue) -> bool {
        self.stops.contains_key(&cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAP_STOP: Option<Duration> = Some(Duration::from_millis(2_500));

    #[test]
    fn cue_names_match_the_sound_files() {
        assert_eq!(AudioCue::Swoosh.path(), "audio/swoosh.ogg", "start cue");
        assert_eq!(AudioCue::Final.name(), "final", "crash cue");
    }

    #[test]
    fn every_event_but_reset_has_a_cue() {
        assert_eq!(
            AudioCue::for_event(SessionEvent::Scored(4)),
            Some(AudioCue::Point),
            "score cue"
        );
        assert_eq!(AudioCue::for_event(SessionEvent::Reset), None, "silent reset");
    }

    #[test]
    fn timed_cue_stops_after_its_duration() {
        let mut schedule = CueSchedule::default();
        schedule.trigger(AudioCue::Flap, FLAP_STOP);

        assert!(
            schedule.tick(Duration::from_millis(2_000)).is_empty(),
            "still playing"
        );
        assert_eq!(
            schedule.tick(Duration::from_millis(500)),
            vec![AudioCue::Flap],
            "stopped at 2.5 s"
        );
        assert!(!schedule.is_pending(AudioCue::Flap), "timer dropped");
    }

    #[test]
    fn retrigger_cancels_the_previous_stop() {
        let mut schedule = CueSchedule::default();
        schedule.trigger(AudioCue::Flap, FLAP_STOP);
        schedule.tick(Duration::from_millis(2_000));

        schedule.trigger(AudioCue::Flap, FLAP_STOP);
        assert!(
            schedule.tick(Duration::from_millis(1_000)).is_empty(),
            "old stop cancelled"
        );
        assert_eq!(
            schedule.tick(Duration::from_millis(1_500)),
            vec![AudioCue::Flap],
            "new stop fires 2.5 s after the retrigger"
        );
    }

    #[test]
    fn untimed_cue_is_never_stopped() {
        let mut schedule = CueSchedule::default();
        schedule.trigger(AudioCue::Point, None);
        assert!(!schedule.is_pending(AudioCue::Point), "no timer armed");
        assert!(
            schedule.tick(Duration::from_secs(60)).is_empty(),
            "nothing to stop"
        );
    }

    #[test]
    fn other_cues_keep_their_timers() {
        let mut schedule = CueSchedule::default();
        schedule.trigger(AudioCue::Flap, FLAP_STOP);
        schedule.trigger(AudioCue::Final, None);
        assert!(schedule.is_pending(AudioCue::Flap), "flap stop untouched");
    }
}
