//! The game session: world state plus the phase machine that gates it.
//!
//! Nothing here touches the ECS, the clock or any device. The driver feeds one
//! flap flag per step and reads back the [`SessionEvent`]s the step produced.

mod physics;
pub mod random;

use strum::Display;
use tracing::info;

use crate::config::GameConfig;
use random::HeightSource;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Display)]
pub enum Phase {
    #[default]
    AwaitingStart,
    Active,
    Ended,
}

/// Something the outside world may want to react to, mostly with a sound or a
/// display update.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SessionEvent {
    Started,
    Flapped,
    /// Carries the new score.
    Scored(u32),
    Crashed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f32,
    pub y: f32,
    pub velocity: f32,
    pub width: f32,
    pub height: f32,
    /// Index of the current wing animation frame.
    pub frame: u8,
}

impl Bird {
    fn new(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_y,
            velocity: 0.0,
            width: config.bird_width,
            height: config.bird_height,
            frame: 0,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// A pair of pipes with an open gap between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f32,
    /// Height of the top segment, which is also the y of the gap's top edge.
    pub top_height: f32,
    pub gap: f32,
    pub width: f32,
    pub passed: bool,
}

impl Pipe {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub const fn gap_top(&self) -> f32 {
        self.top_height
    }

    pub fn gap_bottom(&self) -> f32 {
        self.top_height + self.gap
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    config: GameConfig,
    phase: Phase,
    bird: Bird,
    pipes: Vec<Pipe>,
    frame_count: u64,
    score: u32,
    /// Distance the ground has scrolled, always in `[0, ground_tile_width)`.
    ground_offset: f32,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            phase: Phase::AwaitingStart,
            bird: Bird::new(&config),
            pipes: Vec::new(),
            frame_count: 0,
            score: 0,
            ground_offset: 0.0,
        }
    }

    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn bird(&self) -> &Bird {
        &self.bird
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub const fn score(&self) -> u32 {
        self.score
    }

    pub const fn ground_offset(&self) -> f32 {
        self.ground_offset
    }

    /// Handles one flap input according to the current phase.
    ///
    /// The flap that starts a game also gives the bird its first impulse.
    pub fn flap(&mut self) -> Vec<SessionEvent> {
        match self.phase {
            Phase::AwaitingStart => {
                self.set_phase(Phase::Active);
                let mut events = vec![SessionEvent::Started];
                events.extend(self.flap());
                events
            }
            Phase::Active => {
                self.bird.velocity = self.config.jump_velocity;
                vec![SessionEvent::Flapped]
            }
            Phase::Ended => {
                self.reset();
                vec![SessionEvent::Reset]
            }
        }
    }

    /// Puts the session back to its initial state. The ground keeps its
    /// scroll position so the restart is seamless.
    pub fn reset(&mut self) {
        info!("Restarting session, final score {}", self.score);
        self.bird = Bird::new(&self.config);
        self.pipes.clear();
        self.frame_count = 0;
        self.score = 0;
        self.set_phase(Phase::AwaitingStart);
    }

    /// One display frame: the optional flap first, then the world step.
    pub fn advance(&mut self, flapped: bool, heights: &mut impl HeightSource) -> Vec<SessionEvent> {
        let mut events = if flapped { self.flap() } else { Vec::new() };
        events.extend(self.step(heights));
        events
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            info!("Session phase {} -> {phase}", self.phase);
            self.phase = phase;
        }
    }
}
