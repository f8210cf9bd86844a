use tracing::{debug, info};

use super::random::HeightSource;
use super::{Bird, Phase, Pipe, Session, SessionEvent};

impl Session {
    /// Advances the world by one frame.
    ///
    /// Only the ground moves while waiting for the first flap, and nothing
    /// moves once the session has ended.
    pub fn step(&mut self, heights: &mut impl HeightSource) -> Vec<SessionEvent> {
        let mut events = Vec::new();

        if self.phase == Phase::Active {
            self.step_active(heights, &mut events);
        }

        if self.phase != Phase::Ended {
            self.ground_offset =
                (self.ground_offset + self.config.scroll_speed).rem_euclid(self.config.ground_tile_width);
        }

        events
    }

    fn step_active(&mut self, heights: &mut impl HeightSource, events: &mut Vec<SessionEvent>) {
        let config = self.config;

        // Gravity goes into the velocity before the velocity moves the bird.
        self.bird.velocity += config.gravity;
        self.bird.y += self.bird.velocity;

        if self.frame_count % u64::from(config.animation_cadence) == 0 {
            self.bird.frame = (self.bird.frame + 1) % config.animation_frames;
        }

        if self.frame_count % u64::from(config.pipe_spawn_rate) == 0 {
            self.spawn_pipe(heights);
        }

        let bird = self.bird;
        let mut crashed = false;
        let score = &mut self.score;
        self.pipes.retain_mut(|pipe| {
            pipe.x -= config.scroll_speed;

            if hits(&bird, pipe) {
                crashed = true;
            }

            if !pipe.passed && bird.x > pipe.right() {
                pipe.passed = true;
                *score += 1;
                debug!("Passed a pipe, score {score}");
                events.push(SessionEvent::Scored(*score));
            }

            pipe.right() >= 0.0
        });

        if bird.bottom() > config.ground_y() {
            crashed = true;
        }

        self.frame_count += 1;

        if crashed {
            info!("Bird crashed at frame {}", self.frame_count);
            self.set_phase(Phase::Ended);
            events.push(SessionEvent::Crashed);
        }
    }

    fn spawn_pipe(&mut self, heights: &mut impl HeightSource) {
        let min = self.config.min_pipe_height;
        let max = self.config.max_pipe_height().max(min);
        let top_height = heights.next_height(min, max);
        debug!("Spawning pipe with top height {top_height}");

        self.pipes.push(Pipe {
            x: self.config.canvas_width,
            top_height: top_height as f32,
            gap: self.config.pipe_gap,
            width: self.config.pipe_width,
            passed: false,
        });
    }
}

/// The bird hits a pipe when it overlaps the pipe's columns without being
/// entirely inside the gap.
pub fn hits(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_columns = bird.right() > pipe.x && bird.x < pipe.right();
    let outside_gap = bird.y < pipe.gap_top() || bird.bottom() > pipe.gap_bottom();
    overlaps_columns && outside_gap
}
