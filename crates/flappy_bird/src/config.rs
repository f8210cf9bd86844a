use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every tuning constant of the game. Distances are canvas pixels, speeds are
/// pixels per step, the origin is the top-left corner of the canvas.
#[derive(Resource, Reflect, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub background_height: f32,
    pub gravity: f32,
    /// Vertical velocity a flap sets, negative is upward.
    pub jump_velocity: f32,
    /// Horizontal speed shared by the pipes and the ground.
    pub scroll_speed: f32,
    /// A pipe is spawned every `pipe_spawn_rate` active steps.
    pub pipe_spawn_rate: u32,
    pub pipe_gap: f32,
    pub pipe_width: f32,
    /// Length of the pipe image, drawn once per segment.
    pub pipe_length: f32,
    /// Smallest height either segment of a pipe may have.
    pub min_pipe_height: u32,
    pub ground_height: f32,
    pub ground_tile_width: f32,
    pub bird_x: f32,
    /// Starting height of the bird, also used after a restart.
    pub bird_y: f32,
    pub bird_width: f32,
    pub bird_height: f32,
    /// The bird animation advances every `animation_cadence` active steps.
    pub animation_cadence: u32,
    pub animation_frames: u8,
    pub flap_cue_secs: f32,
    pub steps_per_second: f64,
    /// Fixed seed for the pipe heights, random when `None`.
    pub rng_seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 320.0,
            canvas_height: 480.0,
            background_height: 512.0,
            gravity: 0.25,
            jump_velocity: -4.5,
            scroll_speed: 2.0,
            pipe_spawn_rate: 100,
            pipe_gap: 100.0,
            pipe_width: 52.0,
            pipe_length: 320.0,
            min_pipe_height: 50,
            ground_height: 112.0,
            ground_tile_width: 336.0,
            bird_x: 50.0,
            bird_y: 150.0,
            bird_width: 50.0,
            bird_height: 50.0,
            animation_cadence: 5,
            animation_frames: 3,
            flap_cue_secs: 2.5,
            steps_per_second: 60.0,
            rng_seed: None,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be zero")]
    ZeroRate { field: &'static str },

    #[error("pipe heights do not fit the canvas: min {min} > max {max}")]
    SpawnBounds { min: i64, max: i64 },
}

impl GameConfig {
    /// Y coordinate of the top of the ground. The bird dies when its bottom
    /// edge goes past it.
    pub fn ground_y(&self) -> f32 {
        self.canvas_height - self.ground_height
    }

    /// Tallest top segment that still leaves `min_pipe_height` for the
    /// bottom segment.
    pub fn max_pipe_height(&self) -> u32 {
        self.max_pipe_height_signed().max(0) as u32
    }

    fn max_pipe_height_signed(&self) -> i64 {
        (self.ground_y() - self.pipe_gap - self.min_pipe_height as f32).floor() as i64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("pipe_gap", self.pipe_gap),
            ("pipe_width", self.pipe_width),
            ("pipe_length", self.pipe_length),
            ("ground_tile_width", self.ground_tile_width),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: value.into(),
                });
            }
        }
        if self.steps_per_second <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "steps_per_second",
                value: self.steps_per_second,
            });
        }

        if self.pipe_spawn_rate == 0 {
            return Err(ConfigError::ZeroRate {
                field: "pipe_spawn_rate",
            });
        }
        if self.animation_cadence == 0 {
            return Err(ConfigError::ZeroRate {
                field: "animation_cadence",
            });
        }
        if self.animation_frames == 0 {
            return Err(ConfigError::ZeroRate {
                field: "animation_frames",
            });
        }

        let min = i64::from(self.min_pipe_height);
        let max = self.max_pipe_height_signed();
        if max < min {
            return Err(ConfigError::SpawnBounds { min, max });
        }

        Ok(())
    }

    /// Returns `self` when valid, otherwise logs the problem and falls back to
    /// the defaults.
    pub fn or_default_if_invalid(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                error!("Invalid game configuration, using defaults: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()), "default config");
    }

    #[test]
    fn derived_heights_match_the_canvas_layout() {
        let config = GameConfig::default();
        assert_eq!(config.ground_y(), 368.0, "ground line");
        assert_eq!(config.max_pipe_height(), 218, "tallest top segment");
    }

    #[test]
    fn gap_too_large_for_canvas_is_rejected() {
        let config = GameConfig {
            pipe_gap: 400.0,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SpawnBounds { min: 50, max: -82 }),
            "no room for both segments"
        );
        assert_eq!(config.max_pipe_height(), 0, "clamped to zero");
    }

    #[test]
    fn zero_spawn_rate_is_rejected() {
        let config = GameConfig {
            pipe_spawn_rate: 0,
            ..default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroRate {
                field: "pipe_spawn_rate"
            }),
            "spawn rate"
        );
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let config = GameConfig {
            pipe_width: -1.0,
            ..default()
        };
        assert_eq!(
            config.or_default_if_invalid(),
            GameConfig::default(),
            "fallback"
        );
    }
}
