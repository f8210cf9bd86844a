/// Source of the pipe heights, the only randomness in the game.
pub trait HeightSource {
    /// Returns a height in `min..=max`.
    fn next_height(&mut self, min: u32, max: u32) -> u32;
}

impl HeightSource for fastrand::Rng {
    fn next_height(&mut self, min: u32, max: u32) -> u32 {
        self.u32(min..=max.max(min))
    }
}

/// Replays a fixed list of heights in a loop, clamped to the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedHeights {
    heights: Vec<u32>,
    draws: usize,
}

impl ScriptedHeights {
    pub fn new(heights: impl IntoIterator<Item = u32>) -> Self {
        Self {
            heights: heights.into_iter().collect(),
            draws: 0,
        }
    }

    /// Number of heights handed out so far.
    pub const fn draws(&self) -> usize {
        self.draws
    }
}

impl HeightSource for ScriptedHeights {
    fn next_height(&mut self, min: u32, max: u32) -> u32 {
        let height = match self.heights.len() {
            0 => min,
            len => self.heights.get(self.draws % len).copied().unwrap_or(min),
        };
        self.draws += 1;
        height.clamp(min, max.max(min))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::session::{Phase, Session};

    #[test]
    fn random_heights_stay_within_bounds() {
        let config = GameConfig::default();
        let (min, max) = (config.min_pipe_height, config.max_pipe_height());
        let (mut saw_min, mut saw_max) = (false, false);

        for seed in 0..64 {
            let mut rng = fastrand::Rng::with_seed(seed);
            for _ in 0..1_000 {
                let height = rng.next_height(min, max);
                assert!((min..=max).contains(&height), "{height} out of range");
                saw_min |= height == min;
                saw_max |= height == max;
            }
        }

        assert!(saw_min, "lower bound is reachable");
        assert!(saw_max, "upper bound is reachable");
    }

    #[test]
    fn spawned_pipes_leave_room_for_both_segments() {
        let config = GameConfig::default();
        for seed in 0..200 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mut session = Session::new(config);
            session.flap();
            session.step(&mut rng);

            let pipe = session.pipes().first().copied();
            assert!(pipe.is_some(), "first step spawns a pipe");
            let Some(pipe) = pipe else { continue };
            let bottom_segment = config.ground_y() - pipe.gap_bottom();
            assert!(pipe.top_height >= 50.0, "top segment too short: {pipe:?}");
            assert!(bottom_segment >= 50.0, "bottom segment too short: {pipe:?}");
            assert_eq!(session.phase(), Phase::Active, "still playing");
        }
    }

    #[test]
    fn same_seed_same_pipes() {
        let heights = |seed| {
            let mut rng = fastrand::Rng::with_seed(seed);
            (0..20).map(|_| rng.next_height(50, 218)).collect::<Vec<_>>()
        };
        assert_eq!(heights(7), heights(7), "seeded source is deterministic");
    }

    #[test]
    fn scripted_heights_repeat_and_clamp() {
        let mut heights = ScriptedHeights::new([10, 100, 500]);
        let drawn: Vec<u32> = (0..4).map(|_| heights.next_height(50, 218)).collect();
        assert_eq!(drawn, vec![50, 100, 218, 50], "clamped and cycled");
        assert_eq!(heights.draws(), 4, "draw counter");
    }
}
