//! A simple bot that plays a round through its public actions.
//!
//! Used by the `simulate` command, the integration tests, the benches and
//! the fuzz targets. The policy is greedy and deterministic for a given
//! round:
//!
//! 1. Finish a pair whose other half is already buffered.
//! 2. Play a hinted pair when two slots are free.
//! 3. Shuffle, a bounded number of times.
//! 4. Pick any selectable tile when two slots are free.
//! 5. Undo once.
//! 6. Give up.

use serde::Serialize;

use crate::board::{TileId, find_hint};
use crate::round::{Phase, Round, RoundStats};

/// How a bot run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoplayOutcome {
    /// The round was won.
    Won,
    /// The buffer filled up.
    Lost,
    /// No move was left.
    Stalled,
    /// The step bound was reached.
    StepLimit,
}

/// Bot limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoplayConfig {
    /// Decisions made at most.
    pub max_steps: usize,
    /// Shuffles used at most.
    pub max_shuffles: u32,
    /// Simulated frame time.
    pub dt: f32,
    /// Ticks allowed to let animations settle after each decision.
    pub settle_ticks: usize,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            max_steps: 2_000,
            max_shuffles: 3,
            dt: 1.0 / 60.0,
            settle_ticks: 600,
        }
    }
}

/// Summary of a bot run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AutoplayReport {
    /// How it ended.
    pub outcome: AutoplayOutcome,
    /// Decisions made.
    pub steps: usize,
    /// Tiles left unmatched.
    pub remaining_tiles: usize,
    /// The round's move counters.
    pub stats: RoundStats,
}

/// One bot decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Decision {
    Select(TileId),
    SelectPair(TileId, TileId),
    Shuffle,
    Undo,
}

/// Play `round` until it ends or the bot runs out of ideas.
pub fn play_round(round: &mut Round, config: &AutoplayConfig) -> AutoplayReport {
    round.skip_intro();
    if round.phase() == Phase::Paused {
        round.resume();
    }

    let mut shuffles = 0;
    let mut undone = false;
    let mut steps = 0;

    let outcome = loop {
        round.settle(config.dt, config.settle_ticks);
        match round.phase() {
            Phase::Won => break AutoplayOutcome::Won,
            Phase::Lost => break AutoplayOutcome::Lost,
            Phase::Intro | Phase::Playing | Phase::Paused => {}
        }
        if steps >= config.max_steps {
            break AutoplayOutcome::StepLimit;
        }

        let can_shuffle = shuffles < config.max_shuffles;
        let Some(decision) = decide(round, can_shuffle, !undone) else {
            break AutoplayOutcome::Stalled;
        };
        steps += 1;

        match decision {
            Decision::Select(id) => place(round, id),
            Decision::SelectPair(a, b) => {
                place(round, a);
                place(round, b);
            }
            Decision::Shuffle => {
                round.shuffle();
                shuffles += 1;
            }
            Decision::Undo => {
                round.undo();
                undone = true;
            }
        }
    };

    tracing::debug!(?outcome, steps, level = round.level(), "autoplay finished");

    AutoplayReport {
        outcome,
        steps,
        remaining_tiles: round.remaining_tiles(),
        stats: round.stats(),
    }
}

/// Select a tile the policy believes is placeable; a refusal means the policy is wrong.
fn place(round: &mut Round, id: TileId) {
    if let Err(rejection) = round.select(id) {
        tracing::warn!(?rejection, tile = ?id, level = round.level(), "autoplay move rejected");
    }
}

fn decide(round: &Round, can_shuffle: bool, can_undo: bool) -> Option<Decision> {
    let tiles = round.tiles();
    let buffer = round.buffer();

    for (_, buffered) in buffer.iter() {
        let pair_id = tiles[buffered.index()].pair_id();
        if let Some(idx) = tiles
            .iter()
            .position(|t| t.is_selectable() && t.pair_id() == pair_id)
        {
            return Some(Decision::Select(TileId(idx)));
        }
    }

    let two_free = buffer.free() >= 2;
    if two_free {
        if let Some((a, b)) = find_hint(tiles) {
            return Some(Decision::SelectPair(a, b));
        }
    }

    if can_shuffle && tiles.iter().any(|t| t.is_on_board()) {
        return Some(Decision::Shuffle);
    }

    if two_free {
        if let Some(idx) = tiles.iter().position(|t| t.is_selectable()) {
            return Some(Decision::Select(TileId(idx)));
        }
    }

    if can_undo && !buffer.is_empty() {
        return Some(Decision::Undo);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::{LevelPlan, RoundOptions};
    use crate::vocab::PairSelection;

    fn round(plan: &LevelPlan, seed: u64) -> Round {
        let options = RoundOptions {
            seed: Some(seed),
            ..RoundOptions::default()
        };
        Round::new(plan, PairSelection::placeholders(plan.pair_count), options)
    }

    #[test]
    fn test_tutorial_levels_are_won() {
        for level in [1, 2] {
            let plan = LevelPlan::for_level(level);
            let mut r = round(&plan, 1);
            let report = play_round(&mut r, &AutoplayConfig::default());
            assert_eq!(report.outcome, AutoplayOutcome::Won, "level {level}");
            assert_eq!(report.remaining_tiles, 0);
            assert_eq!(report.stats.matches as usize, plan.pair_count);
        }
    }

    #[test]
    fn test_generated_level_terminates() {
        let plan = LevelPlan::for_level(6);
        let mut r = round(&plan, 7);
        let config = AutoplayConfig {
            max_steps: 500,
            ..AutoplayConfig::default()
        };
        let report = play_round(&mut r, &config);
        assert!(report.steps <= 500);
        assert!(report.stats.shuffles <= config.max_shuffles);
        if report.outcome == AutoplayOutcome::Won {
            assert_eq!(report.remaining_tiles, 0);
        }
    }

    #[test]
    fn test_policy_never_makes_a_refused_move() {
        let config = AutoplayConfig {
            max_steps: 400,
            ..AutoplayConfig::default()
        };
        for level in 1..=8 {
            for seed in 0..4 {
                let plan = LevelPlan::for_level(level);
                let mut r = round(&plan, seed);
                let report = play_round(&mut r, &config);
                assert_eq!(report.stats.rejected, 0, "level {level} seed {seed}");
            }
        }
    }
}
