//! Output formatting utilities for CLI.

// Counters are converted to f64 only for averages.
#![allow(clippy::cast_precision_loss)]

use linguamatch::{AutoplayOutcome, AutoplayReport, Layout};
use serde::Serialize;
use std::fmt::Write as _;

/// Simulation statistics aggregated over many rounds.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct SimulationStats {
    /// Total rounds played.
    pub(super) rounds_played: u64,
    /// Rounds won.
    pub(super) wins: u64,
    /// Rounds lost to a full buffer.
    pub(super) losses: u64,
    /// Rounds where the bot had no move left.
    pub(super) stalls: u64,
    /// Rounds cut off by the step bound.
    pub(super) step_limits: u64,
    total_steps: u64,
    total_remaining: u64,
    remaining_sq_sum: f64,
    total_matches: u64,
    total_shuffles: u64,
    total_undos: u64,
    total_rejected: u64,
}

impl SimulationStats {
    /// Create empty stats.
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Add a round report to the stats.
    pub(super) fn add_result(&mut self, report: &AutoplayReport) {
        self.rounds_played += 1;
        match report.outcome {
            AutoplayOutcome::Won => self.wins += 1,
            AutoplayOutcome::Lost => self.losses += 1,
            AutoplayOutcome::Stalled => self.stalls += 1,
            AutoplayOutcome::StepLimit => self.step_limits += 1,
        }
        let remaining = report.remaining_tiles as u64;
        self.total_steps += report.steps as u64;
        self.total_remaining += remaining;
        self.remaining_sq_sum += (remaining * remaining) as f64;
        self.total_matches += u64::from(report.stats.matches);
        self.total_shuffles += u64::from(report.stats.shuffles);
        self.total_undos += u64::from(report.stats.undos);
        self.total_rejected += u64::from(report.stats.rejected);
    }

    /// Fold another thread's stats into these.
    pub(super) fn merge(&mut self, other: &Self) {
        self.rounds_played += other.rounds_played;
        self.wins += other.wins;
        self.losses += other.losses;
        self.stalls += other.stalls;
        self.step_limits += other.step_limits;
        self.total_steps += other.total_steps;
        self.total_remaining += other.total_remaining;
        self.remaining_sq_sum += other.remaining_sq_sum;
        self.total_matches += other.total_matches;
        self.total_shuffles += other.total_shuffles;
        self.total_undos += other.total_undos;
        self.total_rejected += other.total_rejected;
    }

    fn per_round(&self, total: u64) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        total as f64 / self.rounds_played as f64
    }

    /// Share of rounds that ended with `outcome` (0.0-1.0).
    pub(super) fn rate(&self, outcome: AutoplayOutcome) -> f64 {
        let count = match outcome {
            AutoplayOutcome::Won => self.wins,
            AutoplayOutcome::Lost => self.losses,
            AutoplayOutcome::Stalled => self.stalls,
            AutoplayOutcome::StepLimit => self.step_limits,
        };
        self.per_round(count)
    }

    pub(super) fn avg_steps(&self) -> f64 {
        self.per_round(self.total_steps)
    }

    pub(super) fn avg_remaining(&self) -> f64 {
        self.per_round(self.total_remaining)
    }

    /// Standard deviation of tiles left per round.
    pub(super) fn remaining_std_dev(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        let mean = self.avg_remaining();
        let variance = self.remaining_sq_sum / self.rounds_played as f64 - mean * mean;
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    pub(super) fn avg_matches(&self) -> f64 {
        self.per_round(self.total_matches)
    }

    pub(super) fn avg_shuffles(&self) -> f64 {
        self.per_round(self.total_shuffles)
    }

    pub(super) fn avg_undos(&self) -> f64 {
        self.per_round(self.total_undos)
    }

    pub(super) fn avg_rejected(&self) -> f64 {
        self.per_round(self.total_rejected)
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    level: u32,
    rounds_played: u64,
    wins: u64,
    losses: u64,
    stalls: u64,
    step_limits: u64,
    win_rate: f64,
    avg_steps: f64,
    avg_remaining_tiles: f64,
    remaining_tiles_std_dev: f64,
    avg_matches: f64,
    avg_shuffles: f64,
    avg_undos: f64,
    avg_rejected: f64,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(level: u32, stats: &SimulationStats) -> Self {
        Self {
            level,
            rounds_played: stats.rounds_played,
            wins: stats.wins,
            losses: stats.losses,
            stalls: stats.stalls,
            step_limits: stats.step_limits,
            win_rate: stats.rate(AutoplayOutcome::Won),
            avg_steps: stats.avg_steps(),
            avg_remaining_tiles: stats.avg_remaining(),
            remaining_tiles_std_dev: stats.remaining_std_dev(),
            avg_matches: stats.avg_matches(),
            avg_shuffles: stats.avg_shuffles(),
            avg_undos: stats.avg_undos(),
            avg_rejected: stats.avg_rejected(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(level: u32, stats: &SimulationStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Simulation Results (level {level}, {} rounds)", stats.rounds_played);
    output.push_str("========================================\n\n");

    output.push_str("Outcomes:\n");
    for (name, outcome, count) in [
        ("Won", AutoplayOutcome::Won, stats.wins),
        ("Lost", AutoplayOutcome::Lost, stats.losses),
        ("Stalled", AutoplayOutcome::Stalled, stats.stalls),
        ("Step limit", AutoplayOutcome::StepLimit, stats.step_limits),
    ] {
        let _ = writeln!(output, "  {name:<11} {:>5.1}% ({count})", stats.rate(outcome) * 100.0);
    }

    output.push_str("\nPer Round:\n");
    let _ = writeln!(output, "  Decisions:  {:.1}", stats.avg_steps());
    let _ = writeln!(
        output,
        "  Tiles left: {:.1} (+/- {:.1})",
        stats.avg_remaining(),
        stats.remaining_std_dev()
    );
    let _ = writeln!(output, "  Matches:    {:.1}", stats.avg_matches());
    let _ = writeln!(output, "  Shuffles:   {:.2}", stats.avg_shuffles());
    let _ = writeln!(output, "  Undos:      {:.2}", stats.avg_undos());
    let _ = writeln!(output, "  Rejected:   {:.2}", stats.avg_rejected());

    output
}

/// Format simulation stats as a single CSV row with header.
pub(super) fn format_simulation_csv(level: u32, stats: &SimulationStats) -> String {
    let mut output = String::new();

    output.push_str("level,rounds,wins,losses,stalls,step_limits,win_rate,avg_steps,avg_remaining,remaining_std_dev\n");
    let _ = writeln!(
        output,
        "{level},{},{},{},{},{},{:.4},{:.2},{:.2},{:.2}",
        stats.rounds_played,
        stats.wins,
        stats.losses,
        stats.stalls,
        stats.step_limits,
        stats.rate(AutoplayOutcome::Won),
        stats.avg_steps(),
        stats.avg_remaining(),
        stats.remaining_std_dev()
    );

    output
}

/// JSON-serializable layout.
#[derive(Debug, Serialize)]
pub(super) struct JsonLayout {
    pairs: usize,
    tiles: usize,
    capacity: usize,
    layers: Vec<JsonLayer>,
}

/// JSON-serializable layer spec.
#[derive(Debug, Serialize)]
pub(super) struct JsonLayer {
    layer: usize,
    rows: u32,
    cols: u32,
    capacity: usize,
}

impl JsonLayout {
    pub(super) fn new(pairs: usize, layout: &Layout) -> Self {
        Self {
            pairs,
            tiles: pairs * 2,
            capacity: layout.capacity(),
            layers: layout
                .layers()
                .iter()
                .enumerate()
                .map(|(layer, spec)| JsonLayer {
                    layer,
                    rows: spec.rows,
                    cols: spec.cols,
                    capacity: spec.capacity(),
                })
                .collect(),
        }
    }
}

/// Format a layout as text, one line per layer plus a coarse grid sketch.
pub(super) fn format_layout_text(pairs: usize, layout: &Layout) -> String {
    let mut output = String::new();
    let tiles = pairs * 2;

    let _ = writeln!(output, "Layout for {pairs} pairs ({tiles} tiles)");
    for (i, spec) in layout.layers().iter().enumerate() {
        let _ = writeln!(
            output,
            "  Layer {i}: {} x {} ({} slots)",
            spec.rows,
            spec.cols,
            spec.capacity()
        );
    }
    let _ = writeln!(output, "  Capacity: {}", layout.capacity());
    if layout.capacity() < tiles {
        let _ = writeln!(output, "  Warning: {} tiles will not be placed", tiles - layout.capacity());
    }

    if let Some(base) = layout.layers().first() {
        output.push('\n');
        for _ in 0..base.rows {
            output.push_str("  ");
            output.push_str(&"[]".repeat(base.cols as usize));
            output.push('\n');
        }
    }

    output
}

/// Format a layout as CSV.
pub(super) fn format_layout_csv(layout: &Layout) -> String {
    let mut output = String::from("layer,rows,cols,capacity\n");
    for (i, spec) in layout.layers().iter().enumerate() {
        let _ = writeln!(output, "{i},{},{},{}", spec.rows, spec.cols, spec.capacity());
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use linguamatch::round::RoundStats;

    fn report(outcome: AutoplayOutcome, remaining: usize) -> AutoplayReport {
        AutoplayReport {
            outcome,
            steps: 10,
            remaining_tiles: remaining,
            stats: RoundStats::default(),
        }
    }

    #[test]
    fn test_merge_matches_sequential_adds() {
        let reports = [
            report(AutoplayOutcome::Won, 0),
            report(AutoplayOutcome::Lost, 6),
            report(AutoplayOutcome::Stalled, 4),
        ];

        let mut all = SimulationStats::new();
        for r in &reports {
            all.add_result(r);
        }

        let mut left = SimulationStats::new();
        left.add_result(&reports[0]);
        let mut right = SimulationStats::new();
        right.add_result(&reports[1]);
        right.add_result(&reports[2]);
        left.merge(&right);

        assert_eq!(left, all);
        assert_eq!(all.rounds_played, 3);
        assert!((all.avg_remaining() - 10.0 / 3.0).abs() < 1e-9);
        assert!((all.rate(AutoplayOutcome::Won) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = SimulationStats::new();
        assert!(stats.avg_steps().abs() < f64::EPSILON);
        assert!(stats.remaining_std_dev().abs() < f64::EPSILON);
    }

    #[test]
    fn test_layout_csv_has_row_per_layer() {
        let layout = Layout::generate(40);
        let csv = format_layout_csv(&layout);
        assert_eq!(csv.lines().count(), layout.layers().len() + 1);
        assert!(csv.starts_with("layer,rows,cols,capacity"));
    }
}
