//! Simulate command implementation.

use super::output::{JsonSimulationResult, SimulationStats, format_simulation_csv, format_simulation_text};
use super::{CliError, OutputFormat};
use indicatif::{ProgressBar, ProgressStyle};
use linguamatch::vocab::{PairRequest, select_pairs};
use linguamatch::{
    AutoplayConfig, LevelPlan, PairSelection, Round, RoundOptions, Timings, Vocabulary, play_round,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

/// Parsed arguments of the simulate command.
#[derive(Debug)]
pub(crate) struct SimulateArgs {
    pub(crate) rounds: u64,
    pub(crate) level: u32,
    pub(crate) vocab_dir: Option<PathBuf>,
    pub(crate) seed: Option<u64>,
    pub(crate) threads: Option<usize>,
    pub(crate) max_steps: Option<usize>,
    pub(crate) max_shuffles: Option<u32>,
    pub(crate) timings: Timings,
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error for level 0, an empty pack directory or a JSON failure.
pub(crate) fn execute(args: &SimulateArgs, format: OutputFormat, progress: bool) -> Result<(), CliError> {
    if args.level == 0 {
        return Err(CliError::new("level must be 1 or higher"));
    }

    let vocab = match &args.vocab_dir {
        Some(dir) => {
            let vocab = Vocabulary::load_dir(dir);
            if vocab.is_empty() {
                return Err(CliError::new(format!("No words found in {}", dir.display())));
            }
            Some(vocab)
        }
        None => None,
    };

    // Set thread pool size if specified
    if let Some(num_threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = args.seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(42)
    });

    let plan = LevelPlan::for_level(args.level);
    let defaults = AutoplayConfig::default();
    let bot = AutoplayConfig {
        max_steps: args.max_steps.unwrap_or(defaults.max_steps),
        max_shuffles: args.max_shuffles.unwrap_or(defaults.max_shuffles),
        ..defaults
    };
    let timings = args.timings.instant_intro();

    let pb = if progress {
        let pb = ProgressBar::new(args.rounds);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} rounds ({per_sec})")
            .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
            .progress_chars("=>-");
        pb.set_style(style);
        Some(pb)
    } else {
        None
    };

    tracing::info!(rounds = args.rounds, level = args.level, base_seed, "simulation started");
    let start = Instant::now();

    // Each thread accumulates into its own stats, merged at the end
    let stats = (0..args.rounds)
        .into_par_iter()
        .fold(SimulationStats::new, |mut local_stats, i| {
            let seed = base_seed.wrapping_add(i);
            let selection = match &vocab {
                Some(vocab) => deal_from(vocab, &plan, seed),
                None => PairSelection::placeholders(plan.pair_count),
            };
            let options = RoundOptions {
                show_symbols: false,
                timings,
                seed: Some(seed),
            };
            let mut round = Round::new(&plan, selection, options);
            let report = play_round(&mut round, &bot);
            local_stats.add_result(&report);
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(SimulationStats::new, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let rounds_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.rounds_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        OutputFormat::Text => {
            println!();
            print!("{}", format_simulation_text(args.level, &stats));
            println!();
            println!("Duration: {:.2}s ({:.0} rounds/sec)", duration.as_secs_f64(), rounds_per_sec);
        }
        OutputFormat::Json => {
            let json_result = JsonSimulationResult::from_stats(args.level, &stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        OutputFormat::Csv => {
            print!("{}", format_simulation_csv(args.level, &stats));
        }
    }

    Ok(())
}

/// Deal a fresh selection from the start of the vocabulary.
fn deal_from(vocab: &Vocabulary, plan: &LevelPlan, seed: u64) -> PairSelection {
    let used = HashSet::new();
    let request = PairRequest {
        count: plan.pair_count,
        start_index: 0,
        review_count: plan.review_count,
        used_ids: &used,
        start_level: None,
    };
    select_pairs(vocab, &request, &mut SmallRng::seed_from_u64(seed))
}
