//! Linguamatch CLI - play rounds in the terminal, simulate them and inspect data.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use linguamatch::CefrLevel;
use std::path::PathBuf;
use std::process::ExitCode;

/// Linguamatch - match bilingual word tiles through a four-slot buffer
#[derive(Parser, Debug)]
#[command(name = "linguamatch")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file (default: built-in settings)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in the terminal
    Play {
        /// Directory of vocabulary packs
        #[arg(long)]
        vocab_dir: Option<PathBuf>,

        /// Progress save file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start new words at this level (A1-C2)
        #[arg(short, long)]
        level: Option<CefrLevel>,

        /// Hide the shape and colour markers
        #[arg(long)]
        no_symbols: bool,

        /// Write logs here instead of discarding them
        #[arg(long)]
        log_file: Option<PathBuf>,
    },

    /// Play many rounds with the autoplay bot and aggregate statistics
    Simulate {
        /// Number of rounds to play (default: 1000)
        #[arg(short, long, default_value = "1000")]
        rounds: u64,

        /// Level to deal (default: 6)
        #[arg(short = 'L', long, default_value = "6")]
        level: u32,

        /// Deal words from this pack directory instead of placeholders
        #[arg(long)]
        vocab_dir: Option<PathBuf>,

        /// Starting seed (increments for each round)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Bot decisions per round (default: 2000)
        #[arg(long)]
        max_steps: Option<usize>,

        /// Shuffles the bot may use per round (default: 3)
        #[arg(long)]
        max_shuffles: Option<u32>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the layer layout generated for a pair count
    Layout {
        /// Number of word pairs
        #[arg(short, long)]
        pairs: usize,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Check vocabulary packs for unreadable files and duplicate ids
    Validate {
        /// Directory of vocabulary packs
        #[arg(long)]
        vocab_dir: Option<PathBuf>,
    },

    /// Inspect or edit saved progress
    Progress {
        /// Progress save file
        #[arg(long)]
        save: Option<PathBuf>,

        #[command(subcommand)]
        action: ProgressAction,
    },
}

/// Progress subcommands
#[derive(Subcommand, Debug)]
enum ProgressAction {
    /// Print the saved progress
    Show,
    /// Start over from level 1
    Reset,
    /// Jump to a level
    Jump {
        /// Level to play next (1 or higher)
        level: u32,

        /// Resume point into the vocabulary
        #[arg(short, long)]
        word_index: Option<usize>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = cli::GameConfigArgs::load(args.config.as_deref()).and_then(|config| match args.command {
        Commands::Play {
            vocab_dir,
            save,
            seed,
            level,
            no_symbols,
            log_file,
        } => {
            let config = config
                .with_vocab_dir(vocab_dir)
                .with_save_path(save)
                .with_vocab_level(level)
                .with_symbols(!no_symbols);
            cli::init_logging(log_file.as_deref(), true)?;
            cli::play::execute(config.into_inner(), seed)
        }

        Commands::Simulate {
            rounds,
            level,
            vocab_dir,
            seed,
            threads,
            max_steps,
            max_shuffles,
            format,
            progress,
        } => {
            cli::init_logging(None, false)?;
            let vocab_dir = vocab_dir.or_else(|| config.explicit_vocab_dir());
            cli::simulate::execute(
                &cli::simulate::SimulateArgs {
                    rounds,
                    level,
                    vocab_dir,
                    seed,
                    threads,
                    max_steps,
                    max_shuffles,
                    timings: config.into_inner().timings,
                },
                format,
                progress,
            )
        }

        Commands::Layout { pairs, format } => {
            cli::init_logging(None, false)?;
            cli::layout::execute(pairs, format)
        }

        Commands::Validate { vocab_dir } => {
            cli::init_logging(None, false)?;
            let config = config.with_vocab_dir(vocab_dir).into_inner();
            cli::validate::execute(&config.vocab_dir)
        }

        Commands::Progress { save, action } => {
            cli::init_logging(None, false)?;
            let config = config.with_save_path(save).into_inner();
            match action {
                ProgressAction::Show => cli::progress::show(&config.save_path),
                ProgressAction::Reset => cli::progress::reset(&config.save_path),
                ProgressAction::Jump { level, word_index } => {
                    cli::progress::jump(&config.save_path, level, word_index)
                }
            }
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
