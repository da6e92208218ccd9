// Allow unwrap, unreadable literals and lossy casts in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
#![cfg_attr(
    test,
    allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::float_cmp)
)]
//! Linguamatch: a Mahjong-solitaire style vocabulary drill.
//!
//! Every word pair is dealt as two tiles, one per language, onto a stacked
//! board. The player moves uncovered tiles into a four-slot buffer; two
//! tiles with the same pair id in the buffer match and leave the board.
//! Filling the buffer without a match loses the round.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Session (progress, feedback)      │
//! ├─────────────────────────────────────┤
//! │   Round (phases, input, animation)  │
//! ├──────────────────┬──────────────────┤
//! │  Board           │  Vocabulary      │
//! │  layout/blocking │  packs/selector  │
//! │  buffer/history  │                  │
//! │  hint/shuffle    │                  │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! The board and round are pure state machines driven by [`Round::tick`];
//! nothing in the library touches a terminal or a clock.

pub mod autoplay;
pub mod board;
pub mod config;
pub mod error;
pub mod progress;
pub mod round;
pub mod vocab;

pub use autoplay::{AutoplayConfig, AutoplayOutcome, AutoplayReport, play_round};
pub use board::{Layout, StagingBuffer, Tile, TileId, TileState};
pub use config::{GameConfig, Timings};
pub use error::{BufferFull, ConfigError, ProgressError, SessionError, VocabError};
pub use progress::{JsonFileStore, MemoryStore, Progress, ProgressState, ProgressStore};
pub use round::{LevelPlan, Phase, Round, RoundEvent, RoundOptions, Session};
pub use vocab::{CefrLevel, Language, PairSelection, TileFace, Vocabulary, WordEntry, WordId};
