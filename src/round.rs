//! Round controller.
//!
//! - Level plans (pair counts, tutorial layouts)
//! - The per-round state machine
//! - Audio/speech feedback sinks
//! - The session that carries progress from round to round

mod feedback;
mod plan;
mod session;
mod state;

pub use feedback::{Cue, Feedback, NullFeedback, Recording, RecordingFeedback, TracingFeedback};
pub use plan::{LevelPlan, MAX_PLANNED_PAIRS};
pub use session::Session;
pub use state::{Phase, Pointer, Rejection, Round, RoundEvent, RoundOptions, RoundStats, TileView};
