//! Vocabulary for the word tiles.
//!
//! - Word records and CEFR levels
//! - Pack loading from a directory of JSON files
//! - Pair selection mixing new and review words

mod entry;
mod loader;
mod selector;

pub use entry::{CefrLevel, Language, ParseLevelError, WordEntry, WordId};
pub use loader::{PackReport, Vocabulary};
pub use selector::{PairRequest, PairSelection, select_pairs};

/// One side of a word pair, as printed on a single tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileFace {
    /// Identity shared with the other side of the pair.
    pub pair_id: WordId,
    /// Printed text.
    pub text: String,
    /// Language of `text`.
    pub language: Language,
}

impl TileFace {
    /// Create a tile face.
    #[must_use]
    pub fn new(pair_id: impl Into<WordId>, text: impl Into<String>, language: Language) -> Self {
        Self {
            pair_id: pair_id.into(),
            text: text.into(),
            language,
        }
    }
}
