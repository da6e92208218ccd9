//! Choosing the words for a round.
//!
//! New words are taken in vocabulary order from the learner's resume point.
//! When that runs short the rest of the vocabulary is scanned from the start,
//! so a round is only smaller than requested when every unused word is
//! already on the board.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::vocab::TileFace;
use crate::vocab::entry::{CefrLevel, Language, WordEntry, WordId};
use crate::vocab::loader::Vocabulary;

/// Parameters for [`select_pairs`].
#[derive(Debug, Clone, Copy)]
pub struct PairRequest<'a> {
    /// Number of word pairs wanted.
    pub count: usize,
    /// Resume point into the level-sorted vocabulary.
    pub start_index: usize,
    /// How many of `count` may be review words.
    pub review_count: usize,
    /// Ids that must not be dealt again.
    pub used_ids: &'a HashSet<WordId>,
    /// Skip forward to this level before collecting new words.
    pub start_level: Option<CefrLevel>,
}

/// Words chosen for a round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairSelection {
    /// Two faces per chosen word, shuffled.
    pub pairs: Vec<TileFace>,
    /// Number of distinct words chosen.
    pub new_word_count: usize,
    /// Ids of the chosen words, in selection order.
    pub new_ids: Vec<WordId>,
}

impl PairSelection {
    /// Whether no words were chosen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `count` made-up words `w0`, `w1`, ... in dealing order.
    ///
    /// For simulations and tests that need a board but no vocabulary.
    #[must_use]
    pub fn placeholders(count: usize) -> Self {
        let new_ids: Vec<WordId> = (0..count).map(|i| WordId::new(format!("w{i}"))).collect();
        let pairs = new_ids
            .iter()
            .enumerate()
            .flat_map(|(i, id)| {
                [
                    TileFace::new(id.clone(), format!("en{i}"), Language::English),
                    TileFace::new(id.clone(), format!("tr{i}"), Language::Turkish),
                ]
            })
            .collect();
        Self {
            pairs,
            new_word_count: count,
            new_ids,
        }
    }
}

/// Select word pairs for a round and shuffle their faces.
///
/// Never returns an id from `used_ids`, and never the same id twice.
pub fn select_pairs<R: Rng + ?Sized>(
    vocab: &Vocabulary,
    request: &PairRequest<'_>,
    rng: &mut R,
) -> PairSelection {
    let entries = vocab.entries();
    if entries.is_empty() || request.count == 0 {
        return PairSelection::default();
    }

    let new_needed = request.count.saturating_sub(request.review_count);
    let floor = request.start_level.map_or(0, |level| vocab.first_index_at(level));
    let start = request.start_index.max(floor).min(entries.len());

    let mut taken: HashSet<&WordId> = request.used_ids.iter().collect();
    let mut selected: Vec<&WordEntry> = Vec::with_capacity(request.count);

    for entry in &entries[start..] {
        if selected.len() >= new_needed {
            break;
        }
        if taken.insert(&entry.id) {
            selected.push(entry);
        }
    }

    if selected.len() < request.count {
        for entry in entries {
            if selected.len() >= request.count {
                break;
            }
            if taken.insert(&entry.id) {
                selected.push(entry);
            }
        }
    }

    let mut pairs: Vec<TileFace> = selected
        .iter()
        .flat_map(|entry| {
            [Language::English, Language::Turkish]
                .map(|lang| TileFace::new(entry.id.clone(), entry.text(lang), lang))
        })
        .collect();
    pairs.shuffle(rng);

    PairSelection {
        pairs,
        new_word_count: selected.len(),
        new_ids: selected.iter().map(|e| e.id.clone()).collect(),
    }
}
