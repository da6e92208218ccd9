#![no_main]

//! Vocabulary pack fuzzer.
//!
//! Feeds arbitrary bytes to the pack parser and, when they parse, deals
//! pairs from the result. Dealing must never repeat an id or return a face
//! without its partner.

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use linguamatch::vocab::{PairRequest, select_pairs};
use linguamatch::{Vocabulary, WordEntry, WordId};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fuzz_target!(|data: &[u8]| {
    let Ok(entries) = serde_json::from_slice::<Vec<WordEntry>>(data) else {
        return;
    };
    let vocab = Vocabulary::from_entries(entries);
    let used = HashSet::new();
    let request = PairRequest {
        count: 12,
        start_index: data.len() % 7,
        review_count: 3,
        used_ids: &used,
        start_level: None,
    };
    let selection = select_pairs(&vocab, &request, &mut SmallRng::seed_from_u64(data.len() as u64));

    let ids: HashSet<&WordId> = selection.new_ids.iter().collect();
    assert_eq!(ids.len(), selection.new_ids.len());
    assert_eq!(selection.pairs.len(), selection.new_ids.len() * 2);
});
