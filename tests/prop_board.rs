//! Property-based tests for the board engine and pair selection.
//!
//! Run with: cargo test --release prop_board

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::cast_precision_loss)]

use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use linguamatch::board::{
    COLUMN_STEP, CONTACT_TOLERANCE, LAYER_RISE, MAX_COLS, MAX_LAYERS, MAX_ROWS, Placement, Point,
    StagingBuffer, TILE_HEIGHT, TILE_WIDTH, compute_blocked, find_hint,
};
use linguamatch::vocab::{PairRequest, select_pairs};
use linguamatch::{
    CefrLevel, Language, Layout, LevelPlan, PairSelection, Phase, Round, RoundEvent, RoundOptions,
    Tile, TileFace, TileId, TileState, Vocabulary, WordEntry, WordId,
};

fn tile(x: f32, y: f32, layer: u32, id: &str) -> Tile {
    Tile::new(
        TileFace::new(id, "word", Language::English),
        Placement::new(Point::new(x, y), layer),
    )
}

fn vocab(n: usize) -> Vocabulary {
    let levels = CefrLevel::ALL;
    Vocabulary::from_entries(
        (0..n)
            .map(|i| {
                WordEntry::new(format!("w{i}"), levels[i % levels.len()], format!("en{i}"), format!("tr{i}"))
            })
            .collect(),
    )
}

fn dealt(level: u32, seed: u64) -> Round {
    let plan = LevelPlan::for_level(level);
    let options = RoundOptions { seed: Some(seed), ..RoundOptions::default() };
    let mut round = Round::new(&plan, PairSelection::placeholders(plan.pair_count), options);
    round.skip_intro();
    round.settle(1.0 / 60.0, 600);
    round
}

/// Blocking worked out from placements alone: covered from above, or touched on both sides.
fn expected_blocked(tiles: &[Tile], idx: usize) -> bool {
    let me = tiles[idx].placement();
    let (left_edge, top_edge) = (me.origin.x, me.origin.y);
    let mut touched_left = false;
    let mut touched_right = false;
    for (other_idx, other) in tiles.iter().enumerate() {
        if other_idx == idx || !other.is_on_board() {
            continue;
        }
        let them = other.placement();
        let (other_left, other_top) = (them.origin.x, them.origin.y);
        if them.layer > me.layer {
            let overlap_w = (left_edge + TILE_WIDTH).min(other_left + TILE_WIDTH) - left_edge.max(other_left);
            let overlap_h = (top_edge + TILE_HEIGHT).min(other_top + TILE_HEIGHT) - top_edge.max(other_top);
            if overlap_w > CONTACT_TOLERANCE && overlap_h > CONTACT_TOLERANCE {
                return true;
            }
        } else if them.layer == me.layer && (other_top - top_edge).abs() < TILE_HEIGHT * 0.8 {
            touched_left |= (other_left + TILE_WIDTH - left_edge).abs() < CONTACT_TOLERANCE;
            touched_right |= (left_edge + TILE_WIDTH - other_left).abs() < CONTACT_TOLERANCE;
        }
    }
    touched_left && touched_right
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Layers never exceed 7×7 or six deep, and hold every tile unless all six are used.
    #[test]
    fn prop_layout_bounds(pairs in 1usize..=140) {
        let layout = Layout::generate(pairs);
        prop_assert!(!layout.is_empty());
        prop_assert!(layout.len() <= MAX_LAYERS);
        for spec in layout.layers() {
            prop_assert!(spec.rows >= 1 && spec.rows <= MAX_ROWS);
            prop_assert!(spec.cols >= 1 && spec.cols <= MAX_COLS);
        }
        if layout.len() < MAX_LAYERS {
            prop_assert!(layout.capacity() >= pairs * 2);
        }
        let placements = layout.placements(pairs * 2, 200.0);
        prop_assert_eq!(placements.len(), (pairs * 2).min(layout.capacity()));
    }

    /// A tile overlapped from a higher layer is blocked; the cover is not.
    #[test]
    fn prop_covered_tile_is_blocked(dx in -70.0f32..70.0, dy in -40.0f32..40.0, layer in 1u32..5) {
        let tiles = vec![
            tile(800.0, 400.0, 0, "under"),
            tile(800.0 + dx, 400.0 + dy - LAYER_RISE * layer as f32, layer, "over"),
        ];
        prop_assert!(compute_blocked(TileId(0), &tiles));
        prop_assert!(!compute_blocked(TileId(1), &tiles));
    }

    /// A tile touched on one side only is free, whichever side it is.
    #[test]
    fn prop_one_sided_neighbour_is_free(left in any::<bool>(), y in 200.0f32..800.0) {
        let offset = if left { -COLUMN_STEP } else { COLUMN_STEP };
        let tiles = vec![tile(800.0, y, 0, "me"), tile(800.0 + offset, y, 0, "side")];
        prop_assert!(!compute_blocked(TileId(0), &tiles));
    }

    /// The selector deals two faces per word, never an excluded id and never an id twice.
    #[test]
    fn prop_selection_respects_exclusions(
        words in 0usize..60,
        count in 1usize..30,
        start in 0usize..80,
        excluded in proptest::collection::hash_set(0usize..60, 0..20),
        seed in any::<u64>(),
    ) {
        let vocab = vocab(words);
        let used: HashSet<WordId> = excluded.iter().map(|i| WordId::new(format!("w{i}"))).collect();
        let available = (0..words).filter(|i| !excluded.contains(i)).count();
        let request = PairRequest {
            count,
            start_index: start,
            review_count: count * 3 / 10,
            used_ids: &used,
            start_level: None,
        };
        let selection = select_pairs(&vocab, &request, &mut SmallRng::seed_from_u64(seed));

        prop_assert_eq!(selection.pairs.len(), 2 * count.min(available));
        prop_assert_eq!(selection.new_word_count, count.min(available));
        let ids: HashSet<&WordId> = selection.new_ids.iter().collect();
        prop_assert_eq!(ids.len(), selection.new_ids.len());
        for face in &selection.pairs {
            prop_assert!(!used.contains(&face.pair_id));
        }
        for id in &selection.new_ids {
            let langs: HashSet<Language> = selection
                .pairs
                .iter()
                .filter(|f| &f.pair_id == id)
                .map(|f| f.language)
                .collect();
            prop_assert_eq!(langs.len(), 2);
        }
    }

    /// Any two buffered tiles sharing an id are matched on the next tick.
    #[test]
    fn prop_buffered_pair_matches_next_tick(level in 1u32..=6, seed in any::<u64>()) {
        let plan = LevelPlan::for_level(level);
        let options = RoundOptions { seed: Some(seed), ..RoundOptions::default() };
        let mut round = Round::new(&plan, PairSelection::placeholders(plan.pair_count), options);
        round.skip_intro();
        round.settle(1.0 / 60.0, 600);

        let Some((a, b)) = find_hint(round.tiles()) else {
            return Ok(());
        };
        round.select(a).unwrap();
        round.select(b).unwrap();
        round.drain_events();
        round.tick(1.0 / 60.0);
        let events = round.drain_events();
        let matched = events.iter().any(|e| matches!(e, RoundEvent::Matched { .. }));
        prop_assert!(matched);
        prop_assert!(round.buffer().is_empty());
        prop_assert_ne!(round.phase(), Phase::Lost);
    }

    /// The buffer never holds a tile twice.
    #[test]
    fn prop_buffer_never_duplicates(ids in proptest::collection::vec(0usize..6, 0..12)) {
        let mut buffer = StagingBuffer::new();
        for id in ids {
            let _ = buffer.place(TileId(id));
            let held: Vec<TileId> = buffer.iter().map(|(_, id)| id).collect();
            let unique: HashSet<TileId> = held.iter().copied().collect();
            prop_assert_eq!(unique.len(), held.len());
            prop_assert_eq!(held.len(), buffer.occupied());
        }
    }

    /// On generated boards, before and after a pick, each tile's blocked flag follows the rules.
    #[test]
    fn prop_generated_board_blocking_follows_rules(level in 1u32..=25, seed in any::<u64>()) {
        let mut round = dealt(level, seed);
        let check = |round: &Round| -> Result<(), TestCaseError> {
            let tiles = round.tiles();
            for (idx, tile) in tiles.iter().enumerate().filter(|(_, t)| t.is_on_board()) {
                prop_assert_eq!(tile.is_blocked(), expected_blocked(tiles, idx), "tile {}", idx);
            }
            Ok(())
        };
        check(&round)?;

        if let Some(free) = round.tiles().iter().position(Tile::is_selectable) {
            round.select(TileId(free)).unwrap();
            check(&round)?;
        }
    }

    /// Undoing a pick restores the tile's placement and every blocked flag.
    #[test]
    fn prop_undo_restores_blocking(
        level in 1u32..=25,
        seed in any::<u64>(),
        pick in any::<proptest::sample::Index>(),
    ) {
        let mut round = dealt(level, seed);
        let free: Vec<usize> = round
            .tiles()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_selectable())
            .map(|(i, _)| i)
            .collect();
        prop_assume!(!free.is_empty());
        let id = TileId(*pick.get(&free));

        let blocked_before: Vec<bool> = round.tiles().iter().map(Tile::is_blocked).collect();
        let placement_before = round.tile(id).unwrap().placement();

        round.select(id).unwrap();
        prop_assert!(round.undo());

        let blocked_after: Vec<bool> = round.tiles().iter().map(Tile::is_blocked).collect();
        prop_assert_eq!(blocked_after, blocked_before);
        let tile = round.tile(id).unwrap();
        prop_assert_eq!(tile.placement(), placement_before);
        prop_assert_eq!(tile.state(), TileState::Board);
        prop_assert!(round.buffer().is_empty());
    }

    /// Four tiles with distinct ids fill the buffer and lose; undo brings the round back.
    #[test]
    fn prop_four_distinct_tiles_lose(level in 3u32..=20, seed in any::<u64>()) {
        let mut round = dealt(level, seed);
        let mut ids: HashSet<WordId> = HashSet::new();
        for _ in 0..4 {
            let next = round
                .tiles()
                .iter()
                .position(|t| t.is_selectable() && !ids.contains(t.pair_id()));
            prop_assume!(next.is_some());
            let idx = next.unwrap();
            ids.insert(round.tiles()[idx].pair_id().clone());
            round.select(TileId(idx)).unwrap();
        }
        prop_assert_eq!(round.buffer().occupied(), 4);

        round.settle(1.0 / 60.0, 600);
        prop_assert_eq!(round.phase(), Phase::Lost);

        prop_assert!(round.undo());
        prop_assert_eq!(round.phase(), Phase::Playing);
        prop_assert_eq!(round.buffer().occupied(), 3);
    }
}
