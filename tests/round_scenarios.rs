//! End-to-end round scenarios driven through the public API.
//!
//! Run with: cargo test --test round_scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use linguamatch::board::{IN_TRANSIT_DISTANCE, LayerSpec};
use linguamatch::round::{Pointer, Rejection, RoundStats};
use linguamatch::{
    LevelPlan, PairSelection, Phase, Round, RoundEvent, RoundOptions, TileId, TileState,
};

const DT: f32 = 1.0 / 60.0;

fn deal(plan: &LevelPlan) -> Round {
    let options = RoundOptions {
        seed: Some(3),
        ..RoundOptions::default()
    };
    let mut round = Round::new(plan, PairSelection::placeholders(plan.pair_count), options);
    round.skip_intro();
    round.settle(DT, 600);
    round
}

fn settle(round: &mut Round) {
    round.settle(DT, 600);
}

#[test]
fn test_single_pair_round_is_won() {
    let mut round = deal(&LevelPlan::for_level(1));
    assert_eq!(round.tiles().len(), 2);
    assert_eq!(round.layout().layers(), &[LayerSpec::new(1, 2)]);
    assert!(round.tiles().iter().all(|t| t.is_selectable()));

    assert_eq!(round.select(TileId(0)), Ok(0));
    assert_eq!(round.select(TileId(1)), Ok(1));
    settle(&mut round);

    assert_eq!(round.phase(), Phase::Won);
    assert_eq!(round.remaining_tiles(), 0);
    let events = round.drain_events();
    assert!(events.iter().any(|e| matches!(e, RoundEvent::Matched { .. })));
    assert_eq!(events.iter().filter(|e| **e == RoundEvent::Won).count(), 1);
}

#[test]
fn test_row_of_four_blocks_inner_tiles() {
    let mut round = deal(&LevelPlan::for_level(2));
    let blocked: Vec<bool> = round.tiles().iter().map(|t| t.is_blocked()).collect();
    assert_eq!(blocked, vec![false, true, true, false]);

    assert_eq!(round.select(TileId(1)), Err(Rejection::Blocked));
    assert!(round.buffer().is_empty());
    assert!(round.tile(TileId(1)).unwrap().effect().is_shaking());
    assert_eq!(round.stats().rejected, 1);
}

#[test]
fn test_picking_an_end_tile_frees_its_neighbour() {
    let mut round = deal(&LevelPlan::for_level(2));
    round.select(TileId(0)).unwrap();
    assert!(!round.tile(TileId(1)).unwrap().is_blocked());

    assert!(round.undo());
    settle(&mut round);
    assert!(round.tile(TileId(1)).unwrap().is_blocked());
    assert_eq!(round.tile(TileId(0)).unwrap().state(), TileState::Board);
    let tile = round.tile(TileId(0)).unwrap();
    assert!(tile.position().distance(tile.placement().origin) < IN_TRANSIT_DISTANCE);
}

#[test]
fn test_full_buffer_loses_and_undo_rescues() {
    // A 4×4 grid: every row holds two pairs, and its end tiles are free.
    let plan = LevelPlan::with_pairs(3, 8);
    let mut round = deal(&plan);
    let picks = [TileId(0), TileId(3), TileId(4), TileId(7)];
    for id in picks {
        assert!(round.tile(id).unwrap().is_selectable(), "{id:?}");
        round.select(id).unwrap();
    }
    settle(&mut round);
    assert_eq!(round.phase(), Phase::Lost);

    // Nothing else can be placed once lost.
    assert_eq!(round.select(TileId(8)), Err(Rejection::NotPlaying));

    assert!(round.undo());
    assert_eq!(round.phase(), Phase::Playing);
    assert_eq!(round.buffer().occupied(), 3);
    assert_eq!(round.tile(TileId(7)).unwrap().state(), TileState::Board);
}

#[test]
fn test_matched_tiles_are_never_placeable_again() {
    let mut round = deal(&LevelPlan::for_level(2));
    round.select(TileId(0)).unwrap();
    round.select(TileId(1)).unwrap();
    settle(&mut round);

    assert_eq!(round.phase(), Phase::Playing);
    assert!(round.tile(TileId(0)).unwrap().is_removed());
    assert_eq!(round.select(TileId(0)), Err(Rejection::NotOnBoard));
    assert_eq!(round.select(TileId(1)), Err(Rejection::NotOnBoard));
    assert!(!round.undo(), "matched tiles cannot be undone");

    let origin = round.tile(TileId(0)).unwrap().placement().origin;
    assert_ne!(round.tile_at(origin.offset(10.0, 10.0)), Some(TileId(0)));
}

#[test]
fn test_click_through_pointer_matches_select() {
    let mut round = deal(&LevelPlan::for_level(1));
    for idx in 0..2 {
        let at = round.tiles()[idx].position().offset(20.0, 20.0);
        assert_eq!(round.press_at(at), Pointer::Grabbed(TileId(idx)));
        assert!(matches!(round.release_at(at), Pointer::Placed { .. }));
    }
    settle(&mut round);
    assert_eq!(round.phase(), Phase::Won);
    assert_eq!(
        round.stats(),
        RoundStats {
            placements: 2,
            matches: 1,
            ..RoundStats::default()
        }
    );
}

#[test]
fn test_shuffle_keeps_occupied_slots() {
    let mut round = deal(&LevelPlan::with_pairs(5, 10));
    let mut before: Vec<(i64, i64, u32)> = round
        .tiles()
        .iter()
        .map(|t| slot_key(t.placement().origin.x, t.placement().origin.y, t.placement().layer))
        .collect();
    assert!(round.shuffle() > 0);
    let mut after: Vec<(i64, i64, u32)> = round
        .tiles()
        .iter()
        .map(|t| slot_key(t.placement().origin.x, t.placement().origin.y, t.placement().layer))
        .collect();
    before.sort_unstable();
    after.sort_unstable();
    assert_eq!(before, after);
    assert_eq!(round.history_len(), 0);
}

#[allow(clippy::cast_possible_truncation)]
fn slot_key(x: f32, y: f32, layer: u32) -> (i64, i64, u32) {
    (x.round() as i64, y.round() as i64, layer)
}
