#![no_main]

//! Round action fuzzer.
//!
//! Drives a round with an arbitrary sequence of clicks, drags, undos, hints,
//! shuffles, pauses and ticks, and checks the board bookkeeping after every
//! action:
//! 1. The buffer never holds more than four tiles or a tile twice
//! 2. Buffer contents and tile states agree
//! 3. A won round has no tiles left

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use linguamatch::board::{Point, SLOT_COUNT, TileId};
use linguamatch::{LevelPlan, PairSelection, Phase, Round, RoundOptions};

/// A fuzzer-generated player action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Action {
    Select(u8),
    Press { x: u16, y: u16 },
    Drag { x: u16, y: u16 },
    Release { x: u16, y: u16 },
    Tick { millis: u8 },
    Undo,
    Hint,
    Shuffle,
    TogglePause,
    ToggleSymbols,
}

#[derive(Arbitrary, Debug)]
struct RoundInput {
    level: u8,
    seed: u64,
    actions: Vec<Action>,
}

fn point(x: u16, y: u16) -> Point {
    Point::new(f32::from(x % 2000), f32::from(y % 1100))
}

fn check(round: &Round) {
    let buffer = round.buffer();
    assert!(buffer.occupied() <= SLOT_COUNT);

    let mut held: Vec<TileId> = buffer.iter().map(|(_, id)| id).collect();
    held.sort_unstable();
    held.dedup();
    assert_eq!(held.len(), buffer.occupied(), "tile buffered twice");

    for (idx, tile) in round.tiles().iter().enumerate() {
        let in_buffer = buffer.slot_of(TileId(idx)).is_some();
        assert_eq!(in_buffer, tile.is_buffered(), "tile {idx} state disagrees with buffer");
        if tile.is_removed() || tile.is_resolving() {
            assert!(!in_buffer);
        }
    }

    if round.phase() == Phase::Won {
        assert_eq!(round.remaining_tiles(), 0);
    }
}

fuzz_target!(|input: RoundInput| {
    let level = u32::from(input.level % 12) + 1;
    let plan = LevelPlan::for_level(level);
    let options = RoundOptions {
        seed: Some(input.seed),
        ..RoundOptions::default()
    };
    let mut round = Round::new(&plan, PairSelection::placeholders(plan.pair_count), options);
    round.skip_intro();

    for action in input.actions.into_iter().take(200) {
        match action {
            Action::Select(i) => {
                let _ = round.select(TileId(usize::from(i)));
            }
            Action::Press { x, y } => {
                round.press_at(point(x, y));
            }
            Action::Drag { x, y } => round.drag_to(point(x, y)),
            Action::Release { x, y } => {
                round.release_at(point(x, y));
            }
            Action::Tick { millis } => round.tick(f32::from(millis) / 1000.0),
            Action::Undo => {
                round.undo();
            }
            Action::Hint => {
                round.request_hint();
            }
            Action::Shuffle => {
                round.shuffle();
            }
            Action::TogglePause => {
                round.toggle_pause();
            }
            Action::ToggleSymbols => {
                round.toggle_symbols();
            }
        }
        check(&round);
    }
});
