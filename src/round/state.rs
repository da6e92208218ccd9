//! One round of play.
//!
//! A [`Round`] owns every tile it deals plus the staging buffer and undo
//! history, which refer to tiles by arena index. Front ends drive it with
//! pointer events or direct [`Round::select`] calls and advance it with
//! [`Round::tick`]; everything that should be heard or persisted comes out
//! of [`Round::drain_events`].
//!
//! # Phases
//!
//! ```text
//!  Intro ──> Playing <──> Paused
//!               │
//!               ├──> Won
//!               └──> Lost ──(undo)──> Playing
//! ```

// Screen coordinates and tile counts stay far below f32 precision limits.
#![allow(clippy::cast_precision_loss)]

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::board::{
    DESIGN_WIDTH, Flash, Layout, MoveHistory, Point, Rect, StagingBuffer, Symbol, Tile, TileId,
    TileState, assign_symbols, find_blockers, find_hint, merge_point, refresh_blocked,
    shuffle_placements, slot_origin, slot_strip,
};
use crate::config::Timings;
use crate::error::BufferFull;
use crate::round::feedback::Cue;
use crate::round::plan::LevelPlan;
use crate::vocab::{Language, PairSelection, TileFace, WordId};

/// Approach speed of settling tiles.
const SETTLE_SPEED: f32 = 25.0;
/// Approach speed while a shuffle animation runs.
const SHUFFLE_SPEED: f32 = 3.0;
/// Approach speed of matched tiles flying to their merge point.
const MERGE_SPEED: f32 = 5.0;
/// Matched tiles vanish once this close to the merge point.
const MERGE_DISTANCE: f32 = 10.0;
/// Releases closer than this to the press point count as clicks.
const DRAG_THRESHOLD: f32 = 5.0;

const BLOCKED_SHAKE_SECONDS: f32 = 0.4;
const FULL_SHAKE_SECONDS: f32 = 0.5;
const REJECT_FLASH_SECONDS: f32 = 0.3;
const BLOCKER_FLASH_SECONDS: f32 = 0.5;

/// Tiles drop in from this height.
const DROP_HEIGHT: f32 = -500.0;
/// Horizontal overshoot of the drop-in start positions.
const DROP_SPREAD: f32 = 100.0;

/// Round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Level banner; tiles drop in.
    Intro,
    /// Accepting moves.
    Playing,
    /// Suspended by the player.
    Paused,
    /// Every tile has been matched.
    Won,
    /// Buffer full without a match.
    Lost,
}

impl Phase {
    /// Whether the round has ended (an undo can still rescue a loss).
    #[must_use]
    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rejection {
    /// The round is not in the playing phase.
    NotPlaying,
    /// No tile has this id.
    UnknownTile,
    /// The tile is buffered, matched or gone.
    NotOnBoard,
    /// The tile is covered or closed on both sides.
    Blocked,
    /// All buffer slots are occupied.
    BufferFull,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::NotPlaying => "round is not accepting moves",
            Rejection::UnknownTile => "no such tile",
            Rejection::NotOnBoard => "tile is not on the board",
            Rejection::Blocked => "tile is blocked",
            Rejection::BufferFull => "staging buffer is full",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for Rejection {}

impl From<BufferFull> for Rejection {
    fn from(_: BufferFull) -> Self {
        Rejection::BufferFull
    }
}

/// Something that happened in a round.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// The round was dealt.
    Started {
        /// Level number.
        level: u32,
    },
    /// The intro ended and moves are accepted.
    Playing,
    /// A tile was picked up.
    Grabbed {
        /// The tile.
        tile: TileId,
        /// Its word.
        text: String,
        /// Language of the word.
        language: Language,
    },
    /// A move was refused with visible feedback.
    Rejected {
        /// The tile involved.
        tile: TileId,
        /// Why.
        reason: Rejection,
    },
    /// A tile entered the buffer.
    Placed {
        /// The tile.
        tile: TileId,
        /// Slot index.
        slot: usize,
    },
    /// Two buffered tiles matched and started merging.
    Matched {
        /// Shared word id.
        pair_id: WordId,
        /// The two tiles.
        tiles: (TileId, TileId),
    },
    /// A buffered tile went back to the board.
    Undone {
        /// The tile.
        tile: TileId,
    },
    /// A hint was requested.
    Hinted {
        /// The pair found, if any.
        tiles: Option<(TileId, TileId)>,
    },
    /// The board was reshuffled.
    Shuffled {
        /// Tiles that moved.
        tiles: usize,
    },
    /// Play was suspended.
    Paused,
    /// Play resumed.
    Resumed,
    /// All tiles cleared.
    Won,
    /// Buffer filled up without a match.
    Lost,
}

impl RoundEvent {
    /// Sound cue for this event.
    #[must_use]
    pub fn cue(&self) -> Option<Cue> {
        match self {
            RoundEvent::Started { .. } | RoundEvent::Playing => Some(Cue::Start),
            RoundEvent::Grabbed { .. } => Some(Cue::Click),
            RoundEvent::Rejected { .. } => Some(Cue::Error),
            RoundEvent::Matched { .. } => Some(Cue::Match),
            RoundEvent::Undone { .. } => Some(Cue::Undo),
            RoundEvent::Hinted { .. } => Some(Cue::Hint),
            RoundEvent::Shuffled { .. } => Some(Cue::Shuffle),
            RoundEvent::Won => Some(Cue::Win),
            RoundEvent::Lost => Some(Cue::Loss),
            RoundEvent::Placed { .. } | RoundEvent::Paused | RoundEvent::Resumed => None,
        }
    }

    /// Word to speak for this event.
    #[must_use]
    pub fn speech(&self) -> Option<(&str, Language)> {
        match self {
            RoundEvent::Grabbed { text, language, .. } => Some((text, *language)),
            _ => None,
        }
    }
}

/// Result of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pointer {
    /// Nothing under the pointer, or no drag in progress.
    Missed,
    /// A tile was picked up and is being dragged.
    Grabbed(TileId),
    /// The dragged tile entered the buffer.
    Placed {
        /// The tile.
        tile: TileId,
        /// Slot index.
        slot: usize,
    },
    /// The drag was dropped away from the buffer; the tile snaps back.
    Cancelled,
    /// The move was refused.
    Rejected(Rejection),
}

/// Per-round move counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RoundStats {
    /// Tiles placed into the buffer.
    pub placements: u32,
    /// Pairs matched.
    pub matches: u32,
    /// Successful undos.
    pub undos: u32,
    /// Hint requests honoured.
    pub hints: u32,
    /// Shuffles performed.
    pub shuffles: u32,
    /// Rejected moves.
    pub rejected: u32,
}

/// Options fixed for the lifetime of a round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundOptions {
    /// Show accessibility symbols.
    pub show_symbols: bool,
    /// Phase durations.
    pub timings: Timings,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            show_symbols: true,
            timings: Timings::default(),
            seed: None,
        }
    }
}

/// Read-only view of a tile for renderers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TileView<'a> {
    /// Arena index.
    pub id: TileId,
    /// Printed word.
    pub text: &'a str,
    /// Language of the word.
    pub language: Language,
    /// Drawn position, including any drag offset.
    pub position: Point,
    /// Draw depth.
    pub layer: u32,
    /// Lifecycle state.
    pub state: TileState,
    /// Whether the tile is blocked.
    pub blocked: bool,
    /// Whether the tile is being dragged.
    pub selected: bool,
    /// Whether the tile is part of the active hint.
    pub hinted: bool,
    /// Whether the tile is shaking.
    pub shaking: bool,
    /// Active flash.
    pub flash: Option<Flash>,
    /// Symbol to draw, if symbols are shown.
    pub symbol: Option<Symbol>,
}

impl TileView<'_> {
    /// Whether the tile sits in (or flies to) the buffer.
    #[must_use]
    pub fn buffered(&self) -> bool {
        self.state == TileState::Buffered
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    tile: TileId,
    start: Point,
    offset: Point,
}

/// A single round: tiles, buffer, history and phase.
#[derive(Debug, Clone)]
pub struct Round {
    level: u32,
    tutorial: Option<&'static str>,
    layout: Layout,
    tiles: Vec<Tile>,
    buffer: StagingBuffer,
    history: MoveHistory,
    phase: Phase,
    intro_remaining: f32,
    hint: Option<(TileId, TileId)>,
    hint_remaining: f32,
    shuffle_remaining: f32,
    drag: Option<Drag>,
    show_symbols: bool,
    timings: Timings,
    rng: SmallRng,
    events: Vec<RoundEvent>,
    new_word_count: usize,
    new_ids: Vec<WordId>,
    stats: RoundStats,
}

impl Round {
    /// Deal a round: place the selected faces on the plan's layout.
    ///
    /// Tiles start above the screen and drop in during the intro.
    #[must_use]
    pub fn new(plan: &LevelPlan, selection: PairSelection, options: RoundOptions) -> Self {
        let mut rng = options
            .seed
            .map_or_else(SmallRng::from_entropy, SmallRng::seed_from_u64);
        let PairSelection {
            pairs,
            new_word_count,
            new_ids,
        } = selection;

        let placements = plan.layout.placements(pairs.len(), plan.top);
        let faces = fit_faces(pairs, placements.len());

        let mut distinct: Vec<WordId> = Vec::new();
        let mut seen = HashSet::new();
        for face in &faces {
            if seen.insert(&face.pair_id) {
                distinct.push(face.pair_id.clone());
            }
        }
        let symbols = assign_symbols(distinct.len(), &mut rng);
        let symbol_of: HashMap<WordId, Symbol> = distinct.into_iter().zip(symbols).collect();

        let mut tiles: Vec<Tile> = faces
            .into_iter()
            .zip(placements)
            .map(|(face, placement)| {
                let symbol = symbol_of.get(&face.pair_id).copied();
                let start = Point::new(
                    rng.gen_range(-DROP_SPREAD..=DESIGN_WIDTH + DROP_SPREAD),
                    DROP_HEIGHT,
                );
                Tile::new(face, placement).with_symbol(symbol).starting_at(start)
            })
            .collect();
        refresh_blocked(&mut tiles);

        tracing::info!(
            level = plan.level,
            tiles = tiles.len(),
            layers = plan.layout.len(),
            "round dealt"
        );

        Self {
            level: plan.level,
            tutorial: plan.tutorial,
            layout: plan.layout.clone(),
            tiles,
            buffer: StagingBuffer::new(),
            history: MoveHistory::new(),
            phase: Phase::Intro,
            intro_remaining: options.timings.intro_seconds,
            hint: None,
            hint_remaining: 0.0,
            shuffle_remaining: 0.0,
            drag: None,
            show_symbols: options.show_symbols,
            timings: options.timings,
            rng,
            events: vec![RoundEvent::Started { level: plan.level }],
            new_word_count,
            new_ids,
            stats: RoundStats::default(),
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Advance the round by `dt` seconds.
    ///
    /// Resolves matches, moves tiles towards their targets and checks for
    /// a win or a loss. While paused only effect timers advance.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        for tile in &mut self.tiles {
            tile.effect_mut().tick(dt);
        }

        match self.phase {
            Phase::Paused => return,
            Phase::Intro => {
                self.intro_remaining -= dt;
                if self.intro_remaining <= 0.0 {
                    self.begin_play();
                }
            }
            Phase::Playing | Phase::Won | Phase::Lost => {}
        }

        self.hint_remaining = (self.hint_remaining - dt).max(0.0);
        if self.hint_remaining <= 0.0 {
            self.hint = None;
        }
        self.shuffle_remaining = (self.shuffle_remaining - dt).max(0.0);

        if self.phase == Phase::Playing {
            self.resolve_matches();
        }
        self.animate(dt);
        if self.phase == Phase::Playing {
            self.check_loss();
            self.check_win();
        }
    }

    /// Tick until nothing moves, the round ends or `max_ticks` run out.
    ///
    /// Returns the number of ticks run.
    pub fn settle(&mut self, dt: f32, max_ticks: usize) -> usize {
        let mut ticks = 0;
        while ticks < max_ticks {
            self.tick(dt);
            ticks += 1;
            if self.phase.is_over() || !self.is_animating() {
                break;
            }
        }
        ticks
    }

    /// End the intro immediately.
    pub fn skip_intro(&mut self) {
        if self.phase == Phase::Intro {
            self.intro_remaining = 0.0;
            self.begin_play();
        }
    }

    fn begin_play(&mut self) {
        self.phase = Phase::Playing;
        self.events.push(RoundEvent::Playing);
    }

    fn animate(&mut self, dt: f32) {
        let speed = if self.shuffle_remaining > 0.0 { SHUFFLE_SPEED } else { SETTLE_SPEED };
        let settle = (speed * dt).min(1.0);
        let merge = (MERGE_SPEED * dt).min(1.0);
        let dragged = self.drag.map(|d| d.tile);

        for (idx, tile) in self.tiles.iter_mut().enumerate() {
            match tile.state() {
                TileState::Removed => {}
                TileState::Resolving => {
                    if tile.position().distance(tile.placement().origin) <= MERGE_DISTANCE {
                        tile.mark_removed();
                    } else {
                        tile.ease_towards_target(merge);
                    }
                }
                TileState::Board | TileState::Buffered => {
                    if dragged != Some(TileId(idx)) {
                        tile.ease_towards_target(settle);
                    }
                }
            }
        }
    }

    /// Clear every matched pair from the buffer and compact it.
    fn resolve_matches(&mut self) {
        let mut matched = false;
        loop {
            let tiles = &self.tiles;
            let Some((a, b)) = self.buffer.find_match(|id| tiles[id.index()].pair_id()) else {
                break;
            };
            self.buffer.remove(a);
            self.buffer.remove(b);
            let target = merge_point(self.tiles[a.index()].position(), self.tiles[b.index()].position());
            self.tiles[a.index()].begin_resolving(target);
            self.tiles[b.index()].begin_resolving(target);

            let pair_id = self.tiles[a.index()].pair_id().clone();
            tracing::debug!(pair = %pair_id, "pair matched");
            self.stats.matches += 1;
            self.events.push(RoundEvent::Matched {
                pair_id,
                tiles: (a, b),
            });
            matched = true;
        }

        if matched {
            for (id, slot) in self.buffer.compact() {
                self.tiles[id.index()].move_to_slot(slot_origin(slot));
            }
        }
    }

    fn check_loss(&mut self) {
        if !self.buffer.is_full() {
            return;
        }
        if self.buffer.iter().any(|(_, id)| self.tiles[id.index()].in_transit()) {
            return;
        }
        tracing::info!(level = self.level, "round lost: buffer full");
        self.phase = Phase::Lost;
        self.drag = None;
        self.events.push(RoundEvent::Lost);
    }

    fn check_win(&mut self) {
        if !self.tiles.is_empty() && self.tiles.iter().all(Tile::is_removed) {
            tracing::info!(level = self.level, "round won");
            self.phase = Phase::Won;
            self.events.push(RoundEvent::Won);
        }
    }

    // ------------------------------------------------------------------
    // Moves
    // ------------------------------------------------------------------

    /// Click a tile: pick it up and place it into the buffer.
    ///
    /// # Errors
    ///
    /// Returns the [`Rejection`] when the move is refused. Blocked tiles and
    /// a full buffer also produce visible feedback and a
    /// [`RoundEvent::Rejected`].
    pub fn select(&mut self, id: TileId) -> Result<usize, Rejection> {
        self.drag = None;
        self.grab(id)?;
        self.place(id)
    }

    /// Press at a logical point: hit-test the topmost board tile.
    pub fn press_at(&mut self, point: Point) -> Pointer {
        if self.phase != Phase::Playing {
            return Pointer::Rejected(Rejection::NotPlaying);
        }
        let Some(id) = self.tile_at(point) else {
            return Pointer::Missed;
        };
        match self.grab(id) {
            Ok(()) => {
                self.drag = Some(Drag {
                    tile: id,
                    start: point,
                    offset: Point::default(),
                });
                Pointer::Grabbed(id)
            }
            Err(reason) => Pointer::Rejected(reason),
        }
    }

    /// Move the pointer while dragging.
    pub fn drag_to(&mut self, point: Point) {
        if let Some(drag) = &mut self.drag {
            drag.offset = Point::new(point.x - drag.start.x, point.y - drag.start.y);
        }
    }

    /// Release the pointer.
    ///
    /// A release near the press point, or over the buffer strip, places the
    /// dragged tile; anywhere else the drag is abandoned.
    pub fn release_at(&mut self, point: Point) -> Pointer {
        let Some(drag) = self.drag.take() else {
            return Pointer::Missed;
        };
        if self.phase != Phase::Playing {
            return Pointer::Cancelled;
        }
        let moved = drag.offset.distance(Point::default());
        if moved >= DRAG_THRESHOLD && !slot_strip().contains(point) {
            return Pointer::Cancelled;
        }
        match self.place(drag.tile) {
            Ok(slot) => Pointer::Placed {
                tile: drag.tile,
                slot,
            },
            Err(reason) => Pointer::Rejected(reason),
        }
    }

    /// Topmost on-board tile under `point`.
    #[must_use]
    pub fn tile_at(&self, point: Point) -> Option<TileId> {
        let mut order: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| self.tiles[i].is_on_board())
            .collect();
        order.sort_by(|&a, &b| draw_order(&self.tiles[b], &self.tiles[a]));
        order
            .into_iter()
            .find(|&i| Rect::tile_at(self.tiles[i].position()).contains(point))
            .map(TileId)
    }

    fn grab(&mut self, id: TileId) -> Result<(), Rejection> {
        if self.phase != Phase::Playing {
            return Err(Rejection::NotPlaying);
        }
        let tile = self.tiles.get(id.index()).ok_or(Rejection::UnknownTile)?;
        if !tile.is_on_board() {
            return Err(Rejection::NotOnBoard);
        }
        if tile.is_blocked() {
            self.reject_blocked(id);
            return Err(Rejection::Blocked);
        }

        self.hint = None;
        self.hint_remaining = 0.0;
        let tile = &self.tiles[id.index()];
        self.events.push(RoundEvent::Grabbed {
            tile: id,
            text: tile.text().to_string(),
            language: tile.language(),
        });
        Ok(())
    }

    fn reject_blocked(&mut self, id: TileId) {
        for (blocker, _) in find_blockers(id, &self.tiles) {
            self.tiles[blocker.index()]
                .effect_mut()
                .flash(Flash::Blocker, BLOCKER_FLASH_SECONDS);
        }
        let effect = self.tiles[id.index()].effect_mut();
        effect.shake(BLOCKED_SHAKE_SECONDS);
        effect.flash(Flash::Rejected, REJECT_FLASH_SECONDS);
        self.stats.rejected += 1;
        self.events.push(RoundEvent::Rejected {
            tile: id,
            reason: Rejection::Blocked,
        });
    }

    fn place(&mut self, id: TileId) -> Result<usize, Rejection> {
        match self.buffer.place(id) {
            Ok(slot) => {
                self.tiles[id.index()].enter_buffer(slot_origin(slot));
                self.history.push(id);
                refresh_blocked(&mut self.tiles);
                self.stats.placements += 1;
                self.events.push(RoundEvent::Placed { tile: id, slot });
                Ok(slot)
            }
            Err(full) => {
                self.tiles[id.index()].effect_mut().shake(FULL_SHAKE_SECONDS);
                self.stats.rejected += 1;
                self.events.push(RoundEvent::Rejected {
                    tile: id,
                    reason: Rejection::BufferFull,
                });
                Err(full.into())
            }
        }
    }

    /// Send the most recently buffered tile back to the board.
    ///
    /// Entries for tiles that were matched meanwhile are skipped. An undo
    /// also rescues a lost round. Returns whether a tile moved.
    pub fn undo(&mut self) -> bool {
        if !matches!(self.phase, Phase::Playing | Phase::Lost) {
            return false;
        }
        self.drag = None;

        let tiles = &self.tiles;
        let buffer = &self.buffer;
        let Some(id) = self
            .history
            .pop_restorable(|id| tiles[id.index()].is_buffered() && buffer.slot_of(id).is_some())
        else {
            return false;
        };

        self.buffer.remove(id);
        self.tiles[id.index()].return_to_board();
        refresh_blocked(&mut self.tiles);
        if self.phase == Phase::Lost {
            tracing::debug!(level = self.level, "loss undone");
            self.phase = Phase::Playing;
        }
        self.hint = None;
        self.hint_remaining = 0.0;
        self.stats.undos += 1;
        self.events.push(RoundEvent::Undone { tile: id });
        true
    }

    /// Highlight a selectable matching pair.
    ///
    /// Ignored while a previous hint is still shown.
    pub fn request_hint(&mut self) -> Option<(TileId, TileId)> {
        if self.phase != Phase::Playing || self.hint_remaining > 0.0 {
            return None;
        }
        let found = find_hint(&self.tiles);
        if found.is_some() {
            self.hint = found;
            self.hint_remaining = self.timings.hint_seconds;
            self.stats.hints += 1;
        }
        self.events.push(RoundEvent::Hinted { tiles: found });
        found
    }

    /// Reshuffle the board tiles. Clears the hint and the undo history.
    ///
    /// Returns the number of tiles that took part.
    pub fn shuffle(&mut self) -> usize {
        if self.phase != Phase::Playing {
            return 0;
        }
        self.drag = None;
        let moved = shuffle_placements(&mut self.tiles, &mut self.rng);
        if moved == 0 {
            return 0;
        }
        self.shuffle_remaining = self.timings.shuffle_seconds;
        self.hint = None;
        self.hint_remaining = 0.0;
        self.history.clear();
        self.stats.shuffles += 1;
        tracing::debug!(tiles = moved, "board shuffled");
        self.events.push(RoundEvent::Shuffled { tiles: moved });
        moved
    }

    /// Suspend play. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.phase = Phase::Paused;
        self.drag = None;
        self.events.push(RoundEvent::Paused);
        true
    }

    /// Resume play. Returns whether the phase changed.
    pub fn resume(&mut self) -> bool {
        if self.phase != Phase::Paused {
            return false;
        }
        self.phase = Phase::Playing;
        self.events.push(RoundEvent::Resumed);
        true
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => self.pause(),
            Phase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Flip symbol visibility; returns the new setting.
    pub fn toggle_symbols(&mut self) -> bool {
        self.show_symbols = !self.show_symbols;
        self.show_symbols
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Level number.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Tutorial instruction, on the first levels.
    #[must_use]
    pub fn tutorial(&self) -> Option<&'static str> {
        self.tutorial
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Every tile of the round, removed ones included.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// One tile.
    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// The staging buffer.
    #[must_use]
    pub fn buffer(&self) -> &StagingBuffer {
        &self.buffer
    }

    /// Entries in the undo history, including inert ones.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// The layer stack this round was dealt on.
    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The highlighted hint pair.
    #[must_use]
    pub fn hint(&self) -> Option<(TileId, TileId)> {
        self.hint
    }

    /// Whether symbols are shown.
    #[must_use]
    pub fn show_symbols(&self) -> bool {
        self.show_symbols
    }

    /// Whether the slow shuffle animation is running.
    #[must_use]
    pub fn is_shuffling(&self) -> bool {
        self.shuffle_remaining > 0.0
    }

    /// Seconds left in the intro.
    #[must_use]
    pub fn intro_remaining(&self) -> f32 {
        self.intro_remaining.max(0.0)
    }

    /// Whether any tile is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.is_shuffling()
            || self
                .tiles
                .iter()
                .any(|t| t.is_resolving() || (!t.is_removed() && t.in_transit()))
    }

    /// Tiles not yet matched away.
    #[must_use]
    pub fn remaining_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_removed()).count()
    }

    /// Number of words dealt this round.
    #[must_use]
    pub fn new_word_count(&self) -> usize {
        self.new_word_count
    }

    /// Ids of the words dealt this round.
    #[must_use]
    pub fn new_ids(&self) -> &[WordId] {
        &self.new_ids
    }

    /// Move counters.
    #[must_use]
    pub fn stats(&self) -> RoundStats {
        self.stats
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<RoundEvent> {
        std::mem::take(&mut self.events)
    }

    /// Renderable view of every tile still in play, in draw order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TileView<'_>> {
        let drag = self.drag;
        let hinted = |id: TileId| self.hint.is_some_and(|(a, b)| a == id || b == id);

        let mut order: Vec<usize> = (0..self.tiles.len())
            .filter(|&i| !self.tiles[i].is_removed())
            .collect();
        order.sort_by(|&a, &b| draw_order(&self.tiles[a], &self.tiles[b]));

        order
            .into_iter()
            .map(|idx| {
                let id = TileId(idx);
                let tile = &self.tiles[idx];
                let selected = drag.is_some_and(|d| d.tile == id);
                let position = match drag {
                    Some(d) if d.tile == id => tile.position().offset(d.offset.x, d.offset.y),
                    _ => tile.position(),
                };
                TileView {
                    id,
                    text: tile.text(),
                    language: tile.language(),
                    position,
                    layer: tile.placement().layer,
                    state: tile.state(),
                    blocked: tile.is_blocked(),
                    selected,
                    hinted: hinted(id),
                    shaking: tile.effect().is_shaking(),
                    flash: tile.effect().active_flash(),
                    symbol: if self.show_symbols { tile.symbol() } else { None },
                }
            })
            .collect()
    }
}

/// Bottom-to-top order: layer, then row, then column.
fn draw_order(a: &Tile, b: &Tile) -> Ordering {
    a.placement()
        .layer
        .cmp(&b.placement().layer)
        .then(a.position().y.total_cmp(&b.position().y))
        .then(a.position().x.total_cmp(&b.position().x))
}

/// Drop whole pairs until the faces fit `capacity` placements.
fn fit_faces(faces: Vec<TileFace>, capacity: usize) -> Vec<TileFace> {
    if faces.len() <= capacity {
        return faces;
    }
    let mut kept: HashSet<WordId> = HashSet::new();
    for face in &faces {
        if kept.len() >= capacity / 2 {
            break;
        }
        kept.insert(face.pair_id.clone());
    }
    tracing::warn!(
        faces = faces.len(),
        capacity,
        "layout too small for the selection; dropping pairs"
    );
    faces.into_iter().filter(|f| kept.contains(&f.pair_id)).collect()
}
