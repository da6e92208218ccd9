//! Tiles and their placement state.

use serde::Serialize;

use crate::board::geometry::{BUFFER_LAYER, Point, RESOLVING_LAYER, Rect};
use crate::board::symbols::Symbol;
use crate::vocab::{Language, TileFace, WordId};

/// Index of a tile in its round's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TileId(pub usize);

impl TileId {
    /// Arena index.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Logical position and depth of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Top-left corner in logical space.
    pub origin: Point,
    /// Depth; higher layers sit on top.
    pub layer: u32,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(origin: Point, layer: u32) -> Self {
        Self { origin, layer }
    }
}

/// Where a tile is in its lifecycle.
///
/// `Removed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileState {
    /// On the board (blocked or not).
    Board,
    /// Resting in, or flying to, a buffer slot.
    Buffered,
    /// Matched and merging; about to be removed.
    Resolving,
    /// Gone for the rest of the round.
    Removed,
}

/// Kind of transient flash shown on a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Flash {
    /// The tile was clicked while blocked.
    Rejected,
    /// The tile is one of the blockers of a rejected click.
    Blocker,
}

/// Transient visual effects stored alongside the tile.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TileEffect {
    shake_remaining: f32,
    flash: Option<(Flash, f32)>,
}

impl TileEffect {
    /// Start (or restart) a shake.
    pub fn shake(&mut self, seconds: f32) {
        self.shake_remaining = seconds;
    }

    /// Start (or restart) a flash.
    pub fn flash(&mut self, kind: Flash, seconds: f32) {
        self.flash = Some((kind, seconds));
    }

    /// Whether a shake is running.
    #[must_use]
    pub fn is_shaking(&self) -> bool {
        self.shake_remaining > 0.0
    }

    /// The running flash, if any.
    #[must_use]
    pub fn active_flash(&self) -> Option<Flash> {
        self.flash.map(|(kind, _)| kind)
    }

    /// Advance timers by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        self.shake_remaining = (self.shake_remaining - dt).max(0.0);
        if let Some((kind, remaining)) = self.flash {
            let remaining = remaining - dt;
            self.flash = (remaining > 0.0).then_some((kind, remaining));
        }
    }
}

/// Distance from target beyond which a tile counts as moving.
pub const IN_TRANSIT_DISTANCE: f32 = 5.0;

/// Distance at which an animated position snaps onto its target.
const SNAP_DISTANCE: f32 = 0.5;

/// A word tile.
#[derive(Debug, Clone)]
pub struct Tile {
    pair_id: WordId,
    text: String,
    language: Language,
    symbol: Option<Symbol>,
    placement: Placement,
    anchor: Placement,
    position: Point,
    state: TileState,
    blocked: bool,
    effect: TileEffect,
}

impl Tile {
    /// Create a board tile resting at `placement`.
    #[must_use]
    pub fn new(face: TileFace, placement: Placement) -> Self {
        Self {
            pair_id: face.pair_id,
            text: face.text,
            language: face.language,
            symbol: None,
            placement,
            anchor: placement,
            position: placement.origin,
            state: TileState::Board,
            blocked: false,
            effect: TileEffect::default(),
        }
    }

    /// Attach an accessibility symbol.
    #[must_use]
    pub fn with_symbol(mut self, symbol: Option<Symbol>) -> Self {
        self.symbol = symbol;
        self
    }

    /// Start the animated position somewhere other than the target.
    #[must_use]
    pub fn starting_at(mut self, position: Point) -> Self {
        self.position = position;
        self
    }

    /// Matching key shared with exactly one other tile.
    #[must_use]
    pub fn pair_id(&self) -> &WordId {
        &self.pair_id
    }

    /// Printed word.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Language of the printed word.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Accessibility symbol, if assigned.
    #[must_use]
    pub const fn symbol(&self) -> Option<Symbol> {
        self.symbol
    }

    /// Current target placement.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        self.placement
    }

    /// Board placement restored when the tile leaves the buffer.
    #[must_use]
    pub const fn anchor(&self) -> Placement {
        self.anchor
    }

    /// Animated position (what a renderer draws).
    #[must_use]
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TileState {
        self.state
    }

    /// Whether the tile is on the board and currently blocked.
    #[must_use]
    pub const fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Whether the tile is on the board (blocked or not).
    #[must_use]
    pub fn is_on_board(&self) -> bool {
        self.state == TileState::Board
    }

    /// Whether the tile sits in the staging buffer.
    #[must_use]
    pub fn is_buffered(&self) -> bool {
        self.state == TileState::Buffered
    }

    /// Whether the tile is mid-merge after a match.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.state == TileState::Resolving
    }

    /// Whether the tile has been matched away.
    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.state == TileState::Removed
    }

    /// Whether the player may pick this tile up.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        self.is_on_board() && !self.blocked
    }

    /// Transient effects.
    #[must_use]
    pub const fn effect(&self) -> &TileEffect {
        &self.effect
    }

    /// Logical footprint at the target placement.
    #[must_use]
    pub const fn footprint(&self) -> Rect {
        Rect::tile_at(self.placement.origin)
    }

    /// Whether the animated position is still far from the target.
    #[must_use]
    pub fn in_transit(&self) -> bool {
        self.position.distance(self.placement.origin) > IN_TRANSIT_DISTANCE
    }

    pub(crate) fn effect_mut(&mut self) -> &mut TileEffect {
        &mut self.effect
    }

    pub(crate) fn set_blocked(&mut self, blocked: bool) {
        self.blocked = blocked;
    }

    /// Move into a buffer slot, remembering the board placement.
    pub(crate) fn enter_buffer(&mut self, slot: Point) {
        self.anchor = self.placement;
        self.placement = Placement::new(slot, BUFFER_LAYER);
        self.state = TileState::Buffered;
        self.blocked = false;
    }

    /// Return to the remembered board placement.
    pub(crate) fn return_to_board(&mut self) {
        self.placement = self.anchor;
        self.state = TileState::Board;
    }

    /// Retarget a buffered tile to another slot.
    pub(crate) fn move_to_slot(&mut self, slot: Point) {
        self.placement.origin = slot;
    }

    /// Begin the merge animation towards `target`.
    pub(crate) fn begin_resolving(&mut self, target: Point) {
        self.placement = Placement::new(target, RESOLVING_LAYER);
        self.state = TileState::Resolving;
        self.blocked = false;
    }

    /// Assign a new board placement (shuffle).
    pub(crate) fn relocate(&mut self, placement: Placement) {
        self.placement = placement;
        self.anchor = placement;
    }

    pub(crate) fn mark_removed(&mut self) {
        self.state = TileState::Removed;
        self.blocked = false;
    }

    /// Ease the animated position towards the target.
    ///
    /// `factor` is the fraction of the remaining distance covered this tick.
    pub(crate) fn ease_towards_target(&mut self, factor: f32) {
        let factor = factor.clamp(0.0, 1.0);
        let target = self.placement.origin;
        let dx = target.x - self.position.x;
        let dy = target.y - self.position.y;
        self.position.x = if dx.abs() > SNAP_DISTANCE { self.position.x + dx * factor } else { target.x };
        self.position.y = if dy.abs() > SNAP_DISTANCE { self.position.y + dy * factor } else { target.y };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile() -> Tile {
        let face = TileFace::new("w1", "apple", Language::English);
        Tile::new(face, Placement::new(Point::new(100.0, 200.0), 0))
    }

    #[test]
    fn test_buffer_round_trip_restores_anchor() {
        let mut t = tile();
        t.enter_buffer(Point::new(700.0, 60.0));
        assert!(t.is_buffered());
        assert_eq!(t.placement().layer, BUFFER_LAYER);
        assert_eq!(t.anchor().origin, Point::new(100.0, 200.0));

        t.return_to_board();
        assert!(t.is_on_board());
        assert_eq!(t.placement(), Placement::new(Point::new(100.0, 200.0), 0));
    }

    #[test]
    fn test_easing_snaps() {
        let mut t = tile().starting_at(Point::new(0.0, 0.0));
        assert!(t.in_transit());
        t.ease_towards_target(1.0);
        assert_eq!(t.position(), Point::new(100.0, 200.0));
        assert!(!t.in_transit());
    }

    #[test]
    fn test_effect_timers_expire() {
        let mut effect = TileEffect::default();
        effect.shake(0.4);
        effect.flash(Flash::Rejected, 0.3);
        effect.tick(0.2);
        assert!(effect.is_shaking());
        assert_eq!(effect.active_flash(), Some(Flash::Rejected));
        effect.tick(0.25);
        assert!(effect.is_shaking());
        assert_eq!(effect.active_flash(), None);
        effect.tick(1.0);
        assert!(!effect.is_shaking());
    }
}
