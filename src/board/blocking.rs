//! Which tiles may be picked up.
//!
//! A board tile is blocked when a tile on a higher layer overlaps it, or when
//! same-layer neighbours touch both its left and right edges. Tiles that are
//! buffered, resolving or removed neither block nor get blocked.
//!
//! Both scans are pairwise, which is fine for boards of a few hundred tiles.

use crate::board::geometry::{CONTACT_TOLERANCE, TILE_HEIGHT};
use crate::board::tile::{Tile, TileId};

/// Same-layer tiles only touch laterally when their rows are this close.
const SAME_ROW_DISTANCE: f32 = TILE_HEIGHT * 0.8;

/// How one tile constrains another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Sits on a higher layer and overlaps the footprint.
    Above,
    /// Touches the left edge on the same layer.
    Left,
    /// Touches the right edge on the same layer.
    Right,
}

/// Classify how `other` constrains `target`, if at all.
fn constraint(target: &Tile, other: &Tile) -> Option<Constraint> {
    let mine = target.placement();
    let theirs = other.placement();

    if theirs.layer > mine.layer {
        let (w, h) = target.footprint().overlap(&other.footprint());
        return (w > CONTACT_TOLERANCE && h > CONTACT_TOLERANCE).then_some(Constraint::Above);
    }
    if theirs.layer != mine.layer {
        return None;
    }
    if (theirs.origin.y - mine.origin.y).abs() >= SAME_ROW_DISTANCE {
        return None;
    }
    let mine_rect = target.footprint();
    let theirs_rect = other.footprint();
    if (theirs_rect.right() - mine_rect.x).abs() < CONTACT_TOLERANCE {
        Some(Constraint::Left)
    } else if (mine_rect.right() - theirs_rect.x).abs() < CONTACT_TOLERANCE {
        Some(Constraint::Right)
    } else {
        None
    }
}

/// Every on-board tile constraining `target`, with how it constrains it.
///
/// Used for feedback when a blocked tile is clicked.
#[must_use]
pub fn find_blockers(target: TileId, tiles: &[Tile]) -> Vec<(TileId, Constraint)> {
    let Some(tile) = tiles.get(target.index()) else {
        return Vec::new();
    };
    if !tile.is_on_board() {
        return Vec::new();
    }

    tiles
        .iter()
        .enumerate()
        .filter(|&(idx, other)| idx != target.index() && other.is_on_board())
        .filter_map(|(idx, other)| constraint(tile, other).map(|c| (TileId(idx), c)))
        .collect()
}

/// Whether `target` is currently blocked.
///
/// Pure function of the current placements. Returns `false` for tiles that
/// are not on the board.
#[must_use]
pub fn compute_blocked(target: TileId, tiles: &[Tile]) -> bool {
    let Some(tile) = tiles.get(target.index()) else {
        return false;
    };
    if !tile.is_on_board() {
        return false;
    }

    let mut left = false;
    let mut right = false;
    for (idx, other) in tiles.iter().enumerate() {
        if idx == target.index() || !other.is_on_board() {
            continue;
        }
        match constraint(tile, other) {
            Some(Constraint::Above) => return true,
            Some(Constraint::Left) => left = true,
            Some(Constraint::Right) => right = true,
            None => {}
        }
        if left && right {
            return true;
        }
    }
    false
}

/// Recompute the blocked flag of every tile.
pub fn refresh_blocked(tiles: &mut [Tile]) {
    let flags: Vec<bool> = (0..tiles.len()).map(|i| compute_blocked(TileId(i), tiles)).collect();
    for (tile, blocked) in tiles.iter_mut().zip(flags) {
        tile.set_blocked(blocked);
    }
}
