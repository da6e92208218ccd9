//! Reshuffling the tiles left on the board.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::board::blocking::refresh_blocked;
use crate::board::tile::{Placement, Tile};

/// Permute the placements of every on-board tile and recompute blocking.
///
/// The set of occupied placements is unchanged; only which word sits where
/// moves. Buffered and resolving tiles keep their places. Returns the number
/// of tiles that took part.
pub fn shuffle_placements<R: Rng + ?Sized>(tiles: &mut [Tile], rng: &mut R) -> usize {
    let mut placements: Vec<Placement> = tiles
        .iter()
        .filter(|t| t.is_on_board())
        .map(Tile::placement)
        .collect();
    placements.shuffle(rng);

    let count = placements.len();
    for (tile, placement) in tiles.iter_mut().filter(|t| t.is_on_board()).zip(placements) {
        tile.relocate(placement);
    }
    refresh_blocked(tiles);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::geometry::{COLUMN_STEP, Point};
    use crate::vocab::{Language, TileFace};
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn origin_key(p: Placement) -> (i64, i64, u32) {
        (p.origin.x as i64, p.origin.y as i64, p.layer)
    }

    #[test]
    fn test_occupied_placements_preserved() {
        let mut tiles: Vec<Tile> = (0..6)
            .map(|i| {
                let face = TileFace::new(format!("w{}", i / 2), "x", Language::English);
                Tile::new(face, Placement::new(Point::new(300.0 + i as f32 * COLUMN_STEP, 300.0), 0))
            })
            .collect();
        tiles[5].enter_buffer(Point::new(900.0, 60.0));
        let buffered_before = tiles[5].placement();

        let mut before: Vec<_> = tiles[..5].iter().map(|t| origin_key(t.placement())).collect();
        let mut rng = SmallRng::seed_from_u64(11);
        assert_eq!(shuffle_placements(&mut tiles, &mut rng), 5);
        let mut after: Vec<_> = tiles[..5].iter().map(|t| origin_key(t.placement())).collect();

        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
        assert_eq!(tiles[5].placement(), buffered_before);
        assert!(tiles[..5].iter().all(|t| t.anchor() == t.placement()));
    }
}
