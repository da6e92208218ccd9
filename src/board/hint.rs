//! Finding a playable pair.

use crate::board::tile::{Tile, TileId};

/// First pair of selectable tiles sharing a pair id, in arena order.
#[must_use]
pub fn find_hint(tiles: &[Tile]) -> Option<(TileId, TileId)> {
    let free: Vec<(usize, &Tile)> = tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| t.is_selectable())
        .collect();

    free.iter().enumerate().find_map(|(i, &(a, ta))| {
        free[i + 1..]
            .iter()
            .find(|(_, tb)| tb.pair_id() == ta.pair_id())
            .map(|&(b, _)| (TileId(a), TileId(b)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::blocking::refresh_blocked;
    use crate::board::geometry::{COLUMN_STEP, Point};
    use crate::board::tile::Placement;
    use crate::vocab::{Language, TileFace};

    fn row(ids: &[&str]) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let face = TileFace::new(*id, *id, Language::English);
                Tile::new(face, Placement::new(Point::new(400.0 + i as f32 * COLUMN_STEP, 300.0), 0))
            })
            .collect();
        refresh_blocked(&mut tiles);
        tiles
    }

    #[test]
    fn test_finds_pair_on_open_ends() {
        let tiles = row(&["a", "b", "c", "a"]);
        assert_eq!(find_hint(&tiles), Some((TileId(0), TileId(3))));
    }

    #[test]
    fn test_blocked_partner_is_not_hinted() {
        let tiles = row(&["a", "a", "b", "c"]);
        assert_eq!(find_hint(&tiles), None);
    }

    #[test]
    fn test_removed_tiles_are_not_hinted() {
        let mut tiles = row(&["a", "a"]);
        tiles[1].mark_removed();
        assert_eq!(find_hint(&tiles), None);
    }
}
