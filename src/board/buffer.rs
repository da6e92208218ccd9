//! The four-slot staging buffer.
//!
//! Slots hold arena indices, never tiles. A tile index appears in at most one
//! slot at a time.

use crate::board::geometry::SLOT_COUNT;
use crate::board::tile::TileId;
use crate::error::BufferFull;

/// Fixed-size holding area for selected tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StagingBuffer {
    slots: [Option<TileId>; SLOT_COUNT],
}

impl StagingBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `id` into the first empty slot.
    ///
    /// A tile that is already buffered keeps its slot.
    ///
    /// # Errors
    ///
    /// Returns [`BufferFull`] when every slot is occupied.
    pub fn place(&mut self, id: TileId) -> Result<usize, BufferFull> {
        if let Some(slot) = self.slot_of(id) {
            return Ok(slot);
        }
        let slot = self.slots.iter().position(Option::is_none).ok_or(BufferFull)?;
        self.slots[slot] = Some(id);
        Ok(slot)
    }

    /// Clear the slot holding `id`, returning its index.
    pub fn remove(&mut self, id: TileId) -> Option<usize> {
        let slot = self.slot_of(id)?;
        self.slots[slot] = None;
        Some(slot)
    }

    /// Slot index holding `id`.
    #[must_use]
    pub fn slot_of(&self, id: TileId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(id))
    }

    /// Tile in `slot`, if any.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<TileId> {
        self.slots.get(slot).copied().flatten()
    }

    /// First two buffered tiles with equal keys, in slot order.
    pub fn find_match<K, F>(&self, mut key: F) -> Option<(TileId, TileId)>
    where
        K: PartialEq,
        F: FnMut(TileId) -> K,
    {
        let ids: Vec<(TileId, K)> = self.iter().map(|(_, id)| (id, key(id))).collect();
        for (i, (a, ka)) in ids.iter().enumerate() {
            if let Some((b, _)) = ids[i + 1..].iter().find(|(_, kb)| kb == ka) {
                return Some((*a, *b));
            }
        }
        None
    }

    /// Shift occupied slots left to close gaps, keeping their order.
    ///
    /// Returns the tiles whose slot index changed, with their new index.
    pub fn compact(&mut self) -> Vec<(TileId, usize)> {
        let mut moved = Vec::new();
        let mut next = 0;
        for slot in 0..SLOT_COUNT {
            if let Some(id) = self.slots[slot] {
                if slot != next {
                    self.slots[next] = Some(id);
                    self.slots[slot] = None;
                    moved.push((id, next));
                }
                next += 1;
            }
        }
        moved
    }

    /// Whether every slot is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Whether every slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Number of occupied slots.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Number of empty slots.
    #[must_use]
    pub fn free(&self) -> usize {
        SLOT_COUNT - self.occupied()
    }

    /// Occupied slots as `(slot, tile)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, TileId)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, id)| id.map(|id| (slot, id)))
    }

    /// Empty every slot.
    pub fn clear(&mut self) {
        self.slots = [None; SLOT_COUNT];
    }
}
