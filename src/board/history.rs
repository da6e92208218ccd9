//! Undo history of buffer insertions.

use crate::board::tile::TileId;

/// Stack of tiles in the order they entered the buffer.
///
/// Entries for tiles that were matched away stay in the stack and are
/// skipped when popped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    entries: Vec<TileId>,
}

impl MoveHistory {
    /// Create an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a buffer insertion.
    pub fn push(&mut self, id: TileId) {
        self.entries.push(id);
    }

    /// Pop the most recent entry, restorable or not.
    pub fn pop(&mut self) -> Option<TileId> {
        self.entries.pop()
    }

    /// Pop entries until one satisfies `restorable`, discarding the rest.
    pub fn pop_restorable(&mut self, mut restorable: impl FnMut(TileId) -> bool) -> Option<TileId> {
        while let Some(id) = self.entries.pop() {
            if restorable(id) {
                return Some(id);
            }
        }
        None
    }

    /// Forget every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries, including inert ones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_restorable_skips_inert_entries() {
        let mut history = MoveHistory::new();
        for i in 0..4 {
            history.push(TileId(i));
        }
        // Tiles 2 and 3 were matched away.
        let got = history.pop_restorable(|id| id.0 < 2);
        assert_eq!(got, Some(TileId(1)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_pop_restorable_drains_when_nothing_restorable() {
        let mut history = MoveHistory::new();
        history.push(TileId(0));
        history.push(TileId(1));
        assert_eq!(history.pop_restorable(|_| false), None);
        assert!(history.is_empty());
    }
}
