//! What each level deals.

use crate::board::{BOARD_TOP, LayerSpec, Layout, TUTORIAL_BOARD_TOP};

/// Most pairs any generated level deals.
pub const MAX_PLANNED_PAIRS: usize = 60;

/// Share of a level's pairs drawn from review words.
const REVIEW_SHARE: f64 = 0.3;

/// The deal for one level.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelPlan {
    /// Level number, starting at 1.
    pub level: u32,
    /// Word pairs to deal.
    pub pair_count: usize,
    /// How many of those may be review words.
    pub review_count: usize,
    /// Layer stack the tiles are placed on.
    pub layout: Layout,
    /// Top edge of the base layer.
    pub top: f32,
    /// Instruction shown on the tutorial levels.
    pub tutorial: Option<&'static str>,
}

impl LevelPlan {
    /// Plan for `level`: two fixed tutorial levels, then a growing pyramid.
    #[must_use]
    pub fn for_level(level: u32) -> Self {
        match level {
            0 | 1 => Self::tutorial(1, 1, "Select the matching tiles!"),
            2 => Self::tutorial(2, 2, "Tiles closed on both sides cannot be selected!"),
            _ => {
                let pairs = usize::try_from(level)
                    .map_or(MAX_PLANNED_PAIRS, |l| l.saturating_mul(2).saturating_add(8))
                    .min(MAX_PLANNED_PAIRS);
                Self::with_pairs(level, pairs)
            }
        }
    }

    /// A generated plan with an explicit pair count.
    ///
    /// The pair count is clamped to what the generated layout can hold.
    #[must_use]
    pub fn with_pairs(level: u32, pair_count: usize) -> Self {
        let pair_count = pair_count.max(1);
        let layout = Layout::generate(pair_count);
        let pair_count = pair_count.min(layout.capacity() / 2);
        Self {
            level,
            pair_count,
            review_count: review_count(pair_count),
            layout,
            top: BOARD_TOP,
            tutorial: None,
        }
    }

    fn tutorial(level: u32, pairs: u32, text: &'static str) -> Self {
        Self {
            level,
            pair_count: pairs as usize,
            review_count: 0,
            layout: Layout::from_layers(vec![LayerSpec::new(1, pairs * 2)]),
            top: TUTORIAL_BOARD_TOP,
            tutorial: Some(text),
        }
    }

    /// Tile count of the full deal.
    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.pair_count * 2
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn review_count(pair_count: usize) -> usize {
    (pair_count as f64 * REVIEW_SHARE).floor() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tutorial_levels() {
        let one = LevelPlan::for_level(1);
        assert_eq!(one.pair_count, 1);
        assert_eq!(one.layout.layers(), &[LayerSpec::new(1, 2)]);
        assert!(one.tutorial.is_some());
        assert!((one.top - TUTORIAL_BOARD_TOP).abs() < f32::EPSILON);

        let two = LevelPlan::for_level(2);
        assert_eq!(two.pair_count, 2);
        assert_eq!(two.layout.layers(), &[LayerSpec::new(1, 4)]);
        assert_eq!(two.review_count, 0);
    }

    #[test]
    fn test_generated_levels_grow_then_cap() {
        let three = LevelPlan::for_level(3);
        assert_eq!(three.pair_count, 14);
        assert_eq!(three.review_count, 4);
        assert!(three.tutorial.is_none());

        let big = LevelPlan::for_level(40);
        assert_eq!(big.pair_count, MAX_PLANNED_PAIRS);
        assert_eq!(big.review_count, 18);
        assert!(big.layout.capacity() >= big.tile_count());
    }

    #[test]
    fn test_with_pairs_clamps_to_layout() {
        let plan = LevelPlan::with_pairs(99, 500);
        assert!(plan.tile_count() <= plan.layout.capacity());
        assert!(plan.pair_count < 500);
    }
}
