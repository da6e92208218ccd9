//! Procedural layer layouts.
//!
//! A layout is an ordered stack of near-square grids. Layer 0 is the base;
//! every higher layer is centred on it and raised slightly so the stack
//! reads as a pyramid.

// Grid dimensions are at most 7, so the float casts are exact.
#![allow(clippy::cast_precision_loss)]

use serde::Serialize;

use crate::board::geometry::{COLUMN_STEP, DESIGN_WIDTH, LAYER_RISE, Point, ROW_STEP};
use crate::board::tile::Placement;

/// Maximum rows in any layer.
pub const MAX_ROWS: u32 = 7;
/// Maximum columns in any layer.
pub const MAX_COLS: u32 = 7;
/// Tiles requested for the base layer at most.
const BASE_LAYER_CAPACITY: usize = (MAX_ROWS * MAX_COLS) as usize;
/// Tiles requested for the second layer at most.
const SECOND_LAYER_CAPACITY: usize = 36;
/// Layers generated at most. Tiles beyond this bound are not placed.
pub const MAX_LAYERS: usize = 6;

/// Grid dimensions of one layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerSpec {
    /// Number of rows.
    pub rows: u32,
    /// Number of columns.
    pub cols: u32,
}

impl LayerSpec {
    /// Create a layer spec.
    #[must_use]
    pub const fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Number of tile slots in the grid.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        (self.rows * self.cols) as usize
    }

    /// The near-square grid for `count` tiles, clamped to 7×7.
    #[must_use]
    pub fn near_square(count: usize) -> Self {
        let count = u32::try_from(count.max(1)).unwrap_or(u32::MAX);
        let mut cols = ceil_sqrt(count).min(MAX_COLS);
        let mut rows = count.div_ceil(cols);
        if rows > MAX_ROWS {
            rows = MAX_ROWS;
            cols = count.div_ceil(rows).min(MAX_COLS);
        }
        Self { rows, cols }
    }
}

/// Smallest `s` with `s * s >= n`.
fn ceil_sqrt(n: u32) -> u32 {
    let mut s = 0u32;
    while s.saturating_mul(s) < n {
        s += 1;
    }
    s
}

/// An ordered stack of layer specs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Layout {
    layers: Vec<LayerSpec>,
}

impl Layout {
    /// Build a layout from explicit layers (used for the tutorial rounds).
    #[must_use]
    pub fn from_layers(layers: Vec<LayerSpec>) -> Self {
        Self { layers }
    }

    /// Generate the layer stack for `pair_count` pairs.
    ///
    /// The base layer takes up to 49 tiles, evened out so a split never
    /// strands half a pair, the second layer up to 36, and every further
    /// layer takes all that remains. Each layer consumes its full grid
    /// capacity. Generation stops after [`MAX_LAYERS`]; check
    /// [`Layout::capacity`] against the tile count to detect truncation.
    #[must_use]
    pub fn generate(pair_count: usize) -> Self {
        let mut remaining = pair_count * 2;
        let mut layers = Vec::new();

        while remaining > 0 && layers.len() < MAX_LAYERS {
            let count = match layers.len() {
                0 => even_base_count(remaining),
                1 => remaining.min(SECOND_LAYER_CAPACITY),
                _ => remaining,
            };
            let spec = LayerSpec::near_square(count);
            remaining = remaining.saturating_sub(spec.capacity());
            layers.push(spec);
        }

        if remaining > 0 {
            tracing::warn!(
                pair_count,
                unplaced = remaining,
                "layout reached {MAX_LAYERS} layers; excess tiles are not placed"
            );
        }

        Self { layers }
    }

    /// The layers, base first.
    #[must_use]
    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the layout has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Total tile slots across all layers.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.layers.iter().map(LayerSpec::capacity).sum()
    }

    /// Concrete placements for the first `tile_count` slots.
    ///
    /// Slots are filled layer by layer, row by row. The base layer is centred
    /// horizontally in the design space and `top` is its upper edge.
    #[must_use]
    pub fn placements(&self, tile_count: usize, top: f32) -> Vec<Placement> {
        let Some(base) = self.layers.first() else {
            return Vec::new();
        };
        let total_width = base.cols as f32 * COLUMN_STEP;
        let start_x = ((DESIGN_WIDTH - total_width) / 2.0).floor();

        let mut out = Vec::with_capacity(tile_count.min(self.capacity()));
        for (layer, spec) in (0u32..).zip(&self.layers) {
            let layer_width = spec.cols as f32 * COLUMN_STEP;
            let centre_offset = ((total_width - layer_width) / 2.0).floor();
            let elevation = -(layer as f32 * LAYER_RISE);
            for row in 0..spec.rows {
                for col in 0..spec.cols {
                    if out.len() >= tile_count {
                        return out;
                    }
                    let origin = Point::new(
                        start_x + centre_offset + col as f32 * COLUMN_STEP,
                        top + row as f32 * ROW_STEP + elevation,
                    );
                    out.push(Placement::new(origin, layer));
                }
            }
        }
        out
    }
}

/// Base-layer tile count: capped at 49 and made even when more tiles follow.
///
/// Rounds up to even where the cap allows it and down otherwise, so the base
/// never exceeds 7×7.
fn even_base_count(remaining: usize) -> usize {
    let count = remaining.min(BASE_LAYER_CAPACITY);
    if count % 2 == 1 && count < remaining {
        if count < BASE_LAYER_CAPACITY { count + 1 } else { count - 1 }
    } else {
        count
    }
}
