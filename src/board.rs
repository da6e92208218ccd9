//! Board engine.
//!
//! Pure board logic in logical coordinates:
//! - Layer layouts and tile placements
//! - Tiles, the blocking rules and the staging buffer
//! - Undo history, hints and shuffling
//! - Accessibility symbols

mod blocking;
mod buffer;
mod geometry;
mod history;
mod hint;
mod layout;
mod shuffle;
mod symbols;
mod tile;

pub use blocking::{Constraint, compute_blocked, find_blockers, refresh_blocked};
pub use buffer::StagingBuffer;
pub use geometry::{
    BOARD_TOP, BUFFER_LAYER, COLUMN_STEP, CONTACT_TOLERANCE, DESIGN_HEIGHT, DESIGN_WIDTH,
    LAYER_RISE, Point, ROW_STEP, RESOLVING_LAYER, Rect, SLOT_COUNT, SLOT_GAP, SLOT_TOP,
    TILE_HEIGHT, TILE_WIDTH, TUTORIAL_BOARD_TOP, merge_point, slot_origin, slot_strip,
};
pub use history::MoveHistory;
pub use hint::find_hint;
pub use layout::{LayerSpec, Layout, MAX_COLS, MAX_LAYERS, MAX_ROWS};
pub use shuffle::shuffle_placements;
pub use symbols::{SYMBOL_COUNT, Shape, Symbol, SymbolColor, assign_symbols};
pub use tile::{Flash, IN_TRANSIT_DISTANCE, Placement, Tile, TileEffect, TileId, TileState};
