//! Shape and colour markers that help players pair tiles without reading.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;

/// Marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// Filled circle.
    Circle,
    /// Filled square.
    Square,
    /// Upward triangle.
    Triangle,
    /// Filled diamond.
    Diamond,
    /// Diagonal cross.
    Cross,
    /// Five-point star.
    Star,
    /// Filled pentagon.
    Pentagon,
    /// Filled hexagon.
    Hexagon,
    /// Hollow circle.
    Ring,
    /// Downward triangle.
    InvTriangle,
    /// Hourglass.
    Hourglass,
    /// Square with a diagonal cross.
    BoxCross,
    /// Upright cross.
    Plus,
    /// Concentric rings.
    Target,
    /// Horizontal bar.
    Bar,
    /// Crescent moon.
    Moon,
    /// Hollow diamond.
    Rhombus,
    /// Hatched square.
    Grid,
}

impl Shape {
    /// Every shape, in a fixed order.
    pub const ALL: [Shape; 18] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Diamond,
        Shape::Cross,
        Shape::Star,
        Shape::Pentagon,
        Shape::Hexagon,
        Shape::Ring,
        Shape::InvTriangle,
        Shape::Hourglass,
        Shape::BoxCross,
        Shape::Plus,
        Shape::Target,
        Shape::Bar,
        Shape::Moon,
        Shape::Rhombus,
        Shape::Grid,
    ];

    /// Single-character glyph for text front ends.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Shape::Circle => '●',
            Shape::Square => '■',
            Shape::Triangle => '▲',
            Shape::Diamond => '◆',
            Shape::Cross => '✕',
            Shape::Star => '★',
            Shape::Pentagon => '⬟',
            Shape::Hexagon => '⬢',
            Shape::Ring => '○',
            Shape::InvTriangle => '▼',
            Shape::Hourglass => '⧗',
            Shape::BoxCross => '⊠',
            Shape::Plus => '✚',
            Shape::Target => '◎',
            Shape::Bar => '▬',
            Shape::Moon => '☾',
            Shape::Rhombus => '◇',
            Shape::Grid => '▦',
        }
    }
}

/// Marker colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolColor {
    /// Red.
    Red,
    /// Blue.
    Blue,
    /// Green.
    Green,
    /// Yellow.
    Yellow,
    /// Orange.
    Orange,
    /// Pink.
    Pink,
    /// Purple.
    Purple,
    /// Black.
    Black,
    /// White.
    White,
    /// Brown.
    Brown,
}

impl SymbolColor {
    /// Every colour, in a fixed order.
    pub const ALL: [SymbolColor; 10] = [
        SymbolColor::Red,
        SymbolColor::Blue,
        SymbolColor::Green,
        SymbolColor::Yellow,
        SymbolColor::Orange,
        SymbolColor::Pink,
        SymbolColor::Purple,
        SymbolColor::Black,
        SymbolColor::White,
        SymbolColor::Brown,
    ];

    /// RGB value.
    #[must_use]
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            SymbolColor::Red => (255, 0, 0),
            SymbolColor::Blue => (0, 102, 204),
            SymbolColor::Green => (0, 204, 102),
            SymbolColor::Yellow => (255, 255, 0),
            SymbolColor::Orange => (255, 153, 0),
            SymbolColor::Pink => (255, 102, 178),
            SymbolColor::Purple => (153, 51, 255),
            SymbolColor::Black => (0, 0, 0),
            SymbolColor::White => (255, 255, 255),
            SymbolColor::Brown => (101, 67, 33),
        }
    }
}

/// A shape and colour combination shared by both tiles of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Symbol {
    /// Marker shape.
    pub shape: Shape,
    /// Marker colour.
    pub color: SymbolColor,
}

/// Number of distinct symbols available.
pub const SYMBOL_COUNT: usize = Shape::ALL.len() * SymbolColor::ALL.len();

/// Draw `count` symbols from the shuffled shape × colour product.
///
/// Symbols are unique while `count` fits in [`SYMBOL_COUNT`]; past that the
/// shuffled sequence repeats from its start.
pub fn assign_symbols<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Symbol> {
    let mut all: Vec<Symbol> = Shape::ALL
        .iter()
        .flat_map(|&shape| SymbolColor::ALL.iter().map(move |&color| Symbol { shape, color }))
        .collect();
    all.shuffle(rng);
    all.into_iter().cycle().take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::collections::HashSet;

    #[test]
    fn test_unique_within_product() {
        let mut rng = SmallRng::seed_from_u64(7);
        let symbols = assign_symbols(SYMBOL_COUNT, &mut rng);
        let unique: HashSet<_> = symbols.iter().collect();
        assert_eq!(unique.len(), SYMBOL_COUNT);
    }

    #[test]
    fn test_cycles_past_product() {
        let mut rng = SmallRng::seed_from_u64(7);
        let symbols = assign_symbols(SYMBOL_COUNT + 3, &mut rng);
        assert_eq!(symbols.len(), SYMBOL_COUNT + 3);
        assert_eq!(symbols[SYMBOL_COUNT..], symbols[..3]);
    }

    #[test]
    fn test_zero() {
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(assign_symbols(0, &mut rng).is_empty());
    }
}
