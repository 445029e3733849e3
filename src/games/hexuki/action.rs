//! # Hexuki Move Type
//!
//! A move places one tile of the mover's on one empty cell.

use std::fmt;

use super::board::GameConfig;
use super::topology::NUM_CELLS;

/// Place `tile` on `cell`. Notation: `h<cell>t<tile>`, e.g. `h6t5`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    pub cell: u8,
    pub tile: u8,
}

impl Move {
    pub const fn new(cell: u8, tile: u8) -> Self {
        Self { cell, tile }
    }

    #[inline]
    pub fn cell_index(self) -> usize {
        self.cell as usize
    }

    /// Cell in range and tile drawn from the configured tile-value set.
    /// Says nothing about legality in a particular position.
    pub fn is_well_formed(self, config: &GameConfig) -> bool {
        (self.cell as usize) < NUM_CELLS && config.is_tile_value(self.tile as u32)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}t{}", self.cell, self.tile)
    }
}
