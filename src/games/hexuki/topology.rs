//! # Hexuki Board Topology
//!
//! Static tables for the fixed 19-cell hex board.
//!
//! ## Layout
//!
//! Cells are addressed by id and stored with (row, col) coordinates on a
//! doubled-row grid. Vertical neighbors are two rows apart, diagonal
//! neighbors one row and one column apart:
//!
//! ```text
//!             0
//!          1     2
//!       3     4     5
//!          6     7
//!       8     9    10
//!         11    12
//!      13    14    15
//!         16    17
//!            18
//! ```
//!
//! Cell 9 is the center. Column 2 (cells 0, 4, 9, 14, 18) is the mirror axis.
//!
//! Constant data lives in `const` tables; derived adjacency masks and the
//! chain-detection rays are built once into a process-wide [`Topology`].

use std::sync::OnceLock;

/// Number of cells on the board.
pub const NUM_CELLS: usize = 19;

/// Center cell, pre-seeded with [`STARTING_TILE`] on a fresh board.
pub const CENTER_CELL: usize = 9;

/// Value of the pre-seeded center tile.
pub const STARTING_TILE: u8 = 1;

/// Cell identity and coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub id: u8,
    pub row: i8,
    pub col: i8,
}

const fn cell(id: u8, row: i8, col: i8) -> Cell {
    Cell { id, row, col }
}

pub const CELLS: [Cell; NUM_CELLS] = [
    cell(0, 0, 2),
    cell(1, 1, 1),
    cell(2, 1, 3),
    cell(3, 2, 0),
    cell(4, 2, 2),
    cell(5, 2, 4),
    cell(6, 3, 1),
    cell(7, 3, 3),
    cell(8, 4, 0),
    cell(9, 4, 2),
    cell(10, 4, 4),
    cell(11, 5, 1),
    cell(12, 5, 3),
    cell(13, 6, 0),
    cell(14, 6, 2),
    cell(15, 6, 4),
    cell(16, 7, 1),
    cell(17, 7, 3),
    cell(18, 8, 2),
];

/// Hex direction as (row, col) offsets.
pub type Direction = (i8, i8);

pub const UP: Direction = (-2, 0);
pub const UP_RIGHT: Direction = (-1, 1);
pub const DOWN_RIGHT: Direction = (1, 1);
pub const DOWN: Direction = (2, 0);
pub const DOWN_LEFT: Direction = (1, -1);
pub const UP_LEFT: Direction = (-1, -1);

pub const HEX_DIRECTIONS: [Direction; 6] = [UP, UP_RIGHT, DOWN_RIGHT, DOWN, DOWN_LEFT, UP_LEFT];

/// Seeds for chain detection: walk from `start` in `dir` until leaving the board.
/// Together the 15 rays cover every cell along all three line axes.
pub const CHAIN_SEEDS: [(usize, Direction); 15] = [
    (0, DOWN_LEFT),
    (0, DOWN),
    (0, DOWN_RIGHT),
    (1, DOWN),
    (1, DOWN_RIGHT),
    (2, DOWN_LEFT),
    (2, DOWN),
    (3, DOWN),
    (3, DOWN_RIGHT),
    (5, DOWN_LEFT),
    (5, DOWN),
    (8, DOWN_RIGHT),
    (10, DOWN_LEFT),
    (13, DOWN_RIGHT),
    (15, DOWN_LEFT),
];

/// Player 1 scores along the down-right diagonals.
pub const P1_CHAINS: [&[usize]; 5] = [
    &[0, 2, 5],
    &[1, 4, 7, 10],
    &[3, 6, 9, 12, 15],
    &[8, 11, 14, 17],
    &[13, 16, 18],
];

/// Player 2 scores along the down-left diagonals.
pub const P2_CHAINS: [&[usize]; 5] = [
    &[0, 1, 3],
    &[2, 4, 6, 8],
    &[5, 7, 9, 11, 13],
    &[10, 12, 14, 16],
    &[15, 17, 18],
];

/// Vertical mirror across the center column. Center-column cells map to themselves.
pub const MIRROR: [usize; NUM_CELLS] = [
    0, 2, 1, 5, 4, 3, 7, 6, 10, 9, 8, 12, 11, 15, 14, 13, 17, 16, 18,
];

/// Cells preferred by move ordering.
pub const CENTRAL_CELLS: [usize; 6] = [4, 6, 7, 9, 11, 12];

#[inline]
pub const fn bit(cell: usize) -> u32 {
    1u32 << cell
}

/// Find the cell at (row, col), if any.
pub fn cell_at(row: i8, col: i8) -> Option<usize> {
    CELLS
        .iter()
        .position(|c| c.row == row && c.col == col)
}

/// Derived lookup tables, built once per process.
#[derive(Debug)]
pub struct Topology {
    /// Bitmask of all neighbors of each cell.
    pub adjacency: [u32; NUM_CELLS],
    /// Cells visited by each of the 15 chain-detection rays, in walk order.
    pub rays: Vec<Vec<u8>>,
}

impl Topology {
    fn build() -> Self {
        let mut adjacency = [0u32; NUM_CELLS];

        for c in CELLS.iter() {
            let id = c.id as usize;
            for &(dr, dc) in HEX_DIRECTIONS.iter() {
                if let Some(adj) = cell_at(c.row + dr, c.col + dc) {
                    adjacency[id] |= bit(adj);
                }
            }
        }

        let rays = CHAIN_SEEDS
            .iter()
            .map(|&(start, (dr, dc))| {
                let mut ray = Vec::with_capacity(5);
                let mut current = Some(start);
                while let Some(id) = current {
                    ray.push(id as u8);
                    let c = CELLS[id];
                    current = cell_at(c.row + dr, c.col + dc);
                }
                ray
            })
            .collect();

        Topology { adjacency, rays }
    }
}

static TOPOLOGY: OnceLock<Topology> = OnceLock::new();

/// Process-wide topology tables.
pub fn topology() -> &'static Topology {
    TOPOLOGY.get_or_init(Topology::build)
}
