//! # Hexuki Game Configuration
//!
//! Tile sets and rule toggles shared (via `Arc`) by every board of a game.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::topology::{NUM_CELLS, STARTING_TILE};
use crate::error::{EngineError, Result};
use crate::game_trait::Player;

/// Largest tile value a configuration may use. Bounds the Zobrist tables.
pub const MAX_TILE_VALUE: u8 = 63;

/// Most tiles a single player may hold. Ten lets one player fill the 19th
/// cell of a puzzle that starts with the center empty.
pub const MAX_TILES_PER_PLAYER: usize = 10;

/// Standard tile set: one each of 1..=9.
pub const DEFAULT_TILES: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// A player's remaining tiles, in notation order. Duplicates allowed.
pub type TileBag = SmallVec<[u8; MAX_TILES_PER_PLAYER]>;

/// Immutable per-game configuration.
///
/// Fields are private so every value has passed [`GameConfig::validate`];
/// deserialization goes through the same check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameConfigDef", into = "GameConfigDef")]
pub struct GameConfig {
    p1_tiles: Vec<u8>,
    p2_tiles: Vec<u8>,
    anti_symmetry: bool,
}

/// Serialized form of [`GameConfig`]. Missing fields take the standard values.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
struct GameConfigDef {
    /// Starting tile multiset for player 1.
    p1_tiles: Vec<u8>,
    /// Starting tile multiset for player 2.
    p2_tiles: Vec<u8>,
    /// Forbid moves that leave the board mirror-symmetric.
    anti_symmetry: bool,
}

impl Default for GameConfigDef {
    fn default() -> Self {
        GameConfig::default().into()
    }
}

impl TryFrom<GameConfigDef> for GameConfig {
    type Error = EngineError;

    fn try_from(def: GameConfigDef) -> Result<Self> {
        GameConfig::new(def.p1_tiles, def.p2_tiles, def.anti_symmetry)
    }
}

impl From<GameConfig> for GameConfigDef {
    fn from(config: GameConfig) -> Self {
        Self {
            p1_tiles: config.p1_tiles,
            p2_tiles: config.p2_tiles,
            anti_symmetry: config.anti_symmetry,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            p1_tiles: DEFAULT_TILES.to_vec(),
            p2_tiles: DEFAULT_TILES.to_vec(),
            anti_symmetry: false,
        }
    }
}

impl GameConfig {
    /// Standard rules: 1..=9 for both players, anti-symmetry off.
    pub fn standard() -> Self {
        Self::default()
    }

    /// Create a validated configuration.
    pub fn new(p1_tiles: Vec<u8>, p2_tiles: Vec<u8>, anti_symmetry: bool) -> Result<Self> {
        let config = Self {
            p1_tiles,
            p2_tiles,
            anti_symmetry,
        };
        config.validate()?;
        Ok(config)
    }

    /// Standard tiles with the anti-symmetry rule switched on.
    pub fn with_anti_symmetry() -> Self {
        Self {
            anti_symmetry: true,
            ..Self::default()
        }
    }

    /// Check tile ranges and counts.
    fn validate(&self) -> Result<()> {
        for (player, tiles) in [(1u8, &self.p1_tiles), (2u8, &self.p2_tiles)] {
            if tiles.is_empty() {
                return Err(EngineError::InvalidConfig(format!(
                    "player {} has no tiles",
                    player
                )));
            }
            if tiles.len() > MAX_TILES_PER_PLAYER {
                return Err(EngineError::TooManyTiles {
                    player,
                    count: tiles.len(),
                    max: MAX_TILES_PER_PLAYER,
                });
            }
            if let Some(&bad) = tiles.iter().find(|&&v| v == 0 || v > MAX_TILE_VALUE) {
                return Err(EngineError::InvalidTileValue(bad as u32));
            }
        }
        if self.p1_tiles.len() + self.p2_tiles.len() > NUM_CELLS {
            return Err(EngineError::InvalidConfig(format!(
                "{} tiles cannot fit on {} cells",
                self.p1_tiles.len() + self.p2_tiles.len(),
                NUM_CELLS
            )));
        }
        Ok(())
    }

    pub fn p1_tiles(&self) -> &[u8] {
        &self.p1_tiles
    }

    pub fn p2_tiles(&self) -> &[u8] {
        &self.p2_tiles
    }

    /// Whether the anti-symmetry toggle is on. See
    /// [`enforces_anti_symmetry`](Self::enforces_anti_symmetry) for when it applies.
    pub fn anti_symmetry(&self) -> bool {
        self.anti_symmetry
    }

    /// Starting multiset for `player`.
    pub fn starting_tiles(&self, player: Player) -> TileBag {
        match player {
            Player::One => self.p1_tiles.iter().copied().collect(),
            Player::Two => self.p2_tiles.iter().copied().collect(),
        }
    }

    /// Whether `value` belongs to the configured tile-value set (either player).
    pub fn is_tile_value(&self, value: u32) -> bool {
        value <= MAX_TILE_VALUE as u32
            && self
                .p1_tiles
                .iter()
                .chain(self.p2_tiles.iter())
                .any(|&v| v as u32 == value)
    }

    /// Whether `value` may sit on the board: a configured tile or the seeded
    /// center tile.
    pub fn is_board_value(&self, value: u32) -> bool {
        value == STARTING_TILE as u32 || self.is_tile_value(value)
    }

    /// Distinct configured tile values, ascending.
    pub fn tile_values(&self) -> Vec<u8> {
        let mut values: Vec<u8> = self
            .p1_tiles
            .iter()
            .chain(self.p2_tiles.iter())
            .copied()
            .collect();
        values.sort_unstable();
        values.dedup();
        values
    }

    /// Whether the anti-symmetry rule is in force for this configuration.
    pub fn enforces_anti_symmetry(&self) -> bool {
        if !self.anti_symmetry {
            return false;
        }
        let mut a = self.p1_tiles.clone();
        let mut b = self.p2_tiles.clone();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}
