//! # Move and Position Notation
//!
//! ## Moves
//!
//! `h<cell>t<tile>`, e.g. `h6t5` places a 5 on hex 6.
//!
//! ## Positions
//!
//! Pipe-delimited sections, each optional:
//!
//! ```text
//! h9:1,h6:5,h7:4|p1:2,3,4|p2:1,2,3|turn:1
//! ```
//!
//! - `h...` occupied cells as `h<cell>:<value>`; omitted cells are empty
//! - `p1:`/`p2:` remaining tiles in order, duplicates allowed; omitted means the
//!   configured starting set
//! - `turn:` player to move; omitted means player 1
//!
//! Loading parses everything before touching the board, so a malformed string
//! leaves the board unchanged.

use std::str::FromStr;

use super::action::Move;
use super::board::{GameConfig, TileBag, MAX_TILES_PER_PLAYER};
use super::state::BoardState;
use super::topology::NUM_CELLS;
use crate::error::{EngineError, Result};
use crate::game_trait::Player;

fn parse_number<T: FromStr>(text: &str) -> Option<T> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn malformed(section: &str, reason: impl Into<String>) -> EngineError {
    EngineError::MalformedPosition {
        section: section.to_string(),
        reason: reason.into(),
    }
}

/// Parse `h<cell>t<tile>` against the configured tile set.
pub fn parse_move(text: &str, config: &GameConfig) -> Result<Move> {
    let bad_format = || EngineError::InvalidMoveFormat(text.to_string());

    let body = text.trim().strip_prefix('h').ok_or_else(bad_format)?;
    let (cell_str, tile_str) = body.split_once('t').ok_or_else(bad_format)?;
    let cell = parse_number::<u32>(cell_str).ok_or_else(bad_format)?;
    let tile = parse_number::<u32>(tile_str).ok_or_else(bad_format)?;

    if cell as usize >= NUM_CELLS {
        return Err(EngineError::CellOutOfRange(cell));
    }
    if !config.is_tile_value(tile) {
        return Err(EngineError::InvalidTileValue(tile));
    }
    Ok(Move::new(cell as u8, tile as u8))
}

fn parse_tiles(section: &str, list: &str, player: Player, config: &GameConfig) -> Result<TileBag> {
    let mut bag = TileBag::new();
    for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let value = parse_number::<u32>(item)
            .ok_or_else(|| malformed(section, format!("bad tile value {:?}", item)))?;
        if !config.is_tile_value(value) {
            return Err(EngineError::InvalidTileValue(value));
        }
        if bag.len() == MAX_TILES_PER_PLAYER {
            return Err(EngineError::TooManyTiles {
                player: player.number(),
                count: list.split(',').filter(|s| !s.trim().is_empty()).count(),
                max: MAX_TILES_PER_PLAYER,
            });
        }
        bag.push(value as u8);
    }
    Ok(bag)
}

fn parse_cells(section: &str, cells: &mut [u8; NUM_CELLS], config: &GameConfig) -> Result<()> {
    for item in section.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (cell_str, value_str) = item
            .strip_prefix('h')
            .and_then(|rest| rest.split_once(':'))
            .ok_or_else(|| malformed(section, format!("expected h<cell>:<value>, got {:?}", item)))?;
        let cell = parse_number::<u32>(cell_str)
            .ok_or_else(|| malformed(section, format!("bad hex id {:?}", cell_str)))?;
        let value = parse_number::<u32>(value_str)
            .ok_or_else(|| malformed(section, format!("bad tile value {:?}", value_str)))?;

        if cell as usize >= NUM_CELLS {
            return Err(EngineError::CellOutOfRange(cell));
        }
        if !config.is_board_value(value) {
            return Err(EngineError::InvalidTileValue(value));
        }
        let slot = &mut cells[cell as usize];
        if *slot != 0 {
            return Err(EngineError::DuplicateCell(cell as u8));
        }
        *slot = value as u8;
    }
    Ok(())
}

impl BoardState {
    /// Create a board from a position string.
    pub fn from_position(config: GameConfig, text: &str) -> Result<Self> {
        let mut board = BoardState::new(config);
        board.load_position(text)?;
        Ok(board)
    }

    /// Replace the whole position. Derived state is rebuilt and history cleared.
    pub fn load_position(&mut self, text: &str) -> Result<()> {
        let config = self.config().clone();
        let mut cells = [0u8; NUM_CELLS];
        let mut bags = [
            config.starting_tiles(Player::One),
            config.starting_tiles(Player::Two),
        ];
        let mut to_move = Player::One;
        let mut seen_cells = false;

        for section in text.trim().split('|').map(str::trim) {
            if section.is_empty() {
                continue;
            }
            if let Some(list) = section.strip_prefix("p1:") {
                bags[0] = parse_tiles(section, list, Player::One, &config)?;
            } else if let Some(list) = section.strip_prefix("p2:") {
                bags[1] = parse_tiles(section, list, Player::Two, &config)?;
            } else if let Some(turn) = section.strip_prefix("turn:") {
                let n = parse_number::<u32>(turn.trim())
                    .ok_or_else(|| malformed(section, "turn must be 1 or 2"))?;
                to_move = u8::try_from(n)
                    .ok()
                    .and_then(|n| Player::try_from(n).ok())
                    .ok_or(EngineError::InvalidPlayer(n))?;
            } else if section.starts_with('h') {
                if seen_cells {
                    return Err(malformed(section, "more than one hex section"));
                }
                seen_cells = true;
                parse_cells(section, &mut cells, &config)?;
            } else {
                return Err(malformed(section, "unknown section"));
            }
        }

        self.install(cells, bags, to_move);
        Ok(())
    }

    /// Render the position. Cells ascend; tile order is preserved.
    pub fn save_position(&self) -> String {
        let cells = self
            .cells()
            .iter()
            .enumerate()
            .filter(|(_, v)| **v != 0)
            .map(|(c, v)| format!("h{}:{}", c, v))
            .collect::<Vec<_>>()
            .join(",");

        let tiles = |player: Player| {
            self.remaining_tiles(player)
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",")
        };

        format!(
            "{}|p1:{}|p2:{}|turn:{}",
            cells,
            tiles(Player::One),
            tiles(Player::Two),
            self.current_player().number()
        )
    }

    /// Parse a move in the context of this board's configuration.
    pub fn parse_move(&self, text: &str) -> Result<Move> {
        parse_move(text, self.config())
    }
}
