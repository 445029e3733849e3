#[cfg(test)]
mod tests {
    use super::super::action::Move;
    use super::super::board::GameConfig;
    use super::super::notation::*;
    use super::super::state::BoardState;
    use crate::error::EngineError;
    use crate::game_trait::Player;

    fn config() -> GameConfig {
        GameConfig::standard()
    }

    #[test]
    fn test_parse_move() {
        assert_eq!(parse_move("h6t5", &config()), Ok(Move::new(6, 5)));
        assert_eq!(parse_move("h18t9", &config()), Ok(Move::new(18, 9)));
        assert_eq!(parse_move(" h0t1 ", &config()), Ok(Move::new(0, 1)));
    }

    #[test]
    fn test_move_display_matches_notation() {
        let mv = Move::new(12, 7);
        assert_eq!(mv.to_string(), "h12t7");
        assert_eq!(parse_move(&mv.to_string(), &config()), Ok(mv));
    }

    #[test]
    fn test_parse_move_rejects_out_of_range() {
        assert_eq!(
            parse_move("h19t5", &config()),
            Err(EngineError::CellOutOfRange(19))
        );
        assert_eq!(
            parse_move("h6t10", &config()),
            Err(EngineError::InvalidTileValue(10))
        );
        assert_eq!(
            parse_move("h6t0", &config()),
            Err(EngineError::InvalidTileValue(0))
        );
    }

    #[test]
    fn test_parse_move_rejects_bad_format() {
        for text in ["", "6t5", "h6", "hxt5", "h6t", "h-1t5", "h6t5x", "t5h6"] {
            assert!(
                matches!(parse_move(text, &config()), Err(EngineError::InvalidMoveFormat(_))),
                "{:?} should be a format error",
                text
            );
        }
    }

    #[test]
    fn test_parse_move_uses_configured_tiles() {
        let config = GameConfig::new(vec![10, 12], vec![11, 12], false).unwrap();
        assert_eq!(parse_move("h4t12", &config), Ok(Move::new(4, 12)));
        assert_eq!(
            parse_move("h4t5", &config),
            Err(EngineError::InvalidTileValue(5))
        );
    }

    #[test]
    fn test_save_fresh_board() {
        let board = BoardState::new(config());
        assert_eq!(
            board.save_position(),
            "h9:1|p1:1,2,3,4,5,6,7,8,9|p2:1,2,3,4,5,6,7,8,9|turn:1"
        );
    }

    #[test]
    fn test_load_minimal_position_uses_defaults() {
        let board = BoardState::from_position(config(), "h9:1|turn:1").unwrap();
        assert_eq!(board, BoardState::new(config()));
    }

    #[test]
    fn test_load_then_save_sorts_cells_and_keeps_tile_order() {
        let board =
            BoardState::from_position(config(), "h9:1,h6:5|p1:1,2,3,4|p2:9,9,2|turn:2").unwrap();
        assert_eq!(board.current_player(), Player::Two);
        assert_eq!(board.remaining_tiles(Player::Two), &[9, 9, 2]);
        assert_eq!(board.position_hash(), board.compute_hash());
        assert_eq!(board.save_position(), "h6:5,h9:1|p1:1,2,3,4|p2:9,9,2|turn:2");
    }

    #[test]
    fn test_save_load_preserves_position() {
        let mut board = BoardState::new(config());
        for text in ["h6t5", "h7t4", "h11t9"] {
            let mv = board.parse_move(text).unwrap();
            board.try_make_move(mv).unwrap();
        }

        let saved = board.save_position();
        let loaded = BoardState::from_position(config(), &saved).unwrap();
        assert_eq!(loaded.cells(), board.cells());
        assert_eq!(loaded.current_player(), board.current_player());
        assert_eq!(loaded.position_hash(), board.position_hash());
        assert_eq!(loaded.save_position(), saved);
        assert_eq!(loaded.moves_played(), 0);
    }

    #[test]
    fn test_empty_board_round_trip() {
        let mut board = BoardState::new(config());
        board.clear_board();
        let saved = board.save_position();
        assert!(saved.starts_with("|p1:"));

        let loaded = BoardState::from_position(config(), &saved).unwrap();
        assert_eq!(loaded.occupied_count(), 0);
    }

    #[test]
    fn test_empty_tile_list() {
        let board = BoardState::from_position(config(), "h9:1|p1:|turn:1").unwrap();
        assert!(board.remaining_tiles(Player::One).is_empty());
        assert!(board.legal_moves().is_empty());
    }

    #[test]
    fn test_load_recomputes_symmetry_flag() {
        let broken = BoardState::from_position(config(), "h6:5,h7:4,h9:1").unwrap();
        assert!(!broken.symmetry_still_possible());

        let mirrored = BoardState::from_position(config(), "h6:5,h7:5,h9:1").unwrap();
        assert!(mirrored.symmetry_still_possible());
    }

    #[test]
    fn test_load_errors() {
        let cases: [(&str, EngineError); 4] = [
            ("h9:1|turn:3", EngineError::InvalidPlayer(3)),
            ("h9:1,h9:2", EngineError::DuplicateCell(9)),
            ("h20:1", EngineError::CellOutOfRange(20)),
            ("h9:0", EngineError::InvalidTileValue(0)),
        ];
        for (text, expected) in cases {
            assert_eq!(
                BoardState::from_position(config(), text).unwrap_err(),
                expected,
                "{:?}",
                text
            );
        }

        for text in ["x:1", "h9", "h9:a", "turn:x", "h9:1|h6:2"] {
            assert!(
                matches!(
                    BoardState::from_position(config(), text),
                    Err(EngineError::MalformedPosition { .. })
                ),
                "{:?} should be malformed",
                text
            );
        }

        assert!(matches!(
            BoardState::from_position(config(), "p1:1,2,3,4,5,6,7,8,9,1,2"),
            Err(EngineError::TooManyTiles { player: 1, count: 11, max: 10 })
        ));
    }

    #[test]
    fn test_failed_load_leaves_board_unchanged() {
        let mut board = BoardState::new(config());
        let before = board.clone();
        assert!(board.load_position("h6:5|turn:7").is_err());
        assert_eq!(board, before);
    }
}
