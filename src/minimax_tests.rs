#[cfg(test)]
mod tests {
    use super::super::minimax::*;
    use crate::config::MinimaxConfig;
    use crate::error::EngineError;
    use crate::game_trait::GameState;
    use crate::games::hexuki::{BoardState, GameConfig, Move};
    use crate::test_games::{optimal_margin, End, Pick};
    use crate::transposition::TranspositionTable;

    /// Plain negamax without pruning or tables.
    fn brute_force<G: GameState>(state: &mut G, depth: u32) -> i64 {
        if depth == 0 || state.is_terminal() {
            return state.evaluate();
        }
        let moves = state.legal_moves();
        if moves.is_empty() {
            return state.evaluate();
        }
        let mut best = -INF;
        for mv in moves {
            state.make_move(mv);
            best = best.max(-brute_force(state, depth - 1));
            state.unmake_move();
        }
        best
    }

    fn small_hexuki() -> BoardState {
        BoardState::from_position(
            GameConfig::standard(),
            "h9:1,h6:5,h7:4|p1:2,3,8|p2:6,7,9|turn:1",
        )
        .unwrap()
    }

    // ========================================================================
    // Tests
    // ========================================================================

    #[test]
    fn test_solves_pick_game_exactly() {
        let items = [3, 9, 1, 2, 8, 5, 7];
        let game = Pick::new(&items);
        let result =
            find_best_move_minimax(&game, &MinimaxConfig::fixed_depth(items.len() as u32)).unwrap();

        assert_eq!(result.score, optimal_margin(&items));
        assert!(!result.timed_out);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_best_move_achieves_reported_score() {
        let items = [4, 10, 2, 6, 1, 9];
        let mut game = Pick::new(&items);
        let result = find_best_move_minimax(&game, &MinimaxConfig::fixed_depth(6)).unwrap();

        let mv = result.best_move.unwrap();
        game.make_move(mv);
        let after = -brute_force(&mut game, 5);
        assert_eq!(after, result.score);
    }

    #[test]
    fn test_iterative_deepening_stops_at_game_end() {
        let items = [1, 2, 3, 4];
        let result =
            find_best_move_minimax(&Pick::new(&items), &MinimaxConfig::fixed_depth(20)).unwrap();
        assert_eq!(result.depth_reached, 4);
        assert_eq!(result.score, optimal_margin(&items));
    }

    #[test]
    fn test_single_legal_move_is_still_searched() {
        let game = Pick::new(&[7]);
        let config = MinimaxConfig::fixed_depth(3);
        let result = find_best_move_minimax(&game, &config).unwrap();

        assert_eq!(result.best_move, Some(End::Left));
        assert_eq!(result.score, 7);
        assert_eq!(result.depth_reached, 3);
        assert!(result.nodes_searched > 0);
    }

    #[test]
    fn test_no_legal_moves_returns_static_evaluation() {
        let game = Pick::new(&[]);
        let result = find_best_move_minimax(&game, &MinimaxConfig::default()).unwrap();
        assert_eq!(result.best_move, None);
        assert_eq!(result.score, 0);
        assert_eq!(result.depth_reached, 0);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_hexuki_matches_brute_force() {
        let mut board = small_hexuki();
        let expected = brute_force(&mut board, 3);

        for (deepening, ordering) in [(true, true), (true, false), (false, true), (false, false)] {
            let config = MinimaxConfig {
                use_iterative_deepening: deepening,
                use_move_ordering: ordering,
                ..MinimaxConfig::fixed_depth(3)
            };
            let result = find_best_move_minimax(&board, &config).unwrap();
            assert_eq!(
                result.score, expected,
                "deepening={} ordering={}",
                deepening, ordering
            );
            assert_eq!(result.depth_reached, 3);
            assert!(board.legal_moves().contains(&result.best_move.unwrap()));
        }
    }

    #[test]
    fn test_search_leaves_root_untouched() {
        let board = small_hexuki();
        let before = board.clone();
        let mut search = MinimaxSearch::new(MinimaxConfig::fixed_depth(3)).unwrap();
        search.find_best_move(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_search_is_deterministic() {
        let board = small_hexuki();
        let mut search = MinimaxSearch::new(MinimaxConfig::fixed_depth(3)).unwrap();
        let first = search.find_best_move(&board);
        let second = search.find_best_move(&board);

        assert_eq!(first.best_move, second.best_move);
        assert_eq!(first.score, second.score);
        assert_eq!(first.nodes_searched, second.nodes_searched);
    }

    #[test]
    fn test_table_is_used_across_iterations() {
        let board = small_hexuki();
        let mut search = MinimaxSearch::new(MinimaxConfig::fixed_depth(3)).unwrap();
        let result = search.find_best_move(&board);

        assert!(result.tt_hits > 0);
        assert!(result.tt_misses > 0);
        assert!(!search.table().is_empty());
    }

    #[test]
    fn test_timeout_falls_back_to_first_ordered_move() {
        let board = BoardState::new(GameConfig::standard());
        let config = MinimaxConfig {
            time_limit_ms: Some(0),
            ..MinimaxConfig::default()
        };
        let result = find_best_move_minimax(&board, &config).unwrap();

        assert!(result.timed_out);
        assert_eq!(result.depth_reached, 0);
        // Highest tile on a central cell sorts first.
        let mv = result.best_move.unwrap();
        assert_eq!(mv.tile, 9);
        assert!([4usize, 6, 7, 11, 12].contains(&mv.cell_index()));
    }

    #[test]
    fn test_move_ordering_puts_table_move_first() {
        let board = BoardState::new(GameConfig::standard());
        let mut moves = board.legal_moves();
        let tt_move = Move::new(14, 1);
        order_moves(&board, &mut moves, Some(tt_move));

        assert_eq!(moves[0], tt_move);
        assert_eq!(moves[1], Move::new(4, 9));
        assert_eq!(moves.len(), 54);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            MinimaxSearch::<Move>::new(MinimaxConfig::fixed_depth(0)),
            Err(EngineError::InvalidConfig(_))
        ));
        let board = small_hexuki();
        assert!(find_best_move_minimax(&board, &MinimaxConfig::fixed_depth(0)).is_err());
    }

    #[test]
    fn test_solve_reports_abort() {
        let mut board = small_hexuki();
        let table = TranspositionTable::new();

        let exact = solve(&mut board, 2, &table, None);
        assert_eq!(exact, Some(brute_force(&mut board, 2)));

        // Deadline already passed: aborted at the first clock poll.
        table.clear();
        let past = std::time::Instant::now();
        let mut big = BoardState::new(GameConfig::standard());
        assert_eq!(solve(&mut big, 6, &table, Some(past)), None);
    }
}
