use crate::chess_boards::xxl_board::{Color, XxlBoard};
use crate::engines::{SearchConfig, SearchEngine, SearchResult, MAX_EVALUATION, MIN_EVALUATION};
use tracing::debug;

pub struct AlphaBetaEngine {
    config: SearchConfig,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        AlphaBetaEngine { config }
    }

    /// Best score `color` can force, from `color`'s point of view.
    pub fn max_value(
        &self,
        board: &XxlBoard,
        depth: i32,
        alpha: i64,
        beta: i64,
        color: Color,
        node_count: &mut u64,
    ) -> i64 {
        *node_count += 1;
        if depth <= 0 || board.is_checkmate(color) {
            return board.evaluate_board(color);
        }

        let moves = board.get_all_moves_for_color(color);
        if moves.is_empty() {
            return board.evaluate_board(color);
        }

        let mut alpha = alpha;
        let mut max_score = MIN_EVALUATION;
        for mv in moves {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);
            let score = self.min_value(&new_board, depth - 1, alpha, beta, color.opposite(), node_count);
            max_score = max_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                // Beta cutoff
                break;
            }
        }
        max_score
    }

    /// `color` is the side to move here, the minimising one. The score is seen
    /// from its opponent.
    pub fn min_value(
        &self,
        board: &XxlBoard,
        depth: i32,
        alpha: i64,
        beta: i64,
        color: Color,
        node_count: &mut u64,
    ) -> i64 {
        *node_count += 1;
        if depth <= 0 || board.is_checkmate(color) {
            return board.evaluate_board(color.opposite());
        }

        let moves = board.get_all_moves_for_color(color);
        if moves.is_empty() {
            return board.evaluate_board(color.opposite());
        }

        let mut beta = beta;
        let mut min_score = MAX_EVALUATION;
        for mv in moves {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);
            let score = self.max_value(&new_board, depth - 1, alpha, beta, color.opposite(), node_count);
            min_score = min_score.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                // Alpha cutoff
                break;
            }
        }
        min_score
    }
}

impl SearchEngine for AlphaBetaEngine {
    fn name(&self) -> &str {
        "XXL Alpha Beta Engine"
    }

    fn config(&self) -> SearchConfig {
        self.config
    }

    fn find_best_move(&self, board: &XxlBoard) -> Option<SearchResult> {
        let SearchConfig { depth, color } = self.config;
        let mut best_move = None;
        let mut best_score = MIN_EVALUATION;
        let mut node_count = 0;

        let mut alpha = MIN_EVALUATION;
        for mv in board.get_all_moves_for_color(color) {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);

            let score = self.min_value(&new_board, depth - 1, alpha, MAX_EVALUATION, color.opposite(), &mut node_count);
            if best_move.is_none() || score > best_score {
                alpha = score;
                best_score = score;
                best_move = Some(mv);
                debug!(%mv, score, "new best move");
            }
        }

        debug!(?best_move, best_score, node_count, depth, %color, "alpha-beta search finished");
        best_move.map(|best_move| SearchResult {
            best_move,
            score: best_score,
            node_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_boards::xxl_board::test_utils::{board_with, random_board};
    use crate::chess_boards::xxl_board::{Move, Piece, PieceType, STARTING_POSITION};
    use crate::engines::MinMaxEngine;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;
    use PieceType::*;

    fn white(kind: PieceType) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceType) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn test_starting_position_depth_zero() {
        let engine = AlphaBetaEngine::new(SearchConfig::default());
        let mut node_count = 0;
        let score = engine.max_value(&STARTING_POSITION, 0, MIN_EVALUATION, MAX_EVALUATION, Color::White, &mut node_count);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_starting_position_depth_one() {
        let engine = AlphaBetaEngine::new(SearchConfig::new(1, Color::White));
        let result = engine.find_best_move(&STARTING_POSITION).unwrap();
        let moves = STARTING_POSITION.get_all_moves_for_color(Color::White);

        assert!(moves.contains(&result.best_move));
        // nothing can be captured, so every move scores 0 and the first one is kept
        assert_eq!(result.score, 0);
        assert_eq!(result.best_move, moves[0]);
        assert_eq!(result.best_move, Move::new(12, 0, 11, 0));
    }

    #[test]
    fn test_takes_free_piece() {
        let board = board_with(&[(10, 0, white(Rook)), (3, 0, black(Queen))]);
        let engine = AlphaBetaEngine::new(SearchConfig::new(1, Color::White));
        let result = engine.find_best_move(&board).unwrap();
        assert_eq!(result.best_move, Move::new(10, 0, 3, 0));
        assert_eq!(result.score, 5_250);
    }

    #[test]
    fn test_avoids_defended_pawn() {
        let board = board_with(&[(10, 5, white(Queen)), (5, 5, black(Pawn)), (5, 13, black(Rook))]);
        let poisoned = Move::new(10, 5, 5, 5);

        let greedy = AlphaBetaEngine::new(SearchConfig::new(1, Color::White)).find_best_move(&board).unwrap();
        assert_eq!(greedy.best_move, poisoned);
        assert_eq!(greedy.score, 9_500 - 5_250);

        let careful = AlphaBetaEngine::new(SearchConfig::new(2, Color::White)).find_best_move(&board).unwrap();
        assert_ne!(careful.best_move, poisoned);
        assert_eq!(careful.score, 9_500 - 5_250 - 1_000);
    }

    #[test]
    fn test_search_on_a_board_full_of_kings() {
        let board = XxlBoard::from_layout("KKKKKKKKKKKKKK\nKKKKKKKKKK");
        let result = AlphaBetaEngine::new(SearchConfig::new(1, Color::Black)).find_best_move(&board).unwrap();
        assert_eq!(result.score, 24 * 99_999_000);
    }

    #[test]
    fn test_no_moves() {
        let board = board_with(&[(3, 3, black(Rook))]);
        let engine = AlphaBetaEngine::new(SearchConfig::new(3, Color::White));
        assert_eq!(engine.find_best_move(&board), None);
    }

    #[test]
    fn test_checkmated_side_is_a_leaf() {
        let board = board_with(&[
            (0, 0, black(King)),
            (0, 2, white(Queen)),
            (1, 1, white(Queen)),
            (1, 2, white(Queen)),
            (2, 0, white(Queen)),
            (2, 1, white(Queen)),
            (2, 2, white(Queen)),
        ]);
        let engine = AlphaBetaEngine::new(SearchConfig::default());
        let mut node_count = 0;
        let score = engine.max_value(&board, 3, MIN_EVALUATION, MAX_EVALUATION, Color::Black, &mut node_count);
        assert_eq!(score, board.evaluate_board(Color::Black));
        assert_eq!(node_count, 1);
    }

    #[test]
    fn test_search_does_not_touch_the_board() {
        let board = STARTING_POSITION.clone();
        AlphaBetaEngine::new(SearchConfig::new(2, Color::Black)).find_best_move(&board);
        assert_eq!(board, *STARTING_POSITION);
    }

    fn assert_same_as_minmax(board: &XxlBoard, config: SearchConfig) {
        let alpha_beta = AlphaBetaEngine::new(config).find_best_move(board);
        let minmax = MinMaxEngine::new(config).find_best_move(board);
        match (alpha_beta, minmax) {
            (Some(alpha_beta), Some(minmax)) => {
                assert_eq!(alpha_beta.best_move, minmax.best_move, "{:?}\n{}", config, board.render_to_string());
                assert_eq!(alpha_beta.score, minmax.score, "{:?}\n{}", config, board.render_to_string());
                assert!(alpha_beta.node_count <= minmax.node_count);
            }
            (None, None) => {}
            (alpha_beta, minmax) => panic!("alpha-beta {:?} vs minmax {:?}", alpha_beta, minmax),
        }
    }

    #[test]
    fn test_alpha_beta_equals_minmax() {
        let mut rng = Pcg64::seed_from_u64(42);
        for _ in 0..8 {
            let board = random_board(&mut rng, 12);
            for color in [Color::White, Color::Black] {
                assert_same_as_minmax(&board, SearchConfig::new(2, color));
            }
        }
        for _ in 0..3 {
            let board = random_board(&mut rng, 3);
            assert_same_as_minmax(&board, SearchConfig::new(3, Color::White));
        }
    }

    #[test]
    fn test_alpha_beta_equals_minmax_on_tactical_positions() {
        let board = board_with(&[(10, 5, white(Queen)), (5, 5, black(Pawn)), (5, 13, black(Rook))]);
        assert_same_as_minmax(&board, SearchConfig::new(3, Color::White));

        let board = board_with(&[
            (13, 6, white(King)),
            (12, 5, white(Pawn)),
            (12, 6, white(Pawn)),
            (12, 7, white(Pawn)),
            (0, 6, black(King)),
            (3, 13, black(Rook)),
            (8, 2, black(Camel)),
        ]);
        assert_same_as_minmax(&board, SearchConfig::new(2, Color::Black));
        assert_same_as_minmax(&board, SearchConfig::new(2, Color::White));
    }
}
