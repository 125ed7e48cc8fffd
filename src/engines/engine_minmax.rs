use crate::chess_boards::xxl_board::{Color, XxlBoard};
use crate::engines::{SearchConfig, SearchEngine, SearchResult, MAX_EVALUATION, MIN_EVALUATION};
use tracing::debug;

/// Exhaustive minimax without pruning. Slow, but useful as a reference for the
/// alpha-beta engine.
pub struct MinMaxEngine {
    config: SearchConfig,
}

impl MinMaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        MinMaxEngine { config }
    }

    pub fn max_value(&self, board: &XxlBoard, depth: i32, color: Color, node_count: &mut u64) -> i64 {
        *node_count += 1;
        if depth <= 0 || board.is_checkmate(color) {
            return board.evaluate_board(color);
        }

        let moves = board.get_all_moves_for_color(color);
        if moves.is_empty() {
            return board.evaluate_board(color);
        }

        let mut max_score = MIN_EVALUATION;
        for mv in moves {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);
            max_score = max_score.max(self.min_value(&new_board, depth - 1, color.opposite(), node_count));
        }
        max_score
    }

    pub fn min_value(&self, board: &XxlBoard, depth: i32, color: Color, node_count: &mut u64) -> i64 {
        *node_count += 1;
        if depth <= 0 || board.is_checkmate(color) {
            return board.evaluate_board(color.opposite());
        }

        let moves = board.get_all_moves_for_color(color);
        if moves.is_empty() {
            return board.evaluate_board(color.opposite());
        }

        let mut min_score = MAX_EVALUATION;
        for mv in moves {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);
            min_score = min_score.min(self.max_value(&new_board, depth - 1, color.opposite(), node_count));
        }
        min_score
    }
}

impl SearchEngine for MinMaxEngine {
    fn name(&self) -> &str {
        "XXL MinMax Engine"
    }

    fn config(&self) -> SearchConfig {
        self.config
    }

    fn find_best_move(&self, board: &XxlBoard) -> Option<SearchResult> {
        let SearchConfig { depth, color } = self.config;
        let mut best_move = None;
        let mut best_score = MIN_EVALUATION;
        let mut node_count = 0;

        for mv in board.get_all_moves_for_color(color) {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);

            let score = self.min_value(&new_board, depth - 1, color.opposite(), &mut node_count);
            if best_move.is_none() || score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }

        debug!(?best_move, best_score, node_count, "minmax search finished");
        best_move.map(|best_move| SearchResult {
            best_move,
            score: best_score,
            node_count,
        })
    }
}
