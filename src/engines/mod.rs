use crate::chess_boards::xxl_board::{Color, Move, XxlBoard};

pub mod engine_alpha_beta;
pub mod engine_minmax;

pub use engine_alpha_beta::AlphaBetaEngine;
pub use engine_minmax::MinMaxEngine;

pub const MIN_EVALUATION: i64 = i64::MIN + 1; // +1 is important because -MIN is not a i64 number
pub const MAX_EVALUATION: i64 = i64::MAX;

/// Search parameters: depth in plies and the side the best move is searched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: i32,
    pub color: Color,
}

impl SearchConfig {
    pub fn new(depth: i32, color: Color) -> Self {
        Self { depth, color }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(3, Color::White)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i64,
    pub node_count: u64,
}

pub trait SearchEngine {
    fn name(&self) -> &str;
    fn config(&self) -> SearchConfig;
    /// `None` when the side to move has no pseudo-legal move at all.
    fn find_best_move(&self, board: &XxlBoard) -> Option<SearchResult>;
}
