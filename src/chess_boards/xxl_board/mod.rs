pub mod layout;
pub mod model;
pub use layout::{LayoutError, LayoutResult, STANDARD_LAYOUT, STARTING_POSITION};
pub use model::{Color, Move, MoveUndo, Piece, PieceType, PromotionRule, Square, BOARD_SIZE};

mod piece_rules;
#[cfg(test)]
pub mod test_utils;
mod xxl_board;
pub use xxl_board::XxlBoard;
