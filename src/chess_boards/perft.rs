use crate::chess_boards::xxl_board::{Color, Move, XxlBoard};

/// Counts the leaves of the pseudo-legal move tree, sides alternating from `color`.
pub fn perft(board: &XxlBoard, color: Color, depth: u8) -> u64 {
    let mut node_count = 0u64;

    if depth == 0 {
        return 1u64;
    }

    for mv in board.get_all_moves_for_color(color) {
        let mut new_board = board.clone();
        new_board.move_piece(mv.from, mv.to);
        node_count += perft(&new_board, color.opposite(), depth - 1);
    }
    node_count
}

/// Per-root-move breakdown of [`perft`], sorted by move.
pub fn perft_divide(board: &XxlBoard, color: Color, depth: u8) -> Vec<(Move, u64)> {
    let mut result_moves: Vec<_> = board
        .get_all_moves_for_color(color)
        .into_iter()
        .map(|mv| {
            let mut new_board = board.clone();
            new_board.move_piece(mv.from, mv.to);
            (mv, perft(&new_board, color.opposite(), depth.saturating_sub(1)))
        })
        .collect();
    result_moves.sort();
    result_moves
}
