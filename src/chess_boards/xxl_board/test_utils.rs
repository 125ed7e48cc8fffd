use super::{Color, Move, Piece, PieceType, Square, XxlBoard, BOARD_SIZE};
use rand::Rng;

pub fn board_with(pieces: &[(i32, i32, Piece)]) -> XxlBoard {
    let mut board = XxlBoard::new();
    for &(row, col, piece) in pieces {
        board.set_piece(row, col, Some(piece));
    }
    board
}

pub fn sorted_moves<I: Iterator<Item = Move>>(generated: I) -> Vec<Move> {
    let mut moves: Vec<_> = generated.collect();
    moves.sort();
    moves
}

pub fn assert_squares(generated: Vec<Square>, expected: Vec<(i32, i32)>) {
    let mut generated = generated;
    let mut expected: Vec<_> = expected.into_iter().map(|(row, col)| Square::new(row, col)).collect();
    generated.sort();
    expected.sort();

    assert_eq!(generated, expected);
}

/// Scatters `piece_count` random pieces with random `has_moved` flags. Kings and
/// rooks are sometimes dropped on their home squares so that castling shows up.
pub fn random_board<R: Rng>(rng: &mut R, piece_count: usize) -> XxlBoard {
    let last = BOARD_SIZE as i32 - 1;
    let mut board = XxlBoard::new();

    for (row, color) in [(last, Color::White), (0, Color::Black)] {
        if rng.gen_bool(0.7) {
            board.set_piece(row, 7, Some(Piece::new(PieceType::King, color)));
        }
        for col in [0, last] {
            if rng.gen_bool(0.5) {
                let owner = if rng.gen_bool(0.8) { color } else { color.opposite() };
                board.set_piece(row, col, Some(Piece::new(PieceType::Rook, owner)));
            }
        }
    }

    for _ in 0..piece_count {
        let kind = PieceType::ALL[rng.gen_range(0..PieceType::ALL.len())];
        let color = if rng.gen_bool(0.5) { Color::White } else { Color::Black };
        let piece = Piece {
            has_moved: rng.gen_bool(0.3),
            ..Piece::new(kind, color)
        };
        let row = if kind == PieceType::Pawn && rng.gen_bool(0.4) {
            color.pawn_start_row()
        } else {
            rng.gen_range(0..BOARD_SIZE as i32)
        };
        board.set_piece(row, rng.gen_range(0..BOARD_SIZE as i32), Some(piece));
    }
    board
}
