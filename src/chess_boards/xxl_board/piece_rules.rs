use super::{Color, Piece, PieceType, Square, XxlBoard, BOARD_SIZE};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

const KNIGHT_OFFSETS: [(i32, i32); 8] = [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];
const CAMEL_OFFSETS: [(i32, i32); 8] = [(-3, -1), (-3, 1), (-1, -3), (-1, 3), (1, -3), (1, 3), (3, -1), (3, 1)];
const KING_OFFSETS: [(i32, i32); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

const ROOK_CORNERS: [i32; 2] = [0, BOARD_SIZE as i32 - 1];

impl Piece {
    /// Pseudo-legal check of a single move for this piece standing on `from`.
    /// Leaving the own king in check is not considered.
    pub fn is_move_valid(&self, from: Square, to: Square, board: &XxlBoard) -> bool {
        if from == to || !is_free_for(board, self.color, to) {
            return false;
        }
        match self.kind {
            PieceType::Pawn => pawn_allows(self, from, to, board),
            PieceType::Rook => rook_allows(from, to, board),
            PieceType::Bishop => bishop_allows(from, to, board),
            PieceType::Knight => leaper_allows(from, to, 1, 2),
            PieceType::Camel => leaper_allows(from, to, 1, 3),
            PieceType::King => king_step_allows(from, to) || castling_allows(self, from, to, board),
            PieceType::Queen => bishop_allows(from, to, board) || rook_allows(from, to, board),
            PieceType::Chancellor => leaper_allows(from, to, 1, 2) || rook_allows(from, to, board),
            PieceType::Archbishop => bishop_allows(from, to, board) || leaper_allows(from, to, 1, 2),
            PieceType::Guard => {
                leaper_allows(from, to, 1, 2)
                    || king_step_allows(from, to)
                    || castling_allows(&Piece::new(PieceType::King, self.color), from, to, board)
            }
            PieceType::Amazon => {
                bishop_allows(from, to, board) || rook_allows(from, to, board) || leaper_allows(from, to, 1, 2)
            }
        }
    }

    /// All pseudo-legal destinations, in a fixed per-kind order.
    pub fn valid_moves(&self, from: Square, board: &XxlBoard) -> Vec<Square> {
        let mut moves = Vec::with_capacity(64);
        match self.kind {
            PieceType::Pawn => generate_pawn_moves_into(self, from, board, &mut moves),
            PieceType::Rook => generate_sliding_moves_into(self.color, from, board, &ROOK_DIRECTIONS, &mut moves),
            PieceType::Bishop => generate_sliding_moves_into(self.color, from, board, &BISHOP_DIRECTIONS, &mut moves),
            PieceType::Knight => generate_leaper_moves_into(self.color, from, board, &KNIGHT_OFFSETS, &mut moves),
            PieceType::Camel => generate_leaper_moves_into(self.color, from, board, &CAMEL_OFFSETS, &mut moves),
            PieceType::King => {
                generate_leaper_moves_into(self.color, from, board, &KING_OFFSETS, &mut moves);
                generate_castling_moves_into(self, from, board, &mut moves);
            }
            PieceType::Queen => {
                generate_sliding_moves_into(self.color, from, board, &BISHOP_DIRECTIONS, &mut moves);
                generate_sliding_moves_into(self.color, from, board, &ROOK_DIRECTIONS, &mut moves);
            }
            PieceType::Chancellor => {
                generate_leaper_moves_into(self.color, from, board, &KNIGHT_OFFSETS, &mut moves);
                generate_sliding_moves_into(self.color, from, board, &ROOK_DIRECTIONS, &mut moves);
            }
            PieceType::Archbishop => {
                generate_sliding_moves_into(self.color, from, board, &BISHOP_DIRECTIONS, &mut moves);
                generate_leaper_moves_into(self.color, from, board, &KNIGHT_OFFSETS, &mut moves);
            }
            PieceType::Guard => {
                // moves like a fresh king, so it may castle however often it moved
                let king = Piece::new(PieceType::King, self.color);
                generate_leaper_moves_into(self.color, from, board, &KNIGHT_OFFSETS, &mut moves);
                generate_leaper_moves_into(self.color, from, board, &KING_OFFSETS, &mut moves);
                generate_castling_moves_into(&king, from, board, &mut moves);
            }
            PieceType::Amazon => {
                generate_sliding_moves_into(self.color, from, board, &BISHOP_DIRECTIONS, &mut moves);
                generate_sliding_moves_into(self.color, from, board, &ROOK_DIRECTIONS, &mut moves);
                generate_leaper_moves_into(self.color, from, board, &KNIGHT_OFFSETS, &mut moves);
            }
        }
        moves
    }
}

/// On the board and not occupied by a piece of `color`.
fn is_free_for(board: &XxlBoard, color: Color, to: Square) -> bool {
    to.is_inside_board() && !matches!(board.piece_at(to), Some(target) if target.color == color)
}

fn is_enemy(board: &XxlBoard, color: Color, square: Square) -> bool {
    matches!(board.piece_at(square), Some(target) if target.color != color)
}

/// Every square strictly between `from` and `to` is empty. Only meaningful on a
/// straight or diagonal line.
fn is_path_clear(from: Square, to: Square, board: &XxlBoard) -> bool {
    let step_row = (to.row - from.row).signum();
    let step_col = (to.col - from.col).signum();
    let mut current = from.offset(step_row, step_col);
    while current != to {
        if board.piece_at(current).is_some() {
            return false;
        }
        current = current.offset(step_row, step_col);
    }
    true
}

fn rook_allows(from: Square, to: Square, board: &XxlBoard) -> bool {
    (from.row == to.row || from.col == to.col) && is_path_clear(from, to, board)
}

fn bishop_allows(from: Square, to: Square, board: &XxlBoard) -> bool {
    (to.row - from.row).abs() == (to.col - from.col).abs() && is_path_clear(from, to, board)
}

fn leaper_allows(from: Square, to: Square, short: i32, long: i32) -> bool {
    let d_row = (to.row - from.row).abs();
    let d_col = (to.col - from.col).abs();
    (d_row == short && d_col == long) || (d_row == long && d_col == short)
}

fn king_step_allows(from: Square, to: Square) -> bool {
    (to.row - from.row).abs().max((to.col - from.col).abs()) == 1
}

/// Two-column king move towards an unmoved rook of the same color standing in
/// the corner column of that side, with nothing in between.
fn castling_allows(king: &Piece, from: Square, to: Square, board: &XxlBoard) -> bool {
    if king.has_moved || from.row != to.row || (to.col - from.col).abs() != 2 {
        return false;
    }
    let direction = (to.col - from.col).signum();
    let rook_col = if direction > 0 { ROOK_CORNERS[1] } else { ROOK_CORNERS[0] };

    match board.get_piece(from.row, rook_col) {
        Some(rook) if rook.kind == PieceType::Rook && rook.color == king.color && !rook.has_moved => {
            is_path_clear(from, Square::new(from.row, rook_col), board)
        }
        _ => false,
    }
}

fn pawn_allows(pawn: &Piece, from: Square, to: Square, board: &XxlBoard) -> bool {
    let forward = pawn.color.pawn_direction();
    let d_row = to.row - from.row;
    let d_col = to.col - from.col;

    if d_col == 0 {
        if d_row == forward {
            return board.piece_at(to).is_none();
        }
        if d_row == 2 * forward && from.row == pawn.color.pawn_start_row() {
            return board.piece_at(from.offset(forward, 0)).is_none() && board.piece_at(to).is_none();
        }
        return false;
    }

    // no diagonal step without a capture
    d_row == forward && d_col.abs() == 1 && is_enemy(board, pawn.color, to)
}

fn generate_pawn_moves_into(pawn: &Piece, from: Square, board: &XxlBoard, moves: &mut Vec<Square>) {
    let forward = pawn.color.pawn_direction();
    let one_step = from.offset(forward, 0);

    if one_step.is_inside_board() && board.piece_at(one_step).is_none() {
        moves.push(one_step);
    }

    for d_col in [-1, 1] {
        let target = from.offset(forward, d_col);
        if target.is_inside_board() && is_enemy(board, pawn.color, target) {
            moves.push(target);
        }
    }

    if from.row == pawn.color.pawn_start_row() && board.piece_at(one_step).is_none() {
        let two_steps = from.offset(2 * forward, 0);
        if two_steps.is_inside_board() && board.piece_at(two_steps).is_none() {
            moves.push(two_steps);
        }
    }
}

fn generate_sliding_moves_into(
    color: Color,
    from: Square,
    board: &XxlBoard,
    directions: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    for &(d_row, d_col) in directions {
        let mut target = from.offset(d_row, d_col);
        while target.is_inside_board() {
            match board.piece_at(target) {
                None => moves.push(target),
                Some(piece) => {
                    if piece.color != color {
                        moves.push(target);
                    }
                    break; // Block sliding
                }
            }
            target = target.offset(d_row, d_col);
        }
    }
}

fn generate_leaper_moves_into(
    color: Color,
    from: Square,
    board: &XxlBoard,
    offsets: &[(i32, i32)],
    moves: &mut Vec<Square>,
) {
    moves.extend(
        offsets
            .iter()
            .map(|&(d_row, d_col)| from.offset(d_row, d_col))
            .filter(|&target| is_free_for(board, color, target)),
    );
}

fn generate_castling_moves_into(king: &Piece, from: Square, board: &XxlBoard, moves: &mut Vec<Square>) {
    for rook_col in ROOK_CORNERS {
        let direction = (rook_col - from.col).signum();
        if direction == 0 {
            continue;
        }
        let target = from.offset(0, 2 * direction);
        if is_free_for(board, king.color, target) && castling_allows(king, from, target, board) {
            moves.push(target);
        }
    }
}
