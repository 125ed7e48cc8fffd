use super::{Color, Move, MoveUndo, Piece, PieceType, PromotionRule, Square, BOARD_SIZE};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XxlBoard {
    pub squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    pub promotion_rule: PromotionRule,
}

impl Default for XxlBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl XxlBoard {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            squares: [[None; BOARD_SIZE]; BOARD_SIZE],
            promotion_rule: PromotionRule::default(),
        }
    }

    pub fn with_promotion_rule(mut self, promotion_rule: PromotionRule) -> Self {
        self.promotion_rule = promotion_rule;
        self
    }

    pub fn clear_board(&mut self) {
        self.squares = [[None; BOARD_SIZE]; BOARD_SIZE];
    }

    pub fn is_inside_board(&self, row: i32, col: i32) -> bool {
        Square::new(row, col).is_inside_board()
    }

    /// Returns `None` for empty cells and for coordinates outside the board.
    pub fn get_piece(&self, row: i32, col: i32) -> Option<Piece> {
        if !self.is_inside_board(row, col) {
            return None;
        }
        self.squares[row as usize][col as usize]
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.get_piece(square.row, square.col)
    }

    /// Raw grid write: no legality check and no `has_moved` update.
    pub fn set_piece(&mut self, row: i32, col: i32, piece: Option<Piece>) {
        if !self.is_inside_board(row, col) {
            warn!(row, col, "ignoring write outside the board");
            return;
        }
        self.squares[row as usize][col as usize] = piece;
    }

    pub fn place(&mut self, square: Square, piece: Option<Piece>) {
        self.set_piece(square.row, square.col, piece)
    }

    /// Iterates over all occupied squares in row-major order.
    pub fn pieces_with_coordinates(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, cell)| cell.map(|piece| (Square::new(row as i32, col as i32), piece)))
        })
    }

    /// Applies a move without checking it and returns whatever stood on `dest`.
    ///
    /// A pawn arriving on a promotion row becomes a queen. The placed piece is
    /// marked as moved. Reversing a move with a second `move_piece` therefore
    /// leaves `has_moved` set; use [`XxlBoard::make_move`] when an exact undo
    /// is needed.
    pub fn move_piece(&mut self, src: Square, dest: Square) -> Option<Piece> {
        if !src.is_inside_board() || !dest.is_inside_board() {
            debug!(%src, %dest, "move outside the board ignored");
            return None;
        }
        let Some(mut piece) = self.piece_at(src) else {
            debug!(%src, "no piece to move");
            return None;
        };

        self.place(src, None);
        let captured = self.piece_at(dest);

        if piece.kind == PieceType::Pawn && self.promotion_rule.promotes(piece.color, dest.row) {
            piece = Piece::new(PieceType::Queen, piece.color);
        }
        piece.has_moved = true;
        self.place(dest, Some(piece));

        captured
    }

    /// Like [`XxlBoard::move_piece`] but returns a record that restores both
    /// cells exactly, including the mover's previous `has_moved` flag and kind.
    pub fn make_move(&mut self, mv: Move) -> MoveUndo {
        let moved = if mv.to.is_inside_board() { self.piece_at(mv.from) } else { None };
        let captured = self.move_piece(mv.from, mv.to);
        MoveUndo { mv, moved, captured }
    }

    pub fn unmake_move(&mut self, undo: MoveUndo) {
        if undo.moved.is_none() {
            return;
        }
        // `to` first: for a null move both cells are the same one
        self.place(undo.mv.to, undo.captured);
        self.place(undo.mv.from, undo.moved);
    }

    pub fn is_move_valid(&self, src: Square, dest: Square) -> bool {
        match self.piece_at(src) {
            None => false,
            Some(piece) => piece.is_move_valid(src, dest, self),
        }
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces_with_coordinates()
            .find(|(_, piece)| piece.kind == PieceType::King && piece.color == color)
            .map(|(square, _)| square)
    }

    /// The color whose king has disappeared from the grid, if any.
    pub fn missing_king(&self) -> Option<Color> {
        [Color::White, Color::Black]
            .into_iter()
            .find(|&color| self.find_king(color).is_none())
    }

    pub fn is_king_captured(&self) -> bool {
        self.missing_king().is_some()
    }

    /// True if any piece of the other color may move onto `king_square`.
    pub fn is_king_in_check(&self, king_square: Square, color: Color) -> bool {
        self.pieces_with_coordinates()
            .filter(|(_, piece)| piece.color != color)
            .any(|(square, piece)| piece.is_move_valid(square, king_square, self))
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        let Some(king_square) = self.find_king(color) else {
            return false;
        };
        if !self.is_king_in_check(king_square, color) {
            return false;
        }

        let mut scratch = self.clone();
        for mv in self.get_all_moves_for_color(color) {
            let undo = scratch.make_move(mv);
            let king_after = if mv.from == king_square { mv.to } else { king_square };
            let still_in_check = scratch.is_king_in_check(king_after, color);
            scratch.unmake_move(undo);

            if !still_in_check {
                return false;
            }
        }
        true
    }

    /// Material balance in millipawns from `color`'s point of view. Summed in
    /// `i64`: a grid full of kings exceeds the `i32` range.
    pub fn evaluate_board(&self, color: Color) -> i64 {
        self.pieces_with_coordinates()
            .map(|(_, piece)| {
                let value = i64::from(piece.value());
                if piece.color == color {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }

    pub fn get_all_moves_for_color(&self, color: Color) -> Vec<Move> {
        let mut all_moves = Vec::with_capacity(128);
        for (square, piece) in self.pieces_with_coordinates() {
            if piece.color == color {
                all_moves.extend(
                    piece
                        .valid_moves(square, self)
                        .into_iter()
                        .map(|dest| Move::between(square, dest)),
                );
            }
        }
        all_moves
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        let columns: String = (0..BOARD_SIZE).map(|col| format!("{:^4}", col)).collect();
        let border = "───┬".repeat(BOARD_SIZE);
        let separator = "───┼".repeat(BOARD_SIZE);
        let bottom = "───┴".repeat(BOARD_SIZE);

        board_representation.push_str(&format!("    {}\n", columns.trim_end()));
        board_representation.push_str(&format!("   ┌{}┐\n", &border[..border.len() - "┬".len()]));
        for row in 0..BOARD_SIZE {
            board_representation.push_str(&format!("{:>2} │", row));
            for col in 0..BOARD_SIZE {
                let square = self.squares[row][col].map_or(' ', |piece| piece.to_char());
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push('\n');
            if row + 1 < BOARD_SIZE {
                board_representation.push_str(&format!("   ├{}┤\n", &separator[..separator.len() - "┼".len()]));
            }
        }
        board_representation.push_str(&format!("   └{}┘\n", &bottom[..bottom.len() - "┴".len()]));

        board_representation
    }
}
