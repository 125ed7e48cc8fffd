use crate::chess_boards::xxl_board::{Color, Move, Piece, Square, XxlBoard};
use crate::engines::{AlphaBetaEngine, SearchConfig, SearchEngine};
use std::fmt;
use thiserror::Error;
use tracing::info;

/// Errors produced when a move request cannot be carried out
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("there is no piece on {square}")]
    EmptySquare { square: Square },

    #[error("the piece on {square} belongs to {owner}, but {turn} is to move")]
    NotYourPiece { square: Square, owner: Color, turn: Color },

    #[error("illegal move {mv}")]
    IllegalMove { mv: Move },

    #[error("the game is over: {outcome}")]
    GameOver { outcome: GameOutcome },
}

pub type GameResult<T> = Result<T, GameError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    KingCaptured { winner: Color },
    Checkmate { loser: Color },
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::KingCaptured { winner } => write!(f, "{} captured the king and wins", winner),
            GameOutcome::Checkmate { loser } => write!(f, "{} is checkmated", loser),
        }
    }
}

/// Turn bookkeeping around a board: white moves first, the engine plays
/// whichever side is asked to.
#[derive(Debug, Clone)]
pub struct Game {
    board: XxlBoard,
    turn: Color,
    depth: i32,
}

impl Game {
    pub fn new(board: XxlBoard, depth: i32) -> Self {
        Game {
            board,
            turn: Color::White,
            depth,
        }
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub fn board(&self) -> &XxlBoard {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// Destinations to highlight for the piece on `square`. Pieces of the side
    /// not to move cannot be selected.
    pub fn valid_moves_for(&self, square: Square) -> Vec<Square> {
        match self.board.piece_at(square) {
            Some(piece) if piece.color == self.turn => piece.valid_moves(square, &self.board),
            _ => Vec::new(),
        }
    }

    pub fn play_move(&mut self, from: Square, to: Square) -> GameResult<Option<Piece>> {
        if let Some(outcome) = self.outcome() {
            return Err(GameError::GameOver { outcome });
        }
        let piece = self
            .board
            .piece_at(from)
            .ok_or(GameError::EmptySquare { square: from })?;
        if piece.color != self.turn {
            return Err(GameError::NotYourPiece {
                square: from,
                owner: piece.color,
                turn: self.turn,
            });
        }
        if !piece.is_move_valid(from, to, &self.board) {
            return Err(GameError::IllegalMove { mv: Move::between(from, to) });
        }

        let captured = self.board.move_piece(from, to);
        info!(turn = %self.turn, mv = %Move::between(from, to), ?captured, "move played");
        self.turn = self.turn.opposite();
        Ok(captured)
    }

    /// Lets the alpha-beta engine move for the side to move. Returns `Ok(None)`
    /// without passing the turn when that side has no move.
    pub fn play_ai_turn(&mut self) -> GameResult<Option<Move>> {
        if let Some(outcome) = self.outcome() {
            return Err(GameError::GameOver { outcome });
        }
        let engine = AlphaBetaEngine::new(SearchConfig::new(self.depth, self.turn));
        let Some(result) = engine.find_best_move(&self.board) else {
            info!(turn = %self.turn, "no move available");
            return Ok(None);
        };

        self.board.move_piece(result.best_move.from, result.best_move.to);
        info!(
            turn = %self.turn,
            mv = %result.best_move,
            score = result.score,
            nodes = result.node_count,
            "engine move played"
        );
        self.turn = self.turn.opposite();
        Ok(Some(result.best_move))
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(color) = self.board.missing_king() {
            return Some(GameOutcome::KingCaptured { winner: color.opposite() });
        }
        if self.board.is_checkmate(self.turn) {
            return Some(GameOutcome::Checkmate { loser: self.turn });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_boards::xxl_board::test_utils::board_with;
    use crate::chess_boards::xxl_board::{PieceType, STARTING_POSITION};
    use PieceType::*;

    fn white(kind: PieceType) -> Piece {
        Piece::new(kind, Color::White)
    }

    fn black(kind: PieceType) -> Piece {
        Piece::new(kind, Color::Black)
    }

    #[test]
    fn test_white_starts() {
        let game = Game::new(STARTING_POSITION.clone(), 2);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.depth(), 2);
        assert_eq!(game.outcome(), None);
        assert_eq!(game.valid_moves_for(Square::new(12, 3)), vec![Square::new(11, 3), Square::new(10, 3)]);
        assert!(game.valid_moves_for(Square::new(1, 3)).is_empty());
        assert!(game.valid_moves_for(Square::new(6, 6)).is_empty());
    }

    #[test]
    fn test_play_move_rejections() {
        let mut game = Game::new(STARTING_POSITION.clone(), 1);
        assert_eq!(
            game.play_move(Square::new(6, 6), Square::new(5, 6)),
            Err(GameError::EmptySquare { square: Square::new(6, 6) })
        );
        assert_eq!(
            game.play_move(Square::new(1, 0), Square::new(2, 0)),
            Err(GameError::NotYourPiece {
                square: Square::new(1, 0),
                owner: Color::Black,
                turn: Color::White
            })
        );
        assert_eq!(
            game.play_move(Square::new(12, 0), Square::new(9, 0)),
            Err(GameError::IllegalMove { mv: Move::new(12, 0, 9, 0) })
        );
        assert_eq!(game.turn(), Color::White);
        assert_eq!(*game.board(), *STARTING_POSITION);
    }

    #[test]
    fn test_play_move_passes_turn() {
        let mut game = Game::new(STARTING_POSITION.clone(), 1);
        assert_eq!(game.play_move(Square::new(13, 4), Square::new(10, 3)), Ok(None));
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().get_piece(10, 3).unwrap().kind, PieceType::Camel);

        let engine_move = game.play_ai_turn().unwrap().unwrap();
        assert_eq!(game.board().get_piece(engine_move.to.row, engine_move.to.col).unwrap().color, Color::Black);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_king_capture_ends_the_game() {
        let board = board_with(&[(13, 7, white(King)), (0, 7, black(King)), (5, 7, white(Rook))]);
        let mut game = Game::new(board, 1);
        assert_eq!(game.play_move(Square::new(5, 7), Square::new(0, 7)), Ok(Some(black(King))));

        let outcome = GameOutcome::KingCaptured { winner: Color::White };
        assert_eq!(game.outcome(), Some(outcome));
        assert_eq!(game.play_ai_turn(), Err(GameError::GameOver { outcome }));
        assert_eq!(game.play_move(Square::new(13, 7), Square::new(12, 7)), Err(GameError::GameOver { outcome }));
    }

    #[test]
    fn test_engine_captures_the_king() {
        let board = board_with(&[(13, 7, white(King)), (0, 7, black(King)), (5, 7, white(Rook))]);
        let mut game = Game::new(board, 1);
        assert_eq!(game.play_ai_turn(), Ok(Some(Move::new(5, 7, 0, 7))));
        assert_eq!(game.outcome(), Some(GameOutcome::KingCaptured { winner: Color::White }));
    }

    #[test]
    fn test_checkmate_outcome() {
        let board = board_with(&[
            (13, 6, white(King)),
            (12, 5, white(Pawn)),
            (12, 6, white(Pawn)),
            (12, 7, white(Pawn)),
            (13, 0, black(Rook)),
            (0, 0, black(King)),
        ]);
        let game = Game::new(board.clone(), 1);
        assert_eq!(game.outcome(), Some(GameOutcome::Checkmate { loser: Color::White }));
        assert_eq!(Game::new(board, 1).with_turn(Color::Black).outcome(), None);
    }

    #[test]
    fn test_ai_without_moves_keeps_the_turn() {
        // white king walled in by two files of its own blocked pawns
        let mut pieces = vec![(13, 0, white(King)), (0, 13, black(King))];
        pieces.extend((0..13).map(|row| (row, 0, white(Pawn))));
        pieces.extend((0..14).map(|row| (row, 1, white(Pawn))));
        let mut game = Game::new(board_with(&pieces), 2);

        assert!(game.board().get_all_moves_for_color(Color::White).is_empty());
        assert_eq!(game.outcome(), None);
        assert_eq!(game.play_ai_turn(), Ok(None));
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_error_messages() {
        let err = GameError::IllegalMove { mv: Move::new(12, 0, 9, 0) };
        assert_eq!(err.to_string(), "illegal move (12, 0) -> (9, 0)");
        let err = GameError::GameOver {
            outcome: GameOutcome::Checkmate { loser: Color::Black },
        };
        assert_eq!(err.to_string(), "the game is over: black is checkmated");
    }
}
