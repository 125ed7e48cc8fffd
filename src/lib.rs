pub mod chess_boards;
pub mod engines;
pub mod game;
