pub mod perft;
pub mod xxl_board;
