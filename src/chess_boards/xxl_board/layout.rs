use super::{Piece, XxlBoard, BOARD_SIZE};
use lazy_static::lazy_static;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error};

/// Opening position: black on the two top rows, white mirrored in lowercase at the bottom.
pub const STANDARD_LAYOUT: &str = "\
RNBHCGAKGCEBNR
PPPPPPPPPPPPPP
..............
..............
..............
..............
..............
..............
..............
..............
..............
..............
pppppppppppppp
rnbhcgakgcebnr
";

lazy_static! {
    pub static ref STARTING_POSITION: XxlBoard = XxlBoard::from_layout(STANDARD_LAYOUT);
}

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("cannot read layout file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type LayoutResult<T> = Result<T, LayoutError>;

impl XxlBoard {
    /// Parses a text layout. Unknown characters and missing cells are empty
    /// squares; anything beyond the 14th row or column is ignored.
    pub fn from_layout(layout: &str) -> Self {
        let mut board = XxlBoard::new();
        for (row, line) in layout.lines().take(BOARD_SIZE).enumerate() {
            board.fill_row(row, line);
        }
        board
    }

    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut board = XxlBoard::new();
        board.fill_from_reader(reader)?;
        Ok(board)
    }

    pub fn try_load_from_file<P: AsRef<Path>>(path: P) -> LayoutResult<Self> {
        let mut board = XxlBoard::new();
        board.fill_from_file(path.as_ref())?;
        Ok(board)
    }

    /// Never fails: a read error is logged and the rows read so far are kept,
    /// so an unreadable file yields an empty board.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let mut board = XxlBoard::new();
        if let Err(err) = board.fill_from_file(path.as_ref()) {
            error!(%err, "continuing with the rows read so far");
        }
        board
    }

    fn fill_from_file(&mut self, path: &Path) -> LayoutResult<()> {
        let to_layout_error = |source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).map_err(to_layout_error)?;
        self.fill_from_reader(BufReader::new(file)).map_err(to_layout_error)?;
        debug!(path = %path.display(), "layout loaded");
        Ok(())
    }

    fn fill_from_reader<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for (row, line) in reader.lines().take(BOARD_SIZE).enumerate() {
            self.fill_row(row, &line?);
        }
        Ok(())
    }

    fn fill_row(&mut self, row: usize, line: &str) {
        for (col, c) in line.chars().take(BOARD_SIZE).enumerate() {
            self.squares[row][col] = Piece::from_char(c);
        }
    }
}
