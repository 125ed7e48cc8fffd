use std::fmt;

pub const BOARD_SIZE: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn step. White starts at the bottom (row 12) and moves up.
    pub fn pawn_direction(&self) -> i32 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    pub fn pawn_start_row(&self) -> i32 {
        match self {
            Color::White => 12,
            Color::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Rook,
    Knight,
    Bishop,
    King,
    Queen,
    Archbishop,
    Camel,
    Guard,
    Amazon,
    Chancellor,
}

impl PieceType {
    pub const ALL: [PieceType; 11] = [
        PieceType::Pawn,
        PieceType::Rook,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::King,
        PieceType::Queen,
        PieceType::Archbishop,
        PieceType::Camel,
        PieceType::Guard,
        PieceType::Amazon,
        PieceType::Chancellor,
    ];

    /// Material weight in millipawns (a pawn is worth 1_000).
    pub fn value(&self) -> i32 {
        match self {
            PieceType::King => 99_999_000,
            PieceType::Amazon => 12_000,
            PieceType::Queen => 9_500,
            PieceType::Chancellor => 8_500,
            PieceType::Archbishop => 7_500,
            PieceType::Rook => 5_250,
            PieceType::Guard => 5_000,
            PieceType::Bishop => 3_625,
            PieceType::Camel => 2_000,
            PieceType::Knight => 2_000,
            PieceType::Pawn => 1_000,
        }
    }

    /// Upper-case layout letter of the piece kind.
    pub fn letter(&self) -> char {
        match self {
            PieceType::Pawn => 'P',
            PieceType::Rook => 'R',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Archbishop => 'H',
            PieceType::Camel => 'C',
            PieceType::Guard => 'G',
            PieceType::Amazon => 'A',
            PieceType::King => 'K',
            PieceType::Chancellor => 'E',
            PieceType::Queen => 'Q',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'R' => Some(PieceType::Rook),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'H' => Some(PieceType::Archbishop),
            'C' => Some(PieceType::Camel),
            'G' => Some(PieceType::Guard),
            'A' => Some(PieceType::Amazon),
            'K' => Some(PieceType::King),
            'E' => Some(PieceType::Chancellor),
            'Q' => Some(PieceType::Queen),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
        }
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Layout character: lowercase for white, uppercase for black.
    pub fn to_char(&self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_lowercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let color = if c.is_ascii_lowercase() { Color::White } else { Color::Black };
        PieceType::from_letter(c).map(|kind| Piece::new(kind, color))
    }
}

/// A board coordinate. Signed so that off-board probes are representable.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Square {
    pub row: i32,
    pub col: i32,
}

impl Square {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(&self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    pub fn is_inside_board(&self) -> bool {
        (0..BOARD_SIZE as i32).contains(&self.row) && (0..BOARD_SIZE as i32).contains(&self.col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from_row: i32, from_col: i32, to_row: i32, to_col: i32) -> Self {
        Self {
            from: Square::new(from_row, from_col),
            to: Square::new(to_row, to_col),
        }
    }

    pub fn between(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Which rows turn an arriving pawn into a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromotionRule {
    /// Row 0 or row `BOARD_SIZE / 2`, for either color.
    #[default]
    Legacy,
    /// The opponent's back rank: row 0 for white, the last row for black.
    FarRank,
}

impl PromotionRule {
    pub fn promotes(&self, color: Color, row: i32) -> bool {
        match self {
            PromotionRule::Legacy => row == 0 || row == (BOARD_SIZE / 2) as i32,
            PromotionRule::FarRank => match color {
                Color::White => row == 0,
                Color::Black => row == BOARD_SIZE as i32 - 1,
            },
        }
    }
}

/// Everything `unmake_move` needs to put both touched cells back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveUndo {
    pub mv: Move,
    pub moved: Option<Piece>,
    pub captured: Option<Piece>,
}
