use std::fmt;
use std::str::FromStr;

use crate::constants::{BOARDSIZE, HOME_ROWS, N};
use crate::error::ParseSquareError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }

    /// Row delta of a forward step. Red moves toward row 0, black toward row 7.
    pub fn forward(self) -> isize {
        match self {
            Color::Red => -1,
            Color::Black => 1,
        }
    }

    /// The far edge on which a man of this color is crowned.
    pub fn crowning_row(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Black => N - 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub fn man(color: Color) -> Self {
        Self { color, king: false }
    }

    pub fn king(color: Color) -> Self {
        Self { color, king: true }
    }

    /// Crown the piece. Returns true only if it was not already a king.
    pub fn crown(&mut self) -> bool {
        let promoted = !self.king;
        self.king = true;
        promoted
    }

    fn symbol(self) -> char {
        match (self.color, self.king) {
            (Color::Red, false) => 'r',
            (Color::Red, true) => 'R',
            (Color::Black, false) => 'b',
            (Color::Black, true) => 'B',
        }
    }
}

/// A cell on the board, stored as `row * N + col`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Build a square from coordinates, or `None` if either is off the board.
    pub fn new(row: usize, col: usize) -> Option<Self> {
        if row < N && col < N {
            Some(Square((row * N + col) as u8))
        } else {
            None
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        (index < BOARDSIZE).then(|| Square(index as u8))
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn row(self) -> usize {
        self.index() / N
    }

    #[inline]
    pub fn col(self) -> usize {
        self.index() % N
    }

    /// Dark cells are the only ones that may hold a piece.
    #[inline]
    pub fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Step `dr` rows and `dc` columns, or `None` if that leaves the board.
    pub fn offset(self, dr: isize, dc: isize) -> Option<Square> {
        let row = self.row() as isize + dr;
        let col = self.col() as isize + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as usize, col as usize)
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARDSIZE).map(|i| Square(i as u8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.col())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    /// Parse `row,col`, e.g. `5,2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSquareError(s.to_string());
        let (row, col) = s.trim().split_once(',').ok_or_else(err)?;
        let row = row.trim().parse::<usize>().map_err(|_| err())?;
        let col = col.trim().parse::<usize>().map_err(|_| err())?;
        Square::new(row, col).ok_or_else(err)
    }
}

/// The 64 cells of the board. The board owns every piece.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Piece>; BOARDSIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            cells: [None; BOARDSIZE],
        }
    }

    /// The standard starting layout: black men on the dark cells of the top
    /// three rows, red men on the dark cells of the bottom three.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for sq in Square::all().filter(|sq| sq.is_dark()) {
            if sq.row() < HOME_ROWS {
                board.put(sq, Piece::man(Color::Black));
            } else if sq.row() >= N - HOME_ROWS {
                board.put(sq, Piece::man(Color::Red));
            }
        }
        board
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Place a piece, replacing whatever was there.
    ///
    /// # Panics
    /// If `sq` is a light cell.
    pub fn put(&mut self, sq: Square, piece: Piece) {
        assert!(sq.is_dark(), "pieces may only stand on dark cells, got {sq}");
        self.cells[sq.index()] = Some(piece);
    }

    /// Remove and return the piece on `sq`.
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.index()].take()
    }

    pub(crate) fn get_mut(&mut self, sq: Square) -> Option<&mut Piece> {
        self.cells[sq.index()].as_mut()
    }

    /// Move whatever stands on `from` to `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        if let Some(piece) = self.take(from) {
            self.put(to, piece);
        }
    }

    /// Occupied squares and their pieces, in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|p| (sq, p)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color == color).count()
    }

    /// Render the board, letting `mark` override the character of empty cells.
    pub fn render_with(&self, mark: impl Fn(Square) -> Option<char>) -> String {
        let mut out = String::from("  ");
        for col in 0..N {
            out.push_str(&format!(" {col}"));
        }
        out.push('\n');
        for row in 0..N {
            let mut line = format!("{row} ");
            for col in 0..N {
                let Some(sq) = Square::new(row, col) else {
                    continue;
                };
                let ch = match self.get(sq) {
                    Some(piece) => piece.symbol(),
                    None if !sq.is_dark() => ' ',
                    None => mark(sq).unwrap_or('.'),
                };
                line.push(' ');
                line.push(ch);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_with(|_| None))
    }
}
