use std::fmt::{self, Debug};
use std::num::NonZeroU8;

use thiserror::Error;

pub const WIDTH: usize = 9;
pub const HEIGHT: usize = 9;
pub const NUM_CELLS: usize = WIDTH * HEIGHT;
pub const MAX_VALUE: u8 = 9;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("Clue {value} at row {row}, column {col} is outside 1..={MAX_VALUE}")]
    InvalidClue { row: usize, col: usize, value: u8 },

    #[error("Expected {NUM_CELLS} cells but found {found}")]
    WrongNumCells { found: usize },

    #[error("Invalid character {0:?} in board string")]
    InvalidCharacter(char),
}

/// A [Board] is a 9x9 grid of clues for a sudoku puzzle.
/// Each cell either holds a given digit in 1..=9 or is empty.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    // Cells are ordered by rows, first left-to-right, then top-to-bottom.
    cells: [Option<NonZeroU8>; NUM_CELLS],
}

impl Board {
    #[inline]
    pub const fn new_empty() -> Self {
        Board {
            cells: [None; NUM_CELLS],
        }
    }

    /// Parses a board from a string with one character per cell, row by row.
    /// Digits 1-9 are clues, '_' or '0' is an empty cell, whitespace is ignored.
    pub fn from_str(s: &str) -> Result<Self, BoardError> {
        let mut cells = [None; NUM_CELLS];
        let mut num_cells = 0;
        for c in s.chars() {
            if c.is_whitespace() {
                continue;
            }
            let value = match c {
                '_' | '0' => None,
                '1'..='9' => NonZeroU8::new(c as u8 - b'0'),
                _ => return Err(BoardError::InvalidCharacter(c)),
            };
            if num_cells >= NUM_CELLS {
                return Err(BoardError::WrongNumCells {
                    found: num_cells + 1,
                });
            }
            cells[num_cells] = value;
            num_cells += 1;
        }
        if num_cells != NUM_CELLS {
            return Err(BoardError::WrongNumCells { found: num_cells });
        }
        Ok(Board { cells })
    }

    #[inline]
    pub fn clue(&self, row: usize, col: usize) -> Option<NonZeroU8> {
        self.cells[Self::index(row, col)]
    }

    #[inline]
    pub fn set_clue(&mut self, row: usize, col: usize, value: Option<NonZeroU8>) {
        self.cells[Self::index(row, col)] = value;
    }

    pub fn num_clues(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    fn index(row: usize, col: usize) -> usize {
        assert!(row < HEIGHT && col < WIDTH);
        row * WIDTH + col
    }
}

impl TryFrom<[[u8; WIDTH]; HEIGHT]> for Board {
    type Error = BoardError;

    /// Converts a raw 9x9 array into a [Board]. 0 means the cell is empty,
    /// 1..=9 is a clue, anything else is rejected.
    fn try_from(rows: [[u8; WIDTH]; HEIGHT]) -> Result<Self, Self::Error> {
        let mut board = Board::new_empty();
        for (row, row_values) in rows.iter().enumerate() {
            for (col, &value) in row_values.iter().enumerate() {
                if value > MAX_VALUE {
                    return Err(BoardError::InvalidClue { row, col, value });
                }
                board.set_clue(row, col, NonZeroU8::new(value));
            }
        }
        Ok(board)
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            if row > 0 && row % 3 == 0 {
                writeln!(f)?;
            }
            for col in 0..WIDTH {
                if col > 0 && col % 3 == 0 {
                    write!(f, " ")?;
                }
                match self.clue(row, col) {
                    Some(value) => write!(f, "{}", value)?,
                    None => write!(f, "_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
