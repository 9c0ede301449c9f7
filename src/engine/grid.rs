use std::collections::VecDeque;
use std::fmt::{self, Debug};
use std::num::NonZeroU8;

use bitvec::prelude::*;
use itertools::{iproduct, Itertools};
use rand::seq::SliceRandom;
use rand::Rng;

use super::peers::peers;
use crate::board::{Board, HEIGHT, MAX_VALUE, NUM_CELLS, WIDTH};

const NUM_VALUES_PER_CELL: usize = MAX_VALUE as usize;

/// A [Grid] is the working state of the constraint engine.
/// Each cell holds a set of candidate digits; a cell with one candidate is fixed,
/// a cell with zero candidates is a contradiction.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    // Stores 9 bits for each cell. If the bit is set, the digit is still a candidate.
    // Cells are ordered by rows, first left-to-right, then top-to-bottom.
    candidates: BitArr!(for NUM_CELLS * NUM_VALUES_PER_CELL),

    // One bit per cell, set iff the cell's value was supplied as a clue.
    // Never mutated after [Grid::new] returns.
    givens: BitArr!(for NUM_CELLS),
}

impl Grid {
    /// Builds a grid from the given clues and propagates all of them to the fixed point.
    ///
    /// Conflicting clues are not pre-validated. They surface as an empty candidate
    /// set during propagation, observable through [Grid::has_contradiction].
    pub fn new(board: &Board) -> Self {
        let mut grid = Self::with_clues(board);
        for (row, col) in iproduct!(0..HEIGHT, 0..WIDTH) {
            if let Some(value) = board.clue(row, col) {
                grid.propagate(row, col, value);
            }
        }
        grid
    }

    // Sets up the clue cells as singletons without propagating anything.
    fn with_clues(board: &Board) -> Self {
        let mut grid = Self {
            candidates: bitarr![const 1; NUM_CELLS * NUM_VALUES_PER_CELL],
            givens: bitarr![const 0; NUM_CELLS],
        };
        for (row, col) in iproduct!(0..HEIGHT, 0..WIDTH) {
            if let Some(value) = board.clue(row, col) {
                grid.fix(row, col, value);
                grid.givens.set(row * WIDTH + col, true);
            }
        }
        grid
    }

    fn cell_start_index(row: usize, col: usize) -> usize {
        assert!(row < HEIGHT && col < WIDTH);
        NUM_VALUES_PER_CELL * (row * WIDTH + col)
    }

    fn index(row: usize, col: usize, value: NonZeroU8) -> usize {
        assert!(value.get() <= MAX_VALUE);
        Self::cell_start_index(row, col) + usize::from(value.get()) - 1
    }

    /// Iterates over the remaining candidate digits of a cell, in ascending order.
    pub fn candidates(&self, row: usize, col: usize) -> impl Iterator<Item = NonZeroU8> + '_ {
        let start_index = Self::cell_start_index(row, col);
        (1u8..=MAX_VALUE)
            .filter(move |i| self.candidates[start_index + usize::from(*i) - 1])
            .map(|i| NonZeroU8::new(i).unwrap())
    }

    #[inline]
    pub fn is_candidate(&self, row: usize, col: usize, value: NonZeroU8) -> bool {
        self.candidates[Self::index(row, col, value)]
    }

    /// The number of remaining candidates of a cell. 1 means the cell is fixed,
    /// 0 means the cell is contradictory.
    #[inline]
    pub fn entropy(&self, row: usize, col: usize) -> usize {
        let start_index = Self::cell_start_index(row, col);
        self.candidates[start_index..start_index + NUM_VALUES_PER_CELL].count_ones()
    }

    /// Returns the cell's value if it is fixed, i.e. has exactly one candidate left.
    pub fn value(&self, row: usize, col: usize) -> Option<NonZeroU8> {
        let mut candidates = self.candidates(row, col);
        let first = candidates.next()?;
        match candidates.next() {
            None => Some(first),
            Some(_) => None,
        }
    }

    #[inline]
    pub fn is_given(&self, row: usize, col: usize) -> bool {
        self.givens[row * WIDTH + col]
    }

    /// True iff some cell has run out of candidates. Solving cannot continue from
    /// here, the grid has to be rebuilt from a (possibly modified) [Board].
    pub fn has_contradiction(&self) -> bool {
        iproduct!(0..HEIGHT, 0..WIDTH).any(|(row, col)| self.entropy(row, col) == 0)
    }

    // Replaces the candidate set of a cell with the given singleton.
    fn fix(&mut self, row: usize, col: usize, value: NonZeroU8) {
        let start_index = Self::cell_start_index(row, col);
        for i in 0..NUM_VALUES_PER_CELL {
            self.candidates.set(start_index + i, false);
        }
        self.candidates.set(Self::index(row, col, value), true);
    }

    // Returns whether the candidate was actually removed, i.e. was still set before.
    fn remove_candidate(&mut self, row: usize, col: usize, value: NonZeroU8) -> bool {
        self.candidates.replace(Self::index(row, col, value), false)
    }

    /// Removes `value` from the candidate set of every peer of (row, col),
    /// cascading into peers that are reduced to their last candidate.
    ///
    /// Runs to the fixed point before returning: no cell that was reduced to one
    /// candidate is left un-propagated. Uses an explicit work queue instead of
    /// recursion so the stack depth stays constant. A peer whose candidate set
    /// becomes empty is left in that state for the caller to observe; it does not
    /// stop the remaining peer updates.
    pub fn propagate(&mut self, row: usize, col: usize, value: NonZeroU8) {
        let mut queue = VecDeque::new();
        queue.push_back((row, col, value));
        while let Some((row, col, value)) = queue.pop_front() {
            for (peer_row, peer_col) in peers(row, col) {
                if !self.remove_candidate(peer_row, peer_col, value) {
                    continue;
                }
                if let Some(forced) = self.value(peer_row, peer_col) {
                    queue.push_back((peer_row, peer_col, forced));
                }
            }
        }
    }

    /// Picks the next cell to fix: the open cell (entropy > 1) with the fewest
    /// remaining candidates, ties broken uniformly at random. Returns `None` when
    /// every cell is already fixed or contradictory.
    pub fn lowest_entropy_cell(&self, rng: &mut impl Rng) -> Option<(usize, usize)> {
        let open_cells = iproduct!(0..HEIGHT, 0..WIDTH)
            .filter(|&(row, col)| self.entropy(row, col) > 1)
            .min_set_by_key(|&(row, col)| self.entropy(row, col));
        open_cells.choose(rng).copied()
    }

    /// Collapses a cell to a single value chosen uniformly at random from its
    /// current candidates and returns that value. The caller has to follow up with
    /// [Grid::propagate] for the chosen value.
    ///
    /// Panics if the cell has no candidates left.
    pub fn collapse(&mut self, row: usize, col: usize, rng: &mut impl Rng) -> NonZeroU8 {
        let options: Vec<NonZeroU8> = self.candidates(row, col).collect();
        let value = options
            .choose(rng)
            .copied()
            .expect("Grid::collapse called on a cell with an empty candidate set");
        self.fix(row, col, value);
        value
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..HEIGHT {
            if row > 0 && row % 3 == 0 {
                writeln!(f)?;
            }
            for col in 0..WIDTH {
                if col > 0 && col % 3 == 0 {
                    write!(f, " ")?;
                }
                match (self.value(row, col), self.entropy(row, col)) {
                    (Some(value), _) => write!(f, "{}", value)?,
                    (None, 0) => write!(f, "!")?,
                    (None, _) => write!(f, "_")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
