use rand::Rng;

mod grid;
mod peers;

pub use grid::Grid;

/// The result of advancing the engine by one collapse.
///
/// `Solved` and `Contradiction` are terminal: further [step] calls keep returning
/// the same outcome until the grid is rebuilt with [Grid::new].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continue,
    Solved,
    Contradiction,
}

/// Advances the grid by one step: picks the open cell with the lowest entropy,
/// collapses it to a random candidate and propagates the choice.
///
/// When no open cell is left, reports whether the grid ended up solved or ran
/// into a contradiction. There is no backtracking; a contradiction is final for
/// this grid.
pub fn step(grid: &mut Grid, rng: &mut impl Rng) -> StepOutcome {
    let Some((row, col)) = grid.lowest_entropy_cell(rng) else {
        if grid.has_contradiction() {
            return StepOutcome::Contradiction;
        }
        return StepOutcome::Solved;
    };
    let value = grid.collapse(row, col, rng);
    grid.propagate(row, col, value);
    StepOutcome::Continue
}

/// Runs [step] until the grid reaches a terminal outcome and returns it.
pub fn solve(grid: &mut Grid, rng: &mut impl Rng) -> StepOutcome {
    loop {
        match step(grid, rng) {
            StepOutcome::Continue => {}
            outcome => return outcome,
        }
    }
}
