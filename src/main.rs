use wfc_sudoku::{solve, Board, Grid};

const EXAMPLE_PUZZLE: [[u8; 9]; 9] = [
    [5, 3, 0, 0, 7, 0, 0, 0, 0],
    [6, 0, 0, 1, 9, 5, 0, 0, 0],
    [0, 9, 8, 0, 0, 0, 0, 6, 0],
    [8, 0, 0, 0, 6, 0, 0, 0, 3],
    [4, 0, 0, 8, 0, 3, 0, 0, 1],
    [7, 0, 0, 0, 2, 0, 0, 0, 6],
    [0, 6, 0, 0, 0, 0, 2, 8, 0],
    [0, 0, 0, 4, 1, 9, 0, 0, 5],
    [0, 0, 0, 0, 8, 0, 0, 7, 9],
];

fn main() {
    let board = Board::try_from(EXAMPLE_PUZZLE).unwrap();
    let mut grid = Grid::new(&board);
    let outcome = solve(&mut grid, &mut rand::thread_rng());
    println!("{:?}", grid);
    println!("Outcome: {:?}", outcome);
}
