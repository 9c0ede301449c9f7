use itertools::iproduct;

use crate::board::{HEIGHT, WIDTH};

/// Iterates over the 20 peers of (row, col): every other cell sharing its row,
/// its column or its 3x3 box. Box cells that also share the row or column are
/// only yielded by the row/column part, so no cell appears twice.
pub fn peers(row: usize, col: usize) -> impl Iterator<Item = (usize, usize)> {
    assert!(row < HEIGHT && col < WIDTH);
    let row_peers = (0..WIDTH).filter(move |&c| c != col).map(move |c| (row, c));
    let col_peers = (0..HEIGHT).filter(move |&r| r != row).map(move |r| (r, col));
    let box_row = row / 3 * 3;
    let box_col = col / 3 * 3;
    let box_peers = iproduct!(box_row..box_row + 3, box_col..box_col + 3)
        .filter(move |&(r, c)| r != row && c != col);
    row_peers.chain(col_peers).chain(box_peers)
}
