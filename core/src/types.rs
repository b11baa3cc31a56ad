/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Row-major position of a cell, `row * cols + col`.
pub type CellIndex = usize;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Number of cells on a `rows` by `cols` board. Two `u8` sides always fit.
pub const fn cell_count(rows: Coord, cols: Coord) -> CellCount {
    rows as CellCount * cols as CellCount
}

/// Converts a row-major index into `(row, col)` for a board `cols` wide.
///
/// Both axes are derived from the column count, so non-square boards map
/// correctly.
pub const fn index_to_coords(index: CellIndex, cols: Coord) -> Coord2 {
    let cols = cols as usize;
    ((index / cols) as Coord, (index % cols) as Coord)
}

pub const fn coords_to_index((row, col): Coord2, cols: Coord) -> CellIndex {
    row as usize * cols as usize + col as usize
}

/// Row and column steps to the 8 surrounding cells, north-west first then
/// row by row.
const NEIGHBOR_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Indices of the cells around `index` that lie on a board of `size`.
pub fn neighbor_indices(
    index: CellIndex,
    (rows, cols): Coord2,
) -> impl Iterator<Item = CellIndex> {
    let (row, col) = index_to_coords(index, cols);
    NEIGHBOR_STEPS.iter().filter_map(move |&(step_row, step_col)| {
        let row = row.checked_add_signed(step_row).filter(|&row| row < rows)?;
        let col = col.checked_add_signed(step_col).filter(|&col| col < cols)?;
        Some(coords_to_index((row, col), cols))
    })
}
