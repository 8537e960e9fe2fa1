/// Single coordinate axis, used for grid rows and columns.
pub type Coord = u8;

/// Grid position as `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row-major cell index, `row * GRID_SIDE + col`.
pub type CellIndex = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u8;

/// Width and height of the square grid.
pub const GRID_SIDE: Coord = 5;

/// Size of the index domain every draw permutes.
pub const TOTAL_CELLS: CellCount = GRID_SIDE * GRID_SIDE;

/// At least one mine must be placed.
pub const MIN_MINES: CellCount = 1;

/// At least one safe cell must remain.
pub const MAX_MINES: CellCount = TOTAL_CELLS - 1;

/// Position in an `Array2` grid indexed `[row, col]`.
pub trait ToNdIndex {
    fn to_nd_index(self) -> [usize; 2];
}

impl ToNdIndex for Coord2 {
    fn to_nd_index(self) -> [usize; 2] {
        [self.0.into(), self.1.into()]
    }
}

impl ToNdIndex for CellIndex {
    fn to_nd_index(self) -> [usize; 2] {
        cell_coords(self).to_nd_index()
    }
}

/// Maps a cell index to its `(row, col)` position.
pub const fn cell_coords(index: CellIndex) -> Coord2 {
    (index / GRID_SIDE, index % GRID_SIDE)
}

/// Maps a `(row, col)` position back to its cell index, `None` when off the grid.
pub const fn cell_index((row, col): Coord2) -> Option<CellIndex> {
    if row < GRID_SIDE && col < GRID_SIDE {
        Some(row * GRID_SIDE + col)
    } else {
        None
    }
}

pub const fn is_valid_cell(index: CellIndex) -> bool {
    index < TOTAL_CELLS
}
