#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use error::*;
pub use generator::*;
pub use seed::*;
pub use tile::*;
pub use types::*;

mod error;
mod generator;
mod seed;
mod tile;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DrawConfig {
    mines: CellCount,
}

impl DrawConfig {
    pub const fn new_unchecked(mines: CellCount) -> Self {
        Self { mines }
    }

    pub fn new(mines: CellCount) -> Result<Self> {
        if (MIN_MINES..=MAX_MINES).contains(&mines) {
            Ok(Self::new_unchecked(mines))
        } else {
            Err(DrawError::MineCountOutOfRange(mines.into()))
        }
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn safe_cells(&self) -> CellCount {
        TOTAL_CELLS - self.mines
    }
}

impl TryFrom<i64> for DrawConfig {
    type Error = DrawError;

    fn try_from(mines: i64) -> Result<Self> {
        CellCount::try_from(mines)
            .map_err(|_| DrawError::MineCountOutOfRange(mines))
            .and_then(Self::new)
    }
}

/// Mine cells of one draw, ascending and duplicate-free.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<CellIndex>", into = "Vec<CellIndex>")]
pub struct MineLayout {
    mines: Vec<CellIndex>,
}

impl MineLayout {
    /// Validates a claimed layout: every index on the grid, no repeats, count in range.
    pub fn from_indices(indices: &[CellIndex]) -> Result<Self> {
        let mut seen = [false; TOTAL_CELLS as usize];
        for &index in indices {
            if !is_valid_cell(index) {
                return Err(DrawError::InvalidCell(index));
            }
            let slot = &mut seen[usize::from(index)];
            if *slot {
                return Err(DrawError::DuplicateCell(index));
            }
            *slot = true;
        }
        let count = i64::try_from(indices.len()).unwrap_or(i64::MAX);
        DrawConfig::try_from(count)?;

        Ok(Self::from_drawn(indices))
    }

    /// Caller guarantees distinct in-range indices.
    pub(crate) fn from_drawn(indices: &[CellIndex]) -> Self {
        let mut mines = indices.to_vec();
        mines.sort_unstable();
        Self { mines }
    }

    pub fn mines(&self) -> &[CellIndex] {
        &self.mines
    }

    pub fn mine_count(&self) -> CellCount {
        // bounded by TOTAL_CELLS on construction
        self.mines.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        TOTAL_CELLS - self.mine_count()
    }

    pub fn draw_config(&self) -> DrawConfig {
        DrawConfig::new_unchecked(self.mine_count())
    }

    pub fn contains_mine(&self, index: CellIndex) -> bool {
        self.mines.binary_search(&index).is_ok()
    }

    pub fn tile_at(&self, coords: Coord2) -> Tile {
        match cell_index(coords) {
            Some(index) if self.contains_mine(index) => Tile::Mine,
            _ => Tile::Safe,
        }
    }

    /// The full grid indexed `[row, col]`.
    pub fn tiles(&self) -> Array2<Tile> {
        let side = usize::from(GRID_SIDE);
        let mut tiles = Array2::default((side, side));
        for &index in &self.mines {
            tiles[index.to_nd_index()] = Tile::Mine;
        }
        tiles
    }

    pub fn iter_mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mines.iter().map(|&index| cell_coords(index))
    }
}

impl TryFrom<Vec<CellIndex>> for MineLayout {
    type Error = DrawError;

    fn try_from(indices: Vec<CellIndex>) -> Result<Self> {
        Self::from_indices(&indices)
    }
}

impl From<MineLayout> for Vec<CellIndex> {
    fn from(layout: MineLayout) -> Self {
        layout.mines
    }
}

/// Derives the mine layout for a seed triple.
///
/// Validation runs before hashing: empty seeds and mine counts outside `1..=24` are
/// rejected with [`DrawError`].
pub fn derive(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    mine_count: CellCount,
) -> Result<MineLayout> {
    let seeds = SeedTriple::new(client_seed, server_seed, nonce)?;
    let config = DrawConfig::new(mine_count)?;
    Ok(derive_from(&seeds, config))
}

pub fn derive_from(seeds: &SeedTriple, config: DrawConfig) -> MineLayout {
    log::debug!(
        "Deriving {} mines for nonce {}",
        config.mines(),
        seeds.nonce()
    );
    FairMineGenerator::new(seeds).generate(config)
}

/// Recomputes a draw and compares it with a claimed layout, in any order.
pub fn verify_layout(
    client_seed: &str,
    server_seed: &str,
    nonce: u64,
    claimed: &[CellIndex],
) -> Result<bool> {
    let seeds = SeedTriple::new(client_seed, server_seed, nonce)?;
    let claimed = MineLayout::from_indices(claimed)?;
    let derived = derive_from(&seeds, claimed.draw_config());
    Ok(derived == claimed)
}
