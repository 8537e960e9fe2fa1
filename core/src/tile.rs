use serde::{Deserialize, Serialize};

/// What a renderer shows for one grid cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tile {
    Mine,
    Safe,
}

impl Tile {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::Safe
    }
}
