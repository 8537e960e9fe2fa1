use crate::*;
pub use mt19937::*;

mod mt19937;

pub trait MineGenerator {
    fn generate(self, config: DrawConfig) -> MineLayout;
}

/// Commitment-driven generation: the digest of a [`SeedTriple`] seeds a fresh generator,
/// which shuffles the whole grid; the first `mines` cells of the shuffle become mines.
#[derive(Clone, Debug, PartialEq)]
pub struct FairMineGenerator {
    digest: CommitmentDigest,
}

impl FairMineGenerator {
    pub fn new(seeds: &SeedTriple) -> Self {
        Self::from_digest(seeds.digest())
    }

    pub fn from_digest(digest: CommitmentDigest) -> Self {
        Self { digest }
    }

    /// Every cell index in shuffled order; mines are always a prefix of this.
    pub fn permutation(&self) -> [CellIndex; TOTAL_CELLS as usize] {
        let mut tiles: [CellIndex; TOTAL_CELLS as usize] =
            core::array::from_fn(|i| i as CellIndex);
        Mt19937::from_seed_bytes(&self.digest).shuffle(&mut tiles);
        tiles
    }
}

impl MineGenerator for FairMineGenerator {
    fn generate(self, config: DrawConfig) -> MineLayout {
        let permutation = self.permutation();
        let mines = &permutation[..usize::from(config.mines())];

        log::trace!(
            "Drew {} mines from digest {:02x}{:02x}{:02x}{:02x}..",
            mines.len(),
            self.digest[0],
            self.digest[1],
            self.digest[2],
            self.digest[3]
        );
        MineLayout::from_drawn(mines)
    }
}
