//! MT19937 with the seeding and integer draws the reference verifier uses.
//!
//! Independent verifiers replay draws with CPython's `random.Random` seeded by the raw
//! commitment digest, so every step below (byte-seed expansion, `init_by_array`,
//! `getrandbits`, rejection sampling and the shuffle walk) must stay bit-identical to it.

use alloc::vec::Vec;
use sha2::{Digest, Sha512};

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

#[derive(Clone)]
pub struct Mt19937 {
    state: [u32; N],
    index: usize,
}

impl core::fmt::Debug for Mt19937 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Mt19937")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Mt19937 {
    /// Seeds from arbitrary bytes. Every input byte influences the state.
    pub fn from_seed_bytes(seed: &[u8]) -> Self {
        Self::from_key(&seed_key(seed))
    }

    fn from_key(key: &[u32]) -> Self {
        debug_assert!(!key.is_empty());
        let mut state = init_genrand(19_650_218);
        let mut i = 1;
        let mut j = 0;

        for _ in 0..N.max(key.len()) {
            let prev = state[i - 1];
            state[i] = (state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }

        for _ in 0..N - 1 {
            let prev = state[i - 1];
            state[i] = (state[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                state[0] = state[N - 1];
                i = 1;
            }
        }

        // MSB is 1, assuring a non-zero initial array
        state[0] = UPPER_MASK;

        Self { state, index: N }
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^ (y >> 18)
    }

    /// Top `bits` bits of the next output, `1 <= bits <= 32`.
    pub fn next_bits(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits));
        self.next_u32() >> (32 - bits)
    }

    /// Uniform integer in `0..bound` by rejection sampling on the bit length of `bound`.
    pub fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let bits = u32::BITS - bound.leading_zeros();
        loop {
            let candidate = self.next_bits(bits);
            if candidate < bound {
                return candidate;
            }
        }
    }

    /// Fisher-Yates, walking from the back.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below((i + 1) as u32) as usize;
            items.swap(i, j);
        }
    }

    fn twist(&mut self) {
        for k in 0..N {
            let y = (self.state[k] & UPPER_MASK) | (self.state[(k + 1) % N] & LOWER_MASK);
            let mut next = self.state[(k + M) % N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[k] = next;
        }
        self.index = 0;
    }
}

fn init_genrand(seed: u32) -> [u32; N] {
    let mut state = [0u32; N];
    state[0] = seed;
    for i in 1..N {
        let prev = state[i - 1];
        state[i] = 1_812_433_253u32
            .wrapping_mul(prev ^ (prev >> 30))
            .wrapping_add(i as u32);
    }
    state
}

/// Expands seed bytes into `init_by_array` key words.
///
/// The seed is extended with its own SHA-512, read as one big-endian integer and split
/// into 32-bit limbs, least significant first. High zero limbs are dropped, keeping one.
fn seed_key(seed: &[u8]) -> Vec<u32> {
    let mut material = Vec::with_capacity(seed.len() + 64);
    material.extend_from_slice(seed);
    material.extend_from_slice(&Sha512::digest(seed));

    let mut key: Vec<u32> = material
        .rchunks(4)
        .map(|chunk| {
            let mut word = [0u8; 4];
            word[4 - chunk.len()..].copy_from_slice(chunk);
            u32::from_be_bytes(word)
        })
        .collect();

    while key.len() > 1 && key.last() == Some(&0) {
        key.pop();
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_xyz_abc_0() -> [u8; 32] {
        let mut out = [0u8; 32];
        hex::decode_to_slice(
            "404b905854e7111eba5fc03ae98a93c7735cb16dc25d54d2bf5ae917321b9454",
            &mut out,
        )
        .unwrap();
        out
    }

    #[test]
    fn output_stream_matches_reference() {
        let mut rng = Mt19937::from_seed_bytes(&digest_xyz_abc_0());
        assert_eq!(rng.next_u32(), 4_037_929_344);
        assert_eq!(rng.next_u32(), 3_190_057_048);
        assert_eq!(rng.next_u32(), 1_092_710_186);
    }

    #[test]
    fn shuffle_matches_reference_permutation() {
        let mut rng = Mt19937::from_seed_bytes(&digest_xyz_abc_0());
        let mut tiles: [u8; 25] = core::array::from_fn(|i| i as u8);
        rng.shuffle(&mut tiles);
        assert_eq!(
            tiles,
            [
                14, 2, 22, 7, 3, 0, 19, 1, 18, 17, 15, 11, 20, 5, 24, 10, 6, 16, 12, 21, 4, 13,
                9, 8, 23
            ]
        );
    }

    #[test]
    fn seed_key_reads_limbs_least_significant_first() {
        let key = seed_key(&[0x01, 0x02, 0x03, 0x04, 0x05]);
        // 5 seed bytes + 64 digest bytes = 69 bytes -> 18 limbs, top limb holds one byte
        assert_eq!(key.len(), 18);
        assert_eq!(key[17], 0x01);
        assert_eq!(key[16], 0x0203_0405);
    }

    #[test]
    fn seed_key_drops_high_zero_limbs() {
        let key = seed_key(&[0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(key.len(), 16);
    }

    #[test]
    fn different_seeds_give_different_streams() {
        let mut rng_a = Mt19937::from_seed_bytes(b"seed-a");
        let mut rng_b = Mt19937::from_seed_bytes(b"seed-b");
        let a: [u32; 4] = core::array::from_fn(|_| rng_a.next_u32());
        let b: [u32; 4] = core::array::from_fn(|_| rng_b.next_u32());
        assert_ne!(a, b);
    }

    #[test]
    fn below_stays_in_range_across_twists() {
        let mut rng = Mt19937::from_seed_bytes(b"range");
        for bound in 1..=(2 * N as u32) {
            assert!(rng.below(bound) < bound);
        }
    }
}
