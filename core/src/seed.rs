//! Commitment side of the draw: the seed triple, its commitment string and digest.

use alloc::{format, string::String};
use sha2::{Digest, Sha256};

use crate::*;

/// Raw SHA-256 output of a commitment string.
pub type CommitmentDigest = [u8; 32];

/// Separator between the three commitment fields.
const COMMITMENT_DELIMITER: char = ':';

/// The `(client_seed, server_seed, nonce)` tuple identifying one draw.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SeedTriple {
    client_seed: String,
    server_seed: String,
    nonce: u64,
}

impl SeedTriple {
    /// Seeds are opaque: no trimming or case folding happens here.
    pub fn new(
        client_seed: impl Into<String>,
        server_seed: impl Into<String>,
        nonce: u64,
    ) -> Result<Self> {
        let client_seed = client_seed.into();
        let server_seed = server_seed.into();
        if client_seed.is_empty() {
            return Err(DrawError::EmptyClientSeed);
        }
        if server_seed.is_empty() {
            return Err(DrawError::EmptyServerSeed);
        }
        Ok(Self {
            client_seed,
            server_seed,
            nonce,
        })
    }

    pub fn client_seed(&self) -> &str {
        &self.client_seed
    }

    pub fn server_seed(&self) -> &str {
        &self.server_seed
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Same seeds, following bet. `None` once the nonce space is exhausted.
    pub fn next_nonce(&self) -> Option<Self> {
        let nonce = self.nonce.checked_add(1)?;
        Some(Self {
            nonce,
            ..self.clone()
        })
    }

    /// `server:client:nonce`. Field order is fixed; verifiers rebuild this exact string.
    pub fn commitment(&self) -> String {
        format!(
            "{server}{d}{client}{d}{nonce}",
            server = self.server_seed,
            client = self.client_seed,
            nonce = self.nonce,
            d = COMMITMENT_DELIMITER,
        )
    }

    pub fn digest(&self) -> CommitmentDigest {
        let mut hasher = Sha256::new();
        hasher.update(self.commitment().as_bytes());
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        out
    }

    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest())
    }

    pub fn server_seed_hash(&self) -> String {
        hash_server_seed(&self.server_seed)
    }
}

/// Converts a signed nonce coming from an untyped boundary.
pub fn checked_nonce(nonce: i64) -> Result<u64> {
    u64::try_from(nonce).map_err(|_| DrawError::NegativeNonce)
}

/// Lowercase hex SHA-256 of a server seed, the value published before play.
pub fn hash_server_seed(server_seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(server_seed.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a revealed server seed against its published hash.
pub fn verify_server_seed(server_seed: &str, published_hash: &str) -> bool {
    hash_server_seed(server_seed).eq_ignore_ascii_case(published_hash.trim())
}
