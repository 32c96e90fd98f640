// Proof of Work implementation

use crate::core::{digest, prepare_data, Block, Hash256};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Difficulty used when none is configured
pub const DEFAULT_TARGET_BITS: u32 = 24;

/// Largest meaningful difficulty: target becomes 2^0 = 1
pub const MAX_TARGET_BITS: u32 = 256;

/// Exclusive upper bound of the nonce search
pub const MAX_NONCE: u64 = i64::MAX as u64;

/// Mining errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PowError {
    #[error("target bits must be in 0..=256, got {0}")]
    InvalidTargetBits(u32),
    #[error("nonce space exhausted after {attempts} attempts")]
    NonceExhausted { attempts: u64 },
}

/// Difficulty target: a hash is accepted when it is below 2^(256 - bits)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    bits: u32,
}

impl Target {
    pub fn new(bits: u32) -> Result<Self, PowError> {
        if bits > MAX_TARGET_BITS {
            return Err(PowError::InvalidTargetBits(bits));
        }
        Ok(Self { bits })
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Full 256-bit target in big-endian byte order.
    ///
    /// Returns `None` for zero bits, where the target is 2^256 and does not fit.
    pub fn to_hash256(&self) -> Option<Hash256> {
        if self.bits == 0 {
            return None;
        }
        let shift = (MAX_TARGET_BITS - self.bits) as usize;
        let mut target = [0u8; 32];
        target[31 - shift / 8] = 1 << (shift % 8);
        Some(Hash256::new(target))
    }

    /// Check if a hash meets this target (hash < target)
    pub fn is_valid_hash(&self, hash: &Hash256) -> bool {
        let Some(target) = self.to_hash256() else {
            return true;
        };

        // Compare byte by byte (big-endian comparison)
        for i in 0..32 {
            if hash.as_bytes()[i] < target.as_bytes()[i] {
                return true;
            } else if hash.as_bytes()[i] > target.as_bytes()[i] {
                return false;
            }
        }

        // Equal to the target is not below it
        false
    }

    /// Count leading zero bits in the 256-bit target
    pub fn leading_zeros(&self) -> u32 {
        let Some(target) = self.to_hash256() else {
            return 0;
        };
        let mut zeros = 0;

        for byte in target.as_bytes() {
            if *byte == 0 {
                zeros += 8;
            } else {
                zeros += byte.leading_zeros();
                break;
            }
        }

        zeros
    }
}

impl Default for Target {
    fn default() -> Self {
        Self { bits: DEFAULT_TARGET_BITS }
    }
}

/// Proof-of-work context binding one block to a target
pub struct ProofOfWork<'a> {
    block: &'a Block,
    target: Target,
    max_nonce: u64,
}

impl<'a> ProofOfWork<'a> {
    pub fn new(block: &'a Block, target: Target) -> Self {
        Self {
            block,
            target,
            max_nonce: MAX_NONCE,
        }
    }

    /// Lower the exclusive nonce bound
    pub fn with_max_nonce(mut self, max_nonce: u64) -> Self {
        self.max_nonce = max_nonce;
        self
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Digest of the block's mined fields combined with `nonce`
    pub fn hash_with_nonce(&self, nonce: u64) -> Hash256 {
        digest(&prepare_data(self.block, self.target.bits, nonce))
    }

    /// Search nonces upward from zero and return the first one whose hash
    /// falls below the target
    pub fn run(&self) -> Result<MiningResult, PowError> {
        let start_time = Instant::now();
        let mut attempts = 0u64;

        log::info!("Mining the block containing \"{}\"", self.block.data_lossy());

        for nonce in 0..self.max_nonce {
            let hash = self.hash_with_nonce(nonce);
            attempts += 1;
            log::trace!("{}", hash);

            if self.target.is_valid_hash(&hash) {
                let result = MiningResult {
                    nonce,
                    hash,
                    attempts,
                    duration: start_time.elapsed(),
                };
                log::info!(
                    "Mined {} (nonce {}, {} attempts in {:?})",
                    hash, nonce, attempts, result.duration
                );
                return Ok(result);
            }

            // Progress indicator every 100k attempts
            if attempts % 100_000 == 0 {
                let elapsed = start_time.elapsed();
                log::debug!("Mining attempts: {} ({:.1} KH/s)",
                    attempts,
                    attempts as f64 / elapsed.as_secs_f64() / 1000.0
                );
            }
        }

        log::warn!("Nonce space exhausted after {} attempts", attempts);
        Err(PowError::NonceExhausted { attempts })
    }

    /// Recompute the hash from the block's stored nonce and check it
    /// against the target. The block's stored hash is not consulted.
    pub fn validate(&self) -> bool {
        let hash = self.hash_with_nonce(self.block.nonce());
        self.target.is_valid_hash(&hash)
    }
}

/// Mining result
#[derive(Debug, Clone)]
pub struct MiningResult {
    /// The nonce that was found
    pub nonce: u64,
    /// The resulting hash
    pub hash: Hash256,
    /// Number of attempts
    pub attempts: u64,
    /// Time taken
    pub duration: Duration,
}

impl MiningResult {
    /// Calculate hash rate (hashes per second)
    pub fn hash_rate(&self) -> f64 {
        self.attempts as f64 / self.duration.as_secs_f64()
    }
}
