// Block data structure

use crate::consensus::{PowError, ProofOfWork, Target};
use crate::core::Hash256;
use std::borrow::Cow;

/// Payload of the first block in every chain
pub const GENESIS_DATA: &str = "Genesis Block";

/// A mined block.
///
/// Fields are fixed once mining completes; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Creation time (Unix epoch seconds)
    timestamp: i64,
    /// Caller-supplied payload
    data: Vec<u8>,
    /// Hash of the previous block, `None` for genesis
    prev_block_hash: Option<Hash256>,
    /// Hash found by proof-of-work
    hash: Hash256,
    /// Nonce that produced `hash`
    nonce: u64,
}

impl Block {
    /// Mine a new block on top of `prev_block_hash`, stamped with the current time
    pub fn new(
        data: impl Into<Vec<u8>>,
        prev_block_hash: Option<Hash256>,
        target: &Target,
    ) -> Result<Self, PowError> {
        let timestamp = chrono::Utc::now().timestamp();
        Self::mine_at(data, prev_block_hash, timestamp, target)
    }

    /// Mine a new block with an explicit timestamp
    pub fn mine_at(
        data: impl Into<Vec<u8>>,
        prev_block_hash: Option<Hash256>,
        timestamp: i64,
        target: &Target,
    ) -> Result<Self, PowError> {
        let mut block = Self::candidate(data.into(), prev_block_hash, timestamp);
        let result = ProofOfWork::new(&block, *target).run()?;

        block.hash = result.hash;
        block.nonce = result.nonce;
        Ok(block)
    }

    /// Mine the genesis block
    pub fn genesis(target: &Target) -> Result<Self, PowError> {
        Self::new(GENESIS_DATA, None, target)
    }

    /// Unmined block with an empty hash and zero nonce
    pub(crate) fn candidate(data: Vec<u8>, prev_block_hash: Option<Hash256>, timestamp: i64) -> Self {
        Self {
            timestamp,
            data,
            prev_block_hash,
            hash: Hash256::zero(),
            nonce: 0,
        }
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Payload as text, replacing invalid UTF-8
    pub fn data_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    pub fn prev_block_hash(&self) -> Option<&Hash256> {
        self.prev_block_hash.as_ref()
    }

    /// Predecessor hash as raw bytes (empty for genesis)
    pub fn prev_hash_bytes(&self) -> &[u8] {
        match &self.prev_block_hash {
            Some(hash) => hash.as_bytes(),
            None => &[],
        }
    }

    pub fn hash(&self) -> Hash256 {
        self.hash
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Check if this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.prev_block_hash.is_none()
    }
}
