// Block and chain validation

use crate::consensus::pow::{ProofOfWork, Target};
use crate::core::Block;
use thiserror::Error;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Hash recomputed from the stored nonce doesn't meet the target
    #[error("invalid proof of work")]
    InvalidProofOfWork,
    /// Stored hash differs from the recomputed one
    #[error("stored hash does not match block contents")]
    HashMismatch,
    #[error("chain has no blocks")]
    EmptyChain,
    #[error("genesis block has a predecessor")]
    GenesisHasPredecessor,
    /// Block doesn't point at the hash of the block before it
    #[error("block {height} does not link to its predecessor")]
    BrokenLink { height: usize },
    #[error("block {height}: {source}")]
    InvalidBlock {
        height: usize,
        #[source]
        source: Box<ValidationError>,
    },
}

/// Chain validator
pub struct ChainValidator {
    target: Target,
}

impl ChainValidator {
    pub fn new(target: Target) -> Self {
        Self { target }
    }

    /// Validate a single block against the target
    pub fn validate_block(&self, block: &Block) -> Result<(), ValidationError> {
        let pow = ProofOfWork::new(block, self.target);
        if !pow.validate() {
            return Err(ValidationError::InvalidProofOfWork);
        }

        if pow.hash_with_nonce(block.nonce()) != block.hash() {
            return Err(ValidationError::HashMismatch);
        }

        Ok(())
    }

    /// Validate every block and the links between them
    pub fn validate_chain(&self, blocks: &[Block]) -> Result<(), ValidationError> {
        let genesis = blocks.first().ok_or(ValidationError::EmptyChain)?;
        if !genesis.is_genesis() {
            return Err(ValidationError::GenesisHasPredecessor);
        }

        for (height, block) in blocks.iter().enumerate() {
            if height > 0 && block.prev_block_hash() != Some(&blocks[height - 1].hash()) {
                return Err(ValidationError::BrokenLink { height });
            }

            self.validate_block(block)
                .map_err(|e| ValidationError::InvalidBlock { height, source: Box::new(e) })?;
        }

        log::debug!("Validated chain of {} blocks", blocks.len());
        Ok(())
    }
}
