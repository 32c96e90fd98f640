// Append-only blockchain held in memory

use crate::consensus::{ChainValidator, PowError, Target, ValidationError};
use crate::core::{Block, Hash256};

/// Ordered sequence of blocks starting at genesis
pub struct Blockchain {
    blocks: Vec<Block>,
    target: Target,
}

impl Blockchain {
    /// Create a chain holding only a freshly mined genesis block
    pub fn new(target_bits: u32) -> Result<Self, PowError> {
        let target = Target::new(target_bits)?;
        Self::with_target(target)
    }

    pub fn with_target(target: Target) -> Result<Self, PowError> {
        let genesis = Block::genesis(&target)?;
        log::info!("Created chain with genesis {}", genesis.hash());

        Ok(Self {
            blocks: vec![genesis],
            target,
        })
    }

    /// Mine `data` on top of the current tip and append it
    pub fn add_block(&mut self, data: impl Into<Vec<u8>>) -> Result<&Block, PowError> {
        let prev_hash = self.tip().hash();
        let block = Block::new(data, Some(prev_hash), &self.target)?;

        self.blocks.push(block);
        log::debug!("Chain height is now {}", self.height());
        Ok(self.tip())
    }

    /// Latest block
    ///
    /// # Panics
    /// If the chain is empty, which construction rules out.
    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("chain always contains the genesis block")
    }

    pub fn tip_hash(&self) -> Hash256 {
        self.tip().hash()
    }

    /// Height of the tip (genesis is height 0)
    pub fn height(&self) -> usize {
        self.blocks.len() - 1
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, height: usize) -> Option<&Block> {
        self.blocks.get(height)
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn target(&self) -> Target {
        self.target
    }

    /// Check proof-of-work and linkage of every block
    pub fn validate(&self) -> Result<(), ValidationError> {
        ChainValidator::new(self.target).validate_chain(&self.blocks)
    }
}

impl<'a> IntoIterator for &'a Blockchain {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::ProofOfWork;
    use crate::core::GENESIS_DATA;

    #[test]
    fn test_new_chain_has_only_genesis() {
        let chain = Blockchain::new(8).unwrap();

        assert_eq!(chain.len(), 1);
        assert_eq!(chain.height(), 0);
        assert!(chain.tip().is_genesis());
        assert_eq!(chain.tip().data(), GENESIS_DATA.as_bytes());
    }

    #[test]
    fn test_rejects_invalid_target_bits() {
        assert_eq!(Blockchain::new(300).err(), Some(PowError::InvalidTargetBits(300)));
    }

    #[test]
    fn test_blocks_link_to_predecessor() {
        let mut chain = Blockchain::new(8).unwrap();
        chain.add_block("A").unwrap();
        chain.add_block("B").unwrap();

        let blocks = chain.blocks();
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].prev_block_hash(), Some(&blocks[0].hash()));
        assert_eq!(blocks[2].prev_block_hash(), Some(&blocks[1].hash()));
        assert_eq!(chain.tip_hash(), blocks[2].hash());
    }

    #[test]
    fn test_add_block_returns_new_tip() {
        let mut chain = Blockchain::new(8).unwrap();
        let genesis_hash = chain.tip_hash();

        let block = chain.add_block("A").unwrap();
        assert_eq!(block.data(), b"A");
        assert_eq!(block.prev_block_hash(), Some(&genesis_hash));
    }

    #[test]
    fn test_demo_chain_end_to_end() {
        let mut chain = Blockchain::new(8).unwrap();
        chain.add_block("Send 1 BTC to Ivan").unwrap();
        chain.add_block("Send 2 more BTC to Ivan").unwrap();

        assert!(chain.get(0).unwrap().prev_hash_bytes().is_empty());
        for block in &chain {
            assert!(ProofOfWork::new(block, chain.target()).validate());
        }
        assert_eq!(chain.validate(), Ok(()));
        assert_eq!(chain.get(2).unwrap().data_lossy(), "Send 2 more BTC to Ivan");
        assert!(chain.get(3).is_none());
    }
}
