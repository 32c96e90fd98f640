// Hash-linked block chain secured by proof-of-work

pub mod core;
pub mod consensus;
pub mod chain;
pub mod cli;

// Re-exports for convenience
pub use core::{Block, Hash256};
pub use consensus::{ChainValidator, MiningResult, PowError, ProofOfWork, Target, ValidationError};
pub use chain::Blockchain;
pub use cli::{Cli, CliHandler};
