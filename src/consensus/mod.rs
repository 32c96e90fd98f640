// Consensus and validation logic

pub mod pow;
pub mod validation;

pub use pow::{
    MiningResult, PowError, ProofOfWork, Target, DEFAULT_TARGET_BITS, MAX_NONCE, MAX_TARGET_BITS,
};
pub use validation::{ChainValidator, ValidationError};
