// In-memory chain of mined blocks

mod blockchain;

pub use blockchain::Blockchain;
