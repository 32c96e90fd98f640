// CLI commands and the demo driver

use clap::{Parser, Subcommand};
use serde::Serialize;
use crate::{Blockchain, Block, Hash256, ProofOfWork, Target};
use crate::consensus::DEFAULT_TARGET_BITS;

/// Payloads appended after genesis by the demo
pub const DEMO_ENTRIES: [&str; 2] = ["Send 1 BTC to Ivan", "Send 2 more BTC to Ivan"];

#[derive(Parser)]
#[command(name = "pow-chain")]
#[command(about = "Minimal proof-of-work blockchain", long_about = None)]
pub struct Cli {
    /// Difficulty: number of leading zero bits required in a block hash
    #[arg(short, long, default_value_t = DEFAULT_TARGET_BITS, global = true)]
    pub bits: u32,

    /// Print the chain as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the demo chain and print it (default)
    Demo,

    /// Mine one block per argument on top of genesis and print the chain
    Mine {
        /// Block payloads, in order
        #[arg(required = true)]
        data: Vec<String>,
    },
}

/// JSON view of one block
#[derive(Debug, Serialize)]
pub struct BlockView {
    pub height: usize,
    pub timestamp: i64,
    pub prev_hash: String,
    pub data: String,
    pub hash: Hash256,
    pub nonce: u64,
    pub pow: bool,
}

impl BlockView {
    fn new(height: usize, block: &Block, target: Target) -> Self {
        Self {
            height,
            timestamp: block.timestamp(),
            prev_hash: hex::encode(block.prev_hash_bytes()),
            data: block.data_lossy().into_owned(),
            hash: block.hash(),
            nonce: block.nonce(),
            pow: ProofOfWork::new(block, target).validate(),
        }
    }
}

/// CLI handler
pub struct CliHandler {
    target: Target,
    json: bool,
}

impl CliHandler {
    /// Create a new CLI handler
    pub fn new(bits: u32, json: bool) -> Result<Self, String> {
        let target = Target::new(bits).map_err(|e| e.to_string())?;
        log::info!("Using difficulty of {} bits", target.bits());
        Ok(Self { target, json })
    }

    /// Handle CLI command
    pub fn handle(&self, command: Option<Commands>) -> Result<(), String> {
        let entries: Vec<String> = match command {
            None | Some(Commands::Demo) => DEMO_ENTRIES.iter().map(|s| s.to_string()).collect(),
            Some(Commands::Mine { data }) => data,
        };

        let chain = self.build_chain(&entries)?;
        if self.json {
            println!("{}", render_json(&chain)?);
        } else {
            print!("{}", render_text(&chain));
        }

        chain.validate().map_err(|e| format!("Chain validation failed: {}", e))
    }

    /// Mine genesis and then one block per entry
    pub fn build_chain(&self, entries: &[String]) -> Result<Blockchain, String> {
        let mut chain = Blockchain::with_target(self.target).map_err(|e| e.to_string())?;
        for entry in entries {
            chain.add_block(entry.as_bytes()).map_err(|e| e.to_string())?;
        }
        Ok(chain)
    }
}

/// Render every block in the console format
pub fn render_text(chain: &Blockchain) -> String {
    let mut out = String::new();
    for block in chain {
        let valid = ProofOfWork::new(block, chain.target()).validate();
        out.push_str(&format!("Prev. hash: {}\n", hex::encode(block.prev_hash_bytes())));
        out.push_str(&format!("Data: {}\n", block.data_lossy()));
        out.push_str(&format!("Hash: {}\n\n", block.hash()));
        out.push_str(&format!("PoW: {}\n\n", valid));
    }
    out
}

/// Render the chain as a pretty-printed JSON array
pub fn render_json(chain: &Blockchain) -> Result<String, String> {
    let views: Vec<BlockView> = chain
        .iter()
        .enumerate()
        .map(|(height, block)| BlockView::new(height, block, chain.target()))
        .collect();
    serde_json::to_string_pretty(&views).map_err(|e| format!("Failed to encode chain: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_chain() -> Blockchain {
        let handler = CliHandler::new(8, false).unwrap();
        let entries: Vec<String> = DEMO_ENTRIES.iter().map(|s| s.to_string()).collect();
        handler.build_chain(&entries).unwrap()
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["pow-chain"]).unwrap();
        assert_eq!(cli.bits, DEFAULT_TARGET_BITS);
        assert!(!cli.json);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_mine() {
        let cli = Cli::try_parse_from(["pow-chain", "mine", "a", "b", "--bits", "4"]).unwrap();
        assert_eq!(cli.bits, 4);
        match cli.command {
            Some(Commands::Mine { data }) => assert_eq!(data, vec!["a", "b"]),
            _ => panic!("expected mine command"),
        }
        assert!(Cli::try_parse_from(["pow-chain", "mine"]).is_err());
    }

    #[test]
    fn test_handler_rejects_bad_bits() {
        assert!(CliHandler::new(257, false).is_err());
    }

    #[test]
    fn test_render_text_format() {
        let chain = demo_chain();
        let text = render_text(&chain);
        let genesis = chain.get(0).unwrap();

        let expected_head = format!(
            "Prev. hash: \nData: Genesis Block\nHash: {}\n\nPoW: true\n\nPrev. hash: {}\n",
            genesis.hash(),
            genesis.hash()
        );
        assert!(text.starts_with(&expected_head));
        assert!(text.contains("Data: Send 2 more BTC to Ivan\n"));
        assert_eq!(text.matches("PoW: true").count(), 3);
    }

    #[test]
    fn test_render_json() {
        let chain = demo_chain();
        let json: serde_json::Value = serde_json::from_str(&render_json(&chain).unwrap()).unwrap();
        let blocks = json.as_array().unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0]["prev_hash"], "");
        assert_eq!(blocks[1]["data"], "Send 1 BTC to Ivan");
        assert_eq!(blocks[2]["prev_hash"], blocks[1]["hash"]);
        assert!(blocks.iter().all(|b| b["pow"] == true));
    }
}
