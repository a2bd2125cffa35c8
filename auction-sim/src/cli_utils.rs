use reactive_auction_contract::engine::ManualClock;
use reactive_auction_contract::solana_program::clock::UnixTimestamp;
use reactive_auction_contract::solana_program::pubkey::Pubkey;
use reactive_auction_contract::state::{AuctionParams, ClockKind};

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};

use std::path::Path;
use std::str::FromStr;

/// Auction parameters together with the clock readings the auction starts
/// at.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SimConfig {
    pub name: String,
    pub symbol: String,
    #[serde(flatten)]
    pub params: AuctionParams,
    pub start_block: u64,
    pub start_time: UnixTimestamp,
}

impl SimConfig {
    pub fn start_clock(&self) -> ManualClock {
        ManualClock::new(self.start_block, self.start_time)
    }
}

/// A batch of items minted at a given block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TapeEntry {
    #[serde(default)]
    pub block: u64,
    #[serde(default)]
    pub timestamp: UnixTimestamp,
    pub quantity: u64,
    #[serde(default)]
    pub minter: Option<String>,
}

impl TapeEntry {
    pub fn clock(&self) -> ManualClock {
        ManualClock::new(self.block, self.timestamp)
    }

    pub fn minter(&self) -> Result<Pubkey, anyhow::Error> {
        match &self.minter {
            Some(minter) => {
                Pubkey::from_str(minter).map_err(|e| anyhow!("invalid minter {}: {}", minter, e))
            }
            None => Ok(Pubkey::default()),
        }
    }
}

// Prices are in gwei, 1 ETH is 10^9 base units of the price
const GWEI_PER_ETH: u64 = 1_000_000_000;

pub fn preset(name: &str) -> Result<SimConfig, anyhow::Error> {
    let config = match name {
        "azuki" => SimConfig {
            name: "Azuki".to_owned(),
            symbol: "AZUKI".to_owned(),
            params: AuctionParams {
                collection_size: 9800,
                duration: 600,
                step_duration: 1,
                start_price: GWEI_PER_ETH,
                floor_price: 15 * GWEI_PER_ETH / 100,
                price_delta: 5 * GWEI_PER_ETH / 100,
                clock: ClockKind::Block,
            },
            start_block: 13_992_202,
            start_time: 1_642_010_410,
        },
        "moonbirds" => SimConfig {
            name: "Moonbirds".to_owned(),
            symbol: "MOONBIRD".to_owned(),
            params: AuctionParams {
                collection_size: 7875,
                duration: 200,
                step_duration: 3,
                start_price: 5 * GWEI_PER_ETH / 2,
                floor_price: GWEI_PER_ETH / 10,
                price_delta: GWEI_PER_ETH / 10,
                clock: ClockKind::Block,
            },
            start_block: 14_597_286,
            start_time: 1_650_121_200,
        },
        other => bail!("unknown preset \"{}\"", other),
    };
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<SimConfig, anyhow::Error> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open config {}", path.display()))?;
    let config = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

pub fn load_tape(path: &Path) -> Result<Vec<TapeEntry>, anyhow::Error> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open tape {}", path.display()))?;
    let tape = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("failed to parse tape {}", path.display()))?;
    Ok(tape)
}
