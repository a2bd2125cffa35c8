//! Smart contract built for the [Solana](https://solana.com/) blockchain that
//! sells a fixed-size collection through a supply-reactive, stepped Dutch
//! auction.
//!
//! The pricing and accounting logic lives in [`engine`] and is free of any
//! runtime dependency, so the same code prices purchases on-chain, in the
//! client and in the replay simulator.
#[cfg(not(feature = "no-entrypoint"))]
mod entrypoint;
mod error;

/// Checks and assertions for validating inputs to the smart contract.
pub mod assertions;
/// Step clock, price recurrence, mint ledger and the purchase controller.
pub mod engine;
/// Smart contract instructions that can be called externally.
pub mod instruction;
/// Program Derived Addresses that can be modified only by this contract.
pub mod pda;
/// Processor that processes the incoming instructions, thus modifying data on
/// the blockchain.
pub mod processor;
/// Data structures that describe the application's current state.
pub mod state;
/// Utilities for the instruction processing
pub mod utils;

pub use error::{AuctionContractError, ErrorKind};
pub use solana_program;

solana_program::declare_id!("FCvVQ24qBAKe26MChAA9ThAVDZvG6BChM1KPsLfCNC7x");

/// Maximum number of characters in the collection name.
pub const MAX_NAME_LEN: usize = 32;
/// Maximum number of characters in the collection symbol.
pub const MAX_SYMBOL_LEN: usize = 10;
/// Token decimals of the collection mint. Each base unit is one item.
pub const COLLECTION_DECIMALS: u8 = 0;
