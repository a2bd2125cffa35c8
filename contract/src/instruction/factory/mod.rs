mod initialize_auction;
mod mint;

pub use initialize_auction::*;
pub use mint::*;

use super::AuctionInstruction;
use crate::pda::*;
use crate::state::{AuctionId, AuctionParams, CollectionName, CollectionSymbol};
use borsh::{BorshDeserialize, BorshSerialize};

use agsol_borsh_schema::BorshSchema;
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program::ID as SYS_ID;
use solana_program::sysvar::rent::ID as RENT_ID;
use spl_token::ID as TOKEN_ID;
