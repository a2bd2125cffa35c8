mod initialize_auction;
mod mint;

use crate::assertions::*;
use crate::engine::{Auction, ClockSource, MintLedger, OwnershipRegistry};
use crate::error::AuctionContractError;
use crate::instruction::AuctionInstruction;
use crate::pda::*;
use crate::state::*;
use crate::utils::*;

use solana_program::account_info::{next_account_info, AccountInfo};
use solana_program::borsh::try_from_slice_unchecked;
use solana_program::clock::Clock;
use solana_program::entrypoint::ProgramResult;
use solana_program::msg;
use solana_program::program::invoke;
use solana_program::program_error::ProgramError;
use solana_program::pubkey::Pubkey;
use solana_program::system_instruction;
use solana_program::sysvar::Sysvar;

use agsol_common::{AccountState, MaxSerializedLen, SignerPda};

pub fn process(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let instruction: AuctionInstruction = try_from_slice_unchecked(instruction_data)
        .map_err(|_| AuctionContractError::InvalidInstruction)?;
    match instruction {
        AuctionInstruction::InitializeAuction {
            id,
            name,
            symbol,
            params,
        } => initialize_auction::initialize_auction(program_id, accounts, id, name, symbol, params),
        AuctionInstruction::Mint {
            id,
            quantity,
            payment,
        } => mint::process_mint(program_id, accounts, id, quantity, payment),
    }
}
