use crate::engine::OwnershipRegistry;
use crate::AuctionContractError;

use solana_program::account_info::AccountInfo;
use solana_program::entrypoint::ProgramResult;
use solana_program::program::invoke_signed;
use solana_program::program_pack::Pack;
use solana_program::pubkey::Pubkey;
use solana_program::rent::Rent;
use solana_program::system_instruction;
use solana_program::sysvar::Sysvar;

use spl_token::instruction as token_instruction;
use spl_token::state::{Account, Mint};
use spl_token::ID as TOKEN_ID;

use std::ops::Range;

pub fn create_state_account<'a>(
    payer_account: &AccountInfo<'a>,
    new_account: &AccountInfo<'a>,
    signer_seeds: Vec<&[u8]>,
    program_id: &Pubkey,
    system_program: &AccountInfo<'a>,
    state_size: usize,
) -> ProgramResult {
    let rent = Rent::get()?;
    let lamports = rent.minimum_balance(state_size);

    let create_account_ix = system_instruction::create_account(
        payer_account.key,
        new_account.key,
        lamports,
        state_size as u64,
        program_id,
    );

    invoke_signed(
        &create_account_ix,
        &[
            payer_account.clone(),
            new_account.clone(),
            system_program.clone(),
        ],
        &[&signer_seeds],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn create_mint_account<'a>(
    payer_account: &AccountInfo<'a>,
    mint_account: &AccountInfo<'a>,
    mint_authority: &AccountInfo<'a>,
    signer_seeds: Vec<&[u8]>,
    rent_program: &AccountInfo<'a>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    decimals: u8,
) -> ProgramResult {
    create_state_account(
        payer_account,
        mint_account,
        signer_seeds,
        &TOKEN_ID,
        system_program,
        Mint::LEN,
    )?;

    let init_mint_ix = token_instruction::initialize_mint(
        &TOKEN_ID,
        mint_account.key,
        mint_authority.key,
        None,
        decimals,
    )?;

    invoke_signed(
        &init_mint_ix,
        &[
            mint_account.clone(),
            rent_program.clone(),
            token_program.clone(),
        ],
        &[],
    )
}

#[allow(clippy::too_many_arguments)]
pub fn create_token_holding_account<'a>(
    payer_account: &AccountInfo<'a>,
    owner_account: &AccountInfo<'a>,
    holding_account: &AccountInfo<'a>,
    mint_account: &AccountInfo<'a>,
    signer_seeds: Vec<&[u8]>,
    system_program: &AccountInfo<'a>,
    token_program: &AccountInfo<'a>,
    rent_program: &AccountInfo<'a>,
) -> ProgramResult {
    create_state_account(
        payer_account,
        holding_account,
        signer_seeds,
        &TOKEN_ID,
        system_program,
        Account::LEN,
    )?;

    let init_account_ix = token_instruction::initialize_account(
        &TOKEN_ID,
        holding_account.key,
        mint_account.key,
        owner_account.key,
    )?;

    invoke_signed(
        &init_account_ix,
        &[
            holding_account.clone(),
            mint_account.clone(),
            owner_account.clone(),
            rent_program.clone(),
            token_program.clone(),
        ],
        &[],
    )
}

/// Collection backed by an SPL mint whose mint authority is a program
/// derived address of this contract.
///
/// Items are issued as base units of a mint with zero decimals, so the
/// mint's supply doubles as the next token id.
pub struct SplCollection<'a, 'b> {
    pub mint: &'b AccountInfo<'a>,
    pub mint_authority: &'b AccountInfo<'a>,
    pub token_program: &'b AccountInfo<'a>,
    pub authority_seeds: &'b [&'b [u8]],
}

impl<'a, 'b> OwnershipRegistry for SplCollection<'a, 'b> {
    type Recipient = AccountInfo<'a>;

    fn mint_to(
        &mut self,
        holding_account: &AccountInfo<'a>,
        quantity: u64,
    ) -> Result<Range<u64>, AuctionContractError> {
        let first = self.total_supply()?;
        let end = first
            .checked_add(quantity)
            .ok_or(AuctionContractError::ArithmeticError)?;

        let mint_ix = token_instruction::mint_to(
            self.token_program.key,
            self.mint.key,
            holding_account.key,
            self.mint_authority.key,
            &[self.mint_authority.key],
            quantity,
        )
        .map_err(|_| AuctionContractError::MintFailed)?;

        invoke_signed(
            &mint_ix,
            &[
                self.mint_authority.clone(),
                self.token_program.clone(),
                holding_account.clone(),
                self.mint.clone(),
            ],
            &[self.authority_seeds],
        )
        .map_err(|_| AuctionContractError::MintFailed)?;

        Ok(first..end)
    }

    fn total_supply(&self) -> Result<u64, AuctionContractError> {
        let mint = Mint::unpack_from_slice(&self.mint.data.borrow())
            .map_err(|_| AuctionContractError::InvalidAccountOwner)?;
        Ok(mint.supply)
    }
}
