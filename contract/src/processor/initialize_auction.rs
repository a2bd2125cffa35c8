use super::*;

use crate::COLLECTION_DECIMALS;

pub fn initialize_auction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    auction_id: AuctionId,
    name: CollectionName,
    symbol: CollectionSymbol,
    params: AuctionParams,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    // User accounts
    let auction_owner_account = next_account_info(account_info_iter)?;
    // Contract state accounts
    let auction_root_state_account = next_account_info(account_info_iter)?;
    let first_step_state_account = next_account_info(account_info_iter)?;
    let auction_bank_account = next_account_info(account_info_iter)?;
    let collection_mint_account = next_account_info(account_info_iter)?;
    // Solana accounts
    let rent_program = next_account_info(account_info_iter)?;
    let system_program = next_account_info(account_info_iter)?;
    let token_program = next_account_info(account_info_iter)?;

    if !auction_owner_account.is_signer {
        msg!("auction owner signature is missing");
        return Err(ProgramError::MissingRequiredSignature);
    }

    // Check cross-program invocation addresses
    assert_rent_program(rent_program.key)?;
    assert_system_program(system_program.key)?;
    assert_token_program(token_program.key)?;

    // Check pda addresses
    let auction_root_state_seeds = auction_root_state_seeds(&auction_id);
    let auction_root_state_pda = SignerPda::new_checked(
        &auction_root_state_seeds,
        program_id,
        auction_root_state_account,
    )?;

    let first_step_bytes = 1_u64.to_le_bytes();
    let first_step_state_seeds =
        auction_step_state_seeds(auction_root_state_account.key, &first_step_bytes);
    let first_step_state_pda = SignerPda::new_checked(
        &first_step_state_seeds,
        program_id,
        first_step_state_account,
    )?;

    let auction_bank_seeds = auction_bank_seeds(&auction_id);
    let auction_bank_pda =
        SignerPda::new_checked(&auction_bank_seeds, program_id, auction_bank_account)?;

    let collection_mint_seeds = collection_mint_seeds(&auction_id);
    let collection_mint_pda =
        SignerPda::new_checked(&collection_mint_seeds, program_id, collection_mint_account)?;

    if !auction_root_state_account.data_is_empty() {
        return Err(AuctionContractError::AuctionAlreadyInitialized.into());
    }

    // Validate parameters before allocating anything
    let clock = Clock::get()?;
    let start_reference = clock.read(params.clock)?;
    let config = AuctionConfig::new(params, start_reference)?;

    // Create auction root and first step state accounts
    create_state_account(
        auction_owner_account,
        auction_root_state_account,
        auction_root_state_pda.signer_seeds(),
        program_id,
        system_program,
        AuctionRootState::MAX_SERIALIZED_LEN,
    )?;
    create_state_account(
        auction_owner_account,
        first_step_state_account,
        first_step_state_pda.signer_seeds(),
        program_id,
        system_program,
        StepRecord::MAX_SERIALIZED_LEN,
    )?;

    // Create auction bank account
    create_state_account(
        auction_owner_account,
        auction_bank_account,
        auction_bank_pda.signer_seeds(),
        program_id,
        system_program,
        0,
    )?;

    // Create the collection mint, only the root state pda may mint items
    create_mint_account(
        auction_owner_account,
        collection_mint_account,
        auction_root_state_account,
        collection_mint_pda.signer_seeds(),
        rent_program,
        system_program,
        token_program,
        COLLECTION_DECIMALS,
    )?;

    let first_step = StepRecord {
        price: config.start_price,
        minted: 0,
    };
    first_step.write(first_step_state_account)?;

    let root_state = AuctionRootState {
        auction_owner: *auction_owner_account.key,
        name,
        symbol,
        config,
        collection_mint: *collection_mint_account.key,
        current_step: 1,
        total_minted: 0,
        all_time_treasury: 0,
    };
    root_state.write(auction_root_state_account)?;

    msg!(
        "auction started at {}, {} steps, {} items expected per step",
        start_reference,
        config.total_steps(),
        config.expected_step_mint_rate
    );

    Ok(())
}
