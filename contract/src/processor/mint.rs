use super::*;

pub fn process_mint(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    auction_id: AuctionId,
    quantity: u64,
    payment: u64,
) -> ProgramResult {
    let account_info_iter = &mut accounts.iter();
    let buyer_account = next_account_info(account_info_iter)?; // 1
    let auction_bank_account = next_account_info(account_info_iter)?; // 2
    let auction_root_state_account = next_account_info(account_info_iter)?; // 3
    let settled_step_state_account = next_account_info(account_info_iter)?; // 4
    let observed_step_state_account = next_account_info(account_info_iter)?; // 5
    let collection_mint_account = next_account_info(account_info_iter)?; // 6
    let buyer_holding_account = next_account_info(account_info_iter)?; // 7
    let rent_program = next_account_info(account_info_iter)?; // 8
    let system_program = next_account_info(account_info_iter)?; // 9
    let token_program = next_account_info(account_info_iter)?; // 10

    if !buyer_account.is_signer {
        msg!("buyer signature is missing");
        return Err(ProgramError::MissingRequiredSignature);
    }

    // Check cross-program invocation addresses
    assert_rent_program(rent_program.key)?;
    assert_system_program(system_program.key)?;
    assert_token_program(token_program.key)?;

    // Check root state, the root state pda is the mint authority of the
    // collection so its signer seeds are needed later on
    let auction_root_state_seeds = auction_root_state_seeds(&auction_id);
    let auction_root_state_pda = SignerPda::new_checked(
        &auction_root_state_seeds,
        program_id,
        auction_root_state_account,
    )?;
    if auction_root_state_account.owner != program_id {
        return Err(AuctionContractError::InvalidAccountOwner.into());
    }
    let mut root_state = AuctionRootState::read(auction_root_state_account)?;

    let settled_step_bytes = root_state.current_step.to_le_bytes();
    SignerPda::check_owner(
        &auction_step_state_seeds(auction_root_state_account.key, &settled_step_bytes),
        program_id,
        program_id,
        settled_step_state_account,
    )?;
    let settled_record = StepRecord::read(settled_step_state_account)?;

    SignerPda::check_owner(
        &auction_bank_seeds(&auction_id),
        program_id,
        program_id,
        auction_bank_account,
    )?;

    SignerPda::check_owner(
        &collection_mint_seeds(&auction_id),
        program_id,
        &spl_token::ID,
        collection_mint_account,
    )?;

    // Price the purchase, nothing has been moved yet
    let mut auction = Auction::from_parts(
        root_state.config,
        MintLedger::from_settled(
            root_state.current_step,
            settled_record,
            root_state.total_minted,
        ),
    );
    let clock = Clock::get()?;
    let now = auction.now(&clock)?;
    let quote = auction.quote(quantity, payment, now)?;

    // The observed step's account is either the settled step's account or a
    // fresh one for the step that is about to be settled
    let observed_step_bytes = quote.step.to_le_bytes();
    let observed_step_state_seeds =
        auction_step_state_seeds(auction_root_state_account.key, &observed_step_bytes);
    let observed_step_state_pda = SignerPda::new_checked(
        &observed_step_state_seeds,
        program_id,
        observed_step_state_account,
    )
    .map_err(|_| AuctionContractError::StepStateMismatch)?;

    // Transfer payment to the auction bank
    let lamport_transfer_ix =
        system_instruction::transfer(buyer_account.key, auction_bank_account.key, payment);

    invoke(
        &lamport_transfer_ix,
        &[
            buyer_account.to_owned(),
            auction_bank_account.to_owned(),
            system_program.to_owned(),
        ],
    )?;

    // Commit the purchase
    auction.settle(&quote)?;

    if quote.step != root_state.current_step {
        if !observed_step_state_account.data_is_empty() {
            return Err(AuctionContractError::StepStateMismatch.into());
        }
        create_state_account(
            buyer_account,
            observed_step_state_account,
            observed_step_state_pda.signer_seeds(),
            program_id,
            system_program,
            StepRecord::MAX_SERIALIZED_LEN,
        )?;
    }
    auction
        .ledger()
        .current_record()
        .write(observed_step_state_account)?;

    root_state.current_step = auction.current_step();
    root_state.total_minted = auction.total_minted();
    root_state.all_time_treasury = root_state
        .all_time_treasury
        .checked_add(quote.cost)
        .ok_or(AuctionContractError::ArithmeticError)?;
    root_state.write(auction_root_state_account)?;

    // Issue the items
    let token_holding_seeds = token_holding_seeds(collection_mint_account.key, buyer_account.key);
    let token_holding_pda =
        SignerPda::new_checked(&token_holding_seeds, program_id, buyer_holding_account)?;

    if buyer_holding_account.data_is_empty() {
        create_token_holding_account(
            buyer_account,
            buyer_account,
            buyer_holding_account,
            collection_mint_account,
            token_holding_pda.signer_seeds(),
            system_program,
            token_program,
            rent_program,
        )?;
    } else {
        assert_token_account_owner(buyer_holding_account, buyer_account.key)?;
    }

    let root_state_signer_seeds = auction_root_state_pda.signer_seeds();
    let mut collection = SplCollection {
        mint: collection_mint_account,
        mint_authority: auction_root_state_account,
        token_program,
        authority_seeds: &root_state_signer_seeds,
    };
    let token_ids = collection.mint_to(buyer_holding_account, quantity)?;

    msg!(
        "step {}: minted {} items ({}..{}) at {} lamports each",
        quote.step,
        quantity,
        token_ids.start,
        token_ids.end,
        quote.price
    );

    // Refund the overpayment last
    if quote.refund > 0 {
        checked_debit_account(auction_bank_account, quote.refund)?;
        checked_credit_account(buyer_account, quote.refund)?;
    }

    Ok(())
}
