use super::*;

#[derive(BorshSchema, BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct InitializeAuctionArgs {
    pub auction_owner_pubkey: Pubkey,
    #[alias([u8; 32])]
    pub auction_id: AuctionId,
    #[alias(String)]
    pub name: CollectionName,
    #[alias(String)]
    pub symbol: CollectionSymbol,
    pub params: AuctionParams,
}

pub fn initialize_auction(args: &InitializeAuctionArgs) -> Instruction {
    let pdas = AuctionPdas::new(&args.auction_id, &crate::ID);
    let first_step_state_pubkey = pdas.step_state(1, &crate::ID);

    let accounts = vec![
        AccountMeta::new(args.auction_owner_pubkey, true),
        AccountMeta::new(pdas.root_state, false),
        AccountMeta::new(first_step_state_pubkey, false),
        AccountMeta::new(pdas.bank, false),
        AccountMeta::new(pdas.collection_mint, false),
        AccountMeta::new_readonly(RENT_ID, false),
        AccountMeta::new_readonly(SYS_ID, false),
        AccountMeta::new_readonly(TOKEN_ID, false),
    ];

    let instruction = AuctionInstruction::InitializeAuction {
        id: args.auction_id,
        name: args.name.clone(),
        symbol: args.symbol.clone(),
        params: args.params,
    };

    Instruction {
        program_id: crate::ID,
        accounts,
        data: instruction.try_to_vec().unwrap(),
    }
}
