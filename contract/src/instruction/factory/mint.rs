use super::*;

#[derive(BorshSchema, BorshSerialize, BorshDeserialize, Debug, Clone)]
pub struct MintArgs {
    pub buyer_pubkey: Pubkey,
    #[alias([u8; 32])]
    pub auction_id: AuctionId,
    /// Step recorded in the root state when the transaction is built.
    pub settled_step: u64,
    /// Step the buyer expects to settle, usually the step of the current
    /// clock reading.
    pub observed_step: u64,
    pub quantity: u64,
    pub payment: u64,
}

pub fn mint(args: &MintArgs) -> Instruction {
    let pdas = AuctionPdas::new(&args.auction_id, &crate::ID);
    let settled_step_state_pubkey = pdas.step_state(args.settled_step, &crate::ID);
    let observed_step_state_pubkey = pdas.step_state(args.observed_step, &crate::ID);
    let buyer_holding_pubkey = pdas.token_holding(&args.buyer_pubkey, &crate::ID);

    let accounts = vec![
        AccountMeta::new(args.buyer_pubkey, true),
        AccountMeta::new(pdas.bank, false),
        AccountMeta::new(pdas.root_state, false),
        AccountMeta::new(settled_step_state_pubkey, false),
        AccountMeta::new(observed_step_state_pubkey, false),
        AccountMeta::new(pdas.collection_mint, false),
        AccountMeta::new(buyer_holding_pubkey, false),
        AccountMeta::new_readonly(RENT_ID, false),
        AccountMeta::new_readonly(SYS_ID, false),
        AccountMeta::new_readonly(TOKEN_ID, false),
    ];

    let instruction = AuctionInstruction::Mint {
        id: args.auction_id,
        quantity: args.quantity,
        payment: args.payment,
    };

    Instruction {
        program_id: crate::ID,
        accounts,
        data: instruction.try_to_vec().unwrap(),
    }
}
