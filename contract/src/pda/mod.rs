use solana_program::pubkey::Pubkey;

pub fn auction_root_state_seeds(auction_id: &[u8]) -> [&[u8]; 2] {
    [b"reactive_auction_root_state", auction_id]
}

pub fn auction_step_state_seeds<'a>(
    auction_root_state_pubkey: &'a Pubkey,
    step_bytes: &'a [u8],
) -> [&'a [u8]; 3] {
    [
        b"reactive_auction_step_state",
        auction_root_state_pubkey.as_ref(),
        step_bytes,
    ]
}

pub fn auction_bank_seeds(auction_id: &[u8]) -> [&[u8]; 2] {
    [b"reactive_auction_bank", auction_id]
}

pub fn collection_mint_seeds(auction_id: &[u8]) -> [&[u8]; 2] {
    [b"reactive_collection_mint", auction_id]
}

pub fn token_holding_seeds<'a>(mint: &'a Pubkey, user: &'a Pubkey) -> [&'a [u8]; 3] {
    [b"reactive_token_holding", mint.as_ref(), user.as_ref()]
}

/// Every address an auction owns, derived from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionPdas {
    pub root_state: Pubkey,
    pub bank: Pubkey,
    pub collection_mint: Pubkey,
}

impl AuctionPdas {
    pub fn new(auction_id: &[u8], program_id: &Pubkey) -> Self {
        let (root_state, _) =
            Pubkey::find_program_address(&auction_root_state_seeds(auction_id), program_id);
        let (bank, _) = Pubkey::find_program_address(&auction_bank_seeds(auction_id), program_id);
        let (collection_mint, _) =
            Pubkey::find_program_address(&collection_mint_seeds(auction_id), program_id);
        Self {
            root_state,
            bank,
            collection_mint,
        }
    }

    pub fn step_state(&self, step: u64, program_id: &Pubkey) -> Pubkey {
        let (step_state, _) = Pubkey::find_program_address(
            &auction_step_state_seeds(&self.root_state, &step.to_le_bytes()),
            program_id,
        );
        step_state
    }

    pub fn token_holding(&self, user: &Pubkey, program_id: &Pubkey) -> Pubkey {
        let (holding, _) = Pubkey::find_program_address(
            &token_holding_seeds(&self.collection_mint, user),
            program_id,
        );
        holding
    }
}
