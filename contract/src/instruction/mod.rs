#[cfg(feature = "client")]
pub mod factory;

use crate::state::{AuctionId, AuctionParams, CollectionName, CollectionSymbol};
use borsh::{BorshDeserialize, BorshSerialize};

#[repr(C)]
#[derive(BorshDeserialize, BorshSerialize, Debug)]
pub enum AuctionInstruction {
    InitializeAuction {
        id: AuctionId,
        name: CollectionName,
        symbol: CollectionSymbol,
        params: AuctionParams,
    },
    Mint {
        id: AuctionId,
        quantity: u64,
        payment: u64,
    },
}
