use crate::error::AuctionContractError;
use crate::{MAX_NAME_LEN, MAX_SYMBOL_LEN};

use agsol_borsh_schema::BorshSchema;
use agsol_common::{AccountState, MaxLenString, MaxSerializedLen};
use borsh::{BorshDeserialize, BorshSerialize};
use solana_program::pubkey::Pubkey;

#[cfg(feature = "client")]
use serde::{Deserialize, Serialize};

/// A unique identifier of an auction.
pub type AuctionId = [u8; 32];
/// Name of the auctioned collection, passed through to the collection mint.
pub type CollectionName = MaxLenString<MAX_NAME_LEN>;
/// Symbol of the auctioned collection.
pub type CollectionSymbol = MaxLenString<MAX_SYMBOL_LEN>;

/// The clock an auction measures its steps in.
#[repr(C)]
#[derive(
    BorshSchema, BorshDeserialize, BorshSerialize, MaxSerializedLen, Debug, Clone, Copy, PartialEq, Eq,
)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "client", serde(rename_all = "lowercase"))]
pub enum ClockKind {
    /// Steps are counted in slots.
    Block,
    /// Steps are counted in seconds of cluster time.
    Timestamp,
}

/// Parameters provided by the auction creator.
#[repr(C)]
#[derive(
    BorshSchema, BorshDeserialize, BorshSerialize, MaxSerializedLen, Debug, Clone, Copy, PartialEq, Eq,
)]
#[cfg_attr(feature = "client", derive(Serialize, Deserialize))]
pub struct AuctionParams {
    /// Total number of items for sale.
    pub collection_size: u64,
    /// Length of the auction in clock units.
    pub duration: u64,
    /// Length of a single step in clock units.
    pub step_duration: u64,
    /// Price of a single item in the first step (in lamports).
    pub start_price: u64,
    /// Minimum price of a single item (in lamports).
    pub floor_price: u64,
    /// Amount the price moves by between two steps (in lamports).
    pub price_delta: u64,
    /// Whether steps are measured in slots or in seconds.
    pub clock: ClockKind,
}

/// Immutable configuration of a running auction.
#[repr(C)]
#[derive(
    BorshSchema, BorshDeserialize, BorshSerialize, MaxSerializedLen, Debug, Clone, Copy, PartialEq, Eq,
)]
pub struct AuctionConfig {
    pub collection_size: u64,
    pub duration: u64,
    pub step_duration: u64,
    pub start_price: u64,
    pub floor_price: u64,
    pub price_delta: u64,
    /// Number of items expected to be sold per step to keep the price
    /// unchanged.
    pub expected_step_mint_rate: u64,
    /// Clock reading (slot or unix timestamp) at which the auction started.
    pub start_reference: u64,
    pub clock: ClockKind,
}

impl AuctionConfig {
    /// Validates the creator's parameters and derives the remaining fields.
    pub fn new(params: AuctionParams, start_reference: u64) -> Result<Self, AuctionContractError> {
        if params.collection_size == 0 {
            return Err(AuctionContractError::InvalidCollectionSize);
        }
        if params.duration == 0 {
            return Err(AuctionContractError::InvalidDuration);
        }
        if params.step_duration == 0 || params.step_duration > params.duration {
            return Err(AuctionContractError::InvalidStepDuration);
        }
        let total_steps = params.duration / params.step_duration;
        if params.floor_price == 0 || params.floor_price > params.start_price {
            return Err(AuctionContractError::InvalidPriceRange);
        }
        if params.price_delta == 0 {
            return Err(AuctionContractError::InvalidPriceDelta);
        }

        Ok(Self {
            collection_size: params.collection_size,
            duration: params.duration,
            step_duration: params.step_duration,
            start_price: params.start_price,
            floor_price: params.floor_price,
            price_delta: params.price_delta,
            expected_step_mint_rate: params.collection_size / total_steps,
            start_reference,
            clock: params.clock,
        })
    }

    /// Number of steps the auction is divided into. A trailing partial step
    /// is absorbed by the last full one.
    pub fn total_steps(&self) -> u64 {
        self.duration / self.step_duration
    }

    pub fn params(&self) -> AuctionParams {
        AuctionParams {
            collection_size: self.collection_size,
            duration: self.duration,
            step_duration: self.step_duration,
            start_price: self.start_price,
            floor_price: self.floor_price,
            price_delta: self.price_delta,
            clock: self.clock,
        }
    }
}

/// Price locked in at a step and the quantity sold while it was the settled
/// step.
///
/// On-chain every settled step owns an account holding its record.
#[repr(C)]
#[derive(
    BorshSchema,
    BorshDeserialize,
    BorshSerialize,
    MaxSerializedLen,
    AccountState,
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
)]
pub struct StepRecord {
    /// Price of a single item during the step (in lamports).
    pub price: u64,
    /// Number of items sold during the step.
    pub minted: u64,
}

/// The main state of an auction.
#[repr(C)]
#[derive(
    BorshSchema, BorshDeserialize, BorshSerialize, MaxSerializedLen, AccountState, Debug, Clone,
)]
pub struct AuctionRootState {
    /// Creator of the auction.
    pub auction_owner: Pubkey,
    /// Name of the auctioned collection.
    #[alias(String)]
    pub name: CollectionName,
    /// Symbol of the auctioned collection.
    #[alias(String)]
    pub symbol: CollectionSymbol,
    /// Configuration parameters of the auction.
    pub config: AuctionConfig,
    /// SPL mint that issues the collection items.
    pub collection_mint: Pubkey,
    /// Highest step whose price and demand have been settled by a purchase.
    pub current_step: u64,
    /// Number of items sold so far.
    pub total_minted: u64,
    /// All-time total funds raised in this auction.
    pub all_time_treasury: u64,
}
