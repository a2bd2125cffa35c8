use super::clock::{self, ClockSource};
use super::ledger::{MintLedger, Settlement};
use super::price::price_after_steps;
use super::registry::OwnershipRegistry;
use crate::error::AuctionContractError;
use crate::state::{AuctionConfig, AuctionParams};

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionStatus {
    /// The price still moves with demand. An auction is active from its start
    /// reference on, before its first purchase too.
    Active,
    /// The last step has been reached, the price is pinned but items can
    /// still be bought.
    Expired,
    /// Every item has been sold.
    SoldOut,
}

/// Validated purchase that has not been committed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    /// Step the purchase settles.
    pub step: u64,
    /// Price of a single item at `step`.
    pub price: u64,
    pub quantity: u64,
    /// Amount charged for the purchase.
    pub cost: u64,
    /// Part of the payment that is returned to the buyer.
    pub refund: u64,
}

/// Receipt of a completed purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Purchase {
    pub quote: Quote,
    pub token_ids: Range<u64>,
}

/// A supply-reactive stepped Dutch auction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auction {
    config: AuctionConfig,
    ledger: MintLedger,
}

impl Auction {
    pub fn new(params: AuctionParams, start_reference: u64) -> Result<Self, AuctionContractError> {
        let config = AuctionConfig::new(params, start_reference)?;
        let ledger = MintLedger::new(config.start_price);
        Ok(Self { config, ledger })
    }

    /// Starts an auction at the current reading of `clock`.
    pub fn start<C: ClockSource>(
        params: AuctionParams,
        clock: &C,
    ) -> Result<Self, AuctionContractError> {
        let start_reference = clock.read(params.clock)?;
        Self::new(params, start_reference)
    }

    pub fn from_parts(config: AuctionConfig, ledger: MintLedger) -> Self {
        Self { config, ledger }
    }

    pub fn config(&self) -> &AuctionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &MintLedger {
        &self.ledger
    }

    pub fn collection_size(&self) -> u64 {
        self.config.collection_size
    }

    pub fn duration(&self) -> u64 {
        self.config.duration
    }

    pub fn step_duration(&self) -> u64 {
        self.config.step_duration
    }

    pub fn start_price(&self) -> u64 {
        self.config.start_price
    }

    pub fn floor_price(&self) -> u64 {
        self.config.floor_price
    }

    pub fn price_delta(&self) -> u64 {
        self.config.price_delta
    }

    pub fn expected_step_mint_rate(&self) -> u64 {
        self.config.expected_step_mint_rate
    }

    pub fn start_reference(&self) -> u64 {
        self.config.start_reference
    }

    pub fn total_steps(&self) -> u64 {
        self.config.total_steps()
    }

    pub fn current_step(&self) -> u64 {
        self.ledger.current_step()
    }

    pub fn total_minted(&self) -> u64 {
        self.ledger.total_minted()
    }

    pub fn price_per_step(&self, step: u64) -> u64 {
        self.ledger.price_per_step(step)
    }

    pub fn mints_per_step(&self, step: u64) -> u64 {
        self.ledger.mints_per_step(step)
    }

    /// Reads `clock` in the units this auction is measured in.
    pub fn now<C: ClockSource>(&self, clock: &C) -> Result<u64, AuctionContractError> {
        clock.read(self.config.clock)
    }

    pub fn get_step(&self, now: u64) -> u64 {
        clock::get_step(&self.config, now)
    }

    /// Price at `curr_step` derived from the settled record of `prev_step`.
    pub fn get_auction_price(
        &self,
        curr_step: u64,
        prev_step: u64,
    ) -> Result<u64, AuctionContractError> {
        if prev_step == 0 {
            return Err(AuctionContractError::PrevStepIsZero);
        }
        if curr_step < prev_step {
            return Err(AuctionContractError::CurrStepBeforePrevStep);
        }
        if prev_step > self.ledger.current_step() {
            return Err(AuctionContractError::PrevStepNotSettled);
        }
        let basis = self
            .ledger
            .step_record(prev_step)
            .ok_or(AuctionContractError::StepNotRecorded)?;

        price_after_steps(&self.config, &basis, curr_step - prev_step)
    }

    /// Step a purchase at `now` would settle and its price.
    pub fn get_current_step_and_price(&self, now: u64) -> Result<(u64, u64), AuctionContractError> {
        let current_step = self.ledger.current_step();
        let step = self.get_step(now).max(current_step);
        let price = self.get_auction_price(step, current_step)?;
        Ok((step, price))
    }

    pub fn get_current_auction_price(&self, now: u64) -> Result<u64, AuctionContractError> {
        self.get_current_step_and_price(now).map(|(_, price)| price)
    }

    pub fn status(&self, now: u64) -> AuctionStatus {
        if self.ledger.total_minted() >= self.config.collection_size {
            AuctionStatus::SoldOut
        } else if self.get_step(now) >= self.config.total_steps() {
            AuctionStatus::Expired
        } else {
            AuctionStatus::Active
        }
    }

    /// Validates a purchase of `quantity` items for `payment` at `now`.
    pub fn quote(
        &self,
        quantity: u64,
        payment: u64,
        now: u64,
    ) -> Result<Quote, AuctionContractError> {
        if quantity == 0 {
            return Err(AuctionContractError::ZeroMintQuantity);
        }
        let total_after = self
            .ledger
            .total_minted()
            .checked_add(quantity)
            .ok_or(AuctionContractError::ExceedsMaxSupply)?;
        if total_after > self.config.collection_size {
            return Err(AuctionContractError::ExceedsMaxSupply);
        }

        let (step, price) = self.get_current_step_and_price(now)?;
        let cost = price
            .checked_mul(quantity)
            .ok_or(AuctionContractError::ArithmeticError)?;
        if payment < cost {
            return Err(AuctionContractError::InsufficientPayment);
        }

        Ok(Quote {
            step,
            price,
            quantity,
            cost,
            refund: payment - cost,
        })
    }

    /// Commits a quote to the ledger. The returned settlement can be handed
    /// to [`rollback`](Self::rollback) as long as no other purchase has been
    /// settled since.
    pub fn settle(&mut self, quote: &Quote) -> Result<Settlement, AuctionContractError> {
        self.ledger.settle(quote.step, quote.price, quote.quantity)
    }

    pub fn rollback(&mut self, settlement: Settlement) {
        self.ledger.revert(settlement)
    }

    /// Sells `quantity` items to `recipient`.
    ///
    /// The ledger is updated before the registry is asked to mint. If minting
    /// fails the ledger is restored and the registry's error is returned.
    pub fn purchase<R: OwnershipRegistry>(
        &mut self,
        registry: &mut R,
        recipient: &R::Recipient,
        quantity: u64,
        payment: u64,
        now: u64,
    ) -> Result<Purchase, AuctionContractError> {
        let quote = self.quote(quantity, payment, now)?;
        let settlement = self.settle(&quote)?;

        match registry.mint_to(recipient, quantity) {
            Ok(token_ids) => Ok(Purchase { quote, token_ids }),
            Err(err) => {
                self.rollback(settlement);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::engine::clock::ManualClock;
    use crate::engine::registry::Collection;
    use crate::state::{ClockKind, StepRecord};

    use solana_program::pubkey::Pubkey;

    const START: u64 = 14_000_000;

    fn params(clock: ClockKind) -> AuctionParams {
        AuctionParams {
            collection_size: 1000,
            duration: 30,
            step_duration: 2,
            start_price: 10_000,
            floor_price: 5_000,
            price_delta: 500,
            clock,
        }
    }

    fn setup() -> (Auction, Collection, Pubkey) {
        let auction = Auction::new(params(ClockKind::Block), START).unwrap();
        let collection = Collection::new("Reactive", "RCT", 1000);
        (auction, collection, Pubkey::new_unique())
    }

    #[test]
    fn initial_state() {
        let (auction, _, _) = setup();
        assert_eq!(auction.collection_size(), 1000);
        assert_eq!(auction.duration(), 30);
        assert_eq!(auction.step_duration(), 2);
        assert_eq!(auction.start_price(), 10_000);
        assert_eq!(auction.floor_price(), 5_000);
        assert_eq!(auction.price_delta(), 500);
        assert_eq!(auction.expected_step_mint_rate(), 66);
        assert_eq!(auction.start_reference(), START);
        assert_eq!(auction.total_steps(), 15);
        assert_eq!(auction.current_step(), 1);
        assert_eq!(auction.price_per_step(1), 10_000);
        assert_eq!(auction.mints_per_step(1), 0);
        assert_eq!(auction.total_minted(), 0);
        assert_eq!(auction.get_step(START), 1);
        assert_eq!(auction.get_current_step_and_price(START), Ok((1, 10_000)));
        assert_eq!(auction.status(START), AuctionStatus::Active);
    }

    #[test]
    fn start_reads_configured_clock() {
        let clock = ManualClock::new(500, 1_650_000_000);
        let by_block = Auction::start(params(ClockKind::Block), &clock).unwrap();
        assert_eq!(by_block.start_reference(), 500);
        assert_eq!(by_block.now(&clock), Ok(500));

        let by_time = Auction::start(params(ClockKind::Timestamp), &clock).unwrap();
        assert_eq!(by_time.start_reference(), 1_650_000_000);
        assert_eq!(by_time.now(&clock), Ok(1_650_000_000));
    }

    #[test]
    fn auction_price_preconditions() {
        let (auction, _, _) = setup();
        let current_step = auction.current_step();
        assert_eq!(
            auction.get_auction_price(1, 0),
            Err(AuctionContractError::PrevStepIsZero)
        );
        assert_eq!(
            auction.get_auction_price(0, 1),
            Err(AuctionContractError::CurrStepBeforePrevStep)
        );
        assert_eq!(
            auction.get_auction_price(current_step + 2, current_step + 1),
            Err(AuctionContractError::PrevStepNotSettled)
        );
        assert_eq!(auction.get_auction_price(1, 1), Ok(10_000));
    }

    #[test]
    fn skipped_step_is_not_read_as_zero() {
        let (mut auction, mut collection, buyer) = setup();
        // settle step 4 directly, steps 2 and 3 are skipped
        auction
            .purchase(&mut collection, &buyer, 1, 10_000, START + 6)
            .unwrap();
        assert_eq!(auction.current_step(), 4);
        assert_eq!(
            auction.get_auction_price(4, 2),
            Err(AuctionContractError::StepNotRecorded)
        );
        assert_eq!(auction.get_auction_price(4, 1), Ok(8_500));
    }

    #[test]
    fn price_follows_demand_below_target() {
        let (mut auction, mut collection, buyer) = setup();
        let quantity = auction.expected_step_mint_rate() - 1;
        auction
            .purchase(&mut collection, &buyer, quantity, quantity * 10_000, START)
            .unwrap();
        assert_eq!(auction.get_auction_price(2, 1), Ok(9_500));
        assert_eq!(auction.get_current_auction_price(START + 2), Ok(9_500));
    }

    #[test]
    fn price_follows_demand_on_target() {
        let (mut auction, mut collection, buyer) = setup();
        let quantity = auction.expected_step_mint_rate();
        auction
            .purchase(&mut collection, &buyer, quantity, quantity * 10_000, START)
            .unwrap();
        assert_eq!(auction.get_auction_price(2, 1), Ok(10_000));
    }

    #[test]
    fn price_follows_demand_above_target() {
        let (mut auction, mut collection, buyer) = setup();
        let quantity = auction.expected_step_mint_rate() + 1;
        auction
            .purchase(&mut collection, &buyer, quantity, quantity * 10_000, START)
            .unwrap();
        assert_eq!(auction.get_auction_price(2, 1), Ok(10_500));

        // buying at step 2 locks the raised price in
        let purchase = auction
            .purchase(&mut collection, &buyer, 1, 10_500, START + 2)
            .unwrap();
        assert_eq!(purchase.quote.step, 2);
        assert_eq!(purchase.quote.price, 10_500);
        assert_eq!(auction.current_step(), 2);
        assert_eq!(auction.price_per_step(2), 10_500);
        assert_eq!(auction.mints_per_step(2), 1);
        assert_eq!(auction.mints_per_step(1), 67);
        assert_eq!(auction.total_minted(), 68);
    }

    #[test]
    fn price_floors_without_demand() {
        let (auction, _, _) = setup();
        let steps_until_floor = (auction.start_price() - auction.floor_price())
            / auction.price_delta();
        assert_eq!(
            auction.get_auction_price(1 + steps_until_floor - 1, 1),
            Ok(5_500)
        );
        assert_eq!(
            auction.get_auction_price(1 + steps_until_floor, 1),
            Ok(5_000)
        );
        assert_eq!(
            auction.get_auction_price(1 + steps_until_floor + 2, 1),
            Ok(5_000)
        );
        // the preview agrees and does not settle anything
        assert_eq!(
            auction.get_current_step_and_price(START + 20),
            Ok((11, 5_000))
        );
        assert_eq!(auction.current_step(), 1);
    }

    #[test]
    fn overpayment_is_refunded() {
        let (mut auction, mut collection, buyer) = setup();
        let purchase = auction
            .purchase(&mut collection, &buyer, 1, 3 * 10_000, START)
            .unwrap();
        assert_eq!(purchase.quote.cost, 10_000);
        assert_eq!(purchase.quote.refund, 20_000);
        assert_eq!(purchase.token_ids, 0..1);

        let purchase = auction
            .purchase(&mut collection, &buyer, 3, 30_123, START + 1)
            .unwrap();
        assert_eq!(purchase.quote.cost, 30_000);
        assert_eq!(purchase.quote.refund, 123);
        assert_eq!(purchase.token_ids, 1..4);
        assert_eq!(collection.balance_of(&buyer), 4);
    }

    #[test]
    fn rejected_purchases_leave_state_untouched() {
        let (mut auction, mut collection, buyer) = setup();
        let before = auction.clone();

        assert_eq!(
            auction.purchase(&mut collection, &buyer, 0, 10_000, START),
            Err(AuctionContractError::ZeroMintQuantity)
        );
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 1001, u64::MAX, START),
            Err(AuctionContractError::ExceedsMaxSupply)
        );
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 2, 19_999, START),
            Err(AuctionContractError::InsufficientPayment)
        );
        // a later step is priced but not settled when payment falls short
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 1, 8_999, START + 4),
            Err(AuctionContractError::InsufficientPayment)
        );
        assert_eq!(auction, before);
        assert_eq!(collection.total_supply(), Ok(0));
    }

    #[test]
    fn cost_overflow() {
        let params = AuctionParams {
            start_price: u64::MAX / 2,
            floor_price: 1,
            ..params(ClockKind::Block)
        };
        let auction = Auction::new(params, START).unwrap();
        assert_eq!(
            auction.quote(3, u64::MAX, START),
            Err(AuctionContractError::ArithmeticError)
        );
    }

    #[test]
    fn registry_failure_rolls_back() {
        let mut auction = Auction::new(params(ClockKind::Block), START).unwrap();
        let mut collection = Collection::new("Reactive", "RCT", 2);
        let buyer = Pubkey::new_unique();

        auction
            .purchase(&mut collection, &buyer, 1, 10_000, START)
            .unwrap();
        let before = auction.clone();

        // same step
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 2, 20_000, START + 1),
            Err(AuctionContractError::MintFailed)
        );
        assert_eq!(auction, before);

        // a new step would have been opened
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 2, 20_000, START + 4),
            Err(AuctionContractError::MintFailed)
        );
        assert_eq!(auction, before);
        assert_eq!(auction.current_step(), 1);
        assert_eq!(auction.total_minted(), 1);
        assert_eq!(collection.total_supply(), Ok(1));
    }

    #[test]
    fn sells_out() {
        let params = AuctionParams {
            collection_size: 30,
            ..params(ClockKind::Block)
        };
        let mut auction = Auction::new(params, START).unwrap();
        let mut collection = Collection::new("Reactive", "RCT", 30);
        let buyer = Pubkey::new_unique();

        let purchase = auction
            .purchase(&mut collection, &buyer, 30, 300_000, START)
            .unwrap();
        assert_eq!(purchase.token_ids, 0..30);
        assert_eq!(auction.status(START), AuctionStatus::SoldOut);
        assert_eq!(
            auction.purchase(&mut collection, &buyer, 1, 10_000, START + 2),
            Err(AuctionContractError::ExceedsMaxSupply)
        );
    }

    #[test]
    fn expired_auction_still_sells_at_pinned_price() {
        let (mut auction, mut collection, buyer) = setup();
        assert_eq!(auction.status(START + 27), AuctionStatus::Active);
        assert_eq!(auction.status(START + 28), AuctionStatus::Expired);
        assert_eq!(auction.status(START + 1_000), AuctionStatus::Expired);

        let purchase = auction
            .purchase(&mut collection, &buyer, 1, 10_000, START + 1_000)
            .unwrap();
        assert_eq!(purchase.quote.step, 15);
        assert_eq!(purchase.quote.price, 5_000);
        assert_eq!(auction.get_current_auction_price(START + 5_000), Ok(5_000));
    }

    #[test]
    fn backwards_clock_observes_settled_step() {
        let (mut auction, mut collection, buyer) = setup();
        auction
            .purchase(&mut collection, &buyer, 66, 660_000, START + 6)
            .unwrap();
        assert_eq!(auction.current_step(), 4);
        assert_eq!(
            auction.get_current_step_and_price(START),
            Ok((4, auction.price_per_step(4)))
        );
    }

    #[test]
    fn time_based_auction() {
        let mut clock = ManualClock::new(1, 1_650_121_200);
        let mut auction = Auction::start(params(ClockKind::Timestamp), &clock).unwrap();
        let mut collection = Collection::new("Reactive", "RCT", 1000);
        let buyer = Pubkey::new_unique();

        auction
            .purchase(
                &mut collection,
                &buyer,
                65,
                650_000,
                auction.now(&clock).unwrap(),
            )
            .unwrap();

        // slots do not move a time-based auction
        clock.advance_slots(100);
        clock.advance_seconds(1);
        let now = auction.now(&clock).unwrap();
        assert_eq!(auction.get_step(now), 1);
        assert_eq!(auction.get_current_auction_price(now), Ok(10_000));

        clock.advance_seconds(1);
        let now = auction.now(&clock).unwrap();
        assert_eq!(auction.get_step(now), 2);
        assert_eq!(auction.get_current_auction_price(now), Ok(9_500));
    }

    #[test]
    fn rebuilt_from_settled_state() {
        let config = AuctionConfig::new(params(ClockKind::Block), START).unwrap();
        let ledger = MintLedger::from_settled(
            3,
            StepRecord {
                price: 9_000,
                minted: 70,
            },
            200,
        );
        let auction = Auction::from_parts(config, ledger);
        assert_eq!(auction.get_current_step_and_price(START + 4), Ok((3, 9_000)));
        assert_eq!(auction.get_current_step_and_price(START + 6), Ok((4, 9_500)));
        assert_eq!(
            auction.get_auction_price(3, 2),
            Err(AuctionContractError::StepNotRecorded)
        );
    }
}
