use crate::error::AuctionContractError;
use crate::state::{AuctionConfig, StepRecord};

use std::cmp::Ordering;

/// Price of an item `elapsed_steps` steps after the step described by
/// `basis`.
///
/// The first elapsed step compares the demand observed in `basis` against the
/// expected step mint rate and moves the price by one delta in the direction
/// of the demand. Every further elapsed step had no recorded sales and lowers
/// the price by one more delta. The result never drops below the floor price
/// and has no upper bound.
pub fn price_after_steps(
    config: &AuctionConfig,
    basis: &StepRecord,
    elapsed_steps: u64,
) -> Result<u64, AuctionContractError> {
    if elapsed_steps == 0 {
        return Ok(basis.price);
    }

    let reacted_price = match basis.minted.cmp(&config.expected_step_mint_rate) {
        Ordering::Less => decrease(config, basis.price, 1),
        Ordering::Equal => basis.price,
        Ordering::Greater => basis
            .price
            .checked_add(config.price_delta)
            .ok_or(AuctionContractError::ArithmeticError)?,
    };

    Ok(decrease(config, reacted_price, elapsed_steps - 1))
}

fn decrease(config: &AuctionConfig, price: u64, steps: u64) -> u64 {
    price
        .saturating_sub(config.price_delta.saturating_mul(steps))
        .max(config.floor_price)
}
