use crate::cli_utils::{SimConfig, TapeEntry};

use reactive_auction_contract::engine::{Auction, ClockSource, Collection};
use reactive_auction_contract::state::ClockKind;

use log::{debug, info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepSummary {
    pub step: u64,
    pub price: u64,
    pub minted: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepSummary>,
    pub total_minted: u64,
    pub total_raised: u128,
    pub accepted_events: usize,
    pub rejected_events: usize,
    pub skipped_events: usize,
}

/// Replays `tape` in clock order, every event pays exactly the quoted price.
///
/// Events after the auction window are skipped, events the auction refuses
/// are logged and counted.
pub fn replay(config: &SimConfig, tape: &[TapeEntry]) -> Result<ReplayReport, anyhow::Error> {
    let mut auction = Auction::start(config.params, &config.start_clock())?;
    let mut collection = Collection::new(
        config.name.as_str(),
        config.symbol.as_str(),
        config.params.collection_size,
    );
    info!(
        "{} ({}): {} steps, {} items expected per step",
        collection.name(),
        collection.symbol(),
        auction.total_steps(),
        auction.expected_step_mint_rate()
    );

    let mut events: Vec<&TapeEntry> = tape.iter().collect();
    match config.params.clock {
        ClockKind::Block => events.sort_by_key(|entry| entry.block),
        ClockKind::Timestamp => events.sort_by_key(|entry| entry.timestamp),
    }

    let window_end = auction
        .start_reference()
        .saturating_add(auction.duration());
    let mut total_raised: u128 = 0;
    let mut accepted_events = 0;
    let mut rejected_events = 0;
    let mut skipped_events = 0;

    for entry in events {
        let now = match entry.clock().read(config.params.clock) {
            Ok(now) => now,
            Err(err) => {
                warn!("{:?}: {}", entry, err);
                rejected_events += 1;
                continue;
            }
        };
        if now > window_end {
            skipped_events += 1;
            continue;
        }

        let minter = entry.minter()?;
        let price = auction.get_current_auction_price(now)?;
        let payment = match price.checked_mul(entry.quantity) {
            Some(payment) => payment,
            None => {
                warn!("{}: payment for {} items overflows", now, entry.quantity);
                rejected_events += 1;
                continue;
            }
        };

        match auction.purchase(&mut collection, &minter, entry.quantity, payment, now) {
            Ok(purchase) => {
                debug!(
                    "{}: step {} minted {} at {}",
                    now, purchase.quote.step, entry.quantity, purchase.quote.price
                );
                total_raised += u128::from(purchase.quote.cost);
                accepted_events += 1;
            }
            Err(err) => {
                warn!("{}: mint of {} rejected: {}", now, entry.quantity, err);
                rejected_events += 1;
            }
        }
    }

    if skipped_events > 0 {
        info!("{} events arrived after the auction ended", skipped_events);
    }

    let steps = auction
        .ledger()
        .records()
        .map(|(step, record)| StepSummary {
            step,
            price: record.price,
            minted: record.minted,
        })
        .collect();

    Ok(ReplayReport {
        steps,
        total_minted: auction.total_minted(),
        total_raised,
        accepted_events,
        rejected_events,
        skipped_events,
    })
}
