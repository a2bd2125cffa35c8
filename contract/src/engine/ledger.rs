use crate::error::AuctionContractError;
use crate::state::StepRecord;

use std::collections::BTreeMap;

/// Per-step price and demand history of an auction.
///
/// The ledger always holds a record for its current step. Earlier steps are
/// kept in `history` when the ledger was built in memory from the first step.
/// A ledger loaded from on-chain state only knows its current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintLedger {
    current_step: u64,
    current: StepRecord,
    total_minted: u64,
    history: BTreeMap<u64, StepRecord>,
}

/// Undo information for a settled purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    pub step: u64,
    pub quantity: u64,
    superseded_step: Option<u64>,
}

impl MintLedger {
    /// Fresh ledger with step 1 priced at the start price.
    pub fn new(start_price: u64) -> Self {
        Self::from_settled(
            1,
            StepRecord {
                price: start_price,
                minted: 0,
            },
            0,
        )
    }

    /// Ledger that only knows the most recently settled step.
    pub fn from_settled(current_step: u64, current: StepRecord, total_minted: u64) -> Self {
        Self {
            current_step,
            current,
            total_minted,
            history: BTreeMap::new(),
        }
    }

    pub fn current_step(&self) -> u64 {
        self.current_step
    }

    pub fn current_record(&self) -> StepRecord {
        self.current
    }

    pub fn total_minted(&self) -> u64 {
        self.total_minted
    }

    pub fn step_record(&self, step: u64) -> Option<StepRecord> {
        if step == self.current_step {
            Some(self.current)
        } else {
            self.history.get(&step).copied()
        }
    }

    /// Price recorded at `step`, or zero if nothing was recorded there.
    pub fn price_per_step(&self, step: u64) -> u64 {
        self.step_record(step).map(|record| record.price).unwrap_or(0)
    }

    /// Items sold while `step` was the settled step, or zero.
    pub fn mints_per_step(&self, step: u64) -> u64 {
        self.step_record(step).map(|record| record.minted).unwrap_or(0)
    }

    /// Known records in ascending step order.
    pub fn records(&self) -> impl Iterator<Item = (u64, StepRecord)> + '_ {
        self.history
            .iter()
            .map(|(step, record)| (*step, *record))
            .chain(std::iter::once((self.current_step, self.current)))
    }

    /// Records `quantity` items sold at `step` for `price`.
    ///
    /// When `step` is past the current step, it becomes the current step with
    /// `price` locked in, and the previous current step moves to the history.
    /// Nothing is modified if the counters would overflow.
    pub(crate) fn settle(
        &mut self,
        step: u64,
        price: u64,
        quantity: u64,
    ) -> Result<Settlement, AuctionContractError> {
        let total_minted = self
            .total_minted
            .checked_add(quantity)
            .ok_or(AuctionContractError::ArithmeticError)?;

        let superseded_step = if step > self.current_step {
            let opened = StepRecord {
                price,
                minted: quantity,
            };
            let previous = std::mem::replace(&mut self.current, opened);
            self.history.insert(self.current_step, previous);
            let superseded = self.current_step;
            self.current_step = step;
            Some(superseded)
        } else {
            self.current.minted = self
                .current
                .minted
                .checked_add(quantity)
                .ok_or(AuctionContractError::ArithmeticError)?;
            None
        };
        self.total_minted = total_minted;

        Ok(Settlement {
            step: self.current_step,
            quantity,
            superseded_step,
        })
    }

    /// Undoes the most recent [`settle`](Self::settle).
    pub(crate) fn revert(&mut self, settlement: Settlement) {
        self.total_minted = self.total_minted.saturating_sub(settlement.quantity);
        match settlement.superseded_step {
            Some(previous_step) => {
                let previous = self.history.remove(&previous_step).unwrap_or_default();
                self.current = previous;
                self.current_step = previous_step;
            }
            None => {
                self.current.minted = self.current.minted.saturating_sub(settlement.quantity);
            }
        }
    }
}
