use crate::error::AuctionContractError;
use crate::state::{AuctionConfig, ClockKind};

use solana_program::clock::{Clock, Slot, UnixTimestamp};

use std::convert::TryFrom;

/// Anything that can tell the current slot and cluster time.
///
/// The engine never reads the clock by itself, the reading is taken at call
/// time according to the auction's [`ClockKind`] and passed in as `now`.
pub trait ClockSource {
    fn slot(&self) -> Slot;
    fn unix_timestamp(&self) -> UnixTimestamp;

    fn read(&self, kind: ClockKind) -> Result<u64, AuctionContractError> {
        match kind {
            ClockKind::Block => Ok(self.slot()),
            ClockKind::Timestamp => u64::try_from(self.unix_timestamp())
                .map_err(|_| AuctionContractError::InvalidClockReading),
        }
    }
}

impl ClockSource for Clock {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn unix_timestamp(&self) -> UnixTimestamp {
        self.unix_timestamp
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    pub slot: Slot,
    pub unix_timestamp: UnixTimestamp,
}

impl ManualClock {
    pub fn new(slot: Slot, unix_timestamp: UnixTimestamp) -> Self {
        Self {
            slot,
            unix_timestamp,
        }
    }

    pub fn advance_slots(&mut self, slots: u64) {
        self.slot = self.slot.saturating_add(slots);
    }

    pub fn advance_seconds(&mut self, seconds: i64) {
        self.unix_timestamp = self.unix_timestamp.saturating_add(seconds);
    }
}

impl ClockSource for ManualClock {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn unix_timestamp(&self) -> UnixTimestamp {
        self.unix_timestamp
    }
}

/// Maps a clock reading to a step index in `[1, total_steps]`.
///
/// Readings before the start of the auction count as zero elapsed time. The
/// last step is sticky, so the price freezes once the duration has elapsed.
pub fn get_step(config: &AuctionConfig, now: u64) -> u64 {
    let elapsed = now.saturating_sub(config.start_reference);
    let raw_step = (elapsed / config.step_duration).saturating_add(1);
    raw_step.min(config.total_steps())
}
