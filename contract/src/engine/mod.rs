mod auction;
mod clock;
mod ledger;
mod price;
mod registry;

pub use auction::{Auction, AuctionStatus, Purchase, Quote};
pub use clock::{get_step, ClockSource, ManualClock};
pub use ledger::{MintLedger, Settlement};
pub use price::price_after_steps;
pub use registry::{Collection, OwnershipRegistry};
