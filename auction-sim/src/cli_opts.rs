use reactive_auction_contract::state::ClockKind;

use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(about = "Replay a mint tape against a supply-reactive stepped Dutch auction")]
pub struct SimOpt {
    #[structopt(
        long,
        short = "-c",
        help("Auction config file (json)"),
        required_unless("preset"),
        conflicts_with("preset")
    )]
    pub config: Option<PathBuf>,
    #[structopt(
        long,
        short = "-p",
        help("Built-in auction config (azuki, moonbirds)")
    )]
    pub preset: Option<String>,
    #[structopt(long, short = "-t", help("Mint events to replay (json)"))]
    pub tape: PathBuf,
    #[structopt(
        long,
        help("Overrides the clock of the config (block, timestamp)"),
        parse(try_from_str = parse_clock)
    )]
    pub clock: Option<ClockKind>,
    #[structopt(long, help("Prints the report as json"))]
    pub json: bool,
}

fn parse_clock(input: &str) -> Result<ClockKind, String> {
    match input {
        "block" => Ok(ClockKind::Block),
        "timestamp" => Ok(ClockKind::Timestamp),
        other => Err(format!("unknown clock \"{}\"", other)),
    }
}
