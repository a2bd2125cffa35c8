mod cli_opts;
mod cli_utils;
mod replay;

use cli_opts::SimOpt;
use cli_utils::*;
use replay::{replay, ReplayReport};

use env_logger::Env;
use log::{error, info};
use structopt::StructOpt;

pub fn main() {
    let opt = SimOpt::from_args();

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    if let Err(e) = try_main(opt) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn try_main(opt: SimOpt) -> Result<(), anyhow::Error> {
    let mut config = match (&opt.config, &opt.preset) {
        (Some(path), _) => load_config(path)?,
        (None, Some(name)) => preset(name)?,
        (None, None) => anyhow::bail!("either a config file or a preset is required"),
    };
    if let Some(clock) = opt.clock {
        config.params.clock = clock;
    }

    let tape = load_tape(&opt.tape)?;
    info!("replaying {} mint events", tape.len());

    let report = replay(&config, &tape)?;

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &ReplayReport) {
    println!("{:>8} {:>24} {:>8}", "step", "price", "minted");
    for summary in &report.steps {
        println!(
            "{:>8} {:>24} {:>8}",
            summary.step, summary.price, summary.minted
        );
    }
    println!("Total minted: {}", report.total_minted);
    println!("Total raised: {}", report.total_raised);
    println!(
        "Events: {} accepted, {} rejected, {} after the end",
        report.accepted_events, report.rejected_events, report.skipped_events
    );
}
