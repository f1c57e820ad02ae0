#![doc = include_str!("../README.md")]

mod cli;

use clap::Parser;
use cli::command::run;
use cli::config::CliArgs;
use cli::telemetry::init_telemetry;
use encoded_id::Configuration;

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();
    init_telemetry()?;

    let config = Configuration::try_from(args.config)?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Running {:?} with config: {:#?}", args.command, config);

    let report = run(&args.command, &config)?;
    if args.json {
        println!("{}", report.to_json());
    } else {
        println!("{report}");
    }
    Ok(())
}
