//! Change Example
//!
//! Makes change for an amount from a named denomination set, greedily and
//! with the fewest units, and counts every way the amount can be made.
//!
//! Use `-f` to load a denomination set by name from `fixtures/denominations`
//! Use `-s` to load settings from a YAML file
//!
//! Run with: `cargo run --example change -- 0.63 -f us-coins`

use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use rusty_money::Money;
use tracing_subscriber::EnvFilter;

use coinage::{change::ChangeMaker, fixtures::Fixture, report::write_change, settings::Settings};

/// Change Example
#[derive(Debug, Parser)]
struct ChangeArgs {
    /// Amount to make change for
    amount: Decimal,

    /// Denomination set
    #[arg(short, long, default_value = "uk-coins")]
    fixture: String,

    /// Settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

/// Change Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = ChangeArgs::parse();

    let settings = match args.settings.as_deref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let maker = ChangeMaker::from(&settings);
    let set = Fixture::from_set(&args.fixture)?;
    let amount = Money::from_decimal(args.amount, set.currency);

    let greedy = maker.make_change(amount, &set.denominations)?;
    let optimal = maker.make_optimal_change(amount, &set.denominations)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_change(&mut handle, &greedy)?;
    write_change(&mut handle, &optimal)?;

    match maker.count_ways(amount, &set.denominations) {
        Ok(ways) => println!("\nWays to make {}: {ways}", args.amount),
        Err(err) => println!("\nWays to make {}: {err}", args.amount),
    }

    Ok(())
}
