//! Allocate Example
//!
//! Splits an amount by ratios, or into equal shares, and prints every share
//! along with whatever could not be allocated.
//!
//! Use `-r` to give ratios (repeatable), or `-n` for equal shares
//! Use `-c` to pick the currency
//! Use `-s` to load settings from a YAML file
//!
//! Run with: `cargo run --example allocate -- 100 -r 1 -r 1 -r 1`

use std::{io, path::PathBuf};

use anyhow::{Result, bail};
use clap::Parser;
use rust_decimal::Decimal;
use rusty_money::Money;
use tracing_subscriber::EnvFilter;

use coinage::{
    allocation::{
        allocate_by_ratio_with, allocate_equal_with, ratios::Ratios, remainder::RemainderOrder,
    },
    fixtures::parse_currency,
    report::write_allocation,
    settings::Settings,
};

/// Allocate Example
#[derive(Debug, Parser)]
struct AllocateArgs {
    /// Amount to split
    amount: Decimal,

    /// ISO currency code
    #[arg(short, long, default_value = "GBP")]
    currency: String,

    /// Relative weight of a share
    #[arg(short, long = "ratio")]
    ratios: Vec<Decimal>,

    /// Number of equal shares
    #[arg(short = 'n', long, conflicts_with = "ratios")]
    shares: Option<usize>,

    /// Hand leftover units out last to first
    #[arg(long)]
    reverse: bool,

    /// Settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,
}

/// Allocate Example
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = AllocateArgs::parse();

    let settings = match args.settings.as_deref() {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let order = if args.reverse {
        RemainderOrder::LastToFirst
    } else {
        settings.remainder_order()
    };

    let currency = parse_currency(&args.currency)?;
    let amount = Money::from_decimal(args.amount, currency);

    let allocation = match (args.shares, args.ratios.is_empty()) {
        (Some(count), _) => allocate_equal_with(amount, count, &order)?,
        (None, false) => allocate_by_ratio_with(amount, &Ratios::new(args.ratios)?, &order)?,
        (None, true) => bail!("give either ratios (-r) or a share count (-n)"),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_allocation(&mut handle, &allocation)?;

    println!("\nRemainder order: {order:?}");

    Ok(())
}
