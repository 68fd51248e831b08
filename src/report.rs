//! Report
//!
//! Plain-text tables for allocations and change solutions. Amounts are written
//! as plain decimals followed by their ISO code.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{
        Alignment, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    allocation::Allocation,
    change::{ChangeSolution, ChangeStrategy},
};

/// Errors that can occur when writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A subtotal could not be represented.
    #[error("report arithmetic overflowed")]
    Overflow,

    /// IO error
    #[error("IO error")]
    IO,
}

/// Write a table of allocated shares followed by the totals.
///
/// # Errors
///
/// Returns [`ReportError::IO`] if writing to `out` fails.
pub fn write_allocation(
    out: &mut impl io::Write,
    allocation: &Allocation<'_>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Share"]);

    for (index, share) in allocation.iter().enumerate() {
        builder.push_record([(index + 1).to_string(), plain(share)]);
    }

    write_table(out, builder, 1)?;

    write_summary(
        out,
        &[
            ("Amount", plain(&allocation.amount())),
            ("Allocated", plain(&allocation.total_allocated())),
            ("Remainder", plain(&allocation.remainder())),
        ],
    )?;

    if !allocation.is_complete() {
        let note = if allocation.is_quasi_complete() {
            "below one minimal unit"
        } else {
            "incomplete"
        };

        writeln!(out, " ({note})").map_err(|_err| ReportError::IO)?;
    }

    Ok(())
}

/// Write a table of denominations used followed by the totals.
///
/// # Errors
///
/// Returns [`ReportError::Overflow`] if a subtotal cannot be represented, or
/// [`ReportError::IO`] if writing to `out` fails.
pub fn write_change(
    out: &mut impl io::Write,
    solution: &ChangeSolution<'_>,
) -> Result<(), ReportError> {
    let code = solution.amount().currency().iso_alpha_code;
    let mut builder = Builder::default();

    builder.push_record(["Denomination", "Quantity", "Subtotal"]);

    for part in solution.iter() {
        let subtotal = part
            .denomination()
            .value()
            .checked_mul(Decimal::from(part.quantity()))
            .ok_or(ReportError::Overflow)?;

        builder.push_record([
            format!("{} {code}", part.denomination()),
            part.quantity().to_string(),
            format!("{subtotal} {code}"),
        ]);
    }

    write_table(out, builder, 0)?;

    let strategy = match solution.strategy() {
        ChangeStrategy::Greedy => "greedy",
        ChangeStrategy::Optimal => "optimal",
    };

    write_summary(
        out,
        &[
            ("Strategy", strategy.to_string()),
            ("Amount", plain(&solution.amount())),
            ("Covered", plain(&solution.covered())),
            ("Remainder", plain(&solution.remainder())),
            ("Units", solution.total_count().to_string()),
        ],
    )
}

fn plain(money: &Money<'_, Currency>) -> String {
    format!("{} {}", money.amount(), money.currency().iso_alpha_code)
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    first_numeric_column: usize,
) -> Result<(), ReportError> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(first_numeric_column..), Alignment::right());
    table.modify(Rows::first(), Alignment::center());

    writeln!(out, "\n{table}").map_err(|_err| ReportError::IO)
}

fn write_summary(out: &mut impl io::Write, lines: &[(&str, String)]) -> Result<(), ReportError> {
    let label_width = lines.iter().map(|(label, _)| label.len()).max().unwrap_or(0) + 1;

    for (label, value) in lines {
        writeln!(out, " {:<label_width$} {value}", format!("{label}:"))
            .map_err(|_err| ReportError::IO)?;
    }

    Ok(())
}
