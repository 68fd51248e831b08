//! Greedy Decomposition

use smallvec::SmallVec;

/// Take as many of each unit as fit, largest first.
///
/// `units` must be sorted largest first. Returns the quantity of each unit
/// (aligned with `units`) and whatever could not be covered.
pub(crate) fn decompose(target: u64, units: &[u64]) -> (SmallVec<[u64; 8]>, u64) {
    let mut remaining = target;

    let quantities = units
        .iter()
        .map(|unit| {
            let quantity = remaining.checked_div(*unit).unwrap_or(0);

            remaining -= quantity * unit;

            quantity
        })
        .collect();

    (quantities, remaining)
}
