//! Optimal Decomposition
//!
//! Fewest-units decomposition by dynamic programming over every amount from
//! zero up to the target. When the target itself cannot be reached, the
//! largest reachable amount below it is decomposed instead.

use smallvec::{SmallVec, smallvec};
use tracing::debug;

/// Result of an optimal decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Decomposition {
    /// Quantity of each unit, aligned with the units passed in
    pub quantities: SmallVec<[u64; 8]>,

    /// Amount actually covered by `quantities`
    pub covered: usize,
}

/// Cheapest known way to reach an amount: how many units, and which unit was
/// taken last.
#[derive(Debug, Clone, Copy)]
struct Step {
    count: usize,
    unit_index: usize,
}

/// Decompose `target` into the fewest `units`.
///
/// `units` must be sorted largest first; ties between equally short
/// decompositions go to the larger unit.
pub(crate) fn decompose(target: usize, units: &[usize]) -> Decomposition {
    let steps = cheapest_steps(target, units);

    let covered = steps
        .iter()
        .rposition(|reach| reach.count().is_some())
        .unwrap_or(0);

    if covered < target {
        debug!(
            target_units = target,
            covered_units = covered,
            "target unreachable, falling back to the largest reachable amount"
        );
    }

    let mut quantities: SmallVec<[u64; 8]> = smallvec![0; units.len()];
    let mut amount = covered;

    while let Some(Reach::Reached(step)) = steps.get(amount) {
        let (Some(quantity), Some(unit)) =
            (quantities.get_mut(step.unit_index), units.get(step.unit_index))
        else {
            break;
        };

        *quantity += 1;
        amount -= unit;
    }

    Decomposition {
        quantities,
        covered,
    }
}

/// How an amount can be reached.
#[derive(Debug, Clone, Copy)]
enum Reach {
    /// Zero, reached with no units at all
    Origin,

    /// Reached by taking one more unit on top of a cheaper amount
    Reached(Step),

    /// No combination of units adds up to this amount
    Unreachable,
}

impl Reach {
    fn count(self) -> Option<usize> {
        match self {
            Reach::Origin => Some(0),
            Reach::Reached(step) => Some(step.count),
            Reach::Unreachable => None,
        }
    }
}

fn cheapest_steps(target: usize, units: &[usize]) -> Vec<Reach> {
    let mut steps = Vec::with_capacity(target.saturating_add(1));

    steps.push(Reach::Origin);

    for amount in 1..=target {
        let mut best: Option<Step> = None;

        for (unit_index, unit) in units.iter().enumerate() {
            let Some(rest) = amount.checked_sub(*unit) else {
                continue;
            };

            let Some(count) = steps.get(rest).and_then(|reach| reach.count()) else {
                continue;
            };

            let count = count + 1;

            if best.is_none_or(|current| count < current.count) {
                best = Some(Step { count, unit_index });
            }
        }

        steps.push(best.map_or(Reach::Unreachable, Reach::Reached));
    }

    steps
}
