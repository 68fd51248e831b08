//! Change Making
//!
//! Decomposes a monetary amount into fixed [`Denominations`]. Three algorithms
//! are offered:
//!
//! - [`count_ways_to_make_change`] counts the distinct combinations that make
//!   the amount exactly.
//! - [`make_change`] takes the largest denomination that still fits, over and
//!   over. This is optimal for canonical coin systems (such as US or UK coins)
//!   but can use more units than necessary otherwise.
//! - [`make_optimal_change`] always finds the fewest units, and covers as much
//!   of the amount as possible when it cannot be made exactly.
//!
//! All three work on whole minimal units of the amount's currency. Any
//! sub-unit digits of the amount end up in the remainder.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    change::denominations::{Denomination, Denominations},
    precision::{Precision, PrecisionError},
    settings::Settings,
};

pub mod denominations;

mod counting;
mod greedy;
mod optimal;

/// Errors that can occur while making change.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangeError {
    /// Change can only be made for positive amounts.
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),

    /// A denomination is finer than the currency's minimal unit.
    #[error("denomination {denomination} is not a whole number of minimal units of {unit}")]
    DenominationPrecision {
        /// The offending denomination
        denomination: Denomination,

        /// Minimal unit of the amount's currency
        unit: Decimal,
    },

    /// The amount needs a larger table than the change maker allows.
    #[error("amount spans {units} minimal units, more than the limit of {limit}")]
    TableTooLarge {
        /// Amount in minimal units
        units: u64,

        /// Configured table limit
        limit: usize,
    },

    /// The number of combinations does not fit in a `u128`.
    #[error("number of combinations overflowed")]
    CountOverflow,

    /// An amount could not be expressed in minimal units.
    #[error("amount cannot be expressed in minimal units")]
    Overflow,

    /// Wrapped currency precision error.
    #[error(transparent)]
    Precision(#[from] PrecisionError),
}

/// Algorithm that produced a [`ChangeSolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeStrategy {
    /// Largest denomination first
    Greedy,

    /// Fewest units, by dynamic programming
    Optimal,
}

/// A quantity of one denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Change {
    denomination: Denomination,
    quantity: u64,
}

impl Change {
    /// Denomination used.
    #[must_use]
    pub const fn denomination(&self) -> Denomination {
        self.denomination
    }

    /// How many of the denomination are used. Always positive.
    #[must_use]
    pub const fn quantity(&self) -> u64 {
        self.quantity
    }
}

/// A decomposition of an amount into denominations.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeSolution<'a> {
    strategy: ChangeStrategy,

    /// Amount change was made for
    amount: Money<'a, Currency>,

    /// Denominations used, largest first, zero quantities omitted
    parts: SmallVec<[Change; 8]>,

    /// Portion of the amount covered by `parts`
    covered: Money<'a, Currency>,

    /// Portion of the amount no combination of denominations could cover
    remainder: Money<'a, Currency>,
}

/// A decomposition produced by [`make_optimal_change`].
pub type OptimalChangeSolution<'a> = ChangeSolution<'a>;

impl<'a> ChangeSolution<'a> {
    /// Algorithm that produced this solution.
    #[must_use]
    pub fn strategy(&self) -> ChangeStrategy {
        self.strategy
    }

    /// Amount change was made for.
    #[must_use]
    pub fn amount(&self) -> Money<'a, Currency> {
        self.amount
    }

    /// Denominations used, largest first.
    #[must_use]
    pub fn parts(&self) -> &[Change] {
        &self.parts
    }

    /// Iterate the denominations used, largest first.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.parts.iter()
    }

    /// Number of distinct denominations used.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether no denomination was used at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total number of units (coins, notes) handed out.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.parts.iter().map(Change::quantity).sum()
    }

    /// Quantity of `denomination` used, zero if it was not used.
    #[must_use]
    pub fn quantity_of(&self, denomination: Denomination) -> u64 {
        self.parts
            .iter()
            .find(|part| part.denomination == denomination)
            .map_or(0, Change::quantity)
    }

    /// Portion of the amount covered by the denominations.
    #[must_use]
    pub fn covered(&self) -> Money<'a, Currency> {
        self.covered
    }

    /// Portion of the amount that could not be covered.
    #[must_use]
    pub fn remainder(&self) -> Money<'a, Currency> {
        self.remainder
    }

    /// Whether the amount was made exactly.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remainder.amount().is_zero()
    }
}

/// Makes change, optionally refusing targets whose tables would grow beyond a limit.
///
/// The default change maker has no limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeMaker {
    max_table_units: Option<usize>,
}

impl From<&Settings> for ChangeMaker {
    fn from(settings: &Settings) -> Self {
        Self {
            max_table_units: settings.max_table_units(),
        }
    }
}

impl ChangeMaker {
    /// Create a change maker whose table-based algorithms accept targets of up
    /// to `max_table_units` minimal units.
    #[must_use]
    pub const fn new(max_table_units: usize) -> Self {
        Self {
            max_table_units: Some(max_table_units),
        }
    }

    /// Largest target, in minimal units, accepted by the table-based algorithms,
    /// if limited.
    #[must_use]
    pub const fn max_table_units(&self) -> Option<usize> {
        self.max_table_units
    }

    /// Count the distinct combinations of `denominations` that make `amount` exactly.
    ///
    /// An amount carrying digits below its currency's minimal unit cannot be
    /// made exactly and has no combinations.
    ///
    /// # Errors
    ///
    /// - [`ChangeError::NonPositiveAmount`]: `amount` is zero or negative.
    /// - [`ChangeError::DenominationPrecision`]: a denomination is finer than the minimal unit.
    /// - [`ChangeError::TableTooLarge`]: `amount` exceeds a configured table limit.
    /// - [`ChangeError::Overflow`]: `amount` cannot be expressed in minimal units.
    /// - [`ChangeError::CountOverflow`]: the count does not fit in a `u128`.
    #[tracing::instrument(
        name = "change.count_ways",
        skip_all,
        fields(amount = %amount.amount(), denominations = denominations.len()),
        err
    )]
    pub fn count_ways(
        &self,
        amount: Money<'_, Currency>,
        denominations: &Denominations,
    ) -> Result<u128, ChangeError> {
        let normalized = Normalized::new(amount, denominations)?;

        if !normalized.leftover.is_zero() || denominations.is_empty() {
            return Ok(0);
        }

        let target = self.table_size(normalized.target)?;
        let units = normalized.table_units()?;

        counting::count_ways(target, &units).ok_or(ChangeError::CountOverflow)
    }

    /// Make change largest denomination first.
    ///
    /// # Errors
    ///
    /// - [`ChangeError::NonPositiveAmount`]: `amount` is zero or negative.
    /// - [`ChangeError::DenominationPrecision`]: a denomination is finer than the minimal unit.
    /// - [`ChangeError::Overflow`]: `amount` cannot be expressed in minimal units.
    #[tracing::instrument(
        name = "change.make_change",
        skip_all,
        fields(amount = %amount.amount(), denominations = denominations.len()),
        err
    )]
    pub fn make_change<'a>(
        &self,
        amount: Money<'a, Currency>,
        denominations: &Denominations,
    ) -> Result<ChangeSolution<'a>, ChangeError> {
        let normalized = Normalized::new(amount, denominations)?;

        let (quantities, remaining) = greedy::decompose(normalized.target, &normalized.units);

        normalized.solution(
            ChangeStrategy::Greedy,
            denominations,
            &quantities,
            normalized.target - remaining,
        )
    }

    /// Make change with the fewest units.
    ///
    /// When the amount cannot be made exactly, the largest amount below it that
    /// can be is decomposed and the difference is left in the remainder.
    ///
    /// # Errors
    ///
    /// - [`ChangeError::NonPositiveAmount`]: `amount` is zero or negative.
    /// - [`ChangeError::DenominationPrecision`]: a denomination is finer than the minimal unit.
    /// - [`ChangeError::TableTooLarge`]: `amount` exceeds a configured table limit.
    /// - [`ChangeError::Overflow`]: `amount` cannot be expressed in minimal units.
    #[tracing::instrument(
        name = "change.make_optimal_change",
        skip_all,
        fields(amount = %amount.amount(), denominations = denominations.len()),
        err
    )]
    pub fn make_optimal_change<'a>(
        &self,
        amount: Money<'a, Currency>,
        denominations: &Denominations,
    ) -> Result<OptimalChangeSolution<'a>, ChangeError> {
        let normalized = Normalized::new(amount, denominations)?;

        if denominations.is_empty() {
            return normalized.solution(ChangeStrategy::Optimal, denominations, &[], 0);
        }

        let target = self.table_size(normalized.target)?;
        let units = normalized.table_units()?;

        let decomposition = optimal::decompose(target, &units);
        let covered = decomposition.covered.to_u64().ok_or(ChangeError::Overflow)?;

        normalized.solution(
            ChangeStrategy::Optimal,
            denominations,
            &decomposition.quantities,
            covered,
        )
    }

    fn table_size(&self, units: u64) -> Result<usize, ChangeError> {
        let size = units.to_usize().ok_or(ChangeError::Overflow)?;

        match self.max_table_units {
            Some(limit) if size > limit => Err(ChangeError::TableTooLarge { units, limit }),
            _ => Ok(size),
        }
    }
}

/// Count the distinct combinations of `denominations` that make `amount` exactly.
///
/// # Errors
///
/// See [`ChangeMaker::count_ways`].
pub fn count_ways_to_make_change(
    amount: Money<'_, Currency>,
    denominations: &Denominations,
) -> Result<u128, ChangeError> {
    ChangeMaker::default().count_ways(amount, denominations)
}

/// Make change largest denomination first.
///
/// # Errors
///
/// See [`ChangeMaker::make_change`].
pub fn make_change<'a>(
    amount: Money<'a, Currency>,
    denominations: &Denominations,
) -> Result<ChangeSolution<'a>, ChangeError> {
    ChangeMaker::default().make_change(amount, denominations)
}

/// Make change largest denomination first.
///
/// # Errors
///
/// See [`ChangeMaker::make_change`].
#[deprecated(note = "use `make_change`, or `make_optimal_change` for the fewest units")]
pub fn min_change<'a>(
    amount: Money<'a, Currency>,
    denominations: &Denominations,
) -> Result<ChangeSolution<'a>, ChangeError> {
    make_change(amount, denominations)
}

/// Make change with the fewest units.
///
/// # Errors
///
/// See [`ChangeMaker::make_optimal_change`].
pub fn make_optimal_change<'a>(
    amount: Money<'a, Currency>,
    denominations: &Denominations,
) -> Result<OptimalChangeSolution<'a>, ChangeError> {
    ChangeMaker::default().make_optimal_change(amount, denominations)
}

/// An amount and its denominations expressed in whole minimal units.
#[derive(Debug)]
struct Normalized<'a> {
    amount: Money<'a, Currency>,
    precision: Precision,

    /// Whole minimal units of the amount
    target: u64,

    /// Sub-unit digits of the amount
    leftover: Decimal,

    /// Minimal units of each denomination, largest first
    units: SmallVec<[u64; 8]>,
}

impl<'a> Normalized<'a> {
    fn new(
        amount: Money<'a, Currency>,
        denominations: &Denominations,
    ) -> Result<Self, ChangeError> {
        let value = *amount.amount();

        if value <= Decimal::ZERO {
            return Err(ChangeError::NonPositiveAmount(value));
        }

        let precision = Precision::of(amount.currency())?;
        let whole = precision.truncate(value);

        let target = precision
            .whole_units(whole)
            .and_then(|units| units.to_u64())
            .ok_or(ChangeError::Overflow)?;

        let units: SmallVec<[u64; 8]> = denominations
            .iter()
            .map(|denomination| {
                precision
                    .whole_units(denomination.value())
                    .ok_or(ChangeError::DenominationPrecision {
                        denomination: *denomination,
                        unit: precision.unit(),
                    })?
                    .to_u64()
                    .ok_or(ChangeError::Overflow)
            })
            .collect::<Result<_, _>>()?;

        debug!(
            target_units = target,
            leftover = %(value - whole),
            "normalized amount to minimal units"
        );

        Ok(Self {
            amount,
            precision,
            target,
            leftover: value - whole,
            units,
        })
    }

    /// Denomination units as table offsets.
    fn table_units(&self) -> Result<SmallVec<[usize; 8]>, ChangeError> {
        self.units
            .iter()
            .map(|unit| unit.to_usize().ok_or(ChangeError::Overflow))
            .collect()
    }

    /// Build a solution from per-denomination quantities covering `covered` units.
    fn solution(
        &self,
        strategy: ChangeStrategy,
        denominations: &Denominations,
        quantities: &[u64],
        covered: u64,
    ) -> Result<ChangeSolution<'a>, ChangeError> {
        let currency = self.amount.currency();

        let parts = denominations
            .iter()
            .zip(quantities)
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(denomination, quantity)| Change {
                denomination: *denomination,
                quantity: *quantity,
            })
            .collect();

        let covered = self
            .precision
            .amount_of(covered)
            .ok_or(ChangeError::Overflow)?;

        let remainder = self
            .amount
            .amount()
            .checked_sub(covered)
            .ok_or(ChangeError::Overflow)?;

        Ok(ChangeSolution {
            strategy,
            amount: self.amount,
            parts,
            covered: Money::from_decimal(covered, currency),
            remainder: Money::from_decimal(remainder, currency),
        })
    }
}
