//! Allocation
//!
//! Splits a monetary amount into shares, either equally or weighted by
//! [`Ratios`], so that the shares add back up to the amount as closely as the
//! currency's minimal unit allows.

use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    allocation::{
        ratios::{RatioError, Ratios},
        remainder::{RemainderOrder, RemainderPolicy},
    },
    precision::{Precision, PrecisionError},
};

pub mod ratios;
pub mod remainder;

/// Errors that can occur while allocating an amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// Equal allocation was asked for zero shares.
    #[error("share count must be positive")]
    InvalidShareCount,

    /// Wrapped ratio collection error.
    #[error(transparent)]
    Ratio(#[from] RatioError),

    /// Wrapped currency precision error.
    #[error(transparent)]
    Precision(#[from] PrecisionError),

    /// A remainder policy pointed outside the shares.
    #[error("remainder policy chose share {index} but there are only {count} shares")]
    PolicyIndexOutOfRange {
        /// Index returned by the policy
        index: usize,

        /// Number of shares
        count: usize,
    },

    /// A share could not be represented as a decimal.
    #[error("allocation arithmetic overflowed")]
    Overflow,
}

/// The outcome of splitting an amount into shares.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation<'a> {
    /// Amount that was allocated
    amount: Money<'a, Currency>,

    /// Shares, in ratio order
    shares: SmallVec<[Money<'a, Currency>; 8]>,

    /// Sum of all shares
    total_allocated: Money<'a, Currency>,

    /// `amount - total_allocated`
    remainder: Money<'a, Currency>,

    /// Precision of the amount's currency
    precision: Precision,
}

impl<'a> Allocation<'a> {
    /// Amount that was allocated.
    #[must_use]
    pub fn amount(&self) -> Money<'a, Currency> {
        self.amount
    }

    /// Shares, in the order of the ratios they were allocated by.
    #[must_use]
    pub fn shares(&self) -> &[Money<'a, Currency>] {
        &self.shares
    }

    /// Share at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Money<'a, Currency>> {
        self.shares.get(index).copied()
    }

    /// Number of shares.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shares.len()
    }

    /// Whether there are no shares. Never true for a successful allocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Iterate the shares in order.
    pub fn iter(&self) -> impl Iterator<Item = &Money<'a, Currency>> {
        self.shares.iter()
    }

    /// Sum of all shares.
    #[must_use]
    pub fn total_allocated(&self) -> Money<'a, Currency> {
        self.total_allocated
    }

    /// Portion of the amount that could not be allocated.
    #[must_use]
    pub fn remainder(&self) -> Money<'a, Currency> {
        self.remainder
    }

    /// Whether the whole amount was allocated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.remainder.amount().is_zero()
    }

    /// Whether whatever was not allocated is smaller than the currency's minimal unit.
    ///
    /// Only an amount that itself carries sub-unit digits leaves such a remainder.
    #[must_use]
    pub fn is_quasi_complete(&self) -> bool {
        self.remainder.amount().abs() < self.precision.unit()
    }

    /// Precision of the allocated currency.
    #[must_use]
    pub fn precision(&self) -> Precision {
        self.precision
    }
}

/// Split `amount` into `count` equal shares, handing leftover units out first to last.
///
/// # Errors
///
/// See [`allocate_equal_with`].
pub fn allocate_equal<'a>(
    amount: Money<'a, Currency>,
    count: usize,
) -> Result<Allocation<'a>, AllocationError> {
    allocate_equal_with(amount, count, &RemainderOrder::default())
}

/// Split `amount` into `count` equal shares, handing leftover units out in `policy` order.
///
/// # Errors
///
/// - [`AllocationError::InvalidShareCount`]: `count` is zero.
/// - [`AllocationError::Precision`]: the currency's precision is unsupported.
/// - [`AllocationError::PolicyIndexOutOfRange`]: `policy` chose a share that does not exist.
/// - [`AllocationError::Overflow`]: a share cannot be represented.
pub fn allocate_equal_with<'a, P: RemainderPolicy>(
    amount: Money<'a, Currency>,
    count: usize,
    policy: &P,
) -> Result<Allocation<'a>, AllocationError> {
    if count == 0 {
        return Err(AllocationError::InvalidShareCount);
    }

    let ratios = Ratios::equal(count)?;

    allocate_by_ratio_with(amount, &ratios, policy)
}

/// Split `amount` by `ratios`, handing leftover units out first to last.
///
/// # Errors
///
/// See [`allocate_by_ratio_with`].
pub fn allocate_by_ratio<'a>(
    amount: Money<'a, Currency>,
    ratios: &Ratios,
) -> Result<Allocation<'a>, AllocationError> {
    allocate_by_ratio_with(amount, ratios, &RemainderOrder::default())
}

/// Split `amount` by `ratios`, handing leftover units out in `policy` order.
///
/// The amount is truncated onto whole minimal units, each share is rounded
/// down onto the minimal unit, and the units that rounding left behind are
/// handed back one at a time. Any sub-unit digits of `amount` stay in the
/// remainder.
///
/// # Errors
///
/// - [`AllocationError::Precision`]: the currency's precision is unsupported.
/// - [`AllocationError::PolicyIndexOutOfRange`]: `policy` chose a share that does not exist.
/// - [`AllocationError::Overflow`]: a share cannot be represented.
#[tracing::instrument(
    name = "allocation.allocate_by_ratio",
    skip_all,
    fields(
        amount = %amount.amount(),
        currency = amount.currency().iso_alpha_code,
        shares = ratios.len(),
    ),
    err
)]
pub fn allocate_by_ratio_with<'a, P: RemainderPolicy>(
    amount: Money<'a, Currency>,
    ratios: &Ratios,
    policy: &P,
) -> Result<Allocation<'a>, AllocationError> {
    let currency = amount.currency();
    let precision = Precision::of(currency)?;
    let whole = precision.truncate(*amount.amount());

    let mut shares = provisional_shares(whole, ratios, precision)?;

    distribute_shortfall(&mut shares, whole, precision, policy)?;

    let total = shares
        .iter()
        .try_fold(Decimal::ZERO, |acc, share| acc.checked_add(*share))
        .ok_or(AllocationError::Overflow)?;

    let remainder = amount
        .amount()
        .checked_sub(total)
        .ok_or(AllocationError::Overflow)?;

    Ok(Allocation {
        amount,
        shares: shares
            .into_iter()
            .map(|share| Money::from_decimal(share, currency))
            .collect(),
        total_allocated: Money::from_decimal(total, currency),
        remainder: Money::from_decimal(remainder, currency),
        precision,
    })
}

/// Weigh `whole` by each ratio and round every share onto the minimal unit.
fn provisional_shares(
    whole: Decimal,
    ratios: &Ratios,
    precision: Precision,
) -> Result<SmallVec<[Decimal; 8]>, AllocationError> {
    ratios
        .iter()
        .map(|ratio| {
            whole
                .checked_mul(*ratio)
                .and_then(|weighted| weighted.checked_div(ratios.total()))
                .or_else(|| {
                    // Near the top of the decimal range, weigh by the fraction instead.
                    ratio
                        .checked_div(ratios.total())
                        .and_then(|fraction| whole.checked_mul(fraction))
                })
                .map(|raw| precision.round(raw))
                .ok_or(AllocationError::Overflow)
        })
        .collect()
}

/// Hand the minimal units lost to rounding back to the shares, one at a time.
fn distribute_shortfall<P: RemainderPolicy>(
    shares: &mut [Decimal],
    whole: Decimal,
    precision: Precision,
    policy: &P,
) -> Result<(), AllocationError> {
    let provisional = shares
        .iter()
        .try_fold(Decimal::ZERO, |acc, share| acc.checked_add(*share))
        .ok_or(AllocationError::Overflow)?;

    let signed_shortfall = whole
        .checked_sub(provisional)
        .and_then(|shortfall| precision.whole_units(shortfall))
        .ok_or(AllocationError::Overflow)?;

    let shortfall = signed_shortfall
        .abs()
        .to_usize()
        .ok_or(AllocationError::Overflow)?;

    if shortfall == 0 {
        return Ok(());
    }

    let step = if signed_shortfall.is_sign_negative() {
        -precision.unit()
    } else {
        precision.unit()
    };

    let count = shares.len();

    debug!(shortfall, count, "distributing leftover minimal units");

    for index in policy.order(count).take(shortfall) {
        let share = shares
            .get_mut(index)
            .ok_or(AllocationError::PolicyIndexOutOfRange { index, count })?;

        *share += step;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use rusty_money::iso::{JPY, USD};
    use testresult::TestResult;

    use super::*;

    fn usd(amount: Decimal) -> Money<'static, Currency> {
        Money::from_decimal(amount, USD)
    }

    fn amounts(allocation: &Allocation<'_>) -> Vec<Decimal> {
        allocation.iter().map(|share| *share.amount()).collect()
    }

    struct OutOfRange;

    impl RemainderPolicy for OutOfRange {
        fn index_at(&self, count: usize, _step: usize) -> usize {
            count + 10
        }
    }

    #[test]
    fn exact_split_is_complete() -> TestResult {
        let ratios = Ratios::new([dec!(0.5), dec!(0.2), dec!(0.3)])?;
        let allocation = allocate_by_ratio(usd(dec!(10)), &ratios)?;

        assert_eq!(amounts(&allocation), vec![dec!(5), dec!(2), dec!(3)]);
        assert_eq!(allocation.total_allocated(), usd(dec!(10)));
        assert_eq!(allocation.remainder(), usd(Decimal::ZERO));
        assert!(allocation.is_complete());
        assert!(allocation.is_quasi_complete());

        Ok(())
    }

    #[test]
    fn leftover_unit_goes_to_first_share_by_default() -> TestResult {
        let ratios = Ratios::new([dec!(0.3), dec!(0.7)])?;
        let allocation = allocate_by_ratio(usd(dec!(0.05)), &ratios)?;

        assert_eq!(amounts(&allocation), vec![dec!(0.02), dec!(0.03)]);
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn leftover_unit_goes_to_last_share_last_to_first() -> TestResult {
        let ratios = Ratios::new([dec!(0.3), dec!(0.7)])?;
        let allocation =
            allocate_by_ratio_with(usd(dec!(0.05)), &ratios, &RemainderOrder::LastToFirst)?;

        assert_eq!(amounts(&allocation), vec![dec!(0.01), dec!(0.04)]);
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn sub_unit_amount_is_quasi_complete() -> TestResult {
        let allocation = allocate_equal(usd(dec!(0.001)), 2)?;

        assert_eq!(amounts(&allocation), vec![Decimal::ZERO, Decimal::ZERO]);
        assert_eq!(allocation.total_allocated(), usd(Decimal::ZERO));
        assert_eq!(allocation.remainder(), usd(dec!(0.001)));
        assert!(!allocation.is_complete());
        assert!(allocation.is_quasi_complete());

        Ok(())
    }

    #[test]
    fn equal_thirds_spread_leftovers() -> TestResult {
        let forwards = allocate_equal(usd(dec!(100)), 3)?;
        let backwards = allocate_equal_with(usd(dec!(100)), 3, &RemainderOrder::LastToFirst)?;

        assert_eq!(amounts(&forwards), vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
        assert_eq!(amounts(&backwards), vec![dec!(33.33), dec!(33.33), dec!(33.34)]);
        assert!(forwards.is_complete());
        assert!(backwards.is_complete());

        Ok(())
    }

    #[test]
    fn sub_unit_digits_stay_in_remainder() -> TestResult {
        let allocation = allocate_equal(usd(dec!(10.005)), 3)?;

        assert_eq!(amounts(&allocation), vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
        assert_eq!(allocation.remainder(), usd(dec!(0.005)));
        assert!(allocation.is_quasi_complete());

        Ok(())
    }

    #[test]
    fn relative_ratios_are_normalized() -> TestResult {
        let ratios = Ratios::new([dec!(1), dec!(3)])?;
        let allocation = allocate_by_ratio(usd(dec!(10)), &ratios)?;

        assert_eq!(amounts(&allocation), vec![dec!(2.5), dec!(7.5)]);
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn negative_amounts_mirror_positive_ones() -> TestResult {
        let ratios = Ratios::new([dec!(0.3), dec!(0.7)])?;
        let allocation = allocate_by_ratio(usd(dec!(-0.05)), &ratios)?;

        assert_eq!(amounts(&allocation), vec![dec!(-0.02), dec!(-0.03)]);
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn zero_decimal_currency_allocates_whole_units() -> TestResult {
        let allocation = allocate_equal(Money::from_decimal(dec!(100), JPY), 3)?;

        assert_eq!(amounts(&allocation), vec![dec!(34), dec!(33), dec!(33)]);
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn zero_ratio_receives_nothing() -> TestResult {
        let ratios = Ratios::new([dec!(0), dec!(1)])?;
        let allocation = allocate_by_ratio(usd(dec!(1)), &ratios)?;

        assert_eq!(amounts(&allocation), vec![Decimal::ZERO, dec!(1)]);

        Ok(())
    }

    #[test]
    fn large_amounts_with_heavy_weights_do_not_overflow() -> TestResult {
        let whole = Decimal::from_i128_with_scale(40_000_000_000_000_000_000_000_000_000, 0);
        let ratios = Ratios::new([dec!(2), dec!(1)])?;

        assert!(whole.checked_mul(dec!(2)).is_none());

        let allocation = allocate_by_ratio(usd(whole), &ratios)?;

        assert_eq!(allocation.len(), 2);
        assert_eq!(
            *allocation.total_allocated().amount() + *allocation.remainder().amount(),
            whole
        );
        assert!(allocation.is_complete());

        Ok(())
    }

    #[test]
    fn zero_shares_is_invalid() {
        assert_eq!(
            allocate_equal(usd(dec!(1)), 0),
            Err(AllocationError::InvalidShareCount)
        );
    }

    #[test]
    fn out_of_range_policy_is_reported() -> TestResult {
        let ratios = Ratios::new([dec!(0.3), dec!(0.7)])?;

        assert_eq!(
            allocate_by_ratio_with(usd(dec!(0.05)), &ratios, &OutOfRange),
            Err(AllocationError::PolicyIndexOutOfRange {
                index: 12,
                count: 2
            })
        );

        Ok(())
    }

    #[test]
    fn accessors_expose_shares() -> TestResult {
        let allocation = allocate_equal(usd(dec!(1)), 4)?;

        assert_eq!(allocation.len(), 4);
        assert!(!allocation.is_empty());
        assert_eq!(allocation.get(3), Some(usd(dec!(0.25))));
        assert_eq!(allocation.get(4), None);
        assert_eq!(allocation.amount(), usd(dec!(1)));
        assert_eq!(allocation.shares().len(), 4);
        assert_eq!(allocation.precision().digits(), 2);

        Ok(())
    }
}
