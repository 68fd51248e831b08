//! Precision
//!
//! A currency's minimal unit and the rounding rule used to bring allocated
//! shares onto it.

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::iso::Currency;
use thiserror::Error;

/// Largest number of decimal digits a [`Precision`] can carry.
///
/// One digit below [`Decimal`]'s maximum scale so that half a minimal unit is
/// still representable.
pub const MAX_DIGITS: u32 = 27;

/// Errors that can occur while deriving a precision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrecisionError {
    /// The currency declares more decimal digits than can be represented.
    #[error("{digits} decimal digits exceeds the supported maximum of {MAX_DIGITS}")]
    TooManyDigits {
        /// Requested number of decimal digits
        digits: u32,
    },
}

/// Number of significant decimal digits of a currency and its minimal unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Precision {
    digits: u32,
    unit: Decimal,
}

impl Precision {
    /// Create a precision of `digits` decimal digits, so a minimal unit of `10^-digits`.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::TooManyDigits`] if `digits` exceeds [`MAX_DIGITS`].
    pub fn new(digits: u32) -> Result<Self, PrecisionError> {
        if digits > MAX_DIGITS {
            return Err(PrecisionError::TooManyDigits { digits });
        }

        Ok(Self {
            digits,
            unit: Decimal::new(1, digits),
        })
    }

    /// Derive the precision declared by a currency.
    ///
    /// # Errors
    ///
    /// Returns [`PrecisionError::TooManyDigits`] if the currency exponent exceeds [`MAX_DIGITS`].
    pub fn of(currency: &Currency) -> Result<Self, PrecisionError> {
        Self::new(currency.exponent)
    }

    /// Number of significant decimal digits.
    #[must_use]
    pub const fn digits(&self) -> u32 {
        self.digits
    }

    /// Smallest representable increment, `10^-digits`.
    #[must_use]
    pub const fn unit(&self) -> Decimal {
        self.unit
    }

    /// Truncate `amount` toward zero onto a whole number of minimal units.
    #[must_use]
    pub fn truncate(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.digits, RoundingStrategy::ToZero)
    }

    /// Round a raw share onto the minimal unit, resolving exact ties toward zero.
    ///
    /// Half a unit is taken off the share's magnitude before rounding half away
    /// from zero, so the result never has a larger magnitude than `share`.
    #[must_use]
    pub fn round(&self, share: Decimal) -> Decimal {
        if share.is_zero() {
            return Decimal::ZERO;
        }

        let half = self.unit / Decimal::TWO;

        let biased = if share.is_sign_negative() {
            share + half
        } else {
            share - half
        };

        let rounded =
            biased.round_dp_with_strategy(self.digits, RoundingStrategy::MidpointAwayFromZero);

        // `-0.00` compares equal to zero, but keep the sign out of results.
        if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        }
    }

    /// Express `value` as a count of minimal units, if it is a whole number of them.
    #[must_use]
    pub fn whole_units(&self, value: Decimal) -> Option<Decimal> {
        let units = value.checked_div(self.unit)?;

        units.fract().is_zero().then(|| units.trunc())
    }

    /// Convert a count of minimal units back into a decimal amount.
    #[must_use]
    pub fn amount_of(&self, units: u64) -> Option<Decimal> {
        Decimal::from(units).checked_mul(self.unit)
    }
}
