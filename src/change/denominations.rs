//! Denominations

use std::{cmp::Reverse, fmt, slice};

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors that can occur while building denominations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DenominationError {
    /// Denominations must be strictly positive.
    #[error("denomination must be positive, got {0}")]
    NotPositive(Decimal),
}

/// A reusable unit of payment, such as a coin or a note.
///
/// Denominations are plain magnitudes; they take on the currency of whatever
/// amount they are used to make change for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denomination(Decimal);

impl Denomination {
    /// Create a denomination of the given magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`DenominationError::NotPositive`] if `value` is zero or negative.
    pub fn new(value: Decimal) -> Result<Self, DenominationError> {
        if value <= Decimal::ZERO {
            return Err(DenominationError::NotPositive(value));
        }

        Ok(Self(value))
    }

    /// Magnitude of the denomination.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Denomination {
    type Error = DenominationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A set of denominations, largest first.
///
/// Duplicates are merged: `{1, 1.00, 5}` is the same set as `{5, 1}`. The
/// first occurrence of a duplicated magnitude is the one kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Denominations {
    values: SmallVec<[Denomination; 8]>,
}

impl Denominations {
    /// Build a set from already validated denominations.
    pub fn new(denominations: impl IntoIterator<Item = Denomination>) -> Self {
        let mut values: SmallVec<[Denomination; 8]> = denominations.into_iter().collect();

        values.sort_by_key(|value| Reverse(*value));
        values.dedup();

        Self { values }
    }

    /// Build a set from raw magnitudes.
    ///
    /// # Errors
    ///
    /// Returns [`DenominationError::NotPositive`] for the first magnitude that is
    /// zero or negative.
    pub fn from_decimals(
        values: impl IntoIterator<Item = Decimal>,
    ) -> Result<Self, DenominationError> {
        let denominations = values
            .into_iter()
            .map(Denomination::new)
            .collect::<Result<SmallVec<[Denomination; 8]>, _>>()?;

        Ok(Self::new(denominations))
    }

    /// Number of distinct denominations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the set has no denominations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest denomination, if any.
    #[must_use]
    pub fn largest(&self) -> Option<Denomination> {
        self.values.first().copied()
    }

    /// Smallest denomination, if any.
    #[must_use]
    pub fn smallest(&self) -> Option<Denomination> {
        self.values.last().copied()
    }

    /// Iterate the denominations, largest first.
    pub fn iter(&self) -> slice::Iter<'_, Denomination> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Denominations {
    type Item = &'a Denomination;
    type IntoIter = slice::Iter<'a, Denomination>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<Denomination> for Denominations {
    fn from_iter<I: IntoIterator<Item = Denomination>>(iter: I) -> Self {
        Self::new(iter)
    }
}
