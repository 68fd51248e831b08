//! Ratios

use std::slice;

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// Errors that can occur while building a ratio collection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RatioError {
    /// No ratios were provided.
    #[error("a ratio collection needs at least one ratio")]
    Empty,

    /// A ratio was below zero.
    #[error("ratio at index {index} is negative: {value}")]
    Negative {
        /// Position of the offending ratio
        index: usize,

        /// The offending ratio
        value: Decimal,
    },

    /// Every ratio was zero, so there is nothing to weigh the shares against.
    #[error("ratios sum to zero")]
    ZeroTotal,

    /// The ratios are too large to be summed.
    #[error("ratio total overflowed")]
    TotalOverflow,
}

/// An ordered, non-empty collection of non-negative relative weights.
///
/// Ratios are relative: `(1, 3)` splits the same way as `(0.25, 0.75)`. Order
/// is significant, it fixes the order of the allocated shares and the order in
/// which leftover minimal units are handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ratios {
    values: SmallVec<[Decimal; 8]>,
    total: Decimal,
}

impl Ratios {
    /// Build a ratio collection from the given weights.
    ///
    /// # Errors
    ///
    /// - [`RatioError::Empty`]: no weights were given.
    /// - [`RatioError::Negative`]: a weight was below zero.
    /// - [`RatioError::ZeroTotal`]: every weight was zero.
    /// - [`RatioError::TotalOverflow`]: the weights could not be summed.
    pub fn new(values: impl IntoIterator<Item = Decimal>) -> Result<Self, RatioError> {
        let values: SmallVec<[Decimal; 8]> = values.into_iter().collect();

        if values.is_empty() {
            return Err(RatioError::Empty);
        }

        let mut total = Decimal::ZERO;

        for (index, value) in values.iter().enumerate() {
            if value.is_sign_negative() && !value.is_zero() {
                return Err(RatioError::Negative {
                    index,
                    value: *value,
                });
            }

            total = total
                .checked_add(*value)
                .ok_or(RatioError::TotalOverflow)?;
        }

        if total.is_zero() {
            return Err(RatioError::ZeroTotal);
        }

        Ok(Self { values, total })
    }

    /// `count` equal weights.
    ///
    /// # Errors
    ///
    /// Returns [`RatioError::Empty`] if `count` is zero.
    pub fn equal(count: usize) -> Result<Self, RatioError> {
        Self::new(std::iter::repeat_n(Decimal::ONE, count))
    }

    /// Number of ratios (and therefore shares).
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a ratio collection cannot be empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.total
    }

    /// Weight at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Decimal> {
        self.values.get(index).copied()
    }

    /// Iterate the weights in order.
    pub fn iter(&self) -> slice::Iter<'_, Decimal> {
        self.values.iter()
    }

    /// Whether the weights already sum to exactly one.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        self.total == Decimal::ONE
    }
}

impl<'a> IntoIterator for &'a Ratios {
    type Item = &'a Decimal;
    type IntoIter = slice::Iter<'a, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<&[Decimal]> for Ratios {
    type Error = RatioError;

    fn try_from(values: &[Decimal]) -> Result<Self, Self::Error> {
        Self::new(values.iter().copied())
    }
}

impl TryFrom<Vec<Decimal>> for Ratios {
    type Error = RatioError;

    fn try_from(values: Vec<Decimal>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
