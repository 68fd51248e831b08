//! Remainder Ordering
//!
//! Once every share has been rounded onto the minimal unit, the units left
//! over are handed out one at a time. A [`RemainderPolicy`] decides which share
//! receives each of them.

use serde::Deserialize;

/// Decides the order in which leftover minimal units are assigned to shares.
pub trait RemainderPolicy {
    /// Index of the share that receives the `step`-th leftover unit when there
    /// are `count` shares.
    ///
    /// Implementations must return an index below `count` and should cycle,
    /// since there can be more leftover units than shares.
    fn index_at(&self, count: usize, step: usize) -> usize;

    /// Infinite, cyclic sequence of share indexes.
    fn order(&self, count: usize) -> impl Iterator<Item = usize> + '_
    where
        Self: Sized,
    {
        (0..).map(move |step| self.index_at(count, step))
    }
}

/// Built-in remainder orders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemainderOrder {
    /// `0, 1, …, n-1, 0, 1, …`
    #[default]
    FirstToLast,

    /// `n-1, …, 0, n-1, …`
    LastToFirst,
}

impl RemainderPolicy for RemainderOrder {
    fn index_at(&self, count: usize, step: usize) -> usize {
        let offset = step.checked_rem(count).unwrap_or(0);

        match self {
            RemainderOrder::FirstToLast => offset,
            RemainderOrder::LastToFirst => count.saturating_sub(1).saturating_sub(offset),
        }
    }
}
