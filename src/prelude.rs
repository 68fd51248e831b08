//! Coinage prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    allocation::{
        Allocation, AllocationError, allocate_by_ratio, allocate_by_ratio_with, allocate_equal,
        allocate_equal_with,
        ratios::{RatioError, Ratios},
        remainder::{RemainderOrder, RemainderPolicy},
    },
    change::{
        Change, ChangeError, ChangeMaker, ChangeSolution, ChangeStrategy, OptimalChangeSolution,
        count_ways_to_make_change,
        denominations::{Denomination, DenominationError, Denominations},
        make_change, make_optimal_change,
    },
    fixtures::{DenominationSet, Fixture, FixtureError},
    precision::{Precision, PrecisionError},
    report::{ReportError, write_allocation, write_change},
    settings::{Settings, SettingsError},
};
