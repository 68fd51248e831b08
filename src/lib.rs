//! Coinage
//!
//! Coinage splits fixed-precision money amounts into proportional shares
//! without losing or inventing a single minimal unit, and decomposes amounts
//! into coins and notes: greedily, with the fewest units, or by counting
//! every possible decomposition.

pub mod allocation;
pub mod change;
pub mod fixtures;
pub mod precision;
pub mod prelude;
pub mod report;
pub mod settings;
