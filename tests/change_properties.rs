//! Property tests for change making.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rusty_money::{Money, iso};

use coinage::change::{
    count_ways_to_make_change,
    denominations::{Denomination, Denominations},
    make_change, make_optimal_change,
};

/// Denomination sets in cents, canonical or not.
fn denominations_strategy() -> impl Strategy<Value = Denominations> {
    prop::collection::vec(1i64..=500, 1..6).prop_map(|cents| {
        cents
            .into_iter()
            .filter_map(|cent| Denomination::new(Decimal::new(cent, 2)).ok())
            .collect()
    })
}

proptest! {
    #[test]
    fn covered_and_remainder_add_up_to_the_amount(
        cents in 1i64..20_000,
        denominations in denominations_strategy(),
    ) {
        let value = Decimal::new(cents, 2);
        let amount = Money::from_decimal(value, iso::USD);

        let greedy = make_change(amount, &denominations)?;
        let optimal = make_optimal_change(amount, &denominations)?;

        for solution in [&greedy, &optimal] {
            let used: Decimal = solution
                .iter()
                .map(|part| part.denomination().value() * Decimal::from(part.quantity()))
                .sum();

            prop_assert_eq!(used, *solution.covered().amount());
            prop_assert_eq!(used + *solution.remainder().amount(), value);
            prop_assert!(!solution.remainder().amount().is_sign_negative());
        }
    }

    #[test]
    fn optimal_never_uses_more_units_than_greedy(
        cents in 1i64..20_000,
        denominations in denominations_strategy(),
    ) {
        let amount = Money::from_decimal(Decimal::new(cents, 2), iso::USD);

        let greedy = make_change(amount, &denominations)?;
        let optimal = make_optimal_change(amount, &denominations)?;

        prop_assert!(optimal.covered().amount() >= greedy.covered().amount());

        if greedy.is_complete() {
            prop_assert!(optimal.is_complete());
            prop_assert!(optimal.total_count() <= greedy.total_count());
        }
    }

    #[test]
    fn exact_change_exists_exactly_when_there_are_ways(
        cents in 1i64..2_000,
        denominations in denominations_strategy(),
    ) {
        let amount = Money::from_decimal(Decimal::new(cents, 2), iso::USD);

        let ways = count_ways_to_make_change(amount, &denominations)?;
        let optimal = make_optimal_change(amount, &denominations)?;

        prop_assert_eq!(ways > 0, optimal.is_complete());
    }
}
