//! Integration tests for proportional allocation through the prelude.

use rust_decimal_macros::dec;
use rusty_money::{
    Money,
    iso::{JPY, USD},
};
use testresult::TestResult;

use coinage::prelude::*;

#[test]
fn settings_choose_who_receives_leftover_units() -> TestResult {
    let ratios = Ratios::new([dec!(0.3), dec!(0.7)])?;
    let amount = Money::from_decimal(dec!(0.05), USD);

    let default = Settings::default();
    let reversed = Settings::from_yaml("remainder_order: last-to-first")?;

    let first = allocate_by_ratio_with(amount, &ratios, &default.remainder_order())?;
    let last = allocate_by_ratio_with(amount, &ratios, &reversed.remainder_order())?;

    assert_eq!(
        first.iter().map(|share| *share.amount()).collect::<Vec<_>>(),
        vec![dec!(0.02), dec!(0.03)]
    );
    assert_eq!(
        last.iter().map(|share| *share.amount()).collect::<Vec<_>>(),
        vec![dec!(0.01), dec!(0.04)]
    );
    assert!(first.is_complete());
    assert!(last.is_complete());

    Ok(())
}

#[test]
fn splitting_a_bill_three_ways() -> TestResult {
    let allocation = allocate_equal(Money::from_decimal(dec!(100), USD), 3)?;

    let shares: Vec<_> = allocation.iter().map(|share| *share.amount()).collect();

    assert_eq!(shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
    assert_eq!(*allocation.total_allocated().amount(), dec!(100));
    assert!(allocation.remainder().amount().is_zero());

    Ok(())
}

#[test]
fn weights_need_not_sum_to_one() -> TestResult {
    let ratios = Ratios::new([dec!(1), dec!(2), dec!(2)])?;

    let allocation = allocate_by_ratio(Money::from_decimal(dec!(1001), JPY), &ratios)?;

    let shares: Vec<_> = allocation.iter().map(|share| *share.amount()).collect();

    assert_eq!(shares, vec![dec!(201), dec!(400), dec!(400)]);
    assert!(allocation.is_complete());

    Ok(())
}

#[test]
fn custom_policies_plug_in() -> TestResult {
    /// Hands every leftover unit to the second share.
    struct SecondShare;

    impl RemainderPolicy for SecondShare {
        fn index_at(&self, _count: usize, _step: usize) -> usize {
            1
        }
    }

    let allocation = allocate_equal_with(Money::from_decimal(dec!(0.05), USD), 3, &SecondShare)?;

    let shares: Vec<_> = allocation.iter().map(|share| *share.amount()).collect();

    assert_eq!(shares, vec![dec!(0.01), dec!(0.03), dec!(0.01)]);

    Ok(())
}

#[test]
fn empty_ratios_are_rejected() {
    let result = Ratios::new([]);

    assert_eq!(result, Err(RatioError::Empty));
}
