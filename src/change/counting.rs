//! Combination Counting

/// Number of distinct multisets of `units` that add up to exactly `target`.
///
/// Each unit may be used any number of times and orderings are not told apart.
/// Returns `None` if the count does not fit in a `u128`.
pub(crate) fn count_ways(target: usize, units: &[usize]) -> Option<u128> {
    let mut ways = vec![0_u128; target.checked_add(1)?];

    if let Some(zero) = ways.first_mut() {
        *zero = 1;
    }

    for unit in units {
        for amount in *unit..=target {
            let previous = ways.get(amount - unit).copied().unwrap_or(0);

            if let Some(slot) = ways.get_mut(amount) {
                *slot = slot.checked_add(previous)?;
            }
        }
    }

    ways.get(target).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn us_coins_make_sixty_three_cents_seventy_three_ways() {
        assert_eq!(count_ways(63, &[25, 10, 5, 1]), Some(73));
    }

    #[test]
    fn order_of_units_does_not_matter() {
        assert_eq!(count_ways(63, &[1, 5, 10, 25]), Some(73));
    }

    #[test]
    fn zero_target_has_one_way() {
        assert_eq!(count_ways(0, &[3, 7]), Some(1));
    }

    #[test]
    fn unreachable_target_has_no_ways() {
        assert_eq!(count_ways(7, &[4, 2]), Some(0));
        assert_eq!(count_ways(5, &[]), Some(0));
    }

    #[test]
    fn small_textbook_case() {
        // {1+1+1+1, 1+1+2, 2+2, 1+3}
        assert_eq!(count_ways(4, &[1, 2, 3]), Some(4));
    }

    #[test]
    fn overflowing_count_is_none() {
        // p(2000) is roughly 4.7e45, well past u128::MAX.
        let units: Vec<usize> = (1..=2000).collect();

        assert_eq!(count_ways(2000, &units), None);
    }
}
