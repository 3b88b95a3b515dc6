use rand::Rng;

use crate::data::formatter::format;
use crate::data::row::{FormattedRow, Row};
use crate::error::{Result, SortError};

/// Widest number that still fits in a `u64` with every value of that width.
pub const MAX_DIGITS: u32 = 19;

/// Draws a uniformly distributed integer with exactly `length` decimal
/// digits, i.e. from `10^(length-1) ..= 10^length - 1`.
pub fn random_fixed_length_integer<R: Rng + ?Sized>(length: u32, rng: &mut R) -> Result<u64> {
    let (low, high) = fixed_length_range(length)?;
    Ok(rng.gen_range(low..=high))
}

fn fixed_length_range(length: u32) -> Result<(u64, u64)> {
    if length == 0 || length > MAX_DIGITS {
        return Err(SortError::InvalidConfig(format!(
            "digits per number must be in 1..={MAX_DIGITS}, got {length}"
        )));
    }
    Ok((10u64.pow(length - 1), 10u64.pow(length) - 1))
}

/// Generates `total_count` rows of `count_per_row` random `digits`-wide numbers.
pub fn generate<R: Rng + ?Sized>(
    total_count: usize,
    count_per_row: usize,
    digits: u32,
    rng: &mut R,
) -> Result<Vec<Row>> {
    generate_with(total_count, count_per_row, digits, |length| {
        random_fixed_length_integer(length, rng)
    })
}

/// Like [`generate`], but every number comes from `draw(digits)`.
///
/// Draws that do not have exactly `digits` decimal digits are rejected, so the
/// fixed-width invariant of the formatted dataset holds by construction.
pub fn generate_with<F>(
    total_count: usize,
    count_per_row: usize,
    digits: u32,
    mut draw: F,
) -> Result<Vec<Row>>
where
    F: FnMut(u32) -> Result<u64>,
{
    let (low, high) = fixed_length_range(digits)?;
    if count_per_row == 0 {
        return Err(SortError::InvalidConfig(
            "numbers per row must be at least 1".into(),
        ));
    }

    let mut rows = Vec::with_capacity(total_count);
    for _ in 0..total_count {
        let mut numbers = Vec::with_capacity(count_per_row);
        for _ in 0..count_per_row {
            let n = draw(digits)?;
            if !(low..=high).contains(&n) {
                return Err(SortError::InvalidConfig(format!(
                    "drawn number {n} does not have exactly {digits} digits"
                )));
            }
            numbers.push(n);
        }
        rows.push(Row::from_unsorted(numbers));
    }
    Ok(rows)
}

/// `format(generate(..))` in one step.
pub fn generate_formatted<R: Rng + ?Sized>(
    total_count: usize,
    count_per_row: usize,
    digits: u32,
    rng: &mut R,
) -> Result<Vec<FormattedRow>> {
    Ok(format(&generate(total_count, count_per_row, digits, rng)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn fixed_length_integers_stay_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for length in 1..=MAX_DIGITS {
            for _ in 0..50 {
                let n = random_fixed_length_integer(length, &mut rng).unwrap();
                assert_eq!(n.to_string().len(), length as usize);
            }
        }
    }

    #[test]
    fn rejects_unrepresentable_lengths() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(matches!(
            random_fixed_length_integer(0, &mut rng),
            Err(SortError::InvalidConfig(_))
        ));
        assert!(random_fixed_length_integer(20, &mut rng).is_err());
    }

    #[test]
    fn mocked_draws_build_sorted_rows() {
        let mut draws = vec![123u64, 456].into_iter();
        let rows = generate_with(1, 2, 3, |_| Ok(draws.next().unwrap())).unwrap();
        assert_eq!(
            rows,
            vec![Row {
                input: vec![123, 456],
                output: vec![123, 456],
            }]
        );
    }

    #[test]
    fn output_is_sorted_numerically_not_lexically() {
        let mut draws = vec![900u64, 100, 250].into_iter();
        let rows = generate_with(1, 3, 3, |_| Ok(draws.next().unwrap())).unwrap();
        assert_eq!(rows[0].input, vec![900, 100, 250]);
        assert_eq!(rows[0].output, vec![100, 250, 900]);
    }

    #[test]
    fn short_draws_are_rejected() {
        let result = generate_with(1, 2, 3, |_| Ok(42));
        assert!(matches!(result, Err(SortError::InvalidConfig(_))));
    }

    #[test]
    fn single_number_rows_are_already_sorted() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for row in generate(20, 1, 4, &mut rng).unwrap() {
            assert_eq!(row.input, row.output);
        }
    }

    #[test]
    fn zero_numbers_per_row_is_a_config_error() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(generate(3, 0, 3, &mut rng).is_err());
    }

    #[test]
    fn same_seed_same_dataset() {
        let a = generate(10, 3, 3, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        let b = generate(10, 3, 3, &mut ChaCha8Rng::seed_from_u64(99)).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn output_is_a_sorted_permutation_of_input(
            seed in any::<u64>(),
            count_per_row in 1usize..6,
            digits in 1u32..=6,
        ) {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let rows = generate(5, count_per_row, digits, &mut rng).unwrap();
            prop_assert_eq!(rows.len(), 5);
            for row in rows {
                prop_assert_eq!(row.input.len(), count_per_row);
                prop_assert!(row.output.windows(2).all(|w| w[0] <= w[1]));
                let mut input = row.input.clone();
                input.sort();
                prop_assert_eq!(input, row.output);
            }
        }
    }
}
