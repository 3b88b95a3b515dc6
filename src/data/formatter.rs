use crate::codec::{digits_of, normalize_digits, Digit};
use crate::data::row::{FormattedRow, ParallelVectors, Row};
use crate::error::{Result, SortError};

/// Flattens every number of every row into its digits, in row order.
///
/// `[{ input: [987, 123], output: [123, 987] }]` becomes
/// `[{ input: [9,8,7,1,2,3], output: [1,2,3,9,8,7] }]`.
pub fn format(rows: &[Row]) -> Vec<FormattedRow> {
    rows.iter()
        .map(|row| FormattedRow {
            input: flatten(&row.input),
            output: flatten(&row.output),
        })
        .collect()
}

fn flatten(numbers: &[u64]) -> Vec<Digit> {
    numbers.iter().flat_map(|&n| digits_of(n)).collect()
}

/// Turns a query line such as `"321,145"` into a single formatted row whose
/// expected output is the line's own ascending sort.
pub fn format_single_input(line: &str) -> Result<Vec<FormattedRow>> {
    let numbers = parse_number_list(line)?;
    Ok(format(&[Row::from_unsorted(numbers)]))
}

fn parse_number_list(line: &str) -> Result<Vec<u64>> {
    let line = line.trim();
    if line.is_empty() {
        return Err(SortError::MalformedInput("empty line".into()));
    }
    line.split(',')
        .map(|cell| {
            let cell = cell.trim();
            let malformed =
                || SortError::MalformedInput(format!("'{cell}' is not a non-negative integer"));
            let plain_digits = !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit());
            if !plain_digits || (cell.len() > 1 && cell.starts_with('0')) {
                return Err(malformed());
            }
            cell.parse::<u64>().map_err(|_| malformed())
        })
        .collect()
}

/// Regroups formatted rows into two parallel batches of normalized values.
pub fn to_parallel_vectors(rows: &[FormattedRow]) -> ParallelVectors {
    let (inputs, outputs) = rows
        .iter()
        .map(|row| (normalize_digits(&row.input), normalize_digits(&row.output)))
        .unzip();
    ParallelVectors { inputs, outputs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::generate;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn d(values: &[u8]) -> Vec<Digit> {
        values.iter().map(|&v| Digit::new(v).unwrap()).collect()
    }

    #[test]
    fn flattens_numbers_in_order() {
        let rows = vec![Row {
            input: vec![123, 456],
            output: vec![123, 456],
        }];
        assert_eq!(
            format(&rows),
            vec![FormattedRow {
                input: d(&[1, 2, 3, 4, 5, 6]),
                output: d(&[1, 2, 3, 4, 5, 6]),
            }]
        );
    }

    #[test]
    fn single_input_sorts_locally() {
        let rows = format_single_input("321,145").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].input, d(&[3, 2, 1, 1, 4, 5]));
        assert_eq!(rows[0].output, d(&[1, 4, 5, 3, 2, 1]));
    }

    #[test]
    fn single_input_tolerates_whitespace_and_trailing_newline() {
        let rows = format_single_input(" 987 , 123\n").unwrap();
        assert_eq!(rows[0].output, d(&[1, 2, 3, 9, 8, 7]));
        assert_eq!(format_single_input("0,7").unwrap()[0].input, d(&[0, 7]));
    }

    #[test]
    fn single_input_rejects_garbage() {
        for line in ["", "12,,34", "abc", "1,-2", "3.5,1", "+321,145", "045,123", "12,1 2"] {
            assert!(
                matches!(format_single_input(line), Err(SortError::MalformedInput(_))),
                "accepted {line:?}"
            );
        }
    }

    #[test]
    fn parallel_vectors_keep_row_order() {
        let rows = format_single_input("900,111").unwrap();
        let mut all = rows.clone();
        all.extend(format_single_input("222,333").unwrap());

        let parallel = to_parallel_vectors(&all);
        assert_eq!(parallel.len(), 2);
        assert_eq!(parallel.inputs[0][0], 1.0);
        assert_eq!(parallel.outputs[0][0], 1.0 / 9.0);
        assert_eq!(parallel.inputs[1][0], 2.0 / 9.0);
        assert_eq!(parallel.outputs[1][5], 3.0 / 9.0);
    }

    #[test]
    fn parallel_vectors_of_nothing_is_empty() {
        assert!(to_parallel_vectors(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn flattening_preserves_digit_count(seed in any::<u64>(), count in 1usize..5, digits in 1u32..=8) {
            let rows = generate(4, count, digits, &mut ChaCha8Rng::seed_from_u64(seed)).unwrap();
            for (row, formatted) in rows.iter().zip(format(&rows)) {
                let total: usize = row.input.iter().map(|&n| digits_of(n).len()).sum();
                prop_assert_eq!(total, formatted.input.len());
                prop_assert_eq!(formatted.input.len(), count * digits as usize);
                prop_assert_eq!(formatted.output.len(), formatted.input.len());
            }
        }
    }
}
