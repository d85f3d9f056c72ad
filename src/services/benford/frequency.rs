//! Leading-digit frequency aggregation for a selected column.

use super::digits::{leading_digit, parse_numeric};
use super::types::{FrequencyTable, RawTable, DIGIT_CATEGORIES};
use super::EngineError;

/// Benford's Law probability for leading digit `digit` (1..=9):
/// `log10(1 + 1/d)`.
pub fn benford_probability(digit: u8) -> f64 {
    (1.0 + 1.0 / f64::from(digit)).log10()
}

/// Walk every data row of the selected column, extract leading digits, and
/// build the observed/expected table. Cells that are missing, fail the
/// strict numeric parse, or equal zero are counted as excluded; the expected
/// counts are scaled to the rows that remain.
pub fn analyze_column(
    table: &RawTable,
    index: usize,
    has_header: bool,
) -> Result<FrequencyTable, EngineError> {
    if index >= table.width {
        return Err(EngineError::ColumnOutOfRange {
            index,
            columns: table.width,
        });
    }

    let data = table.data_rows(has_header);
    let mut observed = [0u64; DIGIT_CATEGORIES];
    let mut excluded_count = 0u64;

    for row in data {
        match parse_numeric(&row[index]).and_then(leading_digit) {
            Some(digit) => observed[usize::from(digit) - 1] += 1,
            None => excluded_count += 1,
        }
    }

    let n: u64 = observed.iter().sum();
    let mut expected = [0f64; DIGIT_CATEGORIES];
    for (i, slot) in expected.iter_mut().enumerate() {
        *slot = n as f64 * benford_probability(i as u8 + 1);
    }

    Ok(FrequencyTable {
        observed,
        expected,
        n,
        excluded_count,
        total_rows: data.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::benford::parser::parse_table;

    fn table(input: &str) -> RawTable {
        parse_table(input.as_bytes()).unwrap()
    }

    #[test]
    fn benford_probabilities_match_published_table() {
        // Frequencies from table III of Benford's 1938 paper, in percent.
        let published = [0.301, 0.176, 0.125, 0.097, 0.079, 0.067, 0.058, 0.051, 0.046];
        for (i, &p) in published.iter().enumerate() {
            assert!((benford_probability(i as u8 + 1) - p).abs() < 5e-4);
        }
    }

    #[test]
    fn counts_observed_digits() {
        let input = "v\n0\n0.0\n01\n020\n-$0.3\n.4\n50\n60.0\n70.7\n$808.8\n.09\n";
        let freq = analyze_column(&table(input), 0, true).unwrap();
        // 0 and 0.0 are excluded; the rest cover each digit once.
        assert_eq!(freq.observed, [1; 9]);
        assert_eq!(freq.n, 9);
        assert_eq!(freq.excluded_count, 2);
        assert_eq!(freq.total_rows, 11);
    }

    #[test]
    fn observed_sum_equals_n_and_rows_balance() {
        let input = "k,v\na,12\nb,junk\nc,340\nd,\ne,5.6\nf,0\ng,78\n";
        let freq = analyze_column(&table(input), 1, true).unwrap();
        assert_eq!(freq.observed.iter().sum::<u64>(), freq.n);
        assert_eq!(freq.n + freq.excluded_count, freq.total_rows);
        assert_eq!(freq.n, 4);
        assert_eq!(freq.excluded_count, 3);
    }

    #[test]
    fn expected_counts_sum_to_n() {
        let input = "v\n1\n2\n3\n4\n5\n6\n7\n8\n9\n10\n11\n12\n";
        let freq = analyze_column(&table(input), 0, true).unwrap();
        let sum: f64 = freq.expected.iter().sum();
        let n = freq.n as f64;
        assert!((sum - n).abs() / n < 1e-6, "sum {sum} vs n {n}");
    }

    #[test]
    fn expected_counts_follow_the_law() {
        let input = "v\n1\n2\n3\n4\n";
        let freq = analyze_column(&table(input), 0, true).unwrap();
        for d in 1..=9u8 {
            let want = 4.0 * benford_probability(d);
            assert!((freq.expected[usize::from(d) - 1] - want).abs() < 1e-12);
        }
    }

    #[test]
    fn fifteen_percent_excluded_raises_advisory() {
        let mut input = String::from("v\n");
        for i in 0..85 {
            input.push_str(&format!("{}\n", i + 1));
        }
        for _ in 0..15 {
            input.push_str("junk\n");
        }
        let freq = analyze_column(&table(&input), 0, true).unwrap();
        assert_eq!(freq.n, 85);
        assert_eq!(freq.excluded_count, 15);
        assert!(freq.high_exclusion());
    }

    #[test]
    fn ten_percent_excluded_does_not() {
        let mut input = String::from("v\n");
        for i in 0..90 {
            input.push_str(&format!("{}\n", i + 1));
        }
        for _ in 0..10 {
            input.push_str("junk\n");
        }
        let freq = analyze_column(&table(&input), 0, true).unwrap();
        assert_eq!(freq.excluded_count, 10);
        assert!(!freq.high_exclusion());
    }

    #[test]
    fn out_of_range_column_errors() {
        let err = analyze_column(&table("a,b\n1,2\n"), 5, false).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ColumnOutOfRange { index: 5, columns: 2 }
        ));
    }
}
