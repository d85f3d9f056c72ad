//! Column viability classification.
//!
//! A column is offered for analysis only when its data rows are
//! unambiguously numeric: at least one cell parses, and the bad-value ratio
//! (non-empty cells that fail the strict parse, over all data rows) does not
//! strictly exceed 10%. Empty cells are neither good nor bad. Zero values
//! parse fine here; they are only excluded later, when leading digits are
//! extracted.

use rayon::prelude::*;

use super::digits::parse_numeric;
use super::types::{ColumnProfile, RawTable};

pub fn classify_columns(table: &RawTable, has_header: bool) -> Vec<ColumnProfile> {
    let data = table.data_rows(has_header);

    (0..table.width)
        .into_par_iter()
        .map(|index| {
            let mut parseable = 0usize;
            let mut bad = 0usize;
            for row in data {
                let cell = row[index].trim();
                if cell.is_empty() {
                    continue;
                }
                if parse_numeric(cell).is_some() {
                    parseable += 1;
                } else {
                    bad += 1;
                }
            }

            let total = data.len();
            // Integer comparison keeps the 10% boundary exact: 10 bad out of
            // 100 rows is still viable, 11 is not.
            let is_viable = parseable > 0 && bad * 10 <= total;

            ColumnProfile {
                index,
                is_viable,
                display_name: display_name(table, has_header, index),
                bad_value_count: bad,
                total_value_count: total,
            }
        })
        .collect()
}

/// Header cell text when the header flag is set and non-empty, otherwise a
/// synthesized 1-based `#N` label.
pub fn display_name(table: &RawTable, has_header: bool, index: usize) -> String {
    if has_header {
        if let Some(first) = table.rows.first() {
            let name = first[index].trim();
            if !name.is_empty() {
                return name.to_string();
            }
        }
    }
    format!("#{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::benford::parser::parse_table;

    fn table(input: &str) -> RawTable {
        parse_table(input.as_bytes()).unwrap()
    }

    #[test]
    fn numeric_columns_are_viable() {
        let table = table("name,amount\nrent,1200\nfood,350\nfuel,90\n");
        let profiles = classify_columns(&table, true);
        assert!(!profiles[0].is_viable);
        assert!(profiles[1].is_viable);
        assert_eq!(profiles[1].display_name, "amount");
        assert_eq!(profiles[1].bad_value_count, 0);
        assert_eq!(profiles[1].total_value_count, 3);
    }

    #[test]
    fn synthesized_names_without_header() {
        let table = table("10,20\n30,40\n");
        let profiles = classify_columns(&table, false);
        assert_eq!(profiles[0].display_name, "#1");
        assert_eq!(profiles[1].display_name, "#2");
    }

    #[test]
    fn header_toggle_round_trips() {
        let table = table("amount,label\n100,x\n200,y\n");
        let with_header = classify_columns(&table, true);
        let toggled = classify_columns(&table, false);
        let back = classify_columns(&table, true);

        assert_eq!(with_header[0].display_name, "amount");
        assert_eq!(toggled[0].display_name, "#1");
        assert_eq!(back[0].display_name, with_header[0].display_name);
        assert_eq!(back[0].is_viable, with_header[0].is_viable);
        assert_eq!(back[1].display_name, with_header[1].display_name);
    }

    #[test]
    fn header_row_does_not_count_against_viability() {
        // With the flag set, the textual header is not a bad value.
        let table = table("amount\n100\n200\n300\n");
        assert!(classify_columns(&table, true)[0].is_viable);
        // Without it, one bad value out of four rows is 25% and sinks it.
        assert!(!classify_columns(&table, false)[0].is_viable);
    }

    #[test]
    fn empty_cells_do_not_count_as_bad() {
        let table = table("k,amount\na,100\nb,\nc,200\nd,\ne,300\n");
        let profiles = classify_columns(&table, true);
        assert!(profiles[1].is_viable);
        assert_eq!(profiles[1].bad_value_count, 0);
        assert_eq!(profiles[1].total_value_count, 5);
    }

    #[test]
    fn all_empty_column_is_not_viable() {
        let table = table("a,b\n1,\n2,\n3,\n");
        let profiles = classify_columns(&table, true);
        assert!(profiles[0].is_viable);
        assert!(!profiles[1].is_viable);
    }

    #[test]
    fn partial_numeric_cells_are_bad() {
        let table = table("v\n12abc\n34\n56\n");
        let profiles = classify_columns(&table, true);
        assert_eq!(profiles[0].bad_value_count, 1);
        assert!(!profiles[0].is_viable);
    }

    #[test]
    fn ten_percent_bad_is_still_viable() {
        let mut input = String::from("v\n");
        for i in 0..90 {
            input.push_str(&format!("{}\n", i + 1));
        }
        for _ in 0..10 {
            input.push_str("junk\n");
        }
        let table = table(&input);
        let profiles = classify_columns(&table, true);
        assert_eq!(profiles[0].bad_value_count, 10);
        assert_eq!(profiles[0].total_value_count, 100);
        assert!(profiles[0].is_viable);
    }

    #[test]
    fn eleven_percent_bad_is_not_viable() {
        let mut input = String::from("v\n");
        for i in 0..89 {
            input.push_str(&format!("{}\n", i + 1));
        }
        for _ in 0..11 {
            input.push_str("junk\n");
        }
        let profiles = classify_columns(&table(&input), true);
        assert_eq!(profiles[0].bad_value_count, 11);
        assert!(!profiles[0].is_viable);
    }

    #[test]
    fn zero_values_count_toward_viability() {
        let table = table("v\n0\n0\n0\n");
        let profiles = classify_columns(&table, true);
        assert!(profiles[0].is_viable);
    }

    #[test]
    fn empty_table_yields_no_viable_columns() {
        let table = table("only,header\n");
        let profiles = classify_columns(&table, true);
        assert!(profiles.iter().all(|p| !p.is_viable));
        assert!(profiles.iter().all(|p| p.total_value_count == 0));
    }
}
