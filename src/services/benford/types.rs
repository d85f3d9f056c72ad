use smallvec::SmallVec;

use super::fit::SignificanceLevel;

/// Leading-digit categories 1..=9.
pub const DIGIT_CATEGORIES: usize = 9;
/// Fixed at categories - 1; there are always exactly nine digit bins.
pub const DEGREES_OF_FREEDOM: usize = DIGIT_CATEGORIES - 1;
/// Header/first row plus five data rows.
pub const PREVIEW_ROWS: usize = 6;

/// Parsed tabular input. Every row in `rows` has exactly `width` fields;
/// rows that did not match the width of the first row were dropped at parse
/// time and are accounted for in `discarded_rows`.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub rows: Vec<Vec<String>>,
    pub width: usize,
    pub discarded_rows: usize,
}

impl RawTable {
    /// Rows that carry data: everything, or everything past the header row.
    pub fn data_rows(&self, has_header: bool) -> &[Vec<String>] {
        if has_header && !self.rows.is_empty() {
            &self.rows[1..]
        } else {
            &self.rows
        }
    }

    /// Total rows seen in the input, including discarded ragged rows.
    pub fn total_rows(&self) -> usize {
        self.rows.len() + self.discarded_rows
    }
}

/// Per-column viability verdict, recomputed whenever the header flag changes.
#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub index: usize,
    pub is_viable: bool,
    pub display_name: String,
    pub bad_value_count: usize,
    pub total_value_count: usize,
}

/// Observed vs. Benford-expected leading-digit counts for one column.
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    pub observed: [u64; DIGIT_CATEGORIES],
    pub expected: [f64; DIGIT_CATEGORIES],
    /// Rows that contributed a leading digit.
    pub n: u64,
    /// Rows with a missing, unparseable, or zero value.
    pub excluded_count: u64,
    pub total_rows: u64,
}

impl FrequencyTable {
    /// True when the excluded fraction strictly exceeds 10% of the rows.
    /// At exactly 10% (e.g. 10 of 100) no advisory is raised.
    pub fn high_exclusion(&self) -> bool {
        self.excluded_count * 10 > self.total_rows
    }
}

/// Verdict at one significance level.
#[derive(Debug, Clone)]
pub struct LevelOutcome {
    pub level: SignificanceLevel,
    pub critical_value: f64,
    pub reject_null: bool,
    pub result_label: String,
    pub interpretation: String,
    pub conclusion: String,
}

/// Full analysis of one selected column. Rebuilt from scratch whenever the
/// selected column or the header flag changes; never mutated in place.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub column_index: usize,
    pub display_name: String,
    pub frequency: FrequencyTable,
    pub test_statistic: f64,
    pub outcomes: Vec<LevelOutcome>,
    pub high_exclusion: bool,
}

/// A column offered for selection.
#[derive(Debug, Clone)]
pub struct ColumnChoice {
    pub index: usize,
    pub display_name: String,
}

/// Bounded data preview for the rendering layer.
#[derive(Debug, Clone)]
pub struct Preview {
    /// All rows seen in the input, including discarded ones.
    pub total_rows: usize,
    /// Ragged rows dropped by the parser.
    pub discarded_rows: usize,
    pub sample: SmallVec<[Vec<String>; PREVIEW_ROWS]>,
    pub viable_columns: Vec<ColumnChoice>,
}

impl Preview {
    pub fn has_usable_data(&self) -> bool {
        !self.viable_columns.is_empty()
    }
}
