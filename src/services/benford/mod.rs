//! The Benford's Law analysis engine: parse delimited text, profile column
//! viability, extract leading digits, and test the observed distribution
//! against the Benford expectation with a chi-squared goodness-of-fit test.
//!
//! Everything in here is a pure, synchronous function of (table, current
//! selections). Derived views are recomputed on demand rather than cached,
//! so a header toggle or column change can never observe stale state.

pub mod classifier;
pub mod digits;
pub mod fit;
pub mod frequency;
pub mod parser;
pub mod preview;
pub mod types;

use thiserror::Error;

pub use fit::{CriticalValues, SignificanceLevel};
pub use types::{
    AnalysisResult, ColumnChoice, ColumnProfile, FrequencyTable, LevelOutcome, Preview, RawTable,
};

/// The recoverable engine conditions. None of these are fatal to the
/// session; malformed input degrades to a reported error, never a panic.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not parse input as delimited tabular text: {0}")]
    Parse(String),
    #[error("no usable data: no column is sufficiently numeric")]
    NoViableColumns,
    #[error("column index {index} is out of range for a table with {columns} columns")]
    ColumnOutOfRange { index: usize, columns: usize },
    #[error("column {0} is not viable for analysis")]
    ColumnNotViable(usize),
    #[error("unknown significance level '{0}'")]
    UnknownSignificanceLevel(String),
}

/// Facade over the pipeline. Holds the critical-value table so an
/// alternative table can be injected for testing.
pub struct BenfordAnalyzer {
    critical: CriticalValues,
}

impl BenfordAnalyzer {
    pub fn new() -> Self {
        Self {
            critical: CriticalValues::default(),
        }
    }

    pub fn with_critical_values(critical: CriticalValues) -> Self {
        Self { critical }
    }

    /// Tabular Parser entry point.
    pub fn parse(&self, raw: &[u8]) -> Result<RawTable, EngineError> {
        parser::parse_table(raw)
    }

    /// Column profiles for the current header flag.
    pub fn profiles(&self, table: &RawTable, has_header: bool) -> Vec<ColumnProfile> {
        classifier::classify_columns(table, has_header)
    }

    /// Preview payload; independent of any column selection.
    pub fn preview(&self, table: &RawTable, has_header: bool) -> Preview {
        let profiles = self.profiles(table, has_header);
        preview::build_preview(table, &profiles)
    }

    /// Full analysis of the selected column. The index must name a viable
    /// column; a table without any viable column is reported as such before
    /// the index is even considered.
    pub fn analyze(
        &self,
        table: &RawTable,
        index: usize,
        has_header: bool,
    ) -> Result<AnalysisResult, EngineError> {
        let profiles = self.profiles(table, has_header);
        if !profiles.iter().any(|profile| profile.is_viable) {
            return Err(EngineError::NoViableColumns);
        }
        let profile = profiles.get(index).ok_or(EngineError::ColumnOutOfRange {
            index,
            columns: table.width,
        })?;
        if !profile.is_viable {
            return Err(EngineError::ColumnNotViable(index));
        }

        let frequency = frequency::analyze_column(table, index, has_header)?;
        let (test_statistic, outcomes) = fit::evaluate(&frequency, &self.critical);

        Ok(AnalysisResult {
            column_index: index,
            display_name: profile.display_name.clone(),
            test_statistic,
            outcomes,
            high_exclusion: frequency.high_exclusion(),
            frequency,
        })
    }
}

impl Default for BenfordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
