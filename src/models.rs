//! Wire-facing response models. Field names follow the camelCase the
//! frontend expects; values are copied out of the engine types so nothing
//! here can mutate a stored table.

use serde::Serialize;

use crate::services::benford::{fit, AnalysisResult, Preview};
use crate::services::session::UploadedFile;

/// Significant figures used when rendering the test statistic. Comparisons
/// against critical values always use the unrounded value.
const STATISTIC_FIGURES: u32 = 6;

pub const NO_USABLE_DATA_ADVISORY: &str = "No usable data was found in this file.";
pub const HIGH_EXCLUSION_ADVISORY: &str =
    "More than 10% of rows in the selected column were excluded from analysis.";

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ColumnEntry {
    pub index: usize,
    pub name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub filename: String,
    pub num_rows: usize,
    pub num_discarded: usize,
    pub preview_data: Vec<Vec<String>>,
    pub viable_columns: Vec<ColumnEntry>,
    pub usable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
}

impl PreviewResponse {
    pub fn new(filename: &str, preview: &Preview) -> Self {
        let usable = preview.has_usable_data();
        Self {
            filename: filename.to_string(),
            num_rows: preview.total_rows,
            num_discarded: preview.discarded_rows,
            preview_data: preview.sample.iter().cloned().collect(),
            viable_columns: preview
                .viable_columns
                .iter()
                .map(|column| ColumnEntry {
                    index: column.index,
                    name: column.display_name.clone(),
                })
                .collect(),
            usable,
            advisory: (!usable).then(|| NO_USABLE_DATA_ADVISORY.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LevelVerdict {
    pub level: String,
    pub critical_value: f64,
    pub reject_null: bool,
    pub result: String,
    pub interpretation: String,
    pub conclusion: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub filename: String,
    pub column_index: usize,
    pub column_name: String,
    pub n: u64,
    pub excluded_count: u64,
    pub total_rows: u64,
    pub observed_distribution: Vec<u64>,
    pub expected_distribution: Vec<f64>,
    /// Expected counts rounded to whole rows, for display only.
    pub expected_display: Vec<String>,
    pub test_statistic: f64,
    pub test_statistic_display: String,
    pub high_exclusion: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    pub goodness_of_fit: Vec<LevelVerdict>,
}

impl AnalysisResponse {
    pub fn new(filename: &str, result: &AnalysisResult) -> Self {
        Self {
            filename: filename.to_string(),
            column_index: result.column_index,
            column_name: result.display_name.clone(),
            n: result.frequency.n,
            excluded_count: result.frequency.excluded_count,
            total_rows: result.frequency.total_rows,
            observed_distribution: result.frequency.observed.to_vec(),
            expected_distribution: result.frequency.expected.to_vec(),
            expected_display: result
                .frequency
                .expected
                .iter()
                .map(|e| format!("{e:.0}"))
                .collect(),
            test_statistic: result.test_statistic,
            test_statistic_display: fit::format_significant(
                result.test_statistic,
                STATISTIC_FIGURES,
            ),
            high_exclusion: result.high_exclusion,
            advisory: result
                .high_exclusion
                .then(|| HIGH_EXCLUSION_ADVISORY.to_string()),
            goodness_of_fit: result
                .outcomes
                .iter()
                .map(|outcome| LevelVerdict {
                    level: outcome.level.label().to_string(),
                    critical_value: outcome.critical_value,
                    reject_null: outcome.reject_null,
                    result: outcome.result_label.clone(),
                    interpretation: outcome.interpretation.clone(),
                    conclusion: outcome.conclusion.clone(),
                })
                .collect(),
        }
    }

    /// Narrow the verdicts to a single significance level.
    pub fn at_level(mut self, label: &str) -> Self {
        self.goodness_of_fit.retain(|verdict| verdict.level == label);
        self
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    pub filename: String,
    pub uploaded_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    pub uploaded_files: Vec<FileEntry>,
}

impl FileListResponse {
    pub fn new(files: &[UploadedFile]) -> Self {
        Self {
            uploaded_files: files
                .iter()
                .map(|file| FileEntry {
                    filename: file.filename.clone(),
                    uploaded_at: file.uploaded_at.to_rfc3339(),
                })
                .collect(),
        }
    }
}
