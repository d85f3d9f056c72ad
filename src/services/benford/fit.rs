//! Chi-squared goodness-of-fit against the Benford expectation.

use super::types::{FrequencyTable, LevelOutcome, DIGIT_CATEGORIES};
use super::EngineError;

/// The closed set of significance levels the service offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignificanceLevel {
    P10,
    P05,
    P01,
    P001,
    P0001,
}

impl SignificanceLevel {
    pub const ALL: [SignificanceLevel; 5] = [
        SignificanceLevel::P10,
        SignificanceLevel::P05,
        SignificanceLevel::P01,
        SignificanceLevel::P001,
        SignificanceLevel::P0001,
    ];

    /// Canonical p-value label, as rendered to the user.
    pub fn label(self) -> &'static str {
        match self {
            SignificanceLevel::P10 => "0.10",
            SignificanceLevel::P05 => "0.05",
            SignificanceLevel::P01 => "0.01",
            SignificanceLevel::P001 => "0.001",
            SignificanceLevel::P0001 => "0.0001",
        }
    }

    /// Parse a user-supplied level. Anything outside the fixed set is an
    /// out-of-range error, never a silent fallback.
    pub fn from_label(label: &str) -> Result<Self, EngineError> {
        match label.trim() {
            "0.10" | "0.1" => Ok(SignificanceLevel::P10),
            "0.05" => Ok(SignificanceLevel::P05),
            "0.01" => Ok(SignificanceLevel::P01),
            "0.001" => Ok(SignificanceLevel::P001),
            "0.0001" => Ok(SignificanceLevel::P0001),
            other => Err(EngineError::UnknownSignificanceLevel(other.to_string())),
        }
    }
}

/// Chi-squared critical values at 8 degrees of freedom, one per level.
/// Values from https://www.itl.nist.gov/div898/handbook/eda/section3/eda3674.htm
///
/// This is data, not code: swap in a different table for testing without
/// touching the statistic computation.
#[derive(Debug, Clone)]
pub struct CriticalValues {
    values: [f64; SignificanceLevel::ALL.len()],
}

impl Default for CriticalValues {
    fn default() -> Self {
        Self {
            values: [13.362, 15.507, 20.090, 26.125, 31.828],
        }
    }
}

impl CriticalValues {
    pub fn new(values: [f64; SignificanceLevel::ALL.len()]) -> Self {
        Self { values }
    }

    /// Total over the enum; no level can miss a value.
    pub fn critical_value(&self, level: SignificanceLevel) -> f64 {
        self.values[level as usize]
    }
}

/// `χ² = Σ (observed - expected)² / expected` over the nine digit bins.
///
/// A bin with zero expectation only occurs when n = 0; if its observed count
/// is also zero it contributes nothing (so χ² = 0 iff the distributions
/// match exactly), and a non-zero observation against zero expectation is an
/// infinite misfit.
pub fn chi_squared(frequency: &FrequencyTable) -> f64 {
    let mut sum = 0.0;
    for i in 0..DIGIT_CATEGORIES {
        let observed = frequency.observed[i] as f64;
        let expected = frequency.expected[i];
        if expected == 0.0 {
            if observed > 0.0 {
                return f64::INFINITY;
            }
            continue;
        }
        sum += (observed - expected).powi(2) / expected;
    }
    sum
}

/// Compute the statistic and the verdict at every significance level.
/// Comparisons use full precision; rounding is left to the display layer.
pub fn evaluate(
    frequency: &FrequencyTable,
    critical: &CriticalValues,
) -> (f64, Vec<LevelOutcome>) {
    let statistic = chi_squared(frequency);
    let outcomes = SignificanceLevel::ALL
        .iter()
        .map(|&level| {
            let critical_value = critical.critical_value(level);
            let reject_null = statistic > critical_value;
            LevelOutcome {
                level,
                critical_value,
                reject_null,
                result_label: if reject_null { "χ² > χ²c" } else { "χ² < χ²c" }.to_string(),
                interpretation: if reject_null {
                    format!(
                        "Reject the null hypothesis; significant differences between \
                         distributions at p = {}.",
                        level.label()
                    )
                } else {
                    format!(
                        "Retain the null hypothesis; no significant differences between \
                         distributions at p = {}.",
                        level.label()
                    )
                },
                conclusion: if reject_null {
                    "Observed distribution does not conform to Benford's Law.".to_string()
                } else {
                    "Observed distribution conforms to Benford's Law.".to_string()
                },
            }
        })
        .collect();
    (statistic, outcomes)
}

/// Format `value` to `figures` significant figures for display. The
/// underlying value is never rounded before comparison.
pub fn format_significant(value: f64, figures: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return format!("{:.*}", figures as usize - 1, 0.0);
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (figures as i32 - 1 - magnitude).max(0) as usize;
    format!("{value:.decimals$}")
}
