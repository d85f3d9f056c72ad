//! Strict numeric parsing and leading-significant-digit extraction.

/// Parse a cell as a finite real number, tolerating minimal formatting:
/// thousands commas are removed and leading `$` / sign characters stripped.
/// The entire remaining text must parse, so `"12abc"`, `"1/31/56"` and
/// `"€100"` are all rejected. The sign is irrelevant to the caller, which
/// only ever looks at the magnitude.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned = trimmed.replace(',', "");
    let cleaned = cleaned.trim_start_matches(|c| c == '-' || c == '$');

    let value: f64 = cleaned.parse().ok()?;
    // f64::from_str accepts "inf" and "NaN"; neither is tabular data.
    value.is_finite().then_some(value)
}

/// First significant digit of `value`, or `None` for zero (which has no
/// leading significant digit) and non-finite input. Scales the magnitude
/// into `[1, 10)` so the result is independent of order of magnitude:
/// `0.0042` and `4200` both yield 4.
pub fn leading_digit(value: f64) -> Option<u8> {
    if !value.is_finite() {
        return None;
    }
    let mut magnitude = value.abs();
    if magnitude == 0.0 {
        return None;
    }

    while magnitude >= 10.0 {
        magnitude /= 10.0;
    }
    while magnitude < 1.0 {
        magnitude *= 10.0;
    }

    Some(magnitude as u8)
}
