//! Numeric coercion for the experience field.

use salary_model::Experience;

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<f64>().ok()
}

/// Parses years of experience, returning None unless the value is finite.
pub fn parse_years(value: Option<&Experience>) -> Option<f64> {
    let parsed = match value? {
        Experience::Number(number) => Some(*number),
        Experience::Text(text) => parse_f64(text),
    };
    parsed.filter(|years| years.is_finite())
}

/// Coerce years of experience to a finite number, falling back to 0.0.
///
/// Missing, empty, unparsable, NaN and infinite inputs all yield 0.0.
pub fn coerce_years(value: Option<&Experience>) -> f64 {
    parse_years(value).unwrap_or(0.0)
}
