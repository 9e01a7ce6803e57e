//! One-hot encoding of a profile onto the frozen column schema.
//!
//! Every value the schema does not represent encodes to the all-zero baseline
//! of its group. That baseline is the reference category the model was fitted
//! against, so an unknown category is a valid input rather than an error.

use tracing::debug;

use salary_model::{ColumnSchema, EncodedRow, ProfileField, RawProfile};

use crate::normalize::{normalize, normalize_org_size};
use crate::numeric::parse_years;

/// Education indicator set for the literal answer "Other".
pub const EDUCATION_OTHER_COLUMN: &str = "EdLevel_Other";

/// Education indicator set for any professional degree.
pub const EDUCATION_PROFESSIONAL_COLUMN: &str = "EdLevel_Professional";

const PROFESSIONAL_DEGREE_PREFIX: &str = "Professional degree";

/// Encoder bound to one column schema.
#[derive(Debug, Clone)]
pub struct FeatureEncoder {
    schema: ColumnSchema,
}

impl FeatureEncoder {
    pub fn new(schema: ColumnSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &ColumnSchema {
        &self.schema
    }

    pub fn encode(&self, profile: &RawProfile) -> EncodedRow<'_> {
        encode(profile, &self.schema)
    }
}

/// Build the feature row for `profile` in the column order of `schema`.
///
/// Never fails: bad experience values coerce to 0.0 and unrepresented
/// categories leave their group at the baseline.
pub fn encode<'a>(profile: &RawProfile, schema: &'a ColumnSchema) -> EncodedRow<'a> {
    let mut row = EncodedRow::zeros(schema);

    let years = parse_years(profile.years_code_pro.as_ref()).unwrap_or_else(|| {
        if profile.years_code_pro.is_some() {
            debug!(field = %ProfileField::YearsCodePro, "experience not numeric, using 0.0");
        }
        0.0
    });
    row.set(ProfileField::YearsCodePro.as_str(), years);

    for field in ProfileField::INDICATOR {
        let Some(raw) = profile.categorical(field) else {
            continue;
        };
        let value = match field {
            ProfileField::OrgSize => normalize_org_size(raw),
            _ => normalize(raw),
        };
        if value.is_empty() {
            continue;
        }
        if !row.set(&field.indicator_column(&value), 1.0) {
            debug!(field = %field, "category not represented in schema, using baseline");
        }
    }

    if let Some(raw) = profile.categorical(ProfileField::EdLevel) {
        encode_education(&mut row, &normalize(raw));
    }

    row
}

/// The schema carries only two education indicators. Everything other than
/// "Other" and professional degrees, bachelor's and master's included, stays
/// at the baseline.
fn encode_education(row: &mut EncodedRow<'_>, value: &str) {
    let column = if value == "Other" {
        EDUCATION_OTHER_COLUMN
    } else if value.starts_with(PROFESSIONAL_DEGREE_PREFIX) {
        EDUCATION_PROFESSIONAL_COLUMN
    } else {
        debug!(field = %ProfileField::EdLevel, "education level has no indicator, using baseline");
        return;
    };
    if !row.set(column, 1.0) {
        debug!(field = %ProfileField::EdLevel, column, "education indicator missing from schema");
    }
}
