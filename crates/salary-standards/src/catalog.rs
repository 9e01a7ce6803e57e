//! Selectable values offered to users for each profile field.
//!
//! These are the exact strings the input form presents. Several of them are
//! deliberately absent from the column schema; they encode to the baseline.

use salary_model::ProfileField;

pub const EDUCATION_LEVELS: &[&str] = &[
    "Bachelor’s degree (B.A., B.S., B.Eng., etc.)",
    "Master’s degree (M.A., M.S., M.Eng., MBA, etc.)",
    "Professional degree (JD, MD, etc.)",
    "Associate degree (A.A., A.S., etc.)",
    "Some college/university study without earning a degree",
    "Secondary school (e.g. American high school, German Realschule or Gymnasium, etc.)",
    "Primary/elementary school",
    "I never completed any formal education",
    "Other",
];

pub const COUNTRIES: &[&str] = &[
    "Brazil",
    "Canada",
    "France",
    "Germany",
    "India",
    "Italy",
    "Netherlands",
    "Poland",
    "Spain",
    "Sweden",
    "Switzerland",
    "Ukraine",
    "United Kingdom of Great Britain and Northern Ireland",
    "United States of America",
    "Other",
];

pub const EMPLOYMENT_OPTIONS: &[&str] = &[
    "Employed, full-time",
    "Employed, part-time",
    "Independent contractor, freelancer, or self-employed",
    "Student, full-time",
    "Student, part-time",
    "Not employed, but looking for work",
    "Not employed, and not looking for work",
    "Retired",
];

pub const REMOTE_OPTIONS: &[&str] = &["Remote", "In-person", "Other"];

pub const ORG_SIZES: &[&str] = &[
    "Just me - I am a freelancer, sole proprietor, etc.",
    "2 to 9 employees",
    "10 to 19 employees",
    "20 to 99 employees",
    "100 to 499 employees",
    "500 to 999 employees",
    "5,000 to 9,999 employees",
    "10,000 or more employees",
    "I don’t know",
    "Other",
];

/// Form defaults: experience years and the preselected option per field.
pub const DEFAULT_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 50;
pub const DEFAULT_COUNTRY: &str = "India";
pub const DEFAULT_EMPLOYMENT: &str = "Employed, full-time";

/// Lookup over the option lists by field.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormCatalog;

impl FormCatalog {
    pub fn options(self, field: ProfileField) -> &'static [&'static str] {
        match field {
            ProfileField::YearsCodePro => &[],
            ProfileField::Country => COUNTRIES,
            ProfileField::EdLevel => EDUCATION_LEVELS,
            ProfileField::Employment => EMPLOYMENT_OPTIONS,
            ProfileField::RemoteWork => REMOTE_OPTIONS,
            ProfileField::OrgSize => ORG_SIZES,
        }
    }

    /// The value preselected by the form, if the field has one.
    pub fn default_value(self, field: ProfileField) -> Option<&'static str> {
        match field {
            ProfileField::YearsCodePro => None,
            ProfileField::Country => Some(DEFAULT_COUNTRY),
            ProfileField::Employment => Some(DEFAULT_EMPLOYMENT),
            other => self.options(other).first().copied(),
        }
    }
}
