//! Raw profile record as collected from the user.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six profile fields, named exactly as the trained schema names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProfileField {
    YearsCodePro,
    Country,
    EdLevel,
    Employment,
    RemoteWork,
    OrgSize,
}

impl ProfileField {
    /// All fields in record order.
    pub const ALL: [ProfileField; 6] = [
        ProfileField::YearsCodePro,
        ProfileField::Country,
        ProfileField::EdLevel,
        ProfileField::Employment,
        ProfileField::RemoteWork,
        ProfileField::OrgSize,
    ];

    /// Fields encoded as `<Field>_<value>` one-hot indicators.
    pub const INDICATOR: [ProfileField; 4] = [
        ProfileField::Country,
        ProfileField::RemoteWork,
        ProfileField::OrgSize,
        ProfileField::Employment,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::YearsCodePro => "YearsCodePro",
            Self::Country => "Country",
            Self::EdLevel => "EdLevel",
            Self::Employment => "Employment",
            Self::RemoteWork => "RemoteWork",
            Self::OrgSize => "OrgSize",
        }
    }

    /// Parses a record field name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(name))
    }

    /// Builds the indicator column name for a normalized category value.
    pub fn indicator_column(self, value: &str) -> String {
        format!("{}_{}", self.as_str(), value)
    }

    /// Returns true if `column` is one of this field's indicator columns.
    pub fn owns_column(self, column: &str) -> bool {
        column
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with('_'))
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Years of professional experience as it arrives from the caller.
///
/// Forms hand over numbers, CSV files and query strings hand over text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Experience {
    Number(f64),
    Text(String),
}

impl From<f64> for Experience {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for Experience {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Experience {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Experience {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One prediction request's worth of profile input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    #[serde(rename = "YearsCodePro", default, skip_serializing_if = "Option::is_none")]
    pub years_code_pro: Option<Experience>,
    #[serde(rename = "Country", default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(rename = "EdLevel", default, skip_serializing_if = "Option::is_none")]
    pub ed_level: Option<String>,
    /// Already canonicalized, `;`-joined employment selections.
    #[serde(rename = "Employment", default, skip_serializing_if = "Option::is_none")]
    pub employment: Option<String>,
    #[serde(rename = "RemoteWork", default, skip_serializing_if = "Option::is_none")]
    pub remote_work: Option<String>,
    #[serde(rename = "OrgSize", default, skip_serializing_if = "Option::is_none")]
    pub org_size: Option<String>,
}

impl RawProfile {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_years(mut self, years: impl Into<Experience>) -> Self {
        self.years_code_pro = Some(years.into());
        self
    }

    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    #[must_use]
    pub fn with_ed_level(mut self, ed_level: impl Into<String>) -> Self {
        self.ed_level = Some(ed_level.into());
        self
    }

    #[must_use]
    pub fn with_employment(mut self, employment: impl Into<String>) -> Self {
        self.employment = Some(employment.into());
        self
    }

    #[must_use]
    pub fn with_remote_work(mut self, remote_work: impl Into<String>) -> Self {
        self.remote_work = Some(remote_work.into());
        self
    }

    #[must_use]
    pub fn with_org_size(mut self, org_size: impl Into<String>) -> Self {
        self.org_size = Some(org_size.into());
        self
    }

    /// Returns the text of a categorical field.
    ///
    /// `YearsCodePro` is numeric and always yields `None` here.
    pub fn categorical(&self, field: ProfileField) -> Option<&str> {
        let value = match field {
            ProfileField::YearsCodePro => return None,
            ProfileField::Country => &self.country,
            ProfileField::EdLevel => &self.ed_level,
            ProfileField::Employment => &self.employment,
            ProfileField::RemoteWork => &self.remote_work,
            ProfileField::OrgSize => &self.org_size,
        };
        value.as_deref()
    }

    /// Sets a field from text, as read from a CSV cell or form field.
    pub fn set_text(&mut self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ProfileField::YearsCodePro => self.years_code_pro = Some(Experience::Text(value)),
            ProfileField::Country => self.country = Some(value),
            ProfileField::EdLevel => self.ed_level = Some(value),
            ProfileField::Employment => self.employment = Some(value),
            ProfileField::RemoteWork => self.remote_work = Some(value),
            ProfileField::OrgSize => self.org_size = Some(value),
        }
    }
}
