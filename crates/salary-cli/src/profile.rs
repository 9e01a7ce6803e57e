//! Building a `RawProfile` from command-line input.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::trace;

use salary_model::RawProfile;
use salary_standards::catalog;
use salary_transform::canonicalize;
use salary_transform::numeric::parse_years;

use crate::logging::redact_value;

/// Profile values as entered on the command line.
///
/// An empty `employment` slice is the empty selection.
#[derive(Debug, Clone, Default)]
pub struct ProfileInput<'a> {
    pub years: f64,
    pub country: &'a str,
    pub education: &'a str,
    pub employment: &'a [String],
    pub remote: &'a str,
    pub org_size: &'a str,
}

impl ProfileInput<'_> {
    /// Employment selections are canonicalized here, the way the input form does.
    pub fn into_profile(self) -> RawProfile {
        RawProfile::new()
            .with_years(self.years)
            .with_country(self.country)
            .with_ed_level(self.education)
            .with_employment(canonicalize(self.employment))
            .with_remote_work(self.remote)
            .with_org_size(self.org_size)
    }
}

/// Check that `years` lies within the form's range, `0..=MAX_YEARS`.
pub fn check_years(years: f64) -> Result<f64, String> {
    if (0.0..=f64::from(catalog::MAX_YEARS)).contains(&years) {
        Ok(years)
    } else {
        Err(format!(
            "years of experience must be between 0 and {}, got {years}",
            catalog::MAX_YEARS
        ))
    }
}

/// Value parser for `--years`.
pub fn parse_years_arg(value: &str) -> Result<f64, String> {
    let years: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    check_years(years)
}

/// Read a profile from a JSON document keyed by the record field names.
///
/// A `;`-joined `Employment` value is re-canonicalized so hand-written files
/// may list selections in any order. Numeric experience outside the form's
/// range is rejected; non-numeric text is left for the encoder to coerce.
pub fn read_profile_json(path: &Path) -> Result<RawProfile> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read profile: {}", path.display()))?;
    let mut profile: RawProfile = serde_json::from_str(&contents)
        .with_context(|| format!("parse profile: {}", path.display()))?;
    if let Some(years) = parse_years(profile.years_code_pro.as_ref())
        && let Err(message) = check_years(years)
    {
        bail!("invalid profile {}: {message}", path.display());
    }
    if let Some(employment) = profile.employment.take() {
        profile.employment = Some(canonicalize(employment.split(';').map(str::trim)));
    }
    Ok(profile)
}

/// Emit the profile at trace level, redacting values unless `--log-data` is set.
pub fn trace_profile(profile: &RawProfile) {
    let field = |value: &Option<String>| redact_value(value.as_deref().unwrap_or("")).to_string();
    trace!(
        country = %field(&profile.country),
        ed_level = %field(&profile.ed_level),
        employment = %field(&profile.employment),
        remote_work = %field(&profile.remote_work),
        org_size = %field(&profile.org_size),
        "profile"
    );
}
