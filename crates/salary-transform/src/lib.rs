//! Profile-to-feature transformation.
//!
//! This crate turns a [`RawProfile`](salary_model::RawProfile) into the row a
//! trained regression model expects:
//!
//! - **normalize**: separator/whitespace cleanup and field-scoped glyph rules
//! - **employment**: deterministic canonical form of employment selections
//! - **numeric**: best-effort coercion of the experience field
//! - **encoder**: one-hot alignment onto the frozen column schema

pub mod employment;
pub mod encoder;
pub mod normalize;
pub mod numeric;

pub use employment::{EMPLOYMENT_ORDER, canonicalize};
pub use encoder::{FeatureEncoder, encode};
pub use normalize::{normalize, normalize_org_size};
pub use numeric::coerce_years;
