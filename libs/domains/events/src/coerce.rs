//! Type-safe extraction of identifiers, amounts, and timestamps from the
//! heterogeneous representations upstream producers emit.
//!
//! Pure functions, no I/O.

use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

/// A producer-assigned numeric identifier.
///
/// Producers sometimes embed ids in alphanumeric codes ("PREST_001"); the
/// validated parse strips everything that is not a digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(i64);

impl ExternalId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// Parse an identifier from a string, tolerating embedded non-digits.
    ///
    /// Logs a warning when letters were present: producers should send pure
    /// numeric ids, and the coercion is a data-quality signal, not an error.
    pub fn parse(raw: &str) -> Result<Self, IdParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdParseError::Empty);
        }

        let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return Err(IdParseError::NoDigits(raw.to_string()));
        }

        if trimmed.chars().any(|c| c.is_ascii_alphabetic()) {
            warn!(
                raw,
                "identifier contains non-numeric characters; upstream should send numeric ids"
            );
        }

        digits
            .parse::<i64>()
            .map(ExternalId)
            .map_err(|_| IdParseError::OutOfRange(raw.to_string()))
    }
}

impl FromStr for ExternalId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ExternalId> for i64 {
    fn from(id: ExternalId) -> Self {
        id.0
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdParseError {
    #[error("identifier is empty")]
    Empty,

    #[error("no digits in identifier '{0}'")]
    NoDigits(String),

    #[error("identifier '{0}' does not fit in 64 bits")]
    OutOfRange(String),
}

/// Lenient identifier extraction from a JSON payload field.
///
/// Numbers are taken as-is (truncating fractions), strings go through
/// [`ExternalId::parse`], anything else yields `None`.
pub fn external_id_from_value(value: &Value) -> Option<ExternalId> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .map(ExternalId),
        Value::String(s) => ExternalId::parse(s).ok(),
        _ => None,
    }
}

/// Decimal amount extraction: numbers and numeric strings; 0.0 otherwise.
pub fn decimal_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse an array-encoded UTC timestamp: `[year, month, day, hour, minute, second]`.
///
/// Trailing components may be omitted (date-only arrays are accepted);
/// at least year, month, and day are required.
pub fn datetime_from_components(value: &Value) -> Option<DateTime<Utc>> {
    let parts = value.as_array()?;
    if parts.len() < 3 {
        return None;
    }

    let component = |idx: usize| parts.get(idx).and_then(Value::as_i64).unwrap_or(0);

    let year = parts.first()?.as_i64()?;
    let month = parts.get(1)?.as_i64()?;
    let day = parts.get(2)?.as_i64()?;

    Utc.with_ymd_and_hms(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
        u32::try_from(component(3)).ok()?,
        u32::try_from(component(4)).ok()?,
        u32::try_from(component(5)).ok()?,
    )
    .single()
}
