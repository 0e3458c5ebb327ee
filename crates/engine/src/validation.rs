//! Field level validation rules.
//!
//! Every rule takes the raw value and either returns the normalized value or
//! an [`EngineError::Validation`] with a readable reason. Rules run on every
//! create and on each field supplied to an update; omitted update fields are
//! never validated.

use std::ops::Deref;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

use crate::{EngineError, ResultEngine};

/// Input that already went through its field rules.
///
/// Only the `validated()` constructors of the input shapes build one, so the
/// repositories can take it without checking again.
#[derive(Clone, Debug, PartialEq)]
pub struct Valid<T>(pub(crate) T);

impl<T> Valid<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Valid<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

/// Oldest manufacturing year accepted for a car.
pub const MIN_YEAR: i32 = 1900;

/// Accept `year` when `MIN_YEAR <= year <= current year`.
pub fn validate_year(year: i32) -> ResultEngine<i32> {
    let current = Utc::now().year();
    if year < MIN_YEAR || year > current {
        return Err(EngineError::Validation(format!(
            "year must be between {MIN_YEAR} and {current}"
        )));
    }
    Ok(year)
}

/// Accept a chassis number made of alphanumerics once spaces and hyphens are
/// removed. The returned value is uppercased, separators are kept.
pub fn validate_chassis(chassis: &str) -> ResultEngine<String> {
    let mut stripped = chassis_chars(chassis).peekable();
    if stripped.peek().is_none() || !stripped.all(char::is_alphanumeric) {
        return Err(EngineError::Validation(
            "chassis number must be alphanumeric".to_string(),
        ));
    }
    Ok(chassis.to_uppercase())
}

/// Lookup key for a chassis number: uppercase without spaces and hyphens.
///
/// Two chassis numbers are the same car when their keys are equal.
pub fn chassis_key(chassis: &str) -> String {
    chassis_chars(chassis).collect::<String>().to_uppercase()
}

/// Case-folded copy of a free text field, matched by the substring searches.
pub fn search_key(text: &str) -> String {
    text.to_lowercase()
}

fn chassis_chars(chassis: &str) -> impl Iterator<Item = char> + '_ {
    chassis.chars().filter(|c| *c != ' ' && *c != '-')
}

/// Accept strictly positive, finite prices.
pub fn validate_price(price: f64) -> ResultEngine<f64> {
    if !price.is_finite() || price <= 0.0 {
        return Err(EngineError::Validation(
            "price must be greater than 0".to_string(),
        ));
    }
    Ok(price)
}

/// Trim the buyer name and reject it when nothing is left.
pub fn validate_buyer_name(name: &str) -> ResultEngine<String> {
    validate_required_text(name, "buyer name")
}

/// Reject sale dates later than the moment of validation.
pub fn validate_sale_date(date: DateTime<Utc>) -> ResultEngine<DateTime<Utc>> {
    if date > Utc::now() {
        return Err(EngineError::Validation(
            "sale date cannot be in the future".to_string(),
        ));
    }
    Ok(date)
}

/// Trim `value` and reject it when empty. `label` names the field in the
/// error message.
pub fn validate_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::Validation(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse a date range bound.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T10:00:00+02:00`), a
/// naive date time taken as UTC (`2024-05-01T10:00:00`) or a plain date taken
/// as midnight UTC (`2024-05-01`).
pub fn parse_date_bound(text: &str) -> ResultEngine<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(text) {
        return Ok(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
        .ok_or_else(|| EngineError::Validation(format!("invalid date: {text}")))
}
