//! Parsing helpers for values arriving as strings in requests.

use chrono::{NaiveTime, Weekday};
use sea_orm::ActiveEnum;

use crate::server::error::validation::ValidationError;

/// Parses a string-backed database enum, reporting failures against `field`.
///
/// # Arguments
/// - `field` - Request field name used in the validation error
/// - `value` - Raw string value, matched against the enum's stored string values
///
/// # Returns
/// - `Ok(E)` - Parsed enum value
/// - `Err(ValidationError)` - Value is not one of the enum's variants
pub fn parse_enum<E>(field: &str, value: &str) -> Result<E, ValidationError>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&value.trim().to_lowercase()).map_err(|_| {
        ValidationError::field(
            field,
            format!(
                "must be one of: {}",
                E::iter().map(|v| v.to_value()).collect::<Vec<_>>().join(", ")
            ),
        )
    })
}

/// Stored string value of a database enum.
pub fn enum_str<E>(value: &E) -> String
where
    E: ActiveEnum<Value = String>,
{
    value.to_value()
}

/// Parses a three-letter lowercase weekday code (`mon`..`sun`).
pub fn parse_weekday(value: &str) -> Option<Weekday> {
    match value.trim().to_lowercase().as_str() {
        "mon" => Some(Weekday::Mon),
        "tue" => Some(Weekday::Tue),
        "wed" => Some(Weekday::Wed),
        "thu" => Some(Weekday::Thu),
        "fri" => Some(Weekday::Fri),
        "sat" => Some(Weekday::Sat),
        "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Three-letter lowercase code for a weekday.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

/// Parses `HH:MM` (24h).
pub fn parse_hhmm(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}

pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
