use anyhow::{Result, bail};
use chrono::{NaiveDate, NaiveTime};

/// Accepts `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date);
        }
    }

    bail!("Invalid date '{}'. Use YYYY-MM-DD or DD/MM/YYYY", input)
}

/// Accepts `HH:MM`.
pub fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();

    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| anyhow::anyhow!("Invalid time '{}'. Use HH:MM", input))
}

pub fn parse_optional<T>(input: Option<&str>, parse: fn(&str) -> Result<T>) -> Result<Option<T>> {
    input.map(parse).transpose()
}
