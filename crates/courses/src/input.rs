//! Parsing of pace and finish-time strings typed by a user.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    #[error("Empty time")]
    Empty,
    #[error("Could not read '{0}' as a time (use m:ss, h:mm:ss or decimal minutes)")]
    Unparseable(String),
    #[error("Minutes and seconds must be below 60 in '{0}'")]
    OutOfRange(String),
}

/// Parses a time into whole seconds.
///
/// Accepts `m:ss`, `mm:ss`, `h:mm:ss` or decimal minutes (`"7.5"` is 7:30).
/// Minutes and seconds fields must be below 60.
pub fn parse_time_seconds(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(InputError::Empty);
    }

    if trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        let minutes: f64 = trimmed
            .parse()
            .map_err(|_| InputError::Unparseable(trimmed.to_string()))?;
        return Ok((minutes * 60.0).round());
    }

    let fields = trimmed
        .split(':')
        .map(|part| part.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| InputError::Unparseable(trimmed.to_string()))?;

    if fields.iter().any(|v| !v.is_finite() || *v < 0.0) {
        return Err(InputError::Unparseable(trimmed.to_string()));
    }

    let (h, m, s) = match fields.as_slice() {
        [m, s] => (0.0, *m, *s),
        [h, m, s] => (*h, *m, *s),
        _ => return Err(InputError::Unparseable(trimmed.to_string())),
    };
    if m >= 60.0 || s >= 60.0 {
        return Err(InputError::OutOfRange(trimmed.to_string()));
    }

    Ok(h * 3600.0 + m * 60.0 + s)
}

/// Parses a pace such as "7:30" (per mile or km) into seconds.
pub fn parse_pace(input: &str) -> Result<f64, InputError> {
    parse_time_seconds(input)
}

/// Parses a goal finish time such as "3:15:00" into seconds.
pub fn parse_duration(input: &str) -> Result<f64, InputError> {
    parse_time_seconds(input)
}
