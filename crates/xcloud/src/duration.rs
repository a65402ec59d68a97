//! Duration parsing from strings
//!
//! Accepts the compact duration syntax used by the XCLOUD tooling: a
//! sequence of decimal numbers, each with an optional fraction and a unit
//! suffix, such as `"300ms"`, `"1.5s"` or `"1h30m"`. Valid units are `ns`,
//! `us` (or `µs`), `ms`, `s`, `m` and `h`. A lone `"0"` is accepted.

use std::time::Duration;

use thiserror::Error;

/// Error type for duration parsing
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DurationParseError {
    /// Input was empty after trimming.
    #[error("Empty duration string")]
    EmptyString,

    /// Input did not follow `<number><unit>...`.
    #[error("Invalid duration format: {0}")]
    InvalidFormat(String),

    /// A number could not be parsed.
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// A unit suffix was not recognized.
    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    /// Durations must not be negative.
    #[error("Negative duration: {0}")]
    Negative(String),
}

/// Parse a duration string into a Duration
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use xcloud::duration::parse_duration;
///
/// assert_eq!(parse_duration("500ms").unwrap(), Duration::from_millis(500));
/// assert_eq!(parse_duration("1.5s").unwrap(), Duration::from_millis(1500));
/// assert_eq!(parse_duration("1h30m").unwrap(), Duration::from_secs(5400));
/// assert!(parse_duration("banana").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let input = s.trim();
    if input.is_empty() {
        return Err(DurationParseError::EmptyString);
    }

    let mut rest = input;
    if let Some(stripped) = rest.strip_prefix('+') {
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('-') {
        // "-0" is still zero; anything else is rejected below
        if stripped.chars().all(|c| c == '0') && !stripped.is_empty() {
            return Ok(Duration::ZERO);
        }
        return Err(DurationParseError::Negative(input.to_string()));
    }

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(DurationParseError::InvalidFormat(input.to_string()));
    }

    let mut total_nanos: f64 = 0.0;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let number = &rest[..number_len];
        if number.is_empty() || number == "." {
            return Err(DurationParseError::InvalidFormat(input.to_string()));
        }
        let value: f64 = number
            .parse()
            .map_err(|_| DurationParseError::InvalidNumber(number.to_string()))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let unit = &rest[..unit_len];
        if unit.is_empty() {
            return Err(DurationParseError::InvalidFormat(
                "Missing unit after number".to_string(),
            ));
        }
        total_nanos += value * unit_nanos(unit)?;
        rest = &rest[unit_len..];
    }

    if !total_nanos.is_finite() || total_nanos > u64::MAX as f64 {
        return Err(DurationParseError::InvalidNumber(input.to_string()));
    }

    Ok(Duration::from_nanos(total_nanos.round() as u64))
}

fn unit_nanos(unit: &str) -> Result<f64, DurationParseError> {
    let nanos = match unit {
        "ns" => 1.0,
        "us" | "µs" | "μs" => 1e3,
        "ms" => 1e6,
        "s" => 1e9,
        "m" => 60.0 * 1e9,
        "h" => 3600.0 * 1e9,
        _ => return Err(DurationParseError::UnknownUnit(unit.to_string())),
    };
    Ok(nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("500ms", Duration::from_millis(500))]
    #[case("10ms", Duration::from_millis(10))]
    #[case("2s", Duration::from_secs(2))]
    #[case("1.5s", Duration::from_millis(1500))]
    #[case(".5s", Duration::from_millis(500))]
    #[case("2m", Duration::from_secs(120))]
    #[case("1h30m", Duration::from_secs(5400))]
    #[case("1m30s500ms", Duration::from_millis(90_500))]
    #[case("250us", Duration::from_micros(250))]
    #[case("250µs", Duration::from_micros(250))]
    #[case("42ns", Duration::from_nanos(42))]
    #[case("+3s", Duration::from_secs(3))]
    #[case("  750ms  ", Duration::from_millis(750))]
    #[case("0", Duration::ZERO)]
    #[case("0s", Duration::ZERO)]
    fn test_parse_valid(#[case] input: &str, #[case] expected: Duration) {
        assert_eq!(parse_duration(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_duration(""), Err(DurationParseError::EmptyString));
        assert_eq!(parse_duration("   "), Err(DurationParseError::EmptyString));
    }

    #[test]
    fn test_parse_missing_unit() {
        assert!(matches!(
            parse_duration("500"),
            Err(DurationParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_unknown_unit() {
        assert_eq!(
            parse_duration("3d"),
            Err(DurationParseError::UnknownUnit("d".to_string()))
        );
        assert!(matches!(
            parse_duration("5 s"),
            Err(DurationParseError::UnknownUnit(_))
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(parse_duration("banana").is_err());
        assert!(parse_duration("ms").is_err());
        assert!(parse_duration(".s").is_err());
        assert!(parse_duration("1..2s").is_err());
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(
            parse_duration("-1s"),
            Err(DurationParseError::Negative(_))
        ));
        assert_eq!(parse_duration("-0").unwrap(), Duration::ZERO);
    }
}
