//! Conversion chain for the two textual date encodings the service emits
//! inside `/Date(...)/` wrappers.
//!
//! The constructor form carries comma-separated calendar components with a
//! zero-based month; the epoch form carries a single integer of milliseconds
//! since the Unix epoch. The constructor parse is attempted first, then the
//! epoch parse; a payload matching neither yields `None` so callers can treat
//! the field as absent rather than failing the whole record.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parse a `/Date(...)/`-wrapped value using the full fallback chain.
pub fn parse_service_date(raw: &str) -> Option<NaiveDateTime> {
	let inner = unwrap_date(raw)?;
	parse_constructor_form(inner).or_else(|| parse_epoch_millis(inner))
}

fn unwrap_date(raw: &str) -> Option<&str> {
	raw.strip_prefix("/Date(")?.strip_suffix(")/")
}

/// Comma-separated `year, month (zero-based), day, hour, minute, second,
/// millisecond` components.
pub fn parse_constructor_form(inner: &str) -> Option<NaiveDateTime> {
	let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
	if parts.len() != 7 {
		return None;
	}
	let year: i32 = parts[0].parse().ok()?;
	let month0: u32 = parts[1].parse().ok()?;
	let day: u32 = parts[2].parse().ok()?;
	let hour: u32 = parts[3].parse().ok()?;
	let minute: u32 = parts[4].parse().ok()?;
	let second: u32 = parts[5].parse().ok()?;
	let millisecond: u32 = parts[6].parse().ok()?;

	NaiveDate::from_ymd_opt(year, month0 + 1, day)?
		.and_hms_milli_opt(hour, minute, second, millisecond)
}

/// A single integer of milliseconds since the Unix epoch, UTC.
pub fn parse_epoch_millis(inner: &str) -> Option<NaiveDateTime> {
	let millis: i64 = inner.trim().parse().ok()?;
	Some(DateTime::from_timestamp_millis(millis)?.naive_utc())
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::{Datelike, Timelike};

	#[test]
	fn test_constructor_form_converts_zero_based_month() {
		let parsed = parse_service_date("/Date(2019,11,5,17,7,26,0)/").expect("should parse");
		assert_eq!(
			(parsed.year(), parsed.month(), parsed.day()),
			(2019, 12, 5)
		);
		assert_eq!(
			(parsed.hour(), parsed.minute(), parsed.second()),
			(17, 7, 26)
		);
	}

	#[test]
	fn test_constructor_payload_fails_epoch_strategy() {
		assert!(parse_epoch_millis("2019,11,5,17,7,26,0").is_none());
	}

	#[test]
	fn test_epoch_millis_converts_to_utc() {
		let parsed = parse_service_date("/Date(1612534319000)/").expect("should parse");
		assert_eq!(
			parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
			"2021-02-05 14:11:59"
		);
	}

	#[test]
	fn test_epoch_payload_fails_constructor_strategy() {
		assert!(parse_constructor_form("1612534319000").is_none());
	}

	#[test]
	fn test_unrecognized_payload_is_absent_not_an_error() {
		assert!(parse_service_date("/Date(not-a-date)/").is_none());
		assert!(parse_service_date("2021-02-05").is_none());
	}
}
