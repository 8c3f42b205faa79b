//! Expiry timestamp resolution for `security.txt`.
//!
//! Accepts either a literal RFC 3339 timestamp or a relative offset like
//! `+1y` applied to "now". A literal is only trusted when its
//! re-serialization round-trips exactly to the input; anything else is
//! re-read as a relative offset. Either way the result is published only if
//! it lies strictly in the future, which guards against shipping an
//! already-expired `security.txt` after config drift.
//!
//! Malformed expressions resolve to `None` rather than erroring, so a bad
//! expiry silently drops the `Expires:` field instead of failing the run.

use chrono::{DateTime, Days, Duration, Months, SecondsFormat, Utc};

/// Resolve an expiry expression against the current time.
///
/// Returns the RFC 3339 timestamp to publish, or `None` when the value is
/// absent, malformed, or not strictly in the future.
#[must_use]
pub fn resolve(value: Option<&str>) -> Option<String> {
    resolve_at(value, Utc::now())
}

/// Resolve an expiry expression against an explicit "now".
///
/// Separated from [`resolve`] so the future-gate and offset arithmetic can
/// be tested deterministically.
#[must_use]
pub fn resolve_at(value: Option<&str>, now: DateTime<Utc>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    // A literal timestamp is used as-is, but only when it round-trips
    // exactly; a lossy spelling falls through to relative parsing.
    if let Ok(literal) = DateTime::parse_from_rfc3339(value)
        && literal.to_rfc3339_opts(SecondsFormat::Secs, false) == value
    {
        return (literal.with_timezone(&Utc) > now).then(|| value.to_string());
    }

    let resolved = apply_offset(value, now)?;
    (resolved > now).then(|| resolved.to_rfc3339_opts(SecondsFormat::Secs, false))
}

/// Apply a relative offset expression (`+1y`, `+6 months`, `-30d`, ...)
/// to `now`. Returns `None` for anything unparseable.
fn apply_offset(value: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let (amount, unit) = split_offset(value)?;
    let magnitude: u32 = amount.unsigned_abs().try_into().ok()?;
    match unit {
        OffsetUnit::Years | OffsetUnit::Months => {
            let months = match unit {
                OffsetUnit::Years => Months::new(magnitude.checked_mul(12)?),
                _ => Months::new(magnitude),
            };
            if amount >= 0 {
                now.checked_add_months(months)
            } else {
                now.checked_sub_months(months)
            }
        },
        OffsetUnit::Weeks | OffsetUnit::Days => {
            let days = match unit {
                OffsetUnit::Weeks => Days::new(u64::from(magnitude).checked_mul(7)?),
                _ => Days::new(u64::from(magnitude)),
            };
            if amount >= 0 {
                now.checked_add_days(days)
            } else {
                now.checked_sub_days(days)
            }
        },
        OffsetUnit::Hours => now.checked_add_signed(Duration::try_hours(amount)?),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OffsetUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
}

/// Split `+6 months` / `+1y` / `-30d` into a signed amount and a unit.
fn split_offset(value: &str) -> Option<(i64, OffsetUnit)> {
    let value = value.trim();
    let (sign, rest) = match value.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => match value.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, value),
        },
    };

    let digits_end = rest.find(|c: char| !c.is_ascii_digit())?;
    if digits_end == 0 {
        return None;
    }
    let amount: i64 = rest[..digits_end].parse().ok()?;

    let unit = match rest[digits_end..].trim().to_ascii_lowercase().as_str() {
        "y" | "year" | "years" => OffsetUnit::Years,
        "m" | "mo" | "month" | "months" => OffsetUnit::Months,
        "w" | "week" | "weeks" => OffsetUnit::Weeks,
        "d" | "day" | "days" => OffsetUnit::Days,
        "h" | "hour" | "hours" => OffsetUnit::Hours,
        _ => return None,
    };

    Some((sign * amount, unit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_none_resolves_to_none() {
        assert_eq!(resolve_at(None, fixed_now()), None);
        assert_eq!(resolve_at(Some(""), fixed_now()), None);
    }

    #[test]
    fn test_plus_one_year_is_now_plus_one_year() {
        assert_eq!(
            resolve_at(Some("+1y"), fixed_now()),
            Some("2027-01-15T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_offset_units() {
        assert_eq!(
            resolve_at(Some("+6 months"), fixed_now()),
            Some("2026-07-15T12:00:00+00:00".to_string())
        );
        assert_eq!(
            resolve_at(Some("+2w"), fixed_now()),
            Some("2026-01-29T12:00:00+00:00".to_string())
        );
        assert_eq!(
            resolve_at(Some("+30d"), fixed_now()),
            Some("2026-02-14T12:00:00+00:00".to_string())
        );
        assert_eq!(
            resolve_at(Some("+12h"), fixed_now()),
            Some("2026-01-16T00:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_future_literal_round_trips_unchanged() {
        let literal = "2027-06-01T00:00:00+00:00";
        assert_eq!(
            resolve_at(Some(literal), fixed_now()),
            Some(literal.to_string())
        );
        // Non-UTC offsets are preserved as authored.
        let offset = "2027-06-01T00:00:00+02:00";
        assert_eq!(
            resolve_at(Some(offset), fixed_now()),
            Some(offset.to_string())
        );
    }

    #[test]
    fn test_past_values_resolve_to_none() {
        assert_eq!(resolve_at(Some("2026-01-14T12:00:00+00:00"), fixed_now()), None);
        assert_eq!(resolve_at(Some("-1d"), fixed_now()), None);
        // Exactly "now" is not strictly in the future.
        assert_eq!(resolve_at(Some("2026-01-15T12:00:00+00:00"), fixed_now()), None);
    }

    #[test]
    fn test_non_round_trip_literal_falls_through_to_none() {
        // Valid RFC 3339, but `z` re-serializes as `+00:00`, so the
        // round-trip fails and it is not a parseable offset either.
        assert_eq!(resolve_at(Some("2027-06-01T00:00:00z"), fixed_now()), None);
        assert_eq!(
            resolve_at(Some("2027-06-01T00:00:00.000+00:00"), fixed_now()),
            None
        );
    }

    #[test]
    fn test_garbage_resolves_to_none() {
        assert_eq!(resolve_at(Some("next tuesday"), fixed_now()), None);
        assert_eq!(resolve_at(Some("+y"), fixed_now()), None);
        assert_eq!(resolve_at(Some("+1fortnight"), fixed_now()), None);
    }
}
