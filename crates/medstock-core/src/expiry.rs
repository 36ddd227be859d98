// Expiry date arithmetic for the dashboard counters

use chrono::NaiveDate;

/// Records expiring within this many days of today count as near expiry.
pub const NEAR_EXPIRY_DAYS: i64 = 30;

/// Format expiry dates are stored in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a stored date string, returning `None` when it is not `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Days from `today` until `expiry`. Negative once the date has passed.
pub fn days_until(expiry: &str, today: NaiveDate) -> Option<i64> {
    parse_date(expiry).map(|date| (date - today).num_days())
}

/// Counts the dates that fall on or before `today + NEAR_EXPIRY_DAYS`.
///
/// Already expired dates are included. Dates that fail to parse are skipped.
pub fn count_near_expiry<'a, I>(expiry_dates: I, today: NaiveDate) -> usize
where
    I: IntoIterator<Item = &'a str>,
{
    expiry_dates
        .into_iter()
        .filter(|date| ExpiryStatus::of(date, today).is_near_expiry())
        .count()
}

/// Classification of a record's expiry date relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryStatus {
    /// The expiry date is in the past
    Expired,
    /// Expires within the near-expiry window
    NearExpiry,
    /// Expires later than the window
    Ok,
    /// The stored date could not be parsed
    Unknown,
}

impl ExpiryStatus {
    pub fn of(expiry: &str, today: NaiveDate) -> Self {
        match days_until(expiry, today) {
            None => Self::Unknown,
            Some(days) if days < 0 => Self::Expired,
            Some(days) if days <= NEAR_EXPIRY_DAYS => Self::NearExpiry,
            Some(_) => Self::Ok,
        }
    }

    /// Expired records count towards the near-expiry total.
    pub fn is_near_expiry(self) -> bool {
        matches!(self, Self::Expired | Self::NearExpiry)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Expired => "Expired",
            Self::NearExpiry => "Near expiry",
            Self::Ok => "OK",
            Self::Unknown => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_parse_date_accepts_iso_dates() {
        assert_eq!(parse_date("2025-03-01"), Some(date("2025-03-01")));
        assert_eq!(parse_date(" 2025-03-01 "), Some(date("2025-03-01")));
    }

    #[test]
    fn test_parse_date_rejects_other_formats() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("01/03/2025"), None);
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("soon"), None);
    }

    #[test]
    fn test_days_until() {
        let today = date("2025-01-01");
        assert_eq!(days_until("2025-01-31", today), Some(30));
        assert_eq!(days_until("2024-12-31", today), Some(-1));
        assert_eq!(days_until("garbage", today), None);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let today = date("2025-01-01");
        assert_eq!(ExpiryStatus::of("2025-01-01", today), ExpiryStatus::NearExpiry);
        assert_eq!(ExpiryStatus::of("2025-01-31", today), ExpiryStatus::NearExpiry);
        assert_eq!(ExpiryStatus::of("2025-02-01", today), ExpiryStatus::Ok);
    }

    #[test]
    fn test_expired_counts_as_near_expiry() {
        // Paracetamol expired long before "today"
        let today = date("2026-10-19");
        let status = ExpiryStatus::of("2024-01-01", today);
        assert_eq!(status, ExpiryStatus::Expired);
        assert!(status.is_near_expiry());
        assert_eq!(count_near_expiry(["2024-01-01"], today), 1);
    }

    #[test]
    fn test_count_skips_unparsable_dates() {
        let today = date("2025-06-01");
        let dates = ["2025-06-10", "2025-05-01", "not a date", "", "2026-01-01"];
        assert_eq!(count_near_expiry(dates, today), 2);
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_near_expiry(std::iter::empty(), date("2025-06-01")), 0);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(ExpiryStatus::Unknown.label(), "Unknown");
        assert!(!ExpiryStatus::Unknown.is_near_expiry());
        assert!(!ExpiryStatus::Ok.is_near_expiry());
    }
}
