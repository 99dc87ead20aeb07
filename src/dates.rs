use crate::error::ApiError;
use crate::models::DateRangeFilter;
use chrono::{NaiveDate, Utc};
use log::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert two calendar dates into a relative filter window against today.
///
/// "Today" is the current UTC calendar date, so a run produces the same
/// offsets regardless of the operator's local timezone. Offsets may be
/// negative for future dates and no ordering between start and end is
/// required; the API receives whatever signed values result.
pub fn resolve_offsets(start_date: &str, end_date: &str) -> Result<DateRangeFilter, ApiError> {
    offsets_between(start_date, end_date, Utc::now().date_naive())
}

/// Core of [`resolve_offsets`] with an explicit reference date.
pub fn offsets_between(
    start_date: &str,
    end_date: &str,
    today: NaiveDate,
) -> Result<DateRangeFilter, ApiError> {
    let start = NaiveDate::parse_from_str(start_date, DATE_FORMAT)?;
    let end = NaiveDate::parse_from_str(end_date, DATE_FORMAT)?;
    let filter = DateRangeFilter {
        newer_than_days: (today - start).num_days(),
        older_than_days: (today - end).num_days(),
    };
    debug!(
        "Resolved dates {} and {} to offsets ({}, {}) days",
        start, end, filter.newer_than_days, filter.older_than_days
    );
    Ok(filter)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn resolves_whole_day_offsets() {
        let filter = offsets_between("2024-01-01", "2024-01-10", day(2024, 1, 15))
            .expect("dates should resolve");
        assert_eq!(filter.newer_than_days, 14);
        assert_eq!(filter.older_than_days, 5);
    }

    #[test]
    fn future_dates_yield_negative_offsets() {
        let filter = offsets_between("2024-02-01", "2024-01-01", day(2024, 1, 15))
            .expect("dates should resolve");
        assert_eq!(filter.newer_than_days, -17);
        assert_eq!(filter.older_than_days, 14);
    }

    #[test]
    fn rejects_wrong_format() {
        let err = offsets_between("01-01-2024", "2024-01-10", day(2024, 1, 15)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDateFormat(_)));
    }

    #[test]
    fn rejects_invalid_month() {
        let err = offsets_between("2024-01-01", "2024-13-01", day(2024, 1, 15)).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDateFormat(_)));
    }
}
