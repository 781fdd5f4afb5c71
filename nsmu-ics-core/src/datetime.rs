//! Assembly of date and time fragments into lesson timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::error::ExtractError;

/// Institutional UTC offset.
///
/// The schedule pages carry no timezone; the institution sits in
/// Arkhangelsk (UTC+3, no DST). Pinning the offset keeps serialization
/// deterministic regardless of where the service runs.
pub const NSMU_UTC_OFFSET_HOURS: i32 = 3;

/// Fixed offset of the institution's local time.
pub fn nsmu_offset() -> FixedOffset {
    FixedOffset::east_opt(NSMU_UTC_OFFSET_HOURS * 3600).unwrap()
}

/// Combines separately extracted date and time parts into one timestamp
/// in the institutional timezone.
///
/// `month_index` is 0-based (0 = January), matching the date extractor's
/// output. Out-of-range components are reported as an extraction failure.
pub fn assemble(
    year: i32,
    month_index: u32,
    day: u32,
    hour: u32,
    minute: u32,
) -> Result<DateTime<FixedOffset>, ExtractError> {
    NaiveDate::from_ymd_opt(year, month_index + 1, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .and_then(|dt| nsmu_offset().from_local_datetime(&dt).single())
        .ok_or(ExtractError::Timestamp)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn assembles_local_timestamp_with_institutional_offset() {
        let dt = assemble(2025, 10, 8, 13, 0).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-11-08T13:00:00+03:00");
        assert_eq!(
            dt.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2025, 11, 8, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn month_index_is_zero_based() {
        let january = assemble(2025, 0, 15, 8, 30).unwrap();
        assert_eq!(january.format("%d.%m.%Y").to_string(), "15.01.2025");
    }

    #[test]
    fn out_of_range_components_fail_instead_of_panicking() {
        assert_eq!(assemble(2025, 1, 30, 9, 0), Err(ExtractError::Timestamp));
        assert_eq!(assemble(2025, 12, 1, 9, 0), Err(ExtractError::Timestamp));
        assert_eq!(assemble(2025, 3, 10, 24, 0), Err(ExtractError::Timestamp));
    }
}
