//! Time helpers

use chrono::Utc;

/// Current time as Unix epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Current business date as `YYYY-MM-DD` (UTC)
///
/// Day locks are keyed on this value.
pub fn business_date() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// Whole minutes elapsed since an epoch-millisecond timestamp
pub fn minutes_since(millis: i64) -> i64 {
    ((now_millis() - millis) / 60_000).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in millis; anything earlier means a broken clock source
        assert!(now_millis() > 1_577_836_800_000);
    }

    #[test]
    fn test_business_date_format() {
        let date = business_date();
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(date.as_bytes()[7], b'-');
    }

    #[test]
    fn test_minutes_since() {
        assert_eq!(minutes_since(now_millis()), 0);
        assert!(minutes_since(now_millis() - 5 * 60_000) >= 5);
        // Future timestamps clamp to zero
        assert_eq!(minutes_since(now_millis() + 60_000), 0);
    }
}
