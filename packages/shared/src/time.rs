//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Utc};

/// JST is UTC+9.
const JST: FixedOffset = match FixedOffset::east_opt(9 * 3600) {
    Some(offset) => offset,
    None => panic!("invalid JST offset"),
};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new fixed clock returning `fixed_time`
    pub fn new(fixed_time: DateTime<Utc>) -> Self {
        Self { fixed_time }
    }

    /// Create a fixed clock from a Unix timestamp in milliseconds.
    ///
    /// Out-of-range values fall back to the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self::new(DateTime::from_timestamp_millis(millis).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.fixed_time
    }
}

/// Convert a UTC instant to JST RFC 3339 format
pub fn to_jst_rfc3339(at: &DateTime<Utc>) -> String {
    at.with_timezone(&JST).to_rfc3339()
}

/// Wall-clock time of day in JST, used for compact terminal output
pub fn to_jst_clock_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&JST).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_returns_increasing_timestamps() {
        // テスト項目: SystemClock が呼び出すたびに増加する時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let first = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let second = clock.now();

        // then (期待する結果):
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_returns_consistent_timestamp() {
        // テスト項目: FixedClock が複数回呼び出しても同じ時刻を返す
        // given (前提条件):
        let clock = FixedClock::from_millis(1_672_498_800_000);

        // when (操作):
        let first = clock.now();
        let second = clock.now();

        // then (期待する結果):
        assert_eq!(first, second);
        assert_eq!(first.timestamp_millis(), 1_672_498_800_000);
    }

    #[test]
    fn test_to_jst_rfc3339_format() {
        // テスト項目: UTC の時刻が JST の RFC 3339 形式に変換される
        // given (前提条件):
        // 2022-12-31 15:00:00 UTC == 2023-01-01 00:00:00 JST
        let at = FixedClock::from_millis(1_672_498_800_000).now();

        // when (操作):
        let result = to_jst_rfc3339(&at);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.ends_with("+09:00"));
    }

    #[test]
    fn test_to_jst_clock_time() {
        // テスト項目: 時刻のみの表示が JST で整形される
        // given (前提条件):
        let at = FixedClock::from_millis(1_672_498_800_000).now();

        // when (操作):
        let result = to_jst_clock_time(&at);

        // then (期待する結果):
        assert_eq!(result, "00:00:00");
    }
}
