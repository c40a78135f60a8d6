//! Time-related utilities with clock abstraction for testability.
//!
//! Chat timestamps are the server's local wall-clock time, rendered as `HH:MM`.

use chrono::{DateTime, FixedOffset, Local};

/// Format used for chat message timestamps (24-hour clock)
pub const CHAT_TIMESTAMP_FORMAT: &str = "%H:%M";

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get the current local time, including its UTC offset
    fn now(&self) -> DateTime<FixedOffset>;
}

/// System clock implementation (uses actual system time in the local time zone)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: DateTime<FixedOffset>,
}

impl FixedClock {
    /// Create a new fixed clock with the given time
    pub fn new(fixed_time: DateTime<FixedOffset>) -> Self {
        Self { fixed_time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.fixed_time
    }
}

/// Render a time as a chat timestamp (`HH:MM`)
pub fn format_chat_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format(CHAT_TIMESTAMP_FORMAT).to_string()
}

/// Current chat timestamp according to the given clock
pub fn chat_timestamp(clock: &dyn Clock) -> String {
    format_chat_timestamp(&clock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn jst(hour: u32, minute: u32, second: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 1, 1, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_system_clock_returns_increasing_times() {
        // テスト項目: SystemClock が呼び出すたびに単調に進む時刻を返す
        // given (前提条件):
        let clock = SystemClock;

        // when (操作):
        let time1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        // then (期待する結果):
        assert!(time2 >= time1);
    }

    #[test]
    fn test_fixed_clock_returns_fixed_time() {
        // テスト項目: FixedClock が何度呼び出しても同じ時刻を返す
        // given (前提条件):
        let fixed_time = jst(12, 34, 56);
        let clock = FixedClock::new(fixed_time);

        // when (操作):
        let time1 = clock.now();
        let time2 = clock.now();

        // then (期待する結果):
        assert_eq!(time1, fixed_time);
        assert_eq!(time2, fixed_time);
    }

    #[test]
    fn test_format_chat_timestamp_is_hour_and_minute() {
        // テスト項目: 秒は切り捨てられ HH:MM 形式になる
        // given (前提条件):
        let time = jst(9, 5, 59);

        // when (操作):
        let result = format_chat_timestamp(&time);

        // then (期待する結果):
        assert_eq!(result, "09:05");
    }

    #[test]
    fn test_format_chat_timestamp_uses_the_time_offset() {
        // テスト項目: UTC ではなく時刻が持つオフセット（ローカル時刻）で表示される
        // given (前提条件): 2024-01-01 23:30 JST == 14:30 UTC
        let time = jst(23, 30, 0);

        // when (操作):
        let result = format_chat_timestamp(&time);

        // then (期待する結果):
        assert_eq!(result, "23:30");
    }

    #[test]
    fn test_chat_timestamp_with_fixed_clock() {
        // テスト項目: chat_timestamp が注入された Clock の時刻を使う
        // given (前提条件):
        let clock = FixedClock::new(jst(0, 0, 0));

        // when (操作):
        let result = chat_timestamp(&clock);

        // then (期待する結果):
        assert_eq!(result, "00:00");
        assert_eq!(result.len(), 5);
    }
}
