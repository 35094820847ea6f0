use crate::core::{DueTime, Timestamp};

/// Whether the calling execution context may be handed to concurrent work
/// while blocked on `due`.
///
/// Releasing the context has a fixed cost of its own; below the threshold
/// that cost exceeds the remaining wait and defeats precision, so short
/// waits hold the context and watch the timer alone.
pub(crate) fn should_release(due: &DueTime, now_ns: Timestamp, threshold_ticks: i64) -> bool {
    due.remaining_ticks(now_ns) >= threshold_ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DEFAULT_RELEASE_THRESHOLD_TICKS;
    use std::time::Duration;

    #[test]
    fn test_long_relative_wait_releases() {
        let due = DueTime::Relative(Duration::from_millis(100));
        assert!(should_release(&due, 0, DEFAULT_RELEASE_THRESHOLD_TICKS));
    }

    #[test]
    fn test_short_relative_wait_holds() {
        let due = DueTime::Relative(Duration::from_micros(50));
        assert!(!should_release(&due, 0, DEFAULT_RELEASE_THRESHOLD_TICKS));
    }

    #[test]
    fn test_threshold_boundary_releases() {
        // 300 us remaining is exactly the default threshold.
        let due = DueTime::Relative(Duration::from_micros(300));
        assert!(should_release(&due, 0, DEFAULT_RELEASE_THRESHOLD_TICKS));
    }

    #[test]
    fn test_absolute_wait_consults_clock() {
        let now: Timestamp = 1_000_000_000;
        let far = DueTime::Absolute(now + 10_000_000);
        let near = DueTime::Absolute(now + 100_000);
        let past = DueTime::Absolute(now - 500);

        assert!(should_release(&far, now, DEFAULT_RELEASE_THRESHOLD_TICKS));
        assert!(!should_release(&near, now, DEFAULT_RELEASE_THRESHOLD_TICKS));
        assert!(!should_release(&past, now, DEFAULT_RELEASE_THRESHOLD_TICKS));
    }
}
