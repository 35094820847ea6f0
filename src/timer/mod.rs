mod engine;
mod handle;
mod strategy;

use std::time::Duration;

use crate::core::{
    DEFAULT_RELEASE_THRESHOLD_TICKS, DueTime, MIN_TIMED_SLEEP_S, TimeError, TimeResult, Timestamp,
};
use crate::interrupt::Interrupter;
use crate::probe::capabilities;

/// Sleep for `seconds`.
///
/// Values at or below [`MIN_TIMED_SLEEP_S`] (including negative ones) return
/// immediately without creating any OS resource. Values that do not fit a
/// duration (non-finite or beyond its range) are rejected.
pub fn sleep(seconds: f64) -> TimeResult<()> {
    if seconds <= MIN_TIMED_SLEEP_S {
        return Ok(());
    }
    let duration = Duration::try_from_secs_f64(seconds).map_err(|_| {
        TimeError::InvalidInput(format!(
            "sleep seconds must be a finite duration, got {}",
            seconds
        ))
    })?;

    sleep_due(DueTime::Relative(duration), None)
}

/// Sleep until the wall clock reaches `t_s` seconds since the Unix epoch.
///
/// A due time in the past fires immediately. Integer-precision callers
/// should prefer [`sleep_until_ns`].
pub fn sleep_until(t_s: f64) -> TimeResult<()> {
    if !t_s.is_finite() {
        return Err(TimeError::InvalidInput(format!(
            "wakeup time must be finite, got {}",
            t_s
        )));
    }

    // Saturating cast: pre-epoch targets become 0 and fire immediately,
    // absurdly large ones fail tick conversion before any OS call.
    sleep_due(DueTime::Absolute((t_s * 1e9) as Timestamp), None)
}

/// Sleep until the wall clock reaches `t_ns` nanoseconds since the Unix
/// epoch. A due time in the past fires immediately.
pub fn sleep_until_ns(t_ns: Timestamp) -> TimeResult<()> {
    sleep_due(DueTime::Absolute(t_ns), None)
}

/// Sleep until `due`, optionally abortable through `interrupt`.
///
/// This is the engine-level entry point the convenience wrappers build on.
/// Binding layers that own a cancellation source pass it here; when
/// `interrupt` is `None` the wait can only end with the timer firing or an
/// OS failure. Returns [`TimeError::Interrupted`] when a pending
/// interruption is observed, with the timer handle already released.
pub fn sleep_due(due: DueTime, interrupt: Option<&dyn Interrupter>) -> TimeResult<()> {
    engine::run(due, interrupt, DEFAULT_RELEASE_THRESHOLD_TICKS)
}

/// [`sleep_due`] with an explicit context-release threshold in 100 ns ticks.
pub fn sleep_due_with(
    due: DueTime,
    interrupt: Option<&dyn Interrupter>,
    threshold_ticks: i64,
) -> TimeResult<()> {
    engine::run(due, interrupt, threshold_ticks)
}

/// Whether a host runtime should release its execution lock while blocking
/// on `due`.
///
/// True only when the remaining wait is at or above `threshold_ticks`
/// (100 ns units); shorter waits lose more to the hand-off than they spend
/// blocked. [`DEFAULT_RELEASE_THRESHOLD_TICKS`] is a reasonable threshold.
pub fn should_release_context(due: DueTime, threshold_ticks: i64) -> TimeResult<bool> {
    Ok(strategy::should_release(
        &due,
        capabilities()?.now_ns(),
        threshold_ticks,
    ))
}
