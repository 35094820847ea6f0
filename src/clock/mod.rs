use crate::core::{TimeResult, Timestamp};
use crate::probe::capabilities;

/// Current wall-clock time in nanoseconds since the Unix epoch.
///
/// Reads `GetSystemTimePreciseAsFileTime`, which resolves well below a
/// microsecond. Errors only if the OS entry point could not be resolved.
pub fn time_ns() -> TimeResult<Timestamp> {
    Ok(capabilities()?.now_ns())
}

/// Current wall-clock time in seconds since the Unix epoch.
///
/// An `f64` holds 53 mantissa bits, so the conversion loses precision at
/// current epoch magnitudes (hundreds of nanoseconds). Use [`time_ns`] when
/// that matters.
pub fn time() -> TimeResult<f64> {
    Ok(capabilities()?.now_ns() as f64 * 1e-9)
}

/// Busy-wait until the clock reaches `deadline_ns`.
///
/// Polls the precise clock in a tight loop with no suspension and no
/// yielding, fully occupying one core until the deadline. Wake latency is
/// bounded only by the clock read itself, so this is the right tool for
/// sub-millisecond residual waits and the wrong one for anything longer.
/// Cancellation is not honored.
pub fn hotloop_until_ns(deadline_ns: Timestamp) -> TimeResult<()> {
    let caps = capabilities()?;

    while caps.now_ns() < deadline_ns {
        std::hint::spin_loop();
    }

    Ok(())
}
