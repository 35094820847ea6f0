use std::fmt;
use std::time::Duration;

use crate::core::{TimeError, TimeResult};

/// Nanoseconds elapsed since 1970-01-01T00:00:00Z.
pub type Timestamp = u64;

/// Nanoseconds between the FILETIME epoch (1601-01-01) and the Unix epoch.
pub const FILETIME_EPOCH_OFFSET_NS: u64 = 11_644_473_600_000_000_000;

/// One FILETIME tick is 100 ns.
pub const NS_PER_TICK: u64 = 100;

/// Sleep requests at or below this many seconds return immediately without
/// arming a timer; the arm/wait overhead alone exceeds such a wait.
pub const MIN_TIMED_SLEEP_S: f64 = 1e-4;

/// Remaining-wait threshold (in 100 ns ticks) at or above which the calling
/// execution context may be released to concurrent work while blocked.
/// 3_000 ticks = 300 microseconds.
pub const DEFAULT_RELEASE_THRESHOLD_TICKS: i64 = 3_000;

/// Target instant of one sleep call.
///
/// The native waitable-timer encoding overloads the sign of a single `i64`
/// (negative = relative to arm time, non-negative = absolute FILETIME
/// ticks). That encoding exists only at the OS call boundary; everywhere
/// else the variant is explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueTime {
    Relative(Duration),
    Absolute(Timestamp),
}

impl fmt::Display for DueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relative(d) => write!(f, "in {:?}", d),
            Self::Absolute(ns) => write!(f, "at {} ns since epoch", ns),
        }
    }
}

impl DueTime {
    /// Translate to the signed 100 ns encoding consumed by
    /// `SetWaitableTimerEx`.
    pub fn to_native_ticks(&self) -> TimeResult<i64> {
        match self {
            Self::Relative(duration) => {
                let ticks = i64::try_from(duration.as_nanos() / NS_PER_TICK as u128)
                    .map_err(|_| {
                        TimeError::InvalidInput(format!(
                            "relative due time {:?} exceeds the native tick range",
                            duration
                        ))
                    })?;
                // A relative due time of zero ticks would be read as absolute;
                // arm for the minimum one tick instead.
                Ok(-ticks.max(1))
            }
            Self::Absolute(ns) => timestamp_to_ticks(*ns),
        }
    }

    /// Remaining wait in 100 ns ticks, negative when the due time has
    /// already passed.
    pub fn remaining_ticks(&self, now_ns: Timestamp) -> i64 {
        match self {
            Self::Relative(duration) => {
                i64::try_from(duration.as_nanos() / NS_PER_TICK as u128).unwrap_or(i64::MAX)
            }
            Self::Absolute(ns) => {
                let delta = (*ns as i128 - now_ns as i128) / NS_PER_TICK as i128;
                delta.clamp(i64::MIN as i128, i64::MAX as i128) as i64
            }
        }
    }
}

/// Convert an epoch timestamp to absolute FILETIME ticks.
pub fn timestamp_to_ticks(ns: Timestamp) -> TimeResult<i64> {
    let filetime_ns = ns.checked_add(FILETIME_EPOCH_OFFSET_NS).ok_or_else(|| {
        TimeError::InvalidInput(format!("timestamp {} ns overflows the FILETIME range", ns))
    })?;

    i64::try_from(filetime_ns / NS_PER_TICK).map_err(|_| {
        TimeError::InvalidInput(format!("timestamp {} ns overflows the FILETIME range", ns))
    })
}

/// Convert absolute FILETIME ticks back to an epoch timestamp.
pub fn ticks_to_timestamp(ticks: i64) -> TimeResult<Timestamp> {
    let filetime_ns = u64::try_from(ticks)
        .ok()
        .and_then(|t| t.checked_mul(NS_PER_TICK))
        .ok_or_else(|| {
            TimeError::InvalidInput(format!("{} is not a valid absolute tick count", ticks))
        })?;

    filetime_ns
        .checked_sub(FILETIME_EPOCH_OFFSET_NS)
        .ok_or_else(|| {
            TimeError::InvalidInput(format!("tick count {} predates the Unix epoch", ticks))
        })
}
