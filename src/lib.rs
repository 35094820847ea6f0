//! High-resolution wall-clock time and interruptible precise sleep for Windows.
//!
//! The default Windows timing facilities resolve at the scheduler quantum
//! (~15.6 ms). This crate reads `GetSystemTimePreciseAsFileTime` for
//! sub-microsecond timestamps and sleeps on one-shot waitable timers created
//! with `CREATE_WAITABLE_TIMER_HIGH_RESOLUTION`, falling back to an exact
//! busy-wait for deadlines the scheduler cannot hit.
//!
//! Requires Windows 8 or newer for the precise clock. High-resolution timers
//! need Windows 10 1803 or newer; on older builds the sleep engine downgrades
//! to an ordinary-resolution timer per call and stays correct, just coarser.
//!
//! Every sleep owns its timer handle end-to-end, so calls on different
//! threads never interfere. Cancellation is cooperative: pass an
//! [`Interrupter`] to [`sleep_due`] and a long block aborts at the next poll
//! point instead of running to its due time.

#![cfg(windows)]

pub mod clock;
pub mod core;
pub mod interrupt;
pub mod probe;
pub mod timer;

pub use crate::core::{
    DEFAULT_RELEASE_THRESHOLD_TICKS, DueTime, MIN_TIMED_SLEEP_S, TimeError, TimeResult, Timestamp,
};

pub use crate::probe::{Capabilities, capabilities, init};

pub use crate::clock::{hotloop_until_ns, time, time_ns};

pub use crate::timer::{
    should_release_context, sleep, sleep_due, sleep_due_with, sleep_until, sleep_until_ns,
};

pub use crate::interrupt::{InterruptEvent, Interrupter};
