use windows::Win32::Foundation::{CloseHandle, HANDLE, WAIT_FAILED, WAIT_OBJECT_0};
use windows::Win32::System::Threading::{INFINITE, WaitForMultipleObjects, WaitForSingleObject};

use crate::core::{TimeError, TimeResult};
use crate::probe::{Capabilities, last_os_error};

// Constants consumed through the dynamically resolved creation entry point.
const CREATE_WAITABLE_TIMER_HIGH_RESOLUTION: u32 = 0x0000_0002;
const TIMER_ALL_ACCESS: u32 = 0x001F_0003;
const ERROR_INVALID_PARAMETER: u32 = 87;

pub(crate) enum WaitOutcome {
    TimerFired,
    InterruptSignaled,
}

/// One armed, one-shot waitable timer.
///
/// Created immediately before a sleep, armed once, waited on, and closed by
/// `Drop` on every exit path. Never reused across calls.
pub(crate) struct WaitableTimer {
    handle: HANDLE,
}

impl WaitableTimer {
    pub fn create(caps: &Capabilities) -> TimeResult<Self> {
        let handle = caps.create_timer(CREATE_WAITABLE_TIMER_HIGH_RESOLUTION, TIMER_ALL_ACCESS);
        if !handle.0.is_null() {
            return Ok(Self { handle });
        }

        let code = last_os_error();
        if code != ERROR_INVALID_PARAMETER {
            return Err(TimeError::TimerCreation(code));
        }

        // Windows builds older than 10 1803 reject the high-resolution flag
        // with ERROR_INVALID_PARAMETER. Retry once with an ordinary timer:
        // still correct, just ~15 ms granular.
        tracing::debug!(code, "high-resolution timer unsupported, retrying without the flag");

        let handle = caps.create_timer(0, TIMER_ALL_ACCESS);
        if handle.0.is_null() {
            return Err(TimeError::TimerCreation(last_os_error()));
        }
        Ok(Self { handle })
    }

    pub fn arm(&self, caps: &Capabilities, due_ticks: i64) -> TimeResult<()> {
        if caps.arm_timer(self.handle, due_ticks) {
            Ok(())
        } else {
            Err(TimeError::TimerArm(last_os_error()))
        }
    }

    pub fn wait(&self) -> TimeResult<()> {
        let rc = unsafe { WaitForSingleObject(self.handle, INFINITE) };
        if rc == WAIT_FAILED {
            return Err(TimeError::WaitFailed(last_os_error()));
        }
        Ok(())
    }

    pub fn wait_with_interrupt(&self, interrupt: HANDLE) -> TimeResult<WaitOutcome> {
        let handles = [self.handle, interrupt];
        let rc = unsafe { WaitForMultipleObjects(&handles, false, INFINITE) };

        if rc == WAIT_FAILED {
            return Err(TimeError::WaitFailed(last_os_error()));
        }
        if rc == WAIT_OBJECT_0 {
            Ok(WaitOutcome::TimerFired)
        } else {
            Ok(WaitOutcome::InterruptSignaled)
        }
    }
}

impl Drop for WaitableTimer {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}
