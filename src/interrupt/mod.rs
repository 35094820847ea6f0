use std::sync::atomic::{AtomicBool, Ordering};

use windows::Win32::Foundation::{CloseHandle, HANDLE};
use windows::Win32::System::Threading::{CreateEventW, ResetEvent, SetEvent};
use windows::core::PCWSTR;

use crate::core::{TimeError, TimeResult};
use crate::probe::win32_code;

/// Bridge through which an external interruption request becomes observable
/// to a blocked sleep.
///
/// The sleep engine checks [`is_pending`](Interrupter::is_pending) before
/// every wait attempt, resets the wait object, then blocks on the timer and
/// [`wait_handle`](Interrupter::wait_handle) simultaneously. A signaled wait
/// object alone never cancels the sleep; it only forces a re-check of the
/// pending flag, so spurious wakes and broadcast deliveries stay harmless.
///
/// Implementations are owned by the host environment. A binding layer
/// typically supplies one only on the thread that receives interruption
/// signals and omits it everywhere else.
pub trait Interrupter {
    /// Whether an interruption request is currently pending.
    fn is_pending(&self) -> bool;

    /// Return the wait object to its unsignaled state before a wait attempt.
    fn reset(&self) -> TimeResult<()>;

    /// Kernel object the engine waits on alongside the timer.
    fn wait_handle(&self) -> HANDLE;
}

/// [`Interrupter`] backed by a manual-reset Win32 event and a pending flag.
///
/// Suitable for wiring a Ctrl-C handler or any other out-of-band cancel
/// source: call [`request`](InterruptEvent::request) from the signaling
/// thread and the blocked sleep returns [`TimeError::Interrupted`] at its
/// next poll point.
pub struct InterruptEvent {
    event: HANDLE,
    pending: AtomicBool,
}

// The event handle is a process-local kernel object; signaling and waiting
// from different threads is part of its contract.
unsafe impl Send for InterruptEvent {}
unsafe impl Sync for InterruptEvent {}

impl InterruptEvent {
    pub fn new() -> TimeResult<Self> {
        let event = unsafe { CreateEventW(None, true, false, PCWSTR::null()) }
            .map_err(|e| TimeError::EventFailure(win32_code(&e)))?;

        Ok(Self {
            event,
            pending: AtomicBool::new(false),
        })
    }

    /// Request interruption of the sleep currently waiting on this event.
    pub fn request(&self) -> TimeResult<()> {
        self.pending.store(true, Ordering::Release);
        unsafe { SetEvent(self.event) }.map_err(|e| TimeError::EventFailure(win32_code(&e)))
    }

    /// Acknowledge a delivered interruption so the event can be reused.
    pub fn clear(&self) -> TimeResult<()> {
        self.pending.store(false, Ordering::Release);
        unsafe { ResetEvent(self.event) }.map_err(|e| TimeError::EventFailure(win32_code(&e)))
    }
}

impl Interrupter for InterruptEvent {
    fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    fn reset(&self) -> TimeResult<()> {
        // Only the wait object is reset here; the pending flag persists until
        // the interruption is acknowledged via `clear`.
        unsafe { ResetEvent(self.event) }.map_err(|e| TimeError::EventFailure(win32_code(&e)))
    }

    fn wait_handle(&self) -> HANDLE {
        self.event
    }
}

impl Drop for InterruptEvent {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.event);
        }
    }
}
