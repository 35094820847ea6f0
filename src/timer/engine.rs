use crate::core::{DueTime, TimeError, TimeResult};
use crate::interrupt::Interrupter;
use crate::probe::capabilities;
use crate::timer::handle::{WaitOutcome, WaitableTimer};
use crate::timer::strategy;

pub(crate) fn run(
    due: DueTime,
    interrupt: Option<&dyn Interrupter>,
    threshold_ticks: i64,
) -> TimeResult<()> {
    let caps = capabilities()?;
    let due_ticks = due.to_native_ticks()?;

    let timer = WaitableTimer::create(caps)?;
    timer.arm(caps, due_ticks)?;

    let Some(interrupt) = interrupt else {
        return timer.wait();
    };

    loop {
        // Cancellation is recognized only here, never from a wait outcome.
        if interrupt.is_pending() {
            return Err(TimeError::Interrupted);
        }
        interrupt.reset()?;

        if !strategy::should_release(&due, caps.now_ns(), threshold_ticks) {
            // Too close to the due time for the context hand-off to pay for
            // itself; watch the timer alone.
            return timer.wait();
        }

        match timer.wait_with_interrupt(interrupt.wait_handle())? {
            WaitOutcome::TimerFired => return Ok(()),
            // The interrupt object signaled; loop back and re-check the
            // pending flag. Spurious or broadcast wakes restart the wait.
            WaitOutcome::InterruptSignaled => {}
        }
    }
}
