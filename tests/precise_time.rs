#![cfg(windows)]

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use win_precise_time::{
    DueTime, InterruptEvent, TimeError, hotloop_until_ns, init, should_release_context, sleep,
    sleep_due, sleep_due_with, sleep_until, sleep_until_ns, time, time_ns,
};

// Overshoot bound generous enough for a loaded CI machine.
const OVERSHOOT: Duration = Duration::from_millis(100);

#[test]
fn init_is_idempotent() {
    init().unwrap();
    init().unwrap();
}

#[test]
fn time_ns_is_monotonic() {
    let mut prev = time_ns().unwrap();
    for _ in 0..1_000 {
        let next = time_ns().unwrap();
        assert!(next >= prev);
        prev = next;
    }
}

#[test]
fn time_agrees_with_system_clock() {
    let system = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs_f64();
    let precise = time().unwrap();

    assert!((precise - system).abs() < 0.5);
}

#[test]
fn near_zero_and_negative_sleeps_return_immediately() {
    let start = Instant::now();
    sleep(0.0).unwrap();
    sleep(-1.0).unwrap();
    sleep(1e-5).unwrap();

    assert!(start.elapsed() < Duration::from_millis(5));
}

#[test]
fn non_finite_sleep_arguments_are_rejected() {
    assert!(matches!(
        sleep(f64::INFINITY),
        Err(TimeError::InvalidInput(_))
    ));
    assert!(matches!(sleep(f64::NAN), Err(TimeError::InvalidInput(_))));
    // Negative infinity falls under the immediate-return shortcut.
    assert!(sleep(f64::NEG_INFINITY).is_ok());
}

#[test]
fn overlong_sleep_argument_is_rejected_not_panicked() {
    // Finite, but past what a duration can hold.
    assert!(matches!(sleep(1e20), Err(TimeError::InvalidInput(_))));
}

#[test]
fn sleep_blocks_for_requested_duration() {
    let start = Instant::now();
    sleep(0.05).unwrap();
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(49), "woke early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(50) + OVERSHOOT);
}

#[test]
fn sleep_until_ns_wakes_at_or_after_target() {
    let start = Instant::now();
    let target = time_ns().unwrap() + 50_000_000;
    sleep_until_ns(target).unwrap();

    assert!(time_ns().unwrap() >= target);
    assert!(start.elapsed() < Duration::from_millis(50) + OVERSHOOT);
}

#[test]
fn sleep_until_seconds_wakes_near_target() {
    let start = Instant::now();
    let target = time().unwrap() + 0.03;
    sleep_until(target).unwrap();

    // Float seconds carry sub-microsecond noise at epoch magnitude, so only
    // a coarse lower bound is meaningful here.
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(25), "woke early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(30) + OVERSHOOT);
}

#[test]
fn sleep_until_ns_in_the_past_fires_immediately() {
    let target = time_ns().unwrap().saturating_sub(1_000_000_000);

    let start = Instant::now();
    sleep_until_ns(target).unwrap();

    assert!(start.elapsed() < Duration::from_millis(20));
}

#[test]
fn hotloop_returns_once_deadline_reached() {
    let deadline = time_ns().unwrap() + 2_000_000;
    hotloop_until_ns(deadline).unwrap();

    assert!(time_ns().unwrap() >= deadline);
}

#[test]
fn maximal_threshold_still_completes_via_held_context() {
    // With the threshold at i64::MAX the engine never releases the calling
    // context and waits on the timer alone, interrupter or not.
    let interrupt = InterruptEvent::new().unwrap();
    let due = DueTime::Relative(Duration::from_millis(10));
    assert!(!should_release_context(due, i64::MAX).unwrap());

    let start = Instant::now();
    sleep_due_with(due, Some(&interrupt), i64::MAX).unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(9), "woke early: {:?}", elapsed);
    assert!(elapsed < Duration::from_millis(10) + OVERSHOOT);
}

#[test]
fn zero_threshold_always_releases() {
    let due = DueTime::Relative(Duration::from_millis(10));
    assert!(should_release_context(due, 0).unwrap());

    let interrupt = InterruptEvent::new().unwrap();
    sleep_due_with(due, Some(&interrupt), 0).unwrap();
}

#[test]
fn pending_interrupt_aborts_long_sleep() {
    let interrupt = InterruptEvent::new().unwrap();

    let start = Instant::now();
    let result = std::thread::scope(|scope| {
        scope.spawn(|| {
            std::thread::sleep(Duration::from_millis(50));
            interrupt.request().unwrap();
        });

        sleep_due(
            DueTime::Relative(Duration::from_secs(5)),
            Some(&interrupt),
        )
    });

    assert_eq!(result, Err(TimeError::Interrupted));
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[test]
fn idle_interrupter_does_not_disturb_sleep() {
    let interrupt = InterruptEvent::new().unwrap();

    let start = Instant::now();
    sleep_due(
        DueTime::Relative(Duration::from_millis(20)),
        Some(&interrupt),
    )
    .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(19));
}

#[test]
fn cleared_interrupter_can_be_reused() {
    let interrupt = InterruptEvent::new().unwrap();
    interrupt.request().unwrap();

    let result = sleep_due(
        DueTime::Relative(Duration::from_secs(5)),
        Some(&interrupt),
    );
    assert_eq!(result, Err(TimeError::Interrupted));

    interrupt.clear().unwrap();
    sleep_due(
        DueTime::Relative(Duration::from_millis(5)),
        Some(&interrupt),
    )
    .unwrap();
}
