//! Execution-time assertions.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Runs `f` to completion and fails if it took longer than `limit`.
///
/// Returns whatever `f` returned.
pub fn assert_timeout<T>(limit: Duration, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    assert!(
        elapsed <= limit,
        "execution exceeded timeout of {limit:?} by {:?}",
        elapsed - limit
    );
    result
}

/// Runs `f` on its own thread and fails as soon as `limit` passes.
///
/// The worker thread is detached on timeout and keeps running until `f`
/// returns. A panic in `f` fails the assertion.
pub fn assert_timeout_preemptively<T, F>(limit: Duration, f: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    match rx.recv_timeout(limit) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => panic!("execution timed out after {limit:?}"),
        Err(RecvTimeoutError::Disconnected) => panic!("execution panicked before the timeout"),
    }
}

/// Polls `ready` every `interval` until it returns true or `timeout` passes.
///
/// Returns whether `ready` succeeded in time.
pub fn poll_until(timeout: Duration, interval: Duration, mut ready: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if ready() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_until_gives_up() {
        assert!(!poll_until(
            Duration::from_millis(20),
            Duration::from_millis(5),
            || false
        ));
    }

    #[test]
    fn test_poll_until_succeeds_after_retries() {
        let mut calls = 0;
        assert!(poll_until(Duration::from_secs(5), Duration::from_millis(1), || {
            calls += 1;
            calls == 3
        }));
        assert_eq!(calls, 3);
    }

    #[test]
    #[should_panic(expected = "panicked before the timeout")]
    fn test_preemptive_propagates_panic_as_failure() {
        assert_timeout_preemptively::<(), _>(Duration::from_secs(5), || panic!("inner"));
    }
}
