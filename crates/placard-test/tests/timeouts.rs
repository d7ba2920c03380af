use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use placard_test::timeout::{assert_timeout, assert_timeout_preemptively, poll_until};

#[test]
fn test_timeout_not_exceeded() {
    assert_timeout(Duration::from_secs(2), || {
        thread::sleep(Duration::from_millis(10));
    });
}

#[test]
fn test_timeout_not_exceeded_with_result() {
    let greeting = assert_timeout(Duration::from_secs(2), || "a result".to_string());
    assert_eq!(greeting, "a result");
}

#[test]
#[should_panic(expected = "execution exceeded timeout")]
fn test_timeout_exceeded() {
    assert_timeout(Duration::from_millis(10), || {
        thread::sleep(Duration::from_millis(100));
    });
}

#[test]
#[should_panic(expected = "execution timed out")]
fn test_timeout_exceeded_preemptively() {
    assert_timeout_preemptively(Duration::from_millis(10), || {
        thread::sleep(Duration::from_millis(500));
    });
}

#[test]
fn test_preemptive_returns_result() {
    let answer = assert_timeout_preemptively(Duration::from_secs(2), || 6 * 7);
    assert_eq!(answer, 42);
}

#[test]
fn test_poll_until_background_work_finishes() {
    let done = Arc::new(AtomicBool::new(false));
    let worker = {
        let done = Arc::clone(&done);
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            done.store(true, Ordering::SeqCst);
        })
    };

    assert!(poll_until(
        Duration::from_secs(5),
        Duration::from_millis(5),
        || done.load(Ordering::SeqCst)
    ));
    worker.join().unwrap();
}
