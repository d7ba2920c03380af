//! Assumptions: conditions that skip the rest of a test instead of failing
//! it.
//!
//! The standard harness has no "skipped" outcome, so a test whose
//! assumption fails returns early and is reported as passed. Use
//! [`assume!`](crate::assume) at the top of a test body.

/// Whether environment variable `var` is set to exactly `expected`.
pub fn env_is(var: &str, expected: &str) -> bool {
    std::env::var(var).is_ok_and(|value| value == expected)
}

/// Runs `f` only when `condition` holds.
pub fn assuming_that(condition: bool, f: impl FnOnce()) {
    if condition {
        f();
    }
}

/// Returns from the enclosing test when the condition is false.
#[macro_export]
macro_rules! assume {
    ($cond:expr) => {
        if !$cond {
            eprintln!("skipped: assumption `{}` does not hold", stringify!($cond));
            return;
        }
    };
}
