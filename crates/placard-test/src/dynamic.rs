//! Tests generated at runtime.
//!
//! A [`DynamicTest`] is a name and a body. [`run_dynamic`] runs a batch of
//! them, catching panics so one failing case does not hide the others, and
//! returns a [`DynamicReport`]. Finish a test with
//! [`DynamicReport::assert_all_passed`].

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

pub struct DynamicTest {
    name: String,
    body: Box<dyn FnOnce()>,
}

impl DynamicTest {
    pub fn new(name: impl Into<String>, body: impl FnOnce() + 'static) -> Self {
        Self {
            name: name.into(),
            body: Box::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for DynamicTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicTest").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Shorthand for [`DynamicTest::new`].
pub fn dynamic_test(name: impl Into<String>, body: impl FnOnce() + 'static) -> DynamicTest {
    DynamicTest::new(name, body)
}

/// Result of one dynamic test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub name: String,
    /// Panic message if the body panicked.
    pub failure: Option<String>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DynamicReport {
    outcomes: Vec<Outcome>,
}

impl DynamicReport {
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn passed(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| o.passed())
            .map(|o| o.name.as_str())
    }

    pub fn failed(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed())
    }

    /// Panics with every failure if any test failed.
    pub fn assert_all_passed(&self) {
        let failures: Vec<String> = self
            .failed()
            .map(|o| format!("  {}: {}", o.name, o.failure.as_deref().unwrap_or_default()))
            .collect();
        assert!(
            failures.is_empty(),
            "{} of {} dynamic tests failed:\n{}",
            failures.len(),
            self.len(),
            failures.join("\n")
        );
    }
}

/// Runs every test in order and collects the outcomes.
pub fn run_dynamic<I>(tests: I) -> DynamicReport
where
    I: IntoIterator<Item = DynamicTest>,
{
    let outcomes = tests
        .into_iter()
        .map(|test| {
            let DynamicTest { name, body } = test;
            let failure = panic::catch_unwind(AssertUnwindSafe(body))
                .err()
                .map(|payload| panic_message(payload.as_ref()));
            Outcome { name, failure }
        })
        .collect();
    DynamicReport { outcomes }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
