//! # Placard Test - data-driven testing helpers
//!
//! Small building blocks for writing expressive tests on the standard
//! `cargo test` harness, together with example tests (in `tests/`) that show
//! one testing idiom per file.
//!
//! - [`contract`]: reusable test contracts as traits with default methods
//! - [`args`]: CSV-style argument rows, implicit and explicit conversion,
//!   aggregation into domain types
//! - [`display`]: display names for parameterized cases
//! - [`dynamic`]: tests generated at runtime and run as a batch
//! - [`timeout`]: execution-time assertions and polling
//! - [`conditions`]: assumptions that skip the rest of a test
//! - [`subjects`]: small types the examples exercise
//!
//! ```rust
//! use placard_test::args::csv_source;
//!
//! let rows = csv_source(&["apple, 1", "banana, 2", "'lemon, lime', 0xF1"]).unwrap();
//! let ranks: Vec<i32> = rows.iter().map(|row| row.get(1).unwrap()).collect();
//! assert_eq!(ranks, [1, 2, 241]);
//! assert_eq!(rows[2].get_str(0).unwrap(), "lemon, lime");
//! ```

pub mod args;
pub mod conditions;
pub mod contract;
pub mod display;
pub mod dynamic;
pub mod subjects;
pub mod timeout;

pub use args::{csv_file_source, csv_source, Aggregate, ArgumentConverter, ArgumentError, Arguments, FromArgument};
pub use dynamic::{dynamic_test, run_dynamic, DynamicReport, DynamicTest};
