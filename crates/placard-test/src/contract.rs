//! Test contracts.
//!
//! A contract is a trait whose default methods are assertions. A fixture
//! type implements the contract by supplying values, and
//! [`contract_tests!`](crate::contract_tests) turns every default method into
//! a `#[test]`:
//!
//! ```rust,ignore
//! struct StringTests;
//!
//! impl Testable<String> for StringTests {
//!     fn create_value(&self) -> String { "banana".into() }
//! }
//!
//! impl EqualsContract<String> for StringTests {
//!     fn create_not_equal_value(&self) -> String { "cherry".into() }
//! }
//!
//! placard_test::contract_tests!(equals: StringTests);
//! ```

use std::cmp::Ordering;
use std::fmt::Debug;

/// Supplies the value under test.
pub trait Testable<T> {
    fn create_value(&self) -> T;
}

/// `PartialEq` must be reflexive and must tell different values apart.
pub trait EqualsContract<T: PartialEq + Debug>: Testable<T> {
    fn create_not_equal_value(&self) -> T;

    fn value_equals_itself(&self) {
        let value = self.create_value();
        assert_eq!(value, value);
    }

    fn value_does_not_equal_none(&self) {
        let value = self.create_value();
        assert_ne!(Some(&value), None);
    }

    fn value_does_not_equal_different_value(&self) {
        let value = self.create_value();
        let different = self.create_not_equal_value();
        assert_ne!(value, different);
        assert_ne!(different, value);
    }
}

/// `Ord` must agree with itself in both directions.
pub trait ComparableContract<T: Ord + Debug>: Testable<T> {
    /// A value strictly smaller than [`Testable::create_value`].
    fn create_smaller_value(&self) -> T;

    fn returns_equal_when_compared_to_itself(&self) {
        let value = self.create_value();
        assert_eq!(value.cmp(&value), Ordering::Equal);
    }

    fn returns_greater_when_compared_to_smaller_value(&self) {
        let value = self.create_value();
        let smaller = self.create_smaller_value();
        assert_eq!(value.cmp(&smaller), Ordering::Greater);
    }

    fn returns_less_when_compared_to_larger_value(&self) {
        let value = self.create_value();
        let smaller = self.create_smaller_value();
        assert_eq!(smaller.cmp(&value), Ordering::Less);
    }
}

/// Generates one `#[test]` per default method of a contract.
///
/// `$fixture` is an expression producing the fixture; it is evaluated once
/// per generated test.
#[macro_export]
macro_rules! contract_tests {
    (equals: $fixture:expr) => {
        #[test]
        fn value_equals_itself() {
            $crate::contract::EqualsContract::value_equals_itself(&$fixture);
        }

        #[test]
        fn value_does_not_equal_none() {
            $crate::contract::EqualsContract::value_does_not_equal_none(&$fixture);
        }

        #[test]
        fn value_does_not_equal_different_value() {
            $crate::contract::EqualsContract::value_does_not_equal_different_value(&$fixture);
        }
    };
    (comparable: $fixture:expr) => {
        #[test]
        fn returns_equal_when_compared_to_itself() {
            $crate::contract::ComparableContract::returns_equal_when_compared_to_itself(&$fixture);
        }

        #[test]
        fn returns_greater_when_compared_to_smaller_value() {
            $crate::contract::ComparableContract::returns_greater_when_compared_to_smaller_value(
                &$fixture,
            );
        }

        #[test]
        fn returns_less_when_compared_to_larger_value() {
            $crate::contract::ComparableContract::returns_less_when_compared_to_larger_value(
                &$fixture,
            );
        }
    };
}
