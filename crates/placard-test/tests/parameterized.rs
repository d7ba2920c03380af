use std::path::PathBuf;

use placard_test::args::{csv_file_source, csv_source, Arguments};
use placard_test::subjects::{is_palindrome, Calculator, TimeUnit};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_palindromes_from_values() {
    for candidate in ["racecar", "radar", "able was I ere I saw elba"] {
        assert!(is_palindrome(candidate), "{candidate}");
    }
}

#[test]
fn test_values_from_int_array() {
    for argument in [1, 2, 3] {
        assert!(argument > 0 && argument < 4);
    }
}

#[test]
fn test_null_empty_and_blank_strings() {
    let candidates: [Option<&str>; 4] = [None, Some(""), Some(" "), Some("   \t\n")];
    for text in candidates {
        assert!(text.map_or(true, |t| t.trim().is_empty()), "{text:?}");
    }
}

#[test]
fn test_every_time_unit() {
    for unit in TimeUnit::ALL {
        assert!(!unit.name().is_empty());
    }
}

#[test]
fn test_selected_time_units() {
    let selected = [TimeUnit::Days, TimeUnit::HalfDays];
    for unit in TimeUnit::ALL.into_iter().filter(|u| selected.contains(u)) {
        assert!(unit.is_date_based(), "{unit}");
    }
}

#[test]
fn test_excluded_time_units() {
    let excluded = [TimeUnit::Days, TimeUnit::HalfDays];
    let remaining: Vec<_> = TimeUnit::ALL
        .into_iter()
        .filter(|u| !excluded.contains(u))
        .collect();
    assert_eq!(remaining.len(), 6);
    assert!(remaining.iter().all(|u| !u.is_date_based()));
}

#[test]
fn test_matching_time_units() {
    for unit in TimeUnit::ALL.into_iter().filter(|u| u.name().ends_with("DAYS")) {
        assert!(unit.is_date_based(), "{unit}");
    }
}

fn string_provider() -> impl Iterator<Item = &'static str> {
    ["apple", "banana"].into_iter()
}

#[test]
fn test_with_explicit_method_source() {
    for argument in string_provider() {
        assert!(!argument.is_empty());
    }
}

fn string_int_and_list_provider() -> Vec<(&'static str, usize, Vec<&'static str>)> {
    vec![
        ("apple", 1, vec!["a", "b"]),
        ("lemon", 2, vec!["x", "y"]),
    ]
}

#[test]
fn test_with_multiple_arguments() {
    for (text, number, list) in string_int_and_list_provider() {
        assert_eq!(text.len(), 5);
        assert!((1..=2).contains(&number));
        assert_eq!(list.len(), 2);
    }
}

#[test]
fn test_with_csv_source() {
    let rows = csv_source(&[
        "apple,         1",
        "banana,        2",
        "'lemon, lime', 0xF1",
        "strawberry,    700000",
    ])
    .unwrap();

    let expected = [("apple", 1), ("banana", 2), ("lemon, lime", 241), ("strawberry", 700_000)];
    assert_eq!(rows.len(), expected.len());
    for (row, (fruit, rank)) in rows.iter().zip(expected) {
        assert_eq!(row.get_str(0).unwrap(), fruit);
        assert_eq!(row.get::<i32>(1).unwrap(), rank);
    }
}

#[test]
fn test_with_csv_file_source() {
    let rows = csv_file_source(fixture("two-column.csv"), 1).unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[2].get_str(0).unwrap(), "United States of America");
    for row in &rows {
        assert!(row.get::<u32>(1).unwrap() > 0);
    }
}

#[test]
fn test_csv_file_source_missing_file() {
    assert!(csv_file_source(fixture("missing.csv"), 0).is_err());
}

/// Provides rows from code instead of a literal table.
fn fruit_arguments() -> impl Iterator<Item = Arguments> {
    ["apple", "banana"]
        .into_iter()
        .map(|fruit| Arguments::new([Some(fruit)]))
}

#[test]
fn test_with_arguments_source() {
    for row in fruit_arguments() {
        assert!(!row.get_str(0).unwrap().is_empty());
    }
}

#[test]
fn test_calculator_table() {
    let calculator = Calculator;
    for row in csv_source(&["0, 1, 1", "1, 2, 3", "49, 51, 100", "1, 100, 101"]).unwrap() {
        let (a, b, sum): (i64, i64, i64) = (row.get(0).unwrap(), row.get(1).unwrap(), row.get(2).unwrap());
        assert_eq!(calculator.add(a, b), sum, "{a} + {b}");
    }
}

mod properties {
    use placard_test::subjects::is_palindrome;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn mirrored_strings_are_palindromes(half in "[a-z]{0,12}") {
            let mirrored: String = half.chars().chain(half.chars().rev()).collect();
            prop_assert!(is_palindrome(&mirrored));
        }
    }
}
