use placard_test::dynamic::{dynamic_test, run_dynamic, DynamicTest};
use placard_test::subjects::{is_palindrome, Calculator};

/// Checks that can be mixed into any fixture; the generated tests come from
/// a default method.
trait PalindromeChecks {
    fn candidates(&self) -> Vec<&'static str> {
        vec!["racecar", "radar", "mom", "dad"]
    }

    fn dynamic_tests_for_palindromes(&self) -> Vec<DynamicTest> {
        self.candidates()
            .into_iter()
            .map(|text| dynamic_test(text, move || assert!(is_palindrome(text))))
            .collect()
    }
}

struct Fixture;

impl PalindromeChecks for Fixture {}

#[test]
fn test_dynamic_tests_from_collection() {
    let tests = vec![
        dynamic_test("1st dynamic test", || assert!(is_palindrome("madam"))),
        dynamic_test("2nd dynamic test", || assert_eq!(4, Calculator.multiply(2, 2))),
    ];
    run_dynamic(tests).assert_all_passed();
}

#[test]
fn test_dynamic_tests_from_stream() {
    let report = run_dynamic(
        ["racecar", "radar", "mom", "dad"]
            .into_iter()
            .map(|text| dynamic_test(text, move || assert!(is_palindrome(text)))),
    );
    assert_eq!(report.passed().collect::<Vec<_>>(), ["racecar", "radar", "mom", "dad"]);
}

#[test]
fn test_generated_inputs() {
    let report = run_dynamic((0..7).step_by(2).map(|n| {
        dynamic_test(format!("test{n}"), move || assert_eq!(n % 2, 0))
    }));
    assert_eq!(report.len(), 4);
    report.assert_all_passed();
}

#[test]
fn test_dynamic_tests_from_trait_default_method() {
    run_dynamic(Fixture.dynamic_tests_for_palindromes()).assert_all_passed();
}

#[test]
fn test_failing_dynamic_test_is_reported() {
    let report = run_dynamic([
        dynamic_test("palindrome", || assert!(is_palindrome("level"))),
        dynamic_test("not a palindrome", || assert!(is_palindrome("placard"), "placard")),
    ]);
    let failed: Vec<_> = report.failed().map(|o| o.name.as_str()).collect();
    assert_eq!(failed, ["not a palindrome"]);
}
