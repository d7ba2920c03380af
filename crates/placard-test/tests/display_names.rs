use placard_test::args::csv_source;
use placard_test::display::{display_name, DEFAULT_DISPLAY_NAME};

#[test]
fn test_custom_display_names() {
    let rows = csv_source(&["apple, 1", "banana, 2", "'lemon, lime', 3"]).unwrap();
    let names: Vec<String> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| display_name("{index} ==> the rank of ''{0}'' is {1}", i + 1, row))
        .collect();

    assert_eq!(
        names,
        [
            "1 ==> the rank of 'apple' is 1",
            "2 ==> the rank of 'banana' is 2",
            "3 ==> the rank of 'lemon, lime' is 3",
        ]
    );
}

#[test]
fn test_default_display_names() {
    let rows = csv_source(&["apple, 1", "banana, 2"]).unwrap();
    assert_eq!(display_name(DEFAULT_DISPLAY_NAME, 2, &rows[1]), "[2] banana, 2");
}
