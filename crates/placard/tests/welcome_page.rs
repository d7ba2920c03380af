//! End-to-end tests for the welcome-page demo.

use std::io::{self, Write};

use placard::demo::{self, WELCOME_TEMPLATE_NAME};
use placard::{DataModel, RenderError};

const EXPECTED_PAGE: &str = r#"<html>
<head>
  <title>Welcome!</title>
</head>
<body>
  <h1>Welcome Big Joe!</h1>
  <p>Our latest product:
  <a href="products/greenmouse.html">green mouse</a>!
</body>
</html>"#;

fn render_page() -> String {
    let mut out = Vec::new();
    demo::run(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn welcome_page() {
    let page = render_page();
    insta::assert_snapshot!(page);
}

#[test]
fn welcome_page_matches_byte_for_byte() {
    assert_eq!(render_page(), EXPECTED_PAGE);
}

#[test]
fn repeated_runs_reuse_the_cached_parse() {
    render_page();
    render_page();
    let cfg = demo::configuration().unwrap();
    assert_eq!(cfg.template_cache().parse_count(), 1);
}

/// A sink shared with other writers: it must be flushed, never consumed.
struct SharedSink<'a> {
    inner: &'a mut Vec<u8>,
    flushed: bool,
}

impl Write for SharedSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed = true;
        Ok(())
    }
}

#[test]
fn sink_is_flushed_and_still_usable() {
    let mut buffer = b"HTTP/1.1 200 OK\n\n".to_vec();
    let mut sink = SharedSink {
        inner: &mut buffer,
        flushed: false,
    };

    demo::run(&mut sink).unwrap();
    assert!(sink.flushed);
    sink.write_all(b"\n<!-- footer -->").unwrap();

    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\n\n<html>"));
    assert!(text.ends_with("</html>\n<!-- footer -->"));
}

#[test]
fn missing_user_fails_strictly() {
    let cfg = demo::create_configuration().unwrap();
    let mut root = DataModel::new();
    root.insert("latestProduct", &demo::Product::new("u", "n")).unwrap();

    let mut out = Vec::new();
    let err = cfg.process(WELCOME_TEMPLATE_NAME, &root, &mut out).unwrap_err();
    assert!(matches!(err, RenderError::Unresolvable { ref path, line: 6, .. } if path == "user"));
}

#[test]
fn product_values_are_html_escaped() {
    let cfg = demo::create_configuration().unwrap();
    let root = DataModel::new()
        .with("user", "Big & Joe")
        .unwrap()
        .with("latestProduct", &demo::Product::new("a?b=\"c\"", "<mouse>"))
        .unwrap();

    let page = cfg
        .get_template(WELCOME_TEMPLATE_NAME)
        .unwrap()
        .render_to_string(&root)
        .unwrap();
    assert!(page.contains("<h1>Welcome Big &amp; Joe!</h1>"));
    assert!(page.contains(r#"<a href="a?b=&quot;c&quot;">&lt;mouse&gt;</a>"#));
}
