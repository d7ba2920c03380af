//! File-based templates through a configuration.

use std::fs;
use std::sync::Arc;

use placard_render::{Configuration, DataModel, DirectoryTemplateLoader, OutputFormat, RenderError};
use tempfile::TempDir;

fn setup() -> (TempDir, Configuration) {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("pages")).unwrap();
    fs::write(
        dir.path().join("pages/welcome.ftlh"),
        "<h1>Welcome ${user}!</h1>",
    )
    .unwrap();
    fs::write(dir.path().join("plain.txt"), "Hi ${user}").unwrap();

    let loader = DirectoryTemplateLoader::new(dir.path()).unwrap();
    let cfg = Configuration::builder()
        .template_loader(Arc::new(loader))
        .default_encoding("UTF-8")
        .log_template_exceptions(false)
        .build()
        .unwrap();
    (dir, cfg)
}

#[test]
fn renders_file_template_with_html_escaping() {
    let (_dir, cfg) = setup();
    let model = DataModel::new().with("user", "<Big Joe>").unwrap();

    let template = cfg.get_template("pages/welcome.ftlh").unwrap();
    assert_eq!(template.output_format(), OutputFormat::Html);
    assert_eq!(
        template.render_to_string(&model).unwrap(),
        "<h1>Welcome &lt;Big Joe&gt;!</h1>"
    );
}

#[test]
fn file_templates_are_cached() {
    let (_dir, cfg) = setup();
    let first = cfg.get_template("plain.txt").unwrap();
    let second = cfg.get_template("plain.txt").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cfg.template_cache().parse_count(), 1);
}

#[test]
fn missing_file_is_not_found() {
    let (_dir, cfg) = setup();
    assert!(matches!(
        cfg.get_template("pages/absent.ftlh").unwrap_err(),
        RenderError::TemplateNotFound { .. }
    ));
    assert!(matches!(
        cfg.get_template("../plain.txt").unwrap_err(),
        RenderError::TemplateNotFound { .. }
    ));
}

#[test]
fn process_writes_to_sink() {
    let (_dir, cfg) = setup();
    let model = DataModel::new().with("user", "Big Joe").unwrap();
    let mut out = Vec::new();
    cfg.process("plain.txt", &model, &mut out).unwrap();
    assert_eq!(out, b"Hi Big Joe");
}

#[test]
fn cache_hit_does_not_read_the_file() {
    let (dir, cfg) = setup();
    let path = dir.path().join("plain.txt");
    let first = cfg.get_template("plain.txt").unwrap();

    // Undecodable bytes at the same revision: only a body read would notice.
    let mtime = fs::metadata(&path).unwrap().modified().unwrap();
    fs::write(&path, [0xFF, 0xFE]).unwrap();
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();

    let second = cfg.get_template("plain.txt").unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cfg.template_cache().parse_count(), 1);
}

#[test]
fn changed_file_is_read_again() {
    let (dir, cfg) = setup();
    let path = dir.path().join("plain.txt");
    let first = cfg.get_template("plain.txt").unwrap();

    fs::write(&path, "Bye ${user}").unwrap();
    let later = fs::metadata(&path).unwrap().modified().unwrap() + std::time::Duration::from_secs(10);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(later)
        .unwrap();

    let second = cfg.get_template("plain.txt").unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    let model = DataModel::new().with("user", "Big Joe").unwrap();
    assert_eq!(second.render_to_string(&model).unwrap(), "Bye Big Joe");
}
