//! The welcome-page demo.
//!
//! Data model + template = output:
//!
//! 1. [`configuration`] builds the engine configuration once and publishes it
//!    process-wide. Settings are fixed from then on, so the instance can be
//!    read from any thread.
//! 2. [`create_data_model`] builds the root hash: a `user` string and a
//!    `latestProduct` record.
//! 3. [`run`] looks up [`WELCOME_TEMPLATE_NAME`] and writes the rendered page
//!    to the given writer. The writer is flushed but not closed.

use std::io::Write;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use placard_render::{
    ConfigError, Configuration, DataModel, ExceptionHandler, RenderError, StringTemplateLoader,
};

/// Name the welcome page is registered under. `.ftlh` selects HTML escaping.
pub const WELCOME_TEMPLATE_NAME: &str = "test.ftlh";

/// Body of the welcome page.
pub const WELCOME_TEMPLATE: &str = r#"<html>
<head>
  <title>Welcome!</title>
</head>
<body>
  <h1>Welcome ${user}!</h1>
  <p>Our latest product:
  <a href="${latestProduct.url}">${latestProduct.name}</a>!
</body>
</html>"#;

static CONFIGURATION: OnceCell<Configuration> = OnceCell::new();

/// A product record; templates read its fields as `product.url` and
/// `product.name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Product {
    url: String,
    name: String,
}

impl Product {
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

/// Builds a fresh configuration with the welcome page registered.
///
/// Prefer [`configuration`]: a new configuration starts with an empty
/// template cache.
pub fn create_configuration() -> Result<Configuration, ConfigError> {
    let loader = Arc::new(StringTemplateLoader::new());
    loader.put_template(WELCOME_TEMPLATE_NAME, WELCOME_TEMPLATE);

    Configuration::builder()
        .template_loader(loader)
        .default_encoding("UTF-8")
        .exception_handler(ExceptionHandler::Rethrow)
        // Errors are returned to the caller, which reports them
        .log_template_exceptions(false)
        .build()
}

/// The process-wide configuration, built on first use.
pub fn configuration() -> Result<&'static Configuration, ConfigError> {
    CONFIGURATION.get_or_try_init(|| {
        debug!("publishing demo configuration");
        create_configuration()
    })
}

/// Builds the demo's root hash.
pub fn create_data_model() -> Result<DataModel, RenderError> {
    let mut latest = Product::default();
    latest.set_url("products/greenmouse.html");
    latest.set_name("green mouse");

    let mut root = DataModel::new();
    root.insert("user", "Big Joe")?;
    root.insert("latestProduct", &latest)?;
    Ok(root)
}

/// Renders the welcome page into `out`.
pub fn run<W: Write + ?Sized>(out: &mut W) -> Result<(), RenderError> {
    let cfg = configuration()?;
    let root = create_data_model()?;
    let template = cfg.get_template(WELCOME_TEMPLATE_NAME)?;
    template.process(&root, out)
}
