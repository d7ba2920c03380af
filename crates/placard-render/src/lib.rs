//! # Placard Render - strict `${...}` templates
//!
//! `placard-render` turns a data model and a template into text. Templates
//! are plain text with `${name}` and `${record.field}` interpolations; they
//! are looked up by name through a [`Configuration`], parsed once, cached,
//! and rendered into any [`std::io::Write`] sink.
//!
//! ## Core Concepts
//!
//! - [`Configuration`]: immutable settings + template loader + parse cache.
//!   Build one with [`Configuration::builder`] and share it.
//! - [`TemplateLoader`]: where template bodies come from
//!   ([`StringTemplateLoader`], [`DirectoryTemplateLoader`]).
//! - [`DataModel`]: the root hash a template is rendered against.
//! - [`Template`]: a parsed template; [`Template::process`] renders it.
//! - [`RenderError`]: one error type for lookups and renders.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use placard_render::{Configuration, DataModel, StringTemplateLoader};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Product { url: String, name: String }
//!
//! let loader = Arc::new(StringTemplateLoader::new());
//! loader.put_template("link", r#"<a href="${product.url}">${product.name}</a>"#);
//!
//! let cfg = Configuration::builder()
//!     .template_loader(Arc::clone(&loader))
//!     .build()
//!     .unwrap();
//!
//! let model = DataModel::new()
//!     .with("product", &Product {
//!         url: "products/greenmouse.html".into(),
//!         name: "green mouse".into(),
//!     })
//!     .unwrap();
//!
//! let output = cfg.get_template("link").unwrap().render_to_string(&model).unwrap();
//! assert_eq!(output, r#"<a href="products/greenmouse.html">green mouse</a>"#);
//! ```
//!
//! ## Strict Rendering
//!
//! A missing key or field fails the render with
//! [`RenderError::Unresolvable`] instead of producing an empty string. Use
//! `${name!}` or `${name!"default"}` where a value is optional.

mod config;
mod error;
mod model;
pub mod template;

pub use config::{
    BooleanFormat, Configuration, ConfigurationBuilder, Encoding, ExceptionHandler, Settings,
};
pub use error::{ConfigError, RenderError};
pub use model::DataModel;
pub use template::{
    DirectoryTemplateLoader, OutputFormat, StringTemplateLoader, Template, TemplateCache,
    TemplateLoader, TemplateSource,
};
