//! Engine configuration.
//!
//! A [`Configuration`] is the central, long-lived object of the engine: it
//! holds the settings, the template loader, and the cache of parsed templates.
//! It is assembled with a [`ConfigurationBuilder`] and exposes no setters once
//! built, so a single instance can be shared freely between threads.
//!
//! ```rust
//! use std::sync::Arc;
//! use placard_render::{Configuration, DataModel, ExceptionHandler, StringTemplateLoader};
//!
//! let loader = Arc::new(StringTemplateLoader::new());
//! loader.put_template("greeting", "Hello ${user}");
//!
//! let cfg = Configuration::builder()
//!     .template_loader(loader)
//!     .default_encoding("UTF-8")
//!     .exception_handler(ExceptionHandler::Rethrow)
//!     .log_template_exceptions(false)
//!     .build()
//!     .unwrap();
//!
//! let model = DataModel::new().with("user", "Big Joe").unwrap();
//! let mut out = Vec::new();
//! cfg.process("greeting", &model, &mut out).unwrap();
//! assert_eq!(out, b"Hello Big Joe");
//! ```

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigError, RenderError};
use crate::model::DataModel;
use crate::template::{escape_html, Template, TemplateCache, TemplateLoader};

/// Character encoding used to decode template sources read as bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    Latin1,
}

impl Encoding {
    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "UTF-8",
            Encoding::Latin1 => "ISO-8859-1",
        }
    }

    /// Decodes template bytes into text.
    pub fn decode(&self, bytes: &[u8]) -> io::Result<String> {
        match self {
            Encoding::Utf8 => String::from_utf8(bytes.to_vec())
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            Encoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
        }
    }
}

impl FromStr for Encoding {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Ok(Encoding::Latin1),
            _ => Err(ConfigError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How evaluation errors show up in the output before being returned.
///
/// Every handler returns the error to the caller; the debug handlers
/// additionally write a diagnostic into the sink, which is useful while
/// developing templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExceptionHandler {
    /// Return the error; write nothing extra.
    #[default]
    Rethrow,
    /// Write a plain-text diagnostic, then return the error.
    Debug,
    /// Write an HTML diagnostic that stays visible inside most markup.
    HtmlDebug,
}

impl ExceptionHandler {
    /// Writes this handler's diagnostic for `err` into `out`.
    pub(crate) fn report<W: Write + ?Sized>(&self, err: &RenderError, out: &mut W) -> io::Result<()> {
        match self {
            ExceptionHandler::Rethrow => Ok(()),
            ExceptionHandler::Debug => write!(out, "\n\nPlacard template error:\n{}\n", err),
            ExceptionHandler::HtmlDebug => write!(
                out,
                "<!-- PLACARD ERROR MESSAGE STARTS HERE -->\
                 <!-- ]]> --></script></style></title></xmp>\
                 <pre style=\"color:red; background-color:white\">Placard template error:\n{}</pre>",
                escape_html(&err.to_string())
            ),
        }
    }
}

/// Texts used when a boolean is interpolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanFormat {
    true_text: String,
    false_text: String,
}

impl BooleanFormat {
    pub fn format(&self, value: bool) -> &str {
        if value {
            &self.true_text
        } else {
            &self.false_text
        }
    }
}

impl FromStr for BooleanFormat {
    type Err = ConfigError;

    /// Parses `c` (computer format, `true`/`false`) or `"<true>,<false>"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "c" {
            return Ok(Self {
                true_text: "true".into(),
                false_text: "false".into(),
            });
        }
        match s.split_once(',') {
            Some((t, f)) if !f.contains(',') => Ok(Self {
                true_text: t.to_string(),
                false_text: f.to_string(),
            }),
            _ => Err(ConfigError::InvalidBooleanFormat(s.to_string())),
        }
    }
}

/// Read-only settings shared by a configuration and its templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    default_encoding: Encoding,
    exception_handler: ExceptionHandler,
    log_template_exceptions: bool,
    auto_flush: bool,
    boolean_format: Option<BooleanFormat>,
}

impl Settings {
    pub fn default_encoding(&self) -> Encoding {
        self.default_encoding
    }

    pub fn exception_handler(&self) -> ExceptionHandler {
        self.exception_handler
    }

    pub fn log_template_exceptions(&self) -> bool {
        self.log_template_exceptions
    }

    pub fn auto_flush(&self) -> bool {
        self.auto_flush
    }

    pub fn boolean_format(&self) -> Option<&BooleanFormat> {
        self.boolean_format.as_ref()
    }
}

/// Builder for [`Configuration`].
///
/// Defaults: UTF-8, [`ExceptionHandler::Rethrow`], exceptions logged,
/// auto-flush on, no boolean format. A template loader is required.
pub struct ConfigurationBuilder {
    loader: Option<Arc<dyn TemplateLoader>>,
    default_encoding: String,
    exception_handler: ExceptionHandler,
    log_template_exceptions: bool,
    auto_flush: bool,
    boolean_format: Option<String>,
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self {
            loader: None,
            default_encoding: Encoding::Utf8.name().to_string(),
            exception_handler: ExceptionHandler::Rethrow,
            log_template_exceptions: true,
            auto_flush: true,
            boolean_format: None,
        }
    }
}

impl ConfigurationBuilder {
    /// Sets where template sources come from.
    ///
    /// The loader is shared: keep a clone of the `Arc` to register more
    /// templates after the configuration is built.
    pub fn template_loader<L: TemplateLoader + 'static>(mut self, loader: Arc<L>) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Sets the encoding used to decode template files.
    pub fn default_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.default_encoding = encoding.into();
        self
    }

    pub fn exception_handler(mut self, handler: ExceptionHandler) -> Self {
        self.exception_handler = handler;
        self
    }

    /// Whether failures are also logged through `tracing` before being returned.
    pub fn log_template_exceptions(mut self, enabled: bool) -> Self {
        self.log_template_exceptions = enabled;
        self
    }

    /// Whether the sink is flushed after a successful render.
    pub fn auto_flush(mut self, enabled: bool) -> Self {
        self.auto_flush = enabled;
        self
    }

    /// Sets how booleans render: `"c"` or `"<true text>,<false text>"`.
    pub fn boolean_format(mut self, format: impl Into<String>) -> Self {
        self.boolean_format = Some(format.into());
        self
    }

    /// Validates the settings and produces the immutable configuration.
    ///
    /// # Errors
    ///
    /// Fails if no loader is set, the encoding is unknown, or the boolean
    /// format is malformed.
    pub fn build(self) -> Result<Configuration, ConfigError> {
        let loader = self.loader.ok_or(ConfigError::MissingTemplateLoader)?;
        let default_encoding = self.default_encoding.parse::<Encoding>()?;
        let boolean_format = self
            .boolean_format
            .as_deref()
            .map(str::parse::<BooleanFormat>)
            .transpose()?;

        let settings = Settings {
            default_encoding,
            exception_handler: self.exception_handler,
            log_template_exceptions: self.log_template_exceptions,
            auto_flush: self.auto_flush,
            boolean_format,
        };
        debug!(?settings, "configuration built");

        Ok(Configuration {
            settings: Arc::new(settings),
            loader,
            cache: TemplateCache::new(),
        })
    }
}

/// Settings, template loader, and parsed-template cache.
///
/// Lookups through [`get_template`](Self::get_template) parse each template
/// at most once per source revision; later lookups return the same
/// [`Arc<Template>`].
pub struct Configuration {
    settings: Arc<Settings>,
    loader: Arc<dyn TemplateLoader>,
    cache: TemplateCache,
}

impl Configuration {
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::default()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Returns the parsed template registered under `name`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::TemplateNotFound`] if the loader has no such name
    /// - [`RenderError::Syntax`] if the body does not parse
    /// - [`RenderError::Io`] if the loader fails to read the source
    pub fn get_template(&self, name: &str) -> Result<Arc<Template>, RenderError> {
        let not_found = || {
            debug!(template = name, "template not found");
            RenderError::not_found(name)
        };
        let revision = self.loader.revision(name)?.ok_or_else(not_found)?;

        self.cache.get_or_load(
            name,
            revision,
            || {
                self.loader
                    .find(name, self.settings.default_encoding)?
                    .ok_or_else(not_found)
            },
            |body| Template::parse(name, body, Arc::clone(&self.settings)),
        )
    }

    /// Parses a template that bypasses the loader and the cache.
    pub fn parse_template(&self, name: &str, source: &str) -> Result<Template, RenderError> {
        Template::parse(name, source, Arc::clone(&self.settings))
    }

    /// Looks up `name` and renders it with `model` into `out`.
    pub fn process<W: Write + ?Sized>(
        &self,
        name: &str,
        model: &DataModel,
        out: &mut W,
    ) -> Result<(), RenderError> {
        self.get_template(name)?.process(model, out)
    }

    pub fn template_cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Drops every cached template; the next lookups parse again.
    pub fn clear_template_cache(&self) {
        self.cache.clear();
    }

    /// Drops one cached template. Returns whether it was cached.
    pub fn remove_template_from_cache(&self, name: &str) -> bool {
        self.cache.remove(name)
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("settings", &self.settings)
            .field("cached_templates", &self.cache.len())
            .finish_non_exhaustive()
    }
}
