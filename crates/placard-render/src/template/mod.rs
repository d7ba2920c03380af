//! Parsed templates, their sources, and the parse cache.
//!
//! A template body is plain text with `${...}` interpolations:
//!
//! ```text
//! <h1>Welcome ${user}!</h1>
//! <a href="${latestProduct.url}">${latestProduct.name}</a>
//! ```
//!
//! Templates are obtained from a [`Configuration`](crate::Configuration),
//! which asks its [`TemplateLoader`] for the named source, parses it once,
//! and caches the result in a [`TemplateCache`] keyed by name and source
//! revision.
//!
//! ## Output Formats
//!
//! The template name decides how interpolated values are escaped:
//!
//! | Name ends with | Format | Escaping |
//! |----------------|--------|----------|
//! | `.ftlh` | [`OutputFormat::Html`] | `< > & " '` |
//! | `.ftlx` | [`OutputFormat::Xml`] | `< > & " '` |
//! | anything else | [`OutputFormat::Plain`] | none |
//!
//! Literal template text is written as-is in every format.
//!
//! ## Key Types
//!
//! - [`Template`]: an immutable parsed template
//! - [`TemplateLoader`]: where bodies come from ([`StringTemplateLoader`],
//!   [`DirectoryTemplateLoader`])
//! - [`TemplateCache`]: at-most-once parsing per name and revision

mod cache;
mod loader;
mod parse;
mod renderer;

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

pub use cache::TemplateCache;
pub use loader::{DirectoryTemplateLoader, StringTemplateLoader, TemplateLoader, TemplateSource};

use crate::config::Settings;
use crate::error::RenderError;
use parse::Segment;

/// How interpolated values are escaped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Plain,
    Html,
    Xml,
}

impl OutputFormat {
    /// Picks the format from a template name's extension.
    pub fn from_template_name(name: &str) -> Self {
        if name.ends_with(".ftlh") {
            OutputFormat::Html
        } else if name.ends_with(".ftlx") {
            OutputFormat::Xml
        } else {
            OutputFormat::Plain
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plainText",
            OutputFormat::Html => "HTML",
            OutputFormat::Xml => "XML",
        }
    }

    /// Escapes an interpolated value for this format.
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            OutputFormat::Plain => Cow::Borrowed(text),
            OutputFormat::Html => escape_markup(text, "&#39;"),
            OutputFormat::Xml => escape_markup(text, "&apos;"),
        }
    }
}

pub(crate) fn escape_html(text: &str) -> Cow<'_, str> {
    escape_markup(text, "&#39;")
}

fn escape_markup<'a>(text: &'a str, apos: &str) -> Cow<'a, str> {
    if !text.contains(['<', '>', '&', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str(apos),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// An immutable, parsed template.
///
/// Templates are cheap to share (`Arc<Template>`) and can be rendered from
/// several threads at once. See [`Template::process`].
pub struct Template {
    name: String,
    segments: Vec<Segment>,
    output_format: OutputFormat,
    settings: Arc<Settings>,
}

impl Template {
    pub(crate) fn parse(
        name: &str,
        source: &str,
        settings: Arc<Settings>,
    ) -> Result<Self, RenderError> {
        let segments = parse::parse(name, source)?;
        let output_format = OutputFormat::from_template_name(name);
        debug!(
            template = name,
            segments = segments.len(),
            format = output_format.name(),
            "parsed template"
        );

        Ok(Self {
            name: name.to_string(),
            segments,
            output_format,
            settings,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    /// Dotted paths of every interpolation, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = String> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Interpolation(interp) => Some(interp.dotted_path()),
            Segment::Text(_) => None,
        })
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Template")
            .field("name", &self.name)
            .field("segments", &self.segments.len())
            .field("output_format", &self.output_format)
            .finish()
    }
}
