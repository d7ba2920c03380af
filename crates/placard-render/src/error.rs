//! Error types for template loading and rendering.
//!
//! [`RenderError`] is the single error type returned by lookups and renders.
//! Callers match on three primary kinds:
//!
//! - [`RenderError::TemplateNotFound`]: no loader knows the requested name
//! - [`RenderError::Unresolvable`]: an interpolation names a missing key or field
//! - [`RenderError::TemplateError`]: any other failure while evaluating an
//!   interpolation, such as a value that cannot be converted to text
//!
//! Configuration problems are reported separately as [`ConfigError`] when the
//! configuration is built, and wrapped into [`RenderError::Config`] where the
//! two meet.

use std::io;

/// Error type for template lookup and rendering operations.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// No template with this name is registered with the loader.
    #[error("template not found: \"{name}\"")]
    TemplateNotFound { name: String },

    /// An interpolation references a key or field that is missing (or null).
    #[error(
        "key not resolvable: `{path}` in template \"{template}\" at line {line}, column {column}"
    )]
    Unresolvable {
        template: String,
        path: String,
        line: usize,
        column: usize,
    },

    /// A value was found but could not be evaluated or converted to text.
    #[error("template error in \"{template}\" at line {line}, column {column}: {message}")]
    TemplateError {
        template: String,
        message: String,
        line: usize,
        column: usize,
    },

    /// The template body could not be parsed.
    #[error("syntax error in \"{template}\" at line {line}, column {column}: {message}")]
    Syntax {
        template: String,
        message: String,
        line: usize,
        column: usize,
    },

    /// A value could not be placed into the data model.
    #[error("data model error for key \"{key}\": {message}")]
    Model { key: String, message: String },

    /// The configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Reading a template source or writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl RenderError {
    /// Creates a template-not-found error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::TemplateNotFound { name: name.into() }
    }

    /// Returns true for errors raised while evaluating an interpolation.
    ///
    /// These are the errors an exception handler reports into the output.
    pub fn is_evaluation_error(&self) -> bool {
        matches!(
            self,
            RenderError::Unresolvable { .. } | RenderError::TemplateError { .. }
        )
    }
}

/// Errors raised while building a [`Configuration`](crate::Configuration).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The named character encoding is not supported.
    #[error("unsupported encoding: \"{0}\" (expected UTF-8 or ISO-8859-1)")]
    UnsupportedEncoding(String),

    /// The boolean format is neither `c` nor a `true,false` pair.
    #[error("invalid boolean_format \"{0}\": expected \"c\" or \"<true text>,<false text>\"")]
    InvalidBooleanFormat(String),

    /// `build` was called before a template loader was set.
    #[error("no template loader configured")]
    MissingTemplateLoader,
}
