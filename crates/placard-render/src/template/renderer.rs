//! Rendering a parsed template against a data model.
//!
//! Rendering is a single synchronous pass: literal text is copied to the
//! sink, every interpolation is resolved against the [`DataModel`] and its
//! string form (escaped for the template's output format) is written after
//! it. On success the sink is flushed (unless `auto_flush` is off); it is
//! never closed, since it may be shared (stdout, a socket).
//!
//! Rendering is strict: a path that does not resolve fails with
//! [`RenderError::Unresolvable`] unless the interpolation has a `!` default.

use std::borrow::Cow;
use std::io::Write;

use serde_json::Value;
use tracing::error;

use super::parse::{Interpolation, Segment};
use super::Template;
use crate::error::RenderError;
use crate::model::{kind_name, DataModel, Lookup};

impl Template {
    /// Renders this template with `model` into `out`.
    ///
    /// # Errors
    ///
    /// - [`RenderError::Unresolvable`]: a key or field is missing
    /// - [`RenderError::TemplateError`]: a value cannot be converted to text
    /// - [`RenderError::Io`]: writing to or flushing `out` failed
    ///
    /// Output already written before a failure must be treated as invalid.
    pub fn process<W: Write + ?Sized>(&self, model: &DataModel, out: &mut W) -> Result<(), RenderError> {
        let result = self.write_segments(model, out).and_then(|()| {
            if self.settings.auto_flush() {
                out.flush()?;
            }
            Ok(())
        });
        result.map_err(|err| self.handle_error(err, out))
    }

    /// Renders into a new `String`.
    pub fn render_to_string(&self, model: &DataModel) -> Result<String, RenderError> {
        let mut buf = Vec::new();
        self.process(model, &mut buf)?;
        String::from_utf8(buf).map_err(|err| RenderError::TemplateError {
            template: self.name.clone(),
            message: err.to_string(),
            line: 1,
            column: 1,
        })
    }

    fn write_segments<W: Write + ?Sized>(&self, model: &DataModel, out: &mut W) -> Result<(), RenderError> {
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.write_all(text.as_bytes())?,
                Segment::Interpolation(interp) => {
                    let value = self.evaluate(interp, model)?;
                    out.write_all(self.output_format.escape(&value).as_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn evaluate<'a>(&self, interp: &'a Interpolation, model: &'a DataModel) -> Result<Cow<'a, str>, RenderError> {
        match model.lookup(&interp.path) {
            Lookup::Found(value) => self.stringify(value, interp),
            Lookup::Missing => match &interp.fallback {
                Some(text) => Ok(Cow::Borrowed(text.as_str())),
                None => Err(RenderError::Unresolvable {
                    template: self.name.clone(),
                    path: interp.dotted_path(),
                    line: interp.line,
                    column: interp.column,
                }),
            },
            Lookup::NotAHash { prefix, kind } => Err(self.conversion_error(
                interp,
                format!("expected a hash at `{}`, but it evaluated to a {}", prefix, kind),
            )),
        }
    }

    fn stringify<'a>(&self, value: &'a Value, interp: &Interpolation) -> Result<Cow<'a, str>, RenderError> {
        match value {
            Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
            Value::Number(n) => Ok(Cow::Owned(n.to_string())),
            Value::Bool(b) => match self.settings.boolean_format() {
                Some(format) => Ok(Cow::Owned(format.format(*b).to_string())),
                None => Err(self.conversion_error(
                    interp,
                    format!(
                        "can't convert boolean `{}` to string automatically; set boolean_format",
                        interp.dotted_path()
                    ),
                )),
            },
            other => Err(self.conversion_error(
                interp,
                format!(
                    "expected a string or number at `{}`, but it evaluated to a {}",
                    interp.dotted_path(),
                    kind_name(other)
                ),
            )),
        }
    }

    fn conversion_error(&self, interp: &Interpolation, message: String) -> RenderError {
        RenderError::TemplateError {
            template: self.name.clone(),
            message,
            line: interp.line,
            column: interp.column,
        }
    }

    /// Logs and reports a failure according to the settings, then hands it back.
    fn handle_error<W: Write + ?Sized>(&self, err: RenderError, out: &mut W) -> RenderError {
        if self.settings.log_template_exceptions() {
            error!(template = %self.name, error = %err, "template processing failed");
        }
        if err.is_evaluation_error() {
            if let Err(io_err) = self.settings.exception_handler().report(&err, out) {
                error!(template = %self.name, error = %io_err, "could not write error report");
            }
        }
        err
    }
}
