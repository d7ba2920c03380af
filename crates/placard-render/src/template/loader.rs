//! Template sources.
//!
//! A [`TemplateLoader`] maps a template name to a revision number and, on
//! request, its body. The revision changes whenever the body changes. Lookups
//! ask for the revision first and only read the body when the cache does not
//! already hold a parse of that revision.
//!
//! Two loaders are provided:
//!
//! - [`StringTemplateLoader`]: bodies registered in memory. Registration works
//!   through `&self`, so templates can be added after the configuration that
//!   shares the loader has been built.
//! - [`DirectoryTemplateLoader`]: bodies read from files under a root
//!   directory, revisioned by modification time.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::UNIX_EPOCH;

use tracing::debug;

use crate::config::Encoding;
use crate::error::RenderError;

/// A template body together with its revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    body: Arc<str>,
    revision: u64,
}

impl TemplateSource {
    pub fn new(body: impl Into<Arc<str>>, revision: u64) -> Self {
        Self {
            body: body.into(),
            revision,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Finds template sources by name.
pub trait TemplateLoader: Send + Sync {
    /// Returns the current revision of `name`, or `None` if it is unknown.
    ///
    /// Called on every lookup, so it must not read the body.
    fn revision(&self, name: &str) -> Result<Option<u64>, RenderError>;

    /// Returns the current source for `name`, or `None` if it is unknown.
    ///
    /// `encoding` is the configuration's default encoding, for loaders that
    /// read bytes.
    fn find(&self, name: &str, encoding: Encoding) -> Result<Option<TemplateSource>, RenderError>;
}

/// In-memory template registry.
///
/// Registering a name that already exists replaces its body
/// (last write wins).
#[derive(Debug, Default)]
pub struct StringTemplateLoader {
    templates: RwLock<HashMap<String, TemplateSource>>,
    next_revision: AtomicU64,
}

impl StringTemplateLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `body` under `name`, replacing any previous body.
    pub fn put_template(&self, name: impl Into<String>, body: impl Into<Arc<str>>) {
        let name = name.into();
        let revision = self.next_revision.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(template = %name, revision, "registered template");
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, TemplateSource::new(body, revision));
    }

    /// Removes `name`. Returns whether it was registered.
    pub fn remove_template(&self, name: &str) -> bool {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
            .is_some()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl TemplateLoader for StringTemplateLoader {
    fn revision(&self, name: &str) -> Result<Option<u64>, RenderError> {
        Ok(self
            .templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(TemplateSource::revision))
    }

    fn find(&self, name: &str, _encoding: Encoding) -> Result<Option<TemplateSource>, RenderError> {
        Ok(self
            .templates
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned())
    }
}

/// Loads templates from files below a root directory.
///
/// The template name is the path relative to the root, using `/` separators
/// (`"mail/welcome.ftlh"`). Names that would escape the root are treated as
/// unknown.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateLoader {
    root: PathBuf,
}

impl DirectoryTemplateLoader {
    /// # Errors
    ///
    /// Returns [`RenderError::Io`] if `root` is not an existing directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(RenderError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("template directory does not exist: {}", root.display()),
            )));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() || name.contains('\\') {
            return None;
        }
        let relative = Path::new(name);
        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return None;
        }
        Some(self.root.join(relative))
    }

    /// Metadata of the file behind `name`; `None` for unknown names,
    /// missing files and directories.
    fn file_metadata(&self, name: &str) -> Result<Option<(PathBuf, fs::Metadata)>, RenderError> {
        let Some(path) = self.resolve(name) else {
            debug!(template = name, "rejected template name outside the root");
            return Ok(None);
        };

        match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => Ok(Some((path, metadata))),
            Ok(_) => Ok(None),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

fn mtime_revision(metadata: &fs::Metadata) -> io::Result<u64> {
    Ok(metadata
        .modified()?
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0))
}

impl TemplateLoader for DirectoryTemplateLoader {
    fn revision(&self, name: &str) -> Result<Option<u64>, RenderError> {
        match self.file_metadata(name)? {
            Some((_, metadata)) => Ok(Some(mtime_revision(&metadata)?)),
            None => Ok(None),
        }
    }

    fn find(&self, name: &str, encoding: Encoding) -> Result<Option<TemplateSource>, RenderError> {
        let Some((path, metadata)) = self.file_metadata(name)? else {
            return Ok(None);
        };

        let revision = mtime_revision(&metadata)?;
        let body = encoding.decode(&fs::read(&path)?)?;
        debug!(template = name, revision, "read template file");

        Ok(Some(TemplateSource::new(body, revision)))
    }
}
