//! Parsed-template cache.
//!
//! Each template name owns a slot guarded by its own mutex. Populating a
//! slot happens with that mutex held, so concurrent first lookups of the same
//! name parse once and all receive the same [`Arc<Template>`]; lookups of
//! different names never wait on each other's parse.
//!
//! Entries are keyed by the source revision reported by the loader. A lookup
//! whose revision matches the cached one never loads the body. When a
//! template is registered again its revision changes, the stale parse is
//! replaced on the next lookup, and no caller sees the old body afterwards.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tracing::trace;

use super::loader::TemplateSource;
use super::Template;
use crate::error::RenderError;

struct CachedTemplate {
    revision: u64,
    template: Arc<Template>,
}

type Slot = Arc<Mutex<Option<CachedTemplate>>>;

/// Cache of parsed templates, keyed by name and source revision.
#[derive(Default)]
pub struct TemplateCache {
    slots: RwLock<HashMap<String, Slot>>,
    parses: AtomicUsize,
}

impl TemplateCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the cached parse of `name` at `revision`.
    ///
    /// On a miss the source is loaded with `load` and parsed with `parse`;
    /// the entry is stored under the revision of the loaded source, which may
    /// be newer than `revision`.
    pub(crate) fn get_or_load<L, P>(
        &self,
        name: &str,
        revision: u64,
        load: L,
        parse: P,
    ) -> Result<Arc<Template>, RenderError>
    where
        L: FnOnce() -> Result<TemplateSource, RenderError>,
        P: FnOnce(&str) -> Result<Template, RenderError>,
    {
        let slot = self.slot(name);
        let mut entry = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cached) = entry.as_ref() {
            if cached.revision == revision {
                trace!(template = name, revision, "template cache hit");
                return Ok(Arc::clone(&cached.template));
            }
        }

        let source = load()?;
        let template = Arc::new(parse(source.body())?);
        self.parses.fetch_add(1, Ordering::SeqCst);
        *entry = Some(CachedTemplate {
            revision: source.revision(),
            template: Arc::clone(&template),
        });
        Ok(template)
    }

    fn slot(&self, name: &str) -> Slot {
        if let Some(slot) = self
            .slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Arc::clone(slot);
        }

        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(name.to_string()).or_default())
    }

    /// Number of parses performed since the cache was created.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::SeqCst)
    }

    /// Number of names with a cached parse.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .filter(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Evicts `name`. Returns whether a parse was cached for it.
    pub fn remove(&self, name: &str) -> bool {
        let removed = self
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        removed.is_some_and(|slot| slot.lock().unwrap_or_else(PoisonError::into_inner).is_some())
    }

    /// Evicts every entry.
    pub fn clear(&self) {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
