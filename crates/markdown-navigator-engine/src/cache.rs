//! # Parse Cache
//!
//! Parsed documents keyed by document id, one entry per id holding the
//! newest version seen. Each entry owns a `OnceCell`: concurrent requests
//! for the same version clone the cell under the lock, then race to
//! initialise it outside the lock. Exactly one of them parses, the others
//! block on the cell and get the same `Arc`.
//!
//! A request for a newer version replaces the entry with a fresh cell. A
//! parse of the old version still in flight finishes into the detached cell
//! and is never seen by later lookups. Requests for a version older than the
//! cached one fail with [`EngineError::StaleVersion`].
//!
//! Eviction is least-recently-used by document id. An evicted entry only
//! leaves the map: readers holding its `Arc` keep it alive.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lru::LruCache;
use markdown_navigator_config::{ParserOptions, ProfileListener, RenderingProfile};
use once_cell::sync::OnceCell;
use parking_lot::{Mutex, RwLock};

use crate::error::EngineError;
use crate::models::{Document, DocumentId};
use crate::parsed::ParsedDocument;
use crate::table::ReferenceTable;

struct Entry {
    version: u64,
    cell: Arc<OnceCell<Arc<ParsedDocument>>>,
}

pub struct ParseCache {
    profile: String,
    options: RwLock<ParserOptions>,
    entries: Mutex<LruCache<DocumentId, Entry>>,
    parses: AtomicUsize,
}

impl std::fmt::Debug for ParseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseCache")
            .field("profile", &self.profile)
            .field("options", &*self.options.read())
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl ParseCache {
    /// A cache parsing with `options`. A capacity of 0 is treated as 1.
    pub fn new(options: ParserOptions, capacity: usize) -> Self {
        Self::for_profile("default", options, capacity)
    }

    /// A cache following the rendering profile called `profile`: when the
    /// cache is registered as a listener and that profile changes, every
    /// entry is dropped and later parses use the new options.
    pub fn for_profile(profile: impl Into<String>, options: ParserOptions, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            profile: profile.into(),
            options: RwLock::new(options),
            entries: Mutex::new(LruCache::new(capacity)),
            parses: AtomicUsize::new(0),
        }
    }

    pub fn options(&self) -> ParserOptions {
        *self.options.read()
    }

    /// The parsed form of `document`, parsing it at most once per version.
    pub fn get_or_parse(&self, document: &Document) -> Result<Arc<ParsedDocument>, EngineError> {
        let cell = self.cell_for(document)?;
        let options = self.options();
        let parsed = cell.get_or_init(|| {
            self.parses.fetch_add(1, Ordering::Relaxed);
            Arc::new(ParsedDocument::parse(document.clone(), options))
        });
        Ok(parsed.clone())
    }

    pub fn reference_table(&self, document: &Document) -> Result<Arc<ReferenceTable>, EngineError> {
        Ok(self.get_or_parse(document)?.reference_table())
    }

    fn cell_for(&self, document: &Document) -> Result<Arc<OnceCell<Arc<ParsedDocument>>>, EngineError> {
        let mut entries = self.entries.lock();

        if let Some(entry) = entries.get(document.id()) {
            if entry.version == document.version() {
                return Ok(entry.cell.clone());
            }
            if entry.version > document.version() {
                return Err(EngineError::StaleVersion {
                    document: document.id().clone(),
                    requested: document.version(),
                    current: entry.version,
                });
            }
            log::debug!(
                "{} v{} supersedes v{}",
                document.id(),
                document.version(),
                entry.version
            );
        }

        let cell = Arc::new(OnceCell::new());
        let evicted = entries.push(
            document.id().clone(),
            Entry {
                version: document.version(),
                cell: cell.clone(),
            },
        );
        if let Some((id, _)) = evicted
            && id != *document.id()
        {
            log::debug!("evicted {id} from parse cache");
        }
        Ok(cell)
    }

    /// The cached parse of the newest version seen, if it has completed.
    pub fn get(&self, id: &DocumentId) -> Option<Arc<ParsedDocument>> {
        self.entries
            .lock()
            .peek(id)
            .and_then(|entry| entry.cell.get().cloned())
    }

    /// Newest version seen for `id`.
    pub fn version(&self, id: &DocumentId) -> Option<u64> {
        self.entries.lock().peek(id).map(|entry| entry.version)
    }

    pub fn evict(&self, id: &DocumentId) -> bool {
        self.entries.lock().pop(id).is_some()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().cap().get()
    }

    /// Number of parses performed so far.
    pub fn parse_count(&self) -> usize {
        self.parses.load(Ordering::Relaxed)
    }
}

impl ProfileListener for ParseCache {
    fn profile_changed(&self, profile: &RenderingProfile) {
        if profile.name != self.profile {
            return;
        }
        let mut options = self.options.write();
        if *options != profile.parser {
            log::info!("profile '{}' changed, dropping parsed documents", profile.name);
            *options = profile.parser;
            self.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_navigator_config::ProfileStore;
    use pretty_assertions::assert_eq;
    use std::thread;

    fn doc(path: &str, text: &str, version: u64) -> Document {
        Document::with_version(path, text, version)
    }

    #[test]
    fn same_version_is_parsed_once() {
        let cache = ParseCache::new(ParserOptions::default(), 4);
        let document = doc("a.md", "# A\n", 0);

        let first = cache.get_or_parse(&document).unwrap();
        let second = cache.get_or_parse(&document).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.parse_count(), 1);
    }

    #[test]
    fn concurrent_requests_share_one_parse() {
        let cache = Arc::new(ParseCache::new(ParserOptions::default(), 4));
        let text = "# Title\n\n".repeat(500);
        let document = doc("big.md", &text, 3);

        let results: Vec<Arc<ParsedDocument>> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| cache.get_or_parse(&document).unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.parse_count(), 1);
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &results[0])));
    }

    #[test]
    fn newer_version_supersedes_and_older_is_stale() {
        let cache = ParseCache::new(ParserOptions::default(), 4);
        let v1 = doc("a.md", "one\n", 1);
        let v2 = v1.replace("two\n");

        cache.get_or_parse(&v1).unwrap();
        let parsed = cache.get_or_parse(&v2).unwrap();
        assert_eq!(parsed.text(), "two\n");
        assert_eq!(cache.version(v1.id()), Some(2));

        let err = cache.get_or_parse(&v1).unwrap_err();
        assert!(matches!(
            err,
            EngineError::StaleVersion {
                requested: 1,
                current: 2,
                ..
            }
        ));
    }

    #[test]
    fn in_flight_stale_parse_is_not_published() {
        let cache = ParseCache::new(ParserOptions::default(), 4);
        let v0 = doc("a.md", "old\n", 0);

        // A reader takes the cell for v0, then v1 arrives before it parses.
        let stale_cell = cache.cell_for(&v0).unwrap();
        let v1 = v0.replace("new\n");
        let fresh = cache.get_or_parse(&v1).unwrap();
        stale_cell.get_or_init(|| Arc::new(ParsedDocument::parse(v0.clone(), ParserOptions::default())));

        let cached = cache.get(v0.id()).unwrap();
        assert!(Arc::ptr_eq(&cached, &fresh));
        assert_eq!(cached.version(), 1);
    }

    #[test]
    fn least_recently_used_is_evicted() {
        let cache = ParseCache::new(ParserOptions::default(), 2);
        let a = doc("a.md", "a\n", 0);
        let b = doc("b.md", "b\n", 0);
        let c = doc("c.md", "c\n", 0);

        let held = cache.get_or_parse(&a).unwrap();
        cache.get_or_parse(&b).unwrap();
        cache.get_or_parse(&a).unwrap();
        cache.get_or_parse(&c).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(a.id()).is_some());
        assert!(cache.get(b.id()).is_none());
        assert_eq!(held.text(), "a\n", "evicted readers keep their snapshot");

        cache.get_or_parse(&b).unwrap();
        assert_eq!(cache.parse_count(), 4);
    }

    #[test]
    fn zero_capacity_still_caches_one() {
        let cache = ParseCache::new(ParserOptions::default(), 0);
        assert_eq!(cache.capacity(), 1);
    }

    #[test]
    fn profile_change_drops_entries() {
        let cache = Arc::new(ParseCache::for_profile("github", ParserOptions::github(), 4));
        let mut store = ProfileStore::with_presets();
        store.register_listener(cache.clone());

        cache.get_or_parse(&doc("a.md", "[[x]]\n", 0)).unwrap();
        store
            .update_parser("gitlab", |options| options.tables = false)
            .unwrap();
        assert_eq!(cache.len(), 1, "other profiles are ignored");

        store
            .update_parser("github", |options| options.wiki_links = false)
            .unwrap();
        assert!(cache.is_empty());
        assert!(!cache.options().wiki_links);
    }

    #[test]
    fn reference_table_comes_from_the_cached_parse() {
        let cache = ParseCache::new(ParserOptions::default(), 4);
        let document = doc("a.md", "# Intro\n", 0);
        let table = cache.reference_table(&document).unwrap();
        assert_eq!(table.anchors("intro").len(), 1);
        assert!(Arc::ptr_eq(
            &table,
            &cache.get_or_parse(&document).unwrap().reference_table()
        ));
    }
}
