use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use markdown_navigator_syntax::ParserOptions;
use rowan::{TextRange, TextSize};

use crate::cache::ParseCache;
use crate::element::{Capabilities, Element};
use crate::error::EngineError;
use crate::io;
use crate::manipulate::{self, RenameEdit, RenameReason};
use crate::models::{Document, DocumentId};
use crate::parsed::ParsedDocument;
use crate::resolve::{self, ResolvedTarget, Scope};

/// A set of markdown documents, usually a notes directory on disk.
///
/// The workspace is the single writer for its documents: every change goes
/// through [`Workspace::apply_edit`] or [`Workspace::replace`] and produces a
/// new version. Parsing goes through a shared [`ParseCache`].
#[derive(Debug)]
pub struct Workspace {
    root: Option<PathBuf>,
    documents: BTreeMap<DocumentId, Document>,
    cache: Arc<ParseCache>,
}

impl Workspace {
    /// Read every `.md` file under `root`.
    pub fn load(root: &Path, options: ParserOptions, capacity: usize) -> Result<Self, EngineError> {
        Self::load_with_cache(root, Arc::new(ParseCache::new(options, capacity)))
    }

    pub fn load_with_cache(root: &Path, cache: Arc<ParseCache>) -> Result<Self, EngineError> {
        let mut documents = BTreeMap::new();
        for id in io::scan_documents(root)? {
            match io::read_document(&id, root) {
                Ok(document) => {
                    documents.insert(id, document);
                }
                Err(err) => log::warn!("skipping {id}: {err}"),
            }
        }
        log::info!("loaded {} documents from {}", documents.len(), root.display());

        Ok(Self {
            root: Some(root.to_path_buf()),
            documents,
            cache,
        })
    }

    /// An in-memory workspace.
    pub fn from_documents(
        documents: impl IntoIterator<Item = Document>,
        cache: Arc<ParseCache>,
    ) -> Self {
        Self {
            root: None,
            documents: documents
                .into_iter()
                .map(|doc| (doc.id().clone(), doc))
                .collect(),
            cache,
        }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn cache(&self) -> &Arc<ParseCache> {
        &self.cache
    }

    pub fn document(&self, id: &DocumentId) -> Result<&Document, EngineError> {
        self.documents
            .get(id)
            .ok_or_else(|| EngineError::NotFound(id.clone()))
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &DocumentId> {
        self.documents.keys()
    }

    pub fn parsed(&self, id: &DocumentId) -> Result<Arc<ParsedDocument>, EngineError> {
        self.cache.get_or_parse(self.document(id)?)
    }

    /// Every document, parsed, in path order.
    pub fn scope(&self) -> Result<Scope, EngineError> {
        let documents = self
            .documents
            .values()
            .map(|doc| self.cache.get_or_parse(doc))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Scope::new(documents))
    }

    /// Replace `range` of the current version and store the next one.
    pub fn apply_edit(
        &mut self,
        id: &DocumentId,
        range: TextRange,
        replacement: &str,
    ) -> Result<&Document, EngineError> {
        let next = self.document(id)?.edit(range, replacement)?;
        Ok(self.store(next))
    }

    /// Store new text for a document, creating it if needed.
    pub fn replace(&mut self, id: &DocumentId, text: &str) -> &Document {
        let next = match self.documents.get(id) {
            Some(current) => current.replace(text),
            None => Document::new(id.clone(), text),
        };
        self.store(next)
    }

    fn store(&mut self, document: Document) -> &Document {
        log::debug!("{} now at v{}", document.id(), document.version());
        let id = document.id().clone();
        self.documents.insert(id.clone(), document);
        &self.documents[&id]
    }

    /// The reference or anchor at `offset` in a document, and its targets.
    pub fn resolve_at(
        &self,
        id: &DocumentId,
        offset: TextSize,
    ) -> Result<Option<(Element, Vec<ResolvedTarget>)>, EngineError> {
        let parsed = self.parsed(id)?;
        let Some(element) = parsed.element_at(offset) else {
            return Ok(None);
        };
        let scope = self.scope()?;
        let targets = resolve::resolve(&element, &parsed, &scope);
        Ok(Some((element, targets)))
    }

    /// Unresolved references of every document, in path order.
    pub fn unresolved(&self) -> Result<Vec<(DocumentId, Element)>, EngineError> {
        let scope = self.scope()?;
        Ok(scope
            .documents()
            .iter()
            .flat_map(|doc| {
                resolve::unresolved(doc, &scope)
                    .into_iter()
                    .map(|element| (doc.id().clone(), element))
            })
            .collect())
    }

    /// Plan a rename of the element at `offset`: a reference renames the
    /// target it resolves to (when it resolves to exactly one), a target
    /// renames itself. Nothing is changed until the edits are applied.
    pub fn rename_at(
        &self,
        id: &DocumentId,
        offset: TextSize,
        new_name: &str,
        reason: RenameReason,
    ) -> Result<Vec<RenameEdit>, EngineError> {
        let parsed = self.parsed(id)?;
        let element = parsed.element_at(offset).ok_or_else(|| {
            EngineError::invalid(format!("nothing to rename at offset {offset:?} in {id}"))
        })?;
        let scope = self.scope()?;

        let targets = resolve::resolve(&element, &parsed, &scope);
        let (document, node) = match targets.as_slice() {
            [target] => (target.document.clone(), target.node),
            [] if element.has(Capabilities::ANCHOR_TARGET) => {
                (id.clone(), element.ptr())
            }
            [] => {
                return Err(EngineError::invalid(format!(
                    "`{}` does not resolve to anything",
                    element.text()
                )));
            }
            _ => {
                return Err(EngineError::invalid(format!(
                    "`{}` is ambiguous: {} targets",
                    element.text(),
                    targets.len()
                )));
            }
        };

        manipulate::rename_references(&scope, &document, node, new_name, reason)
    }

    /// Apply planned edits, one new version per touched document. Edits
    /// must be against the current versions. Either every document is
    /// updated or none is.
    pub fn apply_renames(&mut self, edits: &[RenameEdit]) -> Result<Vec<DocumentId>, EngineError> {
        let mut by_document: BTreeMap<&DocumentId, Vec<&RenameEdit>> = BTreeMap::new();
        for edit in edits {
            by_document.entry(&edit.document).or_default().push(edit);
        }

        let mut next = Vec::new();
        for (id, mut edits) in by_document {
            edits.sort_by_key(|edit| std::cmp::Reverse(edit.range.start()));
            if edits.windows(2).any(|pair| pair[1].range.end() > pair[0].range.start()) {
                return Err(EngineError::invalid(format!("overlapping edits in {id}")));
            }

            let current = self.document(id)?;
            if let Some(stale) = edits.iter().find(|edit| edit.version != current.version()) {
                return Err(EngineError::StaleVersion {
                    document: id.clone(),
                    requested: stale.version,
                    current: current.version(),
                });
            }
            let mut text = current.text().to_string();
            for edit in &edits {
                let range = std::ops::Range::<usize>::from(edit.range);
                if range.end > text.len()
                    || !text.is_char_boundary(range.start)
                    || !text.is_char_boundary(range.end)
                {
                    return Err(EngineError::invalid(format!(
                        "edit {:?} is outside {id}",
                        edit.range
                    )));
                }
                text.replace_range(range, &edit.replacement);
            }
            next.push(current.replace(text));
        }

        Ok(next
            .into_iter()
            .map(|document| self.store(document).id().clone())
            .collect())
    }

    /// Write a document back to the workspace root.
    pub fn save(&self, id: &DocumentId) -> Result<(), EngineError> {
        let root = self
            .root
            .as_deref()
            .ok_or_else(|| EngineError::invalid(format!("{id} has no directory to save to")))?;
        io::write_document(self.document(id)?, root)?;
        Ok(())
    }
}
