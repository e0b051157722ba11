//! # Reference Resolution
//!
//! [`resolve`] maps a reference element to every anchor target it names.
//! Matching is equality of normalised identifiers (see [`crate::normalize`]).
//! Nothing is ever picked on the caller's behalf: when an identifier is
//! declared twice, both declarations come back, ordered by their document's
//! position in the [`Scope`] and then by source position.
//!
//! An empty result means the reference is unresolved. That is an ordinary
//! outcome, not an error.

use std::sync::Arc;

use relative_path::RelativePathBuf;

use crate::element::{Capabilities, DocumentRef, Element, ElementKind, NodePtr, Target};
use crate::models::DocumentId;
use crate::normalize;
use crate::parsed::ParsedDocument;

/// The documents a reference may resolve into, in priority order.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    documents: Vec<Arc<ParsedDocument>>,
}

impl Scope {
    pub fn new(documents: Vec<Arc<ParsedDocument>>) -> Self {
        Self { documents }
    }

    pub fn single(document: Arc<ParsedDocument>) -> Self {
        Self::new(vec![document])
    }

    pub fn documents(&self) -> &[Arc<ParsedDocument>] {
        &self.documents
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Arc<ParsedDocument>> {
        self.documents.iter().find(|doc| doc.id() == id)
    }
}

/// One candidate target of a reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedTarget {
    pub document: DocumentId,
    pub node: NodePtr,
    pub kind: ElementKind,
}

impl ResolvedTarget {
    fn new(document: &ParsedDocument, node: NodePtr) -> Option<Self> {
        Some(Self {
            document: document.id().clone(),
            node,
            kind: ElementKind::from_syntax(node.kind())?,
        })
    }

    /// The target element, materialised from the document it was found in.
    pub fn element(&self, scope: &Scope) -> Option<Element> {
        scope.get(&self.document)?.element(self.node)
    }
}

/// Every target `element` refers to. `origin` is the document the element
/// belongs to; it is consulted for same-document lookups even if it is not
/// part of `scope`.
pub fn resolve(element: &Element, origin: &ParsedDocument, scope: &Scope) -> Vec<ResolvedTarget> {
    if !element.has(Capabilities::REFERENCE) {
        return Vec::new();
    }
    if let Some(identifier) = element.reference_identifier() {
        return resolve(&identifier, origin, scope);
    }
    let Some(target) = element.target() else {
        return Vec::new();
    };

    let resolved: Vec<ResolvedTarget> = match &target {
        Target::External => Vec::new(),
        Target::Definition(label) => origin
            .reference_table()
            .definitions(label)
            .iter()
            .filter_map(|&ptr| ResolvedTarget::new(origin, ptr))
            .collect(),
        Target::Anchor { document: None, id } => origin
            .reference_table()
            .anchors(id)
            .iter()
            .filter_map(|&ptr| ResolvedTarget::new(origin, ptr))
            .collect(),
        Target::Anchor {
            document: Some(document),
            id,
        } => documents(document, origin, scope)
            .into_iter()
            .flat_map(|doc| {
                doc.reference_table()
                    .anchors(id)
                    .iter()
                    .filter_map(|&ptr| ResolvedTarget::new(doc, ptr))
                    .collect::<Vec<_>>()
            })
            .collect(),
        Target::Document(document) => documents(document, origin, scope)
            .into_iter()
            .filter_map(|doc| ResolvedTarget::new(doc, NodePtr::new(&doc.syntax())))
            .collect(),
    };

    log::debug!(
        "resolved {:?} in {} to {} target(s)",
        target,
        origin.id(),
        resolved.len()
    );
    resolved
}

/// Documents in scope that a document reference names.
fn documents<'a>(
    document: &DocumentRef,
    origin: &ParsedDocument,
    scope: &'a Scope,
) -> Vec<&'a ParsedDocument> {
    match document {
        DocumentRef::Page(page) => scope
            .documents
            .iter()
            .filter(|doc| doc.id().normalized_page_name() == *page)
            .map(Arc::as_ref)
            .collect(),
        DocumentRef::Path(url) => {
            let path = url.trim().replace("%20", " ");
            if path.is_empty() {
                return Vec::new();
            }

            let joined = match path.strip_prefix('/') {
                Some(rooted) => RelativePathBuf::from(rooted).normalize(),
                None => origin.id().directory().join_normalized(&path),
            };
            let with_md = RelativePathBuf::from(format!("{joined}.md"));

            let by_path: Vec<&ParsedDocument> = scope
                .documents
                .iter()
                .filter(|doc| {
                    let candidate = doc.id().relative_path();
                    candidate == joined.as_relative_path() || candidate == with_md.as_relative_path()
                })
                .map(Arc::as_ref)
                .collect();
            if !by_path.is_empty() || path.contains('/') {
                return by_path;
            }

            // A bare name like `Page-Two` links to the wiki page of that name.
            let page = normalize::page_name(&path);
            scope
                .documents
                .iter()
                .filter(|doc| doc.id().normalized_page_name() == page)
                .map(Arc::as_ref)
                .collect()
        }
    }
}

/// References in `document` that point into the workspace but resolve to
/// nothing in `scope`.
pub fn unresolved(document: &ParsedDocument, scope: &Scope) -> Vec<Element> {
    let table = document.reference_table();
    table
        .references()
        .iter()
        .filter_map(|&ptr| document.element(ptr))
        .filter(|element| {
            let external = matches!(element.target(), Some(Target::External) | None);
            !external && !is_declaration(element) && resolve(element, document, scope).is_empty()
        })
        .collect()
}

/// A definition's own label, attribute ids and anchor ids are declarations
/// as much as references.
fn is_declaration(element: &Element) -> bool {
    matches!(
        element.kind(),
        ElementKind::ReferenceIdentifier | ElementKind::AttributeIdValue | ElementKind::RefAnchorId
    )
}

/// Every reference in `scope`, other than the target itself, that resolves
/// to the target at `node` in `document`.
///
/// Declarations count only when they belong to the target (the label of a
/// definition, the id of a ref anchor). Another declaration of the same id
/// resolves to the target too but is a separate target, not a use of it.
pub fn usages(document: &DocumentId, node: NodePtr, scope: &Scope) -> Vec<(DocumentId, NodePtr)> {
    let mut found = Vec::new();
    for doc in scope.documents() {
        let in_target_document = doc.id() == document;
        for &ptr in doc.reference_table().references() {
            if in_target_document && ptr == node {
                continue;
            }
            let Some(element) = doc.element(ptr) else {
                continue;
            };
            let own_declaration = in_target_document && node.range().contains_range(ptr.range());
            if is_declaration(&element) && !own_declaration {
                continue;
            }
            let hit = resolve(&element, doc, scope)
                .iter()
                .any(|target| target.document == *document && target.node == node);
            if hit {
                found.push((doc.id().clone(), ptr));
            }
        }
    }
    found
}
