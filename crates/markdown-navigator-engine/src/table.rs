use std::collections::HashMap;

use markdown_navigator_syntax::SyntaxNode;

use crate::element::{Capabilities, Element, Namespace, NodePtr};
use crate::models::DocumentId;

/// Every identifier a document declares, and every reference it makes.
///
/// Lists are in source order. A table is a pure function of one parsed
/// version; it is built once and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    page: String,
    definitions: HashMap<String, Vec<NodePtr>>,
    anchors: HashMap<String, Vec<NodePtr>>,
    references: Vec<NodePtr>,
}

impl ReferenceTable {
    pub fn build(id: &DocumentId, root: &SyntaxNode) -> Self {
        let mut table = ReferenceTable {
            page: id.normalized_page_name(),
            ..Default::default()
        };

        for element in root.descendants().filter_map(Element::cast) {
            if let Some((namespace, name)) = element.declares() {
                let map = match namespace {
                    Namespace::Definition => &mut table.definitions,
                    Namespace::Anchor => &mut table.anchors,
                };
                map.entry(name).or_default().push(element.ptr());
            }
            if element.has(Capabilities::REFERENCE | Capabilities::RENAMEABLE) {
                table.references.push(element.ptr());
            }
        }

        log::debug!(
            "reference table for {id}: {} definitions, {} anchors, {} references",
            table.definitions.len(),
            table.anchors.len(),
            table.references.len()
        );
        table
    }

    /// Normalised page name of the document.
    pub fn page(&self) -> &str {
        &self.page
    }

    /// Reference definitions declaring `label` (already normalised).
    pub fn definitions(&self, label: &str) -> &[NodePtr] {
        self.definitions.get(label).map_or(&[], Vec::as_slice)
    }

    /// Headings, attribute ids and ref anchors declaring `id` (already normalised).
    pub fn anchors(&self, id: &str) -> &[NodePtr] {
        self.anchors.get(id).map_or(&[], Vec::as_slice)
    }

    /// Every renameable reference in the document.
    pub fn references(&self) -> &[NodePtr] {
        &self.references
    }

    pub fn anchor_ids(&self) -> impl Iterator<Item = &str> {
        self.anchors.keys().map(String::as_str)
    }

    pub fn definition_labels(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_navigator_syntax::{SyntaxKind, parse};
    use pretty_assertions::assert_eq;

    fn table(text: &str) -> ReferenceTable {
        ReferenceTable::build(&DocumentId::from_relative_str("notes/My Page.md"), &parse(text))
    }

    #[test]
    fn collects_every_namespace() {
        let table = table(
            "# Intro\n\n## Setup {#install}\n\nSee <a id=\"Here\"></a> [x][Foo].\n\n[ foo ]: https://x\n",
        );

        assert_eq!(table.page(), "my-page");
        assert_eq!(table.anchors("intro").len(), 1);
        assert_eq!(table.anchors("install").len(), 1);
        assert_eq!(table.anchors("here")[0].kind(), SyntaxKind::REF_ANCHOR);
        assert!(table.anchors("setup").is_empty(), "explicit id replaces generated");
        assert_eq!(table.definitions("foo")[0].kind(), SyntaxKind::REFERENCE);
        assert!(table.definitions("missing").is_empty());
    }

    #[test]
    fn duplicates_keep_source_order() {
        let table = table("# Intro\n\ntext\n\n# intro\n");
        let anchors = table.anchors("intro");
        assert_eq!(anchors.len(), 2);
        assert!(anchors[0].range().start() < anchors[1].range().start());
    }

    #[test]
    fn references_are_listed_in_order() {
        let table = table("[[A]] then [b](c.md#d)\n");
        let kinds: Vec<_> = table.references().iter().map(|ptr| ptr.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::WIKI_LINK_REF,
                SyntaxKind::LINK_URL,
                SyntaxKind::LINK_ANCHOR
            ]
        );
    }

    #[test]
    fn empty_document_declares_nothing() {
        let table = table("");
        assert_eq!(table.anchor_ids().count(), 0);
        assert_eq!(table.definition_labels().count(), 0);
        assert!(table.references().is_empty());
    }
}
