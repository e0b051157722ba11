use std::sync::Arc;

use markdown_navigator_syntax::{ParserOptions, SyntaxNode, parse_with};
use once_cell::sync::OnceCell;
use rowan::{GreenNode, TextSize};

use crate::element::{Capabilities, Element, ElementKind, NodePtr};
use crate::models::{Document, DocumentId};
use crate::table::ReferenceTable;

/// One version of a document together with its syntax tree.
///
/// Only the green tree is stored, so a `ParsedDocument` can be shared across
/// threads; [`ParsedDocument::syntax`] builds a red root on demand. The
/// reference table is built on first use and published once.
#[derive(Debug)]
pub struct ParsedDocument {
    document: Document,
    options: ParserOptions,
    green: GreenNode,
    table: OnceCell<Arc<ReferenceTable>>,
}

impl ParsedDocument {
    pub fn parse(document: Document, options: ParserOptions) -> Self {
        let green = parse_with(document.text(), &options).into_green();
        log::debug!("parsed {} v{}", document.id(), document.version());
        Self {
            document,
            options,
            green,
            table: OnceCell::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn id(&self) -> &DocumentId {
        self.document.id()
    }

    pub fn version(&self) -> u64 {
        self.document.version()
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn reference_table(&self) -> Arc<ReferenceTable> {
        self.table
            .get_or_init(|| Arc::new(ReferenceTable::build(self.id(), &self.syntax())))
            .clone()
    }

    /// The innermost reference or anchor target under `offset`.
    pub fn element_at(&self, offset: TextSize) -> Option<Element> {
        let wanted = Capabilities::REFERENCE | Capabilities::ANCHOR_TARGET;
        Element::at_offset(&self.syntax(), offset, wanted)
            .filter(|element| element.kind() != ElementKind::Document)
    }

    /// Re-materialise an element from a pointer into this version.
    pub fn element(&self, ptr: NodePtr) -> Option<Element> {
        ptr.to_node(&self.syntax()).and_then(Element::cast)
    }

    /// Every element, in source order.
    pub fn elements(&self) -> impl Iterator<Item = Element> + use<> {
        self.syntax().descendants().filter_map(Element::cast)
    }
}
