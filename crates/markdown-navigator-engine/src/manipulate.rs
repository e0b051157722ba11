//! # Rename / Manipulation
//!
//! Edits to renameable elements. Every edit splices the document text,
//! produces the next version, reparses it in full and hands back the element
//! at the same tree position in the new tree. The element passed in belongs
//! to the old version and should not be used afterwards.
//!
//! An edit is refused with [`EngineError::InvalidManipulation`] when it
//! touches the element's delimiters, targets an element without the
//! `RENAMEABLE` capability, or when the new text would parse into a
//! different structure (renaming `Page` to `a]]b` would end the wiki link
//! early). A refused edit leaves the original document as it was.

use std::sync::Arc;

use relative_path::RelativePath;
use rowan::{NodeOrToken, TextRange};

use crate::element::{Capabilities, Element, ElementKind, NodePtr};
use crate::error::EngineError;
use crate::models::DocumentId;
use crate::normalize;
use crate::parsed::ParsedDocument;
use crate::resolve::{Scope, usages};
use markdown_navigator_syntax::SyntaxNode;

/// Why a rename happens. Affects how the new name is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenameReason {
    /// Typed by the user; delimiters they included are dropped
    UserRename,
    /// Follows a rename of the target, the name is used as given
    ReferenceUpdate,
    /// The target file got a new name; the new name is a file name
    FileRenamed,
    /// The target file moved; the new name is its new path in the workspace
    FileMoved,
}

/// The new version and the element as it is found there.
#[derive(Debug, Clone)]
pub struct EditResult {
    pub parsed: Arc<ParsedDocument>,
    pub element: Element,
}

/// One text replacement, in absolute offsets of `version` of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    pub document: DocumentId,
    pub version: u64,
    pub range: TextRange,
    pub replacement: String,
}

/// The part of a renameable element that may be replaced, relative to the
/// element's start.
pub fn range_in_element(element: &Element) -> Result<TextRange, EngineError> {
    if !element.has(Capabilities::RENAMEABLE) {
        return Err(EngineError::invalid(format!(
            "{:?} `{}` can't be renamed",
            element.kind(),
            element.text()
        )));
    }
    Ok(element.name_range())
}

/// Replace `range` (relative to the element) with `text`.
pub fn handle_content_change(
    parsed: &ParsedDocument,
    element: &Element,
    range: TextRange,
    text: &str,
) -> Result<EditResult, EngineError> {
    let allowed = range_in_element(element)?;
    if !allowed.contains_range(range) {
        return Err(EngineError::invalid(format!(
            "range {range:?} is outside the editable range {allowed:?} of `{}`",
            element.text()
        )));
    }

    let mut expected = element.text();
    let (start, end) = (usize::from(range.start()), usize::from(range.end()));
    if !expected.is_char_boundary(start) || !expected.is_char_boundary(end) {
        return Err(EngineError::invalid(format!(
            "range {range:?} splits a character of `{expected}`"
        )));
    }
    expected.replace_range(start..end, text);

    let absolute = range + element.text_range().start();
    let document = parsed.document().edit(absolute, text)?;
    let reparsed = Arc::new(ParsedDocument::parse(document, *parsed.options()));

    let path = child_path(element.node());
    let relocated = follow_path(&reparsed.syntax(), &path)
        .filter(|node| node.kind() == element.syntax_kind() && node.text() == expected.as_str())
        .and_then(Element::cast)
        .ok_or_else(|| {
            EngineError::invalid(format!(
                "replacing `{}` with `{text}` changes the structure of {}",
                element.text(),
                parsed.id()
            ))
        })?;

    log::debug!(
        "{} v{}: {:?} `{}` -> `{}`",
        reparsed.id(),
        reparsed.version(),
        element.kind(),
        element.text(),
        relocated.text()
    );
    Ok(EditResult {
        parsed: reparsed,
        element: relocated,
    })
}

/// Replace the whole editable range of an element.
pub fn set_content(
    parsed: &ParsedDocument,
    element: &Element,
    text: &str,
) -> Result<EditResult, EngineError> {
    let range = range_in_element(element)?;
    handle_content_change(parsed, element, range, text)
}

/// Rename an element, formatting `name` according to `reason`.
pub fn set_name(
    parsed: &ParsedDocument,
    element: &Element,
    name: &str,
    reason: RenameReason,
) -> Result<EditResult, EngineError> {
    let name = rename_text(element, parsed.id(), name, reason);
    set_content(parsed, element, &name)
}

/// What a rename to `name` writes into `element`, which sits in `document`.
pub fn rename_text(
    element: &Element,
    document: &DocumentId,
    name: &str,
    reason: RenameReason,
) -> String {
    match reason {
        RenameReason::ReferenceUpdate => name.to_string(),
        RenameReason::UserRename => {
            let name = name.trim();
            match element.kind() {
                ElementKind::ReferenceIdentifier | ElementKind::ReferenceLinkRef => name
                    .strip_prefix('[')
                    .and_then(|n| n.strip_suffix(']'))
                    .unwrap_or(name)
                    .to_string(),
                ElementKind::LinkAnchor
                | ElementKind::WikiLinkAnchor
                | ElementKind::AttributeIdValue
                | ElementKind::RefAnchor
                | ElementKind::RefAnchorId => name.trim_start_matches('#').to_string(),
                _ => name.to_string(),
            }
        }
        RenameReason::FileRenamed => match element.kind() {
            ElementKind::WikiLinkRef | ElementKind::WikiLinkText => wiki_page_name(name),
            ElementKind::LinkUrl | ElementKind::ReferenceUrl => {
                let url = element.text();
                match url.rsplit_once('/') {
                    Some((dir, _)) => format!("{dir}/{}", file_name(name)),
                    None => file_name(name).to_string(),
                }
            }
            _ => name.to_string(),
        },
        RenameReason::FileMoved => match element.kind() {
            ElementKind::WikiLinkRef | ElementKind::WikiLinkText => wiki_page_name(name),
            ElementKind::LinkUrl | ElementKind::ReferenceUrl => {
                moved_link(&element.text(), document, name)
            }
            _ => name.to_string(),
        },
    }
}

/// Link from `from` to a file now at workspace path `new_path`, written the
/// way `url` was: rooted or relative, with or without `.md`, `%20` for spaces.
fn moved_link(url: &str, from: &DocumentId, new_path: &str) -> String {
    let target = RelativePath::new(new_path.trim_start_matches('/')).normalize();
    let mut link = if url.starts_with('/') {
        format!("/{target}")
    } else {
        from.directory().relative(&target).into_string()
    };
    if !url.ends_with(".md") && link.ends_with(".md") {
        link.truncate(link.len() - ".md".len());
    }
    if url.contains("%20") {
        link = link.replace(' ', "%20");
    }
    link
}

fn file_name(path: &str) -> &str {
    RelativePath::new(path).file_name().unwrap_or(path)
}

/// `notes/Page-Two.md` is linked as `[[Page Two]]`.
fn wiki_page_name(path: &str) -> String {
    let name = file_name(path);
    name.strip_suffix(".md").unwrap_or(name).replace('-', " ")
}

/// Edits renaming the target at `node` in `document`, and every reference to
/// it in `scope`, to `new_name`.
///
/// For headings the references get the id generated from the new heading
/// text; the heading text itself is not a name and is left to the caller.
/// Wiki link text is only rewritten where it repeats the page name.
pub fn rename_references(
    scope: &Scope,
    document: &DocumentId,
    node: NodePtr,
    new_name: &str,
    reason: RenameReason,
) -> Result<Vec<RenameEdit>, EngineError> {
    let origin = scope
        .get(document)
        .ok_or_else(|| EngineError::NotFound(document.clone()))?;
    let target = origin.element(node).ok_or_else(|| {
        EngineError::invalid(format!("no {:?} at {:?} in {document}", node.kind(), node.range()))
    })?;

    let (reference_name, reference_reason) = match target.kind() {
        ElementKind::Heading => (normalize::heading_id(new_name), RenameReason::ReferenceUpdate),
        ElementKind::Document => (new_name.to_string(), reason),
        _ => (
            rename_text(&target, document, new_name, RenameReason::UserRename),
            RenameReason::ReferenceUpdate,
        ),
    };

    let mut edits = Vec::new();

    // Definition labels and ref anchor ids show up among the usages since
    // they resolve to their own declaration. An attribute id is the target.
    if target.kind() == ElementKind::AttributeIdValue {
        edits.push(edit(
            origin,
            &target,
            rename_text(&target, document, &reference_name, reference_reason),
        ));
    }

    let old_page = document.normalized_page_name();
    for (id, ptr) in usages(document, node, scope) {
        let Some(doc) = scope.get(&id) else {
            continue;
        };
        let Some(element) = doc.element(ptr) else {
            continue;
        };
        if element.kind() == ElementKind::WikiLinkText
            && normalize::page_name(&element.text()) != old_page
        {
            continue;
        }
        let replacement = rename_text(&element, &id, &reference_name, reference_reason);
        edits.push(edit(doc, &element, replacement));
    }

    log::debug!(
        "renaming {:?} in {document} to `{new_name}`: {} edit(s)",
        target.kind(),
        edits.len()
    );
    Ok(edits)
}

fn edit(document: &ParsedDocument, element: &Element, replacement: String) -> RenameEdit {
    RenameEdit {
        document: document.id().clone(),
        version: document.version(),
        range: element.name_range() + element.text_range().start(),
        replacement,
    }
}

/// Position of `node` as child indices from the root.
fn child_path(node: &SyntaxNode) -> Vec<usize> {
    let mut path: Vec<usize> = node
        .ancestors()
        .take_while(|n| n.parent().is_some())
        .map(|n| n.index())
        .collect();
    path.reverse();
    path
}

fn follow_path(root: &SyntaxNode, path: &[usize]) -> Option<SyntaxNode> {
    let mut node = root.clone();
    for &index in path {
        node = match node.children_with_tokens().nth(index)? {
            NodeOrToken::Node(child) => child,
            NodeOrToken::Token(_) => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::unresolved;
    use crate::tests::parsed;
    use markdown_navigator_syntax::SyntaxKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn find(doc: &ParsedDocument, kind: SyntaxKind) -> Element {
        doc.elements()
            .find(|e| e.syntax_kind() == kind)
            .expect("element of kind")
    }

    #[rstest]
    #[case("See [x][Old Ref].\n", SyntaxKind::REFERENCE_LINK_REF, "New", "[New]")]
    #[case("[Old]: https://x\n", SyntaxKind::REFERENCE_IDENTIFIER, "Fresh", "[Fresh]")]
    #[case("[[Old Page|text]]\n", SyntaxKind::WIKI_LINK_REF, "New Page", "New Page")]
    #[case("[[Page#old]]\n", SyntaxKind::WIKI_LINK_ANCHOR, "new", "#new")]
    #[case("[x](page.md#old)\n", SyntaxKind::LINK_ANCHOR, "new-one", "#new-one")]
    #[case("# T {#old}\n", SyntaxKind::ATTRIBUTE_ID_VALUE, "new", "new")]
    fn round_trip_keeps_delimiters(
        #[case] text: &str,
        #[case] kind: SyntaxKind,
        #[case] new_name: &str,
        #[case] expected_text: &str,
    ) {
        let doc = parsed("a.md", text);
        let element = find(&doc, kind);

        let range = range_in_element(&element).unwrap();
        let result = handle_content_change(&doc, &element, range, new_name).unwrap();

        assert_eq!(result.element.text(), expected_text);
        assert_eq!(result.element.kind(), element.kind());
        assert_eq!(result.parsed.version(), doc.version() + 1);
        assert_eq!(
            result.element.reference_name().as_deref(),
            Some(new_name),
            "name reflects the new text exactly"
        );
    }

    #[test]
    fn partial_edit_inside_the_name() {
        let doc = parsed("a.md", "[t][abc]\n");
        let element = find(&doc, SyntaxKind::REFERENCE_LINK_REF);
        let result =
            handle_content_change(&doc, &element, TextRange::new(2.into(), 3.into()), "XY").unwrap();
        assert_eq!(result.element.text(), "[aXYc]");
        assert_eq!(result.parsed.text(), "[t][aXYc]\n");
    }

    #[test]
    fn edit_touching_a_bracket_is_rejected() {
        let doc = parsed("a.md", "[t][abc]\n");
        let element = find(&doc, SyntaxKind::REFERENCE_LINK_REF);
        let err = handle_content_change(&doc, &element, TextRange::new(0.into(), 2.into()), "x")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidManipulation(_)));
        assert_eq!(doc.text(), "[t][abc]\n");
    }

    #[test]
    fn non_renameable_element_is_rejected() {
        let doc = parsed("a.md", "# Heading\n");
        let heading = find(&doc, SyntaxKind::HEADING);
        assert!(matches!(
            set_content(&doc, &heading, "Other"),
            Err(EngineError::InvalidManipulation(_))
        ));
    }

    #[test]
    fn structural_change_is_rejected() {
        let doc = parsed("a.md", "[[Page]] tail\n");
        let element = find(&doc, SyntaxKind::WIKI_LINK_REF);
        let err = set_content(&doc, &element, "a]]b").unwrap_err();
        assert!(err.to_string().contains("changes the structure"));
    }

    #[rstest]
    #[case(SyntaxKind::REFERENCE_LINK_REF, "[Typed]", RenameReason::UserRename, "Typed")]
    #[case(SyntaxKind::REFERENCE_LINK_REF, "[Typed]", RenameReason::ReferenceUpdate, "[Typed]")]
    #[case(SyntaxKind::LINK_ANCHOR, "#typed", RenameReason::UserRename, "typed")]
    #[case(SyntaxKind::WIKI_LINK_REF, "notes/Page-Two.md", RenameReason::FileRenamed, "Page Two")]
    #[case(SyntaxKind::LINK_URL, "Renamed.md", RenameReason::FileRenamed, "dir/Renamed.md")]
    #[case(SyntaxKind::LINK_URL, "moved/Doc.md", RenameReason::FileMoved, "../moved/Doc.md")]
    #[case(SyntaxKind::WIKI_LINK_REF, "moved/Page-Two.md", RenameReason::FileMoved, "Page Two")]
    fn rename_policy(
        #[case] kind: SyntaxKind,
        #[case] name: &str,
        #[case] reason: RenameReason,
        #[case] expected: &str,
    ) {
        let doc = parsed("notes/a.md", "[[Page]] [l](dir/old.md#a) [x][y]\n");
        let element = find(&doc, kind);
        assert_eq!(rename_text(&element, doc.id(), name, reason), expected);
    }

    #[test]
    fn set_name_strips_typed_brackets() {
        let doc = parsed("a.md", "[x][old]\n\n[old]: https://x\n");
        let element = find(&doc, SyntaxKind::REFERENCE_LINK_REF);
        let result = set_name(&doc, &element, "[new]", RenameReason::UserRename).unwrap();
        assert_eq!(result.parsed.text(), "[x][new]\n\n[old]: https://x\n");
    }

    #[test]
    fn rename_definition_updates_every_reference() {
        let doc = parsed("a.md", "[a][Old] and [b][old]\n\n[OLD]: https://x\n");
        let scope = Scope::single(doc.clone());
        let definition = find(&doc, SyntaxKind::REFERENCE);

        let edits = rename_references(
            &scope,
            doc.id(),
            definition.ptr(),
            "New",
            RenameReason::UserRename,
        )
        .unwrap();

        let replaced: Vec<_> = edits
            .iter()
            .map(|e| (doc.text()[e.range].to_string(), e.replacement.as_str()))
            .collect();
        assert_eq!(
            replaced,
            vec![
                ("Old".to_string(), "New"),
                ("old".to_string(), "New"),
                ("OLD".to_string(), "New"),
            ]
        );
    }

    #[test]
    fn file_rename_rewrites_wiki_refs_and_urls() {
        let target = parsed("notes/Old-Page.md", "# Old\n");
        let index = parsed(
            "index.md",
            "[[Old Page]] [[Old Page|custom]] [[old page|Old Page]] [l](notes/Old-Page.md)\n",
        );
        let scope = Scope::new(vec![target.clone(), index.clone()]);
        let root = NodePtr::new(&target.syntax());

        let edits = rename_references(
            &scope,
            target.id(),
            root,
            "notes/New-Page.md",
            RenameReason::FileRenamed,
        )
        .unwrap();

        let replaced: Vec<_> = edits
            .iter()
            .map(|e| (index.text()[e.range].to_string(), e.replacement.clone()))
            .collect();
        assert_eq!(
            replaced,
            vec![
                ("Old Page".to_string(), "New Page".to_string()),
                ("Old Page".to_string(), "New Page".to_string()),
                ("old page".to_string(), "New Page".to_string()),
                ("Old Page".to_string(), "New Page".to_string()),
                ("notes/Old-Page.md".to_string(), "notes/New-Page.md".to_string()),
            ]
        );
    }

    #[test]
    fn heading_rename_uses_generated_id() {
        let doc = parsed("a.md", "# Getting Started\n\n[go](#getting-started)\n");
        let scope = Scope::single(doc.clone());
        let heading = find(&doc, SyntaxKind::HEADING);

        let edits = rename_references(
            &scope,
            doc.id(),
            heading.ptr(),
            "First Steps",
            RenameReason::UserRename,
        )
        .unwrap();
        assert_eq!(edits.len(), 1);
        assert_eq!(edits[0].replacement, "first-steps");
        assert_eq!(&doc.text()[edits[0].range], "getting-started");
    }

    /// `doc`'s text with the edits that belong to it applied.
    fn applied(doc: &ParsedDocument, edits: &[RenameEdit]) -> String {
        let mut own: Vec<_> = edits.iter().filter(|e| e.document == *doc.id()).collect();
        own.sort_by_key(|e| std::cmp::Reverse(e.range.start()));
        let mut text = doc.text().to_string();
        for e in own {
            text.replace_range(std::ops::Range::<usize>::from(e.range), &e.replacement);
        }
        text
    }

    #[test]
    fn file_move_links_relative_to_each_referrer() {
        let target = parsed("docs/T.md", "# T\n");
        let sibling = parsed("docs/other.md", "[b](T.md) [c](/docs/T.md)\n");
        let index = parsed("index.md", "[a](docs/T.md) [[T]] [d](docs/T)\n");
        let scope = Scope::new(vec![target.clone(), sibling.clone(), index.clone()]);

        let edits = rename_references(
            &scope,
            target.id(),
            NodePtr::new(&target.syntax()),
            "archive/T.md",
            RenameReason::FileMoved,
        )
        .unwrap();

        let sibling_text = applied(&sibling, &edits);
        let index_text = applied(&index, &edits);
        assert_eq!(sibling_text, "[b](../archive/T.md) [c](/archive/T.md)\n");
        assert_eq!(index_text, "[a](archive/T.md) [[T]] [d](archive/T)\n");

        let moved = Scope::new(vec![
            parsed("archive/T.md", "# T\n"),
            parsed("docs/other.md", &sibling_text),
            parsed("index.md", &index_text),
        ]);
        for doc in moved.documents() {
            assert!(unresolved(doc, &moved).is_empty(), "{}", doc.id());
        }
    }

    #[test]
    fn ref_anchor_rename_drops_typed_hash() {
        let doc = parsed("a.md", "<a id=\"old\"></a> [x](#old)\n");
        let scope = Scope::single(doc.clone());
        let anchor = find(&doc, SyntaxKind::REF_ANCHOR);

        let edits =
            rename_references(&scope, doc.id(), anchor.ptr(), "#new", RenameReason::UserRename)
                .unwrap();

        assert_eq!(applied(&doc, &edits), "<a id=\"new\"></a> [x](#new)\n");
        assert!(edits.iter().all(|e| e.version == doc.version()));
    }

    #[test]
    fn other_declarations_of_the_id_are_not_renamed() {
        let doc = parsed("a.md", "# Intro\n\nSee <a id=\"intro\"></a> here.\n");
        let scope = Scope::single(doc.clone());
        let heading = find(&doc, SyntaxKind::HEADING);

        let edits =
            rename_references(&scope, doc.id(), heading.ptr(), "Start", RenameReason::UserRename)
                .unwrap();

        assert!(edits.is_empty(), "{edits:?}");
    }

    #[test]
    fn unknown_document_is_not_found() {
        let doc = parsed("a.md", "x\n");
        let scope = Scope::single(doc.clone());
        let missing = DocumentId::from_relative_str("missing.md");
        assert!(matches!(
            rename_references(&scope, &missing, NodePtr::new(&doc.syntax()), "y", RenameReason::UserRename),
            Err(EngineError::NotFound(_))
        ));
    }
}
