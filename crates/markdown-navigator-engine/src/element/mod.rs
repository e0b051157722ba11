//! # Element Model
//!
//! An [`Element`] is a syntax node seen through its role in the document.
//! Each [`ElementKind`] carries a fixed set of [`Capabilities`]; the resolver
//! and the manipulator only ever ask about capabilities, so a new kind of
//! reference plugs in by declaring what it can do.
//!
//! | Capability | Meaning |
//! |------------|---------|
//! | `BLOCK` / `INLINE` | produced by the block or inline pass |
//! | `REFERENCE` | uses a symbolic name: [`Element::target`] says what it points at |
//! | `ANCHOR_TARGET` | can be pointed at: [`Element::anchor_id`] is its identifier |
//! | `RENAMEABLE` | its name can be replaced in place |
//!
//! All accessors are pure and read only the tree.

mod icon;
mod ptr;

pub use icon::IconKey;
pub use ptr::NodePtr;

use bitflags::bitflags;
use markdown_navigator_syntax::{SyntaxKind, SyntaxNode};
use rowan::{TextRange, TextSize};

use crate::normalize;

bitflags! {
    /// What an element can take part in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const BLOCK = 1 << 0;
        const INLINE = 1 << 1;
        const REFERENCE = 1 << 2;
        const ANCHOR_TARGET = 1 << 3;
        const RENAMEABLE = 1 << 4;
    }
}

/// The typed subtype of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Document,
    Paragraph,
    Heading,
    BlockQuote,
    List,
    ListItem,
    ThematicBreak,
    FencedCode,
    Table,
    TableRow,
    TableCell,
    /// `[label]: url` definition
    ReferenceDefinition,
    /// `[label]` of a definition
    ReferenceIdentifier,
    /// Destination of a definition
    ReferenceUrl,
    /// Destination of a link, image or autolink
    LinkUrl,
    /// `#anchor` after a link destination
    LinkAnchor,
    Link,
    LinkText,
    ReferenceLink,
    /// `[ref]` of a reference link
    ReferenceLinkRef,
    Image,
    Autolink,
    WikiLink,
    WikiLinkRef,
    WikiLinkAnchor,
    WikiLinkText,
    Attributes,
    Attribute,
    /// The `id` in `{#id}` or `{id=id}`
    AttributeIdValue,
    /// `<a id="...">`
    RefAnchor,
    /// The id value of a [`ElementKind::RefAnchor`]
    RefAnchorId,
    CodeSpan,
    Emphasis,
}

impl ElementKind {
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        let kind = match kind {
            SyntaxKind::ROOT => ElementKind::Document,
            SyntaxKind::PARAGRAPH => ElementKind::Paragraph,
            SyntaxKind::HEADING => ElementKind::Heading,
            SyntaxKind::BLOCK_QUOTE => ElementKind::BlockQuote,
            SyntaxKind::LIST => ElementKind::List,
            SyntaxKind::LIST_ITEM => ElementKind::ListItem,
            SyntaxKind::THEMATIC_BREAK => ElementKind::ThematicBreak,
            SyntaxKind::FENCED_CODE => ElementKind::FencedCode,
            SyntaxKind::TABLE => ElementKind::Table,
            SyntaxKind::TABLE_HEADER | SyntaxKind::TABLE_ROW => ElementKind::TableRow,
            SyntaxKind::TABLE_CELL => ElementKind::TableCell,
            SyntaxKind::REFERENCE => ElementKind::ReferenceDefinition,
            SyntaxKind::REFERENCE_IDENTIFIER => ElementKind::ReferenceIdentifier,
            SyntaxKind::REFERENCE_URL => ElementKind::ReferenceUrl,
            SyntaxKind::LINK_URL => ElementKind::LinkUrl,
            SyntaxKind::LINK_ANCHOR => ElementKind::LinkAnchor,
            SyntaxKind::LINK => ElementKind::Link,
            SyntaxKind::LINK_TEXT => ElementKind::LinkText,
            SyntaxKind::REFERENCE_LINK => ElementKind::ReferenceLink,
            SyntaxKind::REFERENCE_LINK_REF => ElementKind::ReferenceLinkRef,
            SyntaxKind::IMAGE => ElementKind::Image,
            SyntaxKind::AUTOLINK => ElementKind::Autolink,
            SyntaxKind::WIKI_LINK => ElementKind::WikiLink,
            SyntaxKind::WIKI_LINK_REF => ElementKind::WikiLinkRef,
            SyntaxKind::WIKI_LINK_ANCHOR => ElementKind::WikiLinkAnchor,
            SyntaxKind::WIKI_LINK_TEXT => ElementKind::WikiLinkText,
            SyntaxKind::ATTRIBUTES => ElementKind::Attributes,
            SyntaxKind::ATTRIBUTE => ElementKind::Attribute,
            SyntaxKind::ATTRIBUTE_ID_VALUE => ElementKind::AttributeIdValue,
            SyntaxKind::REF_ANCHOR => ElementKind::RefAnchor,
            SyntaxKind::REF_ANCHOR_ID => ElementKind::RefAnchorId,
            SyntaxKind::CODE_SPAN => ElementKind::CodeSpan,
            SyntaxKind::EMPHASIS | SyntaxKind::STRONG | SyntaxKind::STRIKETHROUGH => {
                ElementKind::Emphasis
            }
            _ => return None,
        };
        Some(kind)
    }

    pub fn capabilities(self) -> Capabilities {
        use ElementKind::*;

        let block = Capabilities::BLOCK;
        let inline = Capabilities::INLINE;
        let reference = Capabilities::REFERENCE | Capabilities::RENAMEABLE;
        let target = Capabilities::ANCHOR_TARGET;

        match self {
            Document | Heading | ReferenceDefinition => block | target,
            Paragraph | BlockQuote | List | ListItem | ThematicBreak | FencedCode | Table
            | TableRow | TableCell => block,
            ReferenceIdentifier | ReferenceUrl => block | reference,
            ReferenceLinkRef | LinkUrl | LinkAnchor | WikiLinkRef | WikiLinkAnchor
            | WikiLinkText | RefAnchorId => inline | reference,
            AttributeIdValue => inline | reference | target,
            RefAnchor => inline | target | Capabilities::REFERENCE,
            Link | LinkText | ReferenceLink | Image | Autolink | WikiLink | Attributes
            | Attribute | CodeSpan | Emphasis => inline,
        }
    }

    pub fn icon_key(self) -> IconKey {
        use ElementKind::*;

        match self {
            Document => IconKey::Document,
            Paragraph => IconKey::Paragraph,
            Heading => IconKey::Heading,
            BlockQuote => IconKey::BlockQuote,
            List => IconKey::List,
            ListItem => IconKey::ListItem,
            ThematicBreak => IconKey::Rule,
            FencedCode | CodeSpan => IconKey::Code,
            Table | TableRow | TableCell => IconKey::Table,
            ReferenceDefinition | ReferenceIdentifier => IconKey::ReferenceDefinition,
            ReferenceLink | ReferenceLinkRef => IconKey::Reference,
            Link | LinkText | LinkUrl | ReferenceUrl | Autolink => IconKey::Link,
            Image => IconKey::Image,
            WikiLink | WikiLinkRef | WikiLinkText => IconKey::WikiLink,
            LinkAnchor | WikiLinkAnchor | RefAnchor | RefAnchorId => IconKey::Anchor,
            Attributes | Attribute | AttributeIdValue => IconKey::Attribute,
            Emphasis => IconKey::Text,
        }
    }
}

/// A document a reference points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentRef {
    /// Normalised wiki page name
    Page(String),
    /// Link destination as written, relative to the referring document
    Path(String),
}

/// What a reference element points at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    /// A reference definition with this normalised label, in the same document
    Definition(String),
    /// An anchor with this normalised id, in the given document or the
    /// referring one
    Anchor {
        document: Option<DocumentRef>,
        id: String,
    },
    /// A whole document
    Document(DocumentRef),
    /// Outside the workspace (`https:`, `mailto:`...), never resolved
    External,
}

/// The namespace an anchor target declares its identifier in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Definition,
    Anchor,
}

/// A syntax node with a role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    node: SyntaxNode,
    kind: ElementKind,
}

impl Element {
    /// View a node as an element, if its kind has a role.
    pub fn cast(node: SyntaxNode) -> Option<Self> {
        let kind = ElementKind::from_syntax(node.kind())?;
        Some(Self { node, kind })
    }

    /// The innermost element covering `offset` that has any of `capabilities`.
    pub fn at_offset(root: &SyntaxNode, offset: TextSize, capabilities: Capabilities) -> Option<Self> {
        let token = root.token_at_offset(offset).right_biased()?;
        token
            .parent_ancestors()
            .filter_map(Element::cast)
            .find(|element| element.capabilities().intersects(capabilities))
    }

    pub fn node(&self) -> &SyntaxNode {
        &self.node
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn syntax_kind(&self) -> SyntaxKind {
        self.node.kind()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn has(&self, capabilities: Capabilities) -> bool {
        self.capabilities().contains(capabilities)
    }

    pub fn text_range(&self) -> TextRange {
        self.node.text_range()
    }

    pub fn text(&self) -> String {
        self.node.text().to_string()
    }

    pub fn ptr(&self) -> NodePtr {
        NodePtr::new(&self.node)
    }

    pub fn icon_key(&self) -> IconKey {
        self.kind.icon_key()
    }

    pub fn parent(&self) -> Option<Element> {
        self.node.ancestors().skip(1).find_map(Element::cast)
    }

    /// Range of the name inside the element, relative to its start: the
    /// whole text, minus the brackets of a `[label]` or the `#` of an anchor.
    pub fn name_range(&self) -> TextRange {
        let text = self.text();
        let len = TextSize::of(text.as_str());
        let one = TextSize::from(1);

        match self.kind {
            ElementKind::ReferenceIdentifier | ElementKind::ReferenceLinkRef
                if text.len() >= 2 && text.starts_with('[') && text.ends_with(']') =>
            {
                TextRange::new(one, len - one)
            }
            ElementKind::LinkAnchor | ElementKind::WikiLinkAnchor if text.starts_with('#') => {
                TextRange::new(one, len)
            }
            _ => TextRange::up_to(len),
        }
    }

    /// The name as written, without delimiters.
    fn name(&self) -> String {
        let text = self.text();
        let range = self.name_range();
        text[usize::from(range.start())..usize::from(range.end())].to_string()
    }

    /// The raw name a reference element uses.
    pub fn reference_name(&self) -> Option<String> {
        if !self.has(Capabilities::REFERENCE) {
            return None;
        }
        match self.reference_identifier() {
            Some(id) => Some(id.name()),
            None => Some(self.name()),
        }
    }

    /// The nested id element of an HTML ref anchor.
    pub fn reference_identifier(&self) -> Option<Element> {
        match self.kind {
            ElementKind::RefAnchor => child(&self.node, SyntaxKind::REF_ANCHOR_ID).and_then(Element::cast),
            _ => None,
        }
    }

    /// User-facing label: `[label]` for reference identifiers, `#id` for
    /// anchors, the visible text for links and headings.
    pub fn display_name(&self) -> String {
        match self.kind {
            ElementKind::Document => self
                .node
                .descendants()
                .find(|n| n.kind() == SyntaxKind::HEADING)
                .map(|heading| heading_text(&heading))
                .unwrap_or_default(),
            ElementKind::Heading => heading_text(&self.node),
            ElementKind::ReferenceDefinition => child(&self.node, SyntaxKind::REFERENCE_IDENTIFIER)
                .map(|id| id.text().to_string())
                .unwrap_or_default(),
            ElementKind::RefAnchor => match self.reference_identifier() {
                Some(id) => format!("#{}", id.text()),
                None => self.text(),
            },
            ElementKind::WikiLink => match child(&self.node, SyntaxKind::WIKI_LINK_TEXT) {
                Some(text) => text.text().to_string(),
                None => {
                    let text = self.text();
                    text.trim_start_matches('[').trim_end_matches(']').to_string()
                }
            },
            ElementKind::Link | ElementKind::Image | ElementKind::ReferenceLink => {
                match child(&self.node, SyntaxKind::LINK_TEXT)
                    .or_else(|| child(&self.node, SyntaxKind::REFERENCE_LINK_REF))
                {
                    Some(text) => text.text().to_string(),
                    None => self.text(),
                }
            }
            ElementKind::Autolink => child(&self.node, SyntaxKind::LINK_URL)
                .map(|url| url.text().to_string())
                .unwrap_or_default(),
            kind if kind.capabilities().contains(Capabilities::INLINE) => self.text(),
            _ => self.text().lines().next().unwrap_or_default().trim().to_string(),
        }
    }

    /// The normalised identifier this element declares, if it is a target.
    pub fn anchor_id(&self) -> Option<String> {
        self.declares().map(|(_, id)| id)
    }

    /// Namespace and normalised identifier this element declares. Documents
    /// are targets by page name, which lives outside the tree.
    pub fn declares(&self) -> Option<(Namespace, String)> {
        let declared = match self.kind {
            ElementKind::Heading => {
                let text = self.node.children().find(|n| n.kind() == SyntaxKind::HEADING_TEXT)?;
                let explicit = text
                    .descendants()
                    .any(|n| n.kind() == SyntaxKind::ATTRIBUTE_ID_VALUE);
                if explicit {
                    return None;
                }
                (Namespace::Anchor, normalize::heading_id(&heading_text(&self.node)))
            }
            ElementKind::ReferenceDefinition => {
                let id = child(&self.node, SyntaxKind::REFERENCE_IDENTIFIER).and_then(Element::cast)?;
                (Namespace::Definition, normalize::reference_label(&id.name()))
            }
            ElementKind::RefAnchor => {
                (Namespace::Anchor, normalize::anchor_id(&self.reference_identifier()?.name()))
            }
            ElementKind::AttributeIdValue => (Namespace::Anchor, normalize::anchor_id(&self.name())),
            _ => return None,
        };
        (!declared.1.is_empty()).then_some(declared)
    }

    /// What a reference element points at.
    pub fn target(&self) -> Option<Target> {
        let target = match self.kind {
            ElementKind::ReferenceIdentifier | ElementKind::ReferenceLinkRef => {
                Target::Definition(normalize::reference_label(&self.name()))
            }
            ElementKind::LinkUrl | ElementKind::ReferenceUrl => {
                let url = self.name();
                if is_external(&url) {
                    Target::External
                } else {
                    Target::Document(DocumentRef::Path(url))
                }
            }
            ElementKind::LinkAnchor => {
                let url = sibling(&self.node, &[SyntaxKind::LINK_URL, SyntaxKind::REFERENCE_URL])
                    .map(|url| url.text().to_string());
                match url {
                    Some(url) if is_external(&url) => Target::External,
                    url => Target::Anchor {
                        document: url.map(DocumentRef::Path),
                        id: normalize::anchor_id(&self.name()),
                    },
                }
            }
            ElementKind::WikiLinkRef => {
                Target::Document(DocumentRef::Page(normalize::page_name(&self.name())))
            }
            ElementKind::WikiLinkText => {
                let page = sibling(&self.node, &[SyntaxKind::WIKI_LINK_REF])
                    .map(|page| page.text().to_string())
                    .unwrap_or_else(|| self.name());
                Target::Document(DocumentRef::Page(normalize::page_name(&page)))
            }
            ElementKind::WikiLinkAnchor => Target::Anchor {
                document: sibling(&self.node, &[SyntaxKind::WIKI_LINK_REF])
                    .map(|page| DocumentRef::Page(normalize::page_name(&page.text().to_string()))),
                id: normalize::anchor_id(&self.name()),
            },
            ElementKind::RefAnchor | ElementKind::RefAnchorId | ElementKind::AttributeIdValue => {
                Target::Anchor {
                    document: None,
                    id: normalize::anchor_id(&self.reference_name()?),
                }
            }
            _ => return None,
        };
        Some(target)
    }
}

fn child(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.children().find(|n| n.kind() == kind)
}

fn sibling(node: &SyntaxNode, kinds: &[SyntaxKind]) -> Option<SyntaxNode> {
    node.parent()?
        .children()
        .find(|n| n != node && kinds.contains(&n.kind()))
}

/// Heading text without its attribute block, trimmed.
fn heading_text(heading: &SyntaxNode) -> String {
    let Some(text) = child(heading, SyntaxKind::HEADING_TEXT) else {
        return String::new();
    };
    let mut out = String::new();
    for token in text.descendants_with_tokens().filter_map(|e| e.into_token()) {
        let in_attributes = token
            .parent_ancestors()
            .any(|n| n.kind() == SyntaxKind::ATTRIBUTES);
        if !in_attributes {
            out.push_str(token.text());
        }
    }
    out.trim().to_string()
}

/// `scheme:...` destinations and bare e-mail addresses point outside the
/// workspace. A single-letter scheme is a Windows drive, not a scheme.
fn is_external(url: &str) -> bool {
    let has_scheme = url.split_once(':').is_some_and(|(scheme, _)| {
        scheme.len() > 1
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    has_scheme || (url.contains('@') && !url.contains('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_navigator_syntax::parse;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn element(text: &str, kind: SyntaxKind) -> Element {
        let tree = parse(text);
        let node = tree.descendants().find(|n| n.kind() == kind).unwrap();
        Element::cast(node).unwrap()
    }

    #[rstest]
    #[case(ElementKind::Paragraph, Capabilities::BLOCK)]
    #[case(ElementKind::Heading, Capabilities::BLOCK | Capabilities::ANCHOR_TARGET)]
    #[case(ElementKind::WikiLinkRef, Capabilities::INLINE | Capabilities::REFERENCE | Capabilities::RENAMEABLE)]
    #[case(ElementKind::AttributeIdValue, Capabilities::INLINE | Capabilities::REFERENCE | Capabilities::ANCHOR_TARGET | Capabilities::RENAMEABLE)]
    #[case(ElementKind::RefAnchor, Capabilities::INLINE | Capabilities::REFERENCE | Capabilities::ANCHOR_TARGET)]
    #[case(ElementKind::Link, Capabilities::INLINE)]
    fn capabilities_are_fixed_per_kind(#[case] kind: ElementKind, #[case] expected: Capabilities) {
        assert_eq!(kind.capabilities(), expected);
    }

    #[test]
    fn every_block_kind_is_block_and_inline_kind_inline() {
        let text = "# H {#h}\n\n> q\n\n- [x] item [[P|t]] [a][b] <a id=\"x\"></a>\n\n| a |\n|---|\n| [l](u#v) |\n\n```\nc\n```\n\n---\n\n[b]: u\n";
        let tree = parse(text);
        for element in tree.descendants().filter_map(Element::cast) {
            let caps = element.capabilities();
            assert_eq!(
                caps.contains(Capabilities::BLOCK),
                element.syntax_kind().is_block(),
                "{:?}",
                element.kind()
            );
            assert_eq!(
                caps.contains(Capabilities::INLINE),
                element.syntax_kind().is_inline(),
                "{:?}",
                element.kind()
            );
        }
    }

    #[rstest]
    #[case("[text][Foo Bar]\n", SyntaxKind::REFERENCE_LINK_REF, "[Foo Bar]", "Foo Bar")]
    #[case("[l](page.md#Sec)\n", SyntaxKind::LINK_ANCHOR, "#Sec", "Sec")]
    #[case("[[Page Two#Part|shown]]\n", SyntaxKind::WIKI_LINK_REF, "Page Two", "Page Two")]
    #[case("[[Page Two#Part|shown]]\n", SyntaxKind::WIKI_LINK_ANCHOR, "#Part", "Part")]
    #[case("[[Page Two#Part|shown]]\n", SyntaxKind::WIKI_LINK_TEXT, "shown", "shown")]
    #[case("<a id=\"here\"></a>\n", SyntaxKind::REF_ANCHOR, "#here", "here")]
    fn display_and_reference_names(
        #[case] text: &str,
        #[case] kind: SyntaxKind,
        #[case] display: &str,
        #[case] name: &str,
    ) {
        let element = element(text, kind);
        assert_eq!(element.display_name(), display);
        assert_eq!(element.reference_name().as_deref(), Some(name));
    }

    #[test]
    fn definition_display_name_is_bracketed_identifier() {
        let element = element("[Foo]: https://x\n", SyntaxKind::REFERENCE);
        assert_eq!(element.display_name(), "[Foo]");
        assert_eq!(element.anchor_id().as_deref(), Some("foo"));
        assert_eq!(element.declares().map(|(ns, _)| ns), Some(Namespace::Definition));
    }

    #[test]
    fn heading_declares_generated_id_unless_explicit() {
        let generated = element("## Getting Started!\n", SyntaxKind::HEADING);
        assert_eq!(generated.display_name(), "Getting Started!");
        assert_eq!(generated.anchor_id().as_deref(), Some("getting-started"));

        let explicit = element("## Getting Started {#start}\n", SyntaxKind::HEADING);
        assert_eq!(explicit.display_name(), "Getting Started");
        assert_eq!(explicit.anchor_id(), None);

        let attribute = element("## Getting Started {#start}\n", SyntaxKind::ATTRIBUTE_ID_VALUE);
        assert_eq!(attribute.anchor_id().as_deref(), Some("start"));
    }

    #[test]
    fn ref_anchor_identifier_is_nested_element() {
        let anchor = element("<a name=\"Old Name\">\n", SyntaxKind::REF_ANCHOR);
        let id = anchor.reference_identifier().unwrap();
        assert_eq!(id.kind(), ElementKind::RefAnchorId);
        assert_eq!(id.text(), "Old Name");
        assert_eq!(anchor.anchor_id().as_deref(), Some("old-name"));
        assert_eq!(
            anchor.target(),
            id.target(),
            "anchor and its identifier resolve alike"
        );
    }

    #[rstest]
    #[case("[x](https://example.com#frag)\n", SyntaxKind::LINK_URL, Target::External)]
    #[case("[x](https://example.com#frag)\n", SyntaxKind::LINK_ANCHOR, Target::External)]
    #[case("<me@example.com>\n", SyntaxKind::LINK_URL, Target::External)]
    #[case("[x](other.md)\n", SyntaxKind::LINK_URL, Target::Document(DocumentRef::Path("other.md".into())))]
    #[case("[x](#Local Part)\n", SyntaxKind::LINK_ANCHOR, Target::Anchor { document: None, id: "local".into() })]
    #[case("[x](other.md#Sec)\n", SyntaxKind::LINK_ANCHOR, Target::Anchor { document: Some(DocumentRef::Path("other.md".into())), id: "sec".into() })]
    #[case("[[Page-Two]]\n", SyntaxKind::WIKI_LINK_REF, Target::Document(DocumentRef::Page("page-two".into())))]
    #[case("[[#top]]\n", SyntaxKind::WIKI_LINK_ANCHOR, Target::Anchor { document: None, id: "top".into() })]
    #[case("[a][ B  C ]\n", SyntaxKind::REFERENCE_LINK_REF, Target::Definition("b c".into()))]
    #[case("{#Intro}\n", SyntaxKind::ATTRIBUTE_ID_VALUE, Target::Anchor { document: None, id: "intro".into() })]
    fn reference_targets(#[case] text: &str, #[case] kind: SyntaxKind, #[case] expected: Target) {
        assert_eq!(element(text, kind).target(), Some(expected));
    }

    #[test]
    fn at_offset_finds_innermost_reference() {
        let tree = parse("See [[Page#Part]] now\n");
        let element = Element::at_offset(&tree, 12.into(), Capabilities::REFERENCE).unwrap();
        assert_eq!(element.kind(), ElementKind::WikiLinkAnchor);

        let outer = Element::at_offset(&tree, 1.into(), Capabilities::BLOCK).unwrap();
        assert_eq!(outer.kind(), ElementKind::Paragraph);
    }

    #[test]
    fn name_range_excludes_delimiters() {
        let reference = element("[t][label]\n", SyntaxKind::REFERENCE_LINK_REF);
        assert_eq!(reference.name_range(), TextRange::new(1.into(), 6.into()));

        let anchor = element("[t](#x)\n", SyntaxKind::LINK_ANCHOR);
        assert_eq!(anchor.name_range(), TextRange::new(1.into(), 2.into()));
    }

    #[test]
    fn icon_keys() {
        assert_eq!(ElementKind::WikiLinkRef.icon_key().as_str(), "wiki-link");
        assert_eq!(ElementKind::RefAnchor.icon_key(), IconKey::Anchor);
    }
}
