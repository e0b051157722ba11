use std::fmt;

/// Presentation hint for an element. A UI maps each key to an actual image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconKey {
    Document,
    Heading,
    Paragraph,
    BlockQuote,
    List,
    ListItem,
    Code,
    Table,
    Rule,
    ReferenceDefinition,
    Reference,
    Link,
    Image,
    WikiLink,
    Anchor,
    Attribute,
    Text,
}

impl IconKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IconKey::Document => "document",
            IconKey::Heading => "heading",
            IconKey::Paragraph => "paragraph",
            IconKey::BlockQuote => "block-quote",
            IconKey::List => "list",
            IconKey::ListItem => "list-item",
            IconKey::Code => "code",
            IconKey::Table => "table",
            IconKey::Rule => "rule",
            IconKey::ReferenceDefinition => "reference-definition",
            IconKey::Reference => "reference",
            IconKey::Link => "link",
            IconKey::Image => "image",
            IconKey::WikiLink => "wiki-link",
            IconKey::Anchor => "anchor",
            IconKey::Attribute => "attribute",
            IconKey::Text => "text",
        }
    }
}

impl fmt::Display for IconKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
