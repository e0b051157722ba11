//! SyntaxKind enum for all tokens and nodes in the Markdown CST.
//!
//! Following the rust-analyzer model, all tokens and nodes share a single enum.
//! Every byte in the source must appear as a token in the tree.

/// All syntax kinds for the Markdown CST.
///
/// This enum represents both tokens (lexer output) and composite nodes (parser output).
/// The `repr(u16)` ensures efficient storage in rowan's green tree.
///
/// We use SCREAMING_CASE following the rust-analyzer convention for SyntaxKind.
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // === Tokens (lexer output) ===
    /// Horizontal whitespace (spaces, tabs)
    WHITESPACE,
    /// Line ending
    NEWLINE,
    /// Plain text content
    TEXT,
    /// `#` for headings, anchors and attribute ids
    HASH,
    /// `>` for blockquotes and closing HTML tags
    GT,
    /// `<` for autolinks and HTML anchors
    LT,
    /// `-` for lists, thematic breaks and table delimiter rows
    DASH,
    /// `*` for lists, emphasis, and thematic breaks
    STAR,
    /// `+` for lists
    PLUS,
    /// `_` for emphasis
    UNDERSCORE,
    /// Single backtick for code spans and fences
    BACKTICK,
    /// `~` for fenced code and strikethrough
    TILDE,
    /// `[` for links, references and wiki links
    LBRACKET,
    /// `]` for links, references and wiki links
    RBRACKET,
    /// `(` for link destinations
    LPAREN,
    /// `)` for link destinations
    RPAREN,
    /// `{` opening an attribute block
    LBRACE,
    /// `}` closing an attribute block
    RBRACE,
    /// `|` for wiki link text and tables
    PIPE,
    /// `!` introducing an image
    BANG,
    /// `:` after a reference label and in table delimiter rows
    COLON,
    /// `=` in attribute assignments
    EQ,
    /// `"` around titles and attribute values
    QUOTE,
    /// End of file marker
    EOF,

    // === Block nodes ===
    /// Root document node
    ROOT,
    /// Paragraph block
    PARAGRAPH,
    /// ATX heading (`# ...`)
    HEADING,
    /// Heading content after the `#` markers
    HEADING_TEXT,
    /// Blockquote container (`> ...`)
    BLOCK_QUOTE,
    /// List container (ordered or unordered)
    LIST,
    /// Individual list item
    LIST_ITEM,
    /// `[ ]` or `[x]` at the start of a list item
    TASK_MARKER,
    /// Thematic break (`---`, `***`, etc.)
    THEMATIC_BREAK,
    /// Fenced code block
    FENCED_CODE,
    /// Pipe table
    TABLE,
    /// First table row
    TABLE_HEADER,
    /// `|---|:--:|` delimiter row
    TABLE_SEPARATOR,
    /// Table body row
    TABLE_ROW,
    /// Single table cell
    TABLE_CELL,
    /// Reference definition `[label]: url "title"`
    REFERENCE,
    /// `[label]` of a reference definition, brackets included
    REFERENCE_IDENTIFIER,
    /// Destination of a reference definition
    REFERENCE_URL,
    /// Quoted title of a reference definition
    REFERENCE_TITLE,

    // === Inline nodes ===
    /// Inline link `[text](url)`
    LINK,
    /// Text of a link or reference link
    LINK_TEXT,
    /// Path part of a link destination
    LINK_URL,
    /// `#anchor` part of a destination, `#` included
    LINK_ANCHOR,
    /// Quoted title of a link
    LINK_TITLE,
    /// Reference link `[text][ref]`, `[ref][]` or `[ref]`
    REFERENCE_LINK,
    /// `[ref]` of a reference link, brackets included
    REFERENCE_LINK_REF,
    /// Image `![alt](url)`
    IMAGE,
    /// Autolink `<https://...>`
    AUTOLINK,
    /// Wiki link `[[page#anchor|text]]`
    WIKI_LINK,
    /// Page part of a wiki link
    WIKI_LINK_REF,
    /// `#anchor` part of a wiki link, `#` included
    WIKI_LINK_ANCHOR,
    /// Display text of a wiki link
    WIKI_LINK_TEXT,
    /// Attribute block `{#id .class key=value}`
    ATTRIBUTES,
    /// One attribute inside an attribute block
    ATTRIBUTE,
    /// Value of an `id` attribute
    ATTRIBUTE_ID_VALUE,
    /// HTML anchor `<a id="name"></a>`
    REF_ANCHOR,
    /// The id of an HTML anchor
    REF_ANCHOR_ID,
    /// Inline code span
    CODE_SPAN,
    /// Emphasis `*text*`
    EMPHASIS,
    /// Strong emphasis `**text**`
    STRONG,
    /// Strikethrough `~~text~~`
    STRIKETHROUGH,

    /// Error recovery node
    ERROR,
}

impl SyntaxKind {
    /// Returns true if this kind represents a token (lexer output).
    pub fn is_token(self) -> bool {
        (self as u16) <= (Self::EOF as u16)
    }

    /// Returns true if this kind represents a composite node.
    pub fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Returns true if this kind is trivia (whitespace/newlines).
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::NEWLINE)
    }

    /// Returns true for nodes produced by the block pass.
    pub fn is_block(self) -> bool {
        (Self::ROOT as u16..=Self::REFERENCE_TITLE as u16).contains(&(self as u16))
    }

    /// Returns true for nodes produced by the inline pass.
    pub fn is_inline(self) -> bool {
        (Self::LINK as u16..=Self::STRIKETHROUGH as u16).contains(&(self as u16))
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

/// Language definition for rowan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLang {}

impl rowan::Language for MarkdownLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::ERROR as u16);
        // SAFETY: We check bounds above and SyntaxKind is repr(u16)
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type alias for our syntax nodes.
pub type SyntaxNode = rowan::SyntaxNode<MarkdownLang>;
/// Type alias for our syntax tokens.
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLang>;
/// Type alias for syntax elements (node or token).
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLang>;

#[cfg(test)]
mod tests {
    use super::*;
    use rowan::Language;

    #[test]
    fn token_kinds_are_tokens() {
        assert!(SyntaxKind::WHITESPACE.is_token());
        assert!(SyntaxKind::QUOTE.is_token());
        assert!(SyntaxKind::EOF.is_token());
    }

    #[test]
    fn node_kinds_are_nodes() {
        assert!(SyntaxKind::ROOT.is_node());
        assert!(SyntaxKind::WIKI_LINK_TEXT.is_node());
        assert!(SyntaxKind::ERROR.is_node());
    }

    #[test]
    fn block_and_inline_partition_nodes() {
        assert!(SyntaxKind::TABLE_CELL.is_block());
        assert!(SyntaxKind::REFERENCE_IDENTIFIER.is_block());
        assert!(!SyntaxKind::REFERENCE_IDENTIFIER.is_inline());
        assert!(SyntaxKind::REFERENCE_LINK_REF.is_inline());
        assert!(SyntaxKind::REF_ANCHOR_ID.is_inline());
        assert!(!SyntaxKind::TEXT.is_block());
        assert!(!SyntaxKind::ERROR.is_inline());
    }

    #[test]
    fn trivia_detection() {
        assert!(SyntaxKind::WHITESPACE.is_trivia());
        assert!(SyntaxKind::NEWLINE.is_trivia());
        assert!(!SyntaxKind::TEXT.is_trivia());
    }

    #[test]
    fn rowan_conversion_roundtrip() {
        for kind in [
            SyntaxKind::WHITESPACE,
            SyntaxKind::PARAGRAPH,
            SyntaxKind::ATTRIBUTE_ID_VALUE,
            SyntaxKind::ERROR,
        ] {
            let raw: rowan::SyntaxKind = kind.into();
            assert_eq!(MarkdownLang::kind_from_raw(raw), kind);
        }
    }
}
