//! # markdown-navigator-syntax
//!
//! A lossless syntax tree for a Flexmark-style Markdown dialect using [Rowan]
//! + [Logos], following the [rust-analyzer] architecture model.
//!
//! [Rowan]: https://docs.rs/rowan
//! [Logos]: https://docs.rs/logos
//! [rust-analyzer]: https://rust-analyzer.github.io/book/contributing/syntax.html
//!
//! ## What is a Lossless CST?
//!
//! Unlike an Abstract Syntax Tree (AST) which discards formatting details, a
//! Concrete Syntax Tree (CST) preserves **every byte** of the original source.
//! Every node knows its exact text range, which is what the navigator needs:
//! a rename rewrites the bytes of one reference node and leaves the rest of
//! the document untouched.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Parser → Events → Sink → Rowan Tree
//!               (Logos)          (Grammar)        (GreenNodeBuilder)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! ```text
//! "# Hello\n" → [HASH, WHITESPACE, TEXT("Hello"), NEWLINE]
//! ```
//!
//! ### 2. Parser ([`parser`] module)
//!
//! The grammar emits events and uses a marker system to build nested
//! structure. Which extensions it recognises (wiki links, tables, anchors,
//! attributes...) is decided by [`ParserOptions`].
//!
//! ### 3. Sink ([`parser::sink`] module)
//!
//! Replays the events into an immutable green tree. Green trees are
//! `Send + Sync`, so a parsed document can be shared across threads.
//!
//! ## Module Structure
//!
//! ```text
//! markdown-navigator-syntax/
//! ├── lib.rs           # This file - public API and tree tests
//! ├── syntax_kind.rs   # SyntaxKind enum (tokens + nodes) and Rowan integration
//! ├── lexer.rs         # Logos-based tokenizer
//! └── parser/
//!     ├── mod.rs       # Parser struct, Marker system, parse functions
//!     ├── event.rs     # Event enum (Start, Token, Finish, Placeholder)
//!     ├── sink.rs      # Converts events to Rowan GreenNode
//!     └── grammar/
//!         ├── mod.rs   # Root document parsing
//!         ├── block.rs # Headings, lists, tables, fences, definitions
//!         └── inline.rs# Links, wiki links, anchors, attributes, emphasis
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use markdown_navigator_syntax::{parse, SyntaxKind};
//!
//! let tree = parse("# Hello {#greeting}\n");
//!
//! assert_eq!(tree.text().to_string(), "# Hello {#greeting}\n");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//! let heading = tree.children().next().unwrap();
//! assert_eq!(heading.kind(), SyntaxKind::HEADING);
//! ```

pub mod lexer;
pub mod parser;
pub mod syntax_kind;

pub use markdown_navigator_config::ParserOptions;
pub use parser::{Parse, parse, parse_tokens, parse_with};
pub use syntax_kind::{MarkdownLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
