//! # Lexer - Tokenizing Markdown Source
//!
//! This module provides the first stage of parsing: breaking source text into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! The most important property of this lexer is that **every byte in the input
//! appears in exactly one token**. We never skip or discard characters. This
//! is what makes round-tripping possible:
//!
//! ```
//! use markdown_navigator_syntax::lexer::lex;
//!
//! let input = "See [[Page Two]] and [ref][1].\n";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Laziness
//!
//! [`tokenize`] returns an iterator that lexes on demand. It holds no state
//! beyond its position in the input, so calling it again on the same text
//! starts a fresh, identical stream. [`lex`] collects the stream for the
//! parser, which needs random-access lookahead.
//!
//! ## Token Design
//!
//! Tokens are kept **minimal and context-free**. The lexer doesn't know whether
//! `[` opens a wiki link, a reference link or a task marker, or whether `#`
//! starts a heading or an anchor. Nesting and meaning are the parser's job.
//!
//! Every punctuation character with syntactic meaning in the dialect gets its
//! own single-character token. Everything else becomes `TEXT`, grouped into
//! runs ("Hello" is one TEXT token, not five). Input Logos cannot match (a
//! lone carriage return) is also reported as `TEXT`.

use std::ops::Range;

use logos::Logos;

use crate::syntax_kind::SyntaxKind;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`SyntaxKind`] because Logos needs to
/// derive on it. Each variant maps to a corresponding `SyntaxKind` token.
///
/// The `#[logos(skip r"")]` attribute means "skip nothing" - we explicitly
/// handle all input rather than letting Logos skip anything.
///
/// [`SyntaxKind`]: crate::syntax_kind::SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"")]
pub enum TokenKind {
    #[regex(r"[ \t]+")]
    Whitespace,

    /// LF or CRLF
    #[regex(r"\r?\n")]
    Newline,

    #[token("#")]
    Hash,

    #[token(">")]
    Gt,

    #[token("<")]
    Lt,

    #[token("-")]
    Dash,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("_")]
    Underscore,

    #[token("`")]
    Backtick,

    #[token("~")]
    Tilde,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("|")]
    Pipe,

    #[token("!")]
    Bang,

    #[token(":")]
    Colon,

    #[token("=")]
    Eq,

    #[token("\"")]
    Quote,

    /// Anything not matched by the rules above
    #[regex(r#"[^ \t\r\n\[\]()<>{}`*+#|~!:="_-]+"#)]
    Text,
}

impl TokenKind {
    /// Convert to SyntaxKind.
    pub fn to_syntax_kind(self) -> SyntaxKind {
        match self {
            TokenKind::Whitespace => SyntaxKind::WHITESPACE,
            TokenKind::Newline => SyntaxKind::NEWLINE,
            TokenKind::Hash => SyntaxKind::HASH,
            TokenKind::Gt => SyntaxKind::GT,
            TokenKind::Lt => SyntaxKind::LT,
            TokenKind::Dash => SyntaxKind::DASH,
            TokenKind::Star => SyntaxKind::STAR,
            TokenKind::Plus => SyntaxKind::PLUS,
            TokenKind::Underscore => SyntaxKind::UNDERSCORE,
            TokenKind::Backtick => SyntaxKind::BACKTICK,
            TokenKind::Tilde => SyntaxKind::TILDE,
            TokenKind::LBracket => SyntaxKind::LBRACKET,
            TokenKind::RBracket => SyntaxKind::RBRACKET,
            TokenKind::LParen => SyntaxKind::LPAREN,
            TokenKind::RParen => SyntaxKind::RPAREN,
            TokenKind::LBrace => SyntaxKind::LBRACE,
            TokenKind::RBrace => SyntaxKind::RBRACE,
            TokenKind::Pipe => SyntaxKind::PIPE,
            TokenKind::Bang => SyntaxKind::BANG,
            TokenKind::Colon => SyntaxKind::COLON,
            TokenKind::Eq => SyntaxKind::EQ,
            TokenKind::Quote => SyntaxKind::QUOTE,
            TokenKind::Text => SyntaxKind::TEXT,
        }
    }
}

/// A lexed token: its kind, the text it covers and where that text starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    /// Byte offset of `text` in the input
    pub offset: usize,
}

impl Token<'_> {
    /// Length of the token in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte range of the token in the input.
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.len()
    }
}

/// Lazy token stream over an input string.
pub struct Tokens<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.inner.next()?;
        let kind = match result {
            Ok(token_kind) => token_kind.to_syntax_kind(),
            // Logos error means unrecognized character - treat as TEXT
            Err(()) => SyntaxKind::TEXT,
        };
        Some(Token {
            kind,
            text: self.inner.slice(),
            offset: self.inner.span().start,
        })
    }
}

/// Start a lazy token stream over `input`.
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens {
        inner: TokenKind::lexer(input),
    }
}

/// Lex the whole input into a vector of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    tokenize(input).collect()
}
