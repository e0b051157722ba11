//! # Parser - Event-Based Tree Construction
//!
//! This module turns the token stream into a syntax tree using the
//! **event-based** architecture from rust-analyzer.
//!
//! The grammar emits a flat list of [`Event`]s instead of building nodes, and
//! the [`Sink`] replays them into a Rowan green tree. This keeps the grammar
//! free of Rowan details and lets a rule look far ahead (a wiki link is only a
//! wiki link once its `]]` has been seen) before it commits to any structure.
//!
//! ## The Marker System
//!
//! `parser.start()` returns a [`Marker`]. It **must** be either completed with
//! `marker.complete(parser, KIND)` or dropped with `marker.abandon(parser)`;
//! dropping it any other way panics, which catches unbalanced trees early.
//!
//! ```ignore
//! let m = p.start();
//! p.bump();
//! m.complete(p, SyntaxKind::PARAGRAPH);
//! ```
//!
//! ## Dialect Options
//!
//! Grammar rules consult the [`ParserOptions`] the parser was created with.
//! A disabled extension is simply never recognised: its characters stay plain
//! text tokens inside the surrounding block.
//!
//! ## Public API
//!
//! ```
//! use markdown_navigator_syntax::{parse, parse_with, ParserOptions, SyntaxKind};
//!
//! let tree = parse("# Hello\n");
//! assert_eq!(tree.kind(), SyntaxKind::ROOT);
//!
//! let parsed = parse_with("[[Page]]\n", &ParserOptions::commonmark());
//! assert_eq!(parsed.syntax().text().to_string(), "[[Page]]\n");
//! ```

pub mod event;
pub mod sink;

mod grammar;

use markdown_navigator_config::ParserOptions;
use rowan::GreenNode;

use crate::lexer::{Token, lex};
use crate::syntax_kind::{SyntaxKind, SyntaxNode};
use event::Event;
use sink::Sink;

/// The parser state machine.
///
/// Holds the token stream, current position, and accumulated events.
/// Grammar functions receive `&mut Parser` and use its methods to:
///
/// - Inspect tokens: `current()`, `nth()`, `at()`, `at_end()`
/// - Consume tokens: `bump()`, `eat()`
/// - Build structure: `start()` → `Marker` → `complete()`/`abandon()`
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    pos: usize,
    events: Vec<Event>,
    options: ParserOptions,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], options: ParserOptions) -> Self {
        Self {
            tokens,
            pos: 0,
            events: Vec::new(),
            options,
        }
    }

    /// Run the grammar and build the green tree.
    pub fn parse(mut self) -> Parse {
        grammar::root(&mut self);
        let green = Sink::new(self.tokens, self.events).finish();
        Parse { green }
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Start a new node and return a marker.
    pub fn start(&mut self) -> Marker {
        let pos = self.events.len();
        self.events.push(Event::Placeholder);
        Marker {
            pos,
            completed: false,
        }
    }

    /// Current token kind, or EOF if past end.
    pub fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    /// Look ahead n tokens.
    pub fn nth(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::EOF)
    }

    /// Text of the token n ahead, empty past the end.
    pub fn nth_text(&self, n: usize) -> &'input str {
        self.tokens.get(self.pos + n).map(|t| t.text).unwrap_or("")
    }

    /// Kind of the token just consumed, or NEWLINE at the start of input.
    pub fn prev(&self) -> SyntaxKind {
        match self.pos.checked_sub(1) {
            Some(idx) => self.tokens[idx].kind,
            None => SyntaxKind::NEWLINE,
        }
    }

    /// Index of the current token.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Check if at end of input.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Check if current token is of given kind.
    pub fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    /// Number of tokens from `from` (relative) up to the next NEWLINE or EOF.
    pub fn line_len_from(&self, from: usize) -> usize {
        let mut n = from;
        while !matches!(self.nth(n), SyntaxKind::NEWLINE | SyntaxKind::EOF) {
            n += 1;
        }
        n - from
    }

    /// Number of tokens left on the current line.
    pub fn line_len(&self) -> usize {
        self.line_len_from(0)
    }

    /// Consume the current token if it matches.
    pub fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume the current token unconditionally.
    pub fn bump(&mut self) {
        if !self.at_end() {
            let kind = self.current();
            self.bump_as(kind);
        }
    }

    /// Consume the current token, relabelling it.
    pub fn bump_as(&mut self, kind: SyntaxKind) {
        if !self.at_end() {
            self.events.push(Event::token(kind));
            self.pos += 1;
        }
    }

    /// Consume n tokens as they are.
    pub fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Consume tokens until the absolute position `end`.
    pub fn bump_to(&mut self, end: usize) {
        while self.pos < end && !self.at_end() {
            self.bump();
        }
    }

    /// Wrap the next `n` tokens in a node of `kind`. Nothing is emitted for
    /// `n == 0`.
    pub fn wrap(&mut self, n: usize, kind: SyntaxKind) {
        if n == 0 {
            return;
        }
        let m = self.start();
        self.bump_n(n);
        m.complete(self, kind);
    }
}

/// A marker for a node being constructed.
///
/// `start()` pushes a `Placeholder` event and hands back a `Marker` pointing
/// at it. Completing the marker turns the placeholder into a `Start` and
/// pushes the matching `Finish`.
#[must_use = "Markers must be completed or abandoned, dropping them is a bug"]
pub struct Marker {
    /// Position in the events vector where our Placeholder lives
    pos: usize,
    /// Tracks whether complete() or abandon() was called
    completed: bool,
}

impl Marker {
    /// Complete this marker, creating a node of the given kind.
    pub fn complete(mut self, p: &mut Parser<'_, '_>, kind: SyntaxKind) {
        self.completed = true;
        let event_at_pos = &mut p.events[self.pos];
        assert!(matches!(event_at_pos, Event::Placeholder));
        *event_at_pos = Event::start(kind);
        p.events.push(Event::Finish);
    }

    /// Abandon this marker without creating a node.
    ///
    /// The placeholder is removed if nothing was pushed after it; otherwise it
    /// stays behind inert and the sink ignores it.
    pub fn abandon(mut self, p: &mut Parser<'_, '_>) {
        self.completed = true;
        if self.pos == p.events.len() - 1 {
            match p.events.pop() {
                Some(Event::Placeholder) => {}
                _ => unreachable!(),
            }
        }
    }
}

impl Drop for Marker {
    fn drop(&mut self) {
        if !self.completed && !std::thread::panicking() {
            panic!("Marker must be either completed or abandoned");
        }
    }
}

/// Result of a parse: an immutable green tree.
///
/// Green nodes are `Send + Sync` and cheap to clone, so a `Parse` can be
/// shared between threads and turned into a red tree wherever it is read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parse {
    green: GreenNode,
}

impl Parse {
    pub fn green(&self) -> &GreenNode {
        &self.green
    }

    pub fn into_green(self) -> GreenNode {
        self.green
    }

    /// A fresh red root over the green tree.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }
}

/// Parse an already lexed token stream.
pub fn parse_tokens(tokens: &[Token<'_>], options: &ParserOptions) -> Parse {
    Parser::new(tokens, *options).parse()
}

/// Parse markdown source with the given dialect options.
pub fn parse_with(source: &str, options: &ParserOptions) -> Parse {
    let tokens = lex(source);
    let parse = parse_tokens(&tokens, options);
    log::trace!("parsed {} bytes into {} tokens", source.len(), tokens.len());
    parse
}

/// Parse markdown source with the default dialect.
pub fn parse(source: &str) -> SyntaxNode {
    parse_with(source, &ParserOptions::default()).syntax()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_empty_input() {
        let tree = parse("");
        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        assert_eq!(tree.children().count(), 0);
    }

    #[test]
    fn parse_preserves_all_text() {
        let input = "Hello, world!";
        assert_eq!(parse(input).text(), input);
    }

    #[test]
    fn parse_is_deterministic() {
        let input = "# A {#a}\n\n[x][1] [[y]]\n\n[1]: z\n";
        let options = ParserOptions::default();
        assert_eq!(parse_with(input, &options), parse_with(input, &options));
    }

    #[test]
    fn wrap_with_zero_tokens_emits_nothing() {
        let tokens = lex("a");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        parser.wrap(0, SyntaxKind::LINK_TEXT);
        assert!(parser.events.is_empty());
    }

    #[test]
    fn line_len_stops_at_newline() {
        let tokens = lex("a b\nc");
        let parser = Parser::new(&tokens, ParserOptions::default());
        assert_eq!(parser.line_len(), 3);
        assert_eq!(parser.line_len_from(4), 1);
    }

    #[test]
    fn marker_must_be_completed() {
        let result = std::panic::catch_unwind(|| {
            let tokens = lex("test");
            let mut parser = Parser::new(&tokens, ParserOptions::default());
            let _marker = parser.start();
        });
        assert!(result.is_err());
    }

    #[test]
    fn marker_can_be_abandoned() {
        let tokens = lex("test");
        let mut parser = Parser::new(&tokens, ParserOptions::default());
        let marker = parser.start();
        marker.abandon(&mut parser);
        assert!(parser.events.is_empty());
    }
}
