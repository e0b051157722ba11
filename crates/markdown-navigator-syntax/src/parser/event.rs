//! # Parser Events
//!
//! The grammar never touches Rowan directly. It records a flat list of events
//! and the [`Sink`](super::sink::Sink) replays them into a green tree:
//!
//! ```text
//! Start(WIKI_LINK)
//!   Token(LBRACKET)
//!   Token(LBRACKET)
//!   Start(WIKI_LINK_REF)
//!     Token(TEXT)
//!   Finish
//!   Token(RBRACKET)
//!   Token(RBRACKET)
//! Finish
//! ```
//!
//! Because the list is flat, a grammar rule can decide late what kind a node
//! has (a paragraph line turns into setext heading text once its underline
//! is seen) without rebuilding anything.

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Open a node.
    Start { kind: SyntaxKind },

    /// Attach the next lexer token to the open node, relabelled as `kind`.
    Token { kind: SyntaxKind },

    /// Close the innermost open node.
    Finish,

    /// Reserved slot for a node whose kind is not known yet. Abandoned
    /// markers leave these behind and the sink skips them.
    Placeholder,
}

impl Event {
    pub fn start(kind: SyntaxKind) -> Self {
        Event::Start { kind }
    }

    pub fn token(kind: SyntaxKind) -> Self {
        Event::Token { kind }
    }
}
