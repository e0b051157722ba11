//! Sink for converting parser events into a Rowan green tree.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::lexer::Token;
use crate::parser::event::Event;
use crate::syntax_kind::SyntaxKind;

/// Replays parser events over the token stream.
pub struct Sink<'t, 'input> {
    builder: GreenNodeBuilder<'static>,
    tokens: &'t [Token<'input>],
    cursor: usize,
    events: Vec<Event>,
}

impl<'t, 'input> Sink<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>], events: Vec<Event>) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            tokens,
            cursor: 0,
            events,
        }
    }

    /// Consume the sink and build the green tree.
    pub fn finish(mut self) -> GreenNode {
        for event in std::mem::take(&mut self.events) {
            match event {
                Event::Start { kind } => self.builder.start_node(kind.into()),
                Event::Token { kind } => self.token(kind),
                Event::Finish => self.builder.finish_node(),
                Event::Placeholder => {}
            }
        }

        self.builder.finish()
    }

    fn token(&mut self, kind: SyntaxKind) {
        let token = &self.tokens[self.cursor];
        self.cursor += 1;
        self.builder.token(kind.into(), token.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;
    use crate::syntax_kind::SyntaxNode;
    use pretty_assertions::assert_eq;

    #[test]
    fn sink_builds_nested_nodes() {
        let tokens = lex("[x]");
        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::start(SyntaxKind::REFERENCE_LINK),
            Event::start(SyntaxKind::REFERENCE_LINK_REF),
            Event::token(SyntaxKind::LBRACKET),
            Event::token(SyntaxKind::TEXT),
            Event::token(SyntaxKind::RBRACKET),
            Event::Finish,
            Event::Finish,
            Event::Finish,
        ];

        let tree = SyntaxNode::new_root(Sink::new(&tokens, events).finish());

        assert_eq!(tree.kind(), SyntaxKind::ROOT);
        let link = tree.first_child().unwrap();
        assert_eq!(link.kind(), SyntaxKind::REFERENCE_LINK);
        assert_eq!(
            link.first_child().unwrap().kind(),
            SyntaxKind::REFERENCE_LINK_REF
        );
        assert_eq!(tree.text().to_string(), "[x]");
    }

    #[test]
    fn abandoned_placeholders_are_skipped() {
        let tokens = lex("a");
        let events = vec![
            Event::start(SyntaxKind::ROOT),
            Event::Placeholder,
            Event::token(SyntaxKind::TEXT),
            Event::Finish,
        ];

        let tree = SyntaxNode::new_root(Sink::new(&tokens, events).finish());
        assert_eq!(tree.children().count(), 0);
        assert_eq!(tree.text().to_string(), "a");
    }
}
