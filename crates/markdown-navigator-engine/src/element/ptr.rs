use markdown_navigator_syntax::{SyntaxKind, SyntaxNode};
use rowan::{NodeOrToken, TextRange};

/// A thread-safe handle to a node: its kind and range.
///
/// Red nodes are tied to the thread that built them, so anything stored in a
/// shared table or handed back from a resolve keeps a `NodePtr` and
/// re-materialises the node from a root with [`NodePtr::to_node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodePtr {
    range: TextRange,
    kind: SyntaxKind,
}

impl NodePtr {
    pub fn new(node: &SyntaxNode) -> Self {
        Self {
            range: node.text_range(),
            kind: node.kind(),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    /// Find the node this pointer was taken from in a tree of the same text.
    pub fn to_node(&self, root: &SyntaxNode) -> Option<SyntaxNode> {
        if root.kind() == self.kind && root.text_range() == self.range {
            return Some(root.clone());
        }
        if !root.text_range().contains_range(self.range) {
            return None;
        }

        let start = match root.covering_element(self.range) {
            NodeOrToken::Node(node) => node,
            NodeOrToken::Token(token) => token.parent()?,
        };
        start
            .ancestors()
            .find(|node| node.kind() == self.kind && node.text_range() == self.range)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markdown_navigator_syntax::parse;

    #[test]
    fn round_trips_through_a_fresh_root() {
        let text = "# Title\n\nSee [[Page]].\n";
        let tree = parse(text);
        let wiki = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::WIKI_LINK_REF)
            .unwrap();
        let ptr = NodePtr::new(&wiki);

        let other_root = parse(text);
        let found = ptr.to_node(&other_root).unwrap();
        assert_eq!(found.kind(), SyntaxKind::WIKI_LINK_REF);
        assert_eq!(found.text().to_string(), "Page");
    }

    #[test]
    fn finds_outer_node_sharing_a_range() {
        let tree = parse("[[Page]]");
        let link = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::WIKI_LINK)
            .unwrap();
        let paragraph = link.parent().unwrap();
        assert_eq!(paragraph.text_range(), link.text_range());

        let found = NodePtr::new(&paragraph).to_node(&tree).unwrap();
        assert_eq!(found.kind(), SyntaxKind::PARAGRAPH);
    }

    #[test]
    fn missing_node_is_none() {
        let tree = parse("plain\n");
        let ptr = NodePtr {
            range: TextRange::new(0.into(), 5.into()),
            kind: SyntaxKind::HEADING,
        };
        assert!(ptr.to_node(&tree).is_none());
    }
}
