//! # Grammar Rules
//!
//! Each rule takes a `&mut Parser` and uses its methods to inspect tokens
//! (`p.current()`, `p.at()`, `p.nth()`), consume them (`p.bump()`,
//! `p.eat()`), and build structure (`p.start()` → marker →
//! `complete()`/`abandon()`).
//!
//! ## Two Passes in One Walk
//!
//! - [`block`] decides, at each line start, which block construct begins
//!   there. Precedence is fixed: fenced code, table, thematic break, list,
//!   heading, block quote, reference definition, paragraph.
//! - [`inline`] is called by the block rules for every line of text they
//!   own and recognises links, wiki links, anchors, attributes and emphasis.
//!
//! ## Recognise, Then Build
//!
//! Every construct is first matched with pure lookahead (`p.nth()`), which
//! yields its exact token extent. Only a complete match emits events, so an
//! unclosed `[[` or a stray `{` never produces a half-built node: the tokens
//! are bumped as plain text into the enclosing block.
//!
//! ## Progress
//!
//! Every rule consumes at least one token when called away from the end of
//! input, so the loops below always terminate and every byte of the input
//! lands in exactly one token of the tree.

mod block;
mod inline;

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse the root document.
pub fn root(p: &mut Parser<'_, '_>) {
    let m = p.start();

    while !p.at_end() {
        block::block(p);
    }

    m.complete(p, SyntaxKind::ROOT);
}

/// Column width of a run of spaces and tabs.
fn indent_width(text: &str) -> usize {
    text.chars()
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}
