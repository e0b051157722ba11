//! Block-level grammar rules.
//!
//! Block predicates take a token offset `off` pointing at the start of a
//! line, so the same checks serve both the current line and lines further
//! ahead (list items separated by blank lines, paragraph interruptions).

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

use super::{indent_width, inline};

/// Indentation up to which a line still starts a top-level block.
const MAX_BLOCK_INDENT: usize = 3;

/// Parse a block element.
pub(super) fn block(p: &mut Parser<'_, '_>) {
    if blank_line_len(p, 0).is_some() {
        p.eat(SyntaxKind::WHITESPACE);
        p.eat(SyntaxKind::NEWLINE);
        return;
    }

    let lead = lead_at(p, 0);

    if let Some((fence, len)) = fence_at(p, lead) {
        fenced_code(p, fence, len);
    } else if p.options().tables && is_table(p) {
        table(p);
    } else if is_thematic_break(p, 0) {
        thematic_break(p);
    } else if let Some(marker) = list_marker_at(p, 0)
        && marker.indent <= MAX_BLOCK_INDENT
    {
        list(p, marker.indent);
    } else if is_atx_heading(p, 0) {
        heading(p);
    } else if p.nth(lead) == SyntaxKind::GT {
        block_quote(p);
    } else if let Some(close) = reference_definition_at(p, lead) {
        reference_definition(p, close);
    } else {
        paragraph(p);
    }
}

/// `Some(token count)` if the line at `off` is blank (the newline included).
fn blank_line_len(p: &Parser<'_, '_>, off: usize) -> Option<usize> {
    match (p.nth(off), p.nth(off + 1)) {
        (SyntaxKind::NEWLINE, _) => Some(1),
        (SyntaxKind::WHITESPACE, SyntaxKind::NEWLINE) => Some(2),
        (SyntaxKind::WHITESPACE, SyntaxKind::EOF) => Some(1),
        _ => None,
    }
}

/// 1 if the line at `off` starts with indentation a block may carry.
fn lead_at(p: &Parser<'_, '_>, off: usize) -> usize {
    if p.nth(off) == SyntaxKind::WHITESPACE
        && indent_width(p.nth_text(off)) <= MAX_BLOCK_INDENT
    {
        1
    } else {
        0
    }
}

/// True if every token of the line from `from` on is whitespace.
fn rest_is_blank(p: &Parser<'_, '_>, from: usize) -> bool {
    let len = p.line_len_from(from);
    (from..from + len).all(|i| p.nth(i) == SyntaxKind::WHITESPACE)
}

fn line_contains(p: &Parser<'_, '_>, off: usize, kind: SyntaxKind) -> bool {
    let len = p.line_len_from(off);
    (off..off + len).any(|i| p.nth(i) == kind)
}

fn run_len(p: &Parser<'_, '_>, from: usize, kind: SyntaxKind) -> usize {
    let mut n = 0;
    while p.nth(from + n) == kind {
        n += 1;
    }
    n
}

/// Opening fence marker and its length, if `at` starts a code fence.
fn fence_at(p: &Parser<'_, '_>, at: usize) -> Option<(SyntaxKind, usize)> {
    let fence = p.nth(at);
    if !matches!(fence, SyntaxKind::BACKTICK | SyntaxKind::TILDE) {
        return None;
    }
    let len = run_len(p, at, fence);
    if len < 3 {
        return None;
    }
    // A backtick info string may not contain backticks
    if fence == SyntaxKind::BACKTICK && line_contains(p, at + len, SyntaxKind::BACKTICK) {
        return None;
    }
    Some((fence, len))
}

fn fenced_code(p: &mut Parser<'_, '_>, fence: SyntaxKind, fence_len: usize) {
    let m = p.start();

    // Opening fence and info string
    p.bump_n(p.line_len());
    p.eat(SyntaxKind::NEWLINE);

    // Content is raw until a closing fence at least as long as the opening one
    while !p.at_end() {
        let lead = lead_at(p, 0);
        let close = run_len(p, lead, fence);
        let is_close = close >= fence_len && rest_is_blank(p, lead + close);

        p.bump_n(p.line_len());
        p.eat(SyntaxKind::NEWLINE);

        if is_close {
            break;
        }
    }

    m.complete(p, SyntaxKind::FENCED_CODE);
}

/// A line containing `|` followed by a delimiter row such as `|---|:-:|`.
fn is_table(p: &Parser<'_, '_>) -> bool {
    let header_len = p.line_len();
    if !line_contains(p, 0, SyntaxKind::PIPE) || p.nth(header_len) != SyntaxKind::NEWLINE {
        return false;
    }

    let sep = header_len + 1;
    let sep_len = p.line_len_from(sep);
    let mut dashes = 0;
    let mut pipes = 0;
    for i in sep..sep + sep_len {
        match p.nth(i) {
            SyntaxKind::DASH => dashes += 1,
            SyntaxKind::PIPE => pipes += 1,
            SyntaxKind::COLON | SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
    }
    dashes > 0 && pipes > 0
}

fn table(p: &mut Parser<'_, '_>) {
    let m = p.start();

    table_row(p, SyntaxKind::TABLE_HEADER);

    let sep = p.start();
    p.bump_n(p.line_len());
    p.eat(SyntaxKind::NEWLINE);
    sep.complete(p, SyntaxKind::TABLE_SEPARATOR);

    while !p.at_end() && blank_line_len(p, 0).is_none() && line_contains(p, 0, SyntaxKind::PIPE)
    {
        table_row(p, SyntaxKind::TABLE_ROW);
    }

    m.complete(p, SyntaxKind::TABLE);
}

fn table_row(p: &mut Parser<'_, '_>, kind: SyntaxKind) {
    let m = p.start();

    p.eat(SyntaxKind::WHITESPACE);
    p.eat(SyntaxKind::PIPE);

    loop {
        if rest_is_blank(p, 0) {
            p.eat(SyntaxKind::WHITESPACE);
            break;
        }

        let start = p.pos();
        let cell = p.start();
        inline::inline_until(p, &[SyntaxKind::PIPE]);
        if p.pos() == start {
            cell.abandon(p);
        } else {
            cell.complete(p, SyntaxKind::TABLE_CELL);
        }

        if !p.eat(SyntaxKind::PIPE) {
            break;
        }
    }

    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, kind);
}

/// Three or more `-`, `*` or `_` alone on a line, spaces allowed between.
fn is_thematic_break(p: &Parser<'_, '_>, off: usize) -> bool {
    let at = off + lead_at(p, off);
    let marker = p.nth(at);
    if !matches!(
        marker,
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::UNDERSCORE
    ) {
        return false;
    }

    let mut count = 0;
    for i in at..at + p.line_len_from(at) {
        match p.nth(i) {
            k if k == marker => count += 1,
            SyntaxKind::WHITESPACE => {}
            _ => return false,
        }
    }
    count >= 3
}

fn thematic_break(p: &mut Parser<'_, '_>) {
    let m = p.start();
    p.bump_n(p.line_len());
    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::THEMATIC_BREAK);
}

#[derive(Debug, Clone, Copy)]
struct ListMarker {
    /// Column of the marker
    indent: usize,
    /// Leading whitespace tokens (0 or 1)
    lead: usize,
    /// Tokens making up the marker itself (`-` is one, `1)` is two)
    len: usize,
}

/// A bullet (`-`, `*`, `+`) or ordered (`1.`, `1)`) marker followed by
/// whitespace or the end of the line.
fn list_marker_at(p: &Parser<'_, '_>, off: usize) -> Option<ListMarker> {
    let (indent, lead) = if p.nth(off) == SyntaxKind::WHITESPACE {
        (indent_width(p.nth_text(off)), 1)
    } else {
        (0, 0)
    };

    let at = off + lead;
    let len = match p.nth(at) {
        SyntaxKind::DASH | SyntaxKind::STAR | SyntaxKind::PLUS => 1,
        SyntaxKind::TEXT => {
            let text = p.nth_text(at);
            if text.strip_suffix('.').is_some_and(is_ordinal) {
                1
            } else if is_ordinal(text) && p.nth(at + 1) == SyntaxKind::RPAREN {
                2
            } else {
                return None;
            }
        }
        _ => return None,
    };

    match p.nth(at + len) {
        SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF => {
            Some(ListMarker { indent, lead, len })
        }
        _ => None,
    }
}

fn is_ordinal(text: &str) -> bool {
    (1..=9).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// A list item at `off` that belongs to a list whose items sit at `indent`.
fn sibling_item_at(p: &Parser<'_, '_>, off: usize, indent: usize) -> bool {
    match list_marker_at(p, off) {
        Some(marker) => {
            (indent..indent + 2).contains(&marker.indent) && !is_thematic_break(p, off)
        }
        None => false,
    }
}

fn list(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();

    loop {
        list_item(p, indent);

        // Blank lines between items keep the list going
        let mut off = 0;
        while let Some(len) = blank_line_len(p, off) {
            off += len;
        }
        if p.nth(off) == SyntaxKind::EOF || !sibling_item_at(p, off, indent) {
            break;
        }
        p.bump_n(off);
    }

    m.complete(p, SyntaxKind::LIST);
}

fn list_item(p: &mut Parser<'_, '_>, indent: usize) {
    let m = p.start();

    if let Some(marker) = list_marker_at(p, 0) {
        p.bump_n(marker.lead + marker.len);
    }
    p.eat(SyntaxKind::WHITESPACE);

    if p.options().task_items {
        task_marker(p);
    }
    inline::inline_until(p, &[]);
    p.eat(SyntaxKind::NEWLINE);

    while !p.at_end() && blank_line_len(p, 0).is_none() {
        let line_indent = if p.at(SyntaxKind::WHITESPACE) {
            indent_width(p.nth_text(0))
        } else {
            0
        };

        match list_marker_at(p, 0) {
            Some(child) if child.indent >= indent + 2 && !is_thematic_break(p, 0) => {
                list(p, child.indent);
            }
            None if line_indent > indent => {
                // Indented continuation text
                p.bump();
                inline::inline_until(p, &[]);
                p.eat(SyntaxKind::NEWLINE);
            }
            _ => break,
        }
    }

    m.complete(p, SyntaxKind::LIST_ITEM);
}

/// `[ ]`, `[x]` or `[X]` followed by whitespace or the end of the line.
fn task_marker(p: &mut Parser<'_, '_>) {
    let checkbox = match p.nth(1) {
        SyntaxKind::WHITESPACE => p.nth_text(1) == " ",
        SyntaxKind::TEXT => matches!(p.nth_text(1), "x" | "X"),
        _ => false,
    };
    if p.at(SyntaxKind::LBRACKET)
        && checkbox
        && p.nth(2) == SyntaxKind::RBRACKET
        && matches!(
            p.nth(3),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
    {
        p.wrap(3, SyntaxKind::TASK_MARKER);
    }
}

/// One to six `#` followed by whitespace or the end of the line.
fn is_atx_heading(p: &Parser<'_, '_>, off: usize) -> bool {
    let at = off + lead_at(p, off);
    let hashes = run_len(p, at, SyntaxKind::HASH);
    (1..=6).contains(&hashes)
        && matches!(
            p.nth(at + hashes),
            SyntaxKind::WHITESPACE | SyntaxKind::NEWLINE | SyntaxKind::EOF
        )
}

fn heading(p: &mut Parser<'_, '_>) {
    let m = p.start();

    p.eat(SyntaxKind::WHITESPACE);
    while p.at(SyntaxKind::HASH) {
        p.bump();
    }
    p.eat(SyntaxKind::WHITESPACE);

    if p.line_len() > 0 {
        let text = p.start();
        inline::inline_until(p, &[]);
        text.complete(p, SyntaxKind::HEADING_TEXT);
    }

    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::HEADING);
}

fn block_quote(p: &mut Parser<'_, '_>) {
    let m = p.start();

    loop {
        p.eat(SyntaxKind::WHITESPACE);
        p.bump(); // >
        p.eat(SyntaxKind::WHITESPACE);
        inline::inline_until(p, &[]);

        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }
        let lead = lead_at(p, 0);
        if p.nth(lead) != SyntaxKind::GT {
            break;
        }
    }

    m.complete(p, SyntaxKind::BLOCK_QUOTE);
}

/// Offset of the closing `]` if `at` starts `[label]: destination`.
fn reference_definition_at(p: &Parser<'_, '_>, at: usize) -> Option<usize> {
    if p.nth(at) != SyntaxKind::LBRACKET {
        return None;
    }

    let mut close = at + 1;
    let mut blank = true;
    loop {
        match p.nth(close) {
            SyntaxKind::RBRACKET => break,
            SyntaxKind::LBRACKET | SyntaxKind::NEWLINE | SyntaxKind::EOF => return None,
            SyntaxKind::WHITESPACE => {}
            _ => blank = false,
        }
        close += 1;
    }
    if blank || p.nth(close + 1) != SyntaxKind::COLON {
        return None;
    }

    let mut dest = close + 2;
    if p.nth(dest) == SyntaxKind::WHITESPACE {
        dest += 1;
    }
    match p.nth(dest) {
        SyntaxKind::NEWLINE | SyntaxKind::EOF => None,
        _ => Some(close),
    }
}

fn reference_definition(p: &mut Parser<'_, '_>, close: usize) {
    let m = p.start();

    let lead = usize::from(p.eat(SyntaxKind::WHITESPACE));
    p.wrap(close + 1 - lead, SyntaxKind::REFERENCE_IDENTIFIER);
    p.bump(); // :
    p.eat(SyntaxKind::WHITESPACE);

    let end = p.pos() + p.line_len();
    inline::destination(
        p,
        end,
        SyntaxKind::REFERENCE_URL,
        SyntaxKind::REFERENCE_TITLE,
    );

    p.eat(SyntaxKind::NEWLINE);
    m.complete(p, SyntaxKind::REFERENCE);
}

/// Token count from the current NEWLINE through a setext underline
/// (`===` or `---`), if the next line is one.
fn setext_underline_len(p: &Parser<'_, '_>) -> Option<usize> {
    if !p.at(SyntaxKind::NEWLINE) {
        return None;
    }
    let at = 1 + lead_at(p, 1);
    let marker = p.nth(at);
    if !matches!(marker, SyntaxKind::EQ | SyntaxKind::DASH) {
        return None;
    }
    let run = run_len(p, at, marker);
    if !rest_is_blank(p, at + run) {
        return None;
    }
    Some(at + p.line_len_from(at))
}

/// Lines that end a paragraph without a blank line in between.
fn interrupts_paragraph(p: &Parser<'_, '_>) -> bool {
    let lead = lead_at(p, 0);
    fence_at(p, lead).is_some()
        || is_thematic_break(p, 0)
        || is_atx_heading(p, 0)
        || p.nth(lead) == SyntaxKind::GT
        || list_marker_at(p, 0).is_some_and(|marker| marker.indent <= MAX_BLOCK_INDENT)
}

/// Parse a paragraph, or a setext heading when its single line is underlined.
fn paragraph(p: &mut Parser<'_, '_>) {
    let m = p.start();

    let first_line = p.start();
    inline::inline_until(p, &[]);

    if let Some(underline) = setext_underline_len(p) {
        first_line.complete(p, SyntaxKind::HEADING_TEXT);
        p.bump_n(underline);
        p.eat(SyntaxKind::NEWLINE);
        m.complete(p, SyntaxKind::HEADING);
        return;
    }
    first_line.abandon(p);

    loop {
        if !p.eat(SyntaxKind::NEWLINE) {
            break;
        }
        if p.at_end() || blank_line_len(p, 0).is_some() || interrupts_paragraph(p) {
            break;
        }
        inline::inline_until(p, &[]);
    }

    m.complete(p, SyntaxKind::PARAGRAPH);
}
