//! # Inline-Level Grammar
//!
//! Inline elements live inside the lines a block owns: links, wiki links,
//! anchors, attributes, code spans and emphasis. Unlike blocks, inline parsing
//! is driven by **special characters** rather than line-start patterns.
//!
//! Every rule here works on a token window that ends at an absolute position
//! `end` (the end of the line, the closing `]` of a link text, a table pipe).
//! Lookahead never crosses `end`, so nested content can't steal the closing
//! delimiter of the construct it sits in.
//!
//! ## Dispatch Logic
//!
//! | Token | Possible Element |
//! |-------|-----------------|
//! | `[` | Wiki link, inline link, reference link |
//! | `!` | Image |
//! | `` ` `` | Code span |
//! | `*` `_` | Emphasis or strong |
//! | `~` | Strikethrough |
//! | `<` | HTML anchor or autolink |
//! | `{` | Attributes |
//! | (other) | Plain text |
//!
//! ## Link Forms
//!
//! - `[[page]]`, `[[page#anchor|text]]`: wiki links (the text comes first
//!   when [`ParserOptions::wiki_link_text_first`] is set)
//! - `[text](url#anchor "title")`: inline links
//! - `[text][ref]`, `[ref][]`, `[ref]`: reference links in full, collapsed and
//!   shortcut form
//!
//! An unclosed or malformed construct produces no node at all. Its tokens are
//! bumped one by one as plain text and the next token gets a fresh chance.
//!
//! [`ParserOptions::wiki_link_text_first`]: markdown_navigator_config::ParserOptions::wiki_link_text_first

use crate::parser::Parser;
use crate::syntax_kind::SyntaxKind;

/// Parse inline content up to the end of the line, or up to the first token
/// in `stop` that isn't inside a wiki link.
pub(super) fn inline_until(p: &mut Parser<'_, '_>, stop: &[SyntaxKind]) {
    let line = p.line_len();
    let mut end = line;

    if !stop.is_empty() {
        let mut i = 0;
        while i < line {
            if let Some(len) = wiki_link_len(p, i, line) {
                i += len;
                continue;
            }
            if stop.contains(&p.nth(i)) {
                end = i;
                break;
            }
            i += 1;
        }
    }

    let end = p.pos() + end;
    inline_range(p, end, true);
}

/// Parse inline elements until the absolute token position `end`.
fn inline_range(p: &mut Parser<'_, '_>, end: usize, links: bool) {
    while p.pos() < end && !p.at_end() {
        inline_element(p, end, links);
    }
}

/// Parse a single inline element. Always consumes at least one token.
fn inline_element(p: &mut Parser<'_, '_>, end: usize, links: bool) {
    let lim = end - p.pos();

    match p.current() {
        SyntaxKind::LBRACKET if links => {
            if let Some(len) = wiki_link_len(p, 0, lim) {
                wiki_link(p, len);
            } else if !bracket_link(p, lim) {
                p.bump();
            }
        }
        SyntaxKind::BANG if p.nth(1) == SyntaxKind::LBRACKET => {
            if !image(p, lim) {
                p.bump();
            }
        }
        SyntaxKind::BACKTICK => code_span(p, lim),
        SyntaxKind::STAR | SyntaxKind::UNDERSCORE => emphasis(p, lim, links),
        SyntaxKind::TILDE if p.options().strikethrough => strikethrough(p, lim, links),
        SyntaxKind::LT if links => {
            if p.options().ref_anchors
                && let Some(anchor) = ref_anchor_at(p, lim)
            {
                ref_anchor(p, anchor);
            } else if p.options().autolinks
                && let Some(close) = autolink_close(p, lim)
            {
                autolink(p, close);
            } else {
                p.bump();
            }
        }
        SyntaxKind::LBRACE if p.options().attributes => match attribute_items(p, lim) {
            Some((items, close)) => attributes(p, &items, close),
            None => p.bump(),
        },
        _ => p.bump(),
    }
}

fn is_blank(p: &Parser<'_, '_>, from: usize, to: usize) -> bool {
    (from..to).all(|i| p.nth(i) == SyntaxKind::WHITESPACE)
}

fn find(p: &Parser<'_, '_>, kind: SyntaxKind, from: usize, lim: usize) -> Option<usize> {
    (from..lim).find(|&i| p.nth(i) == kind)
}

// Wiki links

/// Total token count of a `[[...]]` wiki link starting at `at`.
fn wiki_link_len(p: &Parser<'_, '_>, at: usize, lim: usize) -> Option<usize> {
    if !p.options().wiki_links
        || p.nth(at) != SyntaxKind::LBRACKET
        || p.nth(at + 1) != SyntaxKind::LBRACKET
    {
        return None;
    }

    let mut i = at + 2;
    while i + 1 < lim {
        match p.nth(i) {
            SyntaxKind::RBRACKET if p.nth(i + 1) == SyntaxKind::RBRACKET => {
                return (!is_blank(p, at + 2, i)).then_some(i + 2 - at);
            }
            SyntaxKind::LBRACKET => return None,
            _ => i += 1,
        }
    }
    None
}

fn wiki_link(p: &mut Parser<'_, '_>, len: usize) {
    let m = p.start();
    let content = len - 4;
    let pipe = find(p, SyntaxKind::PIPE, 2, len - 2).map(|i| i - 2);

    p.bump(); // [
    p.bump(); // [

    match pipe {
        None => wiki_target(p, content),
        Some(pipe) if p.options().wiki_link_text_first => {
            p.wrap(pipe, SyntaxKind::WIKI_LINK_TEXT);
            p.bump();
            wiki_target(p, content - pipe - 1);
        }
        Some(pipe) => {
            wiki_target(p, pipe);
            p.bump();
            p.wrap(content - pipe - 1, SyntaxKind::WIKI_LINK_TEXT);
        }
    }

    p.bump(); // ]
    p.bump(); // ]
    m.complete(p, SyntaxKind::WIKI_LINK);
}

/// `page#anchor`: the page part and the anchor part (with its `#`).
fn wiki_target(p: &mut Parser<'_, '_>, n: usize) {
    let hash = find(p, SyntaxKind::HASH, 0, n).unwrap_or(n);
    p.wrap(hash, SyntaxKind::WIKI_LINK_REF);
    p.wrap(n - hash, SyntaxKind::WIKI_LINK_ANCHOR);
}

// Links and images

/// Offset of the `]` closing the bracket at `open`. Brackets don't nest.
fn bracket_close(p: &Parser<'_, '_>, open: usize, lim: usize) -> Option<usize> {
    for i in open + 1..lim {
        match p.nth(i) {
            SyntaxKind::RBRACKET => return Some(i),
            SyntaxKind::LBRACKET => return None,
            _ => {}
        }
    }
    None
}

/// Offset of the `)` closing an inline destination that opens at `open`.
fn paren_close(p: &Parser<'_, '_>, open: usize, lim: usize) -> Option<usize> {
    if open < lim && p.nth(open) == SyntaxKind::LPAREN {
        find(p, SyntaxKind::RPAREN, open + 1, lim)
    } else {
        None
    }
}

/// Parse a link starting at `[`. Returns false, consuming nothing, if the
/// brackets don't form one.
fn bracket_link(p: &mut Parser<'_, '_>, lim: usize) -> bool {
    let Some(close) = bracket_close(p, 0, lim) else {
        return false;
    };
    let after = close + 1;

    if let Some(rparen) = paren_close(p, after, lim) {
        let m = p.start();
        link_text(p, close);
        p.bump(); // (
        let end = p.pos() + rparen - after - 1;
        destination(p, end, SyntaxKind::LINK_URL, SyntaxKind::LINK_TITLE);
        p.bump(); // )
        m.complete(p, SyntaxKind::LINK);
        return true;
    }

    if after < lim
        && p.nth(after) == SyntaxKind::LBRACKET
        && let Some(ref_close) = bracket_close(p, after, lim)
    {
        if ref_close == after + 1 {
            // [ref][]
            if is_blank(p, 1, close) {
                return false;
            }
            let m = p.start();
            p.wrap(close + 1, SyntaxKind::REFERENCE_LINK_REF);
            p.bump_n(2);
            m.complete(p, SyntaxKind::REFERENCE_LINK);
            return true;
        }
        if !is_blank(p, after + 1, ref_close) {
            // [text][ref]
            let m = p.start();
            link_text(p, close);
            p.wrap(ref_close - after + 1, SyntaxKind::REFERENCE_LINK_REF);
            m.complete(p, SyntaxKind::REFERENCE_LINK);
            return true;
        }
    }

    // [ref]
    if is_blank(p, 1, close) {
        return false;
    }
    let m = p.start();
    p.wrap(close + 1, SyntaxKind::REFERENCE_LINK_REF);
    m.complete(p, SyntaxKind::REFERENCE_LINK);
    true
}

/// `[`, the text up to the `]` at offset `close`, then `]`.
fn link_text(p: &mut Parser<'_, '_>, close: usize) {
    p.bump(); // [
    if close > 1 {
        let m = p.start();
        let end = p.pos() + close - 1;
        inline_range(p, end, false);
        m.complete(p, SyntaxKind::LINK_TEXT);
    }
    p.bump(); // ]
}

/// Parse `![alt](url)`. Only the inline form makes an image.
fn image(p: &mut Parser<'_, '_>, lim: usize) -> bool {
    let Some(close) = bracket_close(p, 1, lim) else {
        return false;
    };
    let Some(rparen) = paren_close(p, close + 1, lim) else {
        return false;
    };

    let m = p.start();
    p.bump(); // !
    link_text(p, close - 1);
    p.bump(); // (
    let end = p.pos() + rparen - close - 2;
    destination(p, end, SyntaxKind::LINK_URL, SyntaxKind::LINK_TITLE);
    p.bump(); // )
    m.complete(p, SyntaxKind::IMAGE);
    true
}

/// Parse `url#anchor "title"` up to the absolute position `end`.
///
/// Shared by inline links, images and reference definitions; the latter pass
/// their own node kinds for the url and title.
pub(super) fn destination(
    p: &mut Parser<'_, '_>,
    end: usize,
    url_kind: SyntaxKind,
    title_kind: SyntaxKind,
) {
    let lim = |p: &Parser<'_, '_>| end.saturating_sub(p.pos());

    if lim(p) > 0 {
        p.eat(SyntaxKind::WHITESPACE);
    }

    let url = (0..lim(p))
        .find(|&i| matches!(p.nth(i), SyntaxKind::HASH | SyntaxKind::WHITESPACE))
        .unwrap_or(lim(p));
    p.wrap(url, url_kind);

    if lim(p) > 0 && p.at(SyntaxKind::HASH) {
        let anchor = find(p, SyntaxKind::WHITESPACE, 1, lim(p)).unwrap_or(lim(p));
        p.wrap(anchor, SyntaxKind::LINK_ANCHOR);
    }

    if lim(p) > 0 {
        p.eat(SyntaxKind::WHITESPACE);
    }

    if lim(p) > 0
        && p.at(SyntaxKind::QUOTE)
        && let Some(close) = find(p, SyntaxKind::QUOTE, 1, lim(p))
    {
        p.wrap(close + 1, title_kind);
    }

    p.bump_to(end);
}

// Code, emphasis and strikethrough

fn run_len(p: &Parser<'_, '_>, from: usize, kind: SyntaxKind, lim: usize) -> usize {
    (from..lim).take_while(|&i| p.nth(i) == kind).count()
}

/// Parse a code span. Content is raw; an unmatched run of backticks is text.
fn code_span(p: &mut Parser<'_, '_>, lim: usize) {
    let open = run_len(p, 0, SyntaxKind::BACKTICK, lim);

    let mut i = open;
    while i < lim {
        if p.nth(i) == SyntaxKind::BACKTICK {
            let run = run_len(p, i, SyntaxKind::BACKTICK, lim);
            if run == open {
                p.wrap(i + open, SyntaxKind::CODE_SPAN);
                return;
            }
            i += run;
        } else {
            i += 1;
        }
    }

    p.bump_n(open);
}

/// Offset of a closing run of `width` delimiters, if the opener can open.
fn delim_close(p: &Parser<'_, '_>, delim: SyntaxKind, width: usize, lim: usize) -> Option<usize> {
    if width >= lim || p.nth(width) == SyntaxKind::WHITESPACE {
        return None;
    }

    let mut i = width + 1;
    while i + width <= lim {
        if p.nth(i) != delim {
            i += 1;
            continue;
        }
        let run = run_len(p, i, delim, lim);
        let closes = run == width
            && p.nth(i - 1) != SyntaxKind::WHITESPACE
            && !(delim == SyntaxKind::UNDERSCORE && p.nth(i + width) == SyntaxKind::TEXT);
        if closes {
            return Some(i);
        }
        i += run;
    }
    None
}

/// Parse `*em*`, `_em_`, `**strong**` or `__strong__`.
fn emphasis(p: &mut Parser<'_, '_>, lim: usize, links: bool) {
    let delim = p.current();

    // snake_case words stay text
    if delim == SyntaxKind::UNDERSCORE && p.prev() == SyntaxKind::TEXT {
        p.bump();
        return;
    }

    let width = run_len(p, 0, delim, lim).min(2);
    let kind = if width == 2 {
        SyntaxKind::STRONG
    } else {
        SyntaxKind::EMPHASIS
    };

    match delim_close(p, delim, width, lim) {
        Some(close) => {
            let m = p.start();
            p.bump_n(width);
            let end = p.pos() + close - width;
            inline_range(p, end, links);
            p.bump_n(width);
            m.complete(p, kind);
        }
        None => p.bump(),
    }
}

/// Parse `~~deleted~~`.
fn strikethrough(p: &mut Parser<'_, '_>, lim: usize, links: bool) {
    let close = (p.nth(1) == SyntaxKind::TILDE)
        .then(|| {
            (3..lim.saturating_sub(1)).find(|&i| {
                p.nth(i) == SyntaxKind::TILDE && p.nth(i + 1) == SyntaxKind::TILDE
            })
        })
        .flatten();

    match close {
        Some(close) if lim > 2 && p.nth(2) != SyntaxKind::WHITESPACE => {
            let m = p.start();
            p.bump_n(2);
            let end = p.pos() + close - 2;
            inline_range(p, end, links);
            p.bump_n(2);
            m.complete(p, SyntaxKind::STRIKETHROUGH);
        }
        _ => p.bump(),
    }
}

// Anchors and autolinks

#[derive(Debug, Clone, Copy)]
struct RefAnchor {
    /// Offset of the first token of the id value
    value: usize,
    /// Token count of the id value
    value_len: usize,
    /// Token count of the whole anchor, closing `</a>` included
    len: usize,
}

fn text_is(p: &Parser<'_, '_>, n: usize, expected: &str) -> bool {
    p.nth(n) == SyntaxKind::TEXT && p.nth_text(n).eq_ignore_ascii_case(expected)
}

/// Recognise `<a id="value">` or `<a name="value">`, optionally followed by
/// `</a>`.
fn ref_anchor_at(p: &Parser<'_, '_>, lim: usize) -> Option<RefAnchor> {
    if !(text_is(p, 1, "a") && p.nth(2) == SyntaxKind::WHITESPACE) {
        return None;
    }

    let mut value = None;
    let mut i = 3;
    while i < lim && p.nth(i) != SyntaxKind::GT {
        let is_id = (text_is(p, i, "id") || text_is(p, i, "name"))
            && p.nth(i + 1) == SyntaxKind::EQ
            && p.nth(i + 2) == SyntaxKind::QUOTE;
        if is_id && value.is_none() {
            let start = i + 3;
            let close = find(p, SyntaxKind::QUOTE, start, lim)?;
            value = Some((start, close - start));
            i = close + 1;
        } else if matches!(p.nth(i), SyntaxKind::LT | SyntaxKind::NEWLINE) {
            return None;
        } else {
            i += 1;
        }
    }
    if i >= lim {
        return None;
    }

    let (value, value_len) = value?;
    if value_len == 0 || is_blank(p, value, value + value_len) {
        return None;
    }

    let mut len = i + 1;
    if len + 2 < lim
        && p.nth(len) == SyntaxKind::LT
        && text_is(p, len + 1, "/a")
        && p.nth(len + 2) == SyntaxKind::GT
    {
        len += 3;
    }

    Some(RefAnchor {
        value,
        value_len,
        len,
    })
}

fn ref_anchor(p: &mut Parser<'_, '_>, anchor: RefAnchor) {
    let m = p.start();
    p.bump_n(anchor.value);
    p.wrap(anchor.value_len, SyntaxKind::REF_ANCHOR_ID);
    p.bump_n(anchor.len - anchor.value - anchor.value_len);
    m.complete(p, SyntaxKind::REF_ANCHOR);
}

/// Offset of the `>` closing `<scheme:...>` or `<user@host>`.
fn autolink_close(p: &Parser<'_, '_>, lim: usize) -> Option<usize> {
    if p.nth(1) != SyntaxKind::TEXT {
        return None;
    }
    let is_uri = p.nth(2) == SyntaxKind::COLON || p.nth_text(1).contains('@');
    if !is_uri {
        return None;
    }

    for i in 2..lim {
        match p.nth(i) {
            SyntaxKind::GT => return Some(i),
            SyntaxKind::WHITESPACE | SyntaxKind::LT => return None,
            _ => {}
        }
    }
    None
}

fn autolink(p: &mut Parser<'_, '_>, close: usize) {
    let m = p.start();
    p.bump(); // <
    let hash = find(p, SyntaxKind::HASH, 0, close - 1).unwrap_or(close - 1);
    p.wrap(hash, SyntaxKind::LINK_URL);
    p.wrap(close - 1 - hash, SyntaxKind::LINK_ANCHOR);
    p.bump(); // >
    m.complete(p, SyntaxKind::AUTOLINK);
}

// Attributes

/// Items of a `{...}` attribute block as `(offset, len)` pairs, and the
/// offset of the closing `}`.
fn attribute_items(p: &Parser<'_, '_>, lim: usize) -> Option<(Vec<(usize, usize)>, usize)> {
    let mut items = Vec::new();
    let mut i = 1;
    if p.nth(i) == SyntaxKind::COLON {
        i += 1;
    }

    loop {
        if i >= lim {
            return None;
        }
        match p.nth(i) {
            SyntaxKind::WHITESPACE => i += 1,
            SyntaxKind::RBRACE => break,
            SyntaxKind::HASH | SyntaxKind::TEXT => {
                let start = i;
                let mut quoted = false;
                while i < lim {
                    match p.nth(i) {
                        SyntaxKind::QUOTE => quoted = !quoted,
                        SyntaxKind::WHITESPACE | SyntaxKind::RBRACE if !quoted => break,
                        SyntaxKind::LBRACE
                        | SyntaxKind::LBRACKET
                        | SyntaxKind::RBRACKET
                        | SyntaxKind::LT
                        | SyntaxKind::GT => return None,
                        _ => {}
                    }
                    i += 1;
                }
                items.push((start, i - start));
            }
            _ => return None,
        }
    }

    (!items.is_empty()).then_some((items, i))
}

fn attributes(p: &mut Parser<'_, '_>, items: &[(usize, usize)], close: usize) {
    let base = p.pos();
    let m = p.start();

    for &(start, len) in items {
        p.bump_to(base + start);
        attribute(p, len);
    }
    p.bump_to(base + close);
    p.bump(); // }

    m.complete(p, SyntaxKind::ATTRIBUTES);
}

/// One attribute of `len` tokens: `#id`, `id=value`, `id="value"`, or any
/// other item such as `.class` or `key=value`.
fn attribute(p: &mut Parser<'_, '_>, len: usize) {
    let m = p.start();

    if p.at(SyntaxKind::HASH) {
        p.bump();
        p.wrap(len - 1, SyntaxKind::ATTRIBUTE_ID_VALUE);
    } else if text_is(p, 0, "id") && p.nth(1) == SyntaxKind::EQ && len > 2 {
        p.bump_n(2);
        let quoted = len > 3
            && p.at(SyntaxKind::QUOTE)
            && p.nth(len - 3) == SyntaxKind::QUOTE;
        if quoted {
            p.bump();
            p.wrap(len - 4, SyntaxKind::ATTRIBUTE_ID_VALUE);
            p.bump();
        } else {
            p.wrap(len - 2, SyntaxKind::ATTRIBUTE_ID_VALUE);
        }
    } else {
        p.bump_n(len);
    }

    m.complete(p, SyntaxKind::ATTRIBUTE);
}
