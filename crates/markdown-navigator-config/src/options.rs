//! Dialect switches consulted by the parser.
//!
//! Each field enables one markdown extension. The named presets mirror the
//! compatibility targets a rendering profile can pick from.

use serde::{Deserialize, Serialize};

/// Which markdown extensions the parser recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// `[[page]]` wiki links
    pub wiki_links: bool,
    /// GitHub wiki ordering `[[text|page]]` instead of `[[page|text]]`
    pub wiki_link_text_first: bool,
    /// Pipe tables with a delimiter row
    pub tables: bool,
    /// `- [ ]` / `- [x]` list items
    pub task_items: bool,
    /// `~~struck~~`
    pub strikethrough: bool,
    /// `<https://example.com>`
    pub autolinks: bool,
    /// `{#id .class key=value}` attribute blocks
    pub attributes: bool,
    /// `<a id="name"></a>` HTML anchors
    pub ref_anchors: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self::github()
    }
}

impl ParserOptions {
    /// GitHub document flavour, the default profile.
    pub fn github() -> Self {
        Self {
            wiki_links: true,
            wiki_link_text_first: false,
            tables: true,
            task_items: true,
            strikethrough: true,
            autolinks: true,
            attributes: true,
            ref_anchors: true,
        }
    }

    /// GitHub wiki pages: wiki links use `[[text|page]]`.
    pub fn github_wiki() -> Self {
        Self {
            wiki_link_text_first: true,
            ..Self::github()
        }
    }

    /// GitLab flavour. No attribute blocks.
    pub fn gitlab() -> Self {
        Self {
            attributes: false,
            ..Self::github()
        }
    }

    /// Plain CommonMark: only the constructs CommonMark itself defines.
    pub fn commonmark() -> Self {
        Self {
            wiki_links: false,
            wiki_link_text_first: false,
            tables: false,
            task_items: false,
            strikethrough: false,
            autolinks: true,
            attributes: false,
            ref_anchors: true,
        }
    }

    /// Look up a preset by the name used in config files.
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" | "github" => Some(Self::github()),
            "github-wiki" => Some(Self::github_wiki()),
            "gitlab" => Some(Self::gitlab()),
            "commonmark" => Some(Self::commonmark()),
            _ => None,
        }
    }

    /// Names accepted by [`ParserOptions::preset`].
    pub const PRESET_NAMES: [&'static str; 5] =
        ["default", "github", "github-wiki", "gitlab", "commonmark"];
}
