use std::fmt;

use relative_path::{RelativePath, RelativePathBuf};

use crate::normalize;

/// Identity of a document: its path relative to the workspace root.
///
/// The page name (used by wiki links) is the file name without `.md`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId {
    relative_path: RelativePathBuf,
}

impl DocumentId {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        Self { relative_path }
    }

    /// Create from a relative path string
    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// The directory holding the document, empty at the workspace root.
    pub fn directory(&self) -> &RelativePath {
        self.relative_path
            .parent()
            .unwrap_or_else(|| RelativePath::new(""))
    }

    /// File name without the `.md` extension (`notes/Page-Two.md` → `Page-Two`).
    pub fn page_name(&self) -> &str {
        self.relative_path
            .file_name()
            .map(|name| name.strip_suffix(".md").unwrap_or(name))
            .unwrap_or("Untitled")
    }

    /// Page name in the form wiki links are matched by.
    pub fn normalized_page_name(&self) -> String {
        normalize::page_name(self.page_name())
    }

    /// Relative path without the `.md` extension, for titles.
    pub fn display_path(&self) -> &str {
        let path = self.relative_path.as_str();
        path.strip_suffix(".md").unwrap_or(path)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.relative_path.as_str())
    }
}

impl From<RelativePathBuf> for DocumentId {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
