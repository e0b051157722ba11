use std::sync::Arc;

use rowan::{TextRange, TextSize};

use crate::error::EngineError;
use crate::models::DocumentId;

/// An immutable snapshot of a document's text at one version.
///
/// Cloning is cheap: the text is shared. An edit never changes a `Document`,
/// it produces a new one with the next version, so readers holding an older
/// snapshot keep a consistent view while the single writer moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    id: DocumentId,
    text: Arc<str>,
    version: u64,
}

impl Document {
    /// A freshly opened document at version 0.
    pub fn new(id: impl Into<DocumentId>, text: impl Into<Arc<str>>) -> Self {
        Self::with_version(id, text, 0)
    }

    pub fn with_version(id: impl Into<DocumentId>, text: impl Into<Arc<str>>, version: u64) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            version,
        }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> TextSize {
        TextSize::of(&*self.text)
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Replace `range` with `replacement`, producing the next version.
    pub fn edit(&self, range: TextRange, replacement: &str) -> Result<Document, EngineError> {
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if end > self.text.len()
            || !self.text.is_char_boundary(start)
            || !self.text.is_char_boundary(end)
        {
            return Err(EngineError::invalid(format!(
                "range {range:?} is not a valid range of {}",
                self.id
            )));
        }

        let mut text = String::with_capacity(self.text.len() - (end - start) + replacement.len());
        text.push_str(&self.text[..start]);
        text.push_str(replacement);
        text.push_str(&self.text[end..]);
        Ok(self.replace(text))
    }

    /// Swap in entirely new text, producing the next version.
    pub fn replace(&self, text: impl Into<Arc<str>>) -> Document {
        Document {
            id: self.id.clone(),
            text: text.into(),
            version: self.version + 1,
        }
    }
}
