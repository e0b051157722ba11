//! # markdown-navigator-engine
//!
//! Everything above the syntax tree: the element model, per-document
//! reference tables, cross-reference resolution, renames, the parse cache
//! and loading a notes directory.
//!
//! ```text
//! Document (text, version)
//!     │  ParseCache::get_or_parse        one parse per version
//!     ▼
//! ParsedDocument (green tree) ──► ReferenceTable   built once, on demand
//!     │
//!     ▼
//! Element (+ Capabilities) ──► resolve ──► ResolvedTarget
//!                          └─► manipulate ──► next Document version
//! ```

pub mod cache;
pub mod element;
pub mod error;
pub mod io;
pub mod manipulate;
pub mod models;
pub mod normalize;
pub mod parsed;
pub mod resolve;
pub mod table;
pub mod translate;
pub mod workspace;


// Re-export key types for easier usage
pub use cache::ParseCache;
pub use element::{
    Capabilities, DocumentRef, Element, ElementKind, IconKey, Namespace, NodePtr, Target,
};
pub use error::EngineError;
pub use io::IoError;
pub use manipulate::{
    EditResult, RenameEdit, RenameReason, handle_content_change, range_in_element,
    rename_references, set_content, set_name,
};
pub use models::{Document, DocumentId};
pub use parsed::ParsedDocument;
pub use resolve::{ResolvedTarget, Scope, resolve};
pub use table::ReferenceTable;
pub use translate::Translator;
pub use workspace::Workspace;
