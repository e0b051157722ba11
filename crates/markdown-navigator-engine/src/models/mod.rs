pub mod document;
pub mod document_id;

pub use document::Document;
pub use document_id::DocumentId;
