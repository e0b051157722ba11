use crate::models::{Document, DocumentId};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notes directory: {0}")]
    InvalidNotesDir(String),
}

/// Read a markdown file and return its content
pub fn read_file(relative_path: &RelativePath, notes_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(notes_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Write content to a markdown file, creating parent directories
pub fn write_file(
    relative_path: &RelativePath,
    notes_root: &Path,
    content: &str,
) -> Result<(), IoError> {
    let absolute_path = relative_path.to_path(notes_root);

    if let Some(parent) = absolute_path.parent() {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(&absolute_path, content).map_err(IoError::Io)
}

/// Load a document at version 0
pub fn read_document(id: &DocumentId, notes_root: &Path) -> Result<Document, IoError> {
    let text = read_file(id.relative_path(), notes_root)?;
    Ok(Document::new(id.clone(), text))
}

pub fn write_document(document: &Document, notes_root: &Path) -> Result<(), IoError> {
    write_file(document.id().relative_path(), notes_root, document.text())
}

/// Ids of every markdown file under the notes directory, sorted by path
pub fn scan_documents(notes_root: &Path) -> Result<Vec<DocumentId>, IoError> {
    validate_notes_dir(notes_root)?;

    let mut files = Vec::new();
    scan_directory_recursive(notes_root, &mut files)?;

    let mut ids: Vec<DocumentId> = files
        .iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(notes_root).ok()?;
            match RelativePathBuf::from_path(relative) {
                Ok(relative) => Some(DocumentId::new(relative)),
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    None
                }
            }
        })
        .collect();
    ids.sort();
    Ok(ids)
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(&path, files)?;
        } else if let Some(ext) = path.extension()
            && ext == "md"
        {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_notes_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotesDir(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    Ok(())
}
