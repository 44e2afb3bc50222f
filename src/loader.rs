//! File access for the pipeline: whole-file reads, document identifiers and
//! corpus directory listing.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{AuthorshipError, Result},
    vectorizer::document::Document,
};

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| AuthorshipError::io(path, e))
}

/// Identifier of the document stored at `path`: its file stem.
pub fn document_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Read and analyze the document at `path`.
pub fn load_document(path: &Path) -> Result<Document> {
    let text = read_text(path)?;
    Ok(Document::new(document_id(path), &text))
}

/// Files directly inside `dir` whose extension is `extension`, sorted.
pub fn collect_paths(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| AuthorshipError::io(dir, e))? {
        let path = entry.map_err(|e| AuthorshipError::io(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
