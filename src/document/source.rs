use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::document::extract::{read_docx, read_pdf};
use crate::error::ReadError;

/// Produces plain text for a file.
pub trait TextSource {
    fn read_text(&self, path: &Path) -> Result<String, ReadError>;
}

/// Reads files from disk, choosing the reader by extension: `pdf` and `docx`
/// go through their extractors, anything else is read as UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl TextSource for FileSource {
    fn read_text(&self, path: &Path) -> Result<String, ReadError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("pdf") => read_pdf(path),
            Some("docx") => read_docx(path),
            _ => fs::read_to_string(path).map_err(|e| match e.kind() {
                ErrorKind::InvalidData => ReadError::Encoding,
                _ => ReadError::Io(e),
            }),
        }
    }
}

/// Regular files below `root`, sorted by path. Entries that cannot be read
/// are logged and skipped; a missing root gives an empty list.
pub fn find_files(root: impl AsRef<Path>) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root.as_ref())
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    tracing::debug!(root = %root.as_ref().display(), files = files.len(), "directory walked");
    files
}
