use std::path::PathBuf;

/// Failure of the text-source collaborator for one file.
#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is not valid UTF-8")]
    Encoding,
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("DOCX archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ReadError,
    },
    /// No documents were indexed at all.
    #[error("no documents to index")]
    EmptyCorpus,
    /// Documents exist but none of them yields a token.
    #[error("corpus has no terms ({documents} documents, vocabulary {vocabulary})")]
    DegenerateCorpus { documents: usize, vocabulary: usize },
    #[error("decomposition failed: {0}")]
    Decomposition(String),
}

pub type Result<T> = std::result::Result<T, Error>;
