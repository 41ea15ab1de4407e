//! Latent-semantic search over a set of text documents.
//!
//! Text is tokenized, counted into bag-of-words vectors over a corpus-wide
//! dictionary, reduced with a truncated SVD and ranked by cosine similarity
//! in topic space. A Lovins stemmer is available for reporting and, with
//! [`config::IndexTerms::Stems`], for indexing.

pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod preprocessing;
pub mod stemer;
pub mod util;

use std::path::PathBuf;

pub use config::SearchConfig;
pub use document::Document;
pub use engine::{Index, SearchOutcome, Session};
pub use error::{Error, ReadError, Result};

/// Ranks `documents` (path, raw text) against `query` in one call.
pub fn search_documents<P, T>(
    documents: impl IntoIterator<Item = (P, T)>,
    query: &str,
    config: SearchConfig,
) -> Result<SearchOutcome>
where
    P: Into<PathBuf>,
    T: Into<String>,
{
    Session::from_texts(documents, config).search(query)
}
