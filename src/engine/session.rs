use std::path::{Path, PathBuf};

use nalgebra::DVector;
use serde::Serialize;

use crate::config::{IndexTerms, SearchConfig};
use crate::document::{Document, TextSource};
use crate::engine::lsi::{LatentSemanticModel, LsiModel};
use crate::engine::search::{SimilarityIndex, filter_relevant, rank};
use crate::error::{Error, Result};
use crate::preprocessing::tokenizer::{stem_tokens, tokenize};
use crate::preprocessing::vocabulary::{BagOfWords, Dictionary};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    /// Every document, best first.
    pub ranked: Vec<(PathBuf, f64)>,
    /// Documents scoring above zero, numbered from 1.
    pub relevant: Vec<(usize, PathBuf)>,
}

/// Outcome of reading a batch of files into a session.
#[derive(Debug, Default)]
pub struct IngestReport {
    pub added: Vec<PathBuf>,
    pub failed: Vec<Error>,
}

/// Dictionary, model and similarity index fit on one snapshot of a corpus.
#[derive(Debug, Clone)]
pub struct Index {
    terms: IndexTerms,
    paths: Vec<PathBuf>,
    dictionary: Dictionary,
    model: LsiModel,
    similarity: SimilarityIndex,
}

impl Index {
    pub fn build(documents: &[Document], config: &SearchConfig) -> Result<Self> {
        if documents.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let dictionary = Dictionary::build(documents.iter().map(|doc| doc.terms(config.terms)));
        if dictionary.is_empty() {
            return Err(Error::DegenerateCorpus {
                documents: documents.len(),
                vocabulary: 0,
            });
        }

        let corpus: Vec<BagOfWords> = documents
            .iter()
            .map(|doc| dictionary.doc2bow(doc.terms(config.terms)))
            .collect();
        let model = LsiModel::fit(&corpus, dictionary.len(), &config.lsi)?;
        let similarity = SimilarityIndex::new(model.document_vectors());

        Ok(Self {
            terms: config.terms,
            paths: documents.iter().map(|doc| doc.path.clone()).collect(),
            dictionary,
            model,
            similarity,
        })
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn model(&self) -> &LsiModel {
        &self.model
    }

    /// Topic-space vector of `query`. A query with no known term maps to zero.
    pub fn query_vector(&self, query: &str) -> DVector<f64> {
        let mut tokens = tokenize(query);
        if self.terms == IndexTerms::Stems {
            tokens = stem_tokens(&tokens);
        }
        let bow = self.dictionary.doc2bow(&tokens);
        if bow.is_empty() {
            tracing::debug!(query, "query has no indexed terms");
        }
        self.model.project(&bow)
    }

    pub fn search(&self, query: &str) -> SearchOutcome {
        let ranked = rank(&self.similarity, &self.query_vector(query));
        let relevant = filter_relevant(&ranked)
            .into_iter()
            .map(|r| (r.position, self.paths[r.doc].clone()))
            .collect();
        let ranked = ranked
            .into_iter()
            .map(|s| (self.paths[s.doc].clone(), s.score))
            .collect();
        SearchOutcome { ranked, relevant }
    }
}

/// Documents accumulated over a run of the driver.
///
/// The index is rebuilt from the full set on every search; nothing is kept
/// between runs.
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: SearchConfig,
    documents: Vec<Document>,
}

impl Session {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            documents: Vec::new(),
        }
    }

    pub fn from_texts<P, T>(texts: impl IntoIterator<Item = (P, T)>, config: SearchConfig) -> Self
    where
        P: Into<PathBuf>,
        T: Into<String>,
    {
        let mut session = Self::new(config);
        for (path, text) in texts {
            session.add_text(path, text);
        }
        session
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Adds `document`, replacing an earlier one with the same path in place.
    pub fn add_document(&mut self, document: Document) -> &Document {
        let slot = match self.documents.iter().position(|d| d.path == document.path) {
            Some(i) => {
                self.documents[i] = document;
                i
            }
            None => {
                self.documents.push(document);
                self.documents.len() - 1
            }
        };
        &self.documents[slot]
    }

    pub fn add_text(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) -> &Document {
        let document = Document::from_text(path, text, self.config.count_mode);
        self.add_document(document)
    }

    /// Reads every path through `source`. A failing file is logged and
    /// reported; the rest of the batch is still ingested.
    pub fn ingest<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        source: &dyn TextSource,
    ) -> IngestReport {
        let mut report = IngestReport::default();
        for path in paths {
            let path = path.as_ref();
            match source.read_text(path) {
                Ok(text) => {
                    self.add_text(path, text);
                    report.added.push(path.to_path_buf());
                }
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping file");
                    report.failed.push(Error::Read {
                        path: path.to_path_buf(),
                        source: error,
                    });
                }
            }
        }
        tracing::info!(added = report.added.len(), failed = report.failed.len(), "files ingested");
        report
    }

    pub fn index(&self) -> Result<Index> {
        Index::build(&self.documents, &self.config)
    }

    pub fn search(&self, query: &str) -> Result<SearchOutcome> {
        Ok(self.index()?.search(query))
    }
}
