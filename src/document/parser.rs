use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{CountMode, IndexTerms};
use crate::preprocessing::tokenizer::{count_words, stem_tokens, tokenize};

/// One file's text and everything derived from it. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub path: PathBuf,
    #[serde(skip)]
    pub text: String,
    pub tokens: Vec<String>,
    pub stems: Vec<String>,
    pub word_counts: BTreeMap<String, usize>,
}

impl Document {
    pub fn from_text(
        path: impl Into<PathBuf>,
        text: impl Into<String>,
        count_mode: CountMode,
    ) -> Self {
        let text = text.into();
        let tokens = tokenize(&text);
        let stems = stem_tokens(&tokens);
        let word_counts = count_words(&text, count_mode);
        Self {
            path: path.into(),
            text,
            tokens,
            stems,
            word_counts,
        }
    }

    /// Space-joined lower-cased tokens.
    pub fn original_text(&self) -> String {
        self.tokens.join(" ")
    }

    pub fn stemmed_text(&self) -> String {
        self.stems.join(" ")
    }

    pub fn terms(&self, terms: IndexTerms) -> &[String] {
        match terms {
            IndexTerms::Tokens => &self.tokens,
            IndexTerms::Stems => &self.stems,
        }
    }
}
