use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Sparse `(term id, count)` pairs sorted by id.
pub type BagOfWords = Vec<(usize, u32)>;

/// Corpus-wide token to id mapping. Ids are dense and first-seen.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dictionary {
    term_dict: HashMap<String, usize>,
    inverse_term_dict: Vec<String>,
}

impl Dictionary {
    pub fn build<D, T>(tokenized_docs: D) -> Self
    where
        D: IntoIterator<Item = T>,
        T: AsRef<[String]>,
    {
        let mut dictionary = Self::default();
        for doc in tokenized_docs {
            for token in doc.as_ref() {
                if !dictionary.term_dict.contains_key(token) {
                    dictionary.term_dict.insert(token.clone(), dictionary.inverse_term_dict.len());
                    dictionary.inverse_term_dict.push(token.clone());
                }
            }
        }
        tracing::debug!(terms = dictionary.len(), "dictionary built");
        dictionary
    }

    pub fn len(&self) -> usize {
        self.inverse_term_dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inverse_term_dict.is_empty()
    }

    pub fn id(&self, token: &str) -> Option<usize> {
        self.term_dict.get(token).copied()
    }

    pub fn token(&self, id: usize) -> Option<&str> {
        self.inverse_term_dict.get(id).map(String::as_str)
    }

    /// Counts `tokens` by dictionary id. Unknown tokens are dropped.
    pub fn doc2bow(&self, tokens: &[String]) -> BagOfWords {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        for token in tokens {
            if let Some(id) = self.id(token) {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        counts.into_iter().collect()
    }
}

pub fn build_dictionary(tokenized_docs: &[Vec<String>]) -> Dictionary {
    Dictionary::build(tokenized_docs)
}

pub fn to_bag_of_words(tokens: &[String], dictionary: &Dictionary) -> BagOfWords {
    dictionary.doc2bow(tokens)
}
