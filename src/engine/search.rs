use nalgebra::DVector;
use serde::Serialize;

use crate::util::norm::{cosine_similarity, normalize};

/// Unit-normalized topic vectors of the indexed documents.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    doc_vectors: Vec<DVector<f64>>,
}

impl SimilarityIndex {
    pub fn new(doc_vectors: &[DVector<f64>]) -> Self {
        Self {
            doc_vectors: doc_vectors.iter().map(normalize).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.doc_vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_vectors.is_empty()
    }

    /// Cosine similarity of `query` against every document, in document order.
    pub fn similarities(&self, query: &DVector<f64>) -> Vec<f64> {
        self.doc_vectors
            .iter()
            .map(|doc| cosine_similarity(query, doc))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scored {
    pub doc: usize,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Relevant {
    /// 1-based position among the relevant documents.
    pub position: usize,
    pub doc: usize,
}

/// Documents by descending similarity; ties keep document order.
pub fn rank(index: &SimilarityIndex, query: &DVector<f64>) -> Vec<Scored> {
    let mut scored: Vec<Scored> = index
        .similarities(query)
        .into_iter()
        .enumerate()
        .map(|(doc, score)| Scored { doc, score })
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored
}

/// Keeps entries scoring strictly above zero, in rank order.
pub fn filter_relevant(ranked: &[Scored]) -> Vec<Relevant> {
    ranked
        .iter()
        .filter(|s| s.score > 0.0)
        .enumerate()
        .map(|(i, s)| Relevant {
            position: i + 1,
            doc: s.doc,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(xs: &[f64]) -> DVector<f64> {
        DVector::from_column_slice(xs)
    }

    fn index() -> SimilarityIndex {
        SimilarityIndex::new(&[v(&[1.0, 0.0]), v(&[0.0, 1.0]), v(&[2.0, 0.0]), v(&[-1.0, 0.0])])
    }

    #[test]
    fn ranks_descending_with_stable_ties() {
        let ranked = rank(&index(), &v(&[1.0, 0.0]));
        let docs: Vec<usize> = ranked.iter().map(|s| s.doc).collect();
        assert_eq!(docs, vec![0, 2, 1, 3]);
        assert!((ranked[0].score - 1.0).abs() < 1e-12);
        assert!((ranked[3].score + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_query_scores_zero_everywhere() {
        let ranked = rank(&index(), &v(&[0.0, 0.0]));
        assert!(ranked.iter().all(|s| s.score == 0.0));
        let docs: Vec<usize> = ranked.iter().map(|s| s.doc).collect();
        assert_eq!(docs, vec![0, 1, 2, 3]);
        assert!(filter_relevant(&ranked).is_empty());
    }

    #[test]
    fn filter_keeps_positive_and_numbers_from_one() {
        let ranked = rank(&index(), &v(&[1.0, 1.0]));
        let relevant = filter_relevant(&ranked);
        assert_eq!(
            relevant,
            vec![
                Relevant { position: 1, doc: 0 },
                Relevant { position: 2, doc: 1 },
                Relevant { position: 3, doc: 2 },
            ]
        );
    }

    #[test]
    fn empty_index() {
        let index = SimilarityIndex::new(&[]);
        assert!(index.is_empty());
        assert!(rank(&index, &v(&[1.0])).is_empty());
    }
}
