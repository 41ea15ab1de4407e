use nalgebra::{DMatrix, DVector};

use crate::config::LsiConfig;
use crate::error::{Error, Result};
use crate::matrix::TermDocumentMatrix;
use crate::preprocessing::vocabulary::BagOfWords;
use crate::util::svd::truncated_svd;

/// A fitted projection from bag-of-words space into topic space.
pub trait LatentSemanticModel {
    fn num_topics(&self) -> usize;

    /// Projects a bag-of-words vector without touching the model. Ids outside
    /// the fitted vocabulary are ignored.
    fn project(&self, bow: &[(usize, u32)]) -> DVector<f64>;

    /// Topic-space vector of every document the model was fit on, in order.
    fn document_vectors(&self) -> &[DVector<f64>];
}

#[derive(Debug, Clone)]
pub struct LsiModel {
    /// `k x vocabulary`: `Σ⁻¹ Uᵀ` when scaled, else `Uᵀ`.
    projection: DMatrix<f64>,
    singular_values: Vec<f64>,
    doc_vectors: Vec<DVector<f64>>,
}

impl LsiModel {
    pub fn fit(corpus: &[BagOfWords], vocabulary_size: usize, config: &LsiConfig) -> Result<Self> {
        let matrix = TermDocumentMatrix::build(corpus, vocabulary_size)?;

        let limit = corpus.len().min(vocabulary_size);
        let requested = config.num_topics.max(1);
        if requested > limit {
            tracing::warn!(requested, limit, "topic count reduced to corpus size");
        }
        let k = requested.min(limit);

        let svd = truncated_svd(&matrix, k, config.solver)?;
        if svd.rank() < k {
            tracing::warn!(requested = k, rank = svd.rank(), "matrix rank below topic count");
        }

        let mut projection = svd.u.transpose();
        if config.scaled {
            for (mut row, &s) in projection.row_iter_mut().zip(&svd.sigma) {
                if s <= 0.0 {
                    return Err(Error::Decomposition(format!("non-positive singular value {s}")));
                }
                row /= s;
            }
        }

        let mut model = Self {
            projection,
            singular_values: svd.sigma,
            doc_vectors: Vec::new(),
        };
        let doc_vectors = corpus.iter().map(|bow| model.project(bow)).collect();
        model.doc_vectors = doc_vectors;

        tracing::info!(
            documents = corpus.len(),
            vocabulary = vocabulary_size,
            nnz = matrix.nnz(),
            topics = model.num_topics(),
            "LSI model fitted"
        );
        Ok(model)
    }

    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    pub fn vocabulary_size(&self) -> usize {
        self.projection.ncols()
    }
}

impl LatentSemanticModel for LsiModel {
    fn num_topics(&self) -> usize {
        self.projection.nrows()
    }

    fn project(&self, bow: &[(usize, u32)]) -> DVector<f64> {
        let mut topics = DVector::zeros(self.num_topics());
        for &(term, count) in bow {
            if term < self.vocabulary_size() {
                topics.axpy(count as f64, &self.projection.column(term), 1.0);
            }
        }
        topics
    }

    fn document_vectors(&self) -> &[DVector<f64>] {
        &self.doc_vectors
    }
}
