use nalgebra::DMatrix;
use nalgebra_sparse::{CooMatrix, CsrMatrix};

use crate::error::{Error, Result};
use crate::preprocessing::vocabulary::BagOfWords;

/// Raw-count term-by-document matrix: rows are term ids, columns documents.
#[derive(Debug, Clone)]
pub struct TermDocumentMatrix {
    csr: CsrMatrix<f64>,
}

impl TermDocumentMatrix {
    /// Fails with `DegenerateCorpus` when there is no term or no nonzero count.
    pub fn build(corpus: &[BagOfWords], vocabulary_size: usize) -> Result<Self> {
        let degenerate = Error::DegenerateCorpus {
            documents: corpus.len(),
            vocabulary: vocabulary_size,
        };
        if corpus.is_empty() || vocabulary_size == 0 {
            return Err(degenerate);
        }

        let mut coo = CooMatrix::new(vocabulary_size, corpus.len());
        let mut nnz = 0;
        for (doc_idx, bow) in corpus.iter().enumerate() {
            for &(term_idx, count) in bow {
                if term_idx < vocabulary_size && count > 0 {
                    coo.push(term_idx, doc_idx, count as f64);
                    nnz += 1;
                }
            }
        }
        if nnz == 0 {
            return Err(degenerate);
        }

        Ok(Self {
            csr: CsrMatrix::from(&coo),
        })
    }

    pub fn nrows(&self) -> usize {
        self.csr.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.csr.ncols()
    }

    pub fn nnz(&self) -> usize {
        self.csr.nnz()
    }

    pub fn to_dense(&self) -> DMatrix<f64> {
        let mut dense = DMatrix::zeros(self.nrows(), self.ncols());
        for (i, j, &v) in self.csr.triplet_iter() {
            dense[(i, j)] += v;
        }
        dense
    }

    /// `result = A v`
    pub fn mul_vec(&self, v: &[f64], result: &mut [f64]) {
        for i in 0..result.len() {
            let row = self.csr.row(i);
            result[i] = row
                .col_indices()
                .iter()
                .zip(row.values())
                .map(|(&j, &val)| val * v[j])
                .sum();
        }
    }

    /// `result = Aᵀ v`
    pub fn transpose_mul_vec(&self, v: &[f64], result: &mut [f64]) {
        result.fill(0.0);
        for i in 0..self.nrows() {
            let row = self.csr.row(i);
            for (&j, &val) in row.col_indices().iter().zip(row.values()) {
                result[j] += val * v[i];
            }
        }
    }
}
