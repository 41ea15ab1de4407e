use std::time::Instant;

use nalgebra::{DMatrix, DVector, SVD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{
    LANCZOS_MAX_STEPS, LANCZOS_SEED, SINGULAR_VALUE_TOLERANCE, SVD_EPSILON, SVD_MAX_ITERATIONS,
    SvdSolver,
};
use crate::error::{Error, Result};
use crate::matrix::TermDocumentMatrix;

const RESTART_ATTEMPTS: usize = 3;
/// A restart vector shorter than this after projection lies in the basis.
const RESTART_MIN_NORM: f64 = 1e-8;

/// Truncated factorization `A ≈ U diag(sigma) Vᵀ`.
#[derive(Debug, Clone)]
pub struct Svd {
    /// `nrows x k`
    pub u: DMatrix<f64>,
    /// Descending, all strictly positive.
    pub sigma: Vec<f64>,
    /// `k x ncols`
    pub vt: DMatrix<f64>,
}

impl Svd {
    pub fn rank(&self) -> usize {
        self.sigma.len()
    }

    /// Keeps the `k` largest triplets whose value is not negligible and flips
    /// each pair so the largest-magnitude entry of the `U` column is positive.
    fn finish(u: &DMatrix<f64>, sigma: &[f64], vt: &DMatrix<f64>, k: usize) -> Result<Self> {
        let mut order: Vec<usize> = (0..sigma.len()).collect();
        order.sort_by(|&a, &b| sigma[b].total_cmp(&sigma[a]));

        let largest = order.first().map(|&i| sigma[i]).unwrap_or(0.0);
        let kept: Vec<usize> = order
            .into_iter()
            .take(k)
            .filter(|&i| sigma[i] > SINGULAR_VALUE_TOLERANCE * largest.max(1.0))
            .collect();
        if kept.is_empty() {
            return Err(Error::Decomposition("no significant singular values".into()));
        }

        let mut out_u = DMatrix::zeros(u.nrows(), kept.len());
        let mut out_vt = DMatrix::zeros(kept.len(), vt.ncols());
        let mut out_sigma = Vec::with_capacity(kept.len());
        for (col, &idx) in kept.iter().enumerate() {
            let mut u_col = u.column(idx).clone_owned();
            let mut v_row = vt.row(idx).clone_owned();
            let pivot = u_col.iter().copied().fold(0.0_f64, |acc, x| {
                if x.abs() > acc.abs() { x } else { acc }
            });
            if pivot < 0.0 {
                u_col.neg_mut();
                v_row.neg_mut();
            }
            out_u.set_column(col, &u_col);
            out_vt.set_row(col, &v_row);
            out_sigma.push(sigma[idx]);
        }

        Ok(Self {
            u: out_u,
            sigma: out_sigma,
            vt: out_vt,
        })
    }
}

pub fn truncated_svd(matrix: &TermDocumentMatrix, k: usize, solver: SvdSolver) -> Result<Svd> {
    let start = Instant::now();
    let svd = match solver {
        SvdSolver::Dense => dense_svd(matrix, k)?,
        SvdSolver::Lanczos => lanczos_svd(matrix, k, LANCZOS_MAX_STEPS, SVD_EPSILON, LANCZOS_SEED)?,
    };
    tracing::debug!(?solver, rank = svd.rank(), elapsed = ?start.elapsed(), "SVD computed");
    Ok(svd)
}

pub fn dense_svd(matrix: &TermDocumentMatrix, k: usize) -> Result<Svd> {
    let dense = matrix.to_dense();
    let svd = SVD::try_new(dense, true, true, SVD_EPSILON, SVD_MAX_ITERATIONS)
        .ok_or_else(|| Error::Decomposition("dense SVD did not converge".into()))?;

    let u = svd
        .u
        .ok_or_else(|| Error::Decomposition("SVD returned no left vectors".into()))?;
    let vt = svd
        .v_t
        .ok_or_else(|| Error::Decomposition("SVD returned no right vectors".into()))?;
    let sigma: Vec<f64> = svd.singular_values.iter().copied().collect();

    Svd::finish(&u, &sigma, &vt, k)
}

/// Lanczos tridiagonalization of `AᵀA` (or `AAᵀ`, whichever is smaller) with
/// full reorthogonalization. The start vector comes from `seed`.
pub fn lanczos_svd(
    matrix: &TermDocumentMatrix,
    k: usize,
    max_steps: usize,
    tolerance: f64,
    seed: u64,
) -> Result<Svd> {
    sparse_svd(
        |v, out| matrix.mul_vec(v, out),
        |v, out| matrix.transpose_mul_vec(v, out),
        matrix.nrows(),
        matrix.ncols(),
        k,
        max_steps,
        tolerance,
        seed,
    )
}

#[allow(clippy::too_many_arguments)]
fn sparse_svd<F1, F2>(
    matrix_op: F1,
    transpose_op: F2,
    nrows: usize,
    ncols: usize,
    k: usize,
    max_steps: usize,
    tolerance: f64,
    seed: u64,
) -> Result<Svd>
where
    F1: Fn(&[f64], &mut [f64]),
    F2: Fn(&[f64], &mut [f64]),
{
    let work_on_at_a = ncols <= nrows;
    let working_dim = if work_on_at_a { ncols } else { nrows };
    let k = k.min(working_dim);
    if k == 0 {
        return Err(Error::Decomposition("empty matrix".into()));
    }

    let mut m = (2 * k).max(k + 10).min(working_dim).min(max_steps.max(k));
    tracing::debug!(k, working_dim, steps = m, "starting Lanczos");

    let mut q = vec![DVector::zeros(working_dim); m + 1];
    let mut alpha = vec![0.0; m];
    let mut beta = vec![0.0; m + 1];

    let mut rng = StdRng::seed_from_u64(seed);
    for i in 0..working_dim {
        q[0][i] = rng.random::<f64>() - 0.5;
    }
    q[0].normalize_mut();

    let mut temp_rows = vec![0.0; nrows];
    let mut temp_cols = vec![0.0; ncols];

    for i in 0..m {
        let mut v = if work_on_at_a {
            matrix_op(q[i].as_slice(), &mut temp_rows);
            let mut result = vec![0.0; ncols];
            transpose_op(&temp_rows, &mut result);
            DVector::from_vec(result)
        } else {
            transpose_op(q[i].as_slice(), &mut temp_cols);
            let mut result = vec![0.0; nrows];
            matrix_op(&temp_cols, &mut result);
            DVector::from_vec(result)
        };

        alpha[i] = v.dot(&q[i]);
        v.axpy(-alpha[i], &q[i], 1.0);
        if i > 0 {
            v.axpy(-beta[i], &q[i - 1], 1.0);
        }

        // Full reorthogonalization, twice.
        for _ in 0..2 {
            for j in 0..=i {
                let dot = v.dot(&q[j]);
                v.axpy(-dot, &q[j], 1.0);
            }
        }

        beta[i + 1] = v.norm();
        if beta[i + 1].is_finite() && beta[i + 1] >= tolerance {
            q[i + 1] = v / beta[i + 1];
            continue;
        }
        if i + 1 == m {
            break;
        }

        // Invariant subspace found. Restart from a fresh vector orthogonal to
        // the basis so repeated singular values are still separated.
        beta[i + 1] = 0.0;
        match restart_vector(&q[..=i], &mut rng, tolerance) {
            Some(next) => {
                tracing::debug!(step = i, "Lanczos restarted");
                q[i + 1] = next;
            }
            None => {
                tracing::debug!(step = i, "Lanczos basis exhausted");
                m = i + 1;
                break;
            }
        }
    }

    let mut t = DMatrix::zeros(m, m);
    for i in 0..m {
        t[(i, i)] = alpha[i];
        if i > 0 {
            t[(i, i - 1)] = beta[i];
            t[(i - 1, i)] = beta[i];
        }
    }
    let eig = t.symmetric_eigen();

    // Ritz values from restarted null-space directions are round-off;
    // squaring puts them near eps relative to the largest eigenvalue.
    let lambda_max = eig.eigenvalues.iter().copied().fold(0.0_f64, f64::max);
    let sigma: Vec<f64> = eig
        .eigenvalues
        .iter()
        .map(|&lambda| {
            if lambda > lambda_max * SVD_EPSILON {
                lambda.sqrt()
            } else {
                0.0
            }
        })
        .collect();

    let mut u = DMatrix::zeros(nrows, m);
    let mut vt = DMatrix::zeros(m, ncols);
    for idx in 0..m {
        let theta = eig.eigenvectors.column(idx);
        let mut ritz = DVector::zeros(working_dim);
        for l in 0..m {
            ritz.axpy(theta[l], &q[l], 1.0);
        }

        let (u_col, v_col) = if work_on_at_a {
            let mut u_col = DVector::zeros(nrows);
            matrix_op(ritz.as_slice(), u_col.as_mut_slice());
            (u_col, ritz)
        } else {
            let mut v_col = DVector::zeros(ncols);
            transpose_op(ritz.as_slice(), v_col.as_mut_slice());
            (ritz, v_col)
        };
        let (u_col, v_col) = if sigma[idx] > tolerance {
            if work_on_at_a {
                (u_col / sigma[idx], v_col)
            } else {
                (u_col, v_col / sigma[idx])
            }
        } else {
            (DVector::zeros(nrows), DVector::zeros(ncols))
        };

        u.set_column(idx, &u_col);
        vt.set_row(idx, &v_col.transpose());
    }

    let svd = Svd::finish(&u, &sigma, &vt, k)?;
    Ok(Svd {
        u: orthonormalize_columns(svd.u),
        sigma: svd.sigma,
        vt: orthonormalize_columns(svd.vt.transpose()).transpose(),
    })
}

/// Random unit vector orthogonal to `basis`, or `None` once the basis spans
/// the whole space.
fn restart_vector(
    basis: &[DVector<f64>],
    rng: &mut StdRng,
    tolerance: f64,
) -> Option<DVector<f64>> {
    let dim = basis.first()?.len();
    for _ in 0..RESTART_ATTEMPTS {
        let mut v = DVector::from_fn(dim, |_, _| rng.random::<f64>() - 0.5);
        for _ in 0..2 {
            for q in basis {
                let dot = v.dot(q);
                v.axpy(-dot, q, 1.0);
            }
        }
        let norm = v.norm();
        if norm.is_finite() && norm >= tolerance.max(RESTART_MIN_NORM) {
            return Some(v / norm);
        }
    }
    None
}

/// Modified Gram-Schmidt on the columns.
fn orthonormalize_columns(mut m: DMatrix<f64>) -> DMatrix<f64> {
    for i in 0..m.ncols() {
        let mut current = m.column(i).clone_owned();
        for j in 0..i {
            let dot = current.dot(&m.column(j));
            current.axpy(-dot, &m.column(j).clone_owned(), 1.0);
        }
        let norm = current.norm().max(1e-10);
        current /= norm;
        m.set_column(i, &current);
    }
    m
}
