//! Tuning constants and the runtime configuration of an indexing session.
//!
//! The constants are compile-time defaults; the binary overrides the
//! `SearchConfig` fields from its command-line flags.

use serde::{Deserialize, Serialize};

/// Number of latent topics requested from the decomposition.
///
/// The effective rank is clamped to `min(documents, vocabulary)`.
pub const DEFAULT_NUM_TOPICS: usize = 10;

/// Singular values at or below this are treated as zero and dropped.
pub const SINGULAR_VALUE_TOLERANCE: f64 = 1e-9;

/// Convergence threshold passed to the dense SVD.
pub const SVD_EPSILON: f64 = 1e-12;

/// Iteration cap for the dense SVD; 0 would mean "unbounded" to nalgebra.
pub const SVD_MAX_ITERATIONS: usize = 10_000;

/// Upper bound on Lanczos steps.
pub const LANCZOS_MAX_STEPS: usize = 200;

/// Seed for the Lanczos start vector, so two fits of one corpus agree.
pub const LANCZOS_SEED: u64 = 0x5eed_1a5e;

/// Which token stream feeds the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexTerms {
    /// Raw lower-cased tokens.
    #[default]
    Tokens,
    /// Lovins stems of the tokens. Queries are stemmed too.
    Stems,
}

/// How per-document word counts are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountMode {
    /// Occurrences of each token in the token sequence.
    #[default]
    WholeWord,
    /// Non-overlapping substring occurrences in the lower-cased text.
    /// Over-counts tokens contained in longer tokens.
    Substring,
}

/// Decomposition routine used to fit the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SvdSolver {
    /// Full dense SVD of the term-document matrix.
    #[default]
    Dense,
    /// Lanczos iteration on the smaller Gram matrix of the sparse matrix.
    Lanczos,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LsiConfig {
    pub num_topics: usize,
    pub solver: SvdSolver,
    /// Divide projections by the singular values (`Σ⁻¹ Uᵀ x`).
    pub scaled: bool,
}

impl Default for LsiConfig {
    fn default() -> Self {
        Self {
            num_topics: DEFAULT_NUM_TOPICS,
            solver: SvdSolver::default(),
            scaled: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    pub lsi: LsiConfig,
    pub terms: IndexTerms,
    pub count_mode: CountMode,
}
