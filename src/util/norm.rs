use nalgebra::DVector;

/// Norms at or below this count as zero.
const ZERO_NORM: f64 = 1e-12;
/// Cosines this close to zero are round-off from the decomposition.
const ZERO_COSINE: f64 = 1e-10;

/// Unit vector in the direction of `v`; zero vectors stay zero.
pub fn normalize(v: &DVector<f64>) -> DVector<f64> {
    let norm = v.norm();
    if norm > ZERO_NORM {
        v / norm
    } else {
        DVector::zeros(v.len())
    }
}

/// Cosine similarity clamped to `[-1, 1]`. Zero against anything is 0, and
/// so is any cosine within `ZERO_COSINE` of it.
pub fn cosine_similarity(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    let norm_a = a.norm();
    let norm_b = b.norm();
    if norm_a <= ZERO_NORM || norm_b <= ZERO_NORM || a.len() != b.len() {
        return 0.0;
    }
    let cosine = a.dot(b) / (norm_a * norm_b);
    if cosine.abs() <= ZERO_COSINE {
        0.0
    } else {
        cosine.clamp(-1.0, 1.0)
    }
}
