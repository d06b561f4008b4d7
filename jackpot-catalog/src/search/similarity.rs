//! Cosine similarity over sparse vectors.

use super::SparseVector;

/// Cosine similarity between two sparse vectors.
/// Returns 0.0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter_map(|(id, x)| large.get(id).map(|y| x * y))
        .sum();
    let mag_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let mag_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
    let denom = mag_a * mag_b;
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v: SparseVector = [(0, 0.6), (3, 0.8)].into_iter().collect();
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_vectors_have_similarity_zero() {
        let a: SparseVector = [(0, 1.0)].into_iter().collect();
        let b: SparseVector = [(1, 1.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }

    #[test]
    fn empty_vector_has_similarity_zero() {
        let a = SparseVector::new();
        let b: SparseVector = [(1, 1.0)].into_iter().collect();
        assert_eq!(cosine_similarity(&a, &b), 0.0);
    }
}
