//! Cosine similarity.

use vector_types::VectorStoreError;

/// Cosine similarity between two vectors, in [-1, 1].
///
/// A zero-norm input yields exactly `0.0`: the zero vector has no
/// direction, so "no meaningful relationship" is the defined answer
/// rather than a division error.
pub fn cosine(a: &[f32], b: &[f32]) -> Result<f32, VectorStoreError> {
    if a.len() != b.len() {
        return Err(VectorStoreError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a.sqrt() * norm_b.sqrt()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_identical_vectors_score_one() {
        let v = vec![0.3, -1.2, 4.5, 0.7];
        let score = cosine(&v, &v).unwrap();
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn test_opposite_vectors_score_minus_one() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-1.0, -2.0, -3.0];
        let score = cosine(&a, &b).unwrap();
        assert!((score + 1.0).abs() < EPS);
    }

    #[test]
    fn test_orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0];
        let b = vec![0.0, 1.0];
        let score = cosine(&a, &b).unwrap();
        assert!(score.abs() < EPS);
    }

    #[test]
    fn test_zero_vector_scores_zero() {
        let zero = vec![0.0, 0.0, 0.0];
        let other = vec![1.0, 2.0, 3.0];
        assert_eq!(cosine(&zero, &other).unwrap(), 0.0);
        assert_eq!(cosine(&other, &zero).unwrap(), 0.0);
        assert_eq!(cosine(&zero, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_magnitude_independence() {
        let a = vec![1.0, 1.0];
        let b = vec![100.0, 100.0];
        let score = cosine(&a, &b).unwrap();
        assert!((score - 1.0).abs() < EPS);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![1.0, 2.0];
        let b = vec![1.0, 2.0, 3.0];
        assert!(matches!(
            cosine(&a, &b),
            Err(VectorStoreError::DimensionMismatch {
                expected: 2,
                actual: 3
            })
        ));
    }
}
