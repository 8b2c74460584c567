//! Cosine similarity between two position-aligned rating vectors.

/// Cosine similarity of `a` and `b`: `dot(a, b) / (|a| * |b|)`.
///
/// Position `k` of both slices must refer to the same movie. Returns `None`
/// when the similarity is undefined: slices of different or zero length,
/// a zero-norm vector, or a non-finite quotient. Callers treat `None` as
/// "not a neighbour".
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let (dot, norm_a_sq, norm_b_sq) = a.iter().zip(b).fold(
        (0.0_f64, 0.0_f64, 0.0_f64),
        |(dot, na, nb), (&x, &y)| (dot + x * y, na + x * x, nb + y * y),
    );

    let denominator = norm_a_sq.sqrt() * norm_b_sq.sqrt();
    if denominator == 0.0 {
        return None;
    }

    let similarity = dot / denominator;
    similarity.is_finite().then_some(similarity)
}

/// Strict threshold check used for neighbour selection
pub fn exceeds_threshold(similarity: f64, threshold: f64) -> bool {
    similarity > threshold
}
