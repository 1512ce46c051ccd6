//! Embedding-vector similarity.

/// Cosine similarity between two dense vectors.
///
/// Returns a value in `[-1.0, 1.0]`. Degenerate inputs (length mismatch or
/// a zero-norm vector) yield `0.0` rather than an error, so a bad vector
/// never matches anything but also never aborts a run.
///
/// # Examples
///
/// ```
/// use lit_graph_core::similarity::cosine;
///
/// let a = [1.0, 0.0, 0.0];
/// let b = [0.0, 1.0, 0.0];
/// assert_eq!(cosine(&a, &a), 1.0);
/// assert_eq!(cosine(&a, &b), 0.0);
/// ```
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0)
}
