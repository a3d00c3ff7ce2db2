use thiserror::Error;

/// Which argument of [`cosine_similarity`] violated a precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    #[error("{0:?} vector has zero norm")]
    ZeroVector(Operand),

    #[error("vector dimensions differ: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Compute cosine similarity between two embedding vectors.
///
/// Returns a value in [-1.0, 1.0] where 1.0 means identical direction.
/// A zero-norm vector has no direction, so it is rejected rather than
/// scored; callers decide how to surface it. The zero-norm check runs
/// before the length check.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    let norm_a = squared_norm(a);
    if norm_a == 0.0 {
        return Err(SimilarityError::ZeroVector(Operand::Left));
    }
    let norm_b = squared_norm(b);
    if norm_b == 0.0 {
        return Err(SimilarityError::ZeroVector(Operand::Right));
    }

    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let dot = a
        .iter()
        .zip(b.iter())
        .fold(0.0_f64, |acc, (&x, &y)| (x as f64).mul_add(y as f64, acc));

    // Rounding can push |cos| a hair past 1.0 for parallel vectors.
    Ok((dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0) as f32)
}

fn squared_norm(v: &[f32]) -> f64 {
    v.iter().fold(0.0_f64, |acc, &x| {
        let x = x as f64;
        x.mul_add(x, acc)
    })
}
