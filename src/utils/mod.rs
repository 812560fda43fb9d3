//! Small vector and weight helpers shared by the kernels

use crate::core::{KernelError, Point3, Result};

/// Component-wise difference `a - b`
#[inline]
pub fn sub(a: &Point3, b: &Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Dot product of two 3-vectors
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Squared Euclidean distance between two points
#[inline]
pub fn distance_squared(a: &Point3, b: &Point3) -> f64 {
    let v = sub(a, b);
    dot(&v, &v)
}

/// Divide every weight by `sum`
///
/// An empty slice is left untouched. A zero sum over a non-empty slice cannot
/// be normalized and is reported as `ZeroWeightSum`; an infinite or NaN sum
/// is reported as `NonFiniteWeightSum`.
pub fn normalize_weights(weights: &mut [f64], sum: f64) -> Result<()> {
    if weights.is_empty() {
        return Ok(());
    }
    if sum == 0.0 {
        return Err(KernelError::ZeroWeightSum {
            count: weights.len(),
        });
    }
    if !sum.is_finite() {
        return Err(KernelError::NonFiniteWeightSum {
            count: weights.len(),
        });
    }
    for w in weights.iter_mut() {
        *w /= sum;
    }
    Ok(())
}
