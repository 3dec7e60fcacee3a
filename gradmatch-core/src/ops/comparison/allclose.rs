use crate::error::GradMatchError;
use crate::tensor::Tensor;
use num_traits::Float;
use std::sync::Arc;

/// Default relative tolerance for [`allclose_op`].
pub const DEFAULT_RTOL: f32 = 1e-5;
/// Default absolute tolerance for [`allclose_op`].
pub const DEFAULT_ATOL: f32 = 1e-8;

/// `|a - b| <= atol + rtol * |b|`. NaN is never close to anything, itself included.
/// An infinity is close only to an equal infinity.
///
/// The test is asymmetric in `b`, matching NumPy and PyTorch.
pub fn is_close<T: Float>(a: T, b: T, rtol: T, atol: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    if a == b {
        // Covers equal infinities, where the difference would be NaN.
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= atol + rtol * b.abs()
}

/// Returns `true` if every pair of elements of `a` and `b` is close.
///
/// # Errors
/// `ShapeMismatch` if the shapes differ. No broadcasting is applied.
pub fn allclose_op(a: &Tensor, b: &Tensor, rtol: f32, atol: f32) -> Result<bool, GradMatchError> {
    let (a_buffer, a_shape) = {
        let guard = a.read_data();
        (Arc::clone(&guard.buffer), guard.shape.clone())
    };
    let (b_buffer, b_shape) = {
        let guard = b.read_data();
        (Arc::clone(&guard.buffer), guard.shape.clone())
    };
    if a_shape != b_shape {
        return Err(GradMatchError::ShapeMismatch {
            expected: a_shape,
            actual: b_shape,
            operation: "allclose".to_string(),
        });
    }

    let first_mismatch = a_buffer
        .iter()
        .zip(b_buffer.iter())
        .position(|(&x, &y)| !is_close(x, y, rtol, atol));
    match first_mismatch {
        Some(i) => {
            log::debug!(
                "allclose: first mismatch at flat index {} ({} vs {}, rtol={}, atol={})",
                i,
                a_buffer[i],
                b_buffer[i],
                rtol,
                atol
            );
            Ok(false)
        }
        None => Ok(true),
    }
}

#[cfg(test)]
#[path = "allclose_test.rs"]
mod tests;
