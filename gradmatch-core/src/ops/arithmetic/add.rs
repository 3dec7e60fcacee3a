// gradmatch-core/src/ops/arithmetic/add.rs

use crate::autograd::BackwardOp;
use crate::error::GradMatchError;
use crate::ops::arithmetic::broadcast_binary_kernel;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation ---

/// Backward context for `a + b`.
///
/// d(a + b)/da = d(a + b)/db = 1, so the upstream gradient passes through,
/// summed over any broadcast dimensions.
#[derive(Debug)]
struct AddBackward {
    a: Tensor,
    b: Tensor,
    a_shape: Vec<usize>,
    b_shape: Vec<usize>,
}

impl BackwardOp for AddBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradMatchError> {
        let grad_a = grad_output.reduce_to_shape(&self.a_shape)?;
        let grad_b = grad_output.reduce_to_shape(&self.b_shape)?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "AddBackward"
    }
}

// --- Forward Operation ---

/// Performs element-wise addition of two tensors with broadcasting.
///
/// # Errors
/// `BroadcastError` if the shapes are not broadcast-compatible.
pub fn add_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradMatchError> {
    let (data, output_shape) = broadcast_binary_kernel(a, b, |x, y| x + y)?;
    let result = Tensor::new(data, output_shape)?;

    if a.requires_grad() || b.requires_grad() {
        result.set_grad_fn(Arc::new(AddBackward {
            a: a.clone(),
            b: b.clone(),
            a_shape: a.shape(),
            b_shape: b.shape(),
        }));
    }
    Ok(result)
}

#[cfg(test)]
#[path = "add_test.rs"]
mod tests;
