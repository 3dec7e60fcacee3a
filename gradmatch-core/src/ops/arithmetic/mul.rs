use crate::autograd::BackwardOp;
use crate::error::GradMatchError;
use crate::ops::arithmetic::broadcast_binary_kernel;
use crate::tensor::Tensor;
use std::sync::Arc;

// --- Backward Operation Structure ---

/// Backward context for `a * b`.
#[derive(Debug)]
struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradMatchError> {
        // Detached operands keep the gradient computation itself out of the graph.
        // grad_a = grad_output * b
        let grad_a = mul_op(grad_output, &self.b.detach())?.reduce_to_shape(&self.a.shape())?;
        // grad_b = grad_output * a
        let grad_b = mul_op(grad_output, &self.a.detach())?.reduce_to_shape(&self.b.shape())?;
        Ok(vec![grad_a, grad_b])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn name(&self) -> &'static str {
        "MulBackward"
    }
}

// --- Forward Operation ---

/// Element-wise (Hadamard) product with broadcasting.
pub fn mul_op(a: &Tensor, b: &Tensor) -> Result<Tensor, GradMatchError> {
    let (data, output_shape) = broadcast_binary_kernel(a, b, |x, y| x * y)?;
    let result = Tensor::new(data, output_shape)?;

    if a.requires_grad() || b.requires_grad() {
        result.set_grad_fn(Arc::new(MulBackward {
            a: a.clone(),
            b: b.clone(),
        }));
    }
    Ok(result)
}

#[cfg(test)]
#[path = "mul_test.rs"]
mod tests;
