use crate::autograd::graph::run_backward;
use crate::autograd::{BackwardOp, GradAccumulation};
use crate::error::GradMatchError;
use crate::ops::arithmetic::add_op;
use crate::tensor::create::{ones, zeros};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

impl Tensor {
    /// Checks if this tensor requires gradient computation.
    pub fn requires_grad(&self) -> bool {
        self.read_data().requires_grad
    }

    /// Sets the `requires_grad` flag **in-place**. Only allowed on leaf tensors.
    pub fn requires_grad_(&self, requires_grad: bool) -> Result<(), GradMatchError> {
        let mut guard = self.write_data();
        if guard.grad_fn.is_some() {
            return Err(GradMatchError::RequiresGradOnNonLeaf);
        }
        guard.requires_grad = requires_grad;
        Ok(())
    }

    /// A leaf is a tensor that was not produced by a recorded operation.
    pub fn is_leaf(&self) -> bool {
        self.read_data().grad_fn.is_none()
    }

    /// Returns a handle to the accumulated gradient, if any.
    pub fn grad(&self) -> Option<Tensor> {
        self.read_data().grad.clone()
    }

    /// Returns the backward node that produced this tensor.
    pub fn grad_fn(&self) -> Option<Arc<dyn BackwardOp>> {
        self.read_data().grad_fn.clone()
    }

    /// Marks this tensor as the output of `grad_fn`, making it a non-leaf that requires grad.
    pub(crate) fn set_grad_fn(&self, grad_fn: Arc<dyn BackwardOp>) {
        let mut guard = self.write_data();
        guard.requires_grad = true;
        guard.grad_fn = Some(grad_fn);
    }

    /// Creates a new tensor that shares the same buffer but is detached from the graph.
    pub fn detach(&self) -> Tensor {
        let guard = self.read_data();
        Tensor::from_data(TensorData::from_shared(
            Arc::clone(&guard.buffer),
            guard.shape.clone(),
        ))
    }

    /// Copies the elements into a fresh buffer. The copy is a leaf without grad tracking.
    pub fn deep_clone(&self) -> Result<Tensor, GradMatchError> {
        Tensor::new(self.get_f32_data()?, self.shape())
    }

    /// Computes the gradient of this one-element tensor w.r.t. the graph leaves,
    /// seeding with 1 and accumulating into the leaves' `grad` slots.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require grad.
    /// * `BackwardNonScalar` if it holds more than one element.
    pub fn backward(&self) -> Result<(), GradMatchError> {
        self.backward_with(None, GradAccumulation::Accumulate)
    }

    /// Backward pass with an explicit seed gradient and accumulation mode.
    ///
    /// `gradient` is dL/dself and must have this tensor's shape; `None` seeds with
    /// ones and is only valid for one-element tensors. When called on a leaf the seed
    /// itself is written into the leaf's accumulator.
    ///
    /// # Errors
    /// * `RequiresGradNotMet` if this tensor does not require grad.
    /// * `ShapeMismatch` if `gradient` does not match this tensor's shape.
    /// * `BackwardNonScalar` if `gradient` is `None` and this tensor is not scalar-like.
    pub fn backward_with(
        &self,
        gradient: Option<Tensor>,
        mode: GradAccumulation,
    ) -> Result<(), GradMatchError> {
        if !self.requires_grad() {
            log::debug!("backward called on a tensor that does not require grad");
            return Err(GradMatchError::RequiresGradNotMet);
        }
        let shape = self.shape();
        let seed = match gradient {
            Some(g) => {
                if g.shape() != shape {
                    return Err(GradMatchError::ShapeMismatch {
                        expected: shape,
                        actual: g.shape(),
                        operation: "backward".to_string(),
                    });
                }
                g.detach()
            }
            None => {
                if self.numel() != 1 {
                    return Err(GradMatchError::BackwardNonScalar);
                }
                ones(&shape)?
            }
        };
        run_backward(self, seed, mode)
    }

    /// Writes `grad` into this tensor's accumulator following `mode`.
    pub(crate) fn accumulate_grad(
        &self,
        grad: Tensor,
        mode: GradAccumulation,
    ) -> Result<(), GradMatchError> {
        let expected = self.shape();
        if grad.shape() != expected {
            return Err(GradMatchError::GradientAccumulationShapeMismatch {
                expected,
                actual: grad.shape(),
            });
        }
        let new_grad = match (mode, self.grad()) {
            (GradAccumulation::Accumulate, Some(existing)) => add_op(&existing, &grad)?,
            _ => grad.detach(),
        };
        self.write_data().grad = Some(new_grad);
        Ok(())
    }

    /// Resets the accumulator to an all-zeros tensor of this tensor's shape.
    ///
    /// No-op for tensors that do not require grad.
    pub fn zero_grad(&self) -> Result<(), GradMatchError> {
        if !self.requires_grad() {
            return Ok(());
        }
        let cleared = zeros(&self.shape())?;
        self.write_data().grad = Some(cleared);
        Ok(())
    }

    /// Drops the accumulated gradient, leaving the slot empty.
    pub fn clear_grad(&self) {
        self.write_data().grad = None;
    }
}

#[cfg(test)]
#[path = "autograd_methods_test.rs"]
mod tests;
