use crate::error::GradMatchError;
use crate::tensor::Tensor;
use std::fmt::Debug;

/// Defines the interface for the backward pass of a differentiable tensor operation.
///
/// Any operation that creates a non-leaf `Tensor` stores an implementation of this
/// trait in the output's `grad_fn`. The engine calls it during `backward()` to
/// propagate gradients according to the chain rule.
pub trait BackwardOp: Debug + Send + Sync {
    /// Computes dL/dInput_i for every input, given dL/dOutput (`grad_output`).
    ///
    /// The returned `Vec` **must** follow the order of [`BackwardOp::inputs`], and each
    /// gradient must have the shape of its input. `grad_output` never requires grad,
    /// so implementations must not record new graph while computing.
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradMatchError>;

    /// The input tensors that participated in the forward operation.
    ///
    /// Holding the handles keeps every upstream node alive for as long as the
    /// output exists.
    fn inputs(&self) -> Vec<Tensor>;

    /// Short operation name, used for display (`grad_fn=<MulBackward>`).
    fn name(&self) -> &'static str;
}
