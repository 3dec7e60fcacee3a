//! # Autograd
//!
//! Reverse-mode automatic differentiation over the graph recorded by the
//! operations in [`crate::ops`].
//!
//! - [`BackwardOp`]: the per-operation chain-rule node stored in `grad_fn`.
//! - [`graph`]: topological ordering and the backward traversal itself.
//! - [`GradAccumulation`]: how a backward pass writes into leaf accumulators.

pub mod backward_op;
pub mod graph;

pub use backward_op::BackwardOp;

/// How a backward pass writes a computed gradient into a leaf's `grad` slot.
///
/// Gradient slots are additive by default, so two independent backward passes
/// over the same leaves sum their results. `Overwrite` makes the slot hold only
/// the result of the current pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GradAccumulation {
    /// `grad = grad + new` (or `new` when the slot is empty).
    #[default]
    Accumulate,
    /// `grad = new`, discarding any previous value.
    Overwrite,
}
