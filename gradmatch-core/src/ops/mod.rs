//! # Tensor Operations Module (`ops`)
//!
//! Each differentiable operation has a core `xxx_op` function that performs the
//! forward computation and, when any input requires grad, attaches a `Backward`
//! struct implementing [`BackwardOp`](crate::autograd::BackwardOp) to its output.
//!
//! - [`arithmetic`]: element-wise add and mul with broadcasting.
//! - [`reduction`]: sum over all or selected axes.
//! - [`comparison`]: near-equality (`allclose`). Not differentiable.

pub mod arithmetic;
pub mod comparison;
pub mod reduction;
