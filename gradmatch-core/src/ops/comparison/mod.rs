//! # Comparison Operations
//!
//! Element-wise comparisons between tensors. These never take part in autograd.

pub mod allclose;

pub use allclose::allclose_op;
