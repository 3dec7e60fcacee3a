use crate::error::GradMatchError;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::ops::comparison::allclose::{allclose_op, DEFAULT_ATOL, DEFAULT_RTOL};
use crate::ops::reduction::sum_op;
use crate::tensor::Tensor;

impl Tensor {
    /// Element-wise `self + other` with broadcasting.
    pub fn add(&self, other: &Tensor) -> Result<Tensor, GradMatchError> {
        add_op(self, other)
    }

    /// Element-wise `self * other` with broadcasting.
    pub fn mul(&self, other: &Tensor) -> Result<Tensor, GradMatchError> {
        mul_op(self, other)
    }

    /// Sum of all elements, as a tensor of shape `[]`.
    pub fn sum(&self) -> Result<Tensor, GradMatchError> {
        sum_op(self, None, false)
    }

    pub fn sum_axes(&self, axes: &[usize], keep_dims: bool) -> Result<Tensor, GradMatchError> {
        sum_op(self, Some(axes), keep_dims)
    }

    /// Near-equality with `rtol = 1e-5`, `atol = 1e-8`.
    pub fn allclose(&self, other: &Tensor) -> Result<bool, GradMatchError> {
        allclose_op(self, other, DEFAULT_RTOL, DEFAULT_ATOL)
    }

    pub fn allclose_with(&self, other: &Tensor, rtol: f32, atol: f32) -> Result<bool, GradMatchError> {
        allclose_op(self, other, rtol, atol)
    }
}
