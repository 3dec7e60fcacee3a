// src/tensor/create.rs

use crate::error::GradMatchError;
use crate::random::RandomContext;
use crate::tensor::Tensor;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Creates a new tensor filled with zeros with the specified shape.
pub fn zeros(shape: &[usize]) -> Result<Tensor, GradMatchError> {
    full(shape, 0.0)
}

/// Creates a new tensor filled with ones with the specified shape.
pub fn ones(shape: &[usize]) -> Result<Tensor, GradMatchError> {
    full(shape, 1.0)
}

/// Creates a new tensor filled with `value` with the specified shape.
pub fn full(shape: &[usize], value: f32) -> Result<Tensor, GradMatchError> {
    let numel: usize = shape.iter().product();
    Tensor::new(vec![value; numel], shape.to_vec())
}

/// Creates a tensor from row-major `data_vec`; same as [`Tensor::new`].
pub fn from_vec_f32(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Tensor, GradMatchError> {
    Tensor::new(data_vec, shape)
}

/// Zeros with the shape of `tensor`.
pub fn zeros_like(tensor: &Tensor) -> Result<Tensor, GradMatchError> {
    zeros(&tensor.shape())
}

/// Ones with the shape of `tensor`.
pub fn ones_like(tensor: &Tensor) -> Result<Tensor, GradMatchError> {
    ones(&tensor.shape())
}

/// Uniform samples in `[0, 1)`.
pub fn rand(ctx: &mut RandomContext, shape: &[usize]) -> Result<Tensor, GradMatchError> {
    let numel: usize = shape.iter().product();
    let rng = ctx.rng_mut();
    let data_vec: Vec<f32> = (0..numel).map(|_| rng.gen::<f32>()).collect();
    Tensor::new(data_vec, shape.to_vec())
}

/// Standard normal samples, drawn in row-major order from `ctx`.
pub fn randn(ctx: &mut RandomContext, shape: &[usize]) -> Result<Tensor, GradMatchError> {
    let numel: usize = shape.iter().product();
    let rng = ctx.rng_mut();
    let data_vec: Vec<f32> = (0..numel).map(|_| StandardNormal.sample(&mut *rng)).collect();
    Tensor::new(data_vec, shape.to_vec())
}

#[cfg(test)]
#[path = "create_test.rs"]
mod tests;
