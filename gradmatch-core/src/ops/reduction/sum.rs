use crate::autograd::BackwardOp;
use crate::error::GradMatchError;
use crate::tensor::utils::{calculate_strides, index_to_coord};
use crate::tensor::Tensor;
use std::sync::Arc;

/// Backward context for a sum reduction.
///
/// The local gradient of a sum is all ones, so the upstream gradient is
/// broadcast back over the reduced axes.
#[derive(Debug)]
struct SumBackward {
    input: Tensor,
    input_shape: Vec<usize>,
    /// Input shape with every reduced axis set to 1.
    kept_shape: Vec<usize>,
}

impl BackwardOp for SumBackward {
    fn backward(&self, grad_output: &Tensor) -> Result<Vec<Tensor>, GradMatchError> {
        let grad_kept = grad_output.reshaped(self.kept_shape.clone())?;
        let grad_input = grad_kept.expand_to_shape(&self.input_shape)?;
        Ok(vec![grad_input])
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.input.clone()]
    }

    fn name(&self) -> &'static str {
        "SumBackward"
    }
}

/// Sums elements along `axes`, or along every axis when `axes` is `None`.
///
/// Reduced axes are dropped from the output shape unless `keep_dims`, in which case
/// they are kept with size 1. Summing every axis without `keep_dims` yields a tensor
/// of shape `[]`.
///
/// # Errors
/// `IndexOutOfBounds` if an axis is not smaller than the input rank.
pub fn sum_op(
    input: &Tensor,
    axes: Option<&[usize]>,
    keep_dims: bool,
) -> Result<Tensor, GradMatchError> {
    let (buffer, input_shape) = {
        let guard = input.read_data();
        (Arc::clone(&guard.buffer), guard.shape.clone())
    };
    let rank = input_shape.len();

    // --- Validate Axes ---
    let mut reduced_axes: Vec<usize> = match axes {
        Some(axes) => axes.to_vec(),
        None => (0..rank).collect(),
    };
    if let Some(&axis) = reduced_axes.iter().find(|&&axis| axis >= rank) {
        return Err(GradMatchError::IndexOutOfBounds {
            index: vec![axis],
            shape: input_shape,
        });
    }
    reduced_axes.sort_unstable();
    reduced_axes.dedup();

    // --- Output Shapes ---
    let kept_shape: Vec<usize> = input_shape
        .iter()
        .enumerate()
        .map(|(dim, &size)| if reduced_axes.contains(&dim) { 1 } else { size })
        .collect();
    let output_shape: Vec<usize> = if keep_dims {
        kept_shape.clone()
    } else {
        input_shape
            .iter()
            .enumerate()
            .filter(|(dim, _)| !reduced_axes.contains(dim))
            .map(|(_, &size)| size)
            .collect()
    };

    // --- Summation ---
    // Accumulate into the kept layout; it has the same row-major order as the output.
    let kept_strides = calculate_strides(&kept_shape);
    let input_strides = calculate_strides(&input_shape);
    let output_numel: usize = kept_shape.iter().product();
    let mut result_data = vec![0.0f32; output_numel];
    for (i, &val) in buffer.iter().enumerate() {
        let coord = index_to_coord(i, &input_strides, &input_shape);
        let out_idx: usize = coord
            .iter()
            .zip(kept_shape.iter().zip(kept_strides.iter()))
            .map(|(&c, (&size, &stride))| if size == 1 { 0 } else { c * stride })
            .sum();
        result_data[out_idx] += val;
    }

    let result = Tensor::new(result_data, output_shape)?;
    if input.requires_grad() {
        result.set_grad_fn(Arc::new(SumBackward {
            input: input.clone(),
            input_shape,
            kept_shape,
        }));
    }
    Ok(result)
}

#[cfg(test)]
#[path = "sum_test.rs"]
mod tests;
