use crate::error::GradMatchError;
use crate::ops::reduction::sum_op;
use crate::tensor::utils::{broadcast_shapes, calculate_strides, coord_to_index_broadcasted, index_to_coord};
use crate::tensor::Tensor;
use crate::tensor_data::TensorData;
use std::sync::Arc;

impl Tensor {
    /// Reduces a gradient to `target_shape` by summing along broadcasted dimensions.
    ///
    /// Used by the backward pass of broadcasting ops. The result never requires grad
    /// as long as `self` does not.
    pub fn reduce_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, GradMatchError> {
        let current_shape = self.shape();
        if current_shape == target_shape {
            return Ok(self.clone());
        }

        let current_rank = current_shape.len();
        let target_rank = target_shape.len();
        if current_rank < target_rank {
            return Err(GradMatchError::InternalError(format!(
                "Cannot reduce shape {:?} to target {:?}: current rank < target rank.",
                current_shape, target_shape
            )));
        }

        let rank_diff = current_rank - target_rank;
        let mut axes_to_reduce: Vec<usize> = (0..rank_diff).collect();
        for (i, &target_dim) in target_shape.iter().enumerate() {
            let current_dim = current_shape[rank_diff + i];
            if current_dim == target_dim {
                continue;
            }
            if target_dim != 1 {
                return Err(GradMatchError::InternalError(format!(
                    "Cannot reduce shape {:?} to target {:?}: incompatible dim {} ({} vs target {}).",
                    current_shape, target_shape, i, current_dim, target_dim
                )));
            }
            axes_to_reduce.push(rank_diff + i);
        }

        let reduced = sum_op(self, Some(&axes_to_reduce), true)?;
        reduced.reshaped(target_shape.to_vec())
    }

    /// Materializes `self` broadcast to `target_shape`.
    pub fn expand_to_shape(&self, target_shape: &[usize]) -> Result<Tensor, GradMatchError> {
        let current_shape = self.shape();
        let out_shape = broadcast_shapes(&current_shape, target_shape)?;
        if out_shape != target_shape {
            return Err(GradMatchError::BroadcastError {
                shape1: current_shape,
                shape2: target_shape.to_vec(),
            });
        }

        let guard = self.read_data();
        let numel: usize = target_shape.iter().product();
        let out_strides = calculate_strides(target_shape);
        let data: Vec<f32> = (0..numel)
            .map(|i| {
                let coord = index_to_coord(i, &out_strides, target_shape);
                guard.buffer[coord_to_index_broadcasted(&coord, &guard.shape, &guard.strides)]
            })
            .collect();
        drop(guard);
        Tensor::new(data, target_shape.to_vec())
    }

    /// Same elements under a new shape with the same element count. Detached.
    pub(crate) fn reshaped(&self, new_shape: Vec<usize>) -> Result<Tensor, GradMatchError> {
        let guard = self.read_data();
        let new_numel: usize = new_shape.iter().product();
        if new_numel != guard.numel() {
            return Err(GradMatchError::ShapeMismatch {
                expected: guard.shape.clone(),
                actual: new_shape,
                operation: "reshape".to_string(),
            });
        }
        Ok(Tensor::from_data(TensorData::from_shared(
            Arc::clone(&guard.buffer),
            new_shape,
        )))
    }
}
