pub mod add;
pub mod mul;

pub use add::add_op;
pub use mul::mul_op;

use crate::error::GradMatchError;
use crate::tensor::utils::{broadcast_shapes, calculate_strides, coord_to_index_broadcasted, index_to_coord};
use crate::tensor::Tensor;
use std::sync::Arc;

/// Applies `op` element-wise over the broadcast of `a` and `b`.
///
/// Returns the row-major result data and the broadcast shape. Each input is read
/// under its own short-lived lock, so `a` and `b` may be the same tensor.
pub(crate) fn broadcast_binary_kernel<F>(
    a: &Tensor,
    b: &Tensor,
    op: F,
) -> Result<(Vec<f32>, Vec<usize>), GradMatchError>
where
    F: Fn(f32, f32) -> f32,
{
    let (a_buf, a_shape, a_strides) = snapshot(a);
    let (b_buf, b_shape, b_strides) = snapshot(b);
    let output_shape = broadcast_shapes(&a_shape, &b_shape)?;

    if a_shape == b_shape {
        let data = a_buf.iter().zip(b_buf.iter()).map(|(&x, &y)| op(x, y)).collect();
        return Ok((data, output_shape));
    }

    let numel: usize = output_shape.iter().product();
    let output_strides = calculate_strides(&output_shape);
    let data = (0..numel)
        .map(|i| {
            let coord = index_to_coord(i, &output_strides, &output_shape);
            let x = a_buf[coord_to_index_broadcasted(&coord, &a_shape, &a_strides)];
            let y = b_buf[coord_to_index_broadcasted(&coord, &b_shape, &b_strides)];
            op(x, y)
        })
        .collect();
    Ok((data, output_shape))
}

fn snapshot(t: &Tensor) -> (Arc<Vec<f32>>, Vec<usize>, Vec<usize>) {
    let guard = t.read_data();
    (Arc::clone(&guard.buffer), guard.shape.clone(), guard.strides.clone())
}
