// src/tensor_data.rs
use std::fmt::{self, Debug};
use std::sync::Arc;

use crate::autograd::BackwardOp;
use crate::error::GradMatchError;
use crate::tensor::utils::calculate_strides;
use crate::tensor::Tensor;

/// Internal storage and metadata for a Tensor.
///
/// Holds the f32 buffer, shape, strides and autograd state. It is wrapped in
/// `Arc<RwLock<TensorData>>` by `Tensor` to allow shared ownership and
/// interior mutability of the gradient slot.
pub struct TensorData {
    /// Row-major element buffer, shared between a tensor and its detached handles.
    pub(crate) buffer: Arc<Vec<f32>>,
    pub(crate) shape: Vec<usize>,
    pub(crate) strides: Vec<usize>,

    /// If true, operations involving this tensor are recorded in the graph.
    pub(crate) requires_grad: bool,
    /// Accumulated gradient. Only ever populated on leaf tensors.
    pub(crate) grad: Option<Tensor>,
    /// Node that produced this tensor. Leaves have `grad_fn = None`.
    pub(crate) grad_fn: Option<Arc<dyn BackwardOp>>,
}

impl TensorData {
    /// Creates a new `TensorData` from row-major f32 data.
    ///
    /// # Errors
    /// Returns `GradMatchError::TensorCreationError` if the length of `data_vec`
    /// does not match the number of elements of `shape`.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradMatchError> {
        let numel: usize = shape.iter().product();
        let data_len = data_vec.len();
        if data_len != numel {
            return Err(GradMatchError::TensorCreationError { data_len, shape });
        }
        let strides = calculate_strides(&shape);

        Ok(TensorData {
            buffer: Arc::new(data_vec),
            shape,
            strides,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        })
    }

    /// Creates a `TensorData` sharing an existing buffer, with no autograd state.
    pub(crate) fn from_shared(buffer: Arc<Vec<f32>>, shape: Vec<usize>) -> Self {
        let strides = calculate_strides(&shape);
        TensorData {
            buffer,
            shape,
            strides,
            requires_grad: false,
            grad: None,
            grad_fn: None,
        }
    }

    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Linear offset into the buffer for multi-dimensional `indices`.
    ///
    /// # Errors
    /// `IndexOutOfBounds` if the rank differs or any index exceeds its dimension.
    pub fn get_offset(&self, indices: &[usize]) -> Result<usize, GradMatchError> {
        if indices.len() != self.shape.len()
            || indices.iter().zip(self.shape.iter()).any(|(&i, &d)| i >= d)
        {
            return Err(GradMatchError::IndexOutOfBounds {
                index: indices.to_vec(),
                shape: self.shape.clone(),
            });
        }
        Ok(indices
            .iter()
            .zip(self.strides.iter())
            .map(|(i, s)| i * s)
            .sum())
    }
}

impl Debug for TensorData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TensorData")
            .field("shape", &self.shape)
            .field("strides", &self.strides)
            .field("requires_grad", &self.requires_grad)
            .field("has_grad", &self.grad.is_some())
            .field("grad_fn", &self.grad_fn.as_ref().map(|op| op.name()))
            .finish()
    }
}
