// src/tensor/mod.rs

use crate::autograd::graph::NodeId;
use crate::error::GradMatchError;
use crate::tensor_data::TensorData;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod accessors;
mod autograd_methods;
mod ops_methods;
mod traits;

pub mod broadcast_utils;
pub mod create;
pub mod utils;

pub use create::{from_vec_f32, full, ones, ones_like, rand, randn, zeros, zeros_like};

/// Represents a multi-dimensional f32 array that can take part in autograd.
///
/// `Tensor` uses `Arc<RwLock<TensorData>>` internally:
/// 1.  **Shared Ownership:** clones are cheap and refer to the same graph node.
/// 2.  **Interior Mutability:** the gradient slot and `requires_grad` can be
///     updated through a shared reference.
pub struct Tensor {
    pub(crate) data: Arc<RwLock<TensorData>>,
}

impl Tensor {
    /// Creates a new leaf Tensor from row-major data and a shape.
    pub fn new(data_vec: Vec<f32>, shape: Vec<usize>) -> Result<Self, GradMatchError> {
        let tensor_data = TensorData::new(data_vec, shape)?;
        Ok(Tensor::from_data(tensor_data))
    }

    pub(crate) fn from_data(tensor_data: TensorData) -> Self {
        Tensor {
            data: Arc::new(RwLock::new(tensor_data)),
        }
    }

    /// Acquires a read lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn read_data(&self) -> RwLockReadGuard<'_, TensorData> {
        self.data.read().expect("RwLock poisoned")
    }

    /// Acquires a write lock on the tensor's data.
    /// Panics if the RwLock is poisoned.
    pub fn write_data(&self) -> RwLockWriteGuard<'_, TensorData> {
        self.data.write().expect("RwLock poisoned")
    }

    /// Identity of this tensor's node in the computation graph.
    pub fn node_id(&self) -> NodeId {
        Arc::as_ptr(&self.data)
    }

    /// Copies the elements out as a `Vec<f32>` in row-major order.
    pub fn get_f32_data(&self) -> Result<Vec<f32>, GradMatchError> {
        let guard = self.read_data();
        let numel = guard.numel();
        if guard.buffer.len() != numel {
            return Err(GradMatchError::InternalError(format!(
                "buffer holds {} elements but shape {:?} needs {}",
                guard.buffer.len(),
                guard.shape,
                numel
            )));
        }
        Ok(guard.buffer.as_ref().clone())
    }
}
