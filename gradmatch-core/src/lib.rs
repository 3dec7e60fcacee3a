//! Tensors with reverse-mode automatic differentiation, sized for gradient checks.
//!
//! A [`Tensor`] is a shared handle to an f32 buffer plus autograd metadata.
//! Operations ([`ops`]) record a backward node on their output when any input
//! requires grad, and [`Tensor::backward`] walks that graph in reverse
//! topological order, depositing gradients on leaves.

pub mod autograd;
pub mod error;
pub mod ops;
pub mod random;
pub mod tensor;
pub mod tensor_data;
pub mod utils;

pub use autograd::GradAccumulation;
pub use error::GradMatchError;
pub use random::{manual_seed, RandomContext};
pub use tensor::Tensor;
// Re-export traits required by public functions
pub use num_traits;
