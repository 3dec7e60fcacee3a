use crate::error::GradMatchError;
use crate::tensor::Tensor;

impl Tensor {
    /// Returns a clone of the tensor's shape.
    pub fn shape(&self) -> Vec<usize> {
        self.read_data().shape.clone()
    }

    pub fn strides(&self) -> Vec<usize> {
        self.read_data().strides.clone()
    }

    pub fn rank(&self) -> usize {
        self.read_data().shape.len()
    }

    pub fn numel(&self) -> usize {
        self.read_data().numel()
    }

    /// Extracts the single value of a tensor holding exactly one element.
    ///
    /// Returns `ShapeMismatch` for any other element count.
    pub fn item_f32(&self) -> Result<f32, GradMatchError> {
        let guard = self.read_data();
        if guard.numel() != 1 {
            return Err(GradMatchError::ShapeMismatch {
                expected: vec![],
                actual: guard.shape.clone(),
                operation: "item_f32()".to_string(),
            });
        }
        guard
            .buffer
            .first()
            .copied()
            .ok_or_else(|| GradMatchError::InternalError("empty buffer for one-element tensor".to_string()))
    }

    /// Element at multi-dimensional `indices`.
    pub fn at(&self, indices: &[usize]) -> Result<f32, GradMatchError> {
        let guard = self.read_data();
        let offset = guard.get_offset(indices)?;
        Ok(guard.buffer[offset])
    }
}
