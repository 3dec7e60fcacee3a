// src/tensor/traits.rs

use crate::tensor::Tensor;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

const DISPLAY_PREFIX: &str = "tensor(";

impl Clone for Tensor {
    /// Shallow clone: the new handle refers to the same graph node and buffer.
    fn clone(&self) -> Self {
        Tensor {
            data: Arc::clone(&self.data),
        }
    }
}

impl Debug for Tensor {
    /// Metadata only; use `Display` to see the values.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.data.read() {
            Ok(guard) => write!(
                f,
                "Tensor(shape={:?}, strides={:?}, requires_grad={}, has_grad={}, grad_fn={:?})",
                guard.shape,
                guard.strides,
                guard.requires_grad,
                guard.grad.is_some(),
                guard.grad_fn.as_ref().map(|op| op.name()),
            ),
            Err(_) => write!(f, "Tensor(Error: RwLock poisoned)"),
        }
    }
}

impl Display for Tensor {
    /// PyTorch-style rendering with four decimals, e.g.
    ///
    /// ```text
    /// tensor([[ 1.0000, -2.5000],
    ///         [ 0.5000,  3.0000]], requires_grad=True)
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = match self.data.read() {
            Ok(guard) => guard,
            Err(_) => return write!(f, "tensor(<RwLock poisoned>)"),
        };
        let width = guard
            .buffer
            .iter()
            .map(|v| format!("{:.4}", v).len())
            .max()
            .unwrap_or(0);

        f.write_str(DISPLAY_PREFIX)?;
        write_nested(f, &guard.buffer, &guard.shape, 0, width)?;
        if let Some(op) = guard.grad_fn.as_ref() {
            write!(f, ", grad_fn=<{}>", op.name())?;
        } else if guard.requires_grad {
            f.write_str(", requires_grad=True")?;
        }
        f.write_str(")")
    }
}

fn write_nested(
    f: &mut fmt::Formatter<'_>,
    data: &[f32],
    shape: &[usize],
    depth: usize,
    width: usize,
) -> fmt::Result {
    let Some((&len, inner_shape)) = shape.split_first() else {
        return match data.first() {
            Some(v) => write!(f, "{:>width$.4}", v, width = width),
            None => Ok(()),
        };
    };

    let chunk: usize = inner_shape.iter().product();
    f.write_str("[")?;
    for i in 0..len {
        if i > 0 {
            f.write_str(",")?;
            if inner_shape.is_empty() {
                f.write_str(" ")?;
            } else {
                // One newline per remaining nesting level, aligned under the first bracket.
                for _ in 0..inner_shape.len() {
                    f.write_str("\n")?;
                }
                write!(f, "{:indent$}", "", indent = DISPLAY_PREFIX.len() + depth + 1)?;
            }
        }
        write_nested(f, &data[i * chunk..(i + 1) * chunk], inner_shape, depth + 1, width)?;
    }
    f.write_str("]")
}

#[cfg(test)]
#[path = "traits_test.rs"]
mod tests;
