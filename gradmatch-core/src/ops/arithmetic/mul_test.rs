use super::*;
use crate::error::GradMatchError;
use crate::tensor::create::{full, ones};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};
use approx::assert_relative_eq;

#[test]
fn test_mul_tensors_ok() -> Result<(), GradMatchError> {
    let a = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 4.0], vec![2]);
    let result = mul_op(&a, &b)?;
    assert_eq!(result.shape(), &[2]);
    let res_data = result.get_f32_data()?;
    for (r, e) in res_data.iter().zip([3.0f32, 8.0]) {
        assert_relative_eq!(*r, e, epsilon = 1e-6);
    }
    Ok(())
}

#[test]
fn test_mul_tensors_shape_mismatch() {
    let a = create_test_tensor(vec![1.0, 2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 4.0, 5.0], vec![3]);
    let result = mul_op(&a, &b);
    assert!(matches!(result, Err(GradMatchError::BroadcastError { .. })));
}

#[test]
fn test_mul_broadcasting() -> Result<(), GradMatchError> {
    let matrix = create_test_tensor(vec![1.0, 2.0, 3.0, 4.0], vec![2, 2]);
    let row_vector = create_test_tensor(vec![10.0, 20.0], vec![1, 2]);
    let result = mul_op(&matrix, &row_vector)?;
    // [[1*10, 2*20], [3*10, 4*20]]
    check_tensor_near(&result, &[2, 2], &[10.0, 40.0, 30.0, 80.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_scalar_broadcast() -> Result<(), GradMatchError> {
    let scalar = create_test_tensor(vec![1.0], vec![]);
    let matrix = ones(&[2, 3])?;
    let result = mul_op(&scalar, &matrix)?;
    check_tensor_near(&result, &[2, 3], &[1.0; 6], 1e-6);
    Ok(())
}

// --- Autograd Tests ---

#[test]
fn test_mul_backward_simple() -> Result<(), GradMatchError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let b = create_test_tensor_with_grad(vec![4.0, 5.0, 6.0], vec![3]);

    let output = mul_op(&a, &b)?;
    assert_eq!(output.grad_fn().map(|op| op.name()), Some("MulBackward"));
    output.backward_with(Some(ones(&[3])?), Default::default())?;

    // d(a*b)/da = b, d(a*b)/db = a
    check_tensor_near(&a.grad().expect("Grad A missing"), &[3], &[4.0, 5.0, 6.0], 1e-6);
    check_tensor_near(&b.grad().expect("Grad B missing"), &[3], &[1.0, 2.0, 3.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_backward_upstream_scaling() -> Result<(), GradMatchError> {
    let a = create_test_tensor_with_grad(vec![1.0, -2.0], vec![2]);
    let b = create_test_tensor(vec![3.0, 0.5], vec![2]);

    let output = mul_op(&a, &b)?;
    output.backward_with(Some(full(&[2], 2.0)?), Default::default())?;

    check_tensor_near(&a.grad().expect("Grad A missing"), &[2], &[6.0, 1.0], 1e-6);
    // b never required grad, so nothing was written to it.
    assert!(b.grad().is_none());
    Ok(())
}

#[test]
fn test_mul_backward_broadcast() -> Result<(), GradMatchError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![1, 2]);
    let b = create_test_tensor_with_grad(vec![3.0, 4.0], vec![2, 1]);

    let output = mul_op(&a, &b)?;
    assert_eq!(output.shape(), vec![2, 2]);
    output.backward_with(Some(ones(&[2, 2])?), Default::default())?;

    // grad_a[j] = sum_i b[i] = 7, grad_b[i] = sum_j a[j] = 3
    check_tensor_near(&a.grad().expect("Grad A missing"), &[1, 2], &[7.0, 7.0], 1e-6);
    check_tensor_near(&b.grad().expect("Grad B missing"), &[2, 1], &[3.0, 3.0], 1e-6);
    Ok(())
}

#[test]
fn test_mul_backward_self_square() -> Result<(), GradMatchError> {
    let a = create_test_tensor_with_grad(vec![3.0, -1.5], vec![2]);
    mul_op(&a, &a)?.sum()?.backward()?;
    // d(a^2)/da = 2a
    check_tensor_near(&a.grad().expect("Grad missing"), &[2], &[6.0, -3.0], 1e-6);
    Ok(())
}
