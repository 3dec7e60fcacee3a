use super::*;
use crate::ops::arithmetic::{add_op, mul_op};
use crate::utils::testing::{check_tensor_near, create_test_tensor, create_test_tensor_with_grad};

#[test]
fn test_detach_basic() -> Result<(), GradMatchError> {
    let t1 = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    let t1_added = add_op(&t1, &t1)?;
    assert!(t1_added.requires_grad(), "Result of add should require grad");
    assert!(t1_added.grad_fn().is_some(), "Result of add should have grad_fn");

    let t2 = t1_added.detach();
    assert!(!t2.requires_grad(), "Detached tensor should not require grad");
    assert!(t2.grad_fn().is_none(), "Detached tensor should not have grad_fn");
    assert!(t2.grad().is_none(), "Detached tensor should not have grad");
    assert_eq!(t1_added.shape(), t2.shape());
    assert_eq!(t1_added.strides(), t2.strides());
    assert_eq!(t1_added.get_f32_data()?, t2.get_f32_data()?);
    Ok(())
}

#[test]
fn test_requires_grad_on_non_leaf_fails() -> Result<(), GradMatchError> {
    let a = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let b = mul_op(&a, &a)?;
    assert!(!b.is_leaf());
    assert_eq!(b.requires_grad_(false), Err(GradMatchError::RequiresGradOnNonLeaf));
    Ok(())
}

#[test]
fn test_backward_without_requires_grad_fails() {
    let t = create_test_tensor(vec![1.0], vec![]);
    assert_eq!(t.backward(), Err(GradMatchError::RequiresGradNotMet));
}

#[test]
fn test_backward_non_scalar_without_seed_fails() {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    assert_eq!(t.backward(), Err(GradMatchError::BackwardNonScalar));
}

#[test]
fn test_backward_seed_shape_mismatch() {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let seed = create_test_tensor(vec![1.0, 1.0], vec![1, 2]);
    let result = t.backward_with(Some(seed), GradAccumulation::Accumulate);
    assert!(matches!(
        result,
        Err(GradMatchError::ShapeMismatch { ref operation, .. }) if operation == "backward"
    ));
}

#[test]
fn test_backward_on_leaf_deposits_seed() -> Result<(), GradMatchError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let seed = create_test_tensor(vec![0.5, -3.0], vec![2]);
    t.backward_with(Some(seed), GradAccumulation::Accumulate)?;
    let grad = t.grad().expect("leaf should receive a gradient");
    check_tensor_near(&grad, &[2], &[0.5, -3.0], 1e-6);
    Ok(())
}

#[test]
fn test_accumulate_vs_overwrite() -> Result<(), GradMatchError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let seed = create_test_tensor(vec![1.0, 2.0], vec![2]);

    t.backward_with(Some(seed.clone()), GradAccumulation::Accumulate)?;
    t.backward_with(Some(seed.clone()), GradAccumulation::Accumulate)?;
    check_tensor_near(&t.grad().expect("grad"), &[2], &[2.0, 4.0], 1e-6);

    t.backward_with(Some(seed), GradAccumulation::Overwrite)?;
    check_tensor_near(&t.grad().expect("grad"), &[2], &[1.0, 2.0], 1e-6);
    Ok(())
}

#[test]
fn test_zero_grad_reads_as_zeros() -> Result<(), GradMatchError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0, 3.0], vec![3]);
    t.backward_with(Some(create_test_tensor(vec![4.0, 5.0, 6.0], vec![3])), Default::default())?;
    t.zero_grad()?;
    check_tensor_near(&t.grad().expect("grad"), &[3], &[0.0; 3], 0.0);

    // Accumulating onto a zeroed slot yields exactly the new gradient.
    t.backward_with(Some(create_test_tensor(vec![1.0, 1.0, 1.0], vec![3])), Default::default())?;
    check_tensor_near(&t.grad().expect("grad"), &[3], &[1.0; 3], 0.0);
    Ok(())
}

#[test]
fn test_zero_grad_without_requires_grad_is_noop() -> Result<(), GradMatchError> {
    let t = create_test_tensor(vec![1.0], vec![1]);
    t.zero_grad()?;
    assert!(t.grad().is_none());
    Ok(())
}

#[test]
fn test_clear_grad() -> Result<(), GradMatchError> {
    let t = create_test_tensor_with_grad(vec![1.0], vec![]);
    t.backward()?;
    assert!(t.grad().is_some());
    t.clear_grad();
    assert!(t.grad().is_none());
    Ok(())
}

#[test]
fn test_deep_clone_does_not_follow_later_changes() -> Result<(), GradMatchError> {
    let t = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    t.backward_with(Some(create_test_tensor(vec![3.0, 4.0], vec![2])), Default::default())?;
    let snapshot = t.grad().expect("grad").deep_clone()?;
    t.zero_grad()?;
    check_tensor_near(&snapshot, &[2], &[3.0, 4.0], 0.0);
    assert!(snapshot.is_leaf());
    assert!(!snapshot.requires_grad());
    Ok(())
}

#[test]
fn test_gradients_do_not_record_graph() -> Result<(), GradMatchError> {
    let x = create_test_tensor_with_grad(vec![1.0, 2.0], vec![2]);
    let y = create_test_tensor_with_grad(vec![3.0, 4.0], vec![2]);
    mul_op(&x, &y)?.sum()?.backward()?;
    let gx = x.grad().expect("grad");
    assert!(gx.grad_fn().is_none());
    assert!(!gx.requires_grad());
    Ok(())
}
