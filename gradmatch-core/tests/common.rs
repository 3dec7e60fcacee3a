use gradmatch_core::tensor::Tensor;

// Shared across several test crates; not every helper is used by each one.
#[allow(dead_code)]
pub(crate) fn create_test_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    Tensor::new(data, shape).expect("Test tensor creation failed")
}

#[allow(dead_code)]
pub(crate) fn create_grad_tensor(data: Vec<f32>, shape: Vec<usize>) -> Tensor {
    let t = create_test_tensor(data, shape);
    t.requires_grad_(true).expect("leaf tensor should accept requires_grad");
    t
}

#[allow(dead_code)]
pub(crate) fn assert_data_near(actual: &[f32], expected: &[f32], epsilon: f32) {
    assert_eq!(actual.len(), expected.len(), "length mismatch");
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert!(
            approx::relative_eq!(*a, *e, epsilon = epsilon),
            "mismatch at {}: {} vs {}",
            i,
            a,
            e
        );
    }
}
