use gradmatch_check::report::write_report;
use gradmatch_check::{run, CheckConfig};
use std::sync::Once;

// Helper to initialize logger only once for all tests in this binary
static LOGGER_INIT: Once = Once::new();

fn setup_logger() {
    LOGGER_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

fn config(seed: u64, rows: usize, cols: usize) -> CheckConfig {
    CheckConfig {
        seed,
        rows,
        cols,
        ..CheckConfig::default()
    }
}

#[test]
fn test_default_scenario_all_correct() {
    setup_logger();
    let result = run(&CheckConfig::default()).expect("run should succeed");
    assert!(result.verification.grad_x);
    assert!(result.verification.grad_y);
    assert!(result.verification.grad_z);
    assert_eq!(result.variables.x.shape(), vec![3, 4]);
}

#[test]
fn test_single_element_boundary() {
    setup_logger();
    let result = run(&config(0, 1, 1)).expect("run should succeed");
    assert!(result.verification.all_match());
    assert_eq!(result.auto.z.get_f32_data().unwrap(), vec![1.0]);
}

#[test]
fn test_fixed_seed_reproduces_output() {
    setup_logger();
    let first = run(&config(11, 3, 4)).unwrap();
    let second = run(&config(11, 3, 4)).unwrap();
    assert_eq!(
        first.forward.c.item_f32().unwrap(),
        second.forward.c.item_f32().unwrap()
    );
    assert_eq!(
        first.variables.x.get_f32_data().unwrap(),
        second.variables.x.get_f32_data().unwrap()
    );
}

#[test]
fn test_engine_gradients_match_identities() {
    setup_logger();
    let result = run(&config(4, 5, 2)).unwrap();
    let y = result.variables.y.get_f32_data().unwrap();
    let x = result.variables.x.get_f32_data().unwrap();
    for (g, v) in result.auto.x.get_f32_data().unwrap().iter().zip(&y) {
        approx::assert_abs_diff_eq!(*g, *v, epsilon = 1e-6);
    }
    for (g, v) in result.auto.y.get_f32_data().unwrap().iter().zip(&x) {
        approx::assert_abs_diff_eq!(*g, *v, epsilon = 1e-6);
    }
}

#[test]
fn test_report_layout() {
    setup_logger();
    let result = run(&config(0, 2, 2)).unwrap();
    let mut buf = Vec::new();
    write_report(&result, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();

    assert!(text.starts_with("x: tensor([["));
    assert!(text.contains("requires_grad=True"));
    let c_line = format!("c: {}\n", result.forward.c.item_f32().unwrap());
    assert!(text.contains(&c_line));
    assert!(!text.contains("c: tensor("));
    assert!(!text.contains("grad_fn=<SumBackward>"));
    assert!(text.contains("Hand-calculated gradients:"));
    assert!(text.contains("Gradients from backward:"));
    assert!(text.contains("grad_x correct: true"));
    assert!(text.contains("grad_y correct: true"));
    assert!(text.ends_with("grad_z correct: true\n"));
}
