use approx::assert_relative_eq;
use neorbit::state_vector::StateVector;

#[allow(dead_code)]
pub fn assert_state_close(actual: &StateVector, expected: &StateVector, epsilon: f64) {
    assert_relative_eq!(actual.position, expected.position, epsilon = epsilon);
    assert_relative_eq!(actual.velocity, expected.velocity, epsilon = epsilon);
}

/// Install a test-friendly `tracing` subscriber (idempotent).
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
