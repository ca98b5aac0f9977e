//! Error types shared by all emission model families.
use thiserror::Error;

/// Failures reported by emission model construction, parameter assignment
/// and fitting. Degenerate likelihood rows are not errors (see the outlier
/// policy), and a state without observations during posterior sampling is a
/// warning only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutputModelError {
    /// A per-state parameter array does not match the number of hidden states.
    #[error("expected {expected} per-state parameters, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
    /// A state received zero total weight during a maximum likelihood update,
    /// so its parameters are undefined.
    #[error("state {state} received zero total weight")]
    UnweightedState { state: usize },
    /// A fitted standard deviation is too small to continue.
    #[error("sigma of state {state} is too small to continue ({sigma:e})")]
    SigmaTooSmall { state: usize, sigma: f64 },
}
