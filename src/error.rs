use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    /// A required input field is missing its domain (rank 0, win rate
    /// outside [0,1], non-finite rating, ...). Fail fast; the engine has
    /// no retry concept.
    #[error("invalid feature vector: {0}")]
    InvalidFeatures(String),

    /// The monotonicity fix-up could not restore a valid probability
    /// pair. A defect, not a designed correction path.
    #[error("guardrail invariant violation: {0}")]
    GuardrailInvariantViolation(String),
}

pub type Result<T> = std::result::Result<T, PredictError>;
