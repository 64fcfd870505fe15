//! Evaluation failures surfaced to the user

use std::time::Duration;

/// Errors from the evaluation round-trip.
///
/// None of these are fatal: the app keeps both buffers and shows the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Evaluator could not be reached.
    #[error("Connection failed: {0}")]
    Network(String),
    /// No response within the configured timeout.
    #[error("Request timed out ({}s)", .0.as_secs())]
    Timeout(Duration),
    /// Response arrived but carried no usable result.
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// Evaluator refused the expression.
    #[error("Evaluator rejected expression ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            EvalError::Timeout(Duration::from_secs(10)).to_string(),
            "Request timed out (10s)"
        );
        let err = EvalError::Rejected {
            status: 400,
            message: "cannot match (".into(),
        };
        assert_eq!(err.to_string(), "Evaluator rejected expression (400): cannot match (");
    }
}
