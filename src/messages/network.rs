//! Network messages - communication between App and Network layers

use crate::error::EvalError;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// Send an expression to the evaluator
    Evaluate {
        id: u64,
        expression: String,
    },
    /// Cancel a pending evaluation
    Cancel(u64),
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// Evaluator returned a result
    Evaluated {
        id: u64,
        value: String,
        time_ms: u64,
    },
    /// Evaluation failed
    Failed {
        id: u64,
        error: EvalError,
        time_ms: u64,
    },
    /// Evaluation was cancelled before completing
    Cancelled {
        id: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Evaluated { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
            NetworkResponse::Cancelled { id } => *id,
        }
    }
}
