//! Network layer - expression evaluation over HTTP
//!
//! The Network actor receives evaluation commands and sends back outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::EvaluatorClient;
