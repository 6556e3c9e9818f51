//! vitalguard-reasoning
//!
//! Guardrail-constrained prompt construction and the call to the external
//! text-generation service.

pub mod backend;
pub mod client;
pub mod error;
pub mod prompt;
