//! vitalguard-core
//!
//! Pure domain types and the deterministic guardrail rules.
//! No I/O and no network dependency. This is the shared vocabulary of the
//! VitalGuard pipeline.

pub mod error;
pub mod guardrail;
pub mod models;
