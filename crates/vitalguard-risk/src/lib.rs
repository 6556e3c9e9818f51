//! vitalguard-risk
//!
//! Stress-risk scoring over a pre-trained gradient-boosted classifier.
//! The model artifact is loaded lazily, once per scorer, and shared
//! read-only by every request.

pub mod error;
pub mod features;
pub mod scorer;
pub mod xgboost;
