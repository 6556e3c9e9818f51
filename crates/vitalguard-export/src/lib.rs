//! vitalguard-export
//!
//! FHIR DiagnosticReport assembly, JSON export, and the DOCX narrative.

pub mod docx;
pub mod error;
pub mod fhir;
pub mod render;
pub mod styles;
