//! Observability for Vocalis: subscriber setup and shared span field names.

pub mod skill_attrs;
pub mod tracing_setup;
