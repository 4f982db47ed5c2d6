//! HTTP webhook layer for Vocalis.
//!
//! One POST route receives platform requests, dispatches them through a
//! shared `Skill` and answers with the response envelope.

pub mod error;
pub mod handlers;
pub mod router;

pub use router::build_router;
