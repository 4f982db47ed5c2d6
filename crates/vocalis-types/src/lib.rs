//! Shared domain types for Vocalis.
//!
//! This crate contains the types passed between the Vocalis crates: the
//! declarative model of a skill (slot descriptors, custom slots, action
//! endpoints), the JSON wire format of inbound requests and outbound
//! responses, the built-in intent and slot tables, configuration, and the
//! error enums.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod builtin;
pub mod config;
pub mod error;
pub mod interaction;
pub mod request;
pub mod response;

/// Free-form session attributes carried between turns.
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Slot values handed to handlers, keyed by slot name.
pub type Slots = std::collections::BTreeMap<String, serde_json::Value>;

/// Session attribute holding the name of the last intent that was handled.
pub const PREVIOUS_INTENT: &str = "previousIntent";
