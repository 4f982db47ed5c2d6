//! Declarative interaction model types.
//!
//! Slot descriptors and custom slots are what the speech assets are
//! generated from; endpoints name the two sides of a declared action.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::builtin::{self, SESSION_START, WILDCARD};

/// A typed slot placeholder extracted from an utterance template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDescriptor {
    pub name: String,
    /// Namespaced built-in type (`AMAZON.NUMBER`) or a custom slot name.
    #[serde(rename = "type")]
    pub slot_type: String,
}

/// An enumerated custom slot type and its sample values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSlot {
    pub name: String,
    pub values: Vec<String>,
}

/// One side of an action (declared transition).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Matches any intent (`*`).
    Any,
    /// The marker a new session starts from (`@start`).
    SessionStart,
    /// A declared intent, by resolved name.
    Intent(String),
}

impl Endpoint {
    /// Endpoint for an intent name. Built-in short names resolve to their
    /// namespaced identifier, matching how intents are registered.
    pub fn intent(name: impl Into<String>) -> Self {
        let name = name.into();
        match builtin::built_in_intent(&name) {
            Some(full) => Self::Intent(full.to_string()),
            None => Self::Intent(name),
        }
    }

    /// Whether this endpoint names exactly `marker` (wildcards excluded).
    pub fn names(&self, marker: &str) -> bool {
        match self {
            Self::Any => false,
            Self::SessionStart => marker == SESSION_START,
            Self::Intent(name) => name == marker,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl From<&str> for Endpoint {
    fn from(value: &str) -> Self {
        match value {
            WILDCARD => Self::Any,
            SESSION_START => Self::SessionStart,
            other => Self::intent(other),
        }
    }
}

impl From<String> for Endpoint {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => write!(f, "{WILDCARD}"),
            Self::SessionStart => write!(f, "{SESSION_START}"),
            Self::Intent(name) => write!(f, "{name}"),
        }
    }
}
