//! Inbound request wire format.
//!
//! Mirrors the JSON document the voice platform posts to a skill. The
//! request `type` is kept as a raw string so that unknown kinds reach the
//! dispatcher (and fail there) instead of failing deserialization.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Attributes, Slots};

pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const INTENT_REQUEST: &str = "IntentRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// A complete inbound request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub session: Session,
    pub request: RequestBody,
}

impl SkillRequest {
    pub fn application_id(&self) -> &str {
        &self.session.application.application_id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Attributes carried from the previous turn. Absent on a fresh session.
    #[serde(default)]
    pub attributes: Option<Attributes>,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub application: Application,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub new: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default)]
    pub application_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default)]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentPayload>,
    /// Why the session ended (SessionEndedRequest only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RequestBody {
    /// The request kind, or `None` for a type this skill does not handle.
    pub fn request_kind(&self) -> Option<RequestKind> {
        match self.kind.as_str() {
            LAUNCH_REQUEST => Some(RequestKind::Launch),
            INTENT_REQUEST => Some(RequestKind::Intent),
            SESSION_ENDED_REQUEST => Some(RequestKind::SessionEnded),
            _ => None,
        }
    }
}

/// The request kinds a skill handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Launch => LAUNCH_REQUEST,
            Self::Intent => INTENT_REQUEST,
            Self::SessionEnded => SESSION_ENDED_REQUEST,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<BTreeMap<String, SlotPayload>>,
}

impl IntentPayload {
    /// Flatten the wire slots into `name -> value`. Slots the platform sent
    /// without a value map to `null`.
    pub fn slot_values(&self) -> Slots {
        self.slots
            .iter()
            .flatten()
            .map(|(_, slot)| {
                (
                    slot.name.clone(),
                    slot.value.clone().unwrap_or(serde_json::Value::Null),
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}
