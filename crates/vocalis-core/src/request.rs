//! Builders for well-formed inbound requests.
//!
//! Used by tests, the CLI `request` command and anyone who wants to
//! exercise a skill without the voice platform in the loop.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde_json::Value;
use uuid::Uuid;
use vocalis_types::Attributes;
use vocalis_types::request::{
    Application, INTENT_REQUEST, IntentPayload, LAUNCH_REQUEST, RequestBody, SESSION_ENDED_REQUEST,
    Session, SkillRequest, SlotPayload, User,
};

pub const DEFAULT_APPLICATION_ID: &str = "amzn1.echo-sdk-123456";
pub const DEFAULT_SESSION_ID: &str = "SessionId.357a6s7";
pub const DEFAULT_USER_ID: &str = "amzn1.account.abc123";
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_INTENT_NAME: &str = "UnknownIntent";

/// Fluent builder for `SkillRequest`.
///
/// Defaults to an `IntentRequest` for `UnknownIntent` on an existing session
/// with empty attributes.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    kind: String,
    intent_name: String,
    slots: BTreeMap<String, Value>,
    attributes: Attributes,
    application_id: String,
    session_id: String,
    user_id: String,
    request_id: Option<String>,
    timestamp: Option<String>,
    locale: String,
    new_session: bool,
    reason: Option<String>,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self {
            kind: INTENT_REQUEST.to_string(),
            intent_name: DEFAULT_INTENT_NAME.to_string(),
            slots: BTreeMap::new(),
            attributes: Attributes::new(),
            application_id: DEFAULT_APPLICATION_ID.to_string(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            request_id: None,
            timestamp: None,
            locale: DEFAULT_LOCALE.to_string(),
            new_session: false,
            reason: None,
        }
    }
}

impl RequestBuilder {
    /// An `IntentRequest` with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw request type. Anything other than the three known kinds is
    /// rejected at dispatch.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn intent(mut self, name: impl Into<String>) -> Self {
        self.intent_name = name.into();
        self
    }

    /// Add a slot value. On the wire it becomes `{key: {name: key, value}}`.
    /// Add a slot value; the wire shape is `{name, value}`.
    pub fn slot(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set one session attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = id.into();
        self
    }

    pub fn session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = id.into();
        self
    }

    pub fn user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = id.into();
        self
    }

    pub fn request_id(mut self, id: impl Into<String>) -> Self {
        self.request_id = Some(id.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn new_session(mut self, new: bool) -> Self {
        self.new_session = new;
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Fill in the request id and timestamp when unset.
    pub fn build(self) -> SkillRequest {
        let intent = (self.kind == INTENT_REQUEST).then(|| IntentPayload {
            name: self.intent_name,
            slots: Some(
                self.slots
                    .into_iter()
                    .map(|(name, value)| {
                        let payload = SlotPayload {
                            name: name.clone(),
                            value: Some(value),
                        };
                        (name, payload)
                    })
                    .collect(),
            ),
        });

        SkillRequest {
            version: Some("1.0".to_string()),
            session: Session {
                attributes: Some(self.attributes),
                session_id: self.session_id,
                application: Application {
                    application_id: self.application_id,
                },
                user: User {
                    user_id: self.user_id,
                },
                new: self.new_session,
            },
            request: RequestBody {
                kind: self.kind,
                request_id: self
                    .request_id
                    .unwrap_or_else(|| format!("EdwRequestId.{}", Uuid::now_v7())),
                timestamp: self
                    .timestamp
                    .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
                locale: Some(self.locale),
                intent,
                reason: self.reason,
            },
        }
    }
}

/// A `LaunchRequest` on a new session.
pub fn launch_request() -> RequestBuilder {
    RequestBuilder::new().kind(LAUNCH_REQUEST).new_session(true)
}

/// An `IntentRequest` for `name`.
pub fn intent_request(name: impl Into<String>) -> RequestBuilder {
    RequestBuilder::new().intent(name)
}

/// A `SessionEndedRequest` with reason `USER_INITIATED`.
pub fn session_ended_request() -> RequestBuilder {
    RequestBuilder::new()
        .kind(SESSION_ENDED_REQUEST)
        .reason("USER_INITIATED")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vocalis_types::request::RequestKind;

    #[test]
    fn defaults_build_an_unknown_intent_request() {
        let request = RequestBuilder::new().build();
        assert_eq!(request.request.request_kind(), Some(RequestKind::Intent));
        assert_eq!(request.request.intent.as_ref().unwrap().name, DEFAULT_INTENT_NAME);
        assert_eq!(request.application_id(), DEFAULT_APPLICATION_ID);
        assert_eq!(request.session.session_id, DEFAULT_SESSION_ID);
        assert_eq!(request.session.user.user_id, DEFAULT_USER_ID);
        assert_eq!(request.request.locale.as_deref(), Some(DEFAULT_LOCALE));
        assert!(!request.session.new);
        assert!(request.request.request_id.starts_with("EdwRequestId."));
        assert!(chrono::DateTime::parse_from_rfc3339(&request.request.timestamp).is_ok());
    }

    #[test]
    fn slots_take_wire_shape() {
        let request = intent_request("Age").slot("age", "42").build();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value["request"]["intent"],
            json!({"name": "Age", "slots": {"age": {"name": "age", "value": "42"}}})
        );
    }

    #[test]
    fn launch_has_no_intent_and_starts_session() {
        let request = launch_request().build();
        assert_eq!(request.request.request_kind(), Some(RequestKind::Launch));
        assert!(request.request.intent.is_none());
        assert!(request.session.new);
    }

    #[test]
    fn session_ended_carries_reason() {
        let request = session_ended_request().build();
        assert_eq!(request.request.request_kind(), Some(RequestKind::SessionEnded));
        assert_eq!(request.request.reason.as_deref(), Some("USER_INITIATED"));
    }

    #[test]
    fn explicit_ids_override_defaults() {
        let request = RequestBuilder::new()
            .application_id("appId1")
            .request_id("req-1")
            .timestamp("2016-06-16T14:38:46Z")
            .attribute("previousIntent", "IntentA")
            .build();
        assert_eq!(request.application_id(), "appId1");
        assert_eq!(request.request.request_id, "req-1");
        assert_eq!(request.request.timestamp, "2016-06-16T14:38:46Z");
        assert_eq!(
            request.session.attributes.unwrap()["previousIntent"],
            json!("IntentA")
        );
    }
}
