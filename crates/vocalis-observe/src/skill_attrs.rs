//! Span names and field names recorded by the webhook layer.
//!
//! Fields are declared on the span with the same dotted literals and
//! recorded through these constants once their value is known, so span
//! attributes stay consistent when exported through OpenTelemetry.

/// Span name of one webhook round trip.
pub const SKILL_WEBHOOK_SPAN: &str = "skill.webhook";

/// Calling application id, checked against the allow-list.
pub const SKILL_APPLICATION_ID: &str = "skill.application.id";

/// Platform session id.
pub const SKILL_SESSION_ID: &str = "skill.session.id";

/// Intent name, when the request carries one.
pub const SKILL_INTENT_NAME: &str = "skill.intent.name";

/// `shouldEndSession` of the produced response.
pub const SKILL_SHOULD_END_SESSION: &str = "skill.response.should_end_session";

/// Dispatch error, when the request failed.
pub const SKILL_ERROR: &str = "skill.error";
