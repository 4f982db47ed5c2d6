//! Skill webhook handler.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use tracing::{Instrument, Span, field};

use vocalis_core::Skill;
use vocalis_observe::skill_attrs::{
    SKILL_APPLICATION_ID, SKILL_ERROR, SKILL_INTENT_NAME, SKILL_SESSION_ID,
    SKILL_SHOULD_END_SESSION, SKILL_WEBHOOK_SPAN,
};
use vocalis_types::request::SkillRequest;
use vocalis_types::response::ResponseEnvelope;

use crate::http::error::AppError;

/// POST {path} - Dispatch one platform request.
///
/// The body is the platform's request document; the answer is the response
/// envelope, or an error body whose status reflects the dispatch failure.
pub async fn handle_skill_request(
    State(skill): State<Arc<Skill>>,
    Json(request): Json<SkillRequest>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    let span = webhook_span(&request);

    match skill.handle(request).instrument(span.clone()).await {
        Ok(envelope) => {
            span.record(SKILL_SHOULD_END_SESSION, envelope.response.should_end_session);
            Ok(Json(envelope))
        }
        Err(err) => {
            span.record(SKILL_ERROR, field::display(&err));
            Err(err.into())
        }
    }
}

/// Open the webhook span and record what the request already tells.
fn webhook_span(request: &SkillRequest) -> Span {
    let span = tracing::info_span!(
        SKILL_WEBHOOK_SPAN,
        skill.application.id = field::Empty,
        skill.session.id = field::Empty,
        skill.intent.name = field::Empty,
        skill.response.should_end_session = field::Empty,
        skill.error = field::Empty,
    );
    span.record(SKILL_APPLICATION_ID, request.application_id());
    span.record(SKILL_SESSION_ID, request.session.session_id.as_str());
    if let Some(intent) = &request.request.intent {
        span.record(SKILL_INTENT_NAME, intent.name.as_str());
    }
    span
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use vocalis_core::request::{intent_request, launch_request};
    use vocalis_core::{Handler, SkillBuilder};
    use vocalis_types::config::SkillConfig;

    fn skill(config: SkillConfig) -> Arc<Skill> {
        let mut b = SkillBuilder::new(config);
        b.intent("FirstIntent", "utterance", Handler::reply("All good"))
            .unwrap();
        Arc::new(b.build().unwrap())
    }

    #[tokio::test]
    async fn answers_with_envelope() {
        let Json(envelope) = handle_skill_request(
            State(skill(SkillConfig::default())),
            Json(intent_request("FirstIntent").build()),
        )
        .await
        .unwrap();
        assert_eq!(envelope.response.output_speech.content(), "All good");
    }

    #[tokio::test]
    async fn launch_uses_default_welcome() {
        let Json(envelope) = handle_skill_request(
            State(skill(SkillConfig::default())),
            Json(launch_request().build()),
        )
        .await
        .unwrap();
        assert_eq!(envelope.response.output_speech.content(), "Welcome");
    }

    #[test]
    fn webhook_span_declares_every_attribute() {
        let subscriber = tracing_subscriber::registry();
        tracing::subscriber::with_default(subscriber, || {
            let span = webhook_span(&intent_request("FirstIntent").build());
            assert_eq!(span.metadata().map(|m| m.name()), Some(SKILL_WEBHOOK_SPAN));
            for name in [
                SKILL_APPLICATION_ID,
                SKILL_SESSION_ID,
                SKILL_INTENT_NAME,
                SKILL_SHOULD_END_SESSION,
                SKILL_ERROR,
            ] {
                assert!(span.field(name).is_some(), "missing span field {name}");
            }
        });
    }

    #[tokio::test]
    async fn unauthorized_is_forbidden() {
        let config = SkillConfig {
            application_ids: vec!["appId1".to_string()],
            ..SkillConfig::default()
        };
        let err = handle_skill_request(
            State(skill(config)),
            Json(intent_request("FirstIntent").application_id("appId2").build()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unknown_intent_is_bad_request() {
        let err = handle_skill_request(
            State(skill(SkillConfig::default())),
            Json(intent_request("IntentZ").build()),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
