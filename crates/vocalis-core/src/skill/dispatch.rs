//! Per-request state machine.

use std::sync::Arc;

use serde_json::Value;
use tracing::{Instrument, debug, info, info_span, warn};
use vocalis_types::builtin::SESSION_START;
use vocalis_types::error::DispatchError;
use vocalis_types::request::{RequestKind, SkillRequest};
use vocalis_types::response::ResponseEnvelope;
use vocalis_types::{Attributes, PREVIOUS_INTENT, Slots};

use super::Skill;
use super::response::{assemble, settle_attributes};
use crate::handler::Handler;

impl Skill {
    /// Handle one inbound request.
    ///
    /// Transition rejections are answered by a failure handler and are
    /// never an error. Every `Err` means no response was produced.
    pub async fn handle(&self, request: SkillRequest) -> Result<ResponseEnvelope, DispatchError> {
        let span = info_span!(
            "skill.handle",
            request.kind = %request.request.kind,
            request.id = %request.request.request_id,
        );
        self.dispatch(request).instrument(span).await
    }

    async fn dispatch(&self, request: SkillRequest) -> Result<ResponseEnvelope, DispatchError> {
        let application_id = request.application_id();
        if !self.config.is_application_allowed(application_id) {
            warn!(application_id, "request not handled: application id is not allowed");
            return Err(DispatchError::Unauthorized(application_id.to_string()));
        }

        let mut attributes = request.session.attributes.clone().unwrap_or_default();
        if request.session.new && !attributes.contains_key(PREVIOUS_INTENT) {
            attributes.insert(
                PREVIOUS_INTENT.to_string(),
                Value::String(SESSION_START.to_string()),
            );
        }

        let Some(kind) = request.request.request_kind() else {
            warn!(kind = %request.request.kind, "request not handled: unsupported request type");
            return Err(DispatchError::UnsupportedRequest(request.request.kind.clone()));
        };

        let request = Arc::new(request);
        let envelope = match kind {
            RequestKind::Launch => {
                self.run("onStart", &self.lifecycle.on_start, Slots::new(), attributes, &request, None)
                    .await?
            }
            RequestKind::SessionEnded => {
                self.run("onEnd", &self.lifecycle.on_end, Slots::new(), attributes, &request, None)
                    .await?
            }
            RequestKind::Intent => self.dispatch_intent(attributes, &request).await?,
        };

        info!(
            should_end_session = envelope.response.should_end_session,
            "request handled"
        );
        Ok(envelope)
    }

    async fn dispatch_intent(
        &self,
        attributes: Attributes,
        request: &Arc<SkillRequest>,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let payload = request.request.intent.as_ref().ok_or_else(|| {
            warn!("request not handled: intent request without an intent");
            DispatchError::MalformedRequest("IntentRequest carries no intent".to_string())
        })?;

        let intent = self.intent(&payload.name).ok_or_else(|| {
            warn!(intent = %payload.name, "request not handled: unknown intent");
            DispatchError::UnknownIntent(payload.name.clone())
        })?;
        let slots = payload.slot_values();
        debug!(intent = %intent.name, slots = slots.len(), "handling intent");

        if self.actions.is_empty() {
            return self
                .run(&intent.name, &intent.handler, slots, attributes, request, Some(intent.name.as_str()))
                .await;
        }

        let previous = attributes.get(PREVIOUS_INTENT).and_then(Value::as_str);
        let Some(action) = self.actions.find(previous, &intent.name) else {
            debug!(
                previous = previous.unwrap_or_default(),
                target = %intent.name,
                "transition rejected: no matching action"
            );
            return self
                .run(
                    "defaultActionFail",
                    &self.lifecycle.default_action_fail,
                    slots,
                    attributes,
                    request,
                    None,
                )
                .await;
        };

        if action.permits(&slots, &attributes) {
            return self
                .run(&intent.name, &intent.handler, slots, attributes, request, Some(intent.name.as_str()))
                .await;
        }

        debug!(
            from = %action.from,
            to = %action.to,
            target = %intent.name,
            "transition rejected: guard failed"
        );
        let (label, handler) = match &action.on_reject {
            Some(handler) => ("onReject", handler),
            None => ("defaultActionFail", &self.lifecycle.default_action_fail),
        };
        self.run(label, handler, slots, attributes, request, None).await
    }

    /// Invoke `handler` and turn its reply into a response.
    ///
    /// `advance_to` is set only when the target intent's own handler runs.
    async fn run(
        &self,
        label: &str,
        handler: &Handler,
        slots: Slots,
        mut attributes: Attributes,
        request: &Arc<SkillRequest>,
        advance_to: Option<&str>,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let prior = attributes.get(PREVIOUS_INTENT).cloned();
        let mut reply = handler.invoke(label, slots, &mut attributes, request).await?;
        let attributes = settle_attributes(&mut reply, attributes, prior, advance_to);

        Ok(assemble(
            reply,
            attributes,
            &self.config.version,
            self.config.end_session_by_default,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use tokio::sync::oneshot;
    use vocalis_types::config::SkillConfig;
    use vocalis_types::response::OutputSpeech;

    use super::*;
    use crate::action::Action;
    use crate::handler::Reply;
    use crate::request::{RequestBuilder, intent_request, launch_request, session_ended_request};
    use crate::skill::{DEFAULT_ACTION_FAIL_TEXT, SkillBuilder};

    fn speech(envelope: &ResponseEnvelope) -> &str {
        envelope.response.output_speech.content()
    }

    fn previous(envelope: &ResponseEnvelope) -> &Value {
        &envelope.session_attributes[PREVIOUS_INTENT]
    }

    fn basic_builder(config: SkillConfig) -> SkillBuilder {
        let mut b = SkillBuilder::new(config);
        b.intent("IntentA", "go A", Handler::reply("A")).unwrap();
        b.intent("IntentB", "go B", Handler::reply("B")).unwrap();
        b.intent("IntentC", "go C", Handler::reply("C")).unwrap();
        b
    }

    fn actions_skill() -> Skill {
        let mut b = basic_builder(SkillConfig::default());
        b.action(Action::new("@start", "IntentA"))
            .action(Action::new("IntentA", "IntentB"))
            .action(
                Action::new("IntentB", "IntentC")
                    .when(|slots, _| slots.get("ok") == Some(&json!("yes")))
                    .on_reject(Handler::reply("C needs ok")),
            )
            .action(Action::new("IntentC", "IntentA").when(|_, _| false));
        b.build().unwrap()
    }

    fn at(previous: &str, target: &str) -> SkillRequest {
        intent_request(target).attribute(PREVIOUS_INTENT, previous).build()
    }

    #[tokio::test]
    async fn no_actions_dispatches_any_intent() {
        let skill = basic_builder(SkillConfig::default()).build().unwrap();
        let envelope = skill.handle(at("whatever", "IntentC")).await.unwrap();
        assert_eq!(speech(&envelope), "C");
        assert_eq!(previous(&envelope), "IntentC");
        assert_eq!(envelope.version, "0.0.1");
        assert!(envelope.response.should_end_session);
    }

    #[tokio::test]
    async fn permitted_transition_advances() {
        let envelope = actions_skill().handle(at("IntentA", "IntentB")).await.unwrap();
        assert_eq!(speech(&envelope), "B");
        assert_eq!(previous(&envelope), "IntentB");
    }

    #[tokio::test]
    async fn undeclared_transition_uses_default_fail() {
        let envelope = actions_skill().handle(at("IntentZ", "IntentB")).await.unwrap();
        assert_eq!(speech(&envelope), DEFAULT_ACTION_FAIL_TEXT);
        assert_eq!(previous(&envelope), "IntentZ");
    }

    #[tokio::test]
    async fn failed_guard_uses_on_reject() {
        let envelope = actions_skill().handle(at("IntentB", "IntentC")).await.unwrap();
        assert_eq!(speech(&envelope), "C needs ok");
        assert_eq!(previous(&envelope), "IntentB");

        let request = intent_request("IntentC")
            .attribute(PREVIOUS_INTENT, "IntentB")
            .slot("ok", "yes")
            .build();
        let envelope = actions_skill().handle(request).await.unwrap();
        assert_eq!(speech(&envelope), "C");
        assert_eq!(previous(&envelope), "IntentC");
    }

    #[tokio::test]
    async fn failed_guard_without_on_reject_uses_default_fail() {
        let envelope = actions_skill().handle(at("IntentC", "IntentA")).await.unwrap();
        assert_eq!(speech(&envelope), DEFAULT_ACTION_FAIL_TEXT);
    }

    #[tokio::test]
    async fn new_session_starts_from_start_marker() {
        let request = intent_request("IntentA").new_session(true).build();
        let envelope = actions_skill().handle(request).await.unwrap();
        assert_eq!(speech(&envelope), "A");
        assert_eq!(previous(&envelope), "IntentA");
    }

    #[tokio::test]
    async fn launch_and_end_use_lifecycle_defaults() {
        let skill = actions_skill();

        let envelope = skill.handle(launch_request().build()).await.unwrap();
        assert_eq!(speech(&envelope), "Welcome");
        assert_eq!(previous(&envelope), SESSION_START);

        let request = session_ended_request().attribute(PREVIOUS_INTENT, "IntentB").build();
        let envelope = skill.handle(request).await.unwrap();
        assert_eq!(speech(&envelope), "Bye");
        assert_eq!(previous(&envelope), "IntentB");
    }

    #[tokio::test]
    async fn lifecycle_handlers_get_empty_slots() {
        let mut b = SkillBuilder::new(SkillConfig::default());
        b.on_start(Handler::sync(|slots, _, _| format!("slots: {}", slots.len())));
        let skill = b.build().unwrap();
        let envelope = skill.handle(launch_request().build()).await.unwrap();
        assert_eq!(speech(&envelope), "slots: 0");
    }

    #[tokio::test]
    async fn unauthorized_application_runs_no_handler() {
        let calls = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&calls);
        let config = SkillConfig {
            application_ids: vec!["appId1".to_string()],
            ..SkillConfig::default()
        };
        let mut b = SkillBuilder::new(config);
        b.intent(
            "IntentA",
            "go",
            Handler::sync(move |_, _, _| {
                *counter.lock().unwrap() += 1;
                "A"
            }),
        )
        .unwrap();
        let skill = b.build().unwrap();

        let denied = intent_request("IntentA").application_id("appId2").build();
        let err = skill.handle(denied).await.unwrap_err();
        assert_eq!(err, DispatchError::Unauthorized("appId2".to_string()));
        assert_eq!(*calls.lock().unwrap(), 0);

        let allowed = intent_request("IntentA").application_id("appId1").build();
        assert!(skill.handle(allowed).await.is_ok());
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_intent_is_fatal() {
        let skill = basic_builder(SkillConfig::default()).build().unwrap();
        let err = skill.handle(intent_request("IntentZ").build()).await.unwrap_err();
        assert_eq!(err, DispatchError::UnknownIntent("IntentZ".to_string()));
    }

    #[tokio::test]
    async fn unsupported_request_type_is_fatal() {
        let skill = basic_builder(SkillConfig::default()).build().unwrap();
        let request = RequestBuilder::new().kind("AudioPlayer.PlaybackStarted").build();
        let err = skill.handle(request).await.unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnsupportedRequest("AudioPlayer.PlaybackStarted".to_string())
        );
    }

    #[tokio::test]
    async fn intent_request_without_intent_is_malformed() {
        let skill = basic_builder(SkillConfig::default()).build().unwrap();
        let mut request = intent_request("IntentA").build();
        request.request.intent = None;
        let err = skill.handle(request).await.unwrap_err();
        assert!(matches!(err, DispatchError::MalformedRequest(_)));
    }

    #[tokio::test]
    async fn slots_are_passed_by_name() {
        let mut b = SkillBuilder::new(SkillConfig::default());
        b.intent(
            "Age",
            "I am {age:Number} years old",
            Handler::sync(|slots, _, _| match slots.get("age") {
                Some(Value::String(age)) => format!("Your age is {age}"),
                _ => "no age".to_string(),
            }),
        )
        .unwrap();
        let skill = b.build().unwrap();

        let envelope = skill.handle(intent_request("Age").slot("age", "42").build()).await.unwrap();
        assert_eq!(speech(&envelope), "Your age is 42");
    }

    #[tokio::test]
    async fn sync_handler_mutations_are_returned() {
        let mut b = SkillBuilder::new(SkillConfig::default());
        b.intent(
            "Count",
            "count",
            Handler::sync(|_, attrs, _| {
                let n = attrs.get("count").and_then(Value::as_i64).unwrap_or(0);
                attrs.insert("count".to_string(), json!(n + 1));
                "counted"
            }),
        )
        .unwrap();
        let skill = b.build().unwrap();

        let request = intent_request("Count").attribute("count", 4).build();
        let envelope = skill.handle(request).await.unwrap();
        assert_eq!(envelope.session_attributes["count"], json!(5));
        assert_eq!(previous(&envelope), "Count");
    }

    #[tokio::test]
    async fn attribute_override_and_error_flag() {
        let mut b = SkillBuilder::new(SkillConfig::default());
        b.intent(
            "Override",
            "override",
            Handler::sync(|_, _, _| {
                let mut attrs = Attributes::new();
                attrs.insert("fresh".to_string(), json!(true));
                Reply::text("overridden").attributes(attrs)
            }),
        )
        .unwrap();
        b.intent(
            "Failing",
            "failing",
            Handler::sync(|_, _, _| Reply::text("failed").error()),
        )
        .unwrap();
        let skill = b.build().unwrap();

        let envelope = skill.handle(at("IntentA", "Override")).await.unwrap();
        assert_eq!(envelope.session_attributes["fresh"], json!(true));
        assert_eq!(previous(&envelope), "Override");

        let envelope = skill.handle(at("IntentA", "Failing")).await.unwrap();
        assert_eq!(previous(&envelope), "IntentA");
    }

    #[tokio::test]
    async fn reply_end_session_and_configured_default() {
        let config = SkillConfig {
            version: "1.2.3".to_string(),
            end_session_by_default: false,
            ..SkillConfig::default()
        };
        let mut b = SkillBuilder::new(config);
        b.intent("Keep", "keep", Handler::reply("open")).unwrap();
        b.intent("Close", "close", Handler::reply(Reply::text("closed").end_session(true)))
            .unwrap();
        let skill = b.build().unwrap();

        let envelope = skill.handle(intent_request("Keep").build()).await.unwrap();
        assert!(!envelope.response.should_end_session);
        assert_eq!(envelope.version, "1.2.3");

        let envelope = skill.handle(intent_request("Close").build()).await.unwrap();
        assert!(envelope.response.should_end_session);
    }

    #[tokio::test]
    async fn suspending_handler_waits_for_completion() {
        let (gate_tx, gate_rx) = oneshot::channel::<()>();
        let gate_rx = Arc::new(Mutex::new(Some(gate_rx)));

        let mut b = SkillBuilder::new(SkillConfig::default());
        b.intent(
            "Async",
            "async response",
            Handler::suspending(move |_, _, _, done| {
                let gate = gate_rx.lock().unwrap().take();
                tokio::spawn(async move {
                    if let Some(gate) = gate {
                        let _ = gate.await;
                    }
                    done.done(Reply::ssml("<speak>late</speak>"));
                });
            }),
        )
        .unwrap();
        let skill = Arc::new(b.build().unwrap());

        let handling = tokio::spawn({
            let skill = Arc::clone(&skill);
            async move { skill.handle(intent_request("Async").build()).await }
        });

        tokio::task::yield_now().await;
        assert!(!handling.is_finished());

        gate_tx.send(()).unwrap();
        let envelope = handling.await.unwrap().unwrap();
        assert_eq!(
            envelope.response.output_speech,
            OutputSpeech::new("<speak>late</speak>", true)
        );
        assert_eq!(previous(&envelope), "Async");
    }

    #[tokio::test]
    async fn abandoned_completion_is_fatal() {
        let mut b = SkillBuilder::new(SkillConfig::default());
        b.intent("Async", "async", Handler::suspending(|_, _, _, done| drop(done)))
            .unwrap();
        let skill = b.build().unwrap();
        let err = skill.handle(intent_request("Async").build()).await.unwrap_err();
        assert_eq!(err, DispatchError::HandlerAbandoned("Async".to_string()));
    }

    #[tokio::test]
    async fn absent_attributes_become_empty_map() {
        let skill = basic_builder(SkillConfig::default()).build().unwrap();
        let mut request = launch_request().new_session(false).build();
        request.session.attributes = None;
        let envelope = skill.handle(request).await.unwrap();
        assert!(envelope.session_attributes.is_empty());
    }
}
