//! `vocalis request`: print sample request documents.

use anyhow::Result;
use serde_json::Value;

use vocalis_core::request::{RequestBuilder, intent_request, launch_request, session_ended_request};
use vocalis_types::PREVIOUS_INTENT;
use vocalis_types::request::SkillRequest;

use super::RequestKind;

pub fn build_request(kind: RequestKind) -> SkillRequest {
    match kind {
        RequestKind::Launch { app_id } => with_app_id(launch_request(), app_id).build(),

        RequestKind::Intent {
            name,
            slots,
            attributes,
            previous,
            new_session,
            app_id,
        } => {
            let mut builder = intent_request(name).new_session(new_session);
            for (slot, value) in slots {
                builder = builder.slot(slot, value);
            }
            for (key, raw) in attributes {
                builder = builder.attribute(key, attribute_value(&raw));
            }
            if let Some(previous) = previous {
                builder = builder.attribute(PREVIOUS_INTENT, previous);
            }
            with_app_id(builder, app_id).build()
        }

        RequestKind::End { reason, app_id } => {
            with_app_id(session_ended_request().reason(reason), app_id).build()
        }
    }
}

/// Print the request as pretty JSON.
pub fn print_request(kind: RequestKind) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&build_request(kind))?);
    Ok(())
}

fn with_app_id(builder: RequestBuilder, app_id: Option<String>) -> RequestBuilder {
    match app_id {
        Some(id) => builder.application_id(id),
        None => builder,
    }
}

/// JSON when it parses, otherwise the raw string.
fn attribute_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
