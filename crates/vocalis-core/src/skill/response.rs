//! Reply normalization and response assembly.

use serde_json::Value;
use vocalis_types::response::{
    DEFAULT_CARD_TYPE, OutputSpeech, Reprompt, ResponseBody, ResponseCard, ResponseEnvelope,
};
use vocalis_types::{Attributes, PREVIOUS_INTENT};

use crate::handler::{Card, Reply};

/// Session attributes to return for `reply`.
///
/// `prior` is the `previousIntent` seen before the handler ran. `advance_to`
/// is the intent whose handler ran, if one did. The attribute map is the
/// reply's override when it supplies one, otherwise `input`; the resulting
/// `previousIntent` is written into it whenever there is one.
pub(super) fn settle_attributes(
    reply: &mut Reply,
    input: Attributes,
    prior: Option<Value>,
    advance_to: Option<&str>,
) -> Attributes {
    let previous = match advance_to {
        Some(name) if !reply.error => Some(Value::String(name.to_string())),
        _ => prior,
    };

    let mut attributes = reply.attributes.take().unwrap_or(input);
    if let Some(previous) = previous {
        attributes.insert(PREVIOUS_INTENT.to_string(), previous);
    }
    attributes
}

pub(super) fn assemble(
    reply: Reply,
    session_attributes: Attributes,
    version: &str,
    end_session_by_default: bool,
) -> ResponseEnvelope {
    let Reply {
        text,
        ssml,
        reprompt,
        card,
        end_session,
        ..
    } = reply;

    ResponseEnvelope {
        version: version.to_string(),
        session_attributes,
        response: ResponseBody {
            output_speech: OutputSpeech::new(text, ssml),
            should_end_session: end_session.unwrap_or(end_session_by_default),
            reprompt: reprompt.map(|r| Reprompt {
                output_speech: OutputSpeech::new(r, ssml),
            }),
            card: card.map(into_response_card),
        },
    }
}

fn into_response_card(card: Card) -> ResponseCard {
    ResponseCard {
        kind: card.kind.unwrap_or_else(|| DEFAULT_CARD_TYPE.to_string()),
        title: card.title,
        content: card.content,
        text: card.text,
        image: card.image,
    }
}
