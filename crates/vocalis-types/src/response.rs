//! Outbound response wire format.

use serde::{Deserialize, Serialize};

use crate::Attributes;

/// Card type used when a reply does not name one.
pub const DEFAULT_CARD_TYPE: &str = "Simple";

/// A complete outbound response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Attributes,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    pub should_end_session: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<ResponseCard>,
}

/// Spoken output, either plain text or speech synthesis markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl OutputSpeech {
    pub fn new(content: impl Into<String>, ssml: bool) -> Self {
        if ssml {
            Self::Ssml {
                ssml: content.into(),
            }
        } else {
            Self::PlainText {
                text: content.into(),
            }
        }
    }

    /// The text or markup, whichever representation this is.
    pub fn content(&self) -> &str {
        match self {
            Self::PlainText { text } => text,
            Self::Ssml { ssml } => ssml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Companion-app card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseCard {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CardImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialize_plain_text_response() {
        let mut attrs = Attributes::new();
        attrs.insert("previousIntent".to_string(), json!("FirstIntent"));

        let envelope = ResponseEnvelope {
            version: "1.2.3".to_string(),
            session_attributes: attrs,
            response: ResponseBody {
                output_speech: OutputSpeech::new("All good", false),
                should_end_session: true,
                reprompt: None,
                card: None,
            },
        };

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "version": "1.2.3",
                "sessionAttributes": {"previousIntent": "FirstIntent"},
                "response": {
                    "outputSpeech": {"type": "PlainText", "text": "All good"},
                    "shouldEndSession": true
                }
            })
        );
    }

    #[test]
    fn serialize_ssml_reprompt_and_card() {
        let body = ResponseBody {
            output_speech: OutputSpeech::new("<speak>Hi</speak>", true),
            should_end_session: false,
            reprompt: Some(Reprompt {
                output_speech: OutputSpeech::new("<speak>Sup</speak>", true),
            }),
            card: Some(ResponseCard {
                kind: DEFAULT_CARD_TYPE.to_string(),
                title: Some("Hello".to_string()),
                content: Some("Once upon a time ...".to_string()),
                text: None,
                image: None,
            }),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["outputSpeech"], json!({"type": "SSML", "ssml": "<speak>Hi</speak>"}));
        assert_eq!(
            value["reprompt"],
            json!({"outputSpeech": {"type": "SSML", "ssml": "<speak>Sup</speak>"}})
        );
        assert_eq!(
            value["card"],
            json!({"type": "Simple", "title": "Hello", "content": "Once upon a time ..."})
        );
    }

    #[test]
    fn output_speech_content_accessor() {
        assert_eq!(OutputSpeech::new("hi", false).content(), "hi");
        assert_eq!(OutputSpeech::new("<speak/>", true).content(), "<speak/>");
    }
}
