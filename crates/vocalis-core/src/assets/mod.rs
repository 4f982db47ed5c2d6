//! Speech asset generation.
//!
//! The voice platform needs three artifacts to recognize a skill's
//! commands: the intent schema, the sample utterance list and the values of
//! every custom slot type. All three are pure projections of the declared
//! registries.

pub mod persist;

use std::fmt;

use serde::{Deserialize, Serialize};
use vocalis_types::interaction::{CustomSlot, SlotDescriptor};

use crate::skill::Skill;

/// One intent schema entry. `slots` is omitted when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSchemaEntry {
    pub intent: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<SlotDescriptor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentSchema {
    pub intents: Vec<IntentSchemaEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAssets {
    pub intent_schema: IntentSchema,
    /// `"<intent> <utterance>"` lines.
    pub utterances: Vec<String>,
    pub custom_slots: Vec<CustomSlot>,
}

impl SpeechAssets {
    /// The intent schema as pretty-printed JSON.
    pub fn intent_schema_json(&self) -> String {
        // Plain strings and vectors cannot fail to serialize.
        serde_json::to_string_pretty(&self.intent_schema).unwrap_or_default()
    }

    pub fn utterances_text(&self) -> String {
        self.utterances.join("\n")
    }
}

impl fmt::Display for SpeechAssets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "intentSchema:\n{}\n", self.intent_schema_json())?;
        writeln!(f, "utterances:\n{}\n", self.utterances_text())?;
        writeln!(f, "customSlots:")?;
        for (i, slot) in self.custom_slots.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:\n{}", slot.name, slot.values.join("\n"))?;
        }
        Ok(())
    }
}

impl Skill {
    pub fn speech_assets(&self) -> SpeechAssets {
        let intents = self
            .intents()
            .iter()
            .map(|intent| IntentSchemaEntry {
                intent: intent.name.clone(),
                slots: intent.slots.clone(),
            })
            .collect();

        let utterances = self
            .intents()
            .iter()
            .flat_map(|intent| {
                intent
                    .utterances
                    .iter()
                    .filter(|u| !u.is_empty())
                    .map(move |u| format!("{} {u}", intent.name))
            })
            .collect();

        SpeechAssets {
            intent_schema: IntentSchema { intents },
            utterances,
            custom_slots: self.custom_slots().to_vec(),
        }
    }
}
