//! Skill declaration.
//!
//! `SkillBuilder` collects intents, custom slots, actions and lifecycle
//! handlers. Each declaration is validated when it is made; cross
//! references (action endpoints, slot types) are checked by `build()`,
//! which freezes everything into an immutable `Skill`.

mod dispatch;
mod response;

use std::collections::HashMap;

use tracing::{debug, warn};
use vocalis_types::builtin;
use vocalis_types::config::SkillConfig;
use vocalis_types::error::ValidationError;
use vocalis_types::interaction::{CustomSlot, Endpoint};

use crate::action::{Action, ActionTable};
use crate::custom_slot::create_custom_slot;
use crate::handler::Handler;
use crate::intent::{Intent, Templates, create_intent};

pub const DEFAULT_START_TEXT: &str = "Welcome";
pub const DEFAULT_END_TEXT: &str = "Bye";
pub const DEFAULT_ACTION_FAIL_TEXT: &str = "Sorry, your command is invalid";

/// Handlers that are not bound to a declared intent.
#[derive(Debug, Clone)]
pub(crate) struct Lifecycle {
    pub on_start: Handler,
    pub on_end: Handler,
    pub default_action_fail: Handler,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            on_start: Handler::reply(DEFAULT_START_TEXT),
            on_end: Handler::reply(DEFAULT_END_TEXT),
            default_action_fail: Handler::reply(DEFAULT_ACTION_FAIL_TEXT),
        }
    }
}

/// Declaration phase of a skill.
#[derive(Debug)]
pub struct SkillBuilder {
    config: SkillConfig,
    intents: Vec<Intent>,
    custom_slots: Vec<CustomSlot>,
    actions: Vec<Action>,
    lifecycle: Lifecycle,
}

impl SkillBuilder {
    /// Start an empty declaration for `config`.
    pub fn new(config: SkillConfig) -> Self {
        Self {
            config,
            intents: Vec::new(),
            custom_slots: Vec::new(),
            actions: Vec::new(),
            lifecycle: Lifecycle::default(),
        }
    }

    /// Declare an intent and return its resolved name.
    ///
    /// An empty `name` gets a generated one according to the configured
    /// naming strategy. Built-in short names resolve to the namespaced
    /// identifier.
    pub fn intent(
        &mut self,
        name: &str,
        templates: impl Into<Templates>,
        handler: Handler,
    ) -> Result<String, ValidationError> {
        let intent = create_intent(
            &self.intents,
            name,
            templates.into(),
            handler,
            self.config.naming,
        )?;
        self.register(intent)
    }

    /// Declare a built-in intent with no sample utterances of its own.
    pub fn built_in_intent(
        &mut self,
        short_name: &str,
        handler: Handler,
    ) -> Result<String, ValidationError> {
        self.built_in_intent_with_utterances(short_name, Templates::none(), handler)
    }

    /// Declare a built-in intent extended with sample utterances.
    pub fn built_in_intent_with_utterances(
        &mut self,
        short_name: &str,
        templates: impl Into<Templates>,
        handler: Handler,
    ) -> Result<String, ValidationError> {
        if builtin::built_in_intent(short_name).is_none() {
            warn!(name = short_name, "unknown built-in intent");
            return Err(ValidationError::UnknownBuiltInIntent {
                name: short_name.to_string(),
                valid: builtin::built_in_intent_names(),
            });
        }
        self.intent(short_name, templates, handler)
    }

    fn register(&mut self, intent: Intent) -> Result<String, ValidationError> {
        if self.intents.iter().any(|existing| existing.name == intent.name) {
            return Err(ValidationError::DuplicateIntent(intent.name));
        }
        debug!(
            intent = %intent.name,
            slots = intent.slots.len(),
            utterances = intent.utterances.len(),
            "declared intent"
        );
        let name = intent.name.clone();
        self.intents.push(intent);
        Ok(name)
    }

    /// Declare a custom slot type with its sample values.
    pub fn custom_slot<I, S>(&mut self, name: &str, values: I) -> Result<&mut Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let slot = create_custom_slot(&self.custom_slots, name, values)?;
        debug!(slot = %slot.name, values = slot.values.len(), "declared custom slot");
        self.custom_slots.push(slot);
        Ok(self)
    }

    /// Declare a permitted transition.
    pub fn action(&mut self, action: Action) -> &mut Self {
        debug!(from = %action.from, to = %action.to, "declared action");
        self.actions.push(action);
        self
    }

    /// Handler for `LaunchRequest`.
    pub fn on_start(&mut self, handler: Handler) -> &mut Self {
        self.lifecycle.on_start = handler;
        self
    }

    /// Handler for `SessionEndedRequest`.
    pub fn on_end(&mut self, handler: Handler) -> &mut Self {
        self.lifecycle.on_end = handler;
        self
    }

    /// Fallback for rejected transitions without their own `on_reject`.
    pub fn default_action_fail(&mut self, handler: Handler) -> &mut Self {
        self.lifecycle.default_action_fail = handler;
        self
    }

    /// Check cross references and freeze the declarations.
    pub fn build(self) -> Result<Skill, ValidationError> {
        for action in &self.actions {
            self.check_endpoint(&action.from)?;
            if action.to == Endpoint::SessionStart {
                return Err(ValidationError::InvalidActionTarget(action.to.to_string()));
            }
            self.check_endpoint(&action.to)?;
        }

        for intent in &self.intents {
            for slot in &intent.slots {
                let known = slot.slot_type.starts_with("AMAZON.")
                    || self.custom_slots.iter().any(|c| c.name == slot.slot_type);
                if !known {
                    warn!(
                        intent = %intent.name,
                        slot = %slot.name,
                        slot_type = %slot.slot_type,
                        "slot type is neither built-in nor a declared custom slot"
                    );
                }
            }
        }

        let index = self
            .intents
            .iter()
            .enumerate()
            .map(|(i, intent)| (intent.name.clone(), i))
            .collect();

        debug!(
            intents = self.intents.len(),
            custom_slots = self.custom_slots.len(),
            actions = self.actions.len(),
            "skill built"
        );

        Ok(Skill {
            config: self.config,
            intents: self.intents,
            index,
            custom_slots: self.custom_slots,
            actions: ActionTable::new(self.actions),
            lifecycle: self.lifecycle,
        })
    }

    fn check_endpoint(&self, endpoint: &Endpoint) -> Result<(), ValidationError> {
        match endpoint {
            Endpoint::Intent(name) if !self.intents.iter().any(|i| &i.name == name) => {
                Err(ValidationError::UnknownActionEndpoint(name.clone()))
            }
            _ => Ok(()),
        }
    }
}

/// A fully declared skill, ready to handle requests.
///
/// Immutable and `Send + Sync`; share it behind an `Arc`.
#[derive(Debug)]
pub struct Skill {
    config: SkillConfig,
    intents: Vec<Intent>,
    index: HashMap<String, usize>,
    custom_slots: Vec<CustomSlot>,
    actions: ActionTable,
    lifecycle: Lifecycle,
}

impl Skill {
    /// Shorthand for `SkillBuilder::new`.
    pub fn builder(config: SkillConfig) -> SkillBuilder {
        SkillBuilder::new(config)
    }

    /// Configuration the skill was built with.
    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Intents in declaration order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Look up an intent by its resolved name.
    pub fn intent(&self, name: &str) -> Option<&Intent> {
        self.index.get(name).map(|&i| &self.intents[i])
    }

    /// Custom slot types in declaration order.
    pub fn custom_slots(&self) -> &[CustomSlot] {
        &self.custom_slots
    }

    /// Declared transitions.
    pub fn actions(&self) -> &ActionTable {
        &self.actions
    }
}
