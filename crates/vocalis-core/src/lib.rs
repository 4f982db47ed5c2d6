//! Skill declaration and request dispatch for Vocalis.
//!
//! A skill is declared through `SkillBuilder` (intents, custom slots,
//! actions, lifecycle handlers) and frozen into a `Skill`, which dispatches
//! inbound requests and projects its registries into speech assets. This
//! crate depends only on `vocalis-types`; file I/O goes through the
//! `service::fs::FileSystem` port implemented in `vocalis-infra`.

pub mod action;
pub mod assets;
pub mod custom_slot;
pub mod handler;
pub mod intent;
pub mod request;
pub mod service;
pub mod skill;
pub mod utterance;
pub mod validator;

pub use action::Action;
pub use handler::{Card, Completion, Handler, Reply};
pub use intent::Templates;
pub use skill::{Skill, SkillBuilder};
