//! Intent records and name resolution.
//!
//! An intent is created from an optional name, its utterance templates and
//! a handler. Three name forms are accepted:
//!
//! - an empty name, for which a fresh one is generated,
//! - a built-in short name (`stop`), which resolves to `AMAZON.StopIntent`,
//! - any other identifier made of letters only.

use sha2::{Digest, Sha256};
use vocalis_types::builtin;
use vocalis_types::config::NamingStrategy;
use vocalis_types::error::ValidationError;
use vocalis_types::interaction::SlotDescriptor;

use crate::handler::Handler;
use crate::utterance::parse_utterances;
use crate::validator;

/// Digits used for generated names, in value order.
const NAME_ALPHABET: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of a content-hash generated name before any collision suffix.
const HASHED_NAME_LEN: usize = 8;

/// A declared intent.
#[derive(Debug, Clone)]
pub struct Intent {
    pub name: String,
    pub slots: Vec<SlotDescriptor>,
    /// Canonical utterances (`{name}` placeholders).
    pub utterances: Vec<String>,
    pub handler: Handler,
}

/// Utterance templates of one declaration.
///
/// Accepts a single template or any list of them so call sites can pass
/// whatever they have.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Templates(Vec<String>);

impl Templates {
    /// No templates. The intent is dispatchable but contributes no sample
    /// utterances.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Templates {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl From<String> for Templates {
    fn from(value: String) -> Self {
        Self(vec![value])
    }
}

impl From<Vec<String>> for Templates {
    fn from(value: Vec<String>) -> Self {
        Self(value)
    }
}

impl From<Vec<&str>> for Templates {
    fn from(value: Vec<&str>) -> Self {
        Self(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Templates {
    fn from(value: &[&str]) -> Self {
        Self(value.iter().map(|t| t.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Templates {
    fn from(value: [&str; N]) -> Self {
        Self(value.iter().map(|t| t.to_string()).collect())
    }
}

/// Build an intent, resolving its final name against `existing`.
///
/// Does not reject a name already present in `existing`; the skill builder
/// owns that check so it can report it uniformly for every entry point.
pub fn create_intent(
    existing: &[Intent],
    name: &str,
    templates: Templates,
    handler: Handler,
    naming: NamingStrategy,
) -> Result<Intent, ValidationError> {
    let taken = |candidate: &str| {
        builtin::is_reserved_intent_name(candidate)
            || existing.iter().any(|intent| intent.name == candidate)
    };

    let name = if name.is_empty() {
        match naming {
            NamingStrategy::Sequential => probe_sequential(0, taken),
            NamingStrategy::ContentHash => probe_content_hash(templates.as_slice(), taken),
        }
    } else if !validator::is_identifier_valid(name) {
        return Err(ValidationError::InvalidIntentName(name.to_string()));
    } else {
        builtin::built_in_intent(name).unwrap_or(name).to_string()
    };

    let parsed = parse_utterances(templates.as_slice())?;

    Ok(Intent {
        name,
        slots: parsed.slots,
        utterances: parsed.utterances,
        handler,
    })
}

/// Base-52 rendering of `counter`: 0 is `a`, 51 is `Z`, 52 is `ba`.
fn sequential_name(mut counter: usize) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(NAME_ALPHABET[counter % NAME_ALPHABET.len()]);
        counter /= NAME_ALPHABET.len();
        if counter == 0 {
            break;
        }
    }
    digits.iter().rev().map(|&b| b as char).collect()
}

/// First sequential name at or after `start` that is not taken.
fn probe_sequential(start: usize, taken: impl Fn(&str) -> bool) -> String {
    let mut counter = start;
    loop {
        let candidate = sequential_name(counter);
        if !taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// Name derived from the templates' digest. Identical template lists map to
/// the same base name; collisions append a base-52 suffix.
fn probe_content_hash(templates: &[String], taken: impl Fn(&str) -> bool) -> String {
    let mut hasher = Sha256::new();
    for template in templates {
        hasher.update(template.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hasher.finalize();

    let base: String = digest
        .iter()
        .take(HASHED_NAME_LEN)
        .map(|b| NAME_ALPHABET[*b as usize % NAME_ALPHABET.len()] as char)
        .collect();

    if !taken(&base) {
        return base;
    }

    let mut suffix = 0;
    loop {
        let candidate = format!("{base}{}", sequential_name(suffix));
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
