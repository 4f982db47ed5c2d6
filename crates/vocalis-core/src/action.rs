//! Declared conversation transitions.
//!
//! When a skill declares at least one action, an intent request is only
//! handled if an action permits moving from the session's `previousIntent`
//! to the requested intent. Lookup runs three passes in order and the first
//! hit wins:
//!
//! 1. `from == previous` and `to == target`
//! 2. `from == previous` and `to == *`
//! 3. `from == *` and `to == target`
//!
//! A `* -> *` action therefore never matches.

use std::fmt;
use std::sync::Arc;

use vocalis_types::interaction::Endpoint;
use vocalis_types::{Attributes, Slots};

use crate::handler::{Guard, Handler};

#[derive(Clone)]
pub struct Action {
    pub from: Endpoint,
    pub to: Endpoint,
    /// Absent means the transition is always permitted.
    pub guard: Option<Guard>,
    /// Runs instead of the skill-wide fallback when the guard fails.
    pub on_reject: Option<Handler>,
}

impl Action {
    /// An unguarded transition from `from` to `to`.
    pub fn new(from: impl Into<Endpoint>, to: impl Into<Endpoint>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            guard: None,
            on_reject: None,
        }
    }

    /// Only permit the transition when `guard` returns `true`.
    pub fn when<F>(mut self, guard: F) -> Self
    where
        F: Fn(&Slots, &Attributes) -> bool + Send + Sync + 'static,
    {
        self.guard = Some(Arc::new(guard));
        self
    }

    /// Handler to run when the guard refuses.
    pub fn on_reject(mut self, handler: Handler) -> Self {
        self.on_reject = Some(handler);
        self
    }

    /// Evaluate the guard.
    pub fn permits(&self, slots: &Slots, attributes: &Attributes) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard(slots, attributes))
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guarded", &self.guard.is_some())
            .field("on_reject", &self.on_reject)
            .finish()
    }
}

/// Actions in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ActionTable {
    actions: Vec<Action>,
}

impl ActionTable {
    pub fn new(actions: Vec<Action>) -> Self {
        Self { actions }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter()
    }

    /// The action governing `previous -> target`, if any.
    ///
    /// With no `previous` only the `* -> target` pass can match.
    pub fn find(&self, previous: Option<&str>, target: &str) -> Option<&Action> {
        previous
            .and_then(|previous| {
                self.exact(previous, target)
                    .or_else(|| self.from_previous_to_any(previous))
            })
            .or_else(|| self.from_any_to_target(target))
    }

    fn exact(&self, previous: &str, target: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|a| a.from.names(previous) && a.to.names(target))
    }

    fn from_previous_to_any(&self, previous: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|a| a.from.names(previous) && a.to.is_any())
    }

    fn from_any_to_target(&self, target: &str) -> Option<&Action> {
        self.actions
            .iter()
            .find(|a| a.from.is_any() && a.to.names(target))
    }
}
