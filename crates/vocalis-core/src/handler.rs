//! Handler calling conventions and the reply type.
//!
//! A handler is registered either as `Handler::Sync`, returning its reply
//! directly, or as `Handler::Suspending`, which receives a one-shot
//! `Completion` it must call exactly once, possibly from another task. The
//! tag is chosen at registration; the dispatcher never inspects the
//! closure.

use std::fmt;
use std::sync::Arc;

use tokio::sync::oneshot;
use vocalis_types::error::DispatchError;
use vocalis_types::request::SkillRequest;
use vocalis_types::response::CardImage;
use vocalis_types::{Attributes, Slots};

pub type SyncFn = dyn Fn(&Slots, &mut Attributes, &SkillRequest) -> Reply + Send + Sync;

/// Suspending handlers own a snapshot of the attributes. Changes reach the
/// response only through `Reply::attributes`.
pub type SuspendingFn = dyn Fn(Slots, Attributes, Arc<SkillRequest>, Completion) + Send + Sync;

/// Transition guard: `true` lets the target intent run.
pub type Guard = Arc<dyn Fn(&Slots, &Attributes) -> bool + Send + Sync>;

#[derive(Clone)]
pub enum Handler {
    Sync(Arc<SyncFn>),
    Suspending(Arc<SuspendingFn>),
}

impl Handler {
    /// Wrap a closure that answers directly.
    pub fn sync<F, R>(f: F) -> Self
    where
        F: Fn(&Slots, &mut Attributes, &SkillRequest) -> R + Send + Sync + 'static,
        R: Into<Reply>,
    {
        Self::Sync(Arc::new(
            move |slots: &Slots, attributes: &mut Attributes, request: &SkillRequest| {
                f(slots, attributes, request).into()
            },
        ))
    }

    /// Wrap a closure that answers later through its `Completion`.
    pub fn suspending<F>(f: F) -> Self
    where
        F: Fn(Slots, Attributes, Arc<SkillRequest>, Completion) + Send + Sync + 'static,
    {
        Self::Suspending(Arc::new(f))
    }

    /// A sync handler that always answers with `reply`.
    pub fn reply(reply: impl Into<Reply>) -> Self {
        let reply = reply.into();
        Self::sync(move |_, _, _| reply.clone())
    }

    /// Run the handler and wait for its reply.
    ///
    /// `label` names the handler in the error returned when a suspending
    /// handler drops its completion.
    pub(crate) async fn invoke(
        &self,
        label: &str,
        slots: Slots,
        attributes: &mut Attributes,
        request: &Arc<SkillRequest>,
    ) -> Result<Reply, DispatchError> {
        match self {
            Self::Sync(f) => Ok(f(&slots, attributes, request)),
            Self::Suspending(f) => {
                let (tx, rx) = oneshot::channel();
                f(slots, attributes.clone(), Arc::clone(request), Completion { tx });
                rx.await
                    .map_err(|_| DispatchError::HandlerAbandoned(label.to_string()))
            }
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sync(_) => f.write_str("Handler::Sync"),
            Self::Suspending(_) => f.write_str("Handler::Suspending"),
        }
    }
}

/// One-shot reply channel handed to a suspending handler.
///
/// `done` consumes the completion, so a second call does not compile.
/// Dropping it without calling `done` fails the request.
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<Reply>,
}

impl Completion {
    /// Deliver the reply and release the waiting request.
    pub fn done(self, reply: impl Into<Reply>) {
        // The receiver is gone only if the request future was dropped.
        let _ = self.tx.send(reply.into());
    }
}

/// What a handler answers with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reply {
    /// Speech text, or markup when `ssml` is set.
    pub text: String,
    /// Applies to both `text` and `reprompt`.
    pub ssml: bool,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    /// Overrides the configured session-end default.
    pub end_session: Option<bool>,
    /// Replaces the session attributes returned to the platform.
    pub attributes: Option<Attributes>,
    /// Marks an error outcome; `previousIntent` is not advanced.
    pub error: bool,
}

impl Reply {
    /// Plain-text speech.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// SSML speech; the reprompt is read as SSML too.
    pub fn ssml(markup: impl Into<String>) -> Self {
        Self {
            text: markup.into(),
            ssml: true,
            ..Self::default()
        }
    }

    /// Speech used when the user stays silent.
    pub fn reprompt(mut self, reprompt: impl Into<String>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    /// Attach a card for the companion app.
    pub fn card(mut self, card: Card) -> Self {
        self.card = Some(card);
        self
    }

    /// Close or keep open the session regardless of the configured default.
    pub fn end_session(mut self, end: bool) -> Self {
        self.end_session = Some(end);
        self
    }

    /// Return these attributes instead of the handler's working copy.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Mark the reply as an error outcome.
    pub fn error(mut self) -> Self {
        self.error = true;
        self
    }
}

impl From<&str> for Reply {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Reply {
    fn from(value: String) -> Self {
        Self::text(value)
    }
}

/// Card attached to a reply. `kind` defaults to `Simple` in the response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    pub kind: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub text: Option<String>,
    pub image: Option<CardImage>,
}

impl Card {
    /// A `Simple` card with a title and body.
    pub fn simple(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }
}
