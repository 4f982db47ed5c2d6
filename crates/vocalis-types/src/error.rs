use thiserror::Error;

/// Errors raised while declaring a skill.
///
/// Every variant is fatal to the declaring call; nothing is coerced or
/// silently dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Intent name {0} is invalid. Only lowercase and uppercase letters are allowed")]
    InvalidIntentName(String),

    #[error(
        "Sample utterance: '{0}' is not valid. Each sample utterance must consist only of \
         alphabet characters, spaces, dots, hyphens, brackets and single quotes"
    )]
    InvalidUtterance(String),

    #[error("Built-in Intent name {name} is invalid. Please use one of: {valid}")]
    UnknownBuiltInIntent { name: String, valid: String },

    #[error("Intent with name {0} is already defined")]
    DuplicateIntent(String),

    #[error("Slot with name {0} is already defined")]
    DuplicateCustomSlot(String),

    #[error("Slot with name {0} is already defined in built-in slots.")]
    ReservedSlotName(String),

    #[error(
        "Custom slot name {0} is invalid. Only lowercase, uppercase letters and underscores are allowed"
    )]
    InvalidCustomSlotName(String),

    #[error(
        "Custom slot with name {slot} contains invalid special character(~, ^, *, (, ), [, ], §, !, ?, ;, :, \" and |): {value}"
    )]
    InvalidCustomSlotValue { slot: String, value: String },

    #[error("Action endpoint '{0}' does not reference a declared intent")]
    UnknownActionEndpoint(String),

    #[error("Action endpoint '{0}' cannot be used as a transition target")]
    InvalidActionTarget(String),
}

/// Fatal errors raised while dispatching a request. No response is
/// produced when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Application id: '{0}' is not valid")]
    Unauthorized(String),

    #[error("Nonexistent intent: '{0}'")]
    UnknownIntent(String),

    #[error("Unsupported request: '{0}'")]
    UnsupportedRequest(String),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Handler for '{0}' dropped its completion without replying")]
    HandlerAbandoned(String),
}

/// Errors from writing generated speech assets.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}
