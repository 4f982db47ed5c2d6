//! Platform-reserved intents and slot types.
//!
//! Built-in intents are declared by their short name (`stop`, `help`, ...)
//! and surface under the platform-namespaced identifier
//! (`AMAZON.StopIntent`). Built-in slot types work the same way for slot
//! placeholders (`{age:Number}` becomes `AMAZON.NUMBER`).

/// Start marker written to `previousIntent` on a new session.
pub const SESSION_START: &str = "@start";

/// Wildcard action endpoint.
pub const WILDCARD: &str = "*";

/// Short name -> namespaced identifier for the 11 built-in intents.
pub const BUILT_IN_INTENTS: [(&str, &str); 11] = [
    ("cancel", "AMAZON.CancelIntent"),
    ("help", "AMAZON.HelpIntent"),
    ("next", "AMAZON.NextIntent"),
    ("no", "AMAZON.NoIntent"),
    ("pause", "AMAZON.PauseIntent"),
    ("previous", "AMAZON.PreviousIntent"),
    ("repeat", "AMAZON.RepeatIntent"),
    ("resume", "AMAZON.ResumeIntent"),
    ("startOver", "AMAZON.StartOverIntent"),
    ("stop", "AMAZON.StopIntent"),
    ("yes", "AMAZON.YesIntent"),
];

/// Alias -> namespaced type for the 18 built-in slot types.
pub const BUILT_IN_SLOTS: [(&str, &str); 18] = [
    ("Date", "AMAZON.DATE"),
    ("Duration", "AMAZON.DURATION"),
    ("FourDigitNumber", "AMAZON.FOUR_DIGIT_NUMBER"),
    ("Number", "AMAZON.NUMBER"),
    ("Time", "AMAZON.TIME"),
    ("USCity", "AMAZON.US_CITY"),
    ("USFirstname", "AMAZON.US_FIRST_NAME"),
    ("USState", "AMAZON.US_STATE"),
    ("ATCity", "AMAZON.AT_CITY"),
    ("ATRegion", "AMAZON.AT_REGION"),
    ("DECity", "AMAZON.DE_CITY"),
    ("DEFirstname", "AMAZON.DE_FIRST_NAME"),
    ("DERegion", "AMAZON.DE_REGION"),
    ("GBCity", "AMAZON.GB_CITY"),
    ("GBFirstname", "AMAZON.GB_FIRST_NAME"),
    ("GBRegion", "AMAZON.GB_REGION"),
    ("EUCity", "AMAZON.EUROPE_CITY"),
    ("Literal", "AMAZON.LITERAL"),
];

/// Look up the namespaced identifier of a built-in intent short name.
pub fn built_in_intent(short_name: &str) -> Option<&'static str> {
    BUILT_IN_INTENTS
        .iter()
        .find(|(short, _)| *short == short_name)
        .map(|(_, full)| *full)
}

/// Whether `name` is a built-in intent, either by short name or by its
/// namespaced identifier.
pub fn is_reserved_intent_name(name: &str) -> bool {
    BUILT_IN_INTENTS
        .iter()
        .any(|(short, full)| *short == name || *full == name)
}

/// Comma-separated list of the built-in intent short names.
pub fn built_in_intent_names() -> String {
    BUILT_IN_INTENTS
        .iter()
        .map(|(short, _)| *short)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Expand a slot type alias (`Number`) to its namespaced type. Returns
/// `None` for anything that is not an alias.
pub fn built_in_slot_type(alias: &str) -> Option<&'static str> {
    BUILT_IN_SLOTS
        .iter()
        .find(|(short, _)| *short == alias)
        .map(|(_, full)| *full)
}

/// Whether `name` collides with a built-in slot alias or namespaced type.
pub fn is_built_in_slot(name: &str) -> bool {
    BUILT_IN_SLOTS
        .iter()
        .any(|(short, full)| *short == name || *full == name)
}
