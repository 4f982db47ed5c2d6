//! Character-class rules for declared names, utterances and slot values.
//!
//! Pure predicates. Callers decide which `ValidationError` to raise.

/// Characters a custom slot value must not contain.
const FORBIDDEN_SLOT_VALUE_CHARS: [char; 14] = [
    '~', '^', '*', '(', ')', '[', ']', '§', '!', '?', ';', ':', '"', '|',
];

/// Intent names consist only of lowercase and uppercase letters.
pub fn is_identifier_valid(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// Canonical utterances consist only of letters, whitespace, periods for
/// abbreviations, possessive apostrophes, hyphens and slot braces.
pub fn is_utterance_valid(utterance: &str) -> bool {
    utterance
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace() || matches!(c, '.' | '\'' | '-' | '{' | '}'))
}

/// Custom slot names consist only of letters and underscores.
pub fn is_custom_slot_name_valid(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic() || c == '_')
}

pub fn is_custom_slot_value_valid(value: &str) -> bool {
    !value.contains(FORBIDDEN_SLOT_VALUE_CHARS)
}
