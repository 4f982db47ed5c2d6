//! Utterance template parsing.
//!
//! Templates carry typed slot placeholders (`My age is {age:Number}`). The
//! parser collects one `SlotDescriptor` per distinct slot name and rewrites
//! every placeholder to its canonical `{age}` form, which is what the
//! platform expects in the sample utterance list.

use vocalis_types::builtin;
use vocalis_types::error::ValidationError;
use vocalis_types::interaction::SlotDescriptor;

use crate::validator;

/// Slots and canonical utterances extracted from one declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUtterances {
    pub slots: Vec<SlotDescriptor>,
    pub utterances: Vec<String>,
}

/// A `{name:type}` match inside a template, as byte offsets.
struct Placeholder<'a> {
    start: usize,
    end: usize,
    name: &'a str,
    slot_type: &'a str,
}

/// Parse all templates of a single declaration.
///
/// A slot name used by several templates yields a single descriptor whose
/// type is the one seen first. Fails on the first template whose canonical
/// form is not a valid utterance.
pub fn parse_utterances<I, S>(templates: I) -> Result<ParsedUtterances, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parsed = ParsedUtterances::default();

    for template in templates {
        let template = template.as_ref();
        let canonical = rewrite(template, |placeholder| {
            if !parsed.slots.iter().any(|slot| slot.name == placeholder.name) {
                parsed.slots.push(SlotDescriptor {
                    name: placeholder.name.to_string(),
                    slot_type: expand_slot_type(placeholder.slot_type),
                });
            }
        });

        if !validator::is_utterance_valid(&canonical) {
            return Err(ValidationError::InvalidUtterance(template.to_string()));
        }
        parsed.utterances.push(canonical);
    }

    Ok(parsed)
}

/// Map a built-in slot alias to its namespaced type; anything else is
/// kept verbatim (custom slot names, already namespaced types).
fn expand_slot_type(slot_type: &str) -> String {
    builtin::built_in_slot_type(slot_type)
        .unwrap_or(slot_type)
        .to_string()
}

/// Rewrite every typed placeholder of `template` to `{name}`.
fn rewrite(template: &str, mut on_match: impl FnMut(&Placeholder<'_>)) -> String {
    let mut out = String::with_capacity(template.len());
    let mut cursor = 0;

    while let Some(placeholder) = next_placeholder(template, cursor) {
        on_match(&placeholder);
        out.push_str(&template[cursor..placeholder.start]);
        out.push('{');
        out.push_str(placeholder.name);
        out.push('}');
        cursor = placeholder.end;
    }

    out.push_str(&template[cursor..]);
    out
}

/// Find the leftmost placeholder at or after `from`.
///
/// The name runs to the first `:` and the type to the first `}` after it.
/// Neither may be empty, contain a brace, or span a line break; an opening
/// brace that does not start a placeholder is skipped.
fn next_placeholder(template: &str, from: usize) -> Option<Placeholder<'_>> {
    let mut search = from;

    while let Some(offset) = template[search..].find('{') {
        let start = search + offset;
        let body = &template[start + 1..];

        if let Some((name, slot_type)) = split_placeholder(body) {
            let end = start + 1 + name.len() + 1 + slot_type.len() + 1;
            return Some(Placeholder {
                start,
                end,
                name,
                slot_type,
            });
        }

        search = start + 1;
    }

    None
}

fn split_placeholder(body: &str) -> Option<(&str, &str)> {
    let colon = body.find(|c: char| matches!(c, ':' | '{' | '}' | '\n'))?;
    if !body[colon..].starts_with(':') || colon == 0 {
        return None;
    }
    let name = &body[..colon];

    let rest = &body[colon + 1..];
    let close = rest.find(|c: char| matches!(c, '{' | '}' | '\n'))?;
    if !rest[close..].starts_with('}') || close == 0 {
        return None;
    }

    Some((name, &rest[..close]))
}
