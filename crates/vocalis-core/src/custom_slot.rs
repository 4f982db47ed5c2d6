//! Custom slot declaration.

use vocalis_types::builtin;
use vocalis_types::error::ValidationError;
use vocalis_types::interaction::CustomSlot;

use crate::validator;

/// Validate and build a custom slot type.
///
/// The name must be new, must not shadow a built-in slot type and may only
/// contain letters and underscores. Every value is checked; the first bad
/// one fails the declaration. Values are kept in order, duplicates
/// included.
pub fn create_custom_slot<I, S>(
    existing: &[CustomSlot],
    name: &str,
    values: I,
) -> Result<CustomSlot, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    if existing.iter().any(|slot| slot.name == name) {
        return Err(ValidationError::DuplicateCustomSlot(name.to_string()));
    }
    if builtin::is_built_in_slot(name) {
        return Err(ValidationError::ReservedSlotName(name.to_string()));
    }
    if !validator::is_custom_slot_name_valid(name) {
        return Err(ValidationError::InvalidCustomSlotName(name.to_string()));
    }

    let values: Vec<String> = values.into_iter().map(Into::into).collect();
    if let Some(bad) = values.iter().find(|v| !validator::is_custom_slot_value_valid(v)) {
        return Err(ValidationError::InvalidCustomSlotValue {
            slot: name.to_string(),
            value: bad.clone(),
        });
    }

    Ok(CustomSlot {
        name: name.to_string(),
        values,
    })
}
