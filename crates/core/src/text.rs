//! Text-field rules imposed by the flat snapshot format.

use crate::error::{DomainError, DomainResult};

/// Characters that would break the comma-delimited, line-oriented snapshot.
const RESERVED: [char; 3] = [',', '\n', '\r'];

/// Ensure a text field can be stored without escaping.
///
/// The field must not contain the field delimiter or a record separator, and
/// must not carry leading/trailing whitespace (the loader trims lines).
pub fn ensure_field(field: &str, value: &str) -> DomainResult<()> {
    if value.contains(RESERVED) {
        return Err(DomainError::validation(format!(
            "{field} must not contain commas or line breaks"
        )));
    }
    if value.trim() != value {
        return Err(DomainError::validation(format!(
            "{field} must not start or end with whitespace"
        )));
    }
    Ok(())
}
