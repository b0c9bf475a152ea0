use crate::error::ValidationError;

/// Shortest accepted input, counted in characters after trimming.
pub const MIN_TEXT_CHARS: usize = 3;

/// Trims the raw field value and checks it is worth sending.
///
/// Checks run in order and stop at the first failure: empty first, then
/// too short. The returned slice borrows from `raw`.
pub fn validate_input(raw: &str) -> Result<&str, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::Empty);
    }
    if text.chars().count() < MIN_TEXT_CHARS {
        return Err(ValidationError::TooShort);
    }
    Ok(text)
}
