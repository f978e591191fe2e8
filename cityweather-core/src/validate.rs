//! City-name validation, run before a name is used as a lookup key or
//! persisted. Pure; never touches the network.

use thiserror::Error;

pub const MIN_CITY_LEN: usize = 2;
pub const MAX_CITY_LEN: usize = 50;

/// Why a candidate city name was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("City name is required")]
    Required,

    #[error("City name must be at least {MIN_CITY_LEN} characters long")]
    TooShort,

    #[error("City name must be less than {MAX_CITY_LEN} characters")]
    TooLong,

    #[error("City name contains invalid characters")]
    InvalidCharacters,
}

/// Validate a raw city name and return the trimmed slice on success.
///
/// Allowed characters are Unicode letters, whitespace, hyphens, apostrophes
/// and periods; digits and other punctuation are rejected. Length limits are
/// applied after trimming.
pub fn validate_city_name(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required);
    }

    let len = trimmed.chars().count();
    if len < MIN_CITY_LEN {
        return Err(ValidationError::TooShort);
    }
    if len > MAX_CITY_LEN {
        return Err(ValidationError::TooLong);
    }

    let allowed = |c: char| c.is_alphabetic() || c.is_whitespace() || matches!(c, '-' | '\'' | '.');
    if !trimmed.chars().all(allowed) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only_are_required() {
        assert_eq!(validate_city_name(""), Err(ValidationError::Required));
        assert_eq!(validate_city_name("   "), Err(ValidationError::Required));
    }

    #[test]
    fn single_character_is_too_short() {
        assert_eq!(validate_city_name("A"), Err(ValidationError::TooShort));
    }

    #[test]
    fn fifty_one_letters_is_too_long() {
        let name = "a".repeat(51);
        assert_eq!(validate_city_name(&name), Err(ValidationError::TooLong));

        let name = "a".repeat(50);
        assert!(validate_city_name(&name).is_ok());
    }

    #[test]
    fn digits_and_symbols_are_invalid() {
        assert_eq!(
            validate_city_name("City123"),
            Err(ValidationError::InvalidCharacters)
        );
        assert_eq!(
            validate_city_name("City!"),
            Err(ValidationError::InvalidCharacters)
        );
    }

    #[test]
    fn unicode_letters_hyphens_apostrophes_periods_are_valid() {
        assert_eq!(validate_city_name("São Paulo"), Ok("São Paulo"));
        assert_eq!(validate_city_name("Saint-Étienne"), Ok("Saint-Étienne"));
        assert_eq!(validate_city_name("L'Aquila"), Ok("L'Aquila"));
        assert_eq!(validate_city_name("St. Louis"), Ok("St. Louis"));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(validate_city_name("  London  "), Ok("London"));
    }

    #[test]
    fn length_limits_apply_after_trimming() {
        assert_eq!(validate_city_name("  A  "), Err(ValidationError::TooShort));
    }
}
