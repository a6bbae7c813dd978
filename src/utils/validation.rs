//! Validation Utilities
//!
//! Input validation functions for request payloads and query parameters.

use regex::Regex;
use std::sync::OnceLock;
use validator::ValidationError;

/// Validates email address format
pub fn validate_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    regex.is_match(email)
}

/// Normalizes email address to lowercase and removes surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a person-name part (2-50 characters, letters/spaces/hyphens/apostrophes)
pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    if trimmed.len() < 2 || trimmed.len() > 50 {
        return false;
    }

    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = NAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("Failed to compile name regex"));

    regex.is_match(trimmed)
}

/// Validates a phone number in loose international format
pub fn validate_phone(phone: &str) -> bool {
    static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PHONE_REGEX.get_or_init(|| {
        Regex::new(r"^\+?[0-9]{7,15}$").expect("Failed to compile phone regex")
    });

    regex.is_match(phone.trim())
}

/// Validates a hex device-id hash (sha256 lowercase hex)
pub fn validate_device_hash(hash: &str) -> bool {
    !hash.is_empty() && hash.len() <= 128 && hash.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Custom validator for email fields using the validator crate
pub fn email_validator(email: &str) -> Result<(), ValidationError> {
    if validate_email(email) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_email"))
    }
}

/// Custom validator for device hash fields using the validator crate
pub fn device_hash_validator(hash: &str) -> Result<(), ValidationError> {
    if validate_device_hash(hash) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_device_hash"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_emails() {
        assert!(validate_email("admin@creditjambo.com"));
        assert!(validate_email("first.last+tag@example.co.uk"));
    }

    #[test]
    fn rejects_invalid_emails() {
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("missing@tld"));
        assert!(!validate_email("@example.com"));
    }

    #[test]
    fn normalizes_email_case_and_whitespace() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
    }

    #[test]
    fn name_length_bounds() {
        assert!(validate_name("Jo"));
        assert!(!validate_name("J"));
        assert!(validate_name("Anne-Marie O'Neil"));
        assert!(!validate_name("Robert123"));
    }

    #[test]
    fn phone_formats() {
        assert!(validate_phone("+250788123456"));
        assert!(validate_phone("0788123456"));
        assert!(!validate_phone("phone"));
        assert!(!validate_phone("+1 555 1234"));
    }

    #[test]
    fn device_hash_shape() {
        assert!(validate_device_hash("h1"));
        assert!(validate_device_hash(&"a".repeat(64)));
        assert!(!validate_device_hash(""));
        assert!(!validate_device_hash(&"a".repeat(129)));
        assert!(!validate_device_hash("bad hash!"));
    }
}
