//! Checks run on the form inputs before any request leaves the machine.
//!
//! Only the prefix and a minimum length are enforced on the key. The
//! 56-character and character-set rules appear in the guidance text shown
//! to the user but are not checked.

pub const KEY_PREFIX: &str = "gsk_";
pub const MIN_KEY_LEN: usize = 20;
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Trimmed inputs that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub credential: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter an API key")]
    MissingCredential,
    #[error("Key appears too short. Valid Groq keys are 56 characters long")]
    CredentialTooShort,
    #[error(
        "Invalid API key format. Valid Groq keys should:\n\
         - Start with 'gsk_'\n\
         - Be 56 characters long\n\
         - Contain only letters, numbers, and underscores"
    )]
    MalformedCredential,
    #[error("Please enter an error message before submitting")]
    MissingDescription,
}

impl ValidationError {
    /// A warning blocks submission without putting the form in an error state.
    pub fn is_warning(self) -> bool {
        matches!(self, ValidationError::MissingDescription)
    }
}

pub fn validate(raw_credential: &str, raw_description: &str) -> Result<Submission, ValidationError> {
    let credential = raw_credential.trim();
    if credential.is_empty() {
        return Err(ValidationError::MissingCredential);
    }
    if credential.chars().count() < MIN_KEY_LEN {
        return Err(ValidationError::CredentialTooShort);
    }
    if !credential.starts_with(KEY_PREFIX) {
        return Err(ValidationError::MalformedCredential);
    }

    let description = raw_description.trim();
    if description.is_empty() {
        return Err(ValidationError::MissingDescription);
    }

    Ok(Submission {
        credential: credential.to_string(),
        description: description.to_string(),
    })
}

/// Cuts input down to the text-area limit, counting characters not bytes.
pub fn clip_description(raw: &str) -> &str {
    match raw.char_indices().nth(MAX_DESCRIPTION_CHARS) {
        Some((idx, _)) => &raw[..idx],
        None => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_KEY: &str = "gsk_abcdefghijklmnopqrstuvwxyz0123456789ABCDEFGHIJKLMNOP";

    #[test]
    fn blank_key_is_missing() {
        assert_eq!(validate("   ", "DUMP"), Err(ValidationError::MissingCredential));
        assert_eq!(validate("", ""), Err(ValidationError::MissingCredential));
    }

    #[test]
    fn short_key_rejected_regardless_of_description() {
        for key in ["gsk_", "gsk_short", "  x  ", "gsk_123456789012345"] {
            for description in ["", "  ", "SAPSQL_ARRAY_INSERT_DUPREC"] {
                assert_eq!(
                    validate(key, description),
                    Err(ValidationError::CredentialTooShort),
                    "key {key:?}"
                );
            }
        }
    }

    #[test]
    fn length_is_measured_after_trimming() {
        let padded = format!("   {}   ", "gsk_1234567890123");
        assert_eq!(validate(&padded, "x"), Err(ValidationError::CredentialTooShort));
    }

    #[test]
    fn wrong_prefix_is_malformed_even_when_long() {
        assert_eq!(
            validate("sk-abcdefghijklmnopqrstuvwxyz", "error"),
            Err(ValidationError::MalformedCredential)
        );
        assert_eq!(
            validate("GSK_abcdefghijklmnopqrstuvwxyz", "error"),
            Err(ValidationError::MalformedCredential)
        );
    }

    #[test]
    fn malformed_message_lists_expected_shape() {
        let message = ValidationError::MalformedCredential.to_string();
        assert!(message.contains("Start with 'gsk_'"));
        assert!(message.contains("56 characters"));
        assert!(message.contains("letters, numbers, and underscores"));
    }

    #[test]
    fn documented_length_and_charset_are_not_enforced() {
        // 20 chars with punctuation passes: only prefix and minimum length are checked.
        let key = "gsk_!!!!????----....";
        assert_eq!(key.len(), 20);
        assert!(validate(key, "error").is_ok());
    }

    #[test]
    fn blank_description_is_a_warning() {
        let err = validate(GOOD_KEY, " \n\t ").unwrap_err();
        assert_eq!(err, ValidationError::MissingDescription);
        assert!(err.is_warning());
        assert!(!ValidationError::MalformedCredential.is_warning());
    }

    #[test]
    fn valid_inputs_come_back_trimmed() {
        let submission = validate(&format!("  {GOOD_KEY}\n"), "  DBIF_RSQL_INVALID_RSQL \n").unwrap();
        assert_eq!(submission.credential, GOOD_KEY);
        assert_eq!(submission.description, "DBIF_RSQL_INVALID_RSQL");
    }

    #[test]
    fn clip_respects_char_boundaries() {
        let long = "ä".repeat(MAX_DESCRIPTION_CHARS + 10);
        let clipped = clip_description(&long);
        assert_eq!(clipped.chars().count(), MAX_DESCRIPTION_CHARS);
        assert_eq!(clip_description("short"), "short");
    }
}
