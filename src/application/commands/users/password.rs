use crate::application::error::{ApplicationError, ApplicationResult};

pub(super) const MIN_PASSWORD_LENGTH: usize = 12;

const CHARACTER_CLASSES: [(&str, fn(char) -> bool); 4] = [
    ("an uppercase letter", char::is_uppercase),
    ("a lowercase letter", char::is_lowercase),
    ("a digit", |c| c.is_ascii_digit()),
    ("a symbol", |c| !c.is_alphanumeric()),
];

/// Staff passwords: at least twelve characters drawn from every class.
/// Amharic letters have no case, so they only count towards the length.
pub(super) fn validate_password(password: &str) -> ApplicationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ApplicationError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let missing: Vec<&str> = CHARACTER_CLASSES
        .iter()
        .filter(|(_, matches)| !password.chars().any(*matches))
        .map(|(label, _)| *label)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApplicationError::validation(format!(
            "password needs {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_mixed_passwords() {
        assert!(validate_password("Str0ng!Passphrase").is_ok());
    }

    #[test]
    fn reports_every_missing_class() {
        let err = validate_password("alllowercaseletters").unwrap_err();
        assert_eq!(
            err.to_string(),
            "validation error: password needs an uppercase letter, a digit, a symbol"
        );
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(validate_password("ሰላም1!Aሰላም").is_err());
    }
}
