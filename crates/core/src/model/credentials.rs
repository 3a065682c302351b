use serde::Serialize;
use thiserror::Error;

/// Minimum accepted password length for sign-in and sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CredentialsError {
    #[error("please enter a valid email address")]
    InvalidEmail,

    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
}

/// Validated email + password pair for the authentication collaborator.
///
/// Validation happens once at construction so the services layer can assume
/// well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Validates and builds credentials.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::InvalidEmail` for malformed addresses and
    /// `CredentialsError::PasswordTooShort` for passwords under
    /// `MIN_PASSWORD_LEN` characters.
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if !is_valid_email(email) {
            return Err(CredentialsError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialsError::PasswordTooShort);
        }
        Ok(Self {
            email: email.to_ascii_lowercase(),
            password: password.to_string(),
        })
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Domain needs at least one dot with labels on both sides.
    domain
        .split('.')
        .filter(|label| !label.is_empty())
        .count()
        >= 2
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_credentials() {
        let creds = Credentials::new("Ada@Example.com", "secret1").unwrap();
        assert_eq!(creds.email(), "ada@example.com");
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "@example.com", "a@b", "a b@example.com", "a@@example.com"] {
            assert_eq!(
                Credentials::new(email, "secret1").unwrap_err(),
                CredentialsError::InvalidEmail,
                "expected rejection for {email:?}"
            );
        }
    }

    #[test]
    fn rejects_short_passwords() {
        let result = Credentials::new("ada@example.com", "12345");
        assert_eq!(result.unwrap_err(), CredentialsError::PasswordTooShort);
    }

    #[test]
    fn six_character_password_is_the_floor() {
        assert!(Credentials::new("ada@example.com", "123456").is_ok());
    }
}
