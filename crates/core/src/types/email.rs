//! Email address type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// The input is empty after trimming.
    #[error("email cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("email must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input does not contain an @ symbol.
    #[error("email must contain an @ symbol")]
    MissingAtSymbol,
}

/// An email address as accepted by the portal forms.
///
/// The portal only asks for a contact address, so validation is deliberately
/// shallow: surrounding whitespace is trimmed, and the remainder must be
/// non-empty and contain an `@`.
///
/// ## Examples
///
/// ```
/// use diario_core::Email;
///
/// assert!(Email::parse("maria@ex.com").is_ok());
/// assert!(Email::parse("  maria@ex.com ").is_ok());
///
/// assert!(Email::parse("").is_err());
/// assert!(Email::parse("maria.ex.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Maximum length of an email address (RFC 5321).
    pub const MAX_LENGTH: usize = 254;

    /// Parse an `Email` from a string, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty, longer than 254
    /// characters, or has no `@`.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(EmailError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s.contains('@') {
            return Err(EmailError::MissingAtSymbol);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the email address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Email` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_emails() {
        assert!(Email::parse("maria@ex.com").is_ok());
        assert!(Email::parse("user+tag@example.com").is_ok());
        // Only the @ is required; the portal does not check domains.
        assert!(Email::parse("a@b").is_ok());
        assert!(Email::parse("@").is_ok());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let email = Email::parse("  maria@ex.com\n").unwrap();
        assert_eq!(email.as_str(), "maria@ex.com");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Email::parse(""), Err(EmailError::Empty)));
        assert!(matches!(Email::parse("   "), Err(EmailError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert!(matches!(
            Email::parse(&long),
            Err(EmailError::TooLong { .. })
        ));
    }

    #[test]
    fn test_parse_missing_at() {
        assert!(matches!(
            Email::parse("maria.ex.com"),
            Err(EmailError::MissingAtSymbol)
        ));
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let parsed: Result<Email, _> = serde_json::from_str("\"no-at-symbol\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let email = Email::parse("maria@ex.com").unwrap();
        assert_eq!(serde_json::to_string(&email).unwrap(), "\"maria@ex.com\"");
    }
}
