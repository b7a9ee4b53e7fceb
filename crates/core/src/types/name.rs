//! Display name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PersonName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// The input is empty after trimming.
    #[error("name cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length in characters.
        max: usize,
    },
}

/// A person's display name, trimmed and non-empty.
///
/// ```
/// use diario_core::PersonName;
///
/// assert_eq!(PersonName::parse(" Maria Silva ").unwrap().as_str(), "Maria Silva");
/// assert!(PersonName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PersonName(String);

impl PersonName {
    /// Maximum length of a display name, in characters.
    pub const MAX_LENGTH: usize = 200;

    /// Parse a `PersonName`, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed input is empty or too long.
    pub fn parse(s: &str) -> Result<Self, NameError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(NameError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the uppercased first character, used for avatar initials.
    #[must_use]
    pub fn initial(&self) -> String {
        self.0
            .chars()
            .next()
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PersonName {
    type Error = NameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PersonName> for String {
    fn from(name: PersonName) -> Self {
        name.0
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let name = PersonName::parse("  Maria Silva\t").unwrap();
        assert_eq!(name.as_str(), "Maria Silva");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(PersonName::parse(""), Err(NameError::Empty));
        assert_eq!(PersonName::parse(" \n "), Err(NameError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "á".repeat(PersonName::MAX_LENGTH + 1);
        assert!(matches!(
            PersonName::parse(&long),
            Err(NameError::TooLong { .. })
        ));
        // Counted in characters, not bytes.
        assert!(PersonName::parse(&"á".repeat(PersonName::MAX_LENGTH)).is_ok());
    }

    #[test]
    fn test_initial() {
        assert_eq!(PersonName::parse("ândrea").unwrap().initial(), "Â");
    }

    #[test]
    fn test_deserialize_rejects_blank() {
        let parsed: Result<PersonName, _> = serde_json::from_str("\"  \"");
        assert!(parsed.is_err());
    }
}
