//! The authenticated identity and the login form that creates it.
//!
//! An [`Identity`] only comes into existence through [`LoginForm::validate`]
//! followed by [`Identity::register`], so holding one means the user passed
//! every login check. The same checks run again when a stored identity is
//! read back, which is how corrupted entries are detected.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Email, EmailError, IdentityId, NameError, PersonName};

/// Raw login form input, exactly as submitted.
///
/// Checkboxes that were left unticked are absent from the submission and
/// default to `false`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub lgpd_accepted: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
}

/// Reasons a login form is rejected.
///
/// Checks run in declaration order and the first failure is reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    #[error("invalid name: {0}")]
    Name(#[from] NameError),

    #[error("invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("terms of use not accepted")]
    TermsNotAccepted,

    #[error("privacy policy (LGPD) not accepted")]
    LgpdNotAccepted,
}

impl LoginError {
    /// Message shown next to the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Name(_) => "Por favor, insira seu nome",
            Self::Email(_) => "Por favor, insira um e-mail válido",
            Self::TermsNotAccepted => "Você deve aceitar os termos de uso",
            Self::LgpdNotAccepted => "Você deve aceitar a política de privacidade",
        }
    }
}

/// A login form that passed validation: everything an [`Identity`] needs
/// except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: PersonName,
    pub email: Email,
    pub notifications_enabled: bool,
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: empty name, email without `@`,
    /// terms not accepted, LGPD consent not given.
    pub fn validate(&self) -> Result<Registration, LoginError> {
        let name = PersonName::parse(&self.name)?;
        let email = Email::parse(&self.email)?;

        if !self.terms_accepted {
            return Err(LoginError::TermsNotAccepted);
        }

        if !self.lgpd_accepted {
            return Err(LoginError::LgpdNotAccepted);
        }

        Ok(Registration {
            name,
            email,
            notifications_enabled: self.notifications_enabled,
        })
    }
}

/// The logged-in user's profile.
///
/// Serialized with camelCase keys; this is the layout of the persisted
/// `authUser` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: IdentityId,
    pub name: PersonName,
    pub email: Email,
    pub terms_accepted: bool,
    pub lgpd_accepted: bool,
    #[serde(default)]
    pub notifications_enabled: bool,
}

/// Why a stored identity could not be restored.
#[derive(Debug, Error)]
pub enum StoredIdentityError {
    #[error("stored identity is not valid JSON for an identity: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("stored identity lacks the required consents")]
    ConsentMissing,
}

impl Identity {
    /// Create the identity for a validated registration at time `at`.
    #[must_use]
    pub fn register(registration: Registration, at: DateTime<Utc>) -> Self {
        Self {
            id: IdentityId::from_timestamp(at),
            name: registration.name,
            email: registration.email,
            terms_accepted: true,
            lgpd_accepted: true,
            notifications_enabled: registration.notifications_enabled,
        }
    }

    /// Encode for the persistent store.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization fails, which does not happen
    /// for this type in practice.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a persisted entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not JSON, misses fields, carries an
    /// empty name or an email without `@`, or records a missing consent.
    pub fn from_stored(text: &str) -> Result<Self, StoredIdentityError> {
        let identity: Self = serde_json::from_str(text)?;

        if !(identity.terms_accepted && identity.lgpd_accepted) {
            return Err(StoredIdentityError::ConsentMissing);
        }

        Ok(identity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> LoginForm {
        LoginForm {
            name: "Maria Silva".to_string(),
            email: "maria@ex.com".to_string(),
            terms_accepted: true,
            lgpd_accepted: true,
            notifications_enabled: false,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-12T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_validate_accepts_valid_form() {
        let registration = valid_form().validate().unwrap();
        assert_eq!(registration.name.as_str(), "Maria Silva");
        assert_eq!(registration.email.as_str(), "maria@ex.com");
        assert!(!registration.notifications_enabled);
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        for name in ["", "   "] {
            let form = LoginForm {
                name: name.to_string(),
                ..valid_form()
            };
            let err = form.validate().unwrap_err();
            assert!(matches!(err, LoginError::Name(NameError::Empty)));
            assert_eq!(err.user_message(), "Por favor, insira seu nome");
        }
    }

    #[test]
    fn test_validate_rejects_email_without_at() {
        for email in ["", "maria.ex.com", "   "] {
            let form = LoginForm {
                email: email.to_string(),
                ..valid_form()
            };
            let err = form.validate().unwrap_err();
            assert!(matches!(err, LoginError::Email(_)));
            assert_eq!(err.user_message(), "Por favor, insira um e-mail válido");
        }
    }

    #[test]
    fn test_validate_requires_both_consents() {
        let form = LoginForm {
            terms_accepted: false,
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err(), LoginError::TermsNotAccepted);

        let form = LoginForm {
            lgpd_accepted: false,
            ..valid_form()
        };
        assert_eq!(form.validate().unwrap_err(), LoginError::LgpdNotAccepted);
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let form = LoginForm::default();
        assert!(matches!(form.validate(), Err(LoginError::Name(_))));
    }

    #[test]
    fn test_register_fills_id_and_consents() {
        let identity = Identity::register(valid_form().validate().unwrap(), fixed_time());
        assert_eq!(identity.id.as_str(), "1760270400000");
        assert!(identity.terms_accepted);
        assert!(identity.lgpd_accepted);
    }

    #[test]
    fn test_stored_layout_uses_camel_case_keys() {
        let identity = Identity::register(valid_form().validate().unwrap(), fixed_time());
        let value: serde_json::Value =
            serde_json::from_str(&identity.to_stored().unwrap()).unwrap();

        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            [
                "email",
                "id",
                "lgpdAccepted",
                "name",
                "notificationsEnabled",
                "termsAccepted"
            ]
        );
        assert_eq!(value["name"], "Maria Silva");
    }

    #[test]
    fn test_stored_round_trip_keeps_fields() {
        let identity = Identity::register(
            LoginForm {
                notifications_enabled: true,
                ..valid_form()
            }
            .validate()
            .unwrap(),
            fixed_time(),
        );
        let restored = Identity::from_stored(&identity.to_stored().unwrap()).unwrap();
        assert_eq!(restored, identity);
    }

    #[test]
    fn test_from_stored_rejects_corruption() {
        let cases = [
            "not json",
            "{\"id\":\"1\"}",
            "[]",
            r#"{"id":"1","name":"","email":"a@b","termsAccepted":true,"lgpdAccepted":true}"#,
            r#"{"id":"1","name":"Ana","email":"ab","termsAccepted":true,"lgpdAccepted":true}"#,
        ];
        for text in cases {
            assert!(
                matches!(
                    Identity::from_stored(text),
                    Err(StoredIdentityError::Malformed(_))
                ),
                "{text} should be rejected"
            );
        }
    }

    #[test]
    fn test_from_stored_rejects_missing_consent() {
        let text =
            r#"{"id":"1","name":"Ana","email":"a@b","termsAccepted":true,"lgpdAccepted":false}"#;
        assert!(matches!(
            Identity::from_stored(text),
            Err(StoredIdentityError::ConsentMissing)
        ));
    }

    #[test]
    fn test_from_stored_defaults_notifications() {
        let text =
            r#"{"id":"1","name":"Ana","email":"a@b","termsAccepted":true,"lgpdAccepted":true}"#;
        assert!(!Identity::from_stored(text).unwrap().notifications_enabled);
    }
}
