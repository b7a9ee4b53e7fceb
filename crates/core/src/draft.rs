//! Transient search and contact state for one browsing session.
//!
//! The draft threads values between pages (what was searched, which
//! contact details were confirmed, which document is open in the chat). It
//! is never part of the persisted identity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Document;
use crate::navigation::Effect;
use crate::types::Email;

/// Phone shown when a search is submitted without going through the
/// contact form.
pub const PLACEHOLDER_PHONE: &str = "(65) 99999-9999";

/// State that can be returned to its initial value.
///
/// Logout calls this on every per-session component instead of discarding
/// the whole session wholesale.
pub trait Reset {
    fn reset(&mut self);
}

/// In-progress search/contact flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub search_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub selected_document: Option<Document>,
}

impl Draft {
    /// Record a search submitted from the home page.
    ///
    /// `email` is the logged-in identity's address, when there is one.
    pub fn begin_search(&mut self, name: &str, email: Option<&Email>) {
        self.search_name = name.trim().to_string();
        if let Some(email) = email {
            self.user_email = email.as_str().to_string();
            self.user_phone = PLACEHOLDER_PHONE.to_string();
        }
    }

    /// Record confirmed contact details.
    pub fn apply_contact(&mut self, contact: ContactDetails) {
        self.user_email = contact.email.into_inner();
        self.user_phone = contact.phone;
    }

    /// Select a document for the chat page.
    pub fn select(&mut self, document: Document) {
        self.selected_document = Some(document);
    }

    /// Whether a document is selected.
    #[must_use]
    pub const fn has_selection(&self) -> bool {
        self.selected_document.is_some()
    }

    /// Apply a navigation side effect.
    pub fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ClearSearch => {
                self.search_name.clear();
                self.user_email.clear();
                self.user_phone.clear();
            }
            Effect::ClearSelection => self.selected_document = None,
            Effect::ResetAll => self.reset(),
        }
    }
}

impl Reset for Draft {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Raw contact form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub lgpd_accepted: bool,
}

/// Reasons a contact form is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("email is required")]
    MissingEmail,

    #[error("phone is required")]
    MissingPhone,

    #[error("terms of use and privacy policy must be accepted")]
    ConsentMissing,
}

impl ContactError {
    /// Message shown next to the form.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::MissingEmail => "Por favor, insira um e-mail válido",
            Self::MissingPhone => "Por favor, insira seu telefone",
            Self::ConsentMissing => {
                "Você deve aceitar os termos de uso e a política de privacidade"
            }
        }
    }
}

/// Contact details that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Email,
    pub phone: String,
}

impl ContactForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns an error if email or phone is blank or either consent is
    /// missing.
    pub fn validate(&self) -> Result<ContactDetails, ContactError> {
        let email = Email::parse(&self.email).map_err(|_| ContactError::MissingEmail)?;

        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ContactError::MissingPhone);
        }

        if !(self.terms_accepted && self.lgpd_accepted) {
            return Err(ContactError::ConsentMissing);
        }

        Ok(ContactDetails {
            email,
            phone: phone.to_string(),
        })
    }
}
