//! Session-backed stores.
//!
//! [`SessionStore`] is the single source of truth for who is logged in.
//! [`SessionSlot`] holds one of the other per-browser components (draft,
//! conversation, notification state) under its own key.

use std::marker::PhantomData;

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tower_sessions::Session;
use tracing::instrument;

use diario_core::{Conversation, Draft, Identity, Registration, Reset};

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::models::session_keys;
use crate::services::notifications::NotificationState;

/// Owner of the persisted identity.
#[derive(Clone)]
pub struct SessionStore {
    session: Session,
}

impl SessionStore {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The logged-in identity, if any.
    ///
    /// A stored entry that is not a valid identity is removed and treated
    /// as logged out; the corruption is logged but never reported to the
    /// user.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store itself fails.
    pub async fn current(&self) -> Result<Option<Identity>> {
        let Some(value) = self.session.get_value(session_keys::AUTH_USER).await? else {
            return Ok(None);
        };

        let restored = match &value {
            Value::String(text) => Identity::from_stored(text).map_err(|e| e.to_string()),
            other => Err(format!("expected JSON text, found {other}")),
        };

        match restored {
            Ok(identity) => Ok(Some(identity)),
            Err(reason) => {
                tracing::warn!(%reason, "Discarding corrupted stored identity");
                self.session.remove_value(session_keys::AUTH_USER).await?;
                Ok(None)
            }
        }
    }

    /// Log in with a validated registration.
    ///
    /// Replaces any identity already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    #[instrument(skip_all)]
    pub async fn login(&self, registration: Registration) -> Result<Identity> {
        let identity = Identity::register(registration, Utc::now());
        let stored = identity
            .to_stored()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        // New privilege level, new session id.
        self.session.cycle_id().await?;
        self.session.insert(session_keys::AUTH_USER, stored).await?;

        set_sentry_user(&identity.id, Some(identity.email.as_str()));
        tracing::info!(identity_id = %identity.id, "Identity logged in");

        Ok(identity)
    }

    /// Log out and return every per-session component to its initial state.
    ///
    /// Safe to call when nobody is logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<()> {
        let previous = self.session.remove_value(session_keys::AUTH_USER).await?;

        SessionSlot::<Draft>::new(self.session.clone(), session_keys::DRAFT)
            .reset()
            .await?;
        SessionSlot::<Conversation>::new(self.session.clone(), session_keys::CONVERSATION)
            .reset()
            .await?;
        SessionSlot::<NotificationState>::new(self.session.clone(), session_keys::NOTIFICATIONS)
            .reset()
            .await?;

        self.session.cycle_id().await?;
        clear_sentry_user();
        tracing::info!(had_identity = previous.is_some(), "Logged out");

        Ok(())
    }
}

/// One per-browser component stored under `key`.
pub struct SessionSlot<T> {
    session: Session,
    key: &'static str,
    _marker: PhantomData<T>,
}

impl<T> SessionSlot<T>
where
    T: Default + Serialize + DeserializeOwned + Reset,
{
    #[must_use]
    pub const fn new(session: Session, key: &'static str) -> Self {
        Self {
            session,
            key,
            _marker: PhantomData,
        }
    }

    /// Current value, or the initial value when absent or unreadable.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session store itself fails.
    pub async fn load(&self) -> Result<T> {
        let Some(value) = self.session.get_value(self.key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_value(value) {
            Ok(state) => Ok(state),
            Err(e) => {
                tracing::warn!(key = self.key, error = %e, "Discarding unreadable session state");
                self.session.remove_value(self.key).await?;
                Ok(T::default())
            }
        }
    }

    /// Store `state`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be written.
    pub async fn save(&self, state: &T) -> Result<()> {
        self.session.insert(self.key, state).await?;
        Ok(())
    }

    /// Run the component's reset hook and store the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be read or written.
    pub async fn reset(&self) -> Result<()> {
        let mut state = self.load().await?;
        state.reset();
        self.save(&state).await
    }
}
