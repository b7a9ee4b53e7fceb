//! Session extractor and route guards.
//!
//! Every page handler takes a [`PortalSession`]. It hands out the identity
//! store and the per-component session slots, and evaluates route guards
//! against what it finds there.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use diario_core::navigation::{self, Outcome};
use diario_core::{Conversation, Draft, Identity, NavState, Route};

use crate::error::{AppError, Result, set_sentry_user};
use crate::models::session_keys;
use crate::services::{NotificationState, SessionSlot, SessionStore};

/// Per-request handle on the browser session.
///
/// Extraction fails with an internal error when the session layer is not
/// installed; it never degrades to an anonymous visitor.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(portal: PortalSession) -> Result<Response> {
///     let visitor = portal.visitor().await?;
///     if let Some(redirect) = visitor.guard(Route::Results) {
///         return Ok(redirect);
///     }
///     // ...
/// }
/// ```
#[derive(Clone)]
pub struct PortalSession {
    session: Session,
}

impl<S> FromRequestParts<S> for PortalSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self> {
        let session = parts.extensions.get::<Session>().cloned().ok_or_else(|| {
            AppError::Internal(format!(
                "session layer missing for {} {}",
                parts.method,
                parts.uri.path()
            ))
        })?;

        Ok(Self { session })
    }
}

impl PortalSession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// The identity store.
    #[must_use]
    pub fn store(&self) -> SessionStore {
        SessionStore::new(self.session.clone())
    }

    #[must_use]
    pub fn drafts(&self) -> SessionSlot<Draft> {
        SessionSlot::new(self.session.clone(), session_keys::DRAFT)
    }

    #[must_use]
    pub fn conversations(&self) -> SessionSlot<Conversation> {
        SessionSlot::new(self.session.clone(), session_keys::CONVERSATION)
    }

    #[must_use]
    pub fn notifications(&self) -> SessionSlot<NotificationState> {
        SessionSlot::new(self.session.clone(), session_keys::NOTIFICATIONS)
    }

    /// Load the identity and draft for this request.
    ///
    /// Each request runs on its own Sentry hub, so the identity is attached
    /// to the request's scope here rather than once at login.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn visitor(&self) -> Result<Visitor> {
        let identity = self.store().current().await?;
        if let Some(identity) = &identity {
            set_sentry_user(&identity.id, Some(identity.email.as_str()));
        }
        let draft = self.drafts().load().await?;
        Ok(Visitor { identity, draft })
    }
}

/// Who is browsing and what they are in the middle of.
#[derive(Debug, Clone)]
pub struct Visitor {
    pub identity: Option<Identity>,
    pub draft: Draft,
}

impl Visitor {
    /// Inputs of the route guards.
    #[must_use]
    pub const fn nav_state(&self) -> NavState {
        NavState {
            authenticated: self.identity.is_some(),
            document_selected: self.draft.has_selection(),
        }
    }

    /// Redirect to issue instead of rendering `route`, if its guard fails.
    #[must_use]
    pub fn guard(&self, route: Route) -> Option<Response> {
        match navigation::resolve(route, self.nav_state()) {
            Outcome::Render(_) => None,
            Outcome::Redirect(to) => {
                tracing::debug!(from = route.path(), to = to.path(), "Guard redirect");
                Some(see_other(to))
            }
        }
    }
}

/// Redirect to `route` with 303 See Other.
#[must_use]
pub fn see_other(route: Route) -> Response {
    Redirect::to(route.path()).into_response()
}
