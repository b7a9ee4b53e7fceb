//! HTTP route handlers for the portal.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (search + FAQ)
//! POST /buscar                   - Submit a search
//!
//! # Identity
//! GET  /login                    - Login page
//! POST /login                    - Login action
//! GET  /registro                 - Login page under the sign-up path
//! POST /registro                 - Login action
//! POST /sair                     - Logout
//!
//! # Contact form
//! GET  /form                     - Contact details page
//! POST /form                     - Confirm contact details
//! POST /form/voltar              - Back to home
//!
//! # Results (requires identity)
//! GET  /resultados[?tipo=]       - Mention list, optionally filtered by type
//! POST /resultados/voltar        - Back to home
//! POST /resultados/{id}/chat     - Open the chat about a document
//!
//! # Chat (requires identity and a selected document)
//! GET  /chat                     - Conversation page
//! POST /chat/mensagens           - Ask a question
//! POST /chat/voltar              - Back to results
//!
//! # Notifications
//! POST /notificacoes/lidas       - Mark the demo feed as read
//! ```

pub mod auth;
pub mod chat;
pub mod contact;
pub mod home;
pub mod notifications;
pub mod results;

use axum::{
    Router,
    routing::{get, post},
};

use diario_core::Route;

use crate::error::Result;
use crate::middleware::{PortalSession, Visitor};
use crate::services::notifications::{Notification, feed, is_demo_identity, unread_count};
use crate::state::AppState;

/// Navbar contents shared by every page.
#[derive(Debug, Clone, Default)]
pub struct Navbar {
    /// Logged-in identity's name; `None` shows the login link.
    pub user_name: Option<String>,
    pub user_initial: String,
    /// Path of the page being rendered, for forms that come back to it.
    pub return_to: &'static str,
    /// Demo feed; empty for everyone else.
    pub notifications: Vec<Notification>,
    pub unread: usize,
}

impl Navbar {
    /// Build the navbar for `visitor` on the page at `route`.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification state cannot be read.
    pub async fn load(portal: &PortalSession, visitor: &Visitor, route: Route) -> Result<Self> {
        let Some(identity) = &visitor.identity else {
            return Ok(Self {
                return_to: route.path(),
                ..Self::default()
            });
        };

        let notifications = if is_demo_identity(identity) {
            feed(&portal.notifications().load().await?)
        } else {
            Vec::new()
        };

        Ok(Self {
            user_name: Some(identity.name.to_string()),
            user_initial: identity.name.initial(),
            return_to: route.path(),
            unread: unread_count(&notifications),
            notifications,
        })
    }

    #[must_use]
    pub fn has_notifications(&self) -> bool {
        !self.notifications.is_empty()
    }
}

/// Create the contact form routes router.
fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::show).post(contact::submit))
        .route("/voltar", post(contact::back))
}

/// Create the results routes router.
fn results_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(results::index))
        .route("/voltar", post(results::back))
        .route("/{id}/chat", post(results::open_chat))
}

/// Create the chat routes router.
fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(chat::show))
        .route("/mensagens", post(chat::send))
        .route("/voltar", post(chat::back))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/buscar", post(home::search))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/registro", get(auth::register_page).post(auth::register))
        .route("/sair", post(auth::logout))
        .route("/notificacoes/lidas", post(notifications::mark_all_read))
        .nest("/form", contact_routes())
        .nest("/resultados", results_routes())
        .nest("/chat", chat_routes())
}
