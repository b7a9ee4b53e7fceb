//! Integration tests for the Diário Oficial mentions portal.
//!
//! Each test boots the full portal router in-process on an ephemeral port
//! and drives it over HTTP with a cookie-carrying client, the way a browser
//! would.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p diario-integration-tests
//! ```

use std::time::Duration;

use diario_core::Catalog;
use diario_portal::config::PortalConfig;
use diario_portal::state::AppState;
use reqwest::{Client, Response, redirect::Policy};
use tokio::net::TcpListener;

/// A running portal plus a browser-like client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a portal with the built-in catalog and no typing delay.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn new() -> Self {
        let config = PortalConfig {
            typing_delay: Duration::ZERO,
            ..PortalConfig::default()
        };
        Self::with_state(AppState::with_catalog(config, Catalog::mock())).await
    }

    /// Start a portal around `state`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound or the client cannot be built.
    pub async fn with_state(state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local address");

        let app = diario_portal::app(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            client: Self::browser(),
            base_url: format!("http://{addr}"),
        }
    }

    /// A new client with its own cookie jar that does not follow redirects.
    ///
    /// # Panics
    ///
    /// Panics if the TLS backend cannot be initialized.
    #[must_use]
    pub fn browser() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("build client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, path: &str) -> reqwest::Result<Response> {
        self.client.get(self.url(path)).send().await
    }

    /// POST `form` to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Result<Response> {
        self.client.post(self.url(path)).form(form).send().await
    }

    /// Log in with both consents given.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn login(&self, name: &str, email: &str) -> reqwest::Result<Response> {
        self.post(
            "/login",
            &[
                ("name", name),
                ("email", email),
                ("terms_accepted", "true"),
                ("lgpd_accepted", "true"),
            ],
        )
        .await
    }
}

/// The `Location` header of a redirect, or "" when absent.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}
