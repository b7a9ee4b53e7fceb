//! Login and logout.
//!
//! There are no passwords: logging in means giving a name and an e-mail and
//! accepting the terms of use and the privacy policy.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use diario_core::navigation::{Action, Page, Route, transition};
use diario_core::{LoginForm, NavState};

use crate::error::Result;
use crate::filters;
use crate::middleware::{PortalSession, Visitor, see_other};
use crate::routes::Navbar;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/login.html")]
pub struct LoginTemplate {
    pub nav: Navbar,
    /// Path the form posts to.
    pub action: &'static str,
    pub error: Option<&'static str>,
    pub name: String,
    pub email: String,
    pub notifications_enabled: bool,
}

async fn render(
    portal: &PortalSession,
    visitor: &Visitor,
    route: Route,
    form: Option<(&LoginForm, &'static str)>,
) -> Result<Response> {
    let nav = Navbar::load(portal, visitor, route).await?;
    let template = match form {
        Some((form, error)) => LoginTemplate {
            nav,
            action: route.path(),
            error: Some(error),
            name: form.name.clone(),
            email: form.email.clone(),
            notifications_enabled: form.notifications_enabled,
        },
        None => LoginTemplate {
            nav,
            action: route.path(),
            error: None,
            name: visitor.draft.search_name.clone(),
            email: visitor.draft.user_email.clone(),
            notifications_enabled: false,
        },
    };

    let status = if template.error.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    Ok((status, template).into_response())
}

async fn show(portal: PortalSession, route: Route) -> Result<Response> {
    let visitor = portal.visitor().await?;
    if let Some(redirect) = visitor.guard(route) {
        return Ok(redirect);
    }
    render(&portal, &visitor, route, None).await
}

async fn submit(portal: PortalSession, route: Route, form: LoginForm) -> Result<Response> {
    let visitor = portal.visitor().await?;

    let registration = match form.validate() {
        Ok(registration) => registration,
        Err(e) => {
            tracing::debug!(error = %e, "Login form rejected");
            return render(&portal, &visitor, route, Some((&form, e.user_message()))).await;
        }
    };

    let identity = portal.store().login(registration).await?;

    let mut draft = visitor.draft;
    let name = if draft.search_name.is_empty() {
        identity.name.to_string()
    } else {
        draft.search_name.clone()
    };
    let email = draft.user_email.is_empty().then_some(&identity.email);
    draft.begin_search(&name, email);
    portal.drafts().save(&draft).await?;

    let state = NavState {
        authenticated: true,
        document_selected: draft.has_selection(),
    };
    let next = transition(Page::Login, Action::LoginSucceeded, state);
    Ok(see_other(next.to))
}

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(portal: PortalSession) -> Result<Response> {
    show(portal, Route::Login).await
}

/// Display the login page under the sign-up path.
#[instrument(skip_all)]
pub async fn register_page(portal: PortalSession) -> Result<Response> {
    show(portal, Route::Register).await
}

/// Handle login form submission.
#[instrument(skip_all)]
pub async fn login(portal: PortalSession, Form(form): Form<LoginForm>) -> Result<Response> {
    submit(portal, Route::Login, form).await
}

/// Handle a submission of the sign-up form.
#[instrument(skip_all)]
pub async fn register(portal: PortalSession, Form(form): Form<LoginForm>) -> Result<Response> {
    submit(portal, Route::Register, form).await
}

/// Log out and go home.
#[instrument(skip_all)]
pub async fn logout(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    portal.store().logout().await?;

    let next = transition(Page::Home, Action::Logout, visitor.nav_state());
    Ok(see_other(next.to))
}
