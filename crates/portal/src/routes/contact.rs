//! Contact details form.
//!
//! An unguarded alternative entry into results: the visitor confirms the
//! e-mail and phone attached to the current search.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::instrument;

use diario_core::ContactForm;
use diario_core::navigation::{Action, Page, Route, transition};

use crate::error::Result;
use crate::filters;
use crate::middleware::{PortalSession, see_other};
use crate::routes::Navbar;

/// Contact form template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/form.html")]
pub struct ContactTemplate {
    pub nav: Navbar,
    pub search_name: String,
    pub email: String,
    pub phone: String,
    pub error: Option<&'static str>,
}

/// Display the contact form, prefilled from the draft.
#[instrument(skip_all)]
pub async fn show(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    if let Some(redirect) = visitor.guard(Route::ContactForm) {
        return Ok(redirect);
    }

    Ok(ContactTemplate {
        nav: Navbar::load(&portal, &visitor, Route::ContactForm).await?,
        search_name: visitor.draft.search_name.clone(),
        email: visitor.draft.user_email.clone(),
        phone: visitor.draft.user_phone.clone(),
        error: None,
    }
    .into_response())
}

/// Handle contact form submission.
///
/// Invalid input re-renders the form with the first problem and leaves the
/// draft untouched.
#[instrument(skip_all)]
pub async fn submit(portal: PortalSession, Form(form): Form<ContactForm>) -> Result<Response> {
    let visitor = portal.visitor().await?;

    let details = match form.validate() {
        Ok(details) => details,
        Err(e) => {
            tracing::debug!(error = %e, "Contact form rejected");
            let template = ContactTemplate {
                nav: Navbar::load(&portal, &visitor, Route::ContactForm).await?,
                search_name: visitor.draft.search_name.clone(),
                email: form.email,
                phone: form.phone,
                error: Some(e.user_message()),
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, template).into_response());
        }
    };

    let mut draft = visitor.draft.clone();
    draft.apply_contact(details);
    portal.drafts().save(&draft).await?;

    let next = transition(Page::ContactForm, Action::ContactSubmitted, visitor.nav_state());
    Ok(see_other(next.to))
}

/// Leave the form, clearing the search.
#[instrument(skip_all)]
pub async fn back(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    let next = transition(Page::ContactForm, Action::Back, visitor.nav_state());

    if let Some(effect) = next.effect {
        let mut draft = visitor.draft;
        draft.apply(effect);
        portal.drafts().save(&draft).await?;
    }

    Ok(see_other(next.to))
}
