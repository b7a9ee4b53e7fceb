//! Notification feed actions.

use axum::{
    Form,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use diario_core::Route;

use crate::error::Result;
use crate::middleware::PortalSession;
use crate::services::notifications::is_demo_identity;

/// Mark-as-read form data.
#[derive(Debug, Deserialize)]
pub struct MarkReadForm {
    /// Page to return to.
    #[serde(default)]
    pub voltar: String,
}

/// Mark every notification as read and return to the page the visitor was on.
///
/// Only a known route is accepted as the return target; anything else goes
/// home. Visitors without the demo feed are simply sent back.
#[instrument(skip_all)]
pub async fn mark_all_read(
    portal: PortalSession,
    Form(form): Form<MarkReadForm>,
) -> Result<Response> {
    let visitor = portal.visitor().await?;

    if visitor.identity.as_ref().is_some_and(is_demo_identity) {
        let slot = portal.notifications();
        let mut state = slot.load().await?;
        state.mark_all_read();
        slot.save(&state).await?;
    }

    let back = Route::from_path(&form.voltar).unwrap_or(Route::Home);
    Ok(Redirect::to(back.path()).into_response())
}
