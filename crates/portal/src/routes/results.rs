//! Results page: the mention list and the entry into the chat.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use diario_core::navigation::{Action, Page, Route, transition};
use diario_core::{Conversation, Document, DocumentId, DocumentKind, NavState};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{PortalSession, see_other};
use crate::routes::Navbar;
use crate::state::AppState;

/// Query parameters for the type filter.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    pub tipo: Option<String>,
}

/// A type filter chip.
#[derive(Debug, Clone)]
pub struct FilterChip {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Results page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/results.html")]
pub struct ResultsTemplate<'a> {
    pub nav: Navbar,
    pub search_name: String,
    pub email: String,
    pub documents: Vec<&'a Document>,
    pub total: usize,
    pub chips: Vec<FilterChip>,
}

/// Parse `?tipo=`. Unknown values select everything.
fn selected_kind(tipo: Option<&str>) -> Option<DocumentKind> {
    let kind = DocumentKind::from_label(tipo?);
    DocumentKind::FILTERS.contains(&kind).then_some(kind)
}

fn chips(selected: Option<DocumentKind>) -> Vec<FilterChip> {
    let all = FilterChip {
        label: "Todos",
        href: Route::Results.path().to_string(),
        active: selected.is_none(),
    };

    std::iter::once(all)
        .chain(DocumentKind::FILTERS.into_iter().map(|kind| FilterChip {
            label: kind.label(),
            href: format!("{}?tipo={}", Route::Results.path(), kind.label()),
            active: selected == Some(kind),
        }))
        .collect()
}

/// Display the mention list.
#[instrument(skip_all, fields(tipo = ?query.tipo))]
pub async fn index(
    State(state): State<AppState>,
    portal: PortalSession,
    Query(query): Query<ResultsQuery>,
) -> Result<Response> {
    let visitor = portal.visitor().await?;
    if let Some(redirect) = visitor.guard(Route::Results) {
        return Ok(redirect);
    }

    let selected = selected_kind(query.tipo.as_deref());
    let documents = state.catalog().filter(selected);

    let email = match (&visitor.draft.user_email, &visitor.identity) {
        (email, _) if !email.is_empty() => email.clone(),
        (_, Some(identity)) => identity.email.as_str().to_string(),
        _ => String::new(),
    };

    let template = ResultsTemplate {
        nav: Navbar::load(&portal, &visitor, Route::Results).await?,
        search_name: visitor.draft.search_name.clone(),
        email,
        total: documents.len(),
        documents,
        chips: chips(selected),
    };
    Ok(template.into_response())
}

/// Leave the results, clearing the search.
#[instrument(skip_all)]
pub async fn back(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    let next = transition(Page::Results, Action::Back, visitor.nav_state());

    if let Some(effect) = next.effect {
        let mut draft = visitor.draft;
        draft.apply(effect);
        portal.drafts().save(&draft).await?;
    }

    Ok(see_other(next.to))
}

/// Select a document and open its chat.
///
/// Reopening the document already in the chat keeps its transcript.
#[instrument(skip(state, portal))]
pub async fn open_chat(
    State(state): State<AppState>,
    portal: PortalSession,
    Path(id): Path<u32>,
) -> Result<Response> {
    let visitor = portal.visitor().await?;
    if let Some(redirect) = visitor.guard(Route::Results) {
        return Ok(redirect);
    }

    let document = state
        .catalog()
        .get(DocumentId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("document {id}")))?;

    let mut draft = visitor.draft.clone();
    draft.select(document.clone());
    portal.drafts().save(&draft).await?;

    let conversations = portal.conversations();
    if !conversations.load().await?.is_about(document) {
        conversations
            .save(&Conversation::open(document, Utc::now()))
            .await?;
    }

    let id = id.to_string();
    add_breadcrumb(
        "navigation",
        "Opened chat",
        Some(&[("document_id", id.as_str())]),
    );

    let nav = NavState {
        document_selected: true,
        ..visitor.nav_state()
    };
    let next = transition(Page::Results, Action::SelectDocument, nav);
    Ok(see_other(next.to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_kind() {
        assert_eq!(selected_kind(None), None);
        assert_eq!(
            selected_kind(Some("Nomeação")),
            Some(DocumentKind::Nomeacao)
        );
        assert_eq!(
            selected_kind(Some("intimação")),
            Some(DocumentKind::Intimacao)
        );
        // Known category that is not offered as a chip.
        assert_eq!(selected_kind(Some("Edital")), None);
        assert_eq!(selected_kind(Some("qualquer")), None);
    }

    #[test]
    fn test_chips_mark_active_filter() {
        let all = chips(None);
        assert_eq!(all.len(), 6);
        assert!(all.first().is_some_and(|chip| chip.active && chip.label == "Todos"));

        let filtered = chips(Some(DocumentKind::Publicacao));
        let active: Vec<_> = filtered.iter().filter(|c| c.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active.first().map(|c| c.label), Some("Publicação"));
        assert!(
            active
                .first()
                .is_some_and(|c| c.href == "/resultados?tipo=Publicação")
        );
    }
}
