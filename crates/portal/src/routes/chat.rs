//! Chat about the selected document.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;
use tracing::instrument;

use diario_core::chat::SUGGESTED_QUESTIONS;
use diario_core::navigation::{Action, Page, Route, transition};
use diario_core::{Conversation, Document, Message};

use crate::error::Result;
use crate::filters;
use crate::middleware::{PortalSession, Visitor, see_other};
use crate::routes::Navbar;
use crate::state::AppState;

/// Chat message form data.
#[derive(Debug, Deserialize)]
pub struct MessageForm {
    #[serde(default)]
    pub mensagem: String,
}

/// Chat page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/chat.html")]
pub struct ChatTemplate {
    pub nav: Navbar,
    pub document: Document,
    pub messages: Vec<Message>,
    pub suggestions: &'static [&'static str],
}

/// The selected document and its transcript, opening a fresh transcript if
/// the stored one is about another document.
async fn conversation_for(portal: &PortalSession, document: &Document) -> Result<Conversation> {
    let conversations = portal.conversations();
    let conversation = conversations.load().await?;
    if conversation.is_about(document) {
        return Ok(conversation);
    }

    let conversation = Conversation::open(document, Utc::now());
    conversations.save(&conversation).await?;
    Ok(conversation)
}

/// The guarded document, or the redirect to issue instead.
fn selected(visitor: &Visitor) -> std::result::Result<Document, Response> {
    if let Some(redirect) = visitor.guard(Route::Chat) {
        return Err(redirect);
    }
    visitor
        .draft
        .selected_document
        .clone()
        .ok_or_else(|| see_other(Route::Results))
}

/// Display the conversation.
#[instrument(skip_all)]
pub async fn show(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    let document = match selected(&visitor) {
        Ok(document) => document,
        Err(redirect) => return Ok(redirect),
    };

    let conversation = conversation_for(&portal, &document).await?;

    Ok(ChatTemplate {
        nav: Navbar::load(&portal, &visitor, Route::Chat).await?,
        messages: conversation.messages().to_vec(),
        document,
        suggestions: &SUGGESTED_QUESTIONS,
    }
    .into_response())
}

/// Ask a question.
///
/// Blank messages are ignored. Otherwise the assistant "types" for the
/// configured delay, then the question and its reply are appended together.
/// The session is first read after the delay, so a logout that lands while
/// the assistant is typing is never undone by this request.
#[instrument(skip_all)]
pub async fn send(
    State(state): State<AppState>,
    portal: PortalSession,
    Form(form): Form<MessageForm>,
) -> Result<Response> {
    if form.mensagem.trim().is_empty() {
        return Ok(see_other(Route::Chat));
    }

    tokio::time::sleep(state.typing_delay()).await;

    let visitor = portal.visitor().await?;
    let document = match selected(&visitor) {
        Ok(document) => document,
        Err(redirect) => return Ok(redirect),
    };

    let mut conversation = conversation_for(&portal, &document).await?;
    let now = Utc::now();
    if conversation.ask(&form.mensagem, now).is_none() {
        return Ok(see_other(Route::Chat));
    }
    let reply = conversation.answer(&form.mensagem, &document, now);
    tracing::debug!(message_id = %reply.id, "Assistant replied");
    portal.conversations().save(&conversation).await?;

    Ok(see_other(Route::Chat))
}

/// Leave the chat, dropping the selection and its transcript.
#[instrument(skip_all)]
pub async fn back(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    let next = transition(Page::Chat, Action::Back, visitor.nav_state());

    if let Some(effect) = next.effect {
        let mut draft = visitor.draft;
        draft.apply(effect);
        portal.drafts().save(&draft).await?;
    }

    portal.conversations().reset().await?;

    Ok(see_other(next.to))
}
