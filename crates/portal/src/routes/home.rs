//! Home page: the name search and the FAQ.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;

use diario_core::navigation::{Action, Page, Route, transition};

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{PortalSession, see_other};
use crate::routes::Navbar;

/// (question, answer)
pub const FAQ: [(&str, &str); 4] = [
    (
        "Como funciona a busca?",
        "Você informa seu nome e nós procuramos menções a ele nas edições do Diário Oficial.",
    ),
    (
        "Preciso criar uma conta?",
        "Sim. Para ver os resultados basta informar nome e e-mail e aceitar os termos de uso.",
    ),
    (
        "Posso receber alertas?",
        "Ao entrar, marque a opção de notificações para ser avisado de novas menções.",
    ),
    (
        "O assistente substitui o documento oficial?",
        "Não. O assistente resume a publicação, mas o texto oficial é sempre a referência.",
    ),
];

/// Search form data.
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub nome: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub nav: Navbar,
    pub search_name: String,
    pub faq: &'static [(&'static str, &'static str)],
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(portal: PortalSession) -> Result<Response> {
    let visitor = portal.visitor().await?;
    if let Some(redirect) = visitor.guard(Route::Home) {
        return Ok(redirect);
    }

    Ok(HomeTemplate {
        nav: Navbar::load(&portal, &visitor, Route::Home).await?,
        search_name: visitor.draft.search_name.clone(),
        faq: &FAQ,
    }
    .into_response())
}

/// Handle a search submission.
///
/// Blank searches are ignored. Otherwise the name goes into the draft and
/// the visitor continues to results, or to login when nobody is logged in.
#[instrument(skip_all)]
pub async fn search(portal: PortalSession, Form(form): Form<SearchForm>) -> Result<Response> {
    if form.nome.trim().is_empty() {
        return Ok(see_other(Route::Home));
    }

    let visitor = portal.visitor().await?;
    let mut draft = visitor.draft.clone();
    draft.begin_search(&form.nome, visitor.identity.as_ref().map(|i| &i.email));
    portal.drafts().save(&draft).await?;

    add_breadcrumb("search", "Submitted name search", None);

    let next = transition(Page::Home, Action::SubmitSearch, visitor.nav_state());
    Ok(see_other(next.to))
}
