//! Page routing and route guards.
//!
//! The portal is a small state machine over five pages:
//!
//! ```text
//! Home --search--> Results --select--> Chat
//!   \                 ^  ^
//!    `--(no identity)-> Login / ContactForm
//! ```
//!
//! [`transition`] says where a user action leads; [`resolve`] says whether a
//! requested route may render or must redirect. Both are pure: evaluating
//! them again with the same input always gives the same answer, so a guard
//! can be re-run on every request without risk of redirect loops.

use serde::{Deserialize, Serialize};

/// A client-visible route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Login,
    /// Alias of [`Route::Login`] under the sign-up path.
    Register,
    Results,
    Chat,
    ContactForm,
}

impl Route {
    pub const ALL: [Self; 6] = [
        Self::Home,
        Self::Login,
        Self::Register,
        Self::Results,
        Self::Chat,
        Self::ContactForm,
    ];

    /// URL path of the route.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/registro",
            Self::Results => "/resultados",
            Self::Chat => "/chat",
            Self::ContactForm => "/form",
        }
    }

    /// Match a URL path, ignoring one trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path {
            "/" => "/",
            other => other.strip_suffix('/').unwrap_or(other),
        };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    /// The page this route renders when its guard passes.
    #[must_use]
    pub const fn page(self) -> Page {
        match self {
            Self::Home => Page::Home,
            Self::Login | Self::Register => Page::Login,
            Self::Results => Page::Results,
            Self::Chat => Page::Chat,
            Self::ContactForm => Page::ContactForm,
        }
    }
}

/// A renderable page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Login,
    ContactForm,
    Results,
    Chat,
}

impl Page {
    /// Where the back action leads, and what it clears on the way.
    #[must_use]
    pub const fn back(self) -> Transition {
        match self {
            Self::Chat => Transition::with_effect(Route::Results, Effect::ClearSelection),
            Self::Results | Self::ContactForm => {
                Transition::with_effect(Route::Home, Effect::ClearSearch)
            }
            Self::Login | Self::Home => Transition::to(Route::Home),
        }
    }
}

/// Everything the guards look at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavState {
    /// An identity is logged in.
    pub authenticated: bool,
    /// A document is selected for the chat.
    pub document_selected: bool,
}

/// Guard verdict for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Render(Page),
    Redirect(Route),
}

/// Evaluate the guard of `route`.
///
/// Results needs an identity (else Login). Chat needs an identity and a
/// selected document (else Results, whose own guard then applies). Every
/// other route is open.
#[must_use]
pub const fn resolve(route: Route, state: NavState) -> Outcome {
    match route {
        Route::Results if !state.authenticated => Outcome::Redirect(Route::Login),
        Route::Chat if !(state.authenticated && state.document_selected) => {
            Outcome::Redirect(Route::Results)
        }
        other => Outcome::Render(other.page()),
    }
}

/// A user action that moves between pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitSearch,
    LoginSucceeded,
    ContactSubmitted,
    SelectDocument,
    Back,
    Logout,
}

/// Side effect on the draft state that accompanies a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Clear search name, email and phone.
    ClearSearch,
    /// Clear the selected document only.
    ClearSelection,
    /// Return every per-session component to its initial state.
    ResetAll,
}

/// Target route of an action plus the effect to apply before navigating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: Route,
    pub effect: Option<Effect>,
}

impl Transition {
    const fn to(route: Route) -> Self {
        Self {
            to: route,
            effect: None,
        }
    }

    const fn with_effect(route: Route, effect: Effect) -> Self {
        Self {
            to: route,
            effect: Some(effect),
        }
    }
}

/// Where `action`, performed on page `from`, leads.
///
/// The target is not guard-checked here; the handler for the target route
/// runs [`resolve`] when it is requested.
#[must_use]
pub const fn transition(from: Page, action: Action, state: NavState) -> Transition {
    match action {
        Action::SubmitSearch if state.authenticated => Transition::to(Route::Results),
        Action::SubmitSearch => Transition::to(Route::Login),
        Action::LoginSucceeded | Action::ContactSubmitted => Transition::to(Route::Results),
        Action::SelectDocument => Transition::to(Route::Chat),
        Action::Back => from.back(),
        Action::Logout => Transition::with_effect(Route::Home, Effect::ResetAll),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn state(authenticated: bool, document_selected: bool) -> NavState {
        NavState {
            authenticated,
            document_selected,
        }
    }

    fn all_states() -> [NavState; 4] {
        [
            state(false, false),
            state(false, true),
            state(true, false),
            state(true, true),
        ]
    }

    /// Follow redirects from `route` the way a browser would, until a page
    /// renders.
    fn settle(route: Route, state: NavState) -> (Route, Page) {
        let mut current = route;
        for _ in 0..Route::ALL.len() {
            match resolve(current, state) {
                Outcome::Render(page) => return (current, page),
                Outcome::Redirect(next) => current = next,
            }
        }
        panic!("redirect loop from {route:?}");
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/resultados/"), Some(Route::Results));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn test_register_is_login_alias() {
        assert_eq!(Route::Register.page(), Page::Login);
        assert_eq!(
            resolve(Route::Register, NavState::default()),
            Outcome::Render(Page::Login)
        );
    }

    #[test]
    fn test_results_without_identity_redirects_to_login() {
        for s in [state(false, false), state(false, true)] {
            assert_eq!(resolve(Route::Results, s), Outcome::Redirect(Route::Login));
        }
        assert_eq!(
            resolve(Route::Results, state(true, false)),
            Outcome::Render(Page::Results)
        );
    }

    #[test]
    fn test_chat_without_document_redirects_to_results() {
        for s in all_states() {
            if s.document_selected && s.authenticated {
                assert_eq!(resolve(Route::Chat, s), Outcome::Render(Page::Chat));
            } else {
                assert_eq!(resolve(Route::Chat, s), Outcome::Redirect(Route::Results));
            }
        }
    }

    #[test]
    fn test_open_routes_always_render() {
        for s in all_states() {
            for route in [Route::Home, Route::Login, Route::Register, Route::ContactForm] {
                assert_eq!(resolve(route, s), Outcome::Render(route.page()));
            }
        }
    }

    #[test]
    fn test_guards_are_idempotent_and_terminate() {
        for s in all_states() {
            for route in Route::ALL {
                assert_eq!(resolve(route, s), resolve(route, s));

                let (settled, page) = settle(route, s);
                assert_eq!(resolve(settled, s), Outcome::Render(page));
                assert_eq!(settle(settled, s), (settled, page));
            }
        }
    }

    #[test]
    fn test_chat_logged_out_settles_on_login() {
        assert_eq!(
            settle(Route::Chat, state(false, true)),
            (Route::Login, Page::Login)
        );
    }

    #[test]
    fn test_search_transition_depends_on_identity() {
        assert_eq!(
            transition(Page::Home, Action::SubmitSearch, state(false, false)).to,
            Route::Login
        );
        assert_eq!(
            transition(Page::Home, Action::SubmitSearch, state(true, false)).to,
            Route::Results
        );
    }

    #[test]
    fn test_form_submissions_lead_to_results() {
        for action in [Action::LoginSucceeded, Action::ContactSubmitted] {
            for from in [Page::Login, Page::ContactForm] {
                let t = transition(from, action, state(true, false));
                assert_eq!(t, Transition::to(Route::Results));
            }
        }
    }

    #[test]
    fn test_back_transitions() {
        let s = state(true, true);
        assert_eq!(
            transition(Page::Chat, Action::Back, s),
            Transition::with_effect(Route::Results, Effect::ClearSelection)
        );
        assert_eq!(
            transition(Page::Results, Action::Back, s),
            Transition::with_effect(Route::Home, Effect::ClearSearch)
        );
        assert_eq!(
            transition(Page::ContactForm, Action::Back, s),
            Transition::with_effect(Route::Home, Effect::ClearSearch)
        );
        assert_eq!(transition(Page::Login, Action::Back, s).to, Route::Home);
    }

    #[test]
    fn test_logout_from_anywhere_resets() {
        for from in [Page::Home, Page::Login, Page::ContactForm, Page::Results, Page::Chat] {
            assert_eq!(
                transition(from, Action::Logout, state(true, true)),
                Transition::with_effect(Route::Home, Effect::ResetAll)
            );
        }
    }
}
