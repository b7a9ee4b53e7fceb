//! Demo notification feed shown in the navbar.
//!
//! The feed is static. It only appears for identities whose name marks them
//! as a demo account, and its read state lives in the browser session.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use diario_core::{Identity, Reset};

static DEMO_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)demo|andre|apresentacao|apresentação").expect("demo name pattern is valid")
});

/// A navbar notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// Relative time label, e.g. "há 2h".
    pub time: &'static str,
    pub read: bool,
}

/// (id, title, description, time, read initially)
const FEED: [(&str, &str, &str, &str, bool); 3] = [
    (
        "1",
        "Nova menção encontrada",
        "Seu nome apareceu em uma publicação recente.",
        "há 2h",
        false,
    ),
    (
        "2",
        "Resultado atualizado",
        "Uma edição anterior foi revisada.",
        "ontem",
        false,
    ),
    (
        "3",
        "Bem-vindo!",
        "Ative os alertas para receber avisos por e-mail.",
        "há 3 dias",
        true,
    ),
];

/// Which notifications this browser session has marked as read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationState {
    read: BTreeSet<String>,
}

impl NotificationState {
    /// Mark every notification in the feed as read.
    pub fn mark_all_read(&mut self) {
        self.read
            .extend(FEED.iter().map(|&(id, ..)| id.to_string()));
    }
}

impl Reset for NotificationState {
    fn reset(&mut self) {
        self.read.clear();
    }
}

/// Whether `identity` gets the demo feed.
#[must_use]
pub fn is_demo_identity(identity: &Identity) -> bool {
    DEMO_NAME.is_match(identity.name.as_str())
}

/// The feed with read flags applied.
#[must_use]
pub fn feed(state: &NotificationState) -> Vec<Notification> {
    FEED.iter()
        .map(|&(id, title, description, time, read)| Notification {
            id,
            title,
            description,
            time,
            read: read || state.read.contains(id),
        })
        .collect()
}

/// Number of unread entries.
#[must_use]
pub fn unread_count(feed: &[Notification]) -> usize {
    feed.iter().filter(|n| !n.read).count()
}
