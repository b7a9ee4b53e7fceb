//! Canned-response assistant for a selected document.
//!
//! Replies come from an ordered keyword table: the first group with a
//! keyword contained in the (lowercased) question wins, otherwise a generic
//! reply echoes the document excerpt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Document;
use crate::draft::Reset;
use crate::types::{DocumentId, MessageId};

/// Default "assistant is typing" pause before a reply, in milliseconds.
pub const DEFAULT_TYPING_DELAY_MS: u64 = 1500;

/// Questions offered as one-click prompts.
pub const SUGGESTED_QUESTIONS: [&str; 6] = [
    "O que esse documento fala sobre mim?",
    "Quando foi publicado?",
    "O que eu preciso fazer?",
    "Existe algum prazo?",
    "Qual órgão publicou?",
    "Como posso acessar o documento completo?",
];

struct Rule {
    keywords: &'static [&'static str],
    reply: fn(&Document) -> String,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["o que", "fala", "sobre"],
        reply: |d| {
            format!(
                "Este documento é {} publicado pela {} no dia {}. O documento menciona você no \
                 seguinte contexto: \"{}\". Trata-se de um ato oficial que pode ter implicações \
                 importantes para você.",
                d.kind.to_lowercase(),
                d.organ,
                d.date,
                d.excerpt
            )
        },
    },
    Rule {
        keywords: &["quando", "data"],
        reply: |d| {
            format!(
                "O documento foi publicado no Diário Oficial em {}, edição nº {}.",
                d.date, d.edition
            )
        },
    },
    Rule {
        keywords: &["onde", "órgão", "orgao"],
        reply: |d| format!("A publicação é do órgão: {}.", d.organ),
    },
    Rule {
        keywords: &["importante", "preciso", "fazer"],
        reply: |d| {
            format!(
                "Recomendo que você leia o documento completo e, se necessário, consulte o órgão \
                 responsável ({}) para obter mais informações ou orientações sobre os próximos \
                 passos. Se houver prazos mencionados, é importante cumpri-los.",
                d.organ
            )
        },
    },
    Rule {
        keywords: &["prazo", "tempo"],
        reply: |_| {
            "Para verificar se há prazos específicos, você deve consultar o documento completo. \
             Geralmente, publicações oficiais contêm informações sobre prazos para recursos, \
             apresentação de documentos ou outras ações necessárias."
                .to_string()
        },
    },
    Rule {
        keywords: &["nomeação", "cargo"],
        reply: |d| {
            format!(
                "Este documento trata de {}. Para mais detalhes sobre o cargo, atribuições e data \
                 de posse, consulte o documento completo no Diário Oficial.",
                d.kind.to_lowercase()
            )
        },
    },
    Rule {
        keywords: &["obrigado", "valeu"],
        reply: |_| {
            "Por nada! Estou aqui para ajudar. Se tiver mais dúvidas sobre este ou outros \
             documentos, pode me perguntar!"
                .to_string()
        },
    },
];

/// Answer `question` about `document`.
#[must_use]
pub fn respond(question: &str, document: &Document) -> String {
    let question = question.to_lowercase();

    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| question.contains(k)))
        .map_or_else(
            || {
                format!(
                    "Entendo sua pergunta. Com base no documento \"{}\" publicado em {}, posso \
                     dizer que: {} Para informações mais específicas, recomendo consultar o \
                     documento completo ou entrar em contato com {}.",
                    document.kind, document.date, document.excerpt, document.organ
                )
            },
            |rule| (rule.reply)(document),
        )
}

/// Opening assistant message for `document`.
#[must_use]
pub fn greeting(document: &Document) -> String {
    format!(
        "Olá! Sou a IA assistente do Diário Oficial. Estou aqui para ajudar você a entender o \
         documento \"{}\" publicado em {}. Pode me fazer perguntas sobre este documento!",
        document.kind, document.date
    )
}

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Assistant,
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// `HH:MM` (UTC) label for the message bubble.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }

    #[must_use]
    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Transcript of the chat about one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    document_id: Option<DocumentId>,
    messages: Vec<Message>,
}

impl Conversation {
    /// Start a conversation about `document`, seeded with the greeting.
    #[must_use]
    pub fn open(document: &Document, at: DateTime<Utc>) -> Self {
        let mut conversation = Self {
            document_id: Some(document.id),
            messages: Vec::new(),
        };
        conversation.push(greeting(document), Sender::Assistant, at);
        conversation
    }

    /// Whether the transcript belongs to `document`.
    #[must_use]
    pub fn is_about(&self, document: &Document) -> bool {
        self.document_id == Some(document.id)
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Append a user question. Blank input is ignored and returns `None`.
    pub fn ask(&mut self, text: &str, at: DateTime<Utc>) -> Option<Message> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.push(text.to_string(), Sender::User, at))
    }

    /// Append the assistant's answer to `question`.
    pub fn answer(&mut self, question: &str, document: &Document, at: DateTime<Utc>) -> Message {
        self.push(respond(question, document), Sender::Assistant, at)
    }

    fn push(&mut self, text: String, sender: Sender, at: DateTime<Utc>) -> Message {
        let next = u32::try_from(self.messages.len()).unwrap_or(u32::MAX).saturating_add(1);
        let message = Message {
            id: MessageId::new(next),
            text,
            sender,
            timestamp: at,
        };
        self.messages.push(message.clone());
        message
    }
}

impl Reset for Conversation {
    fn reset(&mut self) {
        *self = Self::default();
    }
}
