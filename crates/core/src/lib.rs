//! Diário Core - Domain library for the gazette mentions portal.
//!
//! This crate holds everything about the portal that is not HTTP:
//! - who is logged in and how that identity is validated and stored
//! - the document catalog that stands in for a gazette search
//! - the draft state threaded between pages
//! - the page state machine and its route guards
//! - the canned-response chat assistant
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! sessions, no HTTP. The `diario-portal` crate wires it to Axum.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, names and emails
//! - [`identity`] - Login form validation and the persisted identity
//! - [`catalog`] - Mock gazette documents
//! - [`draft`] - Transient search/contact state
//! - [`navigation`] - Routes, guards and transitions
//! - [`chat`] - Keyword-matched assistant and conversation transcript

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod chat;
pub mod draft;
pub mod identity;
pub mod navigation;
pub mod types;

pub use catalog::{Catalog, CatalogError, Document, DocumentKind};
pub use chat::{Conversation, Message, Sender};
pub use draft::{ContactDetails, ContactError, ContactForm, Draft, Reset};
pub use identity::{Identity, LoginError, LoginForm, Registration, StoredIdentityError};
pub use navigation::{Action, Effect, NavState, Outcome, Page, Route, Transition};
pub use types::*;
