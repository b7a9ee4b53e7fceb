//! Core types for the portal.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;

pub use email::{Email, EmailError};
pub use id::*;
pub use name::{NameError, PersonName};
