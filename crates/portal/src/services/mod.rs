//! Business services for the portal.

pub mod notifications;
pub mod session_store;

pub use notifications::NotificationState;
pub use session_store::{SessionSlot, SessionStore};
