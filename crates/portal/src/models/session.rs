//! Session-related types.
//!
//! The browser session is the portal's per-user key-value store. Each
//! stateful component owns one key.

/// Session keys.
pub mod keys {
    /// Persisted identity, stored as JSON text.
    pub const AUTH_USER: &str = "authUser";

    /// Search/contact draft.
    pub const DRAFT: &str = "draft";

    /// Chat transcript for the selected document.
    pub const CONVERSATION: &str = "conversation";

    /// Read state of the notification feed.
    pub const NOTIFICATIONS: &str = "notifications";
}
