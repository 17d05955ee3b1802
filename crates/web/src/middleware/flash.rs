//! One-shot flash notices.
//!
//! A notice is inserted into the session alongside the redirect that follows
//! every successful mutation, and removed again by the next listing render.

use tower_sessions::Session;

use crate::models::session_keys;

/// Attach a success notice to the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set(session: &Session, message: &str) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::FLASH, message).await
}

/// Take the pending notice, removing it from the session.
pub async fn take(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
}
