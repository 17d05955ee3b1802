//! Current-user extractor.
//!
//! The CRUD screens are open (no authorization gate); the extractor only
//! surfaces the session identity so customer creation can record who the
//! actor was. The identity is always passed explicitly into the operation
//! by the handler, never read from ambient state.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use tower_sessions::Session;

use crate::models::{CurrentUser, session_keys};

/// Extractor that optionally gets the current user.
///
/// Never rejects the request: `None` simply means no session identity.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     OptionalAuth(user): OptionalAuth,
/// ) -> impl IntoResponse {
///     let owner_id = user.map(|u| u.id);
///     // ...
/// }
/// ```
pub struct OptionalAuth(pub Option<CurrentUser>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
                .ok()
                .flatten(),
            None => None,
        };

        Ok(Self(user))
    }
}
