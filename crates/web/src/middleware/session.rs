//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. Sessions carry
//! the one-shot flash notice and, when the auth layer has set one, the
//! current user.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::AppConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "arif_motor_session";

/// Session expiry time in seconds (24 hours).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// # Panics
///
/// Panics if the schema or table name is invalid (should never happen with
/// the hardcoded "public" and "session" values).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &AppConfig,
) -> SessionManagerLayer<PostgresStore> {
    // The session table is created by the bundled migrations.
    let store = PostgresStore::new(pool.clone())
        .with_schema_name("public")
        .expect("valid schema name")
        .with_table_name("session")
        .expect("valid table name");

    let is_secure = config.base_url.starts_with("https://");

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
