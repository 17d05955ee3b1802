//! Integration tests for Arif Motor.
//!
//! # Running Tests
//!
//! ```bash
//! # Run migrations and start the server
//! cargo run -p arif-motor-cli -- migrate
//! cargo run -p arif-motor-web
//!
//! # Run integration tests
//! cargo test -p arif-motor-integration-tests -- --ignored
//! ```
//!
//! The suites in `tests/` drive the HTTP surface of a running server; they
//! are `#[ignore]`d by default because they need the server and its
//! database.

/// Base URL for the dashboard (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ARIF_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// An HTTP client that keeps the session cookie and does not follow
/// redirects, so tests can assert on the redirect responses themselves.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
