//! HTTP middleware: sessions, flash notices, method override, and the
//! optional current-user extractor.

pub mod auth;
pub mod flash;
pub mod method_override;
pub mod session;

pub use auth::OptionalAuth;
pub use method_override::method_override;
pub use session::create_session_layer;
