//! Domain models for the dashboard.

pub mod customer;
pub mod product;

use serde::{Deserialize, Serialize};

use arif_motor_core::UserId;

pub use customer::{Customer, CustomerDraft};
pub use product::{Product, ProductDraft};

/// Session keys used across the application.
pub mod session_keys {
    /// The logged-in user, when the external auth layer has set one.
    pub const CURRENT_USER: &str = "current_user";
    /// One-shot success notice shown on the next listing render.
    pub const FLASH: &str = "flash";
}

/// The authenticated actor stored in the session by the auth layer.
///
/// CRUD screens never require this; it only supplies `owner_id` on
/// customer creation when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
}
