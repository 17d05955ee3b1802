//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to /customers
//!
//! # Customers
//! GET    /customers            - Customer listing (optional ?search=)
//! GET    /customers/create     - Create form
//! POST   /customers            - Create
//! GET    /customers/{id}/edit  - Edit form
//! PUT    /customers/{id}       - Update (also PATCH)
//! DELETE /customers/{id}       - Delete
//!
//! # Products
//! GET    /products             - Product listing (optional ?search=)
//! GET    /products/create      - Create form
//! POST   /products             - Create (multipart, optional image)
//! GET    /products/{id}/edit   - Edit form
//! PUT    /products/{id}        - Update (also PATCH; multipart)
//! DELETE /products/{id}        - Delete
//! ```
//!
//! The HTML forms POST with a `?_method=` override; see
//! [`crate::middleware::method_override`].

pub mod customers;
pub mod products;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, put},
};

use crate::services::images::MAX_IMAGE_BYTES;
use crate::state::AppState;

/// Request body cap: comfortably above the image validation limit so an
/// oversized upload is rejected with a per-field message, not a bare 413.
const BODY_LIMIT_BYTES: usize = 4 * MAX_IMAGE_BYTES;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/customers") }))
        // Customers
        .route("/customers", get(customers::index).post(customers::create))
        .route("/customers/create", get(customers::create_form))
        .route("/customers/{id}/edit", get(customers::edit_form))
        .route(
            "/customers/{id}",
            put(customers::update)
                .patch(customers::update)
                .delete(customers::destroy),
        )
        // Products
        .route("/products", get(products::index).post(products::create))
        .route("/products/create", get(products::create_form))
        .route("/products/{id}/edit", get(products::edit_form))
        .route(
            "/products/{id}",
            put(products::update)
                .patch(products::update)
                .delete(products::destroy),
        )
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}
