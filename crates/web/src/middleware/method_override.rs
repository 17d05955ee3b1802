//! HTTP method override for HTML forms.
//!
//! Browsers only submit GET and POST, so the edit and delete forms POST with
//! a `_method` query parameter (`?_method=PUT|PATCH|DELETE`) and this layer
//! rewrites the method before routing. Only POST requests are eligible;
//! anything else passes through untouched.

use axum::{
    extract::Request,
    http::Method,
    middleware::Next,
    response::Response,
};

/// Middleware function for `axum::middleware::from_fn`.
pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST
        && let Some(method) = override_from_query(req.uri().query())
    {
        *req.method_mut() = method;
    }
    next.run(req).await
}

/// Parse a `_method` override out of a raw query string.
fn override_from_query(query: Option<&str>) -> Option<Method> {
    let query = query?;
    for pair in query.split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == "_method" {
            return match value.to_ascii_uppercase().as_str() {
                "PUT" => Some(Method::PUT),
                "PATCH" => Some(Method::PATCH),
                "DELETE" => Some(Method::DELETE),
                _ => None,
            };
        }
    }
    None
}
