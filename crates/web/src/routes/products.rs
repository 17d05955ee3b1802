//! Product CRUD route handlers.
//!
//! Create and update accept multipart bodies because of the optional image
//! upload; the other handlers mirror the customer routes.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    body::Bytes,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use arif_motor_core::ProductId;

use crate::db::ProductRepository;
use crate::error::AppError;
use crate::filters;
use crate::middleware::flash;
use crate::models::{Product, ProductDraft};
use crate::services::images::{self, ImageKind};
use crate::state::AppState;
use crate::validate::{self, ValidationErrors};

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Submitted product form fields, preserved verbatim for re-display.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub stock: String,
    pub price: String,
}

impl ProductForm {
    fn validate(&self) -> Result<ProductDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = validate::require(&mut errors, "name", &self.name, "Name");
        let brand = validate::require(&mut errors, "brand", &self.brand, "Brand");
        let product_type = validate::require(&mut errors, "type", &self.product_type, "Type");
        let stock: i32 = validate::require_integer(&mut errors, "stock", &self.stock, "Stock");
        let price: i64 = validate::require_integer(&mut errors, "price", &self.price, "Price");

        if errors.is_empty() {
            Ok(ProductDraft {
                name,
                brand,
                product_type,
                stock,
                price,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            product_type: product.product_type.clone(),
            stock: product.stock.to_string(),
            price: product.price.to_string(),
        }
    }
}

/// A parsed multipart submission: the text fields plus the raw upload, if
/// the browser sent a file part with a filename.
struct ProductSubmission {
    form: ProductForm,
    upload: Option<Bytes>,
}

/// Drain a multipart body into a [`ProductSubmission`].
///
/// Unknown parts are skipped; a file part without a filename (the browser's
/// "no file chosen") counts as no upload.
async fn read_submission(mut multipart: Multipart) -> Result<ProductSubmission, AppError> {
    let mut form = ProductForm::default();
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "image" => {
                let has_filename = field.file_name().is_some_and(|f| !f.is_empty());
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
                if has_filename && !bytes.is_empty() {
                    upload = Some(bytes);
                }
            }
            _ => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("failed to read field: {e}")))?;
                match name.as_str() {
                    "name" => form.name = value,
                    "brand" => form.brand = value,
                    "type" => form.product_type = value,
                    "stock" => form.stock = value,
                    "price" => form.price = value,
                    _ => {}
                }
            }
        }
    }

    Ok(ProductSubmission { form, upload })
}

/// Validate the upload on top of the text fields, collecting the image
/// rejection into the same per-field error list.
fn validate_submission(
    submission: &ProductSubmission,
) -> Result<(ProductDraft, Option<(Bytes, ImageKind)>), ValidationErrors> {
    let mut image = None;
    let mut image_error = None;

    if let Some(bytes) = &submission.upload {
        match images::check(bytes) {
            Ok(kind) => image = Some((bytes.clone(), kind)),
            Err(rejection) => image_error = Some(rejection.to_string()),
        }
    }

    match (submission.form.validate(), image_error) {
        (Ok(draft), None) => Ok((draft, image)),
        (Ok(_), Some(message)) => {
            let mut errors = ValidationErrors::new();
            errors.push("image", message);
            Err(errors)
        }
        (Err(mut errors), image_error) => {
            if let Some(message) = image_error {
                errors.push("image", message);
            }
            Err(errors)
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<Product>,
    pub search: Option<String>,
    pub flash: Option<String>,
}

/// Product create form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/create.html")]
pub struct ProductCreateTemplate {
    pub form: ProductForm,
    pub errors: ValidationErrors,
}

/// Product edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct ProductEditTemplate {
    pub id: ProductId,
    pub form: ProductForm,
    pub image: Option<String>,
    pub errors: ValidationErrors,
}

// =============================================================================
// Handlers
// =============================================================================

/// Product listing page, optionally filtered by `?search=`.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    session: Session,
) -> Result<ProductsIndexTemplate, AppError> {
    let products = ProductRepository::new(state.pool())
        .list(query.search.as_deref())
        .await?;
    let flash = flash::take(&session).await;

    Ok(ProductsIndexTemplate {
        products,
        search: query.search,
        flash,
    })
}

/// Render the create form.
#[instrument]
pub async fn create_form() -> ProductCreateTemplate {
    ProductCreateTemplate {
        form: ProductForm::default(),
        errors: ValidationErrors::new(),
    }
}

/// Create a product, storing the uploaded image when one was sent, and
/// redirect to the listing.
#[instrument(skip(state, session, multipart))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;

    let (draft, image) = match validate_submission(&submission) {
        Ok(valid) => valid,
        Err(errors) => {
            let page = ProductCreateTemplate {
                form: submission.form,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let stored = match image {
        Some((bytes, kind)) => Some(state.images().store(&bytes, kind).await?),
        None => None,
    };

    let product = ProductRepository::new(state.pool())
        .create(&draft, stored.as_deref())
        .await?;
    tracing::info!(product_id = %product.id, image = ?product.image, "product created");

    flash::set(&session, "Product added successfully.").await?;
    Ok(Redirect::to("/products").into_response())
}

/// Render the edit form for an existing product.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<ProductEditTemplate, AppError> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductEditTemplate {
        id,
        form: ProductForm::from(&product),
        image: product.image,
        errors: ValidationErrors::new(),
    })
}

/// Update a product in place and redirect to the listing.
///
/// A new upload replaces the stored image file; the old file is released
/// once the row update has gone through. Without an upload the existing
/// reference is left untouched.
#[instrument(skip(state, session, multipart))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let repo = ProductRepository::new(state.pool());

    let existing = repo
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let submission = read_submission(multipart).await?;

    let (draft, image) = match validate_submission(&submission) {
        Ok(valid) => valid,
        Err(errors) => {
            let page = ProductEditTemplate {
                id,
                form: submission.form,
                image: existing.image,
                errors,
            };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let stored = match image {
        Some((bytes, kind)) => Some(state.images().store(&bytes, kind).await?),
        None => None,
    };

    repo.update(id, &draft, stored.as_deref()).await?;
    tracing::info!(product_id = %id, "product updated");

    // The row now points at the new file; the replaced one is released.
    if let (Some(_), Some(old)) = (&stored, &existing.image) {
        state.images().remove(old).await;
    }

    flash::set(&session, "Product updated successfully.").await?;
    Ok(Redirect::to("/products").into_response())
}

/// Delete a product, releasing its image file, and redirect to the listing.
#[instrument(skip(state, session))]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let deleted = ProductRepository::new(state.pool()).delete(id).await?;
    tracing::info!(product_id = %id, "product deleted");

    if let Some(image) = &deleted.image {
        state.images().remove(image).await;
    }

    flash::set(&session, "Product deleted successfully.").await?;
    Ok(Redirect::to("/products").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, brand: &str, product_type: &str, stock: &str, price: &str) -> ProductForm {
        ProductForm {
            name: name.to_owned(),
            brand: brand.to_owned(),
            product_type: product_type.to_owned(),
            stock: stock.to_owned(),
            price: price.to_owned(),
        }
    }

    #[test]
    fn test_validate_accepts_valid_input() {
        let draft = form("Helm Racing", "INK", "Full Face", "10", "350000")
            .validate()
            .expect("valid form");
        assert_eq!(draft.stock, 10);
        assert_eq!(draft.price, 350_000);
    }

    #[test]
    fn test_validate_rejects_non_integer_stock() {
        let errors = form("Helm Racing", "INK", "Full Face", "ten", "350000")
            .validate()
            .expect_err("stock must be rejected");
        assert_eq!(errors.field("stock"), Some("Stock must be an integer."));
    }

    #[test]
    fn test_validate_requires_all_strings() {
        let errors = form("", "", "", "10", "350000")
            .validate()
            .expect_err("empty strings");
        assert!(errors.field("name").is_some());
        assert!(errors.field("brand").is_some());
        assert!(errors.field("type").is_some());
    }

    #[test]
    fn test_submission_with_bad_image_collects_field_error() {
        let submission = ProductSubmission {
            form: form("Helm Racing", "INK", "Full Face", "10", "350000"),
            upload: Some(Bytes::from_static(b"definitely not an image")),
        };
        let errors = validate_submission(&submission).expect_err("upload must be rejected");
        assert_eq!(errors.field("image"), Some("image must be a JPEG or PNG file"));
    }

    #[test]
    fn test_submission_with_oversize_image() {
        let mut big = vec![0_u8; images::MAX_IMAGE_BYTES + 1];
        big[0] = 0xFF;
        big[1] = 0xD8;
        big[2] = 0xFF;
        let submission = ProductSubmission {
            form: form("Helm Racing", "INK", "Full Face", "10", "350000"),
            upload: Some(Bytes::from(big)),
        };
        let errors = validate_submission(&submission).expect_err("oversize upload");
        assert_eq!(errors.field("image"), Some("image must be at most 2048 KB"));
    }

    #[test]
    fn test_submission_without_upload_is_valid() {
        let submission = ProductSubmission {
            form: form("Helm Racing", "INK", "Full Face", "10", "350000"),
            upload: None,
        };
        let (draft, image) = validate_submission(&submission).expect("no upload is fine");
        assert_eq!(draft.name, "Helm Racing");
        assert!(image.is_none());
    }
}
