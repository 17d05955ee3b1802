//! Customer CRUD route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use arif_motor_core::CustomerId;

use crate::db::CustomerRepository;
use crate::error::AppError;
use crate::middleware::{OptionalAuth, flash};
use crate::models::{Customer, CustomerDraft};
use crate::state::AppState;
use crate::validate::{self, ValidationErrors};

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

/// Submitted customer form fields, preserved verbatim for re-display.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gender: String,
}

impl CustomerForm {
    /// Validate for creation: phone must be numeric.
    fn validate_create(&self) -> Result<CustomerDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = validate::require_max_len(&mut errors, "name", &self.name, "Name", 255);
        let address = validate::require(&mut errors, "address", &self.address, "Address");
        let phone = validate::require_digits(&mut errors, "phone", &self.phone, "Phone");
        let gender = validate::require(&mut errors, "gender", &self.gender, "Gender");
        Self::finish(errors, name, address, phone, gender)
    }

    /// Validate for update: phone may be any non-empty string.
    ///
    /// The asymmetry with [`Self::validate_create`] is inherited behavior,
    /// kept as observed.
    fn validate_update(&self) -> Result<CustomerDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let name = validate::require_max_len(&mut errors, "name", &self.name, "Name", 255);
        let address = validate::require(&mut errors, "address", &self.address, "Address");
        let phone = validate::require(&mut errors, "phone", &self.phone, "Phone");
        let gender = validate::require(&mut errors, "gender", &self.gender, "Gender");
        Self::finish(errors, name, address, phone, gender)
    }

    fn finish(
        errors: ValidationErrors,
        name: String,
        address: String,
        phone: String,
        gender: String,
    ) -> Result<CustomerDraft, ValidationErrors> {
        if errors.is_empty() {
            Ok(CustomerDraft {
                name,
                address,
                phone,
                gender,
            })
        } else {
            Err(errors)
        }
    }
}

impl From<&Customer> for CustomerForm {
    fn from(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            address: customer.address.clone(),
            phone: customer.phone.clone(),
            gender: customer.gender.clone(),
        }
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Customer listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<Customer>,
    pub search: Option<String>,
    pub flash: Option<String>,
}

/// Customer create form template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/create.html")]
pub struct CustomerCreateTemplate {
    pub form: CustomerForm,
    pub errors: ValidationErrors,
}

/// Customer edit form template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/edit.html")]
pub struct CustomerEditTemplate {
    pub id: CustomerId,
    pub form: CustomerForm,
    pub errors: ValidationErrors,
}

// =============================================================================
// Handlers
// =============================================================================

/// Customer listing page, optionally filtered by `?search=`.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
    session: Session,
) -> Result<CustomersIndexTemplate, AppError> {
    let customers = CustomerRepository::new(state.pool())
        .list(query.search.as_deref())
        .await?;
    let flash = flash::take(&session).await;

    Ok(CustomersIndexTemplate {
        customers,
        search: query.search,
        flash,
    })
}

/// Render the create form.
#[instrument]
pub async fn create_form() -> CustomerCreateTemplate {
    CustomerCreateTemplate {
        form: CustomerForm::default(),
        errors: ValidationErrors::new(),
    }
}

/// Create a customer and redirect to the listing.
///
/// The acting user, when a session identity exists, is recorded as the
/// record's owner.
#[instrument(skip(state, session, user, form))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    OptionalAuth(user): OptionalAuth,
    Form(form): Form<CustomerForm>,
) -> Result<Response, AppError> {
    let draft = match form.validate_create() {
        Ok(draft) => draft,
        Err(errors) => {
            let page = CustomerCreateTemplate { form, errors };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    let customer = CustomerRepository::new(state.pool())
        .create(&draft, user.map(|u| u.id))
        .await?;
    tracing::info!(customer_id = %customer.id, "customer created");

    flash::set(&session, "Customer added successfully.").await?;
    Ok(Redirect::to("/customers").into_response())
}

/// Render the edit form for an existing customer.
#[instrument(skip(state))]
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<CustomerEditTemplate, AppError> {
    let id = CustomerId::new(id);
    let customer = CustomerRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    Ok(CustomerEditTemplate {
        id,
        form: CustomerForm::from(&customer),
        errors: ValidationErrors::new(),
    })
}

/// Update a customer in place and redirect to the listing.
#[instrument(skip(state, session, form))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> Result<Response, AppError> {
    let id = CustomerId::new(id);
    let repo = CustomerRepository::new(state.pool());

    repo.get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("customer {id}")))?;

    let draft = match form.validate_update() {
        Ok(draft) => draft,
        Err(errors) => {
            let page = CustomerEditTemplate { id, form, errors };
            return Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response());
        }
    };

    repo.update(id, &draft).await?;
    tracing::info!(customer_id = %id, "customer updated");

    flash::set(&session, "Customer updated successfully.").await?;
    Ok(Redirect::to("/customers").into_response())
}

/// Delete a customer and redirect to the listing.
#[instrument(skip(state, session))]
pub async fn destroy(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = CustomerId::new(id);
    CustomerRepository::new(state.pool()).delete(id).await?;
    tracing::info!(customer_id = %id, "customer deleted");

    flash::set(&session, "Customer deleted successfully.").await?;
    Ok(Redirect::to("/customers").into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, address: &str, phone: &str, gender: &str) -> CustomerForm {
        CustomerForm {
            name: name.to_owned(),
            address: address.to_owned(),
            phone: phone.to_owned(),
            gender: gender.to_owned(),
        }
    }

    #[test]
    fn test_create_accepts_valid_input() {
        let draft = form("Budi Santoso", "Jl. Merdeka 1", "081234567890", "Laki-laki")
            .validate_create()
            .expect("valid form");
        assert_eq!(draft.name, "Budi Santoso");
        assert_eq!(draft.phone, "081234567890");
    }

    #[test]
    fn test_create_rejects_non_numeric_phone() {
        let errors = form("Budi", "Jl. Merdeka 1", "abc", "Laki-laki")
            .validate_create()
            .expect_err("phone must be rejected");
        assert_eq!(errors.field("phone"), Some("Phone must be a number."));
    }

    #[test]
    fn test_update_accepts_non_numeric_phone() {
        // Inherited asymmetry: update takes any non-empty phone.
        let draft = form("Budi", "Jl. Merdeka 1", "abc", "Laki-laki")
            .validate_update()
            .expect("update accepts any non-empty phone");
        assert_eq!(draft.phone, "abc");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = form("", "", "", "").validate_create().expect_err("all empty");
        for field in ["name", "address", "phone", "gender"] {
            assert!(errors.field(field).is_some(), "missing error for {field}");
        }
    }

    #[test]
    fn test_name_length_limit() {
        let long = "x".repeat(256);
        let errors = form(&long, "Jl. Merdeka 1", "0812", "Perempuan")
            .validate_create()
            .expect_err("overlong name");
        assert_eq!(
            errors.field("name"),
            Some("Name must be at most 255 characters.")
        );
    }
}
