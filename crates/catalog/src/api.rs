//! Request parsing and error mapping for a transport layer.
//!
//! An HTTP (or any other) front end reads a JSON body with one of the `parse_*` functions,
//! calls a facade, and turns a failure into a status code and a client-facing message with
//! [`ApiError::to_response`]:
//!
//! ```rust,ignore
//! let request = api::parse_update_product(body)?;
//! match system.products.update(id, &request).await {
//!     Ok(product) => (200, serde_json::to_string(&ProductView::from(&product))?),
//!     Err(e) => {
//!         let response = ApiError::from(e).to_response("update product");
//!         // 404 "Product not found", or 500 "Cannot update product"
//!         (response.status, response.message)
//!     }
//! }
//! ```

use crate::model::{
    CreateProductRequest, CreateUserRequest, UpdateProductRequest, UpdateUserRequest, UserField,
};
use crate::product_store::ProductError;
use crate::user_store::UserError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: &'static str,
    },

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    User(#[from] UserError),
}

/// Status and message to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MalformedBody(_) | ApiError::Validation { .. } => 400,
            ApiError::Product(ProductError::NotFound(_))
            | ApiError::User(UserError::NotFound(_)) => 404,
            ApiError::User(UserError::InvalidArgument(_) | UserError::InvalidState(_)) => 400,
            ApiError::Product(ProductError::Storage(_))
            | ApiError::User(UserError::Storage(_) | UserError::Hashing(_)) => 500,
        }
    }

    /// Client-facing response. `action` names the operation, e.g. "update product".
    ///
    /// Server-side failures are logged here and answered with a generic message so store
    /// internals never reach the client.
    pub fn to_response(&self, action: &str) -> ErrorResponse {
        let status = self.status();
        let message = match self {
            ApiError::Product(ProductError::NotFound(_)) => "Product not found".to_string(),
            ApiError::User(UserError::NotFound(_)) => "User not found".to_string(),
            _ if status >= 500 => {
                error!(error = %self, action, "Request failed");
                format!("Cannot {action}")
            }
            _ => self.to_string(),
        };
        ErrorResponse { status, message }
    }
}

fn not_blank(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation {
            field,
            reason: "must not be blank",
        });
    }
    Ok(())
}

fn valid_price(price: f64) -> Result<(), ApiError> {
    if !price.is_finite() || price < 0.0 {
        return Err(ApiError::Validation {
            field: "price",
            reason: "must be a non-negative number",
        });
    }
    Ok(())
}

fn valid_email(email: &str) -> Result<(), ApiError> {
    let shaped = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty() && domain.contains('.') && !domain.contains('@')
        });
    if !shaped || email.chars().any(char::is_whitespace) {
        return Err(ApiError::Validation {
            field: "email",
            reason: "must be an email address",
        });
    }
    Ok(())
}

pub fn parse_create_product(body: &str) -> Result<CreateProductRequest, ApiError> {
    let request: CreateProductRequest = serde_json::from_str(body)?;
    not_blank("name", &request.name)?;
    valid_price(request.price)?;
    Ok(request)
}

/// Parses a product patch. Only supplied values are validated; `null` passes through.
pub fn parse_update_product(body: &str) -> Result<UpdateProductRequest, ApiError> {
    let request: UpdateProductRequest = serde_json::from_str(body)?;
    if let Some(name) = request.name() {
        not_blank("name", name)?;
    }
    if let Some(price) = request.price() {
        valid_price(price)?;
    }
    Ok(request)
}

/// Parses a registration. A missing password is left for the facade to reject.
pub fn parse_create_user(body: &str) -> Result<CreateUserRequest, ApiError> {
    let request: CreateUserRequest = serde_json::from_str(body)?;
    not_blank("name", &request.name)?;
    not_blank("surname", &request.surname)?;
    not_blank("username", &request.username)?;
    valid_email(&request.email)?;
    Ok(request)
}

pub fn parse_update_user(body: &str) -> Result<UpdateUserRequest, ApiError> {
    let request: UpdateUserRequest = serde_json::from_str(body)?;
    for (field, name) in [
        (UserField::Name, "name"),
        (UserField::Surname, "surname"),
        (UserField::Username, "username"),
    ] {
        if let Some(value) = request.get(field) {
            not_blank(name, value)?;
        }
    }
    if let Some(email) = request.get(UserField::Email) {
        valid_email(email)?;
    }
    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductField;

    #[test]
    fn test_status_mapping() {
        let not_found = ApiError::from(ProductError::NotFound("product_1".into()));
        assert_eq!(not_found.status(), 404);

        let invalid = ApiError::from(UserError::InvalidArgument("Unsupported state 9".into()));
        assert_eq!(invalid.status(), 400);

        let storage = ApiError::from(UserError::Storage("Store actor closed".into()));
        assert_eq!(storage.status(), 500);
    }

    #[test]
    fn test_responses_hide_store_details() {
        let response = ApiError::from(ProductError::Storage("Store actor closed".into()))
            .to_response("update product");
        assert_eq!(
            response,
            ErrorResponse {
                status: 500,
                message: "Cannot update product".into()
            }
        );

        let response =
            ApiError::from(UserError::NotFound("user_3".into())).to_response("update user");
        assert_eq!(response.status, 404);
        assert_eq!(response.message, "User not found");

        let response = ApiError::from(UserError::InvalidState("Password cannot be null".into()))
            .to_response("create user");
        assert_eq!(response.status, 400);
        assert_eq!(response.message, "Invalid state: Password cannot be null");
    }

    #[test]
    fn test_parse_update_product_keeps_null_and_omission_apart() {
        let request = parse_update_product(r#"{"name": null}"#).unwrap();
        assert!(request.was_set(ProductField::Name));
        assert!(!request.was_set(ProductField::Price));

        let error = parse_update_product(r#"{"price": -1}"#).unwrap_err();
        assert!(matches!(error, ApiError::Validation { field: "price", .. }));
        assert_eq!(error.status(), 400);

        let error = parse_update_product(r#"{"name": "  "}"#).unwrap_err();
        assert!(matches!(error, ApiError::Validation { field: "name", .. }));
    }

    #[test]
    fn test_parse_update_user_validates_email() {
        let request = parse_update_user(r#"{"email": "bob@example.com"}"#).unwrap();
        assert_eq!(request.get(UserField::Email), Some("bob@example.com"));

        let error = parse_update_user(r#"{"email": "bob"}"#).unwrap_err();
        assert!(matches!(error, ApiError::Validation { field: "email", .. }));
    }

    #[test]
    fn test_parse_rejects_unknown_and_malformed_bodies() {
        assert!(matches!(
            parse_update_user(r#"{"role": "admin"}"#),
            Err(ApiError::MalformedBody(_))
        ));
        assert!(matches!(
            parse_create_product("not json"),
            Err(ApiError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_parse_create_user_allows_missing_password() {
        let request = parse_create_user(
            r#"{"name": "Ann", "surname": "Lee", "email": "ann@example.com", "username": "ann"}"#,
        )
        .unwrap();
        assert_eq!(request.password, None);

        let created = parse_create_product(r#"{"name": "Mug", "price": 4.5}"#).unwrap();
        assert_eq!(created.price, 4.5);
    }
}
