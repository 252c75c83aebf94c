use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::{ErrorDto, FieldErrorDto};

/// Collection of field-level validation failures, rendered as 422 Unprocessable Entity.
///
/// Validators push every problem they find so the client receives the complete list in
/// one response.
#[derive(Error, Debug, Clone, PartialEq, Default)]
#[error("Validation failed: {errors:?}")]
pub struct ValidationError {
    pub errors: Vec<FieldErrorDto>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Single-field failure.
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut err = Self::new();
        err.add(field, message);
        err
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldErrorDto {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Records `field` as missing when `value` is `None` or blank.
    pub fn require_str(&mut self, field: &str, value: Option<&str>) {
        if value.map(str::trim).filter(|v| !v.is_empty()).is_none() {
            self.add(field, format!("{} is required", field));
        }
    }

    pub fn require<T>(&mut self, field: &str, value: &Option<T>) {
        if value.is_none() {
            self.add(field, format!("{} is required", field));
        }
    }

    /// Folds another set of failures in, prefixing each field with `prefix.`.
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorDto::with_errors("Validation failed", self.errors)),
        )
            .into_response()
    }
}
