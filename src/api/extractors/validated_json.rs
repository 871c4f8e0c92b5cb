//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::errors::{AppError, FieldError};

/// Validated JSON extractor that automatically validates requests.
///
/// Malformed bodies and rule violations both reject with a
/// `Validation Error`; rule violations carry one entry per failed field rule.
///
/// ```rust,ignore
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUserRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text(), Vec::new()))?;

        value.validate().map_err(|e| {
            let field_errors = collect_field_errors(&e);
            tracing::debug!(count = field_errors.len(), "Request validation failed");
            AppError::validation("Validation failed", field_errors)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator output into field errors sorted by field name
pub(crate) fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                rejected_value: match e.params.get("value") {
                    None | Some(serde_json::Value::Null) => "null".to_string(),
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(other) => other.to_string(),
                },
                message: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field)),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field));
    field_errors
}
