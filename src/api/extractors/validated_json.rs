//! JSON body extractor that runs `validator` rules after deserializing.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Validated JSON extractor.
///
/// Malformed JSON and failed field rules both become a 400 with the
/// `{"error": ...}` envelope.
///
/// ```rust,ignore
/// async fn create_client(ValidatedJson(payload): ValidatedJson<CreateClient>) {
///     // payload.first_name is non-empty here
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
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Join every field message into one line, sorted so output is stable
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateCategory;

    #[test]
    fn test_format_uses_field_messages() {
        let errors = CreateCategory {
            name: String::new(),
        }
        .validate()
        .unwrap_err();

        assert_eq!(format_validation_errors(&errors), "name is required");
    }
}
