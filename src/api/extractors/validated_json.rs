//! JSON body extractor that runs `validator` rules before the handler.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// Deserializes and validates a request body.
///
/// Malformed JSON is a `BadRequest`; a body that parses but breaks a field
/// rule is a `Validation` error carrying the rule messages.
///
/// ```rust,ignore
/// async fn create_course(ValidatedJson(payload): ValidatedJson<CreateCourse>) {
///     // payload.name is non-empty here
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
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CreateDepartment;
    use axum::body::Body;
    use axum::http::header;

    fn request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let result = ValidatedJson::<CreateDepartment>::from_request(request("{\"name\":"), &()).await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn rule_violation_is_validation_error() {
        let result = ValidatedJson::<CreateDepartment>::from_request(request("{\"name\":\"\"}"), &()).await;
        match result {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Department name is required"),
            _ => panic!("expected validation error"),
        }
    }

    #[tokio::test]
    async fn valid_body_passes_through() {
        let ValidatedJson(input) =
            ValidatedJson::<CreateDepartment>::from_request(request("{\"name\":\"Engineering\"}"), &())
                .await
                .unwrap();
        assert_eq!(input.name, "Engineering");
    }
}
