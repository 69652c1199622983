//! Request bodies and the validating JSON extractor.

use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use utoipa::ToSchema;
use validator::Validate;

use super::response::ApiError;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "melos")]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    /// Taken as-is; no length or strength rule.
    #[schema(example = "Password1234")]
    pub password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "melos")]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[schema(example = "Password1234")]
    pub password: String,
}

/// Password update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[schema(example = "newSecurePassword123")]
    pub password: String,
}

/// JSON body extractor that runs `validator` rules before the handler sees
/// the value.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value): Json<T> = Json::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid JSON: {}", e.body_text())))?;

        value
            .validate()
            .map_err(|e| ApiError::bad_request(e.to_string()))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rules() {
        let ok = RegisterRequest {
            username: "melos".into(),
            password: "x".into(),
        };
        assert!(ok.validate().is_ok());

        let empty_name = RegisterRequest {
            username: String::new(),
            password: "x".into(),
        };
        let err = empty_name.validate().unwrap_err();
        assert!(err.field_errors().contains_key("username"));
    }

    #[test]
    fn test_any_password_is_accepted() {
        let register = RegisterRequest {
            username: "melos".into(),
            password: String::new(),
        };
        assert!(register.validate().is_ok());

        let update = UpdatePasswordRequest {
            password: String::new(),
        };
        assert!(update.validate().is_ok());
    }
}
