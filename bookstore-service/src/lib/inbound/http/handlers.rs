use axum::http::header;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::principal::errors::AuthError;
use crate::principal::models::AuthenticatedPrincipal;
use crate::principal::models::Principal;

pub mod current_principal;
pub mod login;
pub mod register;

/// Shared by unknown-identifier and wrong-password rejections.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";
pub const MISSING_TOKEN_MESSAGE: &str = "Missing bearer token";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Bearer")],
                    Json(ApiResponseBody::new_error(StatusCode::UNAUTHORIZED, msg)),
                )
                    .into_response();
            }
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::PrincipalNotFound(_) | AuthError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
            AuthError::MissingToken => ApiError::Unauthorized(MISSING_TOKEN_MESSAGE.to_string()),
            AuthError::InvalidToken => ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string()),
            AuthError::IdentifierAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidIdentifier(_) | AuthError::InvalidName(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::Password(_) | AuthError::TokenIssuance(_) | AuthError::DatabaseError(_) => {
                tracing::error!(error = %err, "Request failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Public view of a principal. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrincipalData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Principal> for PrincipalData {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id.to_string(),
            name: principal.name.as_str().to_string(),
            email: principal.email.as_str().to_string(),
            created_at: principal.created_at,
        }
    }
}

impl From<&AuthenticatedPrincipal> for PrincipalData {
    fn from(principal: &AuthenticatedPrincipal) -> Self {
        Self {
            id: principal.id.to_string(),
            name: principal.name.clone(),
            email: principal.email.as_str().to_string(),
            created_at: principal.created_at,
        }
    }
}
