use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::PrincipalData;
use crate::domain::principal::errors::AuthError;
use crate::domain::principal::models::DisplayName;
use crate::domain::principal::models::EmailAddress;
use crate::domain::principal::models::RegisterPrincipalCommand;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<PrincipalData>, ApiError> {
    let command = body.try_into_domain()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    name: String,
    email: String,
    password: String,
}

impl RegisterRequestBody {
    fn try_into_domain(self) -> Result<RegisterPrincipalCommand, AuthError> {
        let name = DisplayName::new(self.name)?;
        let email = EmailAddress::new(&self.email)?;

        Ok(RegisterPrincipalCommand::new(name, email, self.password))
    }
}
