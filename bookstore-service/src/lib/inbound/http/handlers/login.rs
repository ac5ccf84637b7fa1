use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::principal::models::Credential;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    let issued = state
        .auth_service
        .login(Credential::new(body.identifier, body.secret))
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: issued.token,
            token_type: "bearer".to_string(),
            expires_at: issued.expires_at,
        },
    ))
}

/// Login body. Accepts `email`/`password` as aliases.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    #[serde(alias = "email")]
    identifier: String,
    #[serde(alias = "password")]
    secret: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}
