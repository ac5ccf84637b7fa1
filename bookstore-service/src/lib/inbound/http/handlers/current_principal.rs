use axum::http::StatusCode;
use axum::Extension;

use super::ApiSuccess;
use super::PrincipalData;
use crate::domain::principal::models::AuthenticatedPrincipal;

/// Return the principal the bearer token resolved to.
pub async fn current_principal(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<PrincipalData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}
