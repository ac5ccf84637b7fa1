use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::principal::errors::AuthError;
use crate::domain::principal::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::INVALID_TOKEN_MESSAGE;
use crate::inbound::http::router::AppState;

/// Middleware that authenticates the bearer token and stores the resolved
/// `AuthenticatedPrincipal` in the request extensions.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?.to_string();

    let principal = state
        .auth_service
        .authenticate(&token)
        .await
        .map_err(|e| match e {
            // The token was genuine but its principal is gone: still just a bad token.
            AuthError::PrincipalNotFound(_) => {
                ApiError::Unauthorized(INVALID_TOKEN_MESSAGE.to_string())
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Extract the credential of an `Authorization: Bearer <token>` header.
///
/// A missing header, another scheme, or an empty credential all count as no
/// token presented.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingToken)?
        .to_str()
        .map_err(|_| AuthError::MissingToken)?;

    let (scheme, credential) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let credential = credential.trim();
    if credential.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(credential)
}
