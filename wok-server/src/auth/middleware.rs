//! Staff auth middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid staff bearer token.
///
/// Extracts and verifies the JWT from `Authorization: Bearer <token>`,
/// then injects [`CurrentUser`] into the request extensions. Applied as a
/// layer on the admin router only; customer routes are public.
pub async fn require_staff(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight passes through
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let token = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let claims = state.jwt.verify_token(token).map_err(|e| match e {
        JwtError::Expired => AppError::TokenExpired,
        _ => AppError::InvalidToken,
    })?;

    req.extensions_mut().insert(CurrentUser {
        username: claims.sub,
    });

    Ok(next.run(req).await)
}
