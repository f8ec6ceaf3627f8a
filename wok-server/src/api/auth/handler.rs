//! Auth API Handlers

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

/// POST /api/auth/login - staff login against the configured account.
///
/// With no password hash configured, login is disabled entirely rather
/// than falling back to an open console.
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let Some(hash) = state.config.staff_password_hash.as_deref() else {
        tracing::warn!("Login attempted but STAFF_PASSWORD_HASH is not set");
        return Err(AppError::invalid_credentials());
    };

    if payload.username != state.config.staff_username {
        return Err(AppError::invalid_credentials());
    }

    let parsed = PasswordHash::new(hash).map_err(|e| {
        tracing::error!(error = %e, "Configured staff password hash is malformed");
        AppError::internal("Staff account misconfigured")
    })?;
    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed)
        .map_err(|_| AppError::invalid_credentials())?;

    let token = state
        .jwt
        .generate_token(&payload.username)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %payload.username, "Staff login");
    Ok(Json(LoginResponse { token }))
}
