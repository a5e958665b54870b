/// Authentication API routes
use crate::{
    api::response::Envelope,
    error::{Result, ServerError, INVALID_PAYLOAD},
    middleware::AuthenticatedUser,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use roster_core::User;
use serde::{Deserialize, Serialize};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
}

/// POST /auth/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<Envelope<LoginResponse>>> {
    let Json(req) = payload.map_err(|_| ServerError::BadRequest(INVALID_PAYLOAD.to_string()))?;

    let user = app_state
        .store
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !user.active {
        tracing::warn!(user_id = user.id, "Login attempt for inactive user");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    // Users created without a password cannot log in
    let password_hash = app_state
        .store
        .get_password_hash(user.id)
        .await?
        .ok_or_else(|| ServerError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        tracing::warn!(user_id = user.id, "Login rejected: wrong password");
        return Err(ServerError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let access_token = app_state.auth_service.create_access_token(user.id)?;
    let refresh_token = app_state.auth_service.create_refresh_token(user.id)?;

    tracing::info!(user_id = user.id, "User logged in");

    Ok(Json(
        Envelope::data(LoginResponse {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
        })
        .with_message("Successfully logged in."),
    ))
}

/// POST /auth/refresh
pub async fn refresh(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<RefreshRequest>, JsonRejection>,
) -> Result<Json<Envelope<RefreshResponse>>> {
    let Json(req) = payload.map_err(|_| ServerError::BadRequest(INVALID_PAYLOAD.to_string()))?;

    let user_id = app_state
        .auth_service
        .verify_refresh_token(&req.refresh_token)?;

    let access_token = app_state.auth_service.create_access_token(user_id)?;

    Ok(Json(Envelope::data(RefreshResponse {
        access_token,
        token_type: "Bearer".to_string(),
    })))
}

/// GET /auth/status
/// The user owning the bearer token
pub async fn status(
    State(app_state): State<AppState>,
    auth: AuthenticatedUser,
) -> Result<Json<Envelope<User>>> {
    let user = app_state
        .store
        .get_user(auth.user_id())
        .await?
        .ok_or_else(|| ServerError::Auth("User does not exist.".to_string()))?;

    Ok(Json(Envelope::data(user)))
}
