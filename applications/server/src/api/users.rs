/// Users API routes
use crate::{
    api::response::{Envelope, MessageEnvelope},
    error::{Result, ServerError, INVALID_PAYLOAD, USER_NOT_FOUND},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use roster_core::{CreateUser, User, UserId};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UsersData {
    pub users: Vec<User>,
}

/// GET /users/ping
pub async fn ping() -> Json<MessageEnvelope> {
    Json(MessageEnvelope::success("pong!"))
}

/// POST /users
/// Add a user; accounts created here never get admin rights
pub async fn add_user(
    State(app_state): State<AppState>,
    payload: std::result::Result<Json<CreateUser>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageEnvelope>)> {
    let Json(mut req) = payload.map_err(|rejection| {
        tracing::debug!("Rejected user payload: {}", rejection);
        ServerError::BadRequest(INVALID_PAYLOAD.to_string())
    })?;

    if req.validate().is_err() {
        return Err(ServerError::BadRequest(INVALID_PAYLOAD.to_string()));
    }

    if req.admin {
        tracing::warn!(username = %req.username, "Ignoring admin flag on public sign-up");
        req.admin = false;
    }

    if app_state.store.find_by_email(&req.email).await?.is_some() {
        return Err(ServerError::BadRequest(
            "Sorry. That email already exists.".to_string(),
        ));
    }

    if app_state.store.find_by_username(&req.username).await?.is_some() {
        return Err(ServerError::BadRequest(
            "Sorry. That username already exists.".to_string(),
        ));
    }

    let password_hash = match req.password.as_deref() {
        Some(password) if !password.is_empty() => {
            Some(app_state.auth_service.hash_password(password)?)
        }
        _ => None,
    };

    let user = app_state.store.create_user(req, password_hash).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User added");

    Ok((
        StatusCode::CREATED,
        Json(MessageEnvelope::success(format!("{} was added!", user.email))),
    ))
}

/// GET /users/:id
pub async fn get_user(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<Envelope<User>>> {
    let user_id: UserId = id
        .parse()
        .map_err(|_| ServerError::NotFound(USER_NOT_FOUND.to_string()))?;

    let user = app_state
        .store
        .get_user(user_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(USER_NOT_FOUND.to_string()))?;

    Ok(Json(Envelope::data(user)))
}

/// GET /users
pub async fn list_users(State(app_state): State<AppState>) -> Result<Json<Envelope<UsersData>>> {
    let users = app_state.store.get_all_users().await?;
    Ok(Json(Envelope::data(UsersData { users })))
}
