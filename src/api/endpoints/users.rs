//! Account endpoints: register, login, own profile.

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::auth::{self, LoginRequest, RegisterRequest};
use crate::db::repository;
use crate::models::UserView;

#[derive(Serialize)]
pub struct SessionResponse {
    pub user: UserView,
    pub token: String,
}

/// `POST /api/users/register`
pub async fn register(
    State(ctx): State<ApiContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let (user, token) = auth::register(&conn, &req)?;
    Ok(Json(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// `POST /api/users/login`
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let conn = ctx.open_db()?;
    let (user, token) = auth::login(&conn, &req)?;
    Ok(Json(SessionResponse {
        user: user.into(),
        token,
    }))
}

/// `GET /api/users/profile` — the authenticated account.
pub async fn profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<UserView>, ApiError> {
    let conn = ctx.open_db()?;
    let user = repository::get_user(&conn, &auth.actor.id)?
        .ok_or(ApiError::NotFound("User not found".into()))?;
    Ok(Json(user.into()))
}
