//! Admin endpoints. Every handler gates on the admin role first.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::admin::{self, DashboardStats, UserUpdate};
use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::models::{AppointmentView, DoctorWithOwner, UserView};

/// `GET /api/admin/users`
pub async fn list_users(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<UserView>>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::list_users(&conn)?))
}

/// `GET /api/admin/users/:id`
pub async fn get_user(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserView>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::get_user(&conn, &id)?))
}

/// `PUT /api/admin/users/:id` — partial update of any account.
pub async fn update_user(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserView>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::update_user(&conn, &id, &update)?))
}

/// `DELETE /api/admin/users/:id` — removal plus role-dependent cleanup.
pub async fn delete_user(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    admin::delete_user(&conn, &id)?;
    Ok(Json(json!({ "message": "User deleted" })))
}

/// `GET /api/admin/doctors` — every profile, approved or not.
pub async fn list_doctors(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<DoctorWithOwner>>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::list_doctors(&conn)?))
}

/// `PUT /api/admin/doctors/:id/approve`
pub async fn approve_doctor(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    admin::approve_doctor(&conn, &id)?;
    Ok(Json(json!({ "message": "Doctor approved" })))
}

/// `GET /api/admin/appointments`
pub async fn list_appointments(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::list_appointments(&conn)?))
}

/// `GET /api/admin/dashboard`
pub async fn dashboard(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<DashboardStats>, ApiError> {
    auth.require_admin()?;
    let conn = ctx.open_db()?;
    Ok(Json(admin::dashboard_stats(&conn)?))
}
