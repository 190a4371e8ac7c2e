//! Appointment endpoints.
//!
//! All routes require authentication; party checks and role gating
//! happen in the domain layer.

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::authorization;
use crate::booking::{self, BookingRequest};
use crate::db::repository;
use crate::models::{Appointment, AppointmentView};
use crate::transitions;

/// `POST /api/appointments` — book as the authenticated patient.
pub async fn create(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.open_db()?;
    let appt = booking::book(&conn, &auth.actor, &req)?;
    Ok(Json(appt))
}

/// `GET /api/appointments` — the actor's own scope: a patient sees
/// their bookings, a doctor their schedule, an admin everything.
pub async fn list(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<AppointmentView>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(authorization::list_for_actor(&conn, &auth.actor)?))
}

/// `GET /api/appointments/:id`
pub async fn get_by_id(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentView>, ApiError> {
    let conn = ctx.open_db()?;
    authorization::require_party(&conn, &auth.actor, &id)?;
    let view = repository::get_appointment_view(&conn, &id)?
        .ok_or(ApiError::NotFound("Appointment not found".into()))?;
    Ok(Json(view))
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

/// `PUT /api/appointments/:id` — request a status change.
pub async fn update_status(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<StatusRequest>,
) -> Result<Json<Appointment>, ApiError> {
    let conn = ctx.open_db()?;
    let appt = transitions::transition(&conn, &auth.actor, &id, &req.status)?;
    Ok(Json(appt))
}

/// `DELETE /api/appointments/:id` — cancel, allowed for every party.
pub async fn cancel(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conn = ctx.open_db()?;
    transitions::cancel(&conn, &auth.actor, &id)?;
    Ok(Json(json!({ "message": "Appointment cancelled" })))
}
