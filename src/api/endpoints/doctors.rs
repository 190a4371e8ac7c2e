//! Doctor endpoints.
//!
//! Public marketplace routes (listing, lookup, specialties) and the
//! doctor's own profile management.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{ApiContext, AuthContext};
use crate::db::repository;
use crate::models::enums::Role;
use crate::models::{AvailabilitySlot, DoctorProfile, PublicDoctor};
use crate::visibility;

#[derive(Deserialize)]
pub struct ListQuery {
    pub specialty: Option<String>,
}

/// `GET /api/doctors` — public listing of approved doctors.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<PublicDoctor>>, ApiError> {
    let conn = ctx.open_db()?;
    let doctors = visibility::list_public(&conn, query.specialty.as_deref())?;
    Ok(Json(doctors))
}

/// `GET /api/doctors/specialties`
pub async fn specialties(State(ctx): State<ApiContext>) -> Result<Json<Vec<String>>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(visibility::list_specialties(&conn)?))
}

/// `GET /api/doctors/:id` — public lookup, approved owners only.
pub async fn get_by_id(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<PublicDoctor>, ApiError> {
    let conn = ctx.open_db()?;
    Ok(Json(visibility::get_public_by_id(&conn, &id)?))
}

#[derive(Deserialize)]
pub struct CreateProfileRequest {
    pub specialty: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub experience: Option<u32>,
    #[serde(default)]
    pub consultation_fee: Option<f64>,
    #[serde(default)]
    pub availability: Option<Vec<AvailabilitySlot>>,
}

fn require_doctor(auth: &AuthContext) -> Result<(), ApiError> {
    if auth.actor.role == Role::Doctor {
        Ok(())
    } else {
        Err(ApiError::Unauthorized)
    }
}

/// `POST /api/doctors` — a doctor creates their own profile, once.
pub async fn create_profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProfileRequest>,
) -> Result<Json<DoctorProfile>, ApiError> {
    require_doctor(&auth)?;
    let conn = ctx.open_db()?;

    if repository::get_doctor_by_user(&conn, &auth.actor.id)?.is_some() {
        return Err(ApiError::BadRequest("Doctor profile already exists".into()));
    }

    let profile = DoctorProfile::new(
        auth.actor.id,
        req.specialty,
        req.bio.unwrap_or_default(),
        req.experience.unwrap_or(0),
        req.consultation_fee.unwrap_or(0.0),
        req.availability.unwrap_or_default(),
    );
    repository::insert_doctor(&conn, &profile)?;
    Ok(Json(profile))
}

/// `GET /api/doctors/profile` — the doctor's own profile.
pub async fn own_profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<DoctorProfile>, ApiError> {
    require_doctor(&auth)?;
    let conn = ctx.open_db()?;
    let profile = repository::get_doctor_by_user(&conn, &auth.actor.id)?
        .ok_or(ApiError::NotFound("Doctor profile not found".into()))?;
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub specialty: Option<String>,
    pub bio: Option<String>,
    pub experience: Option<u32>,
    pub consultation_fee: Option<f64>,
    pub availability: Option<Vec<AvailabilitySlot>>,
}

/// `PUT /api/doctors/profile` — partial update of the doctor's own
/// profile; availability is replaced wholesale when provided.
pub async fn update_profile(
    State(ctx): State<ApiContext>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<DoctorProfile>, ApiError> {
    require_doctor(&auth)?;
    let conn = ctx.open_db()?;
    let mut profile = repository::get_doctor_by_user(&conn, &auth.actor.id)?
        .ok_or(ApiError::NotFound("Doctor profile not found".into()))?;

    if let Some(specialty) = req.specialty {
        profile.specialty = specialty;
    }
    if let Some(bio) = req.bio {
        profile.bio = bio;
    }
    if let Some(experience) = req.experience {
        profile.experience = experience;
    }
    if let Some(fee) = req.consultation_fee {
        profile.consultation_fee = fee;
    }
    if let Some(availability) = req.availability {
        profile.availability = availability;
    }
    repository::update_doctor(&conn, &profile)?;
    Ok(Json(profile))
}
