//! Booking: create an appointment against an approved doctor.

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Deserialize;
use uuid::Uuid;

use crate::authorization::Actor;
use crate::db::repository;
use crate::domain::DomainError;
use crate::models::Appointment;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub doctor_id: String,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub reason: Option<String>,
}

/// Book an appointment for `actor` as the patient.
///
/// An unapproved doctor's profile is indistinguishable from a missing
/// one — both are NotFound. Overlapping or double bookings against the
/// same slot are accepted; the store takes the writes as they come.
pub fn book(
    conn: &Connection,
    actor: &Actor,
    req: &BookingRequest,
) -> Result<Appointment, DomainError> {
    let doctor_id = Uuid::parse_str(&req.doctor_id)
        .map_err(|_| DomainError::InvalidInput("Invalid doctor ID format".into()))?;

    if req.start_time.is_empty() {
        return Err(DomainError::InvalidInput("start_time is required".into()));
    }
    if req.end_time.is_empty() {
        return Err(DomainError::InvalidInput("end_time is required".into()));
    }

    let profile =
        repository::get_doctor(conn, &doctor_id)?.ok_or(DomainError::NotFound("Doctor"))?;
    let owner = repository::get_user(conn, &profile.user_id)?;
    match owner {
        Some(owner) if owner.is_approved => {}
        _ => return Err(DomainError::NotFound("Doctor")),
    }

    let appt = Appointment::new(
        actor.id,
        doctor_id,
        req.date,
        req.start_time.clone(),
        req.end_time.clone(),
        req.reason.clone().unwrap_or_default(),
    );
    repository::insert_appointment(conn, &appt)?;

    tracing::info!(
        appointment = %appt.id,
        doctor = %doctor_id,
        "Appointment booked"
    );
    Ok(appt)
}
