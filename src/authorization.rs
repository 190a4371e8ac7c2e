//! Who may see or touch an appointment.
//!
//! Every single-appointment read and mutation goes through the same
//! three-way relationship test; bulk reads are scoped per role.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository;
use crate::domain::DomainError;
use crate::models::enums::Role;
use crate::models::{Appointment, AppointmentView};

/// The authenticated caller, as resolved by the auth middleware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

impl Actor {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }
}

/// The three-way party test: admin, the appointment's patient, or the
/// doctor owning the booked profile.
///
/// `doctor_owner` is the resolved owner of the appointment's doctor
/// profile — `None` when the profile or its account no longer exists.
/// A doctor who booked as a patient passes on the patient side.
pub fn is_party(actor: &Actor, appt: &Appointment, doctor_owner: Option<Uuid>) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Patient => appt.patient_id == actor.id,
        Role::Doctor => appt.patient_id == actor.id || doctor_owner == Some(actor.id),
    }
}

/// Load an appointment and enforce the party test.
///
/// Missing appointment is NotFound; an authenticated non-party gets
/// Unauthorized, which does reveal existence — kept as shipped.
pub fn require_party(
    conn: &Connection,
    actor: &Actor,
    appointment_id: &Uuid,
) -> Result<Appointment, DomainError> {
    let appt = repository::get_appointment(conn, appointment_id)?
        .ok_or(DomainError::NotFound("Appointment"))?;
    let doctor_owner = repository::get_doctor(conn, &appt.doctor_id)?.map(|p| p.user_id);
    if !is_party(actor, &appt, doctor_owner) {
        return Err(DomainError::Unauthorized);
    }
    Ok(appt)
}

/// Role-scoped bulk read.
///
/// A doctor without a profile gets NotFound rather than an empty list;
/// admins see everything unfiltered.
pub fn list_for_actor(
    conn: &Connection,
    actor: &Actor,
) -> Result<Vec<AppointmentView>, DomainError> {
    match actor.role {
        Role::Patient => Ok(repository::list_appointments_by_patient(conn, &actor.id)?),
        Role::Doctor => {
            let profile = repository::get_doctor_by_user(conn, &actor.id)?
                .ok_or(DomainError::NotFound("Doctor profile"))?;
            Ok(repository::list_appointments_by_doctor(conn, &profile.id)?)
        }
        Role::Admin => Ok(repository::list_all_appointments(conn)?),
    }
}
