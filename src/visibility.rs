//! Public marketplace visibility for doctor profiles.
//!
//! Only profiles whose owning account carries the approval flag are
//! listable; to public callers an unapproved profile does not exist.

use rusqlite::Connection;
use uuid::Uuid;

use crate::db::repository;
use crate::domain::DomainError;
use crate::models::PublicDoctor;

/// List approved doctors, optionally narrowed to an exact specialty,
/// best rated first.
pub fn list_public(
    conn: &Connection,
    specialty: Option<&str>,
) -> Result<Vec<PublicDoctor>, DomainError> {
    Ok(repository::list_approved_doctors(conn, specialty)?)
}

/// Look up one doctor for public display.
///
/// The owner is resolved explicitly: a dangling or unapproved owner
/// makes the profile NotFound, same as a nonexistent id.
pub fn get_public_by_id(conn: &Connection, id: &Uuid) -> Result<PublicDoctor, DomainError> {
    let profile = repository::get_doctor(conn, id)?.ok_or(DomainError::NotFound("Doctor"))?;
    let owner = match repository::get_user(conn, &profile.user_id)? {
        Some(owner) if owner.is_approved => owner,
        _ => return Err(DomainError::NotFound("Doctor")),
    };
    Ok(PublicDoctor {
        id: profile.id,
        specialty: profile.specialty,
        bio: profile.bio,
        experience: profile.experience,
        consultation_fee: profile.consultation_fee,
        availability: profile.availability,
        rating: profile.rating,
        review_count: profile.review_count,
        doctor_name: owner.name,
        doctor_email: owner.email,
    })
}

/// All specialties present in the directory (public endpoint).
pub fn list_specialties(conn: &Connection) -> Result<Vec<String>, DomainError> {
    Ok(repository::distinct_specialties(conn)?)
}
