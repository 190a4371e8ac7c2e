use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::DayOfWeek;
use crate::models::{AvailabilitySlot, DoctorProfile, DoctorWithOwner, PublicDoctor};

use super::{parse_datetime, parse_uuid};

const DOCTOR_COLUMNS: &str =
    "id, user_id, specialty, bio, experience, consultation_fee, rating, review_count, created_at";

fn doctor_from_row(row: &Row<'_>) -> rusqlite::Result<DoctorProfile> {
    Ok(DoctorProfile {
        id: parse_uuid(&row.get::<_, String>(0)?),
        user_id: parse_uuid(&row.get::<_, String>(1)?),
        specialty: row.get(2)?,
        bio: row.get(3)?,
        experience: row.get(4)?,
        consultation_fee: row.get(5)?,
        availability: Vec::new(),
        rating: row.get(6)?,
        review_count: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

pub fn insert_doctor(conn: &Connection, profile: &DoctorProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO doctors (id, user_id, specialty, bio, experience, consultation_fee,
                              rating, review_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            profile.id.to_string(),
            profile.user_id.to_string(),
            profile.specialty,
            profile.bio,
            profile.experience,
            profile.consultation_fee,
            profile.rating,
            profile.review_count,
            profile.created_at.to_string(),
        ],
    )?;
    replace_availability(conn, &profile.id, &profile.availability)?;
    Ok(())
}

pub fn get_doctor(conn: &Connection, id: &Uuid) -> Result<Option<DoctorProfile>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE id = ?1"),
        params![id.to_string()],
        doctor_from_row,
    );
    match result {
        Ok(mut profile) => {
            profile.availability = get_availability(conn, &profile.id)?;
            Ok(Some(profile))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_doctor_by_user(
    conn: &Connection,
    user_id: &Uuid,
) -> Result<Option<DoctorProfile>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {DOCTOR_COLUMNS} FROM doctors WHERE user_id = ?1"),
        params![user_id.to_string()],
        doctor_from_row,
    );
    match result {
        Ok(mut profile) => {
            profile.availability = get_availability(conn, &profile.id)?;
            Ok(Some(profile))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Persist profile fields and replace the availability slots wholesale.
pub fn update_doctor(conn: &Connection, profile: &DoctorProfile) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE doctors SET specialty = ?2, bio = ?3, experience = ?4, consultation_fee = ?5,
                            rating = ?6, review_count = ?7
         WHERE id = ?1",
        params![
            profile.id.to_string(),
            profile.specialty,
            profile.bio,
            profile.experience,
            profile.consultation_fee,
            profile.rating,
            profile.review_count,
        ],
    )?;
    replace_availability(conn, &profile.id, &profile.availability)?;
    Ok(())
}

pub fn get_availability(
    conn: &Connection,
    doctor_id: &Uuid,
) -> Result<Vec<AvailabilitySlot>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT day, start_time, end_time FROM availability_slots
         WHERE doctor_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map(params![doctor_id.to_string()], |row| {
        Ok(AvailabilitySlot {
            day: DayOfWeek::from_str(&row.get::<_, String>(0)?).unwrap_or(DayOfWeek::Monday),
            start_time: row.get(1)?,
            end_time: row.get(2)?,
        })
    })?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn replace_availability(
    conn: &Connection,
    doctor_id: &Uuid,
    slots: &[AvailabilitySlot],
) -> Result<(), DatabaseError> {
    conn.execute(
        "DELETE FROM availability_slots WHERE doctor_id = ?1",
        params![doctor_id.to_string()],
    )?;
    for slot in slots {
        conn.execute(
            "INSERT INTO availability_slots (doctor_id, day, start_time, end_time)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                doctor_id.to_string(),
                slot.day.as_str(),
                slot.start_time,
                slot.end_time,
            ],
        )?;
    }
    Ok(())
}

/// All profiles with their owning account joined, for the admin view.
pub fn list_doctors_with_owner(conn: &Connection) -> Result<Vec<DoctorWithOwner>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT d.{}, u.name, u.email, COALESCE(u.is_approved, 0)
         FROM doctors d LEFT JOIN users u ON u.id = d.user_id",
        DOCTOR_COLUMNS.replace(", ", ", d."),
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(DoctorWithOwner {
            profile: doctor_from_row(row)?,
            owner_name: row.get(9)?,
            owner_email: row.get(10)?,
            owner_approved: row.get(11)?,
        })
    })?;
    let mut doctors: Vec<DoctorWithOwner> =
        rows.map(|r| r.map_err(DatabaseError::from)).collect::<Result<_, _>>()?;
    for d in &mut doctors {
        d.profile.availability = get_availability(conn, &d.profile.id)?;
    }
    Ok(doctors)
}

/// Marketplace listing: only profiles whose owner is approved, best
/// rated first. The inner join makes a missing or deleted owner
/// equivalent to an unapproved one.
pub fn list_approved_doctors(
    conn: &Connection,
    specialty: Option<&str>,
) -> Result<Vec<PublicDoctor>, DatabaseError> {
    let base = "SELECT d.id, d.specialty, d.bio, d.experience, d.consultation_fee,
                       d.rating, d.review_count, u.name, u.email
                FROM doctors d JOIN users u ON u.id = d.user_id
                WHERE u.is_approved = 1";
    let mut doctors: Vec<PublicDoctor> = match specialty {
        Some(specialty) => {
            let mut stmt =
                conn.prepare(&format!("{base} AND d.specialty = ?1 ORDER BY d.rating DESC"))?;
            let rows = stmt.query_map(params![specialty], public_doctor_from_row)?;
            rows.map(|r| r.map_err(DatabaseError::from)).collect::<Result<_, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!("{base} ORDER BY d.rating DESC"))?;
            let rows = stmt.query_map([], public_doctor_from_row)?;
            rows.map(|r| r.map_err(DatabaseError::from)).collect::<Result<_, _>>()?
        }
    };
    for d in &mut doctors {
        d.availability = get_availability(conn, &d.id)?;
    }
    Ok(doctors)
}

fn public_doctor_from_row(row: &Row<'_>) -> rusqlite::Result<PublicDoctor> {
    Ok(PublicDoctor {
        id: parse_uuid(&row.get::<_, String>(0)?),
        specialty: row.get(1)?,
        bio: row.get(2)?,
        experience: row.get(3)?,
        consultation_fee: row.get(4)?,
        availability: Vec::new(),
        rating: row.get(5)?,
        review_count: row.get(6)?,
        doctor_name: row.get(7)?,
        doctor_email: row.get(8)?,
    })
}

pub fn distinct_specialties(conn: &Connection) -> Result<Vec<String>, DatabaseError> {
    let mut stmt =
        conn.prepare("SELECT DISTINCT specialty FROM doctors ORDER BY specialty")?;
    let rows = stmt.query_map([], |row| row.get(0))?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}
