use std::str::FromStr;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::{AppointmentStatus, PaymentStatus};
use crate::models::{Appointment, AppointmentView};

use super::{parse_datetime, parse_uuid};

const APPOINTMENT_COLUMNS: &str =
    "id, patient_id, doctor_id, date, start_time, end_time, reason, status, payment_status, created_at";

fn appointment_from_row(row: &Row<'_>) -> rusqlite::Result<Appointment> {
    Ok(Appointment {
        id: parse_uuid(&row.get::<_, String>(0)?),
        patient_id: parse_uuid(&row.get::<_, String>(1)?),
        doctor_id: parse_uuid(&row.get::<_, String>(2)?),
        date: NaiveDate::parse_from_str(&row.get::<_, String>(3)?, "%Y-%m-%d")
            .unwrap_or(chrono::DateTime::UNIX_EPOCH.date_naive()),
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        reason: row.get(6)?,
        status: AppointmentStatus::from_str(&row.get::<_, String>(7)?)
            .unwrap_or(AppointmentStatus::Pending),
        payment_status: PaymentStatus::from_str(&row.get::<_, String>(8)?)
            .unwrap_or(PaymentStatus::Pending),
        created_at: parse_datetime(&row.get::<_, String>(9)?),
    })
}

fn view_from_row(row: &Row<'_>) -> rusqlite::Result<AppointmentView> {
    Ok(AppointmentView {
        appointment: appointment_from_row(row)?,
        patient_name: row.get(10)?,
        doctor_name: row.get(11)?,
        doctor_specialty: row.get(12)?,
    })
}

/// Columns for the joined view: the doctor side goes through two LEFT
/// JOINs (profile, then its owner) so appointments survive a deleted
/// doctor account.
const VIEW_QUERY: &str = "SELECT a.id, a.patient_id, a.doctor_id, a.date, a.start_time,
            a.end_time, a.reason, a.status, a.payment_status, a.created_at,
            pu.name, du.name, d.specialty
     FROM appointments a
     LEFT JOIN users pu ON pu.id = a.patient_id
     LEFT JOIN doctors d ON d.id = a.doctor_id
     LEFT JOIN users du ON du.id = d.user_id";

pub fn insert_appointment(conn: &Connection, appt: &Appointment) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO appointments (id, patient_id, doctor_id, date, start_time, end_time,
                                   reason, status, payment_status, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            appt.id.to_string(),
            appt.patient_id.to_string(),
            appt.doctor_id.to_string(),
            appt.date.to_string(),
            appt.start_time,
            appt.end_time,
            appt.reason,
            appt.status.as_str(),
            appt.payment_status.as_str(),
            appt.created_at.to_string(),
        ],
    )?;
    Ok(())
}

pub fn get_appointment(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<Appointment>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?1"),
        params![id.to_string()],
        appointment_from_row,
    );
    match result {
        Ok(appt) => Ok(Some(appt)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_appointment_view(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<AppointmentView>, DatabaseError> {
    let result = conn.query_row(
        &format!("{VIEW_QUERY} WHERE a.id = ?1"),
        params![id.to_string()],
        view_from_row,
    );
    match result {
        Ok(view) => Ok(Some(view)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_status(
    conn: &Connection,
    id: &Uuid,
    status: AppointmentStatus,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE appointments SET status = ?2 WHERE id = ?1",
        params![id.to_string(), status.as_str()],
    )?;
    Ok(())
}

pub fn list_appointments_by_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{VIEW_QUERY} WHERE a.patient_id = ?1 ORDER BY a.date DESC"
    ))?;
    let rows = stmt.query_map(params![patient_id.to_string()], view_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_appointments_by_doctor(
    conn: &Connection,
    doctor_id: &Uuid,
) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{VIEW_QUERY} WHERE a.doctor_id = ?1 ORDER BY a.date DESC"
    ))?;
    let rows = stmt.query_map(params![doctor_id.to_string()], view_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_all_appointments(conn: &Connection) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(VIEW_QUERY)?;
    let rows = stmt.query_map([], view_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_recent_appointments(
    conn: &Connection,
    limit: u32,
) -> Result<Vec<AppointmentView>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "{VIEW_QUERY} ORDER BY a.created_at DESC LIMIT ?1"
    ))?;
    let rows = stmt.query_map(params![limit], view_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn count_appointments(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row("SELECT COUNT(*) FROM appointments", [], |row| row.get(0))?;
    Ok(count)
}

pub fn count_appointments_by_status(
    conn: &Connection,
    status: AppointmentStatus,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM appointments WHERE status = ?1",
        params![status.as_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}
