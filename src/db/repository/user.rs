use std::str::FromStr;

use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::enums::Role;
use crate::models::User;

use super::{parse_datetime, parse_uuid};

const USER_COLUMNS: &str =
    "id, name, email, password_hash, phone, role, is_approved, created_at";

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: parse_uuid(&row.get::<_, String>(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        phone: row.get(4)?,
        role: Role::from_str(&row.get::<_, String>(5)?).unwrap_or(Role::Patient),
        is_approved: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

pub fn insert_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO users (id, name, email, password_hash, phone, role, is_approved, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user.id.to_string(),
            user.name,
            user.email,
            user.password_hash,
            user.phone,
            user.role.as_str(),
            user.is_approved,
            user.created_at.to_string(),
        ],
    )
    .map_err(|e| match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            DatabaseError::ConstraintViolation(format!("duplicate email {}", user.email))
        }
        other => other.into(),
    })?;
    Ok(())
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id.to_string()],
        user_from_row,
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_email(conn: &Connection, email: &str) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        user_from_row,
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Resolve the account holding this session token hash, if any.
pub fn get_user_by_token_hash(
    conn: &Connection,
    token_hash: &str,
) -> Result<Option<User>, DatabaseError> {
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE token_hash = ?1"),
        params![token_hash],
        user_from_row,
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users"))?;
    let rows = stmt.query_map([], user_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_recent_users(conn: &Connection, limit: u32) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC LIMIT ?1"
    ))?;
    let rows = stmt.query_map(params![limit], user_from_row)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Persist mutable account fields (name, email, phone, role, approval).
pub fn update_user(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE users SET name = ?2, email = ?3, phone = ?4, role = ?5, is_approved = ?6
         WHERE id = ?1",
        params![
            user.id.to_string(),
            user.name,
            user.email,
            user.phone,
            user.role.as_str(),
            user.is_approved,
        ],
    )?;
    Ok(())
}

/// Set or clear the stored session token hash (login / logout).
pub fn set_token_hash(
    conn: &Connection,
    id: &Uuid,
    token_hash: Option<&str>,
) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE users SET token_hash = ?2 WHERE id = ?1",
        params![id.to_string(), token_hash],
    )?;
    Ok(())
}

pub fn set_approval(conn: &Connection, id: &Uuid, approved: bool) -> Result<(), DatabaseError> {
    conn.execute(
        "UPDATE users SET is_approved = ?2 WHERE id = ?1",
        params![id.to_string(), approved],
    )?;
    Ok(())
}

/// Delete an account and its dependents.
///
/// The cascade is asymmetric: a patient takes their appointments with
/// them, a doctor takes only their practice profile — the doctor's
/// appointment history stays behind.
pub fn delete_user_cascade(conn: &Connection, user: &User) -> Result<(), DatabaseError> {
    match user.role {
        Role::Patient => {
            conn.execute(
                "DELETE FROM appointments WHERE patient_id = ?1",
                params![user.id.to_string()],
            )?;
        }
        Role::Doctor => {
            // Availability slots go with the profile via FK cascade.
            conn.execute(
                "DELETE FROM doctors WHERE user_id = ?1",
                params![user.id.to_string()],
            )?;
        }
        Role::Admin => {}
    }
    conn.execute(
        "DELETE FROM users WHERE id = ?1",
        params![user.id.to_string()],
    )?;
    Ok(())
}

pub fn count_users_by_role(conn: &Connection, role: Role) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = ?1",
        params![role.as_str()],
        |row| row.get(0),
    )?;
    Ok(count)
}

pub fn count_pending_doctor_approvals(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM users WHERE role = 'doctor' AND is_approved = 0",
        [],
        |row| row.get(0),
    )?;
    Ok(count)
}
