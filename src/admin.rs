//! Admin operations: account management, doctor approval, dashboard.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::repository;
use crate::domain::DomainError;
use crate::models::enums::{AppointmentStatus, Role};
use crate::models::{AppointmentView, DoctorWithOwner, User, UserView};

/// Partial account update; absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub is_approved: Option<bool>,
}

pub fn list_users(conn: &Connection) -> Result<Vec<UserView>, DomainError> {
    Ok(repository::list_users(conn)?
        .into_iter()
        .map(UserView::from)
        .collect())
}

pub fn get_user(conn: &Connection, id: &Uuid) -> Result<UserView, DomainError> {
    let user = repository::get_user(conn, id)?.ok_or(DomainError::NotFound("User"))?;
    Ok(user.into())
}

pub fn update_user(
    conn: &Connection,
    id: &Uuid,
    update: &UserUpdate,
) -> Result<UserView, DomainError> {
    let mut user: User = repository::get_user(conn, id)?.ok_or(DomainError::NotFound("User"))?;
    if let Some(name) = &update.name {
        user.name = name.clone();
    }
    if let Some(email) = &update.email {
        user.email = email.clone();
    }
    if let Some(phone) = &update.phone {
        user.phone = phone.clone();
    }
    if let Some(role) = update.role {
        user.role = role;
    }
    if let Some(approved) = update.is_approved {
        user.is_approved = approved;
    }
    repository::update_user(conn, &user)?;
    Ok(user.into())
}

/// Delete an account, cascading per role (patients take their
/// appointments, doctors take only their profile).
pub fn delete_user(conn: &Connection, id: &Uuid) -> Result<(), DomainError> {
    let user = repository::get_user(conn, id)?.ok_or(DomainError::NotFound("User"))?;
    repository::delete_user_cascade(conn, &user)?;
    tracing::info!(user = %id, role = user.role.as_str(), "User removed");
    Ok(())
}

pub fn list_doctors(conn: &Connection) -> Result<Vec<DoctorWithOwner>, DomainError> {
    Ok(repository::list_doctors_with_owner(conn)?)
}

/// Approve the account owning this doctor profile, making the profile
/// publicly visible.
pub fn approve_doctor(conn: &Connection, profile_id: &Uuid) -> Result<(), DomainError> {
    let profile =
        repository::get_doctor(conn, profile_id)?.ok_or(DomainError::NotFound("Doctor"))?;
    let owner =
        repository::get_user(conn, &profile.user_id)?.ok_or(DomainError::NotFound("User"))?;
    repository::set_approval(conn, &owner.id, true)?;
    tracing::info!(doctor = %profile_id, user = %owner.id, "Doctor approved");
    Ok(())
}

pub fn list_appointments(conn: &Connection) -> Result<Vec<AppointmentView>, DomainError> {
    Ok(repository::list_all_appointments(conn)?)
}

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_users: i64,
    pub total_doctors: i64,
    pub pending_approvals: i64,
    pub total_appointments: i64,
    pub pending_appointments: i64,
    pub completed_appointments: i64,
    pub cancelled_appointments: i64,
    pub recent_appointments: Vec<AppointmentView>,
    pub recent_users: Vec<UserView>,
}

pub fn dashboard_stats(conn: &Connection) -> Result<DashboardStats, DomainError> {
    Ok(DashboardStats {
        total_users: repository::count_users_by_role(conn, Role::Patient)?,
        total_doctors: repository::count_users_by_role(conn, Role::Doctor)?,
        pending_approvals: repository::count_pending_doctor_approvals(conn)?,
        total_appointments: repository::count_appointments(conn)?,
        pending_appointments: repository::count_appointments_by_status(
            conn,
            AppointmentStatus::Pending,
        )?,
        completed_appointments: repository::count_appointments_by_status(
            conn,
            AppointmentStatus::Completed,
        )?,
        cancelled_appointments: repository::count_appointments_by_status(
            conn,
            AppointmentStatus::Cancelled,
        )?,
        recent_appointments: repository::list_recent_appointments(conn, 5)?,
        recent_users: repository::list_recent_users(conn, 5)?
            .into_iter()
            .map(UserView::from)
            .collect(),
    })
}
