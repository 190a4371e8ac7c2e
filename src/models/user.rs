use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Role;

/// A registered account: patient, doctor or admin.
///
/// `password_hash` and `token_hash` never leave the server; API
/// responses use [`UserView`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: String,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
}

impl User {
    /// Construct a new account. Patients are approved immediately;
    /// doctors stay unapproved until an admin approves them.
    pub fn new(name: String, email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            phone: String::new(),
            role,
            is_approved: role == Role::Patient,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Public projection of a user (no credential material).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub is_approved: bool,
    pub created_at: NaiveDateTime,
}

impl From<User> for UserView {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            phone: u.phone,
            role: u.role,
            is_approved: u.is_approved,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(role: Role) -> User {
        User::new("A".into(), "a@example.com".into(), "hash".into(), role)
    }

    #[test]
    fn patients_are_approved_at_creation() {
        assert!(make(Role::Patient).is_approved);
    }

    #[test]
    fn doctors_are_unapproved_at_creation() {
        assert!(!make(Role::Doctor).is_approved);
    }

    #[test]
    fn admins_are_unapproved_at_creation() {
        // Approval gates marketplace visibility, which never applies to
        // admins, but the construction rule is uniform: only patients
        // auto-approve.
        assert!(!make(Role::Admin).is_approved);
    }

    #[test]
    fn view_drops_password_hash() {
        let user = make(Role::Patient);
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        let view: UserView = user.into();
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "patient");
    }
}
