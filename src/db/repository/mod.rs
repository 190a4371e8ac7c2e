//! Repository layer — entity-scoped database operations.
//!
//! UUIDs and timestamps are stored as TEXT; the helpers below keep the
//! row-mapping closures short.

mod appointment;
mod doctor;
mod user;

use chrono::NaiveDateTime;
use uuid::Uuid;

// Re-export all public items from sub-modules
pub use appointment::*;
pub use doctor::*;
pub use user::*;

pub(crate) fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap_or_default()
}

pub(crate) fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f")
        .unwrap_or(chrono::DateTime::UNIX_EPOCH.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rusqlite::Connection;

    use crate::db::sqlite::open_memory_database;
    use crate::db::DatabaseError;
    use crate::models::enums::*;
    use crate::models::*;

    fn test_db() -> Connection {
        open_memory_database().unwrap()
    }

    fn make_user(conn: &Connection, name: &str, role: Role) -> User {
        let user = User::new(
            name.into(),
            format!("{}@example.com", name.to_lowercase()),
            "hash".into(),
            role,
        );
        insert_user(conn, &user).unwrap();
        user
    }

    fn make_doctor(conn: &Connection, owner: &User, specialty: &str) -> DoctorProfile {
        let profile = DoctorProfile::new(
            owner.id,
            specialty.into(),
            "bio".into(),
            5,
            80.0,
            vec![AvailabilitySlot {
                day: DayOfWeek::Monday,
                start_time: "09:00".into(),
                end_time: "12:00".into(),
            }],
        );
        insert_doctor(conn, &profile).unwrap();
        profile
    }

    fn make_appointment(conn: &Connection, patient: &Uuid, doctor: &Uuid) -> Appointment {
        let appt = Appointment::new(
            *patient,
            *doctor,
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "09:00".into(),
            "09:30".into(),
            "checkup".into(),
        );
        insert_appointment(conn, &appt).unwrap();
        appt
    }

    #[test]
    fn datetime_round_trips_through_text() {
        let now = chrono::Utc::now().naive_utc();
        assert_eq!(parse_datetime(&now.to_string()), now);
    }

    #[test]
    fn garbage_uuid_falls_back_to_nil() {
        assert_eq!(parse_uuid("not-a-uuid"), Uuid::nil());
    }

    #[test]
    fn user_insert_and_retrieve() {
        let conn = test_db();
        let user = make_user(&conn, "Alice", Role::Patient);
        let found = get_user(&conn, &user.id).unwrap().unwrap();
        assert_eq!(found.name, "Alice");
        assert_eq!(found.role, Role::Patient);
        assert!(found.is_approved);
        assert_eq!(found.created_at, user.created_at);
    }

    #[test]
    fn user_lookup_by_email() {
        let conn = test_db();
        make_user(&conn, "Alice", Role::Patient);
        assert!(get_user_by_email(&conn, "alice@example.com").unwrap().is_some());
        assert!(get_user_by_email(&conn, "nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_constraint_violation() {
        let conn = test_db();
        make_user(&conn, "Alice", Role::Patient);
        let dup = User::new(
            "Alice Two".into(),
            "alice@example.com".into(),
            "hash".into(),
            Role::Patient,
        );
        match insert_user(&conn, &dup) {
            Err(DatabaseError::ConstraintViolation(_)) => {}
            other => panic!("Expected ConstraintViolation, got: {other:?}"),
        }
    }

    #[test]
    fn token_hash_lookup_and_clear() {
        let conn = test_db();
        let user = make_user(&conn, "Alice", Role::Patient);
        set_token_hash(&conn, &user.id, Some("abc123")).unwrap();
        let found = get_user_by_token_hash(&conn, "abc123").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        set_token_hash(&conn, &user.id, None).unwrap();
        assert!(get_user_by_token_hash(&conn, "abc123").unwrap().is_none());
    }

    #[test]
    fn doctor_insert_loads_availability() {
        let conn = test_db();
        let owner = make_user(&conn, "Bob", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        let found = get_doctor(&conn, &profile.id).unwrap().unwrap();
        assert_eq!(found.specialty, "cardiology");
        assert_eq!(found.availability.len(), 1);
        assert_eq!(found.availability[0].day, DayOfWeek::Monday);

        let by_user = get_doctor_by_user(&conn, &owner.id).unwrap().unwrap();
        assert_eq!(by_user.id, profile.id);
    }

    #[test]
    fn doctor_update_replaces_availability_wholesale() {
        let conn = test_db();
        let owner = make_user(&conn, "Bob", Role::Doctor);
        let mut profile = make_doctor(&conn, &owner, "cardiology");
        profile.availability = vec![
            AvailabilitySlot {
                day: DayOfWeek::Tuesday,
                start_time: "14:00".into(),
                end_time: "18:00".into(),
            },
            AvailabilitySlot {
                day: DayOfWeek::Friday,
                start_time: "09:00".into(),
                end_time: "11:00".into(),
            },
        ];
        profile.consultation_fee = 120.0;
        update_doctor(&conn, &profile).unwrap();

        let found = get_doctor(&conn, &profile.id).unwrap().unwrap();
        assert_eq!(found.consultation_fee, 120.0);
        assert_eq!(found.availability.len(), 2);
        assert_eq!(found.availability[0].day, DayOfWeek::Tuesday);
    }

    #[test]
    fn second_profile_for_same_user_rejected() {
        let conn = test_db();
        let owner = make_user(&conn, "Bob", Role::Doctor);
        make_doctor(&conn, &owner, "cardiology");
        let second = DoctorProfile::new(owner.id, "dermatology".into(), "".into(), 0, 0.0, vec![]);
        assert!(insert_doctor(&conn, &second).is_err());
    }

    #[test]
    fn approved_listing_hides_unapproved_owners() {
        let conn = test_db();
        let approved = make_user(&conn, "Ann", Role::Doctor);
        set_approval(&conn, &approved.id, true).unwrap();
        make_doctor(&conn, &approved, "cardiology");

        let unapproved = make_user(&conn, "Bob", Role::Doctor);
        make_doctor(&conn, &unapproved, "cardiology");

        let listed = list_approved_doctors(&conn, None).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].doctor_name, "Ann");
    }

    #[test]
    fn approved_listing_orders_by_rating_desc() {
        let conn = test_db();
        for (name, rating) in [("Low", 2.5), ("High", 4.9), ("Mid", 3.7)] {
            let owner = make_user(&conn, name, Role::Doctor);
            set_approval(&conn, &owner.id, true).unwrap();
            let mut profile = make_doctor(&conn, &owner, "cardiology");
            profile.rating = rating;
            update_doctor(&conn, &profile).unwrap();
        }
        let listed = list_approved_doctors(&conn, None).unwrap();
        let names: Vec<_> = listed.iter().map(|d| d.doctor_name.as_str()).collect();
        assert_eq!(names, ["High", "Mid", "Low"]);
    }

    #[test]
    fn specialty_filter_is_exact() {
        let conn = test_db();
        let a = make_user(&conn, "Ann", Role::Doctor);
        set_approval(&conn, &a.id, true).unwrap();
        make_doctor(&conn, &a, "cardiology");
        let b = make_user(&conn, "Bob", Role::Doctor);
        set_approval(&conn, &b.id, true).unwrap();
        make_doctor(&conn, &b, "dermatology");

        let listed = list_approved_doctors(&conn, Some("cardiology")).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].specialty, "cardiology");
        assert!(list_approved_doctors(&conn, Some("cardio")).unwrap().is_empty());
    }

    #[test]
    fn distinct_specialties_deduplicates() {
        let conn = test_db();
        for (name, specialty) in [("A", "cardiology"), ("B", "cardiology"), ("C", "dermatology")] {
            let owner = make_user(&conn, name, Role::Doctor);
            make_doctor(&conn, &owner, specialty);
        }
        assert_eq!(distinct_specialties(&conn).unwrap(), ["cardiology", "dermatology"]);
    }

    #[test]
    fn appointment_insert_and_view_join() {
        let conn = test_db();
        let patient = make_user(&conn, "Pat", Role::Patient);
        let owner = make_user(&conn, "Doc", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        let appt = make_appointment(&conn, &patient.id, &profile.id);

        let view = get_appointment_view(&conn, &appt.id).unwrap().unwrap();
        assert_eq!(view.patient_name.as_deref(), Some("Pat"));
        assert_eq!(view.doctor_name.as_deref(), Some("Doc"));
        assert_eq!(view.doctor_specialty.as_deref(), Some("cardiology"));
        assert_eq!(view.appointment.status, AppointmentStatus::Pending);
    }

    #[test]
    fn patient_cascade_removes_appointments() {
        let conn = test_db();
        let patient = make_user(&conn, "Pat", Role::Patient);
        let owner = make_user(&conn, "Doc", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        for _ in 0..3 {
            make_appointment(&conn, &patient.id, &profile.id);
        }

        delete_user_cascade(&conn, &patient).unwrap();
        assert!(get_user(&conn, &patient.id).unwrap().is_none());
        assert_eq!(count_appointments(&conn).unwrap(), 0);
    }

    #[test]
    fn doctor_cascade_keeps_appointments() {
        let conn = test_db();
        let patient = make_user(&conn, "Pat", Role::Patient);
        let owner = make_user(&conn, "Doc", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        let appt = make_appointment(&conn, &patient.id, &profile.id);

        delete_user_cascade(&conn, &owner).unwrap();
        assert!(get_user(&conn, &owner.id).unwrap().is_none());
        assert!(get_doctor(&conn, &profile.id).unwrap().is_none());
        // The appointment record stays, its doctor side now dangling.
        let view = get_appointment_view(&conn, &appt.id).unwrap().unwrap();
        assert!(view.doctor_name.is_none());
        assert_eq!(view.patient_name.as_deref(), Some("Pat"));
    }

    #[test]
    fn patient_listing_sorted_by_date_desc() {
        let conn = test_db();
        let patient = make_user(&conn, "Pat", Role::Patient);
        let owner = make_user(&conn, "Doc", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        for day in [5u32, 20, 12] {
            let appt = Appointment::new(
                patient.id,
                profile.id,
                NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                "09:00".into(),
                "09:30".into(),
                String::new(),
            );
            insert_appointment(&conn, &appt).unwrap();
        }
        let listed = list_appointments_by_patient(&conn, &patient.id).unwrap();
        let days: Vec<_> = listed
            .iter()
            .map(|v| v.appointment.date.to_string())
            .collect();
        assert_eq!(days, ["2024-01-20", "2024-01-12", "2024-01-05"]);
    }

    #[test]
    fn status_counts_track_updates() {
        let conn = test_db();
        let patient = make_user(&conn, "Pat", Role::Patient);
        let owner = make_user(&conn, "Doc", Role::Doctor);
        let profile = make_doctor(&conn, &owner, "cardiology");
        let appt = make_appointment(&conn, &patient.id, &profile.id);
        make_appointment(&conn, &patient.id, &profile.id);

        update_status(&conn, &appt.id, AppointmentStatus::Completed).unwrap();
        assert_eq!(
            count_appointments_by_status(&conn, AppointmentStatus::Completed).unwrap(),
            1
        );
        assert_eq!(
            count_appointments_by_status(&conn, AppointmentStatus::Pending).unwrap(),
            1
        );
        assert_eq!(count_appointments(&conn).unwrap(), 2);
    }

    #[test]
    fn role_counts_for_dashboard() {
        let conn = test_db();
        make_user(&conn, "Pat", Role::Patient);
        make_user(&conn, "DocA", Role::Doctor);
        make_user(&conn, "DocB", Role::Doctor);
        assert_eq!(count_users_by_role(&conn, Role::Patient).unwrap(), 1);
        assert_eq!(count_users_by_role(&conn, Role::Doctor).unwrap(), 2);
        assert_eq!(count_pending_doctor_approvals(&conn).unwrap(), 2);
    }
}
