use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{AppointmentStatus, PaymentStatus};

/// A booked visit linking a patient user and a doctor profile.
///
/// Shared between both parties: either of them (plus admin) may drive
/// the status within their permitted subset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub reason: String,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
    pub created_at: NaiveDateTime,
}

impl Appointment {
    /// New appointments always start pending, with payment pending.
    pub fn new(
        patient_id: Uuid,
        doctor_id: Uuid,
        date: NaiveDate,
        start_time: String,
        end_time: String,
        reason: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id,
            date,
            start_time,
            end_time,
            reason,
            status: AppointmentStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// An appointment joined with display info for both parties.
///
/// The doctor side is optional: a doctor account can be deleted while
/// its appointment history stays behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentView {
    #[serde(flatten)]
    pub appointment: Appointment,
    pub patient_name: Option<String>,
    pub doctor_name: Option<String>,
    pub doctor_specialty: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_appointment_starts_pending() {
        let appt = Appointment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            "09:00".into(),
            "09:30".into(),
            "checkup".into(),
        );
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.payment_status, PaymentStatus::Pending);
    }
}
