use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::DayOfWeek;

/// A weekly consultation window. Overlaps between slots are not
/// validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: DayOfWeek,
    pub start_time: String,
    pub end_time: String,
}

/// A doctor's practice profile, one-to-one with a doctor-role user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub specialty: String,
    pub bio: String,
    pub experience: u32,
    pub consultation_fee: f64,
    pub availability: Vec<AvailabilitySlot>,
    pub rating: f64,
    pub review_count: u32,
    pub created_at: NaiveDateTime,
}

impl DoctorProfile {
    pub fn new(
        user_id: Uuid,
        specialty: String,
        bio: String,
        experience: u32,
        consultation_fee: f64,
        availability: Vec<AvailabilitySlot>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            specialty,
            bio,
            experience,
            consultation_fee,
            availability,
            rating: 0.0,
            review_count: 0,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// A profile joined with its owning account, for admin review. The
/// owner is resolved explicitly so a dangling reference shows up as
/// `None` instead of being papered over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorWithOwner {
    #[serde(flatten)]
    pub profile: DoctorProfile,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
    pub owner_approved: bool,
}

/// A profile as shown to the public marketplace: profile attributes
/// plus the owning doctor's display info. Only constructed for
/// approved owners.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicDoctor {
    pub id: Uuid,
    pub specialty: String,
    pub bio: String,
    pub experience: u32,
    pub consultation_fee: f64,
    pub availability: Vec<AvailabilitySlot>,
    pub rating: f64,
    pub review_count: u32,
    pub doctor_name: String,
    pub doctor_email: String,
}
