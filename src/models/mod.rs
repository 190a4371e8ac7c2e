pub mod appointment;
pub mod doctor;
pub mod enums;
pub mod user;

pub use appointment::{Appointment, AppointmentView};
pub use doctor::{AvailabilitySlot, DoctorProfile, DoctorWithOwner, PublicDoctor};
pub use enums::{AppointmentStatus, DayOfWeek, PaymentStatus, Role};
pub use user::{User, UserView};
