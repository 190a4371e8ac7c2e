pub mod admin;
pub mod appointments;
pub mod doctors;
pub mod users;
