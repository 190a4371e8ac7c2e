//! Medibook: an appointment-booking backend for small clinics.
//!
//! Patients browse approved doctors and book visits; doctors manage
//! their practice profile and drive the appointment lifecycle; admins
//! approve doctors and oversee the whole system.

pub mod admin;
pub mod api;
pub mod auth;
pub mod authorization;
pub mod booking;
pub mod config;
pub mod db;
pub mod domain;
pub mod models;
pub mod transitions;
pub mod visibility;
