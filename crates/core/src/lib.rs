//! # Mentorbook Core
//!
//! Domain types and scheduling rules for mentor session booking.
//!
//! - [`slots`]: slot enumeration over recurring weekly availability
//! - [`booking`]: booking acceptance and status transition rules
//! - [`ports`]: persistence and notification interfaces
//! - [`service`]: use cases wiring the rules to the ports

pub mod booking;
pub mod errors;
pub mod models;
pub mod notifications;
pub mod ports;
pub mod service;
pub mod slots;
