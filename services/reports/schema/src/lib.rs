//! sea-orm entities read or written by the reports service.
//!
//! `scheduled_reports` is owned here; `users` is the auth service's table and
//! is only read for the recipient address.

pub mod scheduled_reports;
pub mod users;
pub mod vehicle_locations;
pub mod vehicle_maintenance;
pub mod vehicles;
