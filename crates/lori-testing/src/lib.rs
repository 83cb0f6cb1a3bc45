//! Test utilities for Lori services.
//!
//! Provides a controllable clock, a recording notification gateway and
//! bearer-session helpers. Use from tests and dev-dependencies only.

pub mod auth;
pub mod clock;
pub mod notify;
