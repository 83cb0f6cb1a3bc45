//! Ambient building blocks shared by every Lori service: time source,
//! tracing setup, health handlers and HTTP middleware.

pub mod clock;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
