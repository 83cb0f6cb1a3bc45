//! Auth types shared across Lori services.
//!
//! Provides session-token validation (and, for the auth service, issuance)
//! plus the `BearerSession` extractor for protected routes.

pub mod bearer;
pub mod token;
