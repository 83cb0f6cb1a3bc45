//! Argon2id password hashing and verification.

use anyhow::Context as _;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use tracing::error;
use uuid::Uuid;

/// Well-formed hash that matches no password. Verified against when the email
/// is unknown so both failure paths spend the same argon2 work.
const DUMMY_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$bG9yaS1kdW1teS1zYWx0IQ$BwgJCgsMDQ4PEBESExQVFhcYGRobHB0eHyAhIiMkJSY";

/// Hash `password` with argon2id defaults (19 MiB, t=2, p=1).
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("hash password: {e}"))?;
    Ok(hash.to_string())
}

/// Verify `password` against a stored PHC string. Parameters come from the hash.
pub fn verify_password(password: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("parse password hash")?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Check a user's stored hash. An unreadable hash is logged and treated as a
/// mismatch, so the caller still sees an ordinary invalid credential.
pub fn verify_stored(user_id: Uuid, password: &str, hash: &str) -> bool {
    match verify_password(password, hash) {
        Ok(matches) => matches,
        Err(e) => {
            error!(%user_id, error = format!("{e:#}"), "stored password hash is unreadable");
            false
        }
    }
}

/// Burn one verification against [`DUMMY_HASH`]. Always fails.
pub fn verify_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}
