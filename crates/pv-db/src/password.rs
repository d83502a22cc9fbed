//! Password digests.
//!
//! Argon2id with a random per-password salt, encoded as a PHC string. Hashing
//! and verification are CPU-heavy, so both run on the blocking pool.

use std::sync::LazyLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

use crate::error::DatabaseError;

/// Digest checked when the email is unknown, so the failure path costs the
/// same as a wrong password.
static DUMMY_DIGEST: LazyLock<String> = LazyLock::new(|| {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(b"pravartak-dummy-password", &salt)
        .map(|hash| hash.to_string())
        .unwrap_or_default()
});

/// Hash `password` into a self-describing PHC string.
///
/// # Errors
///
/// Returns `DatabaseError::PasswordHash` if hashing fails.
pub(crate) async fn hash_password(password: String) -> Result<String, DatabaseError> {
    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| DatabaseError::PasswordHash(e.to_string()))
    })
    .await
    .map_err(|e| DatabaseError::Other(e.into()))?
}

/// Check `password` against `digest`, or against a dummy digest when there is
/// no stored account.
///
/// A stored digest that does not parse is treated as a mismatch.
pub(crate) async fn verify_password(
    password: String,
    digest: Option<String>,
) -> Result<bool, DatabaseError> {
    tokio::task::spawn_blocking(move || {
        let digest = digest.as_deref().unwrap_or(DUMMY_DIGEST.as_str());
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::warn!(%error, "stored password digest is malformed");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    })
    .await
    .map_err(|e| DatabaseError::Other(e.into()))
}
