//! Caller lookup and prospect-user handling.
//!
//! Anonymous bookings silently create a "prospect" user keyed by email, with
//! a random unusable password. A later booking with the same email refreshes
//! the prospect's contact details; a registered (non-prospect) user is never
//! modified from booking data.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use rand::distributions::Alphanumeric;
use rand::Rng;
use slotwise_core::errors::{SlotwiseError, SlotwiseResult};
use slotwise_core::models::user::ProfileHints;
use slotwise_db::models::DbUser;
use slotwise_db::repositories::user as user_repo;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Hashes a password with Argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> SlotwiseResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| SlotwiseError::Database(eyre::eyre!("Error hashing password: {}", e)))?
        .to_string();

    Ok(password_hash)
}

fn random_unusable_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(24)
        .map(char::from)
        .collect()
}

/// Resolves an authenticated caller to its user record. A booking cannot
/// exist without an owner, so a missing record is an error here.
pub async fn resolve_authenticated(
    pool: &Pool<Postgres>,
    caller_id: Uuid,
) -> SlotwiseResult<DbUser> {
    user_repo::find_user_by_id(pool, caller_id)
        .await?
        .ok_or_else(|| SlotwiseError::UserNotFound(caller_id.to_string()))
}

/// Finds a user by email or creates a prospect from booking-time contact
/// details. Existing prospects get their profile refreshed from the hints;
/// existing registered users are returned unchanged.
pub async fn resolve_or_create_by_email(
    pool: &Pool<Postgres>,
    email: &str,
    hints: &ProfileHints,
) -> SlotwiseResult<DbUser> {
    if let Some(existing) = user_repo::find_user_by_email(pool, email).await? {
        if existing.prospect {
            tracing::debug!("Refreshing prospect profile for {}", email);
            return user_repo::update_prospect_profile(pool, existing.id, hints).await;
        }
        return Ok(existing);
    }

    let password_hash = hash_password(&random_unusable_password())?;
    user_repo::create_prospect_user(pool, email, hints, &password_hash).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_passwords_are_distinct() {
        let a = random_unusable_password();
        let b = random_unusable_password();

        assert_eq!(a.len(), 24);
        assert_ne!(a, b);
    }

    #[test]
    fn hash_password_produces_phc_string() {
        let hash = hash_password("secret").unwrap();
        assert!(hash.starts_with("$argon2"));
    }
}
