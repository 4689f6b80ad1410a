use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use common::error::{AppError, Res};
use db::models::user::User;
use sqlx::PgPool;

use crate::dtos::auth::LoginRequest;

/// Verification target for unknown emails so the failure path always costs
/// one argon2 verification. Any well-formed hash works; it never matches.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$wpLdSuPXBSVFsqzBvGpBcg$xanTNUxtH121BV1c+rWDO+p7NnBqL5v1oVL74nGbCQ8";

pub fn hash_password(password: &str) -> Res<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(password_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Authenticates an existing user.
///
/// Unknown email and wrong password are indistinguishable to the caller:
/// both return the same message, and the unknown-email path still runs a
/// hash verification against `DUMMY_HASH` so the timing matches.
pub async fn authenticate_user(pool: &PgPool, login_data: &LoginRequest) -> Res<User> {
    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    match db::user::get_user_with_password_hash(pool, &login_data.email).await? {
        Some((user, credentials)) => {
            if verify_password(&login_data.password, &credentials.password_hash) {
                Ok(user)
            } else {
                Err(invalid())
            }
        }
        None => {
            verify_password(&login_data.password, DUMMY_HASH);
            Err(invalid())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("pw123456").unwrap();
        assert!(verify_password("pw123456", &hash));
        assert!(!verify_password("pw123457", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password("pw123456").unwrap();
        let second = hash_password("pw123456").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn dummy_hash_never_verifies() {
        assert!(!verify_password("pw123456", DUMMY_HASH));
        assert!(!verify_password("", DUMMY_HASH));
    }

    #[test]
    fn malformed_stored_hash_fails_closed() {
        assert!(!verify_password("pw123456", "not-a-phc-string"));
    }
}
