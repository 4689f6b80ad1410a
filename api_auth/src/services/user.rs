use common::error::{AppError, Res};
use db::{
    dtos::user::UserCreateRequest,
    models::user::{AuthCredentials, User},
};
use sqlx::PgPool;

use crate::dtos::auth::RegisterRequest;
use crate::services::auth;

/// Registration input checks. Email needs an `@` followed by a dotted
/// domain; the password must not be empty.
pub fn validate_registration(req: &RegisterRequest) -> Res<()> {
    let valid_email = match req.email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid_email {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("A password is required".to_string()));
    }
    Ok(())
}

/// Inserts the user row and its password hash in one transaction. A
/// concurrent registration with the same email loses on the unique index
/// and surfaces as a conflict, not a storage error.
pub async fn create_user_with_credentials(pool: &PgPool, req: &RegisterRequest) -> Res<User> {
    let password_hash = auth::hash_password(&req.password)?;

    let mut tx = pool.begin().await.map_err(AppError::from)?;

    let user = db::user::insert_user(
        &mut *tx,
        &UserCreateRequest {
            email: req.email.clone(),
            display_name: req.display_name.clone(),
            is_filmmaker: req.is_filmmaker,
        },
    )
    .await
    .map_err(|e| match e {
        AppError::Database(db_err) if db::is_unique_violation(&db_err) => {
            AppError::Conflict("A user with this email already exists".to_string())
        }
        other => other,
    })?;

    db::user::insert_user_credentials(
        &mut *tx,
        &AuthCredentials {
            user_id: user.id,
            password_hash,
        },
    )
    .await?;

    tx.commit().await.map_err(AppError::from)?;

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            display_name: "Test".to_string(),
            is_filmmaker: false,
        }
    }

    #[test]
    fn accepts_well_formed_input() {
        assert!(validate_registration(&request("f@x.com", "pw123456")).is_ok());
    }

    #[test]
    fn rejects_email_without_at() {
        assert!(validate_registration(&request("fx.com", "pw123456")).is_err());
    }

    #[test]
    fn rejects_email_without_domain_separator() {
        assert!(validate_registration(&request("f@xcom", "pw123456")).is_err());
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(validate_registration(&request("@x.com", "pw123456")).is_err());
    }

    #[test]
    fn rejects_empty_password() {
        assert!(validate_registration(&request("f@x.com", "")).is_err());
    }
}
