use actix_web::{Responder, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::{self, ClaimsSpec};
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::services;

/// Registers a new user with email and password authentication.
///
/// # Input
/// - `req`: JSON payload with email, password, display_name and an optional
///   is_filmmaker flag
///
/// # Output
/// - Success: 201 Created with a signed credential and the user summary
/// - Error: 400 Bad Request on malformed email or empty password,
///   409 Conflict when the email is already registered
#[post("/register")]
pub async fn post_register(
    req: web::Json<RegisterRequest>,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let req = req.into_inner();

    services::user::validate_registration(&req)?;

    if db::user::exists_user_by_email(pg_pool, &req.email).await? {
        return Err(AppError::Conflict(
            "A user with this email already exists".to_string(),
        ));
    }

    let user = services::user::create_user_with_credentials(pg_pool, &req).await?;
    let token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            is_filmmaker: user.is_filmmaker,
        },
        &config.jwt_config,
    )?;

    Success::created(AuthResponse {
        token,
        user: user.into(),
    })
}

/// Authenticates a user with email and password.
///
/// # Input
/// - `login_data`: JSON payload containing email and password
///
/// # Output
/// - Success: 200 OK with a signed credential and the user summary
/// - Error: 401 Unauthorized for invalid credentials; the message does not
///   say whether the email or the password was wrong
#[post("/login")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    config: web::Data<Arc<Config>>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = services::auth::authenticate_user(pg_pool, &login_data.into_inner()).await?;
    let token = jwt::generate_jwt(
        ClaimsSpec {
            user_id: user.id,
            is_filmmaker: user.is_filmmaker,
        },
        &config.jwt_config,
    )?;
    Success::ok(AuthResponse {
        token,
        user: user.into(),
    })
}
