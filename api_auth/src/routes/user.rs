use actix_web::{Responder, get, web};
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use std::sync::Arc;

use crate::dtos::auth::UserResponse;

/// Returns the user summary for the authenticated credential.
///
/// # Output
/// - Success: 200 OK with the user summary
/// - Error: 401 without a valid credential (middleware), 404 if the user row
///   no longer exists
#[get("/user")]
pub async fn get_current_user(
    claims: web::ReqData<JwtClaims>,
    pool: web::Data<Arc<PgPool>>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let user = db::user::get_user_by_id(pg_pool, claims.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Success::ok(UserResponse::from(user))
}
