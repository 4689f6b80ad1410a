use actix_web::{HttpRequest, HttpResponse, get, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::jwt::JwtClaims;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::services;

/// Streams a purchased film.
///
/// # Output
/// - Success: 200 (or 206 for range requests) with the media body
/// - Error: 404 Not Found for an unknown film, 403 Forbidden without a
///   purchase record for the authenticated buyer
#[get("/films/{film_id}/watch")]
pub async fn get_watch(
    path: web::Path<Uuid>,
    claims: web::ReqData<JwtClaims>,
    req: HttpRequest,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<HttpResponse> {
    authorize_playback(path.into_inner(), &claims, &req, &pool, &config).await
}

/// Legacy watch path kept for older clients.
#[get("/watch/{film_id}")]
pub async fn get_watch_alias(
    path: web::Path<Uuid>,
    claims: web::ReqData<JwtClaims>,
    req: HttpRequest,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<HttpResponse> {
    authorize_playback(path.into_inner(), &claims, &req, &pool, &config).await
}

async fn authorize_playback(
    film_id: Uuid,
    claims: &JwtClaims,
    req: &HttpRequest,
    pool: &web::Data<Arc<PgPool>>,
    config: &web::Data<Arc<Config>>,
) -> Res<HttpResponse> {
    let pg_pool: &PgPool = &***pool;

    let film = db::film::get_film(pg_pool, film_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;

    if !db::purchase::exists_purchase(pg_pool, claims.user_id, film.id).await? {
        return Err(AppError::Forbidden(
            "Film has not been purchased".to_string(),
        ));
    }

    let range_header = req
        .headers()
        .get(actix_web::http::header::RANGE)
        .and_then(|value| value.to_str().ok());

    services::stream::serve_media(&config.upload_dir, &film, range_header).await
}
