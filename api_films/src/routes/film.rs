use actix_multipart::Multipart;
use actix_web::{Responder, get, post, web};
use common::env_config::Config;
use common::error::{AppError, Res};
use common::http::Success;
use common::jwt::JwtClaims;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::dtos::film::{CreatedFilmResponse, FilmResponse};
use crate::services;

/// Lists the full catalog with public fields only.
///
/// # Output
/// - Success: 200 OK with an array of film summaries
#[get("/films")]
pub async fn get_films(pool: web::Data<Arc<PgPool>>) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let films = db::film::list_films(pg_pool).await?;
    let summaries: Vec<FilmResponse> = films.into_iter().map(FilmResponse::from).collect();
    Success::ok(summaries)
}

/// Retrieves a single film summary.
///
/// # Output
/// - Success: 200 OK with the film summary
/// - Error: 404 Not Found if the film does not exist
#[get("/films/{film_id}")]
pub async fn get_film(
    path: web::Path<Uuid>,
    pool: web::Data<Arc<PgPool>>,
    _claims: web::ReqData<JwtClaims>,
) -> Res<impl Responder> {
    let pg_pool: &PgPool = &**pool;
    let film = db::film::get_film(pg_pool, path.into_inner())
        .await?
        .ok_or_else(|| AppError::NotFound("Film not found".to_string()))?;
    Success::ok(FilmResponse::from(film))
}

/// Uploads a new film as the authenticated filmmaker.
///
/// # Input
/// Multipart form: `title`, `price` (major units), optional `description`
/// and `film_type`, `file` (media payload), optional `thumbnail`.
///
/// # Output
/// - Success: 201 Created with the new film id
/// - Error: 403 Forbidden when the credential is not a filmmaker's,
///   400 Bad Request on missing title/price/file or an invalid price
#[post("/upload")]
pub async fn post_upload(
    claims: web::ReqData<JwtClaims>,
    mut payload: Multipart,
    pool: web::Data<Arc<PgPool>>,
    config: web::Data<Arc<Config>>,
) -> Res<impl Responder> {
    // reject before touching the payload so nothing is persisted for
    // non-filmmakers
    if !claims.is_filmmaker {
        return Err(AppError::Forbidden(
            "Only filmmakers can upload films".to_string(),
        ));
    }

    let form = services::upload::collect_upload(&mut payload).await?;

    let pg_pool: &PgPool = &**pool;
    let film = services::film::create_film(pg_pool, &config.upload_dir, &claims, form).await?;

    log::info!("film {} uploaded by {}", film.id, claims.user_id);
    Success::created(CreatedFilmResponse { id: film.id })
}
