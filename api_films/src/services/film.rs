use common::error::{AppError, Res};
use common::jwt::JwtClaims;
use db::{dtos::film::FilmCreateRequest, models::film::Film};
use sqlx::PgPool;

use crate::services::upload::{self, UploadForm};

/// Validates the collected form and persists media, thumbnail and catalog
/// row. Only filmmakers get this far (the route checks the claims before the
/// payload is read); here the form itself is the thing being validated.
pub async fn create_film(
    pool: &PgPool,
    upload_dir: &str,
    claims: &JwtClaims,
    form: UploadForm,
) -> Res<Film> {
    let title = form
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("A title is required".to_string()))?;
    let price = form
        .price
        .ok_or_else(|| AppError::BadRequest("A price is required".to_string()))?;
    let price_cents = upload::parse_price_to_cents(&price)?;
    let (media_name, media_bytes) = form
        .media
        .filter(|(_, bytes)| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;

    let file_name = upload::store_file(upload_dir, &media_name, &media_bytes).await?;

    let thumbnail_name = match &form.thumbnail {
        Some((original_name, bytes)) if !bytes.is_empty() => {
            Some(upload::store_file(upload_dir, original_name, bytes).await?)
        }
        _ => None,
    };

    db::film::insert_film(
        pool,
        &FilmCreateRequest {
            title,
            description: form.description.unwrap_or_default(),
            price_cents,
            film_type: form.film_type.unwrap_or_default(),
            file_name,
            thumbnail_name,
            creator_id: claims.user_id,
        },
    )
    .await
}
