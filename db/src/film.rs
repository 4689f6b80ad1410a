use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::film::FilmCreateRequest, models::film::Film};

const FILM_COLUMNS: &str = "id, title, description, price_cents, film_type, \
                            file_name, thumbnail_name, creator_id, created_at";

pub async fn list_films<'e, E: Executor<'e, Database = Postgres>>(executor: E) -> Res<Vec<Film>> {
    sqlx::query_as::<_, Film>(&format!(
        "SELECT {FILM_COLUMNS} FROM films ORDER BY created_at DESC"
    ))
    .fetch_all(executor)
    .await
    .map_err(AppError::from)
}

pub async fn get_film<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    film_id: Uuid,
) -> Res<Option<Film>> {
    sqlx::query_as::<_, Film>(&format!("SELECT {FILM_COLUMNS} FROM films WHERE id = $1"))
        .bind(film_id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::from)
}

pub async fn insert_film<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &FilmCreateRequest,
) -> Res<Film> {
    sqlx::query_as::<_, Film>(&format!(
        r#"
        INSERT INTO films (id, title, description, price_cents, film_type,
                           file_name, thumbnail_name, creator_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {FILM_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&data.title)
    .bind(&data.description)
    .bind(data.price_cents)
    .bind(&data.film_type)
    .bind(&data.file_name)
    .bind(&data.thumbnail_name)
    .bind(data.creator_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}
