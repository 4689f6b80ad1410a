use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{dtos::purchase::PurchaseCreateRequest, models::purchase::Purchase};

pub async fn get_purchase<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    film_id: Uuid,
) -> Res<Option<Purchase>> {
    sqlx::query_as::<_, Purchase>(
        r#"
        SELECT id, user_id, film_id, payment_reference, created_at
        FROM purchases
        WHERE user_id = $1 AND film_id = $2
        "#,
    )
    .bind(user_id)
    .bind(film_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn exists_purchase<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
    film_id: Uuid,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM purchases WHERE user_id = $1 AND film_id = $2)",
    )
    .bind(user_id)
    .bind(film_id)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

/// Atomic insert-if-absent on the (user, film) unique index. Returns `None`
/// when another confirmation already recorded the entitlement; concurrent
/// callers serialize on the constraint, so at most one row ever exists.
pub async fn insert_purchase_if_absent<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &PurchaseCreateRequest,
) -> Res<Option<Purchase>> {
    sqlx::query_as::<_, Purchase>(
        r#"
        INSERT INTO purchases (id, user_id, film_id, payment_reference)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (user_id, film_id) DO NOTHING
        RETURNING id, user_id, film_id, payment_reference, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(data.user_id)
    .bind(data.film_id)
    .bind(&data.payment_reference)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}
