use common::error::{AppError, Res};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    dtos::user::UserCreateRequest,
    models::user::{AuthCredentials, User},
};

pub async fn exists_user_by_email<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<bool> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
        .map_err(AppError::from)
}

pub async fn get_user_by_id<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    user_id: Uuid,
) -> Res<Option<User>> {
    sqlx::query_as::<_, User>(
        "SELECT id, email, display_name, is_filmmaker, created_at FROM users WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &UserCreateRequest,
) -> Res<User> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, email, display_name, is_filmmaker)
        VALUES ($1, $2, $3, $4)
        RETURNING id, email, display_name, is_filmmaker, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&data.email)
    .bind(&data.display_name)
    .bind(data.is_filmmaker)
    .fetch_one(executor)
    .await
    .map_err(AppError::from)
}

pub async fn insert_user_credentials<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    data: &AuthCredentials,
) -> Res<()> {
    sqlx::query(
        r#"
        INSERT INTO auth_credentials (user_id, password_hash)
        VALUES ($1, $2)
        "#,
    )
    .bind(data.user_id)
    .bind(&data.password_hash)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn get_user_with_password_hash<'e, E: Executor<'e, Database = Postgres>>(
    executor: E,
    email: &str,
) -> Res<Option<(User, AuthCredentials)>> {
    #[derive(sqlx::FromRow)]
    struct Row {
        id: Uuid,
        email: String,
        display_name: String,
        is_filmmaker: bool,
        created_at: chrono::NaiveDateTime,
        password_hash: String,
    }

    let row = sqlx::query_as::<_, Row>(
        r#"
        SELECT u.id, u.email, u.display_name, u.is_filmmaker, u.created_at, ac.password_hash
        FROM users u
        JOIN auth_credentials ac ON u.id = ac.user_id
        WHERE u.email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(executor)
    .await
    .map_err(AppError::from)?;

    Ok(row.map(|record| {
        (
            User {
                id: record.id,
                email: record.email,
                display_name: record.display_name,
                is_filmmaker: record.is_filmmaker,
                created_at: record.created_at,
            },
            AuthCredentials {
                user_id: record.id,
                password_hash: record.password_hash,
            },
        )
    }))
}
