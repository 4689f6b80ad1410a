use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgSslMode},
};
use std::{str::FromStr, sync::Arc, time::Duration};

pub mod film;
pub mod purchase;
pub mod user;

pub mod models {
    pub mod film;
    pub mod purchase;
    pub mod user;
}

pub mod dtos {
    pub mod film;
    pub mod purchase;
    pub mod user;
}

const MAX_CONNECT_ATTEMPTS: u32 = 5;
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Opens the connection pool and runs migrations, retrying the whole sequence
/// with exponential backoff. After `MAX_CONNECT_ATTEMPTS` failures the last
/// error is returned and the caller is expected to abort startup.
pub async fn setup(
    database_url: &str,
    require_ssl: bool,
) -> Result<Arc<PgPool>, Box<dyn std::error::Error>> {
    let mut delay = INITIAL_RETRY_DELAY;
    let mut last_err = None;

    for attempt in 1..=MAX_CONNECT_ATTEMPTS {
        match try_setup(database_url, require_ssl).await {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                log::warn!(
                    "database setup attempt {}/{} failed: {}",
                    attempt,
                    MAX_CONNECT_ATTEMPTS,
                    e
                );
                last_err = Some(e);
                if attempt < MAX_CONNECT_ATTEMPTS {
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    Err(last_err.expect("at least one attempt was made"))
}

async fn try_setup(
    database_url: &str,
    require_ssl: bool,
) -> Result<Arc<PgPool>, Box<dyn std::error::Error>> {
    let url = url::Url::parse(database_url)?;
    let db_name = url.path().trim_start_matches('/');
    let username = url.username();
    let password = url.password().unwrap_or("");
    let host = url.host_str().unwrap_or("localhost");
    let port = url.port().unwrap_or(5432);

    let admin_url = format!(
        "postgresql://{}:{}@{}:{}/postgres",
        username, password, host, port
    );

    let mut admin_options = PgConnectOptions::from_str(&admin_url)?;
    if require_ssl {
        admin_options = admin_options.ssl_mode(PgSslMode::Require);
    }

    let admin_pool = PgPool::connect_with(admin_options).await?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(db_name)
            .fetch_one(&admin_pool)
            .await?;

    if !exists {
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name))
            .execute(&admin_pool)
            .await?;
    }

    admin_pool.close().await;

    let mut options = PgConnectOptions::from_str(database_url)?;
    if require_ssl {
        options = options.ssl_mode(PgSslMode::Require);
    }
    let pool = PgPool::connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(Arc::new(pool))
}

/// Postgres unique-constraint violation, used to map insert races to
/// conflict responses instead of opaque storage errors.
pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(
        error,
        sqlx::Error::Database(db) if db.code().as_deref() == Some("23505")
    )
}
