use crate::config::{Config, PasswordStorage};
use crate::error::RegistrationError;
use crate::model::account::{Account, NewAccount};
use bcrypt::{hash, DEFAULT_COST};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub async fn init_db(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Inserts the account unless its username or email is already taken.
///
/// The existence check and the insert are one statement, so two requests
/// for the same username cannot both succeed.
pub async fn create_account(
    pool: &SqlitePool,
    new_account: NewAccount,
    password_storage: PasswordStorage,
) -> Result<Account, RegistrationError> {
    let password = match (password_storage, new_account.password) {
        (PasswordStorage::Bcrypt, Some(password)) => {
            Some(tokio::task::spawn_blocking(move || hash(password, DEFAULT_COST)).await??)
        }
        (_, password) => password,
    };

    let inserted = sqlx::query_as::<_, Account>(
        r#"
        INSERT INTO users (username, email, password)
        SELECT ?1, ?2, ?3
        WHERE NOT EXISTS (SELECT 1 FROM users WHERE username = ?1 OR email = ?2)
        RETURNING id, username, email, password
        "#,
    )
    .bind(new_account.username)
    .bind(new_account.email)
    .bind(password)
    .fetch_optional(pool)
    .await
    .map_err(RegistrationError::from_storage)?;

    inserted.ok_or(RegistrationError::Conflict)
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    sqlx::migrate!("./migrations").run(&pool).await.unwrap();
    pool
}

#[cfg(test)]
pub(crate) async fn file_pool(dir: &tempfile::TempDir, max_connections: u32) -> SqlitePool {
    use clap::Parser;

    let url = format!("sqlite:{}", dir.path().join("users.db").display());
    let max_connections = max_connections.to_string();
    let config = Config::try_parse_from([
        "user-register",
        "--database-url",
        url.as_str(),
        "--max-connections",
        max_connections.as_str(),
    ])
    .unwrap();
    init_db(&config).await.unwrap()
}

#[cfg(test)]
pub(crate) async fn count_users(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}
