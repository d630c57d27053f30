use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    info!("Opening database at {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    info!("Database connection established");

    Ok(pool)
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    // Read and execute migrations in order. Every statement is idempotent
    // (IF NOT EXISTS / OR IGNORE), so reruns on startup are safe.
    let migrations = [
        include_str!("../../migrations/001_economy.sql"),
        include_str!("../../migrations/002_warns.sql"),
        include_str!("../../migrations/003_shop.sql"),
        include_str!("../../migrations/004_reaction_roles.sql"),
    ];

    for (i, migration) in migrations.iter().enumerate() {
        info!("Running migration {}", i + 1);
        // Split migration by semicolons and execute each statement
        for statement in migration.split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement).execute(pool).await?;
            }
        }
    }

    info!("Migrations completed successfully");
    Ok(())
}

/// Fresh in-memory database with the full schema, for query tests.
/// A single connection keeps every statement on the same memory store.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    run_migrations(&pool).await.expect("migrations");
    pool
}
