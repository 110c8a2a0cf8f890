//! Database schema for the todo table

use sqlx::PgPool;

/// DDL for the single `todo` table. Safe to run repeatedly.
pub const SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS todo (
        id SERIAL PRIMARY KEY,
        title VARCHAR UNIQUE,
        description VARCHAR,
        completed BOOLEAN
    )
"#;

/// Create the todo table if it does not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running todo migrations...");

    sqlx::query(SCHEMA).execute(pool).await?;

    tracing::info!("Todo migrations complete");
    Ok(())
}
