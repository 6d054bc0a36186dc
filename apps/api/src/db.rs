use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Runs idempotent startup migrations: tables and indexes are created only
/// when absent, so repeated startups are safe.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS resumes (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id TEXT NOT NULL DEFAULT 'anonymous',
            file_name TEXT NOT NULL,
            original_text TEXT NOT NULL,
            parsed JSONB NOT NULL,
            analysis JSONB NOT NULL,
            uploaded_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS job_matches (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            resume_id UUID NOT NULL REFERENCES resumes(id) ON DELETE CASCADE,
            job_description TEXT NOT NULL,
            match_score INTEGER NOT NULL,
            match_details JSONB NOT NULL,
            cover_letter TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_resumes_user_id ON resumes(user_id);")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_job_matches_resume_id ON job_matches(resume_id);")
        .execute(pool)
        .await?;

    info!("Database migrations completed");
    Ok(())
}
