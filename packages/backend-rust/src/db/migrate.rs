use crate::db::{Database, DbPool};

const POSTGRES_MIGRATIONS: &[(&str, &str)] = &[(
    "001_init_schema",
    include_str!("../../sql/postgres/001_init_schema.sql"),
)];

const SQLITE_MIGRATIONS: &[(&str, &str)] = &[(
    "001_init_schema",
    include_str!("../../sql/sqlite/001_init_schema.sql"),
)];

/// Apply every migration in `$migrations` not yet listed in `_migrations`.
///
/// Expands to the same bookkeeping for each pool type; only the DDL and the
/// placeholder syntax differ between dialects.
macro_rules! apply_pending {
    ($pool:expr, $migrations:expr, $create_table:expr, $record:expr) => {{
        let pool = $pool;
        sqlx::query($create_table).execute(pool).await?;

        let applied: Vec<String> =
            sqlx::query_scalar(r#"SELECT "name" FROM "_migrations" ORDER BY "id""#)
                .fetch_all(pool)
                .await?;

        let mut count = 0usize;
        for &(name, sql) in $migrations {
            if applied.iter().any(|done| done == name) {
                tracing::debug!(migration = name, "Already applied, skipping");
                continue;
            }

            tracing::info!(migration = name, "Applying migration...");
            let mut tx = pool.begin().await?;
            sqlx::raw_sql(sql)
                .execute(&mut *tx)
                .await
                .map_err(|e| MigrationError::Migration {
                    name: name.to_string(),
                    source: e,
                })?;
            sqlx::query($record).bind(name).execute(&mut *tx).await?;
            tx.commit().await?;
            count += 1;
        }
        count
    }};
}

pub async fn run_migrations(db: &Database) -> Result<(), MigrationError> {
    tracing::info!(backend = ?db.backend(), "Running database migrations...");

    let applied_count = match db.pool() {
        DbPool::Postgres(pool) => apply_pending!(
            pool,
            POSTGRES_MIGRATIONS,
            r#"
            CREATE TABLE IF NOT EXISTS "_migrations" (
                "id" SERIAL PRIMARY KEY,
                "name" TEXT NOT NULL UNIQUE,
                "applied_at" TIMESTAMPTZ NOT NULL DEFAULT NOW()
            )
            "#,
            r#"INSERT INTO "_migrations" ("name") VALUES ($1)"#
        ),
        DbPool::Sqlite(pool) => apply_pending!(
            pool,
            SQLITE_MIGRATIONS,
            r#"
            CREATE TABLE IF NOT EXISTS "_migrations" (
                "id" INTEGER PRIMARY KEY AUTOINCREMENT,
                "name" TEXT NOT NULL UNIQUE,
                "applied_at" TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            r#"INSERT INTO "_migrations" ("name") VALUES (?)"#
        ),
    };

    if applied_count > 0 {
        tracing::info!(count = applied_count, "Database migrations completed");
    } else {
        tracing::info!("Database is up to date, no migrations needed");
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Migration '{name}' failed: {source}")]
    Migration {
        name: String,
        #[source]
        source: sqlx::Error,
    },
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
